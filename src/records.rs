//! Records produced by the page handlers

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Review category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    Movies,
    Shows,
}

impl SectionType {
    /// Path segment the site uses for this category
    pub fn path_segment(self) -> &'static str {
        match self {
            SectionType::Movies => "filmes",
            SectionType::Shows => "series-tv",
        }
    }
}

/// Position of a listing within its paged result set
///
/// `previous_page` is 0 when there is no page before `current_page`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub previous_page: u32,
    pub current_page: u32,
    pub next_page: u32,
}

impl Pagination {
    /// Pagination for the page numbered `current_page`
    pub fn at(current_page: u32) -> Self {
        Self {
            previous_page: current_page.saturating_sub(1),
            current_page,
            next_page: current_page.saturating_add(1),
        }
    }
}

/// One review entry on a listing or search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    pub image_url: String,
    pub publish_date: Option<DateTime<FixedOffset>>,
    pub section_type: SectionType,
    pub title: String,
    pub subtitle: String,
    pub path: String,
}

impl ListingItem {
    pub(crate) fn new(section_type: SectionType) -> Self {
        Self {
            image_url: String::new(),
            publish_date: None,
            section_type,
            title: String::new(),
            subtitle: String::new(),
            path: String::new(),
        }
    }

    /// Only fully scraped items are kept in a section
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.subtitle.is_empty() && !self.path.is_empty()
    }
}

/// One page of a review listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSection {
    pub label: String,
    pub section_type: SectionType,
    pub results: Vec<ListingItem>,
    pub pagination: Pagination,
}

impl ListingSection {
    pub fn new(section_type: SectionType) -> Self {
        Self {
            label: String::new(),
            section_type,
            results: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Whether a scraped field held a usable value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Present,
    #[default]
    Missing,
    /// The field was on the page but its text did not parse
    Unparsed,
}

/// A full review page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDetail {
    pub headline: String,
    pub description: String,
    pub author: String,
    pub publish_date_text: String,
    pub body_text: String,
    pub body_html: String,
    /// 0 unless `rating_status` is `Present`
    pub rating: i32,
    pub rating_status: FieldStatus,
    pub rating_description: String,
    pub source_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_at() {
        assert_eq!(
            Pagination::at(3),
            Pagination { previous_page: 2, current_page: 3, next_page: 4 }
        );
        assert_eq!(
            Pagination::at(1),
            Pagination { previous_page: 0, current_page: 1, next_page: 2 }
        );
    }

    #[test]
    fn test_item_retention_rule() {
        let mut item = ListingItem::new(SectionType::Movies);
        item.title = "Duna".to_string();
        item.path = "/filmes/criticas/duna".to_string();
        assert!(!item.is_complete());

        item.subtitle = "Villeneuve entrega".to_string();
        assert!(item.is_complete());
    }

    #[test]
    fn test_serialized_field_names() {
        let section = ListingSection::new(SectionType::Shows);
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["section_type"], "shows");
        assert_eq!(json["pagination"]["previous_page"], 0);

        let review = ReviewDetail::default();
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["rating_status"], "missing");
    }
}
