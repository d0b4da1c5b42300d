//! Page handlers: turn a parsed listing or review page into records
//!
//! Missing nodes leave the matching field empty. Only the caller's fetch can
//! fail; a handler always returns a (possibly partial) record.

use chrono::{DateTime, FixedOffset, TimeDelta};
use chrono_tz::Tz;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::config::{ReviewSelectors, SectionSelectors};
use crate::date::create_date_from_string;
use crate::extractors::{
    get_author, get_description, get_headline, get_image, get_item_property, get_text, Text,
};
use crate::records::{FieldStatus, ListingItem, ListingSection, Pagination, ReviewDetail, SectionType};
use crate::stringutil::{break_by_token, eat_until_digit, substring_between};

const KEY_PARAM: &str = "?key=";

fn trimmed(text: Option<Text>) -> String {
    text.map(|t| t.trimmed).unwrap_or_default()
}

/// Build a listing section from a listing or search results page
pub fn handle_reviews_section(
    document: &Html,
    selectors: &SectionSelectors,
    section_type: SectionType,
    tz: Tz,
) -> ListingSection {
    let mut section = ListingSection::new(section_type);

    let Some(container) = document.select(&selectors.container).next() else {
        return section;
    };

    section.label = trimmed(get_text(&container, &selectors.label));
    section.results = container
        .select(&selectors.list_item)
        .map(|element| extract_listing_item(&element, selectors, section_type, tz))
        .filter(ListingItem::is_complete)
        .collect();
    section.pagination = read_pagination(&container, &selectors.active_page);

    section
}

fn extract_listing_item(
    element: &ElementRef,
    selectors: &SectionSelectors,
    section_type: SectionType,
    tz: Tz,
) -> ListingItem {
    let mut item = ListingItem::new(section_type);
    item.title = trimmed(get_text(element, &selectors.title));
    item.subtitle = trimmed(get_text(element, &selectors.subtitle));
    item.image_url = get_image(element, &selectors.image_url).src_url;
    item.publish_date = get_text(element, &selectors.date).and_then(|t| parse_listing_date(&t, tz));

    match element
        .select(&selectors.link)
        .next()
        .and_then(|a| a.value().attr("href"))
    {
        Some(href) => item.path = strip_key_param(href).to_string(),
        None => warn!(title = %item.title, "listing item has no link"),
    }

    item
}

/// Remove a trailing `?key=...` tracking parameter from a review path
pub fn strip_key_param(href: &str) -> &str {
    match href.rfind(KEY_PARAM) {
        Some(i) => &href[..i],
        None => href,
    }
}

/// Parse a listing date such as `"Qui, 05/03 | 14h30"`.
///
/// The part before `|` is the calendar date, the part after it the time of
/// day. A time that does not split into hours and minutes is ignored.
pub fn parse_listing_date(text: &Text, tz: Tz) -> Option<DateTime<FixedOffset>> {
    let parts = text.split("|");
    if parts.len() != 2 {
        return None;
    }

    let date = match create_date_from_string(eat_until_digit(&parts[0].trimmed), "/", false, tz) {
        Ok(d) => d,
        Err(e) => {
            warn!(text = %text.trimmed, error = %e, "could not parse listing date");
            return None;
        }
    };

    let (h, m) = break_by_token(&parts[1].trimmed, 'h');
    if h.is_empty() || m.is_empty() {
        return Some(date.fixed_offset());
    }

    let hours = h.parse::<i64>().unwrap_or(0);
    let minutes = m.parse::<i64>().unwrap_or(0);
    let with_time = TimeDelta::try_hours(hours)
        .zip(TimeDelta::try_minutes(minutes))
        .and_then(|(h, m)| date.checked_add_signed(h)?.checked_add_signed(m));

    match with_time {
        Some(t) => Some(t.fixed_offset()),
        None => {
            warn!(text = %text.trimmed, "listing time out of range");
            Some(date.fixed_offset())
        }
    }
}

/// Read the active paginator entry's `data-value`
pub fn read_pagination(container: &ElementRef, active_page: &Selector) -> Pagination {
    container
        .select(active_page)
        .next()
        .and_then(|el| el.value().attr("data-value"))
        .and_then(|v| v.trim().parse::<u32>().ok())
        .map(Pagination::at)
        .unwrap_or_default()
}

/// Build a review record from a review page
pub fn handle_review_info(document: &Html, selectors: &ReviewSelectors) -> ReviewDetail {
    let mut review = ReviewDetail::default();

    let Some(container) = document.select(&selectors.container).next() else {
        return review;
    };

    review.headline = trimmed(get_headline(&container));
    review.description = trimmed(get_description(&container));
    review.author = trimmed(get_author(&container));
    review.publish_date_text = trimmed(
        get_item_property(&container, "datePublished").and_then(|p| p.content_text),
    );

    if let Some(body) = get_item_property(&container, "reviewBody") {
        review.body_text = trimmed(body.content_text);
        review.body_html = body.html;
    }

    match get_item_property(&container, "ratingValue").and_then(|p| p.content_text) {
        Some(text) => match text.parse_int() {
            Ok(rating) => {
                review.rating = rating;
                review.rating_status = FieldStatus::Present;
            }
            Err(e) => {
                warn!(text = %text.trimmed, error = %e, "could not parse rating");
                review.rating_status = FieldStatus::Unparsed;
            }
        },
        None => review.rating_status = FieldStatus::Missing,
    }

    let rating_text = trimmed(get_text(&container, &selectors.rating_description));
    if !rating_text.is_empty() {
        review.rating_description = substring_between(&rating_text, '(', ')').to_string();
    }

    review
}
