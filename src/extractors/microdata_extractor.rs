//! Microdata (schema.org `itemprop` attribute) extraction
//!
//! Looks up a single named property below a container element.
//! Reference: https://html.spec.whatwg.org/multipage/microdata.html

use scraper::{ElementRef, Selector};
use tracing::warn;

use super::Text;

/// A single `itemprop` match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemProperty {
    pub name: String,
    /// Inner HTML of the property element
    pub html: String,
    /// `content` attribute when present, otherwise the element text
    pub content_text: Option<Text>,
}

/// Find the first descendant of `container` with `itemprop=property`
pub fn get_item_property(container: &ElementRef, property: &str) -> Option<ItemProperty> {
    if property.is_empty() {
        return None;
    }

    let selector_str = format!("[itemprop=\"{}\"]", property);
    let selector = match Selector::parse(&selector_str) {
        Ok(s) => s,
        Err(e) => {
            warn!(property, error = %e, "invalid itemprop name");
            return None;
        }
    };

    let element = container.select(&selector).next()?;

    let content = match element.value().attr("content") {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => element.text().collect::<String>(),
    };

    Some(ItemProperty {
        name: property.to_string(),
        html: element.inner_html(),
        content_text: Text::new(content),
    })
}

fn property_text(container: &ElementRef, property: &str) -> Option<Text> {
    get_item_property(container, property).and_then(|p| p.content_text)
}

/// `itemprop=author` as text
pub fn get_author(container: &ElementRef) -> Option<Text> {
    property_text(container, "author")
}

/// `itemprop=headline` as text
pub fn get_headline(container: &ElementRef) -> Option<Text> {
    property_text(container, "headline")
}

/// `itemprop=description` as text
pub fn get_description(container: &ElementRef) -> Option<Text> {
    property_text(container, "description")
}
