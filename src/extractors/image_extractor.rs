//! Image source extraction

use scraper::{ElementRef, Selector};

/// Reference to an image on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    /// `src` attribute, empty when absent
    pub src_url: String,
}

/// `src` of the first descendant of `container` matching `selector`
pub fn get_image(container: &ElementRef, selector: &Selector) -> Image {
    let src_url = container
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .unwrap_or("")
        .to_string();

    Image { src_url }
}
