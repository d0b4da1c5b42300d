//! Text extraction from CSS selector matches
//!
//! A [`Text`] is only ever built from non-empty input, so `Option<Text>`
//! separates a missing field from one that is present but blank.

use std::num::ParseIntError;

use scraper::{ElementRef, Selector};
use tracing::warn;

/// Raw text of a matched node together with its trimmed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    raw: String,
    /// Text with leading and trailing whitespace removed
    pub trimmed: String,
    /// Byte length of the raw, untrimmed text
    pub length: usize,
}

impl Text {
    /// Wrap a string, returning `None` for empty input.
    ///
    /// Whitespace-only input is a present value whose `trimmed` is empty.
    pub fn new(s: impl Into<String>) -> Option<Self> {
        let raw = s.into();
        if raw.is_empty() {
            return None;
        }
        Some(Self::from_raw(raw))
    }

    fn from_raw(raw: String) -> Self {
        Self {
            trimmed: raw.trim().to_string(),
            length: raw.len(),
            raw,
        }
    }

    /// The text exactly as it was extracted
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse the trimmed text as a base-10 integer.
    pub fn parse_int(&self) -> Result<i32, ParseIntError> {
        self.trimmed.parse::<i32>()
    }

    /// Parse the trimmed text as an integer, logging and yielding 0 on failure.
    pub fn as_int(&self) -> i32 {
        match self.parse_int() {
            Ok(n) => n,
            Err(e) => {
                warn!(text = %self.trimmed, error = %e, "could not convert text to integer");
                0
            }
        }
    }

    /// Split the trimmed text on `sep`, trimming each part.
    ///
    /// Empty parts are kept so callers can rely on positional layout.
    pub fn split(&self, sep: &str) -> Vec<Text> {
        self.trimmed
            .split(sep)
            .map(|part| Self::from_raw(part.to_string()))
            .collect()
    }
}

/// Text content of the first descendant of `element` matching `selector`
pub fn get_text(element: &ElementRef, selector: &Selector) -> Option<Text> {
    let found = element.select(selector).next()?;
    Text::new(found.text().collect::<String>())
}
