//! Review scraper for omelete.com.br
//!
//! Fetches movie and TV show review pages and extracts structured records
//! through CSS selectors and schema.org microdata:
//! - Review listings with pagination
//! - Review search results
//! - Full review pages (headline, author, body, rating)

pub mod config;
pub mod date;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod handlers;
pub mod provider;
pub mod records;
pub mod stringutil;

pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use fetch::{resolve_url, DocumentFetcher, HttpFetcher};
pub use provider::Omelete;
pub use records::*;
