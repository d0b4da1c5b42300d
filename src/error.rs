//! Error types for fetching and parsing review pages

/// Errors surfaced to callers of the provider.
///
/// Structural absence (a selector that matches nothing) is never an error;
/// handlers leave the field empty instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse selector '{selector}': {error}")]
    InvalidSelector { selector: String, error: String },

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Unknown charset '{0}'")]
    UnknownCharset(String),

    #[error("Path is missing")]
    MissingPath,

    #[error("Search query is missing")]
    MissingQuery,

    #[error("Page not found")]
    PageNotFound,

    #[error("Date string or delimiter must be specified")]
    EmptyDateInput,

    #[error("Date {day}/{month}/{year} cannot be represented")]
    DateOutOfRange { day: i32, month: i32, year: i32 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
