//! Page acquisition: HTTP fetch, charset transcoding, URL resolution

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};

/// Browser identities rotated across requests
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:43.0) Gecko/20100101 Firefox/43.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.11; rv:43.0) Gecko/20100101 Firefox/43.0",
    "Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10_6_2; de-at) AppleWebKit/531.21.8 (KHTML, like Gecko) Version/4.0.4 Safari/531.21.10",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_2) AppleWebKit/601.3.9 (KHTML, like Gecko) Version/9.0.2 Safari/601.3.9",
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2357.125 Safari/537.36",
    "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.2; WOW64; Trident/6.0)",
    "Mozilla/5.0 (Windows NT 6.3; WOW64; Trident/7.0; rv:11.0) like Gecko",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/46.0.2486.0 Safari/537.36 Edge/13.10586",
    "Mozilla/5.0 (Windows NT 6.3; WOW64; rv:43.0) Gecko/20100101 Firefox/43.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 9_1 like Mac OS X) AppleWebKit/601.1.46 (KHTML, like Gecko) Version/9.0 Mobile/13B5110e Safari/601.1",
    "Mozilla/5.0 (iPad; CPU OS 9_1 like Mac OS X) AppleWebKit/601.1.46 (KHTML, like Gecko) Version/9.0 Mobile/13B143 Safari/601.1",
    "Mozilla/5.0 (Linux; Android 5.1.1; Nexus 7 Build/LMY47V) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/47.0.2526.76 Safari/537.36",
];

/// Source of parsed documents for the page handlers
pub trait DocumentFetcher {
    /// Fetch `url`, decode its body from `charset` and parse it as HTML.
    fn fetch_document(&self, url: &str, charset: &str) -> Result<Html>;
}

/// Blocking HTTP fetcher with a fixed timeout and rotating user agent
#[derive(Debug)]
pub struct HttpFetcher {
    client: Client,
    rng: Mutex<StdRng>,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_rng(timeout, StdRng::from_entropy())
    }

    /// Use a caller-supplied random source for user-agent selection
    pub fn with_rng(timeout: Duration, rng: StdRng) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self::with_client(client, rng))
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings
    pub fn with_client(client: Client, rng: StdRng) -> Self {
        Self {
            client,
            rng: Mutex::new(rng),
        }
    }

    fn user_agent(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        USER_AGENTS[rng.gen_range(0..USER_AGENTS.len())]
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch_document(&self, url: &str, charset: &str) -> Result<Html> {
        let user_agent = self.user_agent();
        debug!(url, user_agent, "fetching document");

        let http_error = |source| Error::Http {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "*/*")
            .header(USER_AGENT, user_agent)
            .send()
            .map_err(http_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(http_error)?;
        let text = decode_body(&body, charset)?;
        Ok(Html::parse_document(&text))
    }
}

/// Decode `bytes` from the named charset; an empty label means UTF-8.
pub fn decode_body(bytes: &[u8], charset: &str) -> Result<String> {
    let label = charset.trim();
    let encoding = if label.is_empty() {
        UTF_8
    } else {
        Encoding::for_label(label.as_bytes())
            .ok_or_else(|| Error::UnknownCharset(charset.to_string()))?
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(charset = used.name(), "malformed bytes replaced while decoding body");
    }
    Ok(text.into_owned())
}

/// Resolve `relative` against `base`
pub fn resolve_url(base: &str, relative: &str) -> Result<String> {
    let base_url = Url::parse(base).map_err(|source| Error::InvalidUrl {
        url: base.to_string(),
        source,
    })?;

    base_url
        .join(relative)
        .map(|u| u.to_string())
        .map_err(|source| Error::InvalidUrl {
            url: relative.to_string(),
            source,
        })
}
