//! Provider configuration and selector maps
//!
//! Selector strings are plain configuration so structural changes on the site
//! can be followed without code edits. They are compiled once into
//! [`scraper::Selector`]s when a provider is built.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://omelete.com.br";
pub const DEFAULT_CHARSET: &str = "utf-8";
pub const DEFAULT_TIME_ZONE: &str = "America/Sao_Paulo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Site-wide settings for a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    /// Charset the site serves its pages in
    pub charset: String,
    /// IANA zone that listing dates are expressed in
    pub time_zone: String,
    pub timeout_secs: u64,
    pub selectors: SelectorConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            selectors: SelectorConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Load a configuration from JSON; omitted keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub reviews_section: SectionSelectorConfig,
    pub review: ReviewSelectorConfig,
}

/// Selectors for listing and search pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSelectorConfig {
    pub container: String,
    pub label: String,
    pub list_item: String,
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub link: String,
    /// Active entry of the paginator; carries the page number in `data-value`
    pub active_page: String,
}

impl Default for SectionSelectorConfig {
    fn default() -> Self {
        Self {
            container: "#conteudo".to_string(),
            label: "h1".to_string(),
            list_item: ".include.search-content-type".to_string(),
            image_url: "img".to_string(),
            title: ".title".to_string(),
            subtitle: ".subtitle".to_string(),
            date: "span.date".to_string(),
            link: "a".to_string(),
            active_page: ".centered-paginator > ul > li.active".to_string(),
        }
    }
}

/// Selectors for a single review page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSelectorConfig {
    pub container: String,
    pub rating_description: String,
}

impl Default for ReviewSelectorConfig {
    fn default() -> Self {
        Self {
            container: "div.article-main".to_string(),
            rating_description: "div.rating-ficha > span.nota-texto".to_string(),
        }
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::InvalidSelector {
        selector: selector.to_string(),
        error: e.to_string(),
    })
}

/// Compiled form of [`SectionSelectorConfig`]
#[derive(Debug, Clone)]
pub struct SectionSelectors {
    pub container: Selector,
    pub label: Selector,
    pub list_item: Selector,
    pub image_url: Selector,
    pub title: Selector,
    pub subtitle: Selector,
    pub date: Selector,
    pub link: Selector,
    pub active_page: Selector,
}

impl SectionSelectors {
    pub fn compile(config: &SectionSelectorConfig) -> Result<Self> {
        Ok(Self {
            container: compile(&config.container)?,
            label: compile(&config.label)?,
            list_item: compile(&config.list_item)?,
            image_url: compile(&config.image_url)?,
            title: compile(&config.title)?,
            subtitle: compile(&config.subtitle)?,
            date: compile(&config.date)?,
            link: compile(&config.link)?,
            active_page: compile(&config.active_page)?,
        })
    }
}

/// Compiled form of [`ReviewSelectorConfig`]
#[derive(Debug, Clone)]
pub struct ReviewSelectors {
    pub container: Selector,
    pub rating_description: Selector,
}

impl ReviewSelectors {
    pub fn compile(config: &ReviewSelectorConfig) -> Result<Self> {
        Ok(Self {
            container: compile(&config.container)?,
            rating_description: compile(&config.rating_description)?,
        })
    }
}
