//! omelete.com.br review provider
//!
//! Owns the site's URL scheme and wires fetched documents into the page
//! handlers. Every call fetches and parses afresh; nothing is cached.

use std::time::Duration;

use chrono_tz::Tz;
use tracing::debug;

use crate::config::{ProviderConfig, ReviewSelectors, SectionSelectors};
use crate::date::load_time_zone;
use crate::error::{Error, Result};
use crate::fetch::{resolve_url, DocumentFetcher, HttpFetcher};
use crate::handlers::{handle_review_info, handle_reviews_section};
use crate::records::{ListingItem, ListingSection, ReviewDetail, SectionType};

/// Path of a listing page, e.g. `/critica/filmes/?pagina=2`
pub fn reviews_section_path(section_type: SectionType, page: u32) -> String {
    let mut path = format!("/critica/{}", section_type.path_segment());
    if page > 1 {
        path.push_str(&format!("/?pagina={}", page));
    }
    path
}

/// Prefix under which review pages of a category live
pub fn review_info_path(section_type: SectionType) -> String {
    format!("/{}/criticas", section_type.path_segment())
}

/// Path of a search results page
pub fn search_path(query: &str, section_type: SectionType, page: u32) -> String {
    let query: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!(
        "/busca/?q={}&secao={}&tipo=critica&pagina={}",
        query,
        section_type.path_segment(),
        page
    )
}

/// Scraper for the review pages of a single site
#[derive(Debug)]
pub struct Omelete<F = HttpFetcher> {
    fetcher: F,
    base_url: String,
    charset: String,
    time_zone: Tz,
    section_selectors: SectionSelectors,
    review_selectors: ReviewSelectors,
}

impl Omelete<HttpFetcher> {
    /// Provider for the live site with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(ProviderConfig::default())
    }

    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(Duration::from_secs(config.timeout_secs))?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: DocumentFetcher> Omelete<F> {
    /// Provider that acquires documents through `fetcher`
    pub fn with_fetcher(config: ProviderConfig, fetcher: F) -> Result<Self> {
        Ok(Self {
            section_selectors: SectionSelectors::compile(&config.selectors.reviews_section)?,
            review_selectors: ReviewSelectors::compile(&config.selectors.review)?,
            time_zone: load_time_zone(&config.time_zone),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            charset: config.charset,
            fetcher,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Review at `path` within the given category
    pub fn get_review_info(&self, path: &str, section_type: SectionType) -> Result<ReviewDetail> {
        if path.is_empty() {
            return Err(Error::MissingPath);
        }

        // Slugs are relative to the category prefix, with or without a leading '/'.
        let prefix = format!("{}{}/", self.base_url, review_info_path(section_type));
        let url = resolve_url(&prefix, path.trim_start_matches('/'))?;

        self.fetch_review(url)
    }

    pub fn get_movie_review_info(&self, path: &str) -> Result<ReviewDetail> {
        self.get_review_info(path, SectionType::Movies)
    }

    pub fn get_show_review_info(&self, path: &str) -> Result<ReviewDetail> {
        self.get_review_info(path, SectionType::Shows)
    }

    /// Review a listing item links to
    pub fn review_for_item(&self, item: &ListingItem) -> Result<ReviewDetail> {
        if item.path.is_empty() {
            return Err(Error::MissingPath);
        }
        self.fetch_review(resolve_url(&self.base_url, &item.path)?)
    }

    fn fetch_review(&self, url: String) -> Result<ReviewDetail> {
        debug!(url = %url, "fetching review");
        let document = self.fetcher.fetch_document(&url, &self.charset)?;

        let mut review = handle_review_info(&document, &self.review_selectors);
        review.source_url = url;
        Ok(review)
    }

    /// One page of the review listing for a category
    pub fn get_reviews_section(&self, section_type: SectionType, page: u32) -> Result<ListingSection> {
        let url = format!("{}{}", self.base_url, reviews_section_path(section_type, page));
        debug!(url = %url, "fetching reviews section");

        let document = self.fetcher.fetch_document(&url, &self.charset)?;
        Ok(handle_reviews_section(
            &document,
            &self.section_selectors,
            section_type,
            self.time_zone,
        ))
    }

    pub fn get_movie_reviews_section(&self) -> Result<ListingSection> {
        self.get_reviews_section(SectionType::Movies, 1)
    }

    pub fn get_shows_reviews_section(&self) -> Result<ListingSection> {
        self.get_reviews_section(SectionType::Shows, 1)
    }

    /// Listing page after `section`
    pub fn next_page(&self, section: &ListingSection) -> Result<ListingSection> {
        match section.pagination.next_page {
            0 => Err(Error::PageNotFound),
            page => self.get_reviews_section(section.section_type, page),
        }
    }

    /// Listing page before `section`; fails on the first page
    pub fn previous_page(&self, section: &ListingSection) -> Result<ListingSection> {
        if section.pagination.current_page <= 1 || section.pagination.previous_page == 0 {
            return Err(Error::PageNotFound);
        }
        self.get_reviews_section(section.section_type, section.pagination.previous_page)
    }

    /// Reviews matching `query` on one page of search results
    pub fn search_reviews(
        &self,
        query: &str,
        section_type: SectionType,
        page: u32,
    ) -> Result<Vec<ListingItem>> {
        if query.trim().is_empty() {
            return Err(Error::MissingQuery);
        }

        let url = format!("{}{}", self.base_url, search_path(query, section_type, page));
        debug!(url = %url, "searching reviews");

        // Search results share the listing page layout.
        let document = self.fetcher.fetch_document(&url, &self.charset)?;
        let section = handle_reviews_section(
            &document,
            &self.section_selectors,
            section_type,
            self.time_zone,
        );
        Ok(section.results)
    }

    pub fn search_movie_reviews(&self, query: &str) -> Result<Vec<ListingItem>> {
        self.search_reviews(query, SectionType::Movies, 1)
    }

    pub fn search_show_reviews(&self, query: &str) -> Result<Vec<ListingItem>> {
        self.search_reviews(query, SectionType::Shows, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FieldStatus, Pagination};
    use scraper::Html;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned pages and records every requested URL
    #[derive(Debug, Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }
    }

    impl DocumentFetcher for FakeFetcher {
        fn fetch_document(&self, url: &str, _charset: &str) -> Result<Html> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(html) => Ok(Html::parse_document(html)),
                None => Err(Error::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn listing_page(current: u32, title: &str) -> String {
        format!(
            r#"
            <div id="conteudo">
                <h1>Críticas</h1>
                <div class="include search-content-type">
                    <a href="/filmes/criticas/{title}?key=x">
                        <span class="title">{title}</span>
                        <span class="subtitle">Subtítulo de {title}</span>
                    </a>
                </div>
                <div class="centered-paginator">
                    <ul><li class="active" data-value="{current}">{current}</li></ul>
                </div>
            </div>
            "#
        )
    }

    const REVIEW_PAGE: &str = r#"
    <div class="article-main">
        <h1 itemprop="headline">Ataque dos Titãs: O Fim do Mundo | Crítica</h1>
        <span itemprop="author">Gabriel Avila</span>
        <meta itemprop="ratingValue" content="3">
        <div itemprop="reviewBody">Corpo</div>
    </div>
    "#;

    fn provider(fetcher: FakeFetcher) -> Omelete<FakeFetcher> {
        Omelete::with_fetcher(ProviderConfig::default(), fetcher).unwrap()
    }

    #[test]
    fn test_paths() {
        assert_eq!(reviews_section_path(SectionType::Movies, 1), "/critica/filmes");
        assert_eq!(reviews_section_path(SectionType::Shows, 3), "/critica/series-tv/?pagina=3");
        assert_eq!(review_info_path(SectionType::Shows), "/series-tv/criticas");
        assert_eq!(
            search_path("duna parte dois", SectionType::Movies, 2),
            "/busca/?q=duna+parte+dois&secao=filmes&tipo=critica&pagina=2"
        );
    }

    #[test]
    fn test_get_review_info() {
        let url = "https://omelete.com.br/filmes/criticas/attack-on-titan-fim-do-mundo";
        let omelete = provider(FakeFetcher::default().with_page(url, REVIEW_PAGE));

        let review = omelete
            .get_movie_review_info("attack-on-titan-fim-do-mundo")
            .unwrap();
        assert_eq!(review.headline, "Ataque dos Titãs: O Fim do Mundo | Crítica");
        assert_eq!(review.author, "Gabriel Avila");
        assert_eq!(review.rating, 3);
        assert_eq!(review.rating_status, FieldStatus::Present);
        assert_eq!(review.body_text, "Corpo");
        assert_eq!(review.source_url, url);

        let same = omelete
            .get_review_info("/attack-on-titan-fim-do-mundo", SectionType::Movies)
            .unwrap();
        assert_eq!(same.source_url, url);
    }

    #[test]
    fn test_empty_input_fails_before_fetching() {
        let omelete = provider(FakeFetcher::default());

        assert!(matches!(omelete.get_show_review_info(""), Err(Error::MissingPath)));
        assert!(matches!(
            omelete.search_reviews("  ", SectionType::Movies, 1),
            Err(Error::MissingQuery)
        ));
        assert!(omelete.fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn test_fetch_errors_propagate() {
        let omelete = provider(FakeFetcher::default());

        match omelete.get_movie_reviews_section() {
            Err(Error::Status { url, status }) => {
                assert_eq!(url, "https://omelete.com.br/critica/filmes");
                assert_eq!(status, 404);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_section_traversal() {
        let fetcher = FakeFetcher::default()
            .with_page("https://omelete.com.br/critica/filmes", &listing_page(1, "primeiro"))
            .with_page(
                "https://omelete.com.br/critica/filmes/?pagina=2",
                &listing_page(2, "segundo"),
            );
        let omelete = provider(fetcher);

        let first = omelete.get_movie_reviews_section().unwrap();
        assert_eq!(first.pagination, Pagination::at(1));
        assert_eq!(first.results[0].path, "/filmes/criticas/primeiro");
        assert!(matches!(omelete.previous_page(&first), Err(Error::PageNotFound)));

        let second = omelete.next_page(&first).unwrap();
        assert_eq!(second.pagination.current_page, 2);
        assert_eq!(second.results[0].title, "segundo");

        let back = omelete.previous_page(&second).unwrap();
        assert_eq!(back, first);
    }

    #[test]
    fn test_next_page_without_paginator() {
        let omelete = provider(FakeFetcher::default());
        let section = ListingSection::new(SectionType::Shows);

        assert!(matches!(omelete.next_page(&section), Err(Error::PageNotFound)));
        assert!(omelete.fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn test_search_and_follow_item() {
        let search_url =
            "https://omelete.com.br/busca/?q=titas&secao=filmes&tipo=critica&pagina=1";
        let review_url = "https://omelete.com.br/filmes/criticas/titas";
        let fetcher = FakeFetcher::default()
            .with_page(search_url, &listing_page(1, "titas"))
            .with_page(review_url, REVIEW_PAGE);
        let omelete = provider(fetcher);

        let results = omelete.search_movie_reviews("titas").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].section_type, SectionType::Movies);

        let review = omelete.review_for_item(&results[0]).unwrap();
        assert_eq!(review.source_url, review_url);
        assert_eq!(review.author, "Gabriel Avila");
    }

    #[test]
    fn test_review_for_item_resolves_href() {
        let url = "https://omelete.com.br/filmes/criticas/duna";
        let omelete = provider(FakeFetcher::default().with_page(url, REVIEW_PAGE));
        let mut item = ListingItem::new(SectionType::Movies);

        for href in [url, "filmes/criticas/duna", "/filmes/criticas/duna"] {
            item.path = href.to_string();
            let review = omelete.review_for_item(&item).unwrap();
            assert_eq!(review.source_url, url);
        }
    }

    #[test]
    fn test_get_review_info_with_absolute_url() {
        let url = "https://omelete.com.br/series-tv/criticas/the-bear";
        let omelete = provider(FakeFetcher::default().with_page(url, REVIEW_PAGE));

        let review = omelete.get_show_review_info(url).unwrap();
        assert_eq!(review.source_url, url);
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let config = ProviderConfig {
            base_url: "omelete".to_string(),
            ..Default::default()
        };
        let omelete = Omelete::with_fetcher(config, FakeFetcher::default()).unwrap();

        assert!(matches!(
            omelete.get_movie_review_info("duna"),
            Err(Error::InvalidUrl { .. })
        ));
        assert!(omelete.fetcher.requested.borrow().is_empty());
    }

    #[test]
    fn test_custom_base_url() {
        let config = ProviderConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        let omelete = Omelete::with_fetcher(config, FakeFetcher::default()).unwrap();
        assert_eq!(omelete.base_url(), "http://localhost:8080");

        let debug = format!("{:?}", omelete);
        assert!(debug.starts_with("Omelete"));
        assert!(debug.contains("http://localhost:8080"));
    }
}
