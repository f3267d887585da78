//! The job-posting spider. One instance drives one search session:
//! it seeds the search url, paginates the result listing, discovers
//! posting links, and hands each extracted record to the persistence
//! gate.

use std::sync::Arc;

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::config::SearchConfig;
use crate::error::CrawlError;
use crate::extract;
use crate::pagination;
use crate::record::JobPosting;
use crate::spider::Spider;
use crate::store::{self, JobStore};
use crate::Response;

/// Posting links on a search-results page.
const POSTING_LINK: &str = r#"a[data-tn-element="jobTitle"]"#;

/// Results summary, e.g. "Jobs 1 to 10 of 237 results".
const RESULTS_SUMMARY: &str = "div#searchCount";

pub struct IndeedSpider {
    search: SearchConfig,
    seed_url: String,
    store: Arc<dyn JobStore>,
}

impl IndeedSpider {
    pub fn new(search: SearchConfig, store: Arc<dyn JobStore>) -> Self {
        let seed_url = search.seed_url();
        log::info!("session seed url: {}", seed_url);
        Self { search, seed_url, store }
    }

    /// Subsequent result pages share the seed url plus a `start`
    /// offset, so a seed-prefix match separates listing pages from
    /// posting pages.
    fn is_search_page(&self, url: &str) -> bool {
        url.starts_with(&self.seed_url)
    }

    /// Handle one search-results page: collect posting links, and on
    /// the seed page also compute the remaining page offsets from the
    /// results summary.
    ///
    /// Returned posting links may be relative; the engine resolves
    /// them against the page url. Duplicate links across pages are not
    /// filtered here, the persistence gate dedups downstream.
    pub fn parse_search_page(&self, url: &str, body: &str) -> Result<Vec<String>, CrawlError> {
        let document = Html::parse_document(body);
        let mut urls = discover_links(&document);
        log::debug!("{} posting links on {}", urls.len(), url);

        if url == self.seed_url {
            let summary = results_summary(&document).ok_or(CrawlError::MissingResultsSummary)?;
            let total = pagination::parse_total_results(&summary)?;
            if total == 0 {
                return Err(CrawlError::NoResults);
            }
            let offsets = pagination::page_offsets(total);
            log::info!("{} results, scheduling {} more pages", total, offsets.len());
            for offset in offsets {
                urls.push(format!("{}&start={}", self.seed_url, offset));
            }
        }
        Ok(urls)
    }

    /// Build the record for one fetched posting page.
    pub fn extract_posting(&self, url: &str, body: &str) -> JobPosting {
        let document = Html::parse_document(body);
        extract::parse_posting(&document, url)
    }
}

fn discover_links(document: &Html) -> Vec<String> {
    let selector = Selector::parse(POSTING_LINK).unwrap();
    document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

fn results_summary(document: &Html) -> Option<String> {
    let selector = Selector::parse(RESULTS_SUMMARY).unwrap();
    document
        .select(&selector)
        .flat_map(|el| el.text())
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_owned)
}

#[async_trait]
impl Spider for IndeedSpider {
    fn name(&self) -> String {
        "indeed".to_owned()
    }

    fn start_urls(&self) -> Vec<String> {
        vec![self.seed_url.clone()]
    }

    async fn parse(&self, response: Response) -> Result<(u64, Vec<String>), CrawlError> {
        let url = response.get_url().to_owned();
        let body = response.into_string()?;

        // Html documents are not Send, so page handling stays fully
        // synchronous and only the store calls cross an await.
        if self.is_search_page(&url) {
            let urls = self.parse_search_page(&url, &body)?;
            return Ok((0, urls));
        }

        let record = self.extract_posting(&url, &body);
        let written = store::persist_new(self.store.as_ref(), &self.search.index, &record).await?;
        if written {
            log::info!("stored {:?}", record.identity_key());
        }
        Ok((1, vec![]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn spider() -> IndeedSpider {
        let search = SearchConfig {
            query: "Engineer".to_owned(),
            location: "Seattle".to_owned(),
            domain: ".com".to_owned(),
            index: "jobs".to_owned(),
        };
        IndeedSpider::new(search, Arc::new(MemoryStore::new()))
    }

    fn search_page(summary: &str, links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a data-tn-element="jobTitle" href="{}">posting</a>"#, href))
            .collect();
        format!(
            r#"<html><body><div id="searchCount">{}</div>{}</body></html>"#,
            summary, anchors
        )
    }

    #[test]
    fn seed_page_yields_links_and_page_offsets() {
        let spider = spider();
        let body = search_page("Jobs 1 to 10 of 45 results", &["/rc/clk?jk=a", "/rc/clk?jk=b"]);
        let urls = spider.parse_search_page(&spider.seed_url, &body).unwrap();

        assert_eq!(urls[0], "/rc/clk?jk=a");
        assert_eq!(urls[1], "/rc/clk?jk=b");
        let pages: Vec<&String> = urls[2..].iter().collect();
        assert_eq!(pages.len(), 4);
        assert_eq!(*pages[0], format!("{}&start=10", spider.seed_url));
        assert_eq!(*pages[3], format!("{}&start=40", spider.seed_url));
    }

    #[test]
    fn later_pages_yield_links_only() {
        let spider = spider();
        let body = search_page("Jobs 11 to 20 of 45 results", &["/rc/clk?jk=c"]);
        let page_url = format!("{}&start=10", spider.seed_url);
        let urls = spider.parse_search_page(&page_url, &body).unwrap();
        assert_eq!(urls, vec!["/rc/clk?jk=c".to_owned()]);
    }

    #[test]
    fn missing_results_summary_is_fatal() {
        let spider = spider();
        let body = r#"<html><body><p>no summary here</p></body></html>"#;
        let err = spider.parse_search_page(&spider.seed_url, body).unwrap_err();
        assert!(matches!(err, CrawlError::MissingResultsSummary));
    }

    #[test]
    fn zero_results_is_fatal() {
        let spider = spider();
        let body = search_page("Jobs 0 to 0 of 0 results", &[]);
        let err = spider.parse_search_page(&spider.seed_url, &body).unwrap_err();
        assert!(matches!(err, CrawlError::NoResults));
    }

    #[test]
    fn pagination_urls_route_back_to_search_handling() {
        let spider = spider();
        assert!(spider.is_search_page(&spider.seed_url));
        assert!(spider.is_search_page(&format!("{}&start=990", spider.seed_url)));
        assert!(!spider.is_search_page("https://www.indeed.com/rc/clk?jk=a"));
    }
}
