//! Drives the spider's page handlers over static fixtures, from the
//! seed search page down to persisted records.

use std::sync::Arc;

use jobharvest::store::{self, MemoryStore};
use jobharvest::{IndeedSpider, SearchConfig};

fn search_config() -> SearchConfig {
    SearchConfig {
        query: "Engineer".to_owned(),
        location: "Seattle".to_owned(),
        domain: ".com".to_owned(),
        index: "jobs".to_owned(),
    }
}

const SEED_PAGE: &str = r#"
    <html><body>
      <div id="searchCount"> Jobs 1 to 10 of 45 results </div>
      <a data-tn-element="jobTitle" href="/rc/clk?jk=alpha">Data Engineer</a>
      <a data-tn-element="jobTitle" href="/rc/clk?jk=beta">Platform Engineer</a>
    </body></html>
"#;

const POSTING_PAGE: &str = r#"
    <html><body>
      <h1 class="jobtitle">Data Engineer</h1>
      <div class="company">Acme Corp</div>
      <div class="location">Seattle, WA</div>
      <div class="date">Just posted</div>
      <div class="summary"><p>Pipelines.</p><p>Warehouses.</p></div>
      <a class="indeed-apply-button">Apply now</a>
    </body></html>
"#;

#[tokio::test]
async fn seed_page_fans_out_into_stored_records() {
    let store = Arc::new(MemoryStore::new());
    let spider = IndeedSpider::new(search_config(), store.clone());
    let seed_url = search_config().seed_url();

    // Seed page: two posting links plus four more result pages
    // (offsets 10..40 for 45 results).
    let urls = spider.parse_search_page(&seed_url, SEED_PAGE).unwrap();
    assert_eq!(urls.len(), 6);
    assert!(urls[2..]
        .iter()
        .all(|u| u.starts_with(&seed_url) && u.contains("&start=")));

    // Each posting page produces one record, persisted under its
    // identity key.
    let posting_url = "https://www.indeed.com/rc/clk?jk=alpha";
    let record = spider.extract_posting(posting_url, POSTING_PAGE);
    assert_eq!(record.source, posting_url);
    assert_eq!(record.identity_key(), "Acme Corp-Data Engineer");
    assert!(record.easy_apply);

    assert!(store::persist_new(store.as_ref(), "jobs", &record)
        .await
        .unwrap());

    // A duplicate link crawled later in the session hits the gate and
    // leaves the stored document untouched.
    let recrawl = spider.extract_posting(posting_url, POSTING_PAGE);
    assert!(!store::persist_new(store.as_ref(), "jobs", &recrawl)
        .await
        .unwrap());

    assert_eq!(store.len(), 1);
    let doc = store.get("jobs", "Acme Corp-Data Engineer").unwrap();
    assert_eq!(doc["Title"], "Data Engineer");
    assert_eq!(doc["Source"], posting_url);
    assert_eq!(doc["LastCrawlDate"], serde_json::to_value(&record.last_crawl_date).unwrap());
}

#[test]
fn sparse_posting_page_still_produces_a_record() {
    let store = Arc::new(MemoryStore::new());
    let spider = IndeedSpider::new(search_config(), store);

    let body = "<html><body><p>page moved</p></body></html>";
    let record = spider.extract_posting("https://www.indeed.com/rc/clk?jk=gone", body);

    assert_eq!(record.title, "");
    assert_eq!(record.company, "");
    assert!(!record.easy_apply);
    assert_eq!(record.source, "https://www.indeed.com/rc/clk?jk=gone");
}
