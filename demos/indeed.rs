use std::sync::Arc;

use jobharvest::store::MemoryStore;
use jobharvest::{Config, IndeedSpider, SearchConfig, Spider};

#[tokio::main]
async fn main() {
    env_logger::init();

    let store = Arc::new(MemoryStore::new());
    let search = SearchConfig {
        query: "Engineer".to_owned(),
        location: "Seattle".to_owned(),
        domain: ".com".to_owned(),
        index: "jobs".to_owned(),
    };
    let spider = IndeedSpider::new(search, store.clone());
    let spiders: Vec<Box<dyn Spider + Send + Sync>> = vec![Box::new(spider)];

    let config = Config {
        concurrent_requests: 8,
        ..Config::default()
    };
    let mut engine = jobharvest::engine_with_config(config, spiders);
    if let Err(e) = engine.start().await {
        eprintln!("crawl failed: {}", e);
        std::process::exit(1);
    }

    println!("stored {} job postings", store.len());
}
