mod config;
mod engine;
mod error;
mod fetcher;
mod indeed;
mod record;
mod spider;
mod stats;

pub mod extract;
pub mod locator;
pub mod pagination;
pub mod scheduler;
pub mod store;
pub mod util;

// (Re) Exports
pub use config::{Config, SearchConfig};
pub use engine::Engine;
pub use error::CrawlError;
pub use indeed::IndeedSpider;
pub use record::JobPosting;
pub use scheduler::{Scheduler, SchedulerItem};
pub use spider::Spider;

pub type Response = ureq::Response;

use scheduler::mempq::MempqScheduler;

pub fn engine(
    spiders: Vec<Box<dyn Spider + Send + Sync>>,
) -> Engine<MempqScheduler> {
    Engine::new(Config::default(), MempqScheduler::new(), spiders)
}

pub fn engine_with_config(
    config: Config,
    spiders: Vec<Box<dyn Spider + Send + Sync>>,
) -> Engine<MempqScheduler> {
    Engine::new(config, MempqScheduler::new(), spiders)
}
