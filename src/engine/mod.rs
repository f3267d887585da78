use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

mod robots;
mod worker;
mod worker_state;

use crate::config::Config;
use crate::error::CrawlError;
use crate::fetcher::Fetcher;
use crate::scheduler::{Scheduler, SchedulerItem, DEFAULT_PRIORITY};
use crate::spider::Spider;
use crate::stats::Stats;
use crate::util;

use robots::RobotsGate;
use worker_state::WorkerState;

struct EngineState<Sched>
where
    Sched: Scheduler + Send,
{
    config: Arc<Config>,
    scheduler: Arc<Mutex<Sched>>,
    spiders: HashMap<String, Box<dyn Spider + Send + Sync>>,
    robots: RobotsGate,
    workers: WorkerState,
    stats: Stats,

    // First fatal spider error of the session; returned by start().
    failure: Mutex<Option<CrawlError>>,
}

impl<Sched> EngineState<Sched>
where
    Sched: Scheduler + Send,
{
    fn new(
        config: Config,
        scheduler: Sched,
        spiders: Vec<Box<dyn Spider + Send + Sync>>,
    ) -> Self {
        let config = Arc::new(config);
        let mut spiders_ = HashMap::new();
        for spider in spiders {
            let name = spider.name();
            spiders_.insert(name, spider);
        }
        Self {
            config: config.clone(),
            scheduler: Arc::new(Mutex::new(scheduler)),
            spiders: spiders_,
            robots: RobotsGate::new(config.clone()),
            workers: WorkerState::new(config.concurrent_requests as usize),
            stats: Stats::new(),
            failure: Mutex::new(None),
        }
    }

    fn record_failure(&self, err: CrawlError) {
        let mut slot = self.failure.lock().unwrap();
        if slot.is_none() {
            *slot = Some(err);
        }
    }
}

// Note that since `config` and `spiders` are read-only after
// initialization, they don't need to be protected by a mutex.
pub struct Engine<Sched>
where
    Sched: Scheduler + Send,
{
    state: Arc<EngineState<Sched>>,
}

impl<Sched> Engine<Sched>
where
    Sched: 'static + Scheduler + Send,
{
    pub fn new(
        config: Config,
        scheduler: Sched,
        spiders: Vec<Box<dyn Spider + Send + Sync>>,
    ) -> Self {
        let state = EngineState::new(config, scheduler, spiders);
        Self { state: Arc::new(state) }
    }

    /// Run the session to exhaustion of its task set.
    ///
    /// Returns the first fatal spider error, if any. Records persisted
    /// before a failure or an interrupt stay in the store.
    pub async fn start(&mut self) -> Result<(), CrawlError> {
        let config = &self.state.config;
        config.sanity_check();

        if self.state.spiders.is_empty() {
            panic!("No spiders set");
        }

        let (stop_tx, _) = broadcast::channel::<()>(32);
        let tx = stop_tx.clone();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })
        .expect("failed to install interrupt handler");

        // Put each spider's start urls onto the scheduler.
        {
            let mut scheduler = self.state.scheduler.lock().unwrap();
            for (name, spider) in self.state.spiders.iter() {
                for start_url in spider.start_urls() {
                    let item = SchedulerItem {
                        spider_name: name.clone(),
                        url: start_url,
                        priority: DEFAULT_PRIORITY,
                        force: true,
                    };
                    scheduler.enqueue_item(name, item);
                }
            }
        }

        let mut join_handles = vec![];
        join_handles.push(start_reporting_task(self.state.clone(), stop_tx.clone()));

        // One fetcher per worker; the download delay bounds each
        // worker's request rate.
        log::debug!("concurrent requests: {}", config.concurrent_requests);
        for i in 0..config.concurrent_requests {
            let mut fetcher = Fetcher::new(config.download_delay);
            join_handles.push(fetcher.start(stop_tx.clone()));
            let handle = worker::start_worker_task(
                i + 1,
                Arc::new(fetcher),
                self.state.clone(),
                stop_tx.clone(),
            );
            join_handles.push(handle);
        }

        for h in join_handles {
            h.await.unwrap();
        }

        let failure = self.state.failure.lock().unwrap().take();
        match failure {
            Some(err) => Err(err),
            None => {
                log::info!(
                    "session finished: {} pages crawled, {} records extracted",
                    self.state.stats.pages_crawled(),
                    self.state.stats.records_extracted(),
                );
                Ok(())
            }
        }
    }
}

fn start_reporting_task<Sched>(
    state: Arc<EngineState<Sched>>,
    stop_tx: broadcast::Sender<()>,
) -> JoinHandle<()>
where
    Sched: 'static + Scheduler + Send,
{
    let mut stop_rx = stop_tx.subscribe();
    tokio::spawn(async move {
        'run: loop {
            let sleep = tokio::time::sleep(std::time::Duration::from_secs(60));
            tokio::pin!(sleep);

            tokio::select! {
                res = stop_rx.recv() => {
                    if res.is_ok() {
                        break 'run;
                    }
                }
                _ = &mut sleep => {
                    log::info!(
                        "{} pages crawled at {} pages/minute, {} records extracted",
                        state.stats.pages_crawled(),
                        state.stats.pages_per_minute(),
                        state.stats.records_extracted(),
                    );
                }
            }
        }
    })
}

/// Resolve spider-returned urls against the fetched page's url, strip
/// fragments, and keep only http(s) targets.
fn normalize_urls(base_url: &str, urls: Vec<String>) -> Vec<String> {
    let mut res = vec![];
    for url in urls {
        match util::join_url(base_url, &url) {
            Some(mut absolute) => {
                absolute.set_fragment(None);
                if absolute.scheme() == "http" || absolute.scheme() == "https" {
                    res.push(absolute.to_string());
                }
            }
            None => log::warn!("unresolvable link {:?} on {}", url, base_url),
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::normalize_urls;

    #[test]
    fn resolves_relative_links_and_drops_non_http() {
        let urls = vec![
            "/rc/clk?jk=a".to_owned(),
            "https://other.example/x#frag".to_owned(),
            "mailto:jobs@example.com".to_owned(),
        ];
        let normalized = normalize_urls("https://www.indeed.com/jobs?q=x", urls);
        assert_eq!(
            normalized,
            vec![
                "https://www.indeed.com/rc/clk?jk=a".to_owned(),
                "https://other.example/x".to_owned(),
            ]
        );
    }
}
