use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::fetcher::Fetcher;
use crate::scheduler::{Scheduler, SchedulerItem};

use super::{normalize_urls, EngineState};

/// One worker: pull the next scheduled url, fetch it, route the
/// response to its spider, and enqueue whatever urls the spider
/// returned. Workers stop the session when all of them go idle.
pub(super) fn start_worker_task<Sched>(
    worker_id: u32,
    fetcher: Arc<Fetcher>,
    state: Arc<EngineState<Sched>>,
    stop_tx: broadcast::Sender<()>,
) -> JoinHandle<()>
where
    Sched: 'static + Scheduler + Send,
{
    log::debug!("[worker-{}] start", worker_id);
    let mut stop_rx = stop_tx.subscribe();
    tokio::spawn(async move {
        'run: loop {
            if stop_rx.try_recv().is_ok() {
                break 'run;
            }

            // Pick a spider at random and take its next item. The rng
            // must not live across an await.
            let item = {
                let mut rng = rand::thread_rng();
                let spider_names: Vec<&String> = state.spiders.keys().collect();
                let chosen = *spider_names.choose(&mut rng).unwrap();
                let mut scheduler = state.scheduler.lock().unwrap();
                scheduler.next_item(chosen)
            };

            let Some(item) = item else {
                state.workers.set_idle(worker_id);
                if state.workers.all_idle() {
                    // Task set exhausted, session is done.
                    let _ = stop_tx.send(());
                    break 'run;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
                continue;
            };

            state.workers.set_busy(worker_id);
            log::info!("[worker-{}] {}", worker_id, item.url);

            // A failed fetch produces nothing to process and doesn't
            // disturb other in-flight fetches.
            let response = match fetcher.get(&item.url).await {
                Ok(response) => response,
                Err(e) => {
                    log::error!("[worker-{}] {}", worker_id, e);
                    continue;
                }
            };
            state.stats.incr_pages_crawled();

            let spider = state.spiders.get(&item.spider_name).unwrap();
            let base_url = response.get_url().to_owned();
            match spider.parse(response).await {
                Ok((num_records, urls)) => {
                    state.stats.add_records_extracted(num_records);
                    let urls = normalize_urls(&base_url, urls);

                    let mut scheduler = state.scheduler.lock().unwrap();
                    scheduler.mark_visited(&item.url);
                    for url in urls {
                        if !state.robots.allows(&url) {
                            continue;
                        }
                        let new_item = SchedulerItem {
                            spider_name: item.spider_name.clone(),
                            url,
                            priority: item.priority,
                            force: false,
                        };
                        scheduler.enqueue_item(&item.spider_name, new_item);
                    }
                }
                Err(e) => {
                    log::error!("[worker-{}] session failure: {}", worker_id, e);
                    state.record_failure(e);
                    let _ = stop_tx.send(());
                    break 'run;
                }
            }
        }
    })
}
