use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("fetcher stopped")]
    Stopped,
}

struct FetchJob {
    url: String,
    reply: mpsc::Sender<Result<ureq::Response, FetchError>>,
}

/// Serializes downloads through a single task that enforces the
/// configured delay between consecutive fetches. Each engine worker
/// owns one fetcher, so the delay bounds per-worker request rate while
/// workers stay concurrent with each other.
pub struct Fetcher {
    download_delay: f32,
    job_tx: Option<mpsc::Sender<FetchJob>>,
}

impl Fetcher {
    pub fn new(download_delay: f32) -> Self {
        Self {
            download_delay,
            job_tx: None,
        }
    }

    pub fn start(&mut self, stop_tx: broadcast::Sender<()>) -> JoinHandle<()> {
        let (job_tx, job_rx) = mpsc::channel::<FetchJob>(32);
        self.job_tx = Some(job_tx);
        start_fetch_task(self.download_delay, job_rx, stop_tx)
    }

    // Thread-safe: sends the job over a channel and waits on a private
    // reply channel.
    pub async fn get(&self, url: &str) -> Result<ureq::Response, FetchError> {
        let job_tx = self.job_tx.clone().expect("fetcher not started");
        let (reply_tx, mut reply_rx) = mpsc::channel(1);
        let job = FetchJob {
            url: url.to_owned(),
            reply: reply_tx,
        };
        if job_tx.send(job).await.is_err() {
            return Err(FetchError::Stopped);
        }
        match reply_rx.recv().await {
            Some(result) => result,
            None => Err(FetchError::Stopped),
        }
    }
}

fn start_fetch_task(
    download_delay: f32,
    mut job_rx: mpsc::Receiver<FetchJob>,
    stop_tx: broadcast::Sender<()>,
) -> JoinHandle<()> {
    let mut stop_rx = stop_tx.subscribe();
    tokio::spawn(async move {
        let delay = Duration::from_millis((download_delay * 1000.0) as u64);
        let mut last_fetch: Option<Instant> = None;

        loop {
            tokio::select! {
                res = stop_rx.recv() => {
                    if res.is_ok() {
                        break;
                    }
                }
                job = job_rx.recv() => {
                    let Some(job) = job else { break };

                    if let Some(at) = last_fetch {
                        let elapsed = at.elapsed();
                        if elapsed < delay {
                            tokio::time::sleep(delay - elapsed).await;
                        }
                    }
                    last_fetch = Some(Instant::now());

                    let result = ureq::get(&job.url).call().map_err(|e| {
                        log::error!("fetch {}: {}", job.url, e);
                        FetchError::from(e)
                    });
                    // Receiver may be gone if the worker was stopped.
                    let _ = job.reply.send(result).await;
                }
            }
        }
    })
}
