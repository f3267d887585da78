use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

pub struct Stats {
    pages_crawled: AtomicU64,
    records_extracted: AtomicU64,
    start_time: Mutex<DateTime<Utc>>,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            pages_crawled: AtomicU64::new(0),
            records_extracted: AtomicU64::new(0),
            start_time: Mutex::new(Utc::now()),
        }
    }

    pub fn incr_pages_crawled(&self) {
        self.pages_crawled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records_extracted(&self, value: u64) {
        self.records_extracted.fetch_add(value, Ordering::Relaxed);
    }

    pub fn pages_crawled(&self) -> u64 {
        self.pages_crawled.load(Ordering::Relaxed)
    }

    pub fn records_extracted(&self) -> u64 {
        self.records_extracted.load(Ordering::Relaxed)
    }

    pub fn pages_per_minute(&self) -> u64 {
        let minutes = (self.elapsed_secs() / 60) as u64;
        if minutes > 0 {
            self.pages_crawled() / minutes
        } else {
            0
        }
    }

    /// Elapsed session time in seconds.
    pub fn elapsed_secs(&self) -> i64 {
        let start_time = self.start_time.lock().unwrap();
        (Utc::now() - *start_time).num_seconds()
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}
