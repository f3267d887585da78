use std::collections::{HashMap, HashSet, VecDeque};

use super::{Scheduler, SchedulerItem};

/// In-memory priority-queue based scheduler.
///
/// Schedules higher priority items first. All state is session-scoped:
/// a crawl session runs once to exhaustion, so visited urls are kept
/// in memory and forgotten when the session ends.
//
// Since the scheduler only hands out the next url to crawl, it's okay
// to protect it with a single mutex at the engine level.
pub struct MempqScheduler {
    current_priority: HashMap<String, u8>,

    queues: HashMap<String, HashMap<u8, VecDeque<SchedulerItem>>>,
    // Number of items enqueued
    num_items: usize,

    added_urls: HashSet<String>,
    visited_urls: HashSet<String>,
}

impl MempqScheduler {
    pub fn new() -> Self {
        Self {
            current_priority: HashMap::new(),
            queues: HashMap::new(),
            num_items: 0,
            added_urls: HashSet::new(),
            visited_urls: HashSet::new(),
        }
    }
}

impl Default for MempqScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for MempqScheduler {
    fn next_item(&mut self, spider_name: &str) -> Option<SchedulerItem> {
        let queues = self.queues.entry(spider_name.to_owned()).or_default();
        let current_priority = self
            .current_priority
            .entry(spider_name.to_owned())
            .or_insert(0);

        // Drop down to the highest priority with items left.
        while *current_priority > 0
            && queues.get(current_priority).map_or(true, |q| q.is_empty())
        {
            *current_priority -= 1;
        }

        let item = queues.get_mut(current_priority).and_then(|q| q.pop_front());
        if item.is_some() {
            self.num_items -= 1;
        }
        item
    }

    fn enqueue_item(&mut self, spider_name: &str, item: SchedulerItem) -> bool {
        let seen = self.visited_urls.contains(&item.url) || self.added_urls.contains(&item.url);
        if seen && !item.force {
            return false;
        }

        let current_priority = self
            .current_priority
            .entry(spider_name.to_owned())
            .or_insert(0);
        if item.priority > *current_priority {
            *current_priority = item.priority;
        }

        self.added_urls.insert(item.url.clone());
        self.queues
            .entry(spider_name.to_owned())
            .or_default()
            .entry(item.priority)
            .or_default()
            .push_back(item);
        self.num_items += 1;
        true
    }

    fn mark_visited(&mut self, url: &str) {
        self.added_urls.remove(url);
        self.visited_urls.insert(url.to_owned());
    }

    fn size(&self) -> usize {
        self.num_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::DEFAULT_PRIORITY;

    fn item(url: &str, priority: u8, force: bool) -> SchedulerItem {
        SchedulerItem {
            spider_name: "indeed".to_owned(),
            url: url.to_owned(),
            priority,
            force,
        }
    }

    #[test]
    fn duplicate_urls_are_enqueued_once() {
        let mut sched = MempqScheduler::new();
        assert!(sched.enqueue_item("indeed", item("https://a/1", DEFAULT_PRIORITY, false)));
        assert!(!sched.enqueue_item("indeed", item("https://a/1", DEFAULT_PRIORITY, false)));
        assert_eq!(sched.size(), 1);
    }

    #[test]
    fn visited_urls_are_not_readded_unless_forced() {
        let mut sched = MempqScheduler::new();
        sched.enqueue_item("indeed", item("https://a/1", DEFAULT_PRIORITY, false));
        sched.next_item("indeed").unwrap();
        sched.mark_visited("https://a/1");

        assert!(!sched.enqueue_item("indeed", item("https://a/1", DEFAULT_PRIORITY, false)));
        assert!(sched.enqueue_item("indeed", item("https://a/1", DEFAULT_PRIORITY, true)));
    }

    #[test]
    fn higher_priority_items_come_out_first() {
        let mut sched = MempqScheduler::new();
        sched.enqueue_item("indeed", item("https://a/low", 1, false));
        sched.enqueue_item("indeed", item("https://a/high", 5, false));
        assert_eq!(sched.next_item("indeed").unwrap().url, "https://a/high");
        assert_eq!(sched.next_item("indeed").unwrap().url, "https://a/low");
        assert!(sched.next_item("indeed").is_none());
    }
}
