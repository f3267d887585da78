pub mod mempq;

pub const DEFAULT_PRIORITY: u8 = 10;

pub struct SchedulerItem {
    pub spider_name: String,
    pub url: String,
    pub priority: u8,

    // This flag tells the scheduler to whitelist the url, for example
    // when seeding starting urls. If this flag is not set, a url that
    // was already added or visited is ignored by the scheduler.
    pub force: bool,
}

pub trait Scheduler {
    fn next_item(&mut self, spider_name: &str) -> Option<SchedulerItem>;

    /// Enqueue item to be scheduled later.
    ///
    /// Returns whether the item is enqueued.
    fn enqueue_item(&mut self, spider_name: &str, item: SchedulerItem) -> bool;

    fn mark_visited(&mut self, url: &str);

    /// Returns the number of items enqueued in the scheduler.
    fn size(&self) -> usize;
}
