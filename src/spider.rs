use async_trait::async_trait;

use crate::error::CrawlError;
use crate::Response;

/// Spider interface
#[async_trait]
pub trait Spider {
    /// Get spider name.
    ///
    /// This is used to route responses to the correct spider so make
    /// sure that it's unique for each spider.
    fn name(&self) -> String;

    /// Returns a list of starting urls.
    fn start_urls(&self) -> Vec<String>;

    /// Parse a fetched response.
    ///
    /// Returns (num_records, urls):
    ///     num_records - the number of records extracted from the page
    ///     urls - candidate urls to crawl, possibly relative to the
    ///            page's own url
    ///
    /// An `Err` is fatal for the whole session: the engine stops the
    /// crawl and surfaces the error to the caller. Per-page conditions
    /// that only affect one record (missing fields, empty locator
    /// matches) must not be reported through this channel.
    async fn parse(&self, response: Response) -> Result<(u64, Vec<String>), CrawlError>;
}
