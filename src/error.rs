use thiserror::Error;

use crate::store::StoreError;

/// Session-fatal crawl failures.
///
/// Missing field values are not errors; a posting page that matches no
/// locator still produces a (mostly empty) record. These variants cover
/// the cases where the session cannot meaningfully continue: pagination
/// cannot be computed, or the store rejected a check/write.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The search page carried no results-summary node, so the total
    /// count and page offsets cannot be derived.
    #[error("search page has no results summary")]
    MissingResultsSummary,

    /// A results summary was found but no result count could be read
    /// out of it.
    #[error("no result count in results summary {0:?}")]
    UnparsableResultCount(String),

    /// The search matched zero results. Surfaced rather than silently
    /// crawling zero pages.
    #[error("search matched zero results")]
    NoResults,

    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
