//! Result-count parsing and page-offset computation for a paginated
//! search. The site serves ten results per page and never serves more
//! than a hundred pages, whatever the reported total.

use crate::error::CrawlError;

pub const PAGE_SIZE: u64 = 10;
pub const MAX_PAGES: u64 = 100;

/// Parse the total result count out of a results-summary string such
/// as `"Jobs 1 to 10 of 237 results"`.
///
/// Takes the substring after the last "of" and keeps only its digits.
/// A summary with no digits there is fatal for the session; there is
/// no fallback count. Counts with thousands separators are parsed by
/// digit concatenation ("1,234" reads as 1234), no locale handling.
pub fn parse_total_results(summary: &str) -> Result<u64, CrawlError> {
    let tail = summary.rsplit("of").next().unwrap_or(summary);
    let digits: String = tail.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(CrawlError::UnparsableResultCount(summary.to_owned()));
    }
    digits
        .parse()
        .map_err(|_| CrawlError::UnparsableResultCount(summary.to_owned()))
}

/// Offsets of every result page after the first: multiples of the page
/// size up to the total, capped at [`MAX_PAGES`] pages overall.
pub fn page_offsets(total_results: u64) -> Vec<u64> {
    (1..MAX_PAGES)
        .map(|k| k * PAGE_SIZE)
        .take_while(|&offset| offset <= total_results)
        .collect()
}
