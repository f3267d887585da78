//! Field schema for a job posting page and the extractor that applies
//! it. Each field carries one locator per observed generation of the
//! site's markup; the locator engine falls through to the next
//! generation when the first yields nothing.

use chrono::Utc;
use scraper::Html;

use crate::locator::{self, Locator};
use crate::record::JobPosting;

const TITLE: &[Locator] = &[
    Locator::first(".jobtitle"),
    Locator::first(r#"[class*="JobInfoHeader-title"]"#),
];

const COMPANY: &[Locator] = &[
    Locator::first(".company"),
    Locator::first(r#"[class*="InlineCompanyRating"] > div:nth-child(1)"#),
];

const LOCATION: &[Locator] = &[
    Locator::first(".location"),
    Locator::first(r#"[class*="InlineCompanyRating"] > div:nth-child(4)"#),
];

const DATE: &[Locator] = &[Locator::first(".date")];

const PAY: &[Locator] = &[Locator::first(
    r#"div[data-tn-component="jobHeader"] > div > span.no-wrap"#,
)];

const DESCRIPTION: &[Locator] = &[
    Locator::join(".summary"),
    Locator::join(r#"[class*="JobComponent-description"]"#),
];

/// Marker for the inline-apply widget. Presence alone sets the flag.
const EASY_APPLY: &str = r#"[class*="indeed-apply-button"]"#;

/// Build one posting record from a fetched posting page.
///
/// Pure over page content and wall-clock time: missing fields become
/// empty strings, never errors, and the record is complete even when
/// most locators found nothing.
pub fn parse_posting(document: &Html, source: &str) -> JobPosting {
    JobPosting {
        title: locator::resolve(document, TITLE),
        company: locator::resolve(document, COMPANY),
        location: locator::resolve(document, LOCATION),
        date: locator::resolve(document, DATE),
        pay: locator::resolve(document, PAY),
        description: locator::resolve(document, DESCRIPTION),
        easy_apply: locator::matches_any(document, EASY_APPLY),
        last_crawl_date: Utc::now(),
        source: source.to_owned(),
    }
}
