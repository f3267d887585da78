use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped job posting.
///
/// Field names are serialized in PascalCase since that is the document
/// shape the store indexes by. Every text field defaults to an empty
/// string when no locator matched; `last_crawl_date` and `source` are
/// always populated by the extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Posting date as displayed on the page, unparsed.
    pub date: String,
    pub pay: String,
    /// Multi-line concatenation of description fragments.
    pub description: String,
    pub easy_apply: bool,
    pub last_crawl_date: DateTime<Utc>,
    /// Url of the fetched posting page.
    pub source: String,
}

impl JobPosting {
    /// Key the posting is stored and deduplicated under.
    ///
    /// Not guaranteed unique: two postings with the same title at the
    /// same company collide, and the later one is dropped by the
    /// persistence gate.
    pub fn identity_key(&self) -> String {
        format!("{}-{}", self.company, self.title)
    }
}
