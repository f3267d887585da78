/// Engine tuning knobs.
pub struct Config {
    /// Bot name / user agent, matched against robots.txt rules.
    pub bot_name: String,
    /// The maximum number of concurrent requests performed by the
    /// engine's fetchers.
    pub concurrent_requests: u32,
    /// The amount of time (in secs) each fetcher waits between
    /// consecutive downloads.
    pub download_delay: f32,
    /// If enabled, the engine will respect robots.txt policies.
    pub robotstxt_obey: bool,
}

impl Config {
    pub fn sanity_check(&self) {
        if self.concurrent_requests == 0 {
            panic!("config.concurrent_requests cannot be zero");
        }
        if self.download_delay < 0.0 {
            panic!("config.download_delay must be positive");
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_name: "jobharvestbot".to_owned(),
            concurrent_requests: 16,
            download_delay: 2.0,
            robotstxt_obey: true,
        }
    }
}

/// One crawl session's worth of search parameters.
///
/// Supplied whole by the caller at construction time; the core never
/// prompts for or validates missing values.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search query, e.g. "Engineer".
    pub query: String,
    /// Search location, e.g. "Seattle".
    pub location: String,
    /// Site domain suffix, e.g. ".com" or ".co.uk".
    pub domain: String,
    /// Store index the session's records are written to.
    pub index: String,
}

impl SearchConfig {
    /// Seed search url: the site's jobs endpoint for the configured
    /// domain with `q` and `l` query-string encoded.
    pub fn seed_url(&self) -> String {
        let mut url = reqwest::Url::parse(&format!("https://www.indeed{}/jobs", self.domain))
            .expect("search domain must form a valid url");
        url.query_pairs_mut()
            .append_pair("q", &self.query)
            .append_pair("l", &self.location);
        url.to_string()
    }
}
