use reqwest::Url;

/// Join base url with another (possibly relative) url.
pub fn join_url(base_url: &str, url: &str) -> Option<Url> {
    Url::parse(base_url).ok()?.join(url).ok()
}

pub fn get_host(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_owned)
}

/// The robots.txt url for the site serving `url`.
pub fn robots_url(url: &str) -> Option<String> {
    let mut url = Url::parse(url).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_links_against_the_page_url() {
        let url = join_url("https://www.indeed.com/jobs?q=x", "/rc/clk?jk=a").unwrap();
        assert_eq!(url.as_str(), "https://www.indeed.com/rc/clk?jk=a");
    }

    #[test]
    fn robots_url_strips_path_and_query() {
        let url = robots_url("https://www.indeed.com/jobs?q=x&start=10").unwrap();
        assert_eq!(url, "https://www.indeed.com/robots.txt");
    }
}
