use scraper::{Html, Selector};

/// How a locator turns its selector matches into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Take the first non-empty text node of the first match.
    First,
    /// Concatenate every matched text node with newline separators.
    Join,
}

/// A declarative extraction rule: one CSS selector plus the mode used
/// to collapse its matches into a string.
///
/// Fields are located by an ordered candidate list of these, one entry
/// per site-markup generation. Evaluation short-circuits on the first
/// candidate that yields a non-empty value.
#[derive(Debug, Clone, Copy)]
pub struct Locator {
    pub selector: &'static str,
    pub mode: Mode,
}

impl Locator {
    pub const fn first(selector: &'static str) -> Self {
        Self { selector, mode: Mode::First }
    }

    pub const fn join(selector: &'static str) -> Self {
        Self { selector, mode: Mode::Join }
    }
}

/// Resolve a field value from `document` against an ordered candidate
/// list.
///
/// Zero matches is not an error: if no candidate yields anything the
/// result is an empty string and the caller stores it as-is.
pub fn resolve(document: &Html, candidates: &[Locator]) -> String {
    for locator in candidates {
        let selector = match Selector::parse(locator.selector) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("skipping malformed selector {:?}: {}", locator.selector, e);
                continue;
            }
        };
        let value = match locator.mode {
            Mode::First => document
                .select(&selector)
                .flat_map(|el| el.text())
                .map(str::trim)
                .find(|t| !t.is_empty())
                .map(str::to_owned)
                .unwrap_or_default(),
            Mode::Join => {
                let fragments: Vec<&str> =
                    document.select(&selector).flat_map(|el| el.text()).collect();
                fragments.join("\n")
            }
        };
        if !value.is_empty() {
            return value;
        }
    }
    String::new()
}

/// True iff at least one node matches `selector`.
pub fn matches_any(document: &Html, selector: &'static str) -> bool {
    match Selector::parse(selector) {
        Ok(s) => document.select(&s).next().is_some(),
        Err(e) => {
            log::warn!("skipping malformed selector {:?}: {}", selector, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn no_matching_candidate_yields_empty_string() {
        let document = doc("<p class='other'>hi</p>");
        let candidates = [Locator::first(".title"), Locator::join(".headline")];
        assert_eq!(resolve(&document, &candidates), "");
    }

    #[test]
    fn first_mode_takes_first_non_empty_text_node() {
        let document = doc("<div class='title'>  <span>Engineer</span> extra</div>");
        assert_eq!(resolve(&document, &[Locator::first(".title")]), "Engineer");
    }

    #[test]
    fn join_mode_concatenates_all_fragments() {
        let document = doc("<p class='sum'>line one</p><p class='sum'>line two</p>");
        assert_eq!(
            resolve(&document, &[Locator::join(".sum")]),
            "line one\nline two"
        );
    }

    #[test]
    fn earlier_candidate_short_circuits_later_ones() {
        let document = doc("<p class='old'>old markup</p><p class='new'>new markup</p>");
        let candidates = [Locator::first(".old"), Locator::first(".new")];
        assert_eq!(resolve(&document, &candidates), "old markup");
    }

    #[test]
    fn falls_back_when_earlier_candidate_is_absent() {
        let document = doc("<p class='new'>new markup</p>");
        let candidates = [Locator::first(".old"), Locator::first(".new")];
        assert_eq!(resolve(&document, &candidates), "new markup");
    }

    #[test]
    fn presence_test() {
        let document = doc("<a class='apply-now'>apply</a>");
        assert!(matches_any(&document, ".apply-now"));
        assert!(!matches_any(&document, ".missing"));
    }
}
