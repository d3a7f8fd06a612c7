//! AZLyrics scraper
//!
//! Search: `<search_url>?q=<tokens joined by '+'>`. The best match is the
//! first link after the results table; lyrics are the fifth `div` inside the
//! centered main column.

use super::{non_empty_text, LyricsSite};
use crate::markup::{attr, find_by_class, find_next, select_first, text, Matcher};
use scraper::Html;
use url::Url;

pub const SOURCE_NAME: &str = "azlyrics";
pub const DEFAULT_SEARCH_URL: &str = "https://search.azlyrics.com/search.php";

const RESULTS_CLASS: &str = "table table-condensed";
const LYRICS_COLUMN_CLASS: &str = "col-xs-12 col-lg-8 text-center";
const LYRICS_BODY_SELECTOR: &str = "div:nth-of-type(5)";

pub struct AzLyrics {
    search_url: Url,
}

impl AzLyrics {
    pub fn new(search_url: Url) -> Self {
        Self { search_url }
    }
}

impl LyricsSite for AzLyrics {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn search_url(&self, query: &[String]) -> Option<Url> {
        let joined = query.join(" ");
        if joined.trim().is_empty() {
            return None;
        }

        let mut url = self.search_url.clone();
        url.query_pairs_mut().clear().append_pair("q", &joined);
        Some(url)
    }

    fn best_match(&self, search_page: &str) -> Option<Url> {
        let document = Html::parse_document(search_page);
        let results = find_by_class(&document, RESULTS_CLASS)?;
        let link = find_next(&document, results, Matcher::Tag("a"))?;
        let href = attr(link, "href")?;
        self.search_url.join(href).ok()
    }

    fn lyrics(&self, lyrics_page: &str) -> Option<String> {
        let document = Html::parse_document(lyrics_page);
        let column = find_by_class(&document, LYRICS_COLUMN_CLASS)?;
        let body = select_first(column, LYRICS_BODY_SELECTOR)?;
        non_empty_text(text(body))
    }
}
