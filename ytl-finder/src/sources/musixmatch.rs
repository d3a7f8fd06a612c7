//! Musixmatch scraper
//!
//! Search: `<base>/search/<space-joined tokens, percent-encoded>`.
//! The best match is the first link after the results box; lyrics are the
//! first `span` inside the `mxm-lyrics` block of the main column.

use super::{non_empty_text, LyricsSite};
use crate::markup::{attr, find_by_class, find_next, text, Matcher};
use scraper::Html;
use url::Url;

pub const SOURCE_NAME: &str = "musixmatch";
pub const DEFAULT_BASE_URL: &str = "https://www.musixmatch.com";

const RESULTS_CLASS: &str = "box-content";
const LYRICS_COLUMN_CLASS: &str = "col-sm-10 col-md-8 col-ml-6 col-lg-6";
const LYRICS_CLASS: &str = "mxm-lyrics";

pub struct Musixmatch {
    base_url: Url,
}

impl Musixmatch {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }
}

impl LyricsSite for Musixmatch {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn search_url(&self, query: &[String]) -> Option<Url> {
        let joined = query.join(" ");
        if joined.trim().is_empty() {
            return None;
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("search")
            .push(&joined);
        Some(url)
    }

    fn best_match(&self, search_page: &str) -> Option<Url> {
        let document = Html::parse_document(search_page);
        let results = find_by_class(&document, RESULTS_CLASS)?;
        let link = find_next(&document, results, Matcher::Tag("a"))?;
        let href = attr(link, "href")?;
        self.base_url.join(href).ok()
    }

    fn lyrics(&self, lyrics_page: &str) -> Option<String> {
        let document = Html::parse_document(lyrics_page);
        let column = find_by_class(&document, LYRICS_COLUMN_CLASS)?;
        let block = find_next(&document, column, Matcher::Class(LYRICS_CLASS))?;
        let span = find_next(&document, block, Matcher::Tag("span"))?;
        non_empty_text(text(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> Musixmatch {
        Musixmatch::new(Url::parse(DEFAULT_BASE_URL).unwrap())
    }

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <a href="/login">Log in</a>
          <div class="box box-style-plain"><div class="box-content">
            <ul class="tracks"><li>
              <a class="title" href="/lyrics/Queen/Bohemian-Rhapsody">Bohemian Rhapsody</a>
            </li><li>
              <a class="title" href="/lyrics/Queen/Bohemian-Rhapsody-Live">Bohemian Rhapsody - Live</a>
            </li></ul>
          </div></div>
        </body></html>
    "#;

    const LYRICS_PAGE: &str = r#"
        <html><body>
          <span>Header</span>
          <div class="col-sm-10 col-md-8 col-ml-6 col-lg-6">
            <div class="mxm-lyrics">
              <h2>Lyrics</h2>
              <span class="lyrics__content__ok">
Is this the real life?
Is this just fantasy?
              </span>
            </div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_search_url_percent_encodes() {
        let tokens = vec!["Queen".to_string(), "Bohemian".to_string(), "Rhapsody".to_string()];
        assert_eq!(
            site().search_url(&tokens).unwrap().as_str(),
            "https://www.musixmatch.com/search/Queen%20Bohemian%20Rhapsody"
        );
    }

    #[test]
    fn test_search_url_empty_query() {
        assert!(site().search_url(&[]).is_none());
    }

    #[test]
    fn test_best_match_is_first_link_after_results() {
        assert_eq!(
            site().best_match(SEARCH_PAGE).unwrap().as_str(),
            "https://www.musixmatch.com/lyrics/Queen/Bohemian-Rhapsody"
        );
    }

    #[test]
    fn test_best_match_without_results_box() {
        assert!(site().best_match("<html><a href='/x'>x</a></html>").is_none());
    }

    #[test]
    fn test_lyrics_extracted() {
        assert_eq!(
            site().lyrics(LYRICS_PAGE).unwrap(),
            "Is this the real life?\nIs this just fantasy?"
        );
    }

    #[test]
    fn test_lyrics_missing_column() {
        let page = r#"<div class="mxm-lyrics"><span>orphan</span></div>"#;
        assert!(site().lyrics(page).is_none());
    }
}
