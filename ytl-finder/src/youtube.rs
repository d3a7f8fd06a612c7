//! YouTube link handling and watch-page document retrieval

use crate::document::{extract_script_assignment, parse_embedded_document, Document};
use crate::error::{LyricsError, LyricsResult};
use crate::fetcher::{fetch_body, Fetcher, RequestHeaders};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub const DEFAULT_WATCH_URL: &str = "https://www.youtube.com/watch";

/// Script variable holding the watch page's structured data
pub const INITIAL_DATA_VARIABLE: &str = "ytInitialData";

/// youtube.com/watch, youtu.be, /embed/ and /v/ links with an 11-character id
static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:m\.|www\.)?(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=))([\w-]{11})(?:\S+)?$",
    )
    .expect("YouTube link pattern is valid")
});

/// Video id of a YouTube link, if it is one
pub fn video_id(link: &str) -> Option<&str> {
    LINK_PATTERN
        .captures(link.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn validate_link(link: &str) -> bool {
    video_id(link).is_some()
}

/// Raw `ytInitialData` JSON text of a watch page
pub fn extract_initial_data(html: &str) -> Option<&str> {
    extract_script_assignment(html, INITIAL_DATA_VARIABLE)
}

/// Fetches watch pages and parses their embedded document
pub struct YouTubePage {
    fetcher: Arc<dyn Fetcher>,
    headers: RequestHeaders,
    watch_url: Url,
}

impl YouTubePage {
    pub fn new(fetcher: Arc<dyn Fetcher>, headers: RequestHeaders, watch_url: Url) -> Self {
        Self {
            fetcher,
            headers,
            watch_url,
        }
    }

    /// Canonical watch URL for a video id
    pub fn watch_url(&self, video_id: &str) -> Url {
        let mut url = self.watch_url.clone();
        url.query_pairs_mut().clear().append_pair("v", video_id);
        url
    }

    pub async fn fetch_document(&self, video_id: &str) -> LyricsResult<Document> {
        let url = self.watch_url(video_id);
        let unavailable = |reason: String| LyricsError::DocumentUnavailable {
            url: url.to_string(),
            reason,
        };

        let html = fetch_body(self.fetcher.as_ref(), &url, &self.headers)
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        let document = parse_embedded_document(&html, INITIAL_DATA_VARIABLE).map_err(|e| unavailable(e.to_string()))?;

        debug!(url = %url, "Parsed watch page document");
        Ok(document)
    }
}
