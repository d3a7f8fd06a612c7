//! Lyrics sources
//!
//! Every source implements [`SourceAdapter`]: take search tokens, return
//! lyrics with the page they came from, or say why not. A missing page
//! element is data ([`SourceError::NotFound`]), never a panic.
//!
//! Scraped sources share one request flow ([`ScrapingAdapter`]) and differ
//! only in their [`LyricsSite`] rules:
//! 1. Build a search URL from the tokens
//! 2. Fetch the results page
//! 3. Pick the best-match link from the results
//! 4. Fetch the lyrics page
//! 5. Pull the lyrics text out of it

pub mod azlyrics;
pub mod musixmatch;

use crate::fetcher::{fetch_body, Fetcher, RequestHeaders, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub use azlyrics::AzLyrics;
pub use musixmatch::Musixmatch;

/// Lyrics text plus the page it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsContent {
    pub text: String,
    pub provenance: Url,
}

/// Why a single source produced nothing
///
/// Misses at the results step and at the lyrics step are both `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("no lyrics found")]
    NotFound,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Outcome of one source invocation
pub type SourceResult = Result<LyricsContent, SourceError>;

/// A lyrics source
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Source identifier used in logs and failure reports
    fn name(&self) -> &str;

    /// Look up lyrics for the ordered search tokens
    async fn resolve(&self, query: &[String]) -> SourceResult;
}

/// Site-specific rules for a scraped source
///
/// All methods are synchronous so parsed HTML never lives across an await.
pub trait LyricsSite: Send + Sync {
    fn name(&self) -> &'static str;

    /// Search request for the tokens; `None` when no request can be built
    fn search_url(&self, query: &[String]) -> Option<Url>;

    /// Best-match lyrics page from a search results page
    fn best_match(&self, search_page: &str) -> Option<Url>;

    /// Lyrics text from a lyrics page
    fn lyrics(&self, lyrics_page: &str) -> Option<String>;
}

/// [`SourceAdapter`] that drives a [`LyricsSite`] over a [`Fetcher`]
pub struct ScrapingAdapter<S> {
    site: S,
    fetcher: Arc<dyn Fetcher>,
    headers: RequestHeaders,
}

impl<S: LyricsSite> ScrapingAdapter<S> {
    pub fn new(site: S, fetcher: Arc<dyn Fetcher>, headers: RequestHeaders) -> Self {
        Self { site, fetcher, headers }
    }
}

#[async_trait]
impl<S: LyricsSite> SourceAdapter for ScrapingAdapter<S> {
    fn name(&self) -> &str {
        self.site.name()
    }

    async fn resolve(&self, query: &[String]) -> SourceResult {
        let source = self.site.name();

        let Some(search_url) = self.site.search_url(query) else {
            debug!(source, "Empty search query");
            return Err(SourceError::NotFound);
        };
        let search_page = fetch_body(self.fetcher.as_ref(), &search_url, &self.headers).await?;

        let Some(lyrics_url) = self.site.best_match(&search_page) else {
            debug!(source, url = %search_url, "No best match in search results");
            return Err(SourceError::NotFound);
        };
        let lyrics_page = fetch_body(self.fetcher.as_ref(), &lyrics_url, &self.headers).await?;

        let Some(text) = self.site.lyrics(&lyrics_page) else {
            debug!(source, url = %lyrics_url, "No lyrics body on page");
            return Err(SourceError::NotFound);
        };

        Ok(LyricsContent {
            text,
            provenance: lyrics_url,
        })
    }
}

/// Configurable source identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Musixmatch,
    Azlyrics,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::Musixmatch, SourceKind::Azlyrics];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Musixmatch => musixmatch::SOURCE_NAME,
            SourceKind::Azlyrics => azlyrics::SOURCE_NAME,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = SourceKind::ALL.iter().map(SourceKind::as_str).collect();
                format!("unknown lyrics source '{}' (expected one of: {})", wanted, known.join(", "))
            })
    }
}

/// Adapter for a configured source, pointed at `endpoint`
pub fn build_source(
    kind: SourceKind,
    endpoint: Url,
    fetcher: Arc<dyn Fetcher>,
    headers: RequestHeaders,
) -> Arc<dyn SourceAdapter> {
    match kind {
        SourceKind::Musixmatch => Arc::new(ScrapingAdapter::new(Musixmatch::new(endpoint), fetcher, headers)),
        SourceKind::Azlyrics => Arc::new(ScrapingAdapter::new(AzLyrics::new(endpoint), fetcher, headers)),
    }
}

/// Trimmed text, or `None` if nothing is left
pub(crate) fn non_empty_text(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
