//! End-to-end lookup: link -> page document -> song/artist -> lyrics

use crate::config::{parse_url, FinderConfig};
use crate::error::{LyricsError, LyricsResult};
use crate::fallback::{FallbackResolver, ResolutionOutcome};
use crate::fetcher::{Fetcher, HttpFetcher, RequestHeaders};
use crate::identity::FieldResolver;
use crate::sources::build_source;
use crate::youtube::{self, YouTubePage};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use url::Url;

const BANNER_WIDTH: usize = 80;

/// Lyrics found for a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsReport {
    pub song: String,
    pub artist: String,
    pub lyrics: String,
    /// Page the lyrics were read from
    pub provenance: Url,
    /// Name of the source that answered
    pub source: String,
    pub retrieved_at: DateTime<Utc>,
}

impl fmt::Display for LyricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(" Song: {} by {} ", self.song, self.artist);
        writeln!(f, "{:=^width$}", title, width = BANNER_WIDTH)?;
        writeln!(f, "{}", self.provenance)?;
        writeln!(f)?;
        writeln!(f, "{}", self.lyrics)?;
        write!(f, "{}", "=".repeat(BANNER_WIDTH))
    }
}

/// Finds lyrics for YouTube music videos
pub struct LyricsFinder {
    youtube: YouTubePage,
    fields: FieldResolver,
    sources: FallbackResolver,
}

impl LyricsFinder {
    pub fn new(youtube: YouTubePage, fields: FieldResolver, sources: FallbackResolver) -> Self {
        Self {
            youtube,
            fields,
            sources,
        }
    }

    /// Build from configuration with a real HTTP client
    pub fn from_config(config: &FinderConfig) -> LyricsResult<Self> {
        let fetcher = HttpFetcher::new(config.http.timeout()).map_err(|e| LyricsError::Config(e.to_string()))?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Build from configuration over any fetcher
    pub fn with_fetcher(config: &FinderConfig, fetcher: Arc<dyn Fetcher>) -> LyricsResult<Self> {
        let youtube_headers = RequestHeaders::new()
            .with("User-Agent", config.http.youtube_user_agent.as_str())
            .with("Accept-Language", config.http.accept_language.as_str());
        let browser_headers = RequestHeaders::new()
            .with("User-Agent", config.http.browser_user_agent.as_str())
            .with("Accept-Language", config.http.accept_language.as_str());

        let watch_url = parse_url("youtube.watch_url", &config.youtube.watch_url)?;
        let youtube = YouTubePage::new(fetcher.clone(), youtube_headers, watch_url);

        let mut sources = Vec::with_capacity(config.sources.priority.len());
        for kind in &config.sources.priority {
            let endpoint = parse_url(kind.as_str(), config.sources.endpoint(*kind))?;
            sources.push(build_source(*kind, endpoint, fetcher.clone(), browser_headers.clone()));
        }

        let fields = FieldResolver::new(config.extraction.song.clone(), config.extraction.artist.clone());

        Ok(Self::new(youtube, fields, FallbackResolver::new(sources)))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.source_names()
    }

    /// Find lyrics for the song in a YouTube video
    ///
    /// `cancel` aborts the page fetch or the in-flight source attempt;
    /// later sources are not tried after cancellation.
    pub async fn find(&self, link: &str, cancel: &CancellationToken) -> LyricsResult<LyricsReport> {
        let video_id = youtube::video_id(link).ok_or_else(|| LyricsError::InvalidLink(link.to_string()))?;

        let document = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LyricsError::Cancelled),
            document = self.youtube.fetch_document(video_id) => document?,
        };

        let identity = self.fields.resolve(&document)?;
        drop(document);

        info!(
            video_id,
            song = identity.song(),
            artist = identity.artist(),
            "Identified song, searching lyrics"
        );

        match self
            .sources
            .resolve_with_cancellation(&identity.query_tokens(), cancel)
            .await
        {
            ResolutionOutcome::Resolved { content, source, .. } => Ok(LyricsReport {
                song: identity.song().to_string(),
                artist: identity.artist().to_string(),
                lyrics: content.text,
                provenance: content.provenance,
                source,
                retrieved_at: Utc::now(),
            }),
            ResolutionOutcome::Exhausted { failures } => Err(LyricsError::AllSourcesExhausted { failures }),
            ResolutionOutcome::Cancelled { .. } => Err(LyricsError::Cancelled),
        }
    }
}
