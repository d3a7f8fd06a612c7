//! ytl-finder configuration
//!
//! Loaded from `ytl-finder.toml` (see [`ytl_common::config`] for discovery),
//! then overridden by `YTL_SOURCES` and the `--source` CLI flag. Every
//! section is optional; missing values fall back to built-in defaults.

use crate::identity::FieldQuery;
use crate::sources::{azlyrics, musixmatch, SourceKind};
use crate::youtube;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;
use ytl_common::config::{load_toml_config, resolve_config_path, ConfigLocation, LoggingConfig};
use ytl_common::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "ytl-finder.toml";
pub const CONFIG_ENV_VAR: &str = "YTL_CONFIG";
/// Comma-separated source priority override, e.g. `azlyrics,musixmatch`
pub const SOURCES_ENV_VAR: &str = "YTL_SOURCES";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/101.0.4951.54 Safari/537.36";
pub const DEFAULT_YOUTUBE_USER_AGENT: &str =
    "bot grabbing authors/song names to find lyrics for it (educational project)";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FinderConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub youtube: YouTubeConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout
    pub timeout_secs: u64,
    /// User agent sent to lyrics sites
    pub browser_user_agent: String,
    /// User agent sent to YouTube
    pub youtube_user_agent: String,
    pub accept_language: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            browser_user_agent: DEFAULT_BROWSER_USER_AGENT.to_string(),
            youtube_user_agent: DEFAULT_YOUTUBE_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct YouTubeConfig {
    pub watch_url: String,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            watch_url: youtube::DEFAULT_WATCH_URL.to_string(),
        }
    }
}

/// Lyrics sources, in the order they are tried
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SourcesConfig {
    pub priority: Vec<SourceKind>,
    pub musixmatch_base_url: String,
    pub azlyrics_search_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            priority: vec![SourceKind::Musixmatch, SourceKind::Azlyrics],
            musixmatch_base_url: musixmatch::DEFAULT_BASE_URL.to_string(),
            azlyrics_search_url: azlyrics::DEFAULT_SEARCH_URL.to_string(),
        }
    }
}

impl SourcesConfig {
    /// Base URL configured for a source
    pub fn endpoint(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::Musixmatch => &self.musixmatch_base_url,
            SourceKind::Azlyrics => &self.azlyrics_search_url,
        }
    }
}

/// Anchor queries for the two extracted fields
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractionConfig {
    pub song: FieldQuery,
    pub artist: FieldQuery,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            song: FieldQuery::youtube_song(),
            artist: FieldQuery::youtube_artist(),
        }
    }
}

impl FinderConfig {
    /// Discover, load and validate configuration
    ///
    /// `cli_path` wins over `YTL_CONFIG`, which wins over the per-user
    /// config directory. `YTL_SOURCES`, when set, replaces the priority list.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        Self::load_from(&Self::locate(cli_path))
    }

    /// Where the config file is looked for
    pub fn locate(cli_path: Option<&Path>) -> ConfigLocation {
        resolve_config_path(cli_path, CONFIG_ENV_VAR, CONFIG_FILE_NAME)
    }

    /// Load and validate configuration from an already resolved location
    pub fn load_from(location: &ConfigLocation) -> Result<Self> {
        let mut config: FinderConfig = load_toml_config(location)?;

        if let Ok(list) = std::env::var(SOURCES_ENV_VAR) {
            if !list.trim().is_empty() {
                config.sources.priority = parse_source_list(&list)?;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the source priority (CLI `--source`); an empty list keeps the current one
    pub fn with_sources(mut self, sources: Vec<SourceKind>) -> Result<Self> {
        if !sources.is_empty() {
            self.sources.priority = sources;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.priority.is_empty() {
            return Err(Error::Config("sources.priority must name at least one source".to_string()));
        }
        for (i, kind) in self.sources.priority.iter().enumerate() {
            if self.sources.priority[..i].contains(kind) {
                return Err(Error::Config(format!("sources.priority lists '{}' more than once", kind)));
            }
            parse_url(&format!("sources endpoint for {}", kind), self.sources.endpoint(*kind))?;
        }

        parse_url("youtube.watch_url", &self.youtube.watch_url)?;

        if self.http.timeout_secs == 0 {
            return Err(Error::Config("http.timeout_secs must be greater than zero".to_string()));
        }

        for (name, query) in [("song", &self.extraction.song), ("artist", &self.extraction.artist)] {
            if query.anchor.trim().is_empty() {
                return Err(Error::Config(format!("extraction.{}.anchor must not be empty", name)));
            }
            if query.candidate_keys.is_empty() {
                return Err(Error::Config(format!(
                    "extraction.{}.candidate_keys must name at least one key",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// Parse a comma-separated list of source names
pub fn parse_source_list(list: &str) -> Result<Vec<SourceKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<SourceKind>().map_err(Error::Config))
        .collect()
}

/// Parse a configured URL, naming the setting on failure
pub fn parse_url(setting: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| Error::Config(format!("{} is not a valid URL ({}): {}", setting, value, e)))
}
