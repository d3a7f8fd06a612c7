//! ytl-finder: find lyrics for the song in a YouTube video
//!
//! A lookup runs in two stages:
//! 1. Read the song and artist names out of the watch page's embedded
//!    document ([`document`], [`identity`]). The document is searched by
//!    anchor label rather than by fixed path, since its shape changes
//!    between page versions.
//! 2. Ask lyrics sites for those names in priority order until one answers
//!    ([`sources`], [`fallback`]).
//!
//! [`finder::LyricsFinder`] ties the stages together.

pub mod config;
pub mod document;
pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod finder;
pub mod identity;
pub mod markup;
pub mod sources;
pub mod youtube;

pub use crate::config::FinderConfig;
pub use crate::error::{LyricsError, LyricsResult};
pub use crate::fallback::{resolve_with_fallback, FallbackResolver, ResolutionOutcome, SourceFailure};
pub use crate::finder::{LyricsFinder, LyricsReport};
pub use crate::identity::{ExtractedIdentity, FieldQuery, FieldResolver};
pub use crate::sources::{LyricsContent, SourceAdapter, SourceError, SourceKind, SourceResult};
