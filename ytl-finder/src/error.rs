//! Error types for ytl-finder
//!
//! Every terminal failure of a lookup maps to one variant, and every
//! variant has its own user-facing message ([`LyricsError::user_message`]).
//! Per-source misses are not errors here; they are collected by the
//! fallback resolver and only surface together as `AllSourcesExhausted`.

use crate::fallback::SourceFailure;
use crate::identity::{Field, FieldsNotFound};
use thiserror::Error;

/// Lyrics lookup error
#[derive(Debug, Error)]
pub enum LyricsError {
    /// Link is not a recognizable YouTube video link
    #[error("Invalid YouTube link: {0}")]
    InvalidLink(String),

    /// Video page could not be fetched or its embedded document parsed
    #[error("Page document unavailable from {url}: {reason}")]
    DocumentUnavailable { url: String, reason: String },

    /// Song and/or artist could not be extracted from the document
    #[error(transparent)]
    FieldsNotFound(#[from] FieldsNotFound),

    /// Every configured lyrics source failed
    #[error("All {} lyrics sources failed: {}", .failures.len(), describe_failures(.failures))]
    AllSourcesExhausted { failures: Vec<SourceFailure> },

    /// Lookup was cancelled before a source succeeded
    #[error("Lyrics lookup cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// ytl-common error
    #[error("Common error: {0}")]
    Common(#[from] ytl_common::Error),
}

/// Result type for lyrics lookups
pub type LyricsResult<T> = Result<T, LyricsError>;

impl LyricsError {
    /// Short machine-readable kind, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            LyricsError::InvalidLink(_) => "invalid_link",
            LyricsError::DocumentUnavailable { .. } => "document_unavailable",
            LyricsError::FieldsNotFound(e) if e.anchors_missing() => "anchor_not_found",
            LyricsError::FieldsNotFound(_) => "fields_not_found",
            LyricsError::AllSourcesExhausted { .. } => "all_sources_exhausted",
            LyricsError::Cancelled => "cancelled",
            LyricsError::Config(_) | LyricsError::Common(_) => "config",
        }
    }

    /// Message suitable for showing to the person who asked for the lyrics
    pub fn user_message(&self) -> String {
        match self {
            LyricsError::InvalidLink(_) => {
                "Please enter a correct YouTube link, e.g. https://www.youtube.com/watch?v=XXXXXXXXXXX".to_string()
            }
            LyricsError::DocumentUnavailable { .. } => "Can't get YouTube metadata for this video.".to_string(),
            LyricsError::FieldsNotFound(e) if e.anchors_missing() => {
                "Can't find song information on this YouTube page. The video may have no music details, \
                 or the page layout has changed."
                    .to_string()
            }
            LyricsError::FieldsNotFound(e) => {
                let missing: Vec<String> = [Field::Song, Field::Artist]
                    .into_iter()
                    .filter(|f| e.miss_for(*f).is_some())
                    .map(|f| f.to_string())
                    .collect();
                format!(
                    "Can't extract the {} name from the YouTube metadata.",
                    missing.join(" and ")
                )
            }
            LyricsError::AllSourcesExhausted { failures } => {
                let tried: Vec<&str> = failures.iter().map(|f| f.source.as_str()).collect();
                if tried.is_empty() {
                    "No lyrics sources are enabled.".to_string()
                } else {
                    format!("Lyrics not found on any source (tried: {}).", tried.join(", "))
                }
            }
            LyricsError::Cancelled => "The lyrics lookup was cancelled.".to_string(),
            LyricsError::Config(msg) => format!("The lyrics finder is misconfigured: {}", msg),
            LyricsError::Common(err) => format!("The lyrics finder is misconfigured: {}", err),
        }
    }
}

fn describe_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{FieldMiss, MissReason};
    use crate::sources::SourceError;
    use std::collections::HashSet;

    fn miss(field: Field, reason: MissReason) -> FieldMiss {
        FieldMiss {
            field,
            anchor: "X".to_string(),
            reason,
        }
    }

    fn all_kinds() -> Vec<LyricsError> {
        vec![
            LyricsError::InvalidLink("nope".to_string()),
            LyricsError::DocumentUnavailable {
                url: "https://www.youtube.com/watch?v=x".to_string(),
                reason: "HTTP 500".to_string(),
            },
            LyricsError::FieldsNotFound(FieldsNotFound {
                misses: vec![miss(Field::Song, MissReason::AnchorNotFound)],
            }),
            LyricsError::FieldsNotFound(FieldsNotFound {
                misses: vec![miss(Field::Artist, MissReason::NoCandidateValue)],
            }),
            LyricsError::AllSourcesExhausted {
                failures: vec![SourceFailure {
                    source: "musixmatch".to_string(),
                    error: SourceError::NotFound,
                }],
            },
            LyricsError::Cancelled,
            LyricsError::Config("bad".to_string()),
        ]
    }

    #[test]
    fn test_every_kind_has_distinct_message() {
        let messages: HashSet<String> = all_kinds().iter().map(LyricsError::user_message).collect();
        assert_eq!(messages.len(), all_kinds().len());
    }

    #[test]
    fn test_anchor_and_field_misses_have_distinct_kinds() {
        let kinds: Vec<&str> = all_kinds().iter().map(LyricsError::kind).collect();
        assert!(kinds.contains(&"anchor_not_found"));
        assert!(kinds.contains(&"fields_not_found"));
    }

    #[test]
    fn test_field_miss_message_names_fields() {
        let err = LyricsError::FieldsNotFound(FieldsNotFound {
            misses: vec![
                miss(Field::Song, MissReason::NoCandidateValue),
                miss(Field::Artist, MissReason::AnchorNotFound),
            ],
        });
        assert_eq!(err.user_message(), "Can't extract the song and artist name from the YouTube metadata.");
    }

    #[test]
    fn test_exhausted_lists_sources() {
        let err = LyricsError::AllSourcesExhausted {
            failures: vec![
                SourceFailure {
                    source: "musixmatch".to_string(),
                    error: SourceError::NotFound,
                },
                SourceFailure {
                    source: "azlyrics".to_string(),
                    error: SourceError::NotFound,
                },
            ],
        };
        assert_eq!(err.user_message(), "Lyrics not found on any source (tried: musixmatch, azlyrics).");
        assert_eq!(
            err.to_string(),
            "All 2 lyrics sources failed: musixmatch: no lyrics found; azlyrics: no lyrics found"
        );
    }
}
