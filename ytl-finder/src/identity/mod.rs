//! Song/artist extraction from a page document
//!
//! The page document changes shape between versions, so fields are never
//! read from fixed paths. Each field is described by a [`FieldQuery`]:
//! 1. Find the anchor label (e.g. `"ARTIST"`) anywhere in the tree
//! 2. Walk back up [`ContainerOffset`] levels to the row holding both the
//!    label and its value
//! 3. Take the first field under that row named in `candidate_keys`
//! 4. Render it to text and clean it

pub mod cleaning;

use crate::document::{find_first_by_any_key, find_path_to_value, resolve_path, Document};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub use cleaning::{clean_field, strip_annotations};

/// Number of trailing path segments between an anchor and its row container
///
/// This is a property of the page schema around the anchor, not of the
/// search. Music-section rows look like
/// `{"infoRowRenderer": {"title": {"simpleText": "ARTIST"}, "defaultMetadata": ...}}`,
/// so the anchor path ends `.infoRowRenderer.title.simpleText` and the row
/// is three segments up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerOffset(pub usize);

impl ContainerOffset {
    /// `<row>.infoRowRenderer.title.simpleText`
    pub const INFO_ROW: ContainerOffset = ContainerOffset(3);
}

/// How to find one field in the page document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldQuery {
    /// Literal label value marking the field's row
    pub anchor: String,
    /// Field names that may hold the value, across schema versions
    pub candidate_keys: Vec<String>,
    /// Levels from the anchor node up to the row container
    pub container_offset: ContainerOffset,
}

impl FieldQuery {
    pub fn new<K: Into<String>>(
        anchor: impl Into<String>,
        candidate_keys: impl IntoIterator<Item = K>,
        container_offset: ContainerOffset,
    ) -> Self {
        Self {
            anchor: anchor.into(),
            candidate_keys: candidate_keys.into_iter().map(Into::into).collect(),
            container_offset,
        }
    }

    /// Song title row of the YouTube music section
    pub fn youtube_song() -> Self {
        Self::new("SONG", ["defaultMetadata", "expandedMetadata"], ContainerOffset::INFO_ROW)
    }

    /// Artist row of the YouTube music section
    pub fn youtube_artist() -> Self {
        Self::new("ARTIST", ["defaultMetadata", "expandedMetadata"], ContainerOffset::INFO_ROW)
    }
}

/// Which of the two extracted fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Song,
    Artist,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Song => write!(f, "song"),
            Field::Artist => write!(f, "artist"),
        }
    }
}

/// Why a field could not be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// Anchor label absent from the document (schema drift)
    AnchorNotFound,
    /// Anchor path shorter than the configured container offset
    ContainerOutOfRange,
    /// No candidate key under the container, or its value has no text
    NoCandidateValue,
    /// Value was only annotations or separators
    EmptyAfterCleaning,
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissReason::AnchorNotFound => write!(f, "anchor not found"),
            MissReason::ContainerOutOfRange => write!(f, "container offset out of range"),
            MissReason::NoCandidateValue => write!(f, "no candidate value"),
            MissReason::EmptyAfterCleaning => write!(f, "empty after cleaning"),
        }
    }
}

/// One field that could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMiss {
    pub field: Field,
    pub anchor: String,
    pub reason: MissReason,
}

impl fmt::Display for FieldMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}'): {}", self.field, self.anchor, self.reason)
    }
}

/// Song and/or artist could not be extracted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fields not found: {}", describe_misses(.misses))]
pub struct FieldsNotFound {
    pub misses: Vec<FieldMiss>,
}

impl FieldsNotFound {
    /// True when every miss is a missing anchor, i.e. the page layout changed
    pub fn anchors_missing(&self) -> bool {
        !self.misses.is_empty() && self.misses.iter().all(|m| m.reason == MissReason::AnchorNotFound)
    }

    pub fn miss_for(&self, field: Field) -> Option<&FieldMiss> {
        self.misses.iter().find(|m| m.field == field)
    }
}

fn describe_misses(misses: &[FieldMiss]) -> String {
    misses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Cleaned, non-empty song and artist names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedIdentity {
    song: String,
    artist: String,
}

impl ExtractedIdentity {
    /// Clean both names; `None` if either ends up empty
    pub fn new(song: &str, artist: &str) -> Option<Self> {
        let song = clean_field(song);
        let artist = clean_field(artist);
        if song.is_empty() || artist.is_empty() {
            return None;
        }
        Some(Self { song, artist })
    }

    pub fn song(&self) -> &str {
        &self.song
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Search tokens: artist words followed by song words
    pub fn query_tokens(&self) -> Vec<String> {
        self.artist
            .split_whitespace()
            .chain(self.song.split_whitespace())
            .map(str::to_string)
            .collect()
    }
}

/// Extracts the song/artist pair from a page document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResolver {
    song: FieldQuery,
    artist: FieldQuery,
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new(FieldQuery::youtube_song(), FieldQuery::youtube_artist())
    }
}

impl FieldResolver {
    pub fn new(song: FieldQuery, artist: FieldQuery) -> Self {
        Self { song, artist }
    }

    /// Extract both fields; every miss is reported, not just the first
    pub fn resolve(&self, document: &Document) -> Result<ExtractedIdentity, FieldsNotFound> {
        let song = extract_field(document, Field::Song, &self.song);
        let artist = extract_field(document, Field::Artist, &self.artist);

        match (song, artist) {
            (Ok(song), Ok(artist)) => {
                debug!(song = %song, artist = %artist, "Extracted identity");
                Ok(ExtractedIdentity { song, artist })
            }
            (song, artist) => Err(FieldsNotFound {
                misses: [song.err(), artist.err()].into_iter().flatten().collect(),
            }),
        }
    }
}

/// Locate, render, and clean one field
pub fn extract_field(document: &Document, field: Field, query: &FieldQuery) -> Result<String, FieldMiss> {
    let miss = |reason| FieldMiss {
        field,
        anchor: query.anchor.clone(),
        reason,
    };

    let anchor = Document::String(query.anchor.clone());
    let anchor_path = find_path_to_value(document, &anchor).ok_or_else(|| miss(MissReason::AnchorNotFound))?;

    let container = anchor_path
        .trimmed(query.container_offset.0)
        .and_then(|path| resolve_path(document, &path))
        .ok_or_else(|| miss(MissReason::ContainerOutOfRange))?;

    let raw = find_first_by_any_key(container, &query.candidate_keys)
        .and_then(render_text)
        .ok_or_else(|| miss(MissReason::NoCandidateValue))?;

    let cleaned = clean_field(&raw);
    if cleaned.is_empty() {
        return Err(miss(MissReason::EmptyAfterCleaning));
    }

    debug!(%field, anchor = %anchor_path, raw = %raw, cleaned = %cleaned, "Field extracted");
    Ok(cleaned)
}

/// Text of a found value
///
/// Strings are used as-is. Formatted-text objects are read from
/// `simpleText`, or from their `runs` concatenated. Sequences yield their
/// first element that has text.
pub fn render_text(value: &Document) -> Option<String> {
    match value {
        Document::String(s) => Some(s.clone()),
        Document::Number(n) => Some(n.to_string()),
        Document::Bool(b) => Some(b.to_string()),
        Document::Object(map) => {
            if let Some(Document::String(s)) = map.get("simpleText") {
                return Some(s.clone());
            }
            let runs = map.get("runs")?.as_array()?;
            let joined: String = runs
                .iter()
                .filter_map(|run| run.get("text").and_then(Document::as_str))
                .collect();
            (!joined.is_empty()).then_some(joined)
        }
        Document::Array(items) => items.iter().find_map(render_text),
        Document::Null => None,
    }
}
