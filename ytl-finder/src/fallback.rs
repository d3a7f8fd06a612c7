//! Priority-ordered fallback across lyrics sources
//!
//! Sources are tried one at a time in the configured order. The first
//! success wins and later sources are never started. Each failure is
//! recorded and the next source is tried; a source gets exactly one attempt
//! per resolution.

use crate::sources::{LyricsContent, SourceAdapter, SourceError};
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A source that did not produce lyrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub error: SourceError,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.error)
    }
}

/// Final result of a fallback resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A source succeeded; `failures` holds the sources tried before it
    Resolved {
        content: LyricsContent,
        source: String,
        source_index: usize,
        failures: Vec<SourceFailure>,
    },
    /// Every source failed, one entry per source in priority order
    Exhausted { failures: Vec<SourceFailure> },
    /// Cancelled before any source succeeded; later sources were not tried
    Cancelled { failures: Vec<SourceFailure> },
}

impl ResolutionOutcome {
    pub fn failures(&self) -> &[SourceFailure] {
        match self {
            ResolutionOutcome::Resolved { failures, .. }
            | ResolutionOutcome::Exhausted { failures }
            | ResolutionOutcome::Cancelled { failures } => failures,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { .. })
    }
}

/// Ordered list of sources, shared read-only across resolutions
#[derive(Clone)]
pub struct FallbackResolver {
    sources: Vec<Arc<dyn SourceAdapter>>,
}

impl FallbackResolver {
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { sources }
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve without external cancellation
    pub async fn resolve(&self, query: &[String]) -> ResolutionOutcome {
        self.resolve_with_cancellation(query, &CancellationToken::new()).await
    }

    /// Resolve, aborting the in-flight source when `cancel` fires
    pub async fn resolve_with_cancellation(&self, query: &[String], cancel: &CancellationToken) -> ResolutionOutcome {
        let mut failures = Vec::with_capacity(self.sources.len());

        for (source_index, source) in self.sources.iter().enumerate() {
            let name = source.name().to_string();
            debug!(source = %name, source_index, "Trying lyrics source");

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(source = %name, "Lyrics resolution cancelled");
                    return ResolutionOutcome::Cancelled { failures };
                }
                result = source.resolve(query) => result,
            };

            match result {
                Ok(content) => {
                    info!(
                        source = %name,
                        source_index,
                        provenance = %content.provenance,
                        skipped = failures.len(),
                        "Lyrics resolved"
                    );
                    return ResolutionOutcome::Resolved {
                        content,
                        source: name,
                        source_index,
                        failures,
                    };
                }
                Err(error) => {
                    warn!(source = %name, error = %error, "Lyrics source failed, trying next");
                    failures.push(SourceFailure { source: name, error });
                }
            }
        }

        warn!(attempted = failures.len(), "All lyrics sources exhausted");
        ResolutionOutcome::Exhausted { failures }
    }
}

/// Try `sources` in order until one succeeds
pub async fn resolve_with_fallback(sources: &[Arc<dyn SourceAdapter>], query: &[String]) -> ResolutionOutcome {
    FallbackResolver::new(sources.to_vec()).resolve(query).await
}
