//! Test Helper Utilities
//!
//! Shared fakes and fixtures for ytl-finder integration tests

#![allow(dead_code)]

pub mod log_capture;

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;
use ytl_finder::fetcher::{FetchResponse, Fetcher, RequestHeaders, TransportError};
use ytl_finder::{LyricsContent, SourceAdapter, SourceError, SourceResult};

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=fJ9rUzIMcZQ";
pub const LINK: &str = "https://youtu.be/fJ9rUzIMcZQ";

/// Captured watch-page document with a music section
pub fn music_section() -> Value {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/yt_initial_data_music_section.json");
    let raw = std::fs::read_to_string(path).expect("fixture readable");
    serde_json::from_str(&raw).expect("fixture is valid JSON")
}

/// Watch page HTML embedding `document` as ytInitialData, on one line as YouTube serves it
pub fn watch_page(document: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><head><script nonce=\"x\">var ytInitialData = {};</script></head><body></body></html>",
        document
    )
}

/// Fetcher serving canned pages; unknown URLs get a 404
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Result<FetchResponse, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            Ok(FetchResponse {
                status: 200,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn failure(mut self, url: &str, error: TransportError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &Url, _headers: &RequestHeaders) -> Result<FetchResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages.get(url.as_str()).cloned().unwrap_or(Ok(FetchResponse {
            status: 404,
            body: String::new(),
        }))
    }
}

/// Source with a fixed answer that counts invocations and records queries
pub struct CountingSource {
    name: String,
    answer: SourceResult,
    calls: AtomicUsize,
    queries: Mutex<Vec<Vec<String>>>,
}

impl CountingSource {
    pub fn new(name: &str, answer: SourceResult) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            answer,
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn succeeding(name: &str, text: &str) -> Arc<Self> {
        Self::new(
            name,
            Ok(LyricsContent {
                text: text.to_string(),
                provenance: Url::parse(&format!("https://{}.test/lyrics", name)).unwrap(),
            }),
        )
    }

    pub fn not_found(name: &str) -> Arc<Self> {
        Self::new(name, Err(SourceError::NotFound))
    }

    pub fn timing_out(name: &str) -> Arc<Self> {
        Self::new(
            name,
            Err(SourceError::Transport(TransportError::Timeout(format!("https://{}.test", name)))),
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<Vec<String>> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceAdapter for CountingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn resolve(&self, query: &[String]) -> SourceResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.to_vec());
        self.answer.clone()
    }
}
