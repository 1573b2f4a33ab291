// src/github/memory.rs
// =============================================================================
// An in-memory stand-in for GitHub, used by tests.
//
// Bodies are registered per URL. Anything not registered answers 404, like
// the real API does for a missing path. Every requested URL is recorded in
// order, so tests can check exactly which listings were fetched.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::json;

use super::fetch::{Fetch, FetchResponse};
use crate::error::Result;

pub const API: &str = "https://api.github.com";
pub const RAW: &str = "https://raw.githubusercontent.com";

#[derive(Default)]
pub struct MemoryFetch {
    responses: HashMap<String, (u16, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw body for a URL
    pub fn with(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.to_string(), (status, body.into()));
        self
    }

    /// Registers a text file: a raw download URL serving `body`
    pub fn with_file(self, download_url: &str, body: &str) -> Self {
        self.with(download_url, 200, body)
    }

    /// Registers a folder listing as the contents API would answer it
    ///
    /// `files` and `dirs` are (name, url) pairs: download URL for files,
    /// listing URL for folders.
    pub fn with_listing(self, url: &str, files: &[(&str, &str)], dirs: &[(&str, &str)]) -> Self {
        let mut entries = Vec::new();
        for (name, download) in files {
            entries.push(json!({
                "name": name,
                "type": "file",
                "download_url": download,
                "url": format!("{}/entries/{}", API, name),
            }));
        }
        for (name, listing) in dirs {
            entries.push(json!({
                "name": name,
                "type": "dir",
                "download_url": null,
                "url": listing,
            }));
        }
        self.with(url, 200, serde_json::Value::Array(entries).to_string())
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for MemoryFetch {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        self.requests.lock().unwrap().push(url.to_string());

        let (status, body) = self
            .responses
            .get(url)
            .cloned()
            .unwrap_or((404, br#"{"message":"Not Found"}"#.to_vec()));

        Ok(FetchResponse { status, body })
    }
}
