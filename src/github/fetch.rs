// src/github/fetch.rs
// =============================================================================
// The one network primitive the rest of the program is allowed to use.
//
// Everything above this layer (listing folders, resolving paths, inlining)
// only ever asks "GET this URL, give me the status and the body". Keeping
// that behind a trait means tests can swap in an in-memory repository and
// never touch the network.
//
// Rust concepts:
// - Traits with async fns: the trait returns a future we can .await
// - Generics: callers take `F: Fetch` instead of a concrete client
// =============================================================================

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;

use crate::error::{PreviewError, Result};

/// GitHub rejects API calls without a User-Agent
const USER_AGENT: &str = concat!("repo-preview/", env!("CARGO_PKG_VERSION"));

/// Status and body of a finished request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can GET a URL
///
/// A non-2xx answer is still Ok: callers decide which error it turns into.
/// Err is reserved for requests that never produced a response.
pub trait Fetch {
    fn get(&self, url: &str) -> impl Future<Output = Result<FetchResponse>> + Send;
}

/// Fetch over HTTPS with reqwest
pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    /// Builds a client that speaks the GitHub contents API
    ///
    /// With a token, requests are authenticated and get the higher rate limit.
    pub fn new(token: Option<&str>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // No timeout on purpose: a run waits as long as GitHub takes
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetch {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        log::debug!("GET {}", url);

        let transport = |e: reqwest::Error| PreviewError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?.to_vec();

        log::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse { status, body })
    }
}
