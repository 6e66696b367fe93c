//! The fetch collaborator: `fetch(url) -> text`.

use parking_lot::Mutex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::config::RestConfig;
use crate::error::FetchError;

/// One-shot blocking text retrieval. Implementations own timeout and
/// user-agent policy; callers never retry.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Blocking HTTP fetcher.
///
/// A 404 is returned as an empty body: both services answer it for an
/// entry that lacks the requested field or has no links.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
}

impl RestClient {
    pub fn new(config: &RestConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("keggraph")),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetch for RestClient {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };
        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        debug!(%url, status = status.as_u16(), "fetched");
        if status == StatusCode::NOT_FOUND {
            return Ok(String::new());
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.text().map_err(transport)
    }
}

// ============================================================================
// Canned responses
// ============================================================================

/// URL -> response table. Unknown URLs fail with [`FetchError::Missing`].
/// Every request is recorded, so tests can assert on what was asked for.
#[derive(Debug, Default)]
pub struct StaticFetch {
    responses: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.responses.insert(url.into(), body.into());
    }

    /// Requested URLs, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requested.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().len()
    }
}

impl Fetch for StaticFetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Missing {
                url: url.to_string(),
            })
    }
}
