//! Test doubles for the fetch layer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::fetch::PageFetcher;

/// Mock fetcher serving canned page bodies.
///
/// Allows configuring a body or a failure per URL and records every fetch
/// for verification.
///
/// # Example
///
/// ```rust
/// use extraction::testing::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.test/search", "<html></html>")
///     .with_failure("https://example.test/down");
/// ```
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, u16>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock. Fetching any URL fails with HTTP 404 until a
    /// page or failure is configured for it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn add_page(&self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), body.into());
    }

    /// Fail `url` with HTTP 500.
    pub fn add_failure(&self, url: impl Into<String>) {
        self.failures.write().unwrap().insert(url.into(), 500);
    }

    /// Builder form of [`add_page`](Self::add_page).
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.add_page(url, body);
        self
    }

    /// Builder form of [`add_failure`](Self::add_failure).
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.add_failure(url);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

impl Clone for MockFetcher {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(status) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }

        match self.pages.read().unwrap().get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
