//! Shared test utilities for integration tests
//!
//! A scripted in-memory remote that counts every call, so tests can assert exactly when
//! the cache goes to the network.

use async_trait::async_trait;
use parking_lot::Mutex;
use repofs::error::RemoteError;
use repofs::notifier::NotifierConfig;
use repofs::remote::{RemoteItem, RemoteLoader};
use repofs::RepoFileSystem;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct MockRemote {
    listings: Mutex<HashMap<String, Vec<RemoteItem>>>,
    contents: Mutex<HashMap<String, Vec<u8>>>,
    failing: Mutex<Option<String>>,
    list_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(self, path: &str, items: Vec<RemoteItem>) -> Self {
        self.listings.lock().insert(path.to_string(), items);
        self
    }

    pub fn with_content(self, download_url: &str, content: &[u8]) -> Self {
        self.contents
            .lock()
            .insert(download_url.to_string(), content.to_vec());
        self
    }

    /// Make every call fail with a 503 carrying `message` until cleared
    pub fn fail_with(&self, message: Option<&str>) {
        *self.failing.lock() = message.map(str::to_string);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.list_calls() + self.fetch_calls()
    }

    fn check_failure(&self) -> Result<(), RemoteError> {
        match self.failing.lock().as_ref() {
            Some(message) => Err(RemoteError::Status {
                status: 503,
                body: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteLoader for MockRemote {
    async fn list_children(&self, base_path: &str) -> Result<Vec<RemoteItem>, RemoteError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_failure()?;
        self.listings
            .lock()
            .get(base_path)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                body: format!("no listing for {}", base_path),
            })
    }

    async fn fetch_content(&self, download_url: &str) -> Result<Vec<u8>, RemoteError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.check_failure()?;
        self.contents
            .lock()
            .get(download_url)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                body: format!("no content at {}", download_url),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Root: `src/` then `a.txt`; `src/` holds `lib.rs`; `docs/` is empty on the remote
pub fn sample_remote() -> MockRemote {
    MockRemote::new()
        .with_listing(
            "/",
            vec![
                RemoteItem::dir("src", "src"),
                RemoteItem::file("a.txt", "a.txt", "https://raw.example/a.txt"),
                RemoteItem::dir("docs", "docs"),
            ],
        )
        .with_listing(
            "/src",
            vec![RemoteItem::file(
                "lib.rs",
                "src/lib.rs",
                "https://raw.example/src/lib.rs",
            )],
        )
        .with_listing("/docs", Vec::new())
        .with_content("https://raw.example/a.txt", b"hello")
        .with_content("https://raw.example/src/lib.rs", b"pub fn lib() {}\n")
}

pub fn provider(remote: MockRemote) -> (Arc<MockRemote>, RepoFileSystem) {
    let remote = Arc::new(remote);
    let fs = RepoFileSystem::new(remote.clone(), &NotifierConfig::default());
    (remote, fs)
}
