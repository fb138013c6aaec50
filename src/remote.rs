//! Remote Loader
//!
//! Stateless access to a hosted repository's contents API: list the immediate children
//! of a directory, and fetch the full bytes of one file. Both calls are idempotent reads.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::{HttpRemoteLoader, RemoteConfig};

/// Kind of an item in a contents listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteItemKind {
    File,
    Dir,
    /// Symlinks, submodules and anything else without a tree representation
    #[serde(other)]
    Other,
}

/// One item of a contents listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    pub name: String,
    /// Repository-relative path, possibly prefixed with `./`
    pub path: String,
    #[serde(rename = "type")]
    pub kind: RemoteItemKind,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl RemoteItem {
    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: RemoteItemKind::Dir,
            download_url: None,
        }
    }

    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        download_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: RemoteItemKind::File,
            download_url: Some(download_url.into()),
        }
    }
}

/// Remote content source
#[async_trait]
pub trait RemoteLoader: Send + Sync {
    /// List the immediate children of `base_path` (a tree path such as `/src`)
    async fn list_children(&self, base_path: &str) -> Result<Vec<RemoteItem>, RemoteError>;

    /// Fetch the full content behind a download locator
    async fn fetch_content(&self, download_url: &str) -> Result<Vec<u8>, RemoteError>;

    /// Loader name for diagnostics
    fn name(&self) -> &str;
}
