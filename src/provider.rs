//! Repository File System Provider
//!
//! Host-facing surface over the lazy tree: metadata, directory listings and file reads
//! populate the cache on demand; writes are only accepted from cache population; rename
//! and delete are always refused. Changes are broadcast as debounced batches.

use crate::config::RepoFsConfig;
use crate::error::{ConfigError, FsError};
use crate::notifier::{ChangeBatch, ChangeNotifier, NotifierConfig};
use crate::populate::{Populator, SharedTree};
use crate::remote::{HttpRemoteLoader, RemoteLoader};
use crate::tree::TreeCache;
use crate::types::{CreateDirectoryOptions, FileStat, FileType, WriteOptions};
use crate::uri;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument};

/// Registration returned by [`FileSystemProvider::watch`]
///
/// Path watching is not fine-grained: every change is broadcast to all subscribers
/// regardless of which path was watched, so the handle only records what was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchHandle {
    uri: String,
    recursive: bool,
}

impl WatchHandle {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Unregister the watch
    pub fn dispose(self) {}
}

/// Hierarchical file-access interface exposed to the host environment
#[async_trait]
pub trait FileSystemProvider: Send + Sync {
    async fn stat(&self, uri: &str) -> Result<FileStat, FsError>;

    async fn read_directory(&self, uri: &str) -> Result<Vec<(String, FileType)>, FsError>;

    async fn read_file(&self, uri: &str) -> Result<Vec<u8>, FsError>;

    fn write_file(&self, uri: &str, content: &[u8], options: WriteOptions) -> Result<(), FsError>;

    fn create_directory(&self, uri: &str, options: CreateDirectoryOptions) -> Result<(), FsError>;

    fn rename(&self, old_uri: &str, new_uri: &str, overwrite: bool) -> Result<(), FsError>;

    fn delete(&self, uri: &str, recursive: bool) -> Result<(), FsError>;

    /// Receive debounced batches of change events
    fn subscribe(&self) -> UnboundedReceiver<ChangeBatch>;

    fn watch(&self, uri: &str, recursive: bool) -> WatchHandle;
}

/// Lazy, read-only file system over a remote repository
pub struct RepoFileSystem {
    tree: SharedTree,
    populator: Populator,
    notifier: ChangeNotifier,
}

impl RepoFileSystem {
    /// Create a provider with an empty tree backed by `loader`
    pub fn new(loader: Arc<dyn RemoteLoader>, notifier_config: &NotifierConfig) -> Self {
        let notifier = ChangeNotifier::new(notifier_config);
        info!(loader = loader.name(), "Repository file system created");
        Self {
            tree: Arc::new(RwLock::new(TreeCache::new(notifier.clone()))),
            populator: Populator::new(loader),
            notifier,
        }
    }

    /// Create a provider talking HTTP to the configured contents API
    pub fn from_config(config: &RepoFsConfig) -> Result<Self, ConfigError> {
        let api_base = config.api_base()?;
        let loader = HttpRemoteLoader::new(api_base, &config.remote)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self::new(Arc::new(loader), &config.notifier))
    }

    pub fn tree(&self) -> &SharedTree {
        &self.tree
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }
}

impl Drop for RepoFileSystem {
    fn drop(&mut self) {
        self.notifier.dispose();
    }
}

#[async_trait]
impl FileSystemProvider for RepoFileSystem {
    #[instrument(skip(self))]
    async fn stat(&self, uri: &str) -> Result<FileStat, FsError> {
        let path = uri::from_uri(uri)?;
        self.populator.stat(&self.tree, &path).await
    }

    #[instrument(skip(self))]
    async fn read_directory(&self, uri: &str) -> Result<Vec<(String, FileType)>, FsError> {
        let path = uri::from_uri(uri)?;
        self.populator.populate_directory(&self.tree, &path).await
    }

    #[instrument(skip(self))]
    async fn read_file(&self, uri: &str) -> Result<Vec<u8>, FsError> {
        let path = uri::from_uri(uri)?;
        self.populator.populate_file(&self.tree, &path).await
    }

    fn write_file(&self, uri: &str, content: &[u8], options: WriteOptions) -> Result<(), FsError> {
        if !options.internal {
            debug!(uri, "Rejected consumer write");
            return Err(FsError::NoPermissions(display_path(uri)));
        }
        let path = uri::from_uri(uri)?;
        self.tree.write().write_file(&path, content.to_vec(), options)
    }

    fn create_directory(&self, uri: &str, options: CreateDirectoryOptions) -> Result<(), FsError> {
        if !options.internal {
            debug!(uri, "Rejected consumer directory creation");
            return Err(FsError::NoPermissions(display_path(uri)));
        }
        let path = uri::from_uri(uri)?;
        self.tree.write().create_directory(&path, options)
    }

    fn rename(&self, old_uri: &str, new_uri: &str, _overwrite: bool) -> Result<(), FsError> {
        self.tree
            .write()
            .rename(&display_path(old_uri), &display_path(new_uri))
    }

    fn delete(&self, uri: &str, _recursive: bool) -> Result<(), FsError> {
        self.tree.write().delete(&display_path(uri))
    }

    fn subscribe(&self) -> UnboundedReceiver<ChangeBatch> {
        self.notifier.subscribe()
    }

    fn watch(&self, uri: &str, recursive: bool) -> WatchHandle {
        WatchHandle {
            uri: uri.to_string(),
            recursive,
        }
    }
}

/// Path for error messages; refusals do not depend on the URI being ours
fn display_path(uri: &str) -> String {
    uri::from_uri(uri).unwrap_or_else(|_| uri.to_string())
}
