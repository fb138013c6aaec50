//! Population Orchestrator
//!
//! Fills the tree cache on demand. A directory is listed remotely the first time it is
//! read while empty; a file's bytes are fetched the first time it is read while empty.
//! Afterwards both are served from the cache without network traffic.
//!
//! Concurrent requests for the same unpopulated path share one remote call: the first
//! caller registers a shared future per path, later callers await the same future, and
//! every caller re-checks the cache before materializing so only one of them writes.

use crate::error::{FsError, RemoteError};
use crate::remote::{RemoteItem, RemoteItemKind, RemoteLoader};
use crate::tree::node::Entry;
use crate::tree::path;
use crate::tree::TreeCache;
use crate::types::{CreateDirectoryOptions, FileStat, FileType, WriteOptions};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Tree cache shared between the provider and the orchestrator
pub type SharedTree = Arc<RwLock<TreeCache>>;

type InFlight<T> = Shared<BoxFuture<'static, Result<T, RemoteError>>>;
type InFlightMap<T> = Mutex<HashMap<String, InFlight<T>>>;

pub struct Populator {
    loader: Arc<dyn RemoteLoader>,
    listings: InFlightMap<Arc<Vec<RemoteItem>>>,
    fetches: InFlightMap<Arc<Vec<u8>>>,
}

impl Populator {
    pub fn new(loader: Arc<dyn RemoteLoader>) -> Self {
        Self {
            loader,
            listings: Mutex::new(HashMap::new()),
            fetches: Mutex::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &Arc<dyn RemoteLoader> {
        &self.loader
    }

    /// Number of remote calls currently awaited
    pub fn in_flight(&self) -> usize {
        self.listings.lock().len() + self.fetches.lock().len()
    }

    /// List a directory, populating it from the remote on first access
    #[instrument(skip(self, tree))]
    pub async fn populate_directory(
        &self,
        tree: &SharedTree,
        path: &str,
    ) -> Result<Vec<(String, FileType)>, FsError> {
        let path = path::normalize_path_string(path);

        let present = {
            let cache = tree.read();
            let dir = cache.try_lookup_directory(&path)?;
            match dir {
                Some(dir) if dir.is_populated() => {
                    debug!("Directory listing served from cache");
                    return Ok(dir.listing());
                }
                Some(_) => true,
                None => false,
            }
        };
        if !present {
            // Reach the node through its ancestors so every directory on the way is
            // either empty or a complete listing.
            self.ensure_parent_listed(tree, &path).await?;
            tree.read().lookup_directory(&path)?;
        }

        let items = self
            .list_shared(&path)
            .await
            .map_err(|e| report_remote_failure(&path, e))?;

        let mut cache = tree.write();
        if !cache.lookup_directory(&path)?.is_populated() {
            materialize(&mut cache, &path, &items)?;
        }
        Ok(cache.lookup_directory(&path)?.listing())
    }

    /// Read a file, fetching its content from the remote on first access
    #[instrument(skip(self, tree))]
    pub async fn populate_file(&self, tree: &SharedTree, path: &str) -> Result<Vec<u8>, FsError> {
        let path = path::normalize_path_string(path);

        let cached = tree.read().try_lookup(&path)?.is_some();
        if !cached {
            self.ensure_parent_listed(tree, &path).await?;
        }

        let download_url = {
            let cache = tree.read();
            let file = cache.lookup_file(&path)?;
            if let Some(content) = file.content() {
                debug!(bytes = content.len(), "File content served from cache");
                return Ok(content.to_vec());
            }
            file.download_url
                .clone()
                .ok_or_else(|| FsError::NotFound(path.clone()))?
        };

        let bytes = self
            .fetch_shared(&path, download_url)
            .await
            .map_err(|e| report_remote_failure(&path, e))?;

        let mut cache = tree.write();
        if let Some(content) = cache.lookup_file(&path)?.content() {
            return Ok(content.to_vec());
        }
        cache.write_file(&path, bytes.as_ref().clone(), WriteOptions::populate())?;
        Ok(bytes.as_ref().clone())
    }

    /// Metadata for a path, listing unpopulated ancestors if it is not cached yet
    #[instrument(skip(self, tree))]
    pub async fn stat(&self, tree: &SharedTree, path: &str) -> Result<FileStat, FsError> {
        let path = path::normalize_path_string(path);
        let cached = tree.read().try_lookup(&path)?.map(Entry::stat);
        if let Some(stat) = cached {
            return Ok(stat);
        }
        self.ensure_parent_listed(tree, &path).await?;
        let stat = tree.read().lookup(&path)?.stat();
        Ok(stat)
    }

    /// Make sure the directory containing `path` has been listed.
    fn ensure_parent_listed<'a>(
        &'a self,
        tree: &'a SharedTree,
        path: &'a str,
    ) -> BoxFuture<'a, Result<(), FsError>> {
        async move {
            if path == "/" {
                return Ok(());
            }
            let parent = path::dirname(path);
            let needs_listing = match tree.read().try_lookup_directory(&parent)? {
                Some(dir) => !dir.is_populated(),
                None => true,
            };
            if needs_listing {
                self.populate_directory(tree, &parent).await?;
            }
            Ok(())
        }
        .boxed()
    }

    async fn list_shared(&self, path: &str) -> Result<Arc<Vec<RemoteItem>>, RemoteError> {
        let loader = Arc::clone(&self.loader);
        let base_path = path.to_string();
        coalesce(&self.listings, path, move || async move {
            loader.list_children(&base_path).await.map(Arc::new)
        })
        .await
    }

    async fn fetch_shared(
        &self,
        path: &str,
        download_url: String,
    ) -> Result<Arc<Vec<u8>>, RemoteError> {
        let loader = Arc::clone(&self.loader);
        coalesce(&self.fetches, path, move || async move {
            loader.fetch_content(&download_url).await.map(Arc::new)
        })
        .await
    }
}

/// Await the in-flight call for `key`, starting it if there is none
async fn coalesce<T, F, Fut>(inflight: &InFlightMap<T>, key: &str, start: F) -> Result<T, RemoteError>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, RemoteError>> + Send + 'static,
{
    let future = {
        let mut map = inflight.lock();
        match map.get(key) {
            Some(existing) => {
                debug!(key, "Joining in-flight remote call");
                existing.clone()
            }
            None => {
                let future = start().boxed().shared();
                map.insert(key.to_string(), future.clone());
                future
            }
        }
    };

    let handle = future.clone();
    let result = future.await;

    // Whoever finishes first clears the slot, so a failed call is retried in full next time
    let mut map = inflight.lock();
    if map.get(key).is_some_and(|current| current.ptr_eq(&handle)) {
        map.remove(key);
    }
    result
}

/// Convert a listing into unpopulated directory nodes and deferred file nodes.
///
/// Items that cannot be placed are skipped, never half-applied: the directory ends up
/// holding every placeable item of the listing.
fn materialize(cache: &mut TreeCache, dir_path: &str, items: &[RemoteItem]) -> Result<(), FsError> {
    debug!(path = dir_path, items = items.len(), "Materializing remote listing");
    for item in items {
        if item.kind == RemoteItemKind::Other {
            continue;
        }
        let Some(child_path) = placement(dir_path, item) else {
            warn!(name = %item.name, path = %item.path, "Skipping unplaceable remote item");
            continue;
        };
        let result = match item.kind {
            RemoteItemKind::Dir => {
                cache.create_directory(&child_path, CreateDirectoryOptions::populate())
            }
            _ => cache.write_deferred_file(&child_path, item.download_url.clone()),
        };
        match result {
            Ok(()) => {}
            Err(FsError::FileExists(_) | FsError::FileIsADirectory(_)) => {
                warn!(path = %child_path, "Duplicate entry in remote listing");
            }
            // Parent faults surface on the first item, before anything is inserted
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Tree path for a listed item: its reported path when that sits directly under
/// `dir_path`, otherwise `dir_path/name`. `None` when the name is not a single segment.
fn placement(dir_path: &str, item: &RemoteItem) -> Option<String> {
    let listed = path::normalize_remote_path(&item.path);
    if listed != "/" && path::dirname(&listed) == dir_path {
        return Some(listed);
    }
    let name = item.name.as_str();
    (!name.is_empty() && !name.contains('/')).then(|| path::join(dir_path, name))
}

fn report_remote_failure(path: &str, err: RemoteError) -> FsError {
    error!(path, error = %err, "Remote repository request failed");
    FsError::from(err)
}
