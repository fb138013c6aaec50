//! Tree Cache
//!
//! Owns the single rooted tree of nodes for the lifetime of a provider. Nodes are only
//! created through the gated mutation surface below; the consumer-facing form of every
//! mutation is rejected with `NoPermissions`.

use crate::error::FsError;
use crate::notifier::ChangeNotifier;
use crate::tree::node::{DirectoryNode, Entry, FileNode};
use crate::tree::path;
use crate::types::{ChangeEvent, CreateDirectoryOptions, WriteOptions};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct TreeCache {
    root: Entry,
    notifier: ChangeNotifier,
}

/// Content written into a file node
enum FileContent {
    Bytes(Vec<u8>),
    Deferred(Option<String>),
}

impl TreeCache {
    /// Create a cache holding only the empty, unpopulated root directory
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            root: Entry::Directory(DirectoryNode::new("")),
            notifier,
        }
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Entry {
        &mut self.root
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Create or overwrite a file with `content`.
    ///
    /// Requires `options.internal`; the parent directory must already exist.
    pub fn write_file(
        &mut self,
        path: &str,
        content: Vec<u8>,
        options: WriteOptions,
    ) -> Result<(), FsError> {
        self.put_file(path, FileContent::Bytes(content), options)
    }

    /// Create a file node whose content is fetched later from `download_url`
    pub(crate) fn write_deferred_file(
        &mut self,
        path: &str,
        download_url: Option<String>,
    ) -> Result<(), FsError> {
        // Create-only: an existing node at `path` is never replaced by a listing
        let options = WriteOptions {
            overwrite: false,
            ..WriteOptions::populate()
        };
        self.put_file(path, FileContent::Deferred(download_url), options)
    }

    fn put_file(
        &mut self,
        path: &str,
        content: FileContent,
        options: WriteOptions,
    ) -> Result<(), FsError> {
        if !options.internal {
            return Err(FsError::NoPermissions(path.to_string()));
        }
        let name = path::basename(path).to_string();
        if name.is_empty() {
            return Err(FsError::FileIsADirectory(path.to_string()));
        }

        let parent = self.lookup_parent_directory_mut(path)?;
        let created = match parent.children.get_mut(&name) {
            Some(Entry::Directory(_)) => {
                return Err(FsError::FileIsADirectory(path.to_string()));
            }
            Some(_) if options.create && !options.overwrite => {
                return Err(FsError::FileExists(path.to_string()));
            }
            None if !options.create => {
                return Err(FsError::NotFound(path.to_string()));
            }
            Some(Entry::File(file)) => {
                apply_content(file, content);
                false
            }
            None => {
                let mut file = FileNode::new(name);
                apply_content(&mut file, content);
                parent.insert(Entry::File(file));
                true
            }
        };

        let normalized = path::normalize_path_string(path);
        trace!(path = %normalized, created, "Stored file node");
        self.notifier.fire([if created {
            ChangeEvent::created(&normalized)
        } else {
            ChangeEvent::changed(&normalized)
        }]);
        Ok(())
    }

    /// Insert a new, unpopulated directory under an existing parent.
    ///
    /// Requires `options.internal`.
    pub fn create_directory(
        &mut self,
        path: &str,
        options: CreateDirectoryOptions,
    ) -> Result<(), FsError> {
        if !options.internal {
            return Err(FsError::NoPermissions(path.to_string()));
        }
        let name = path::basename(path).to_string();
        if name.is_empty() {
            return Err(FsError::FileExists(path.to_string()));
        }

        let parent = self.lookup_parent_directory_mut(path)?;
        if parent.children.contains_key(&name) {
            return Err(FsError::FileExists(path.to_string()));
        }
        parent.insert(Entry::Directory(DirectoryNode::new(name)));

        let normalized = path::normalize_path_string(path);
        debug!(path = %normalized, "Created directory node");
        self.notifier.fire([
            ChangeEvent::changed(&path::dirname(&normalized)),
            ChangeEvent::created(&normalized),
        ]);
        Ok(())
    }

    /// Nodes are never relocated
    pub fn rename(&mut self, old_path: &str, _new_path: &str) -> Result<(), FsError> {
        Err(FsError::NoPermissions(old_path.to_string()))
    }

    /// Nodes are never removed
    pub fn delete(&mut self, path: &str) -> Result<(), FsError> {
        Err(FsError::NoPermissions(path.to_string()))
    }
}

fn apply_content(file: &mut FileNode, content: FileContent) {
    match content {
        FileContent::Bytes(bytes) => file.store(bytes),
        FileContent::Deferred(download_url) => {
            file.data = None;
            file.size = 0;
            file.download_url = download_url;
        }
    }
}
