//! Path resolution over the tree cache
//!
//! Resolution walks segment by segment from the root, skipping empty segments. Every
//! intermediate node must be a directory.

use crate::error::FsError;
use crate::tree::cache::TreeCache;
use crate::tree::node::{DirectoryNode, Entry, FileNode};
use crate::tree::path;

impl TreeCache {
    /// Resolve `path`, failing with `NotFound` or `NotADirectory`
    pub fn lookup(&self, path: &str) -> Result<&Entry, FsError> {
        self.try_lookup(path)?
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// Resolve `path`, returning `Ok(None)` when no node exists there.
    ///
    /// A file in the middle of the path is still an error.
    pub fn try_lookup(&self, path: &str) -> Result<Option<&Entry>, FsError> {
        let mut entry = self.root();
        for segment in path::segments(path) {
            let Entry::Directory(dir) = entry else {
                return Err(FsError::NotADirectory(path.to_string()));
            };
            match dir.children.get(segment) {
                Some(child) => entry = child,
                None => return Ok(None),
            }
        }
        Ok(Some(entry))
    }

    pub(crate) fn try_lookup_mut(&mut self, path: &str) -> Result<Option<&mut Entry>, FsError> {
        let mut entry = self.root_mut();
        for segment in path::segments(path) {
            entry = match entry {
                Entry::Directory(dir) => match dir.children.get_mut(segment) {
                    Some(child) => child,
                    None => return Ok(None),
                },
                Entry::File(_) => return Err(FsError::NotADirectory(path.to_string())),
            };
        }
        Ok(Some(entry))
    }

    /// Resolve `path` and require a directory
    pub fn lookup_directory(&self, path: &str) -> Result<&DirectoryNode, FsError> {
        self.try_lookup_directory(path)?
            .ok_or_else(|| FsError::NotFound(path.to_string()))
    }

    /// Silent form of [`lookup_directory`](Self::lookup_directory): absent is `Ok(None)`,
    /// a file is still `NotADirectory`.
    pub fn try_lookup_directory(&self, path: &str) -> Result<Option<&DirectoryNode>, FsError> {
        match self.try_lookup(path)? {
            Some(Entry::Directory(dir)) => Ok(Some(dir)),
            Some(Entry::File(_)) => Err(FsError::NotADirectory(path.to_string())),
            None => Ok(None),
        }
    }

    /// Resolve `path` and require a file
    pub fn lookup_file(&self, path: &str) -> Result<&FileNode, FsError> {
        match self.lookup(path)? {
            Entry::File(file) => Ok(file),
            Entry::Directory(_) => Err(FsError::IsADirectory(path.to_string())),
        }
    }

    /// Resolve the directory containing `path`
    pub fn lookup_parent_directory(&self, path: &str) -> Result<&DirectoryNode, FsError> {
        self.lookup_directory(&path::dirname(path))
    }

    pub(crate) fn lookup_parent_directory_mut(
        &mut self,
        path: &str,
    ) -> Result<&mut DirectoryNode, FsError> {
        let parent = path::dirname(path);
        match self.try_lookup_mut(&parent)? {
            Some(Entry::Directory(dir)) => Ok(dir),
            Some(Entry::File(_)) => Err(FsError::NotADirectory(parent)),
            None => Err(FsError::NotFound(parent)),
        }
    }
}
