//! Tree node types
//!
//! A node is either a file or a directory. Directories own their children, so the
//! whole tree is owned by the root directory held in [`TreeCache`](super::cache::TreeCache).

use crate::types::{FileStat, FileType};
use chrono::{DateTime, Utc};
use hashlink::LinkedHashMap;

/// Child map of a directory, iterated in the order the remote listing returned
pub type Children = LinkedHashMap<String, Entry>;

/// File node
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    /// Byte length of cached content; 0 until fetched
    pub size: u64,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    /// Cached content. `None` or empty means not fetched yet.
    pub data: Option<Vec<u8>>,
    /// Locator used to fetch the content on first read
    pub download_url: Option<String>,
}

impl FileNode {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            size: 0,
            ctime: now,
            mtime: now,
            data: None,
            download_url: None,
        }
    }

    /// A file whose content will be fetched from `download_url` on first read
    pub fn deferred(name: impl Into<String>, download_url: Option<String>) -> Self {
        Self {
            download_url,
            ..Self::new(name)
        }
    }

    /// Cached bytes, if the content has been fetched
    pub fn content(&self) -> Option<&[u8]> {
        self.data.as_deref().filter(|data| !data.is_empty())
    }

    pub fn is_fetched(&self) -> bool {
        self.content().is_some()
    }

    pub(crate) fn store(&mut self, content: Vec<u8>) {
        self.size = content.len() as u64;
        self.mtime = Utc::now();
        self.data = Some(content);
    }
}

/// Directory node
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    pub name: String,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    pub entry_count: u64,
    pub children: Children,
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            ctime: now,
            mtime: now,
            entry_count: 0,
            children: Children::new(),
        }
    }

    /// A directory with no children has never been listed
    pub fn is_populated(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children as `(name, kind)` pairs in stored order
    pub fn listing(&self) -> Vec<(String, FileType)> {
        self.children
            .iter()
            .map(|(name, entry)| (name.clone(), entry.kind()))
            .collect()
    }

    pub(crate) fn insert(&mut self, entry: Entry) -> Option<Entry> {
        let previous = self.children.replace(entry.name().to_string(), entry);
        self.entry_count = self.children.len() as u64;
        self.mtime = Utc::now();
        previous
    }
}

/// Node in the repository tree
#[derive(Debug, Clone)]
pub enum Entry {
    File(FileNode),
    Directory(DirectoryNode),
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File(file) => &file.name,
            Entry::Directory(dir) => &dir.name,
        }
    }

    pub fn kind(&self) -> FileType {
        match self {
            Entry::File(_) => FileType::File,
            Entry::Directory(_) => FileType::Directory,
        }
    }

    pub fn stat(&self) -> FileStat {
        match self {
            Entry::File(file) => FileStat {
                kind: FileType::File,
                ctime: file.ctime,
                mtime: file.mtime,
                size: file.size,
            },
            Entry::Directory(dir) => FileStat {
                kind: FileType::Directory,
                ctime: dir.ctime,
                mtime: dir.mtime,
                size: dir.entry_count,
            },
        }
    }
}
