//! Host-facing value types shared across the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a node in the repository tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    File,
    Directory,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileType::File => write!(f, "file"),
            FileType::Directory => write!(f, "dir"),
        }
    }
}

/// Metadata returned by `stat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub kind: FileType,
    pub ctime: DateTime<Utc>,
    pub mtime: DateTime<Utc>,
    /// Content length for files (0 until fetched), entry count for directories
    pub size: u64,
}

/// Flags for `write_file`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub create: bool,
    pub overwrite: bool,
    /// Set only by cache population; consumer writes are rejected without it
    pub internal: bool,
}

impl WriteOptions {
    /// Options used when the orchestrator stores fetched content.
    pub fn populate() -> Self {
        Self {
            create: true,
            overwrite: true,
            internal: true,
        }
    }
}

/// Flags for `create_directory`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateDirectoryOptions {
    pub internal: bool,
}

impl CreateDirectoryOptions {
    pub fn populate() -> Self {
        Self { internal: true }
    }
}

/// Kind of cache mutation reported to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Created,
    Changed,
    /// Kept for host compatibility; the cache never removes nodes.
    Deleted,
}

/// A single cache mutation, addressed by virtual URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub uri: String,
}

impl ChangeEvent {
    pub fn created(path: &str) -> Self {
        Self {
            kind: ChangeKind::Created,
            uri: crate::uri::to_uri(path),
        }
    }

    pub fn changed(path: &str) -> Self {
        Self {
            kind: ChangeKind::Changed,
            uri: crate::uri::to_uri(path),
        }
    }
}
