//! Repofs: Lazy Repository File System
//!
//! An in-memory directory tree mirroring a hosted source repository. Directory listings
//! and file contents are fetched from the repository's contents API the first time they
//! are needed and served from memory afterwards. The tree is read-only to consumers;
//! changes made while populating it are broadcast as debounced batches.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod populate;
pub mod provider;
pub mod remote;
pub mod repository;
pub mod tree;
pub mod types;
pub mod uri;

pub use error::FsError;
pub use provider::{FileSystemProvider, RepoFileSystem};
pub use remote::{RemoteItem, RemoteItemKind, RemoteLoader};
pub use types::{ChangeEvent, ChangeKind, FileStat, FileType};
