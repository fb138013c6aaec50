//! Lazy Repository Tree
//!
//! In-memory mirror of the remote repository. Directories start empty and are filled on
//! first listing; files start without content and are filled on first read.

pub mod cache;
pub mod lookup;
pub mod node;
pub mod path;

pub use cache::TreeCache;
pub use node::{DirectoryNode, Entry, FileNode};
