//! Property-based tests for path resolution and listing order

mod path_resolution;
