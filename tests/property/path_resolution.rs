//! Property-based tests for path resolution guarantees

use proptest::collection::{hash_set, vec};
use proptest::prelude::*;
use repofs::notifier::{ChangeNotifier, NotifierConfig};
use repofs::tree::path;
use repofs::tree::TreeCache;
use repofs::types::{CreateDirectoryOptions, FileType, WriteOptions};
use repofs::uri;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,12}".prop_filter("dot segments are literal names", |s| s != "." && s != "..")
}

fn cache() -> TreeCache {
    TreeCache::new(ChangeNotifier::new(&NotifierConfig::default()))
}

/// Build `/s0/s1/.../sn` as nested directories
fn nested(segments: &[String]) -> (TreeCache, String) {
    let mut cache = cache();
    let mut current = String::from("/");
    for segment in segments {
        current = path::join(&current, segment);
        cache
            .create_directory(&current, CreateDirectoryOptions::populate())
            .unwrap();
    }
    (cache, current)
}

/// Any number of extra slashes between segments resolves to the same node
#[test]
fn test_repeated_slashes_resolve_identically() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(vec(segment(), 1..6), vec(1usize..4, 7)),
            |(segments, slash_runs)| {
                let (cache, canonical) = nested(&segments);

                let mut messy = String::new();
                for (i, segment) in segments.iter().enumerate() {
                    messy.push_str(&"/".repeat(slash_runs[i % slash_runs.len()]));
                    messy.push_str(segment);
                }
                messy.push_str(&"/".repeat(slash_runs[segments.len() % slash_runs.len()] - 1));

                let a = cache.lookup_directory(&canonical).unwrap();
                let b = cache.lookup_directory(&messy).unwrap();
                prop_assert!(std::ptr::eq(a, b));
                prop_assert_eq!(path::normalize_path_string(&messy), canonical);
                Ok(())
            },
        )
        .unwrap();
}

/// A listing reports children in exactly the order they were inserted
#[test]
fn test_listing_preserves_insertion_order() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(hash_set(segment(), 1..24), any::<u64>()),
            |(names, seed)| {
                let names: Vec<String> = names.into_iter().collect();
                let mut cache = cache();
                let mut expected = Vec::new();

                for (i, name) in names.iter().enumerate() {
                    let child = path::join("/", name);
                    let kind = if (seed >> (i % 64)) & 1 == 1 {
                        cache
                            .create_directory(&child, CreateDirectoryOptions::populate())
                            .unwrap();
                        FileType::Directory
                    } else {
                        cache
                            .write_file(&child, Vec::new(), WriteOptions::populate())
                            .unwrap();
                        FileType::File
                    };
                    expected.push((name.clone(), kind));
                }

                let root = cache.lookup_directory("/").unwrap();
                prop_assert_eq!(root.listing(), expected);
                prop_assert_eq!(root.entry_count, names.len() as u64);
                Ok(())
            },
        )
        .unwrap();
}

/// Resolution below an absent name is absent, never an error
#[test]
fn test_absent_prefix_is_absent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(vec(segment(), 1..4), vec(segment(), 1..4)),
            |(present, tail)| {
                let (cache, base) = nested(&present);
                let missing = path::join(&base, "__absent__");
                let deeper = tail.iter().fold(missing, |acc, seg| path::join(&acc, seg));
                prop_assert!(cache.try_lookup(&deeper).unwrap().is_none());
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    /// A virtual URI always maps back to the normalized tree path it was made from
    #[test]
    fn uri_round_trips_to_the_same_path(segments in vec(segment(), 0..6)) {
        let tree_path = path::normalize_path_string(&segments.join("/"));
        let parsed = uri::from_uri(&uri::to_uri(&tree_path)).unwrap();
        prop_assert_eq!(path::normalize_path_string(&parsed), tree_path);
    }

    /// Remote paths with or without `./` land on the same tree path
    #[test]
    fn remote_dot_prefix_is_ignored(segments in vec(segment(), 1..6)) {
        let relative = segments.join("/");
        prop_assert_eq!(
            path::normalize_remote_path(&format!("./{}", relative)),
            path::normalize_remote_path(&relative)
        );
    }
}
