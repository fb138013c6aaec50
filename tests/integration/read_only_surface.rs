//! Integration tests for kind checks and the gated mutation surface

use super::test_utils::{provider, sample_remote};
use repofs::types::{CreateDirectoryOptions, WriteOptions};
use repofs::{FileSystemProvider, FileType, FsError};

#[tokio::test]
async fn reading_a_directory_as_a_file_fails() {
    let (_remote, fs) = provider(sample_remote());

    let err = fs.read_file("/src").await.unwrap_err();

    assert_eq!(err, FsError::IsADirectory("/src".to_string()));
}

#[tokio::test]
async fn listing_a_file_fails() {
    let (remote, fs) = provider(sample_remote());

    let err = fs.read_directory("/a.txt").await.unwrap_err();

    assert_eq!(err, FsError::NotADirectory("/a.txt".to_string()));
    assert_eq!(remote.fetch_calls(), 0);
}

#[tokio::test]
async fn file_in_the_middle_of_a_path_fails() {
    let (_remote, fs) = provider(sample_remote());
    fs.read_directory("/").await.unwrap();

    assert!(matches!(
        fs.read_file("/a.txt/inner").await,
        Err(FsError::NotADirectory(_))
    ));
}

#[tokio::test]
async fn consumer_writes_are_refused() {
    let (_remote, fs) = provider(sample_remote());
    fs.read_directory("/").await.unwrap();

    let options = WriteOptions {
        create: true,
        overwrite: true,
        internal: false,
    };
    assert_eq!(
        fs.write_file("/a.txt", b"changed", options),
        Err(FsError::NoPermissions("/a.txt".to_string()))
    );
    assert_eq!(
        fs.create_directory("/new", CreateDirectoryOptions::default()),
        Err(FsError::NoPermissions("/new".to_string()))
    );
    assert_eq!(fs.read_file("/a.txt").await.unwrap(), b"hello".to_vec());
}

#[test]
fn rename_and_delete_are_always_refused() {
    let (_remote, fs) = provider(sample_remote());

    assert!(matches!(
        fs.rename("repofs:/a.txt", "repofs:/b.txt", true),
        Err(FsError::NoPermissions(_))
    ));
    assert!(matches!(
        fs.delete("repofs:/src", true),
        Err(FsError::NoPermissions(_))
    ));
}

#[tokio::test]
async fn internal_writes_populate_the_cache() {
    let (remote, fs) = provider(sample_remote());

    fs.create_directory("/notes", CreateDirectoryOptions::populate())
        .unwrap();
    fs.write_file("/notes/todo.md", b"- item", WriteOptions::populate())
        .unwrap();

    assert_eq!(
        fs.read_directory("/notes").await.unwrap(),
        vec![("todo.md".to_string(), FileType::File)]
    );
    assert_eq!(fs.read_file("/notes/todo.md").await.unwrap(), b"- item".to_vec());
    assert_eq!(remote.network_calls(), 0);
}

#[test]
fn internal_write_flags_are_honoured() {
    let (_remote, fs) = provider(sample_remote());
    fs.write_file("/f", b"1", WriteOptions::populate()).unwrap();

    let create_only = WriteOptions {
        create: true,
        overwrite: false,
        internal: true,
    };
    assert_eq!(
        fs.write_file("/f", b"2", create_only),
        Err(FsError::FileExists("/f".to_string()))
    );

    let update_only = WriteOptions {
        create: false,
        overwrite: true,
        internal: true,
    };
    assert_eq!(
        fs.write_file("/g", b"2", update_only),
        Err(FsError::NotFound("/g".to_string()))
    );

    fs.create_directory("/d", CreateDirectoryOptions::populate())
        .unwrap();
    assert_eq!(
        fs.write_file("/d", b"x", WriteOptions::populate()),
        Err(FsError::FileIsADirectory("/d".to_string()))
    );
    assert_eq!(
        fs.create_directory("/d", CreateDirectoryOptions::populate()),
        Err(FsError::FileExists("/d".to_string()))
    );
}

#[test]
fn writes_need_an_existing_parent() {
    let (_remote, fs) = provider(sample_remote());

    assert_eq!(
        fs.write_file("/nowhere/f", b"x", WriteOptions::populate()),
        Err(FsError::NotFound("/nowhere".to_string()))
    );
}
