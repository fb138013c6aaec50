//! Integration tests for CLI command routing over a scripted remote

use super::test_utils::{provider, sample_remote};
use repofs::cli::{Commands, CommandOutput, OutputFormat, RunContext};
use repofs::error::CliError;
use repofs::FsError;

fn context() -> RunContext {
    let (_remote, fs) = provider(sample_remote());
    RunContext::with_provider(fs).unwrap()
}

fn text(output: CommandOutput) -> String {
    match output {
        CommandOutput::Text(text) => text,
        CommandOutput::Bytes(bytes) => panic!("expected text, got {} bytes", bytes.len()),
    }
}

#[test]
fn ls_shows_entries_with_sizes() {
    let ctx = context();
    let output = ctx
        .execute(&Commands::Ls {
            path: "/".to_string(),
            format: OutputFormat::Text,
        })
        .unwrap();

    let text = text(output);
    assert!(text.contains("src/"));
    assert!(text.contains("a.txt"));
    assert!(text.contains("docs/"));
}

#[test]
fn ls_json_lists_in_remote_order() {
    let ctx = context();
    let output = ctx
        .execute(&Commands::Ls {
            path: "repofs:/".to_string(),
            format: OutputFormat::Json,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&text(output)).unwrap();
    let names: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["src", "a.txt", "docs"]);
}

#[test]
fn cat_returns_raw_bytes() {
    let ctx = context();
    let output = ctx
        .execute(&Commands::Cat {
            path: "a.txt".to_string(),
        })
        .unwrap();

    assert_eq!(output, CommandOutput::Bytes(b"hello".to_vec()));
}

#[test]
fn cat_of_a_directory_is_an_error() {
    let ctx = context();
    let err = ctx
        .execute(&Commands::Cat {
            path: "/src".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, CliError::Fs(FsError::IsADirectory(_))));
}

#[test]
fn stat_json_reports_kind() {
    let ctx = context();
    let output = ctx
        .execute(&Commands::Stat {
            path: "/src".to_string(),
            format: OutputFormat::Json,
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&text(output)).unwrap();
    assert_eq!(parsed["kind"], "Directory");
}

#[test]
fn tree_walks_lazily_and_respects_depth() {
    let ctx = context();

    let full = text(
        ctx.execute(&Commands::Tree {
            path: "/".to_string(),
            depth: None,
        })
        .unwrap(),
    );
    let src_at = full.find("  src/").unwrap();
    let lib_at = full.find("    lib.rs").unwrap();
    let txt_at = full.find("  a.txt").unwrap();
    assert!(src_at < lib_at && lib_at < txt_at);

    let shallow = text(
        ctx.execute(&Commands::Tree {
            path: "/".to_string(),
            depth: Some(1),
        })
        .unwrap(),
    );
    assert!(shallow.contains("src/"));
    assert!(!shallow.contains("lib.rs"));
}
