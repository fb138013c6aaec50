//! Integration tests for layered configuration and binary start-up failures

use repofs::config::ConfigLoader;
use std::fs;
use std::process::Command;
use std::sync::Mutex;
use tempfile::TempDir;

// Serializes tests that change XDG_CONFIG_HOME
static XDG_CONFIG_MUTEX: Mutex<()> = Mutex::new(());

fn write(path: &std::path::Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let _guard = XDG_CONFIG_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original_xdg_config = std::env::var("XDG_CONFIG_HOME").ok();

    let temp = TempDir::new().unwrap();
    let config_home = temp.path().join("xdg");
    let workspace = temp.path().join("ws");
    std::env::set_var("XDG_CONFIG_HOME", &config_home);

    write(
        &config_home.join("repofs").join("config.toml"),
        "[remote]\nrepository_url = \"https://github.com/global/repo\"\n\n[notifier]\ndebounce_ms = 50\n",
    );
    assert_eq!(
        ConfigLoader::global_config_path().unwrap(),
        config_home.join("repofs").join("config.toml")
    );

    let config = ConfigLoader::load(&workspace).unwrap();
    assert_eq!(
        config.api_base().unwrap(),
        "https://api.github.com/repos/global/repo"
    );

    write(
        &workspace.join("config").join("config.toml"),
        "[remote]\nrepository_url = \"https://git.example.org/team/project.git\"\n",
    );
    let config = ConfigLoader::load(&workspace).unwrap();
    assert_eq!(
        config.api_base().unwrap(),
        "https://git.example.org/api/v1/repos/team/project"
    );
    // Untouched keys keep the global value
    assert_eq!(config.notifier.debounce_ms, 50);

    match original_xdg_config {
        Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
}

#[test]
fn test_binary_without_remote_exits_with_error() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_repofs"))
        .args(["--workspace", temp.path().to_str().unwrap(), "--quiet", "ls"])
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env_remove("REPOFS_REMOTE__REPOSITORY_URL")
        .env_remove("REPOFS_REMOTE__API_BASE")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("repository_url or api_base"), "stderr: {}", stderr);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_rejects_malformed_repository_url() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_repofs"))
        .args([
            "--workspace",
            temp.path().to_str().unwrap(),
            "--quiet",
            "--repo",
            "not a url",
            "ls",
        ])
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid repository URL"));
}
