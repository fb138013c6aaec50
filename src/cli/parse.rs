//! CLI parse: clap types for repofs. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// repofs - browse a hosted repository without cloning it
#[derive(Parser)]
#[command(name = "repofs")]
#[command(about = "Lazily browse a hosted source repository through its contents API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Repository URL (e.g. https://github.com/owner/repo)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Contents API base URL (overrides derivation from --repo)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Workspace root directory used to find config/config.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Output format for listing and metadata commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List a directory
    Ls {
        /// Directory path or repofs: URI
        #[arg(default_value = "/")]
        path: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print a file's content
    Cat {
        /// File path or repofs: URI
        path: String,
    },
    /// Show metadata for a path
    Stat {
        path: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Walk a directory recursively, listing each level on demand
    Tree {
        #[arg(default_value = "/")]
        path: String,
        /// Maximum depth below the starting directory
        #[arg(long)]
        depth: Option<usize>,
    },
}
