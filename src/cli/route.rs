//! CLI route: owns the provider and the async runtime, dispatches commands.

use crate::cli::output::{
    format_listing_json, format_listing_text, format_stat_json, format_stat_text, format_tree,
    CommandOutput, ListingRow, TreeLine,
};
use crate::cli::parse::{Commands, OutputFormat};
use crate::config::RepoFsConfig;
use crate::error::CliError;
use crate::provider::{FileSystemProvider, RepoFileSystem};
use crate::tree::path;
use crate::types::FileType;
use crate::uri;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// CLI context: a provider plus the runtime its futures are driven on.
pub struct RunContext {
    fs: RepoFileSystem,
    runtime: Runtime,
}

impl RunContext {
    /// Validate `config` and connect a provider to the configured contents API.
    pub fn new(config: RepoFsConfig) -> Result<Self, CliError> {
        if let Err(errors) = config.validate() {
            let msg = errors
                .iter()
                .map(|e| format!("  - {}", e))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CliError::Validation(msg));
        }

        let runtime = build_runtime()?;
        let fs = {
            let _guard = runtime.enter();
            RepoFileSystem::from_config(&config)?
        };
        info!(api_base = %config.api_base()?, "Run context ready");
        Ok(Self { fs, runtime })
    }

    /// Wrap an already constructed provider
    pub fn with_provider(fs: RepoFileSystem) -> Result<Self, CliError> {
        Ok(Self {
            fs,
            runtime: build_runtime()?,
        })
    }

    pub fn provider(&self) -> &RepoFileSystem {
        &self.fs
    }

    /// Execute a CLI command, blocking until it completes.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, CliError> {
        self.runtime.block_on(self.execute_inner(command))
    }

    async fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, CliError> {
        match command {
            Commands::Ls { path, format } => self.handle_ls(path, *format).await,
            Commands::Cat { path } => self.handle_cat(path).await,
            Commands::Stat { path, format } => self.handle_stat(path, *format).await,
            Commands::Tree { path, depth } => self.handle_tree(path, *depth).await,
        }
    }

    async fn handle_ls(&self, target: &str, format: OutputFormat) -> Result<CommandOutput, CliError> {
        let dir = uri::from_uri(target)?;
        let entries = self.fs.read_directory(&dir).await?;

        let mut rows = Vec::with_capacity(entries.len());
        for (name, kind) in entries {
            let size = self.fs.stat(&path::join(&dir, &name)).await?.size;
            rows.push(ListingRow { name, kind, size });
        }

        let text = match format {
            OutputFormat::Text => format_listing_text(&dir, &rows),
            OutputFormat::Json => format_listing_json(&rows)?,
        };
        Ok(CommandOutput::Text(text))
    }

    async fn handle_cat(&self, target: &str) -> Result<CommandOutput, CliError> {
        let content = self.fs.read_file(target).await?;
        debug!(path = target, bytes = content.len(), "File read");
        Ok(CommandOutput::Bytes(content))
    }

    async fn handle_stat(&self, target: &str, format: OutputFormat) -> Result<CommandOutput, CliError> {
        let path = uri::from_uri(target)?;
        let stat = self.fs.stat(&path).await?;
        let text = match format {
            OutputFormat::Text => format_stat_text(&path, &stat),
            OutputFormat::Json => format_stat_json(&stat)?,
        };
        Ok(CommandOutput::Text(text))
    }

    /// Depth-first walk, listing each directory only when it is reached.
    async fn handle_tree(&self, target: &str, max_depth: Option<usize>) -> Result<CommandOutput, CliError> {
        let root = uri::from_uri(target)?;
        let mut lines = Vec::new();
        let mut stack = vec![(root.clone(), 0usize)];

        while let Some((dir, depth)) = stack.pop() {
            let entries = self.fs.read_directory(&dir).await?;
            let child_depth = depth + 1;
            let mut subdirs = Vec::new();
            let mut block = Vec::with_capacity(entries.len());

            for (name, kind) in entries {
                if kind == FileType::Directory && max_depth.map_or(true, |max| child_depth < max) {
                    subdirs.push(path::join(&dir, &name));
                }
                block.push(TreeLine {
                    depth: child_depth,
                    name,
                    kind,
                });
            }

            // Pre-order: splice this directory's block right after its own line
            let insert_at = lines
                .iter()
                .position(|line: &(String, TreeLine)| line.0 == dir)
                .map_or(lines.len(), |i| i + 1);
            let block: Vec<(String, TreeLine)> = block
                .into_iter()
                .map(|line| (path::join(&dir, &line.name), line))
                .collect();
            lines.splice(insert_at..insert_at, block);

            for subdir in subdirs.into_iter().rev() {
                stack.push((subdir, child_depth));
            }
        }

        let lines: Vec<TreeLine> = lines.into_iter().map(|(_, line)| line).collect();
        Ok(CommandOutput::Text(format_tree(&root, &lines)))
    }
}

fn build_runtime() -> Result<Runtime, CliError> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))
}
