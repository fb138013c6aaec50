//! Repofs CLI Binary
//!
//! Command-line interface for browsing a hosted repository through the lazy tree cache.

use clap::Parser;
use repofs::cli::{map_error, Cli, RunContext};
use repofs::config::{ConfigLoader, RepoFsConfig};
use repofs::error::CliError;
use repofs::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config.logging);
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Repofs CLI starting");

    let context = match RunContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing provider: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let result = context
        .execute(&cli.command)
        .and_then(|output| {
            output
                .write_to(std::io::stdout().lock())
                .map_err(CliError::from)
        });
    match result {
        Ok(()) => info!("Command completed successfully"),
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Load layered configuration, then apply `--repo` and `--api-base`.
fn load_config(cli: &Cli) -> Result<RepoFsConfig, CliError> {
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)?,
        None => ConfigLoader::load(&cli.workspace)?,
    };

    if let Some(ref repo) = cli.repo {
        config.remote.repository_url = Some(repo.clone());
        // An explicit repository replaces any configured API base
        if cli.api_base.is_none() {
            config.remote.api_base = None;
        }
    }
    if let Some(ref api_base) = cli.api_base {
        config.remote.api_base = Some(api_base.clone());
    }

    Ok(config)
}

/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, base: &LoggingConfig) -> LoggingConfig {
    let mut config = base.clone();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }

    config
}
