//! Error types for the repofs lazy repository tree.

use thiserror::Error;

/// File-access errors surfaced to the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("No such file or directory: {0}")]
    NotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Is a directory: {0}")]
    IsADirectory(String),

    #[error("Cannot write file, target is a directory: {0}")]
    FileIsADirectory(String),

    #[error("File exists: {0}")]
    FileExists(String),

    #[error("Operation not permitted on read-only repository: {0}")]
    NoPermissions(String),

    #[error("Remote repository unavailable: {0}")]
    RemoteUnavailable(String),
}

impl FsError {
    /// Short host-facing error code, mirroring the taxonomy names.
    pub fn code(&self) -> &'static str {
        match self {
            FsError::NotFound(_) => "FileNotFound",
            FsError::NotADirectory(_) => "FileNotADirectory",
            FsError::IsADirectory(_) => "FileIsADirectory",
            FsError::FileIsADirectory(_) => "FileIsADirectory",
            FsError::FileExists(_) => "FileExists",
            FsError::NoPermissions(_) => "NoPermissions",
            FsError::RemoteUnavailable(_) => "Unavailable",
        }
    }
}

/// Contents API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode contents listing: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Upstream text to show the user: the response body when there is one.
    pub fn message(&self) -> String {
        match self {
            RemoteError::Status { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

impl From<RemoteError> for FsError {
    fn from(err: RemoteError) -> Self {
        FsError::RemoteUnavailable(err.message())
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteError::Http(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            RemoteError::Http(format!("Connection error: {}", err))
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Http(err.to_string())
        }
    }
}

/// Configuration, logging and repository URL errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Invalid repository URL: {0}")]
    RepositoryUrl(String),

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Errors surfaced by the `repofs` command line
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}: {0}", .0.code())]
    Fs(#[from] FsError),

    #[error("Invalid configuration:\n{0}")]
    Validation(String),

    #[error("Failed to start async runtime: {0}")]
    Runtime(String),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
