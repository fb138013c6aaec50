//! Repository URL parsing and contents API base derivation

use crate::error::ConfigError;

/// Hosted repository coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RepositoryUrl {
    /// Parse `https://<host>/<owner>/<repo>[.git]` or `git@<host>:<owner>/<repo>[.git]`
    pub fn parse(url: &str) -> Result<Self, ConfigError> {
        let trimmed = url.trim();
        let (host, rest) = if let Some(rest) = trimmed.strip_prefix("git@") {
            rest.split_once(':')
                .ok_or_else(|| ConfigError::RepositoryUrl(url.to_string()))?
        } else {
            let rest = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"))
                .ok_or_else(|| ConfigError::RepositoryUrl(url.to_string()))?;
            rest.split_once('/')
                .ok_or_else(|| ConfigError::RepositoryUrl(url.to_string()))?
        };

        let mut parts = rest.split('/').filter(|part| !part.is_empty());
        let (Some(owner), Some(repo)) = (parts.next(), parts.next()) else {
            return Err(ConfigError::RepositoryUrl(url.to_string()));
        };
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if host.is_empty() || repo.is_empty() {
            return Err(ConfigError::RepositoryUrl(url.to_string()));
        }

        Ok(Self {
            host: host.to_ascii_lowercase(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Base URL of the contents API for this repository
    pub fn api_base(&self) -> String {
        match self.host.as_str() {
            "github.com" | "www.github.com" => {
                format!("https://api.github.com/repos/{}/{}", self.owner, self.repo)
            }
            host => format!("https://{}/api/v1/repos/{}/{}", host, self.owner, self.repo),
        }
    }
}
