//! HTTP contents API client

use crate::error::RemoteError;
use crate::remote::{RemoteItem, RemoteItemKind, RemoteLoader};
use crate::tree::path;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// HTTP settings for the contents API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Repository URL the API base is derived from
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Explicit API base, overrides derivation from `repository_url`
    #[serde(default)]
    pub api_base: Option<String>,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout; unset means a slow remote call is waited on indefinitely
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_user_agent() -> String {
    format!("repofs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            repository_url: None,
            api_base: None,
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

fn build_http_client(config: &RemoteConfig) -> Result<Client, RemoteError> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| RemoteError::Http(format!("Failed to create HTTP client: {}", e)))
}

/// Contents API loader: `GET {api_base}/contents/{path}` and `GET {download_url}`
pub struct HttpRemoteLoader {
    client: Client,
    api_base: Url,
}

impl HttpRemoteLoader {
    pub fn new(api_base: impl Into<String>, config: &RemoteConfig) -> Result<Self, RemoteError> {
        let raw = api_base.into();
        let api_base = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| RemoteError::Http(format!("Invalid API base {}: {}", raw, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(RemoteError::Http(format!("Invalid API base {}", raw)));
        }
        Ok(Self {
            client: build_http_client(config)?,
            api_base,
        })
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// Contents URL for a tree path; the root lists `{api_base}/contents/`.
    ///
    /// Each tree segment is percent-encoded, so `#`, `?` and `%` stay part of the path.
    pub fn contents_url(&self, base_path: &str) -> Result<Url, RemoteError> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RemoteError::Http(format!("Invalid API base {}", self.api_base))
            })?;
            segments.pop_if_empty().push("contents");
            if path::segments(base_path).next().is_none() {
                segments.push("");
            } else {
                segments.extend(path::segments(base_path));
            }
        }
        Ok(url)
    }

    async fn get(&self, url: &str) -> Result<Response, RemoteError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl RemoteLoader for HttpRemoteLoader {
    #[instrument(skip(self), fields(api_base = %self.api_base))]
    async fn list_children(&self, base_path: &str) -> Result<Vec<RemoteItem>, RemoteError> {
        let url = self.contents_url(base_path)?;
        info!(url = %url, "Listing remote directory");

        let body = self.get(url.as_str()).await?.text().await?;
        let items = parse_listing(&body)?;
        debug!(items = items.len(), "Remote listing decoded");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn fetch_content(&self, download_url: &str) -> Result<Vec<u8>, RemoteError> {
        info!("Fetching remote file content");
        let bytes = self.get(download_url).await?.bytes().await?;
        debug!(bytes = bytes.len(), "Remote content fetched");
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Decode a contents listing, dropping items with no tree representation
pub fn parse_listing(body: &str) -> Result<Vec<RemoteItem>, RemoteError> {
    let items: Vec<RemoteItem> = serde_json::from_str(body)
        .map_err(|e| RemoteError::Decode(format!("expected a JSON array of items: {}", e)))?;
    Ok(items
        .into_iter()
        .filter(|item| {
            let keep = item.kind != RemoteItemKind::Other;
            if !keep {
                debug!(path = %item.path, "Skipping unsupported contents item");
            }
            keep
        })
        .collect())
}
