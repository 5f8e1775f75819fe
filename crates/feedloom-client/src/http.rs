//! HTTP implementation of [`Backend`] against a running node.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use feedloom_core::{parse_identity, parse_log_collection, CoreError, Identity, ParsedLogs};

use crate::backend::Backend;
use crate::endpoint::{Endpoint, PostBody};
use crate::error::{ClientError, Result};

/// Talks to a node's `/id`, `/posts` and `/post` endpoints.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend for the node at `base_url` (e.g. `http://localhost:8000`).
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// The node's base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn get_json(&self, endpoint: Endpoint) -> Result<Value> {
        let url = self.url(endpoint);
        debug!(%endpoint, %url, "requesting");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;
        let response = check_status(endpoint, response)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Malformed {
            endpoint,
            source: CoreError::MalformedResponse(format!("invalid JSON: {e}")),
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn whoami(&self) -> Result<Identity> {
        let value = self.get_json(Endpoint::Whoami).await?;
        parse_identity(&value).map_err(|source| ClientError::Malformed {
            endpoint: Endpoint::Whoami,
            source,
        })
    }

    async fn list_posts(&self) -> Result<ParsedLogs> {
        let value = self.get_json(Endpoint::ListPosts).await?;
        let parsed = parse_log_collection(&value).map_err(|source| ClientError::Malformed {
            endpoint: Endpoint::ListPosts,
            source,
        })?;

        debug!(
            logs = parsed.logs.log_count(),
            operations = parsed.logs.total_operations(),
            rejected = parsed.rejected.len(),
            "snapshot received"
        );
        Ok(parsed)
    }

    async fn create_post(&self, body: &str) -> Result<()> {
        let endpoint = Endpoint::CreatePost;
        let url = self.url(endpoint);
        debug!(%endpoint, %url, body_len = body.len(), "submitting post");

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(&PostBody::new(body))
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        check_status(endpoint, response)?;
        Ok(())
    }
}

fn check_status(endpoint: Endpoint, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%endpoint, status = status.as_u16(), "node answered with an error status");
        Err(ClientError::Status {
            endpoint,
            status: status.as_u16(),
        })
    }
}

fn transport_error(endpoint: Endpoint, e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        warn!(%endpoint, "request timed out");
        ClientError::Timeout { endpoint }
    } else {
        warn!(%endpoint, error = %e, "request failed");
        ClientError::Network {
            endpoint,
            message: e.to_string(),
        }
    }
}
