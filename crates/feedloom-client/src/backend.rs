//! Backend abstraction for the node's collaborator endpoints.
//!
//! The aggregator never talks HTTP directly. It goes through [`Backend`],
//! implemented over HTTP by [`crate::HttpBackend`] and in memory by
//! [`memory::MemoryBackend`].

use std::sync::Arc;

use async_trait::async_trait;

use feedloom_core::{Identity, ParsedLogs};

use crate::error::Result;

/// The three collaborator calls the feed viewer depends on.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Backend: Send + Sync {
    /// `whoami`: the viewer's own identity.
    async fn whoami(&self) -> Result<Identity>;

    /// `list posts`: the full multi-log snapshot.
    ///
    /// Operations that fail validation are returned in
    /// [`ParsedLogs::rejected`] rather than failing the call.
    async fn list_posts(&self) -> Result<ParsedLogs>;

    /// `create post`: publish a new entry in the viewer's own log.
    async fn create_post(&self, body: &str) -> Result<()>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn whoami(&self) -> Result<Identity> {
        (**self).whoami().await
    }

    async fn list_posts(&self) -> Result<ParsedLogs> {
        (**self).list_posts().await
    }

    async fn create_post(&self, body: &str) -> Result<()> {
        (**self).create_post(body).await
    }
}

/// An in-memory node for tests and demos.
///
/// Keeps the snapshot as raw JSON and runs it through the same validation as
/// the HTTP backend, so malformed entries can be injected directly.
pub mod memory {
    use super::*;
    use std::collections::HashMap;

    use feedloom_core::{parse_identity, parse_log_collection, AuthorKey, LogId, Operation};
    use serde_json::{json, Map, Value};
    use tokio::sync::RwLock;

    use crate::endpoint::Endpoint;
    use crate::error::ClientError;

    /// How an endpoint should misbehave.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Fault {
        /// Fail as if the connection was refused.
        Unreachable,
        /// Answer with the given non-2xx status.
        Status(u16),
        /// Never answer.
        Stall,
    }

    struct Inner {
        identity: Value,
        posts: Map<String, Value>,
        clock: u64,
        faults: HashMap<Endpoint, Fault>,
        calls: HashMap<Endpoint, usize>,
    }

    /// In-memory backend implementation.
    pub struct MemoryBackend {
        inner: RwLock<Inner>,
    }

    impl MemoryBackend {
        /// Create a node whose own identity is `public_key`.
        ///
        /// Posts created through [`Backend::create_post`] are timestamped
        /// from `start_time`, one tick apart.
        pub fn new(public_key: &AuthorKey, start_time: u64) -> Self {
            Self {
                inner: RwLock::new(Inner {
                    identity: json!({ "public_key": public_key.as_str() }),
                    posts: Map::new(),
                    clock: start_time,
                    faults: HashMap::new(),
                    calls: HashMap::new(),
                }),
            }
        }

        /// Replace the raw `whoami` response.
        pub async fn set_identity_raw(&self, identity: Value) {
            self.inner.write().await.identity = identity;
        }

        /// Append a well-formed operation to a log.
        pub async fn push(&self, log_id: &LogId, operation: &Operation) {
            let value = json!({
                "public_key": operation.author_key.as_str(),
                "timestamp": operation.timestamp.value(),
                "body": operation.body,
            });
            self.push_raw(log_id, value).await;
        }

        /// Append an arbitrary JSON entry to a log.
        pub async fn push_raw(&self, log_id: &LogId, entry: Value) {
            let mut inner = self.inner.write().await;
            let log = inner
                .posts
                .entry(log_id.as_str().to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(entries) = log {
                entries.push(entry);
            }
        }

        /// Make `endpoint` misbehave until cleared.
        pub async fn set_fault(&self, endpoint: Endpoint, fault: Fault) {
            self.inner.write().await.faults.insert(endpoint, fault);
        }

        /// Restore normal behavior on every endpoint.
        pub async fn clear_faults(&self) {
            self.inner.write().await.faults.clear();
        }

        /// How many times `endpoint` has been called.
        pub async fn calls(&self, endpoint: Endpoint) -> usize {
            self.inner.read().await.calls.get(&endpoint).copied().unwrap_or(0)
        }

        /// Count the call and apply any configured fault.
        async fn enter(&self, endpoint: Endpoint) -> Result<()> {
            let fault = {
                let mut inner = self.inner.write().await;
                *inner.calls.entry(endpoint).or_insert(0) += 1;
                inner.faults.get(&endpoint).copied()
            };

            match fault {
                None => Ok(()),
                Some(Fault::Unreachable) => Err(ClientError::Network {
                    endpoint,
                    message: "connection refused".into(),
                }),
                Some(Fault::Status(status)) => Err(ClientError::Status { endpoint, status }),
                Some(Fault::Stall) => std::future::pending().await,
            }
        }
    }

    #[async_trait]
    impl Backend for MemoryBackend {
        async fn whoami(&self) -> Result<Identity> {
            self.enter(Endpoint::Whoami).await?;
            let inner = self.inner.read().await;
            parse_identity(&inner.identity).map_err(|source| ClientError::Malformed {
                endpoint: Endpoint::Whoami,
                source,
            })
        }

        async fn list_posts(&self) -> Result<ParsedLogs> {
            self.enter(Endpoint::ListPosts).await?;
            let inner = self.inner.read().await;
            parse_log_collection(&Value::Object(inner.posts.clone())).map_err(|source| {
                ClientError::Malformed {
                    endpoint: Endpoint::ListPosts,
                    source,
                }
            })
        }

        async fn create_post(&self, body: &str) -> Result<()> {
            self.enter(Endpoint::CreatePost).await?;
            let mut inner = self.inner.write().await;

            let public_key = inner
                .identity
                .get("public_key")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(ClientError::Status {
                    endpoint: Endpoint::CreatePost,
                    status: 500,
                })?;

            let timestamp = inner.clock;
            inner.clock += 1;

            let log = inner
                .posts
                .entry(public_key.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(entries) = log {
                entries.push(json!({
                    "public_key": public_key,
                    "timestamp": timestamp,
                    "body": body,
                }));
            }
            Ok(())
        }
    }
}
