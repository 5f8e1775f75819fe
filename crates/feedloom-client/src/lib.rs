//! # Feedloom Client
//!
//! The collaborator seam between the feed viewer and a node.
//!
//! ## Overview
//!
//! A node exposes three endpoints that the viewer consumes but does not
//! implement:
//!
//! ```text
//! GET  /id     -> { "public_key": "<hex>" }
//! GET  /posts  -> { "<log id>": [ { "public_key", "timestamp", "body" }, ... ] }
//! POST /post   <- { "body": "<text>" }
//! ```
//!
//! [`Backend`] abstracts them. [`HttpBackend`] speaks HTTP through `reqwest`;
//! [`MemoryBackend`] keeps everything in memory and can inject faults, for
//! tests.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use feedloom_client::{Backend, HttpBackend};
//!
//! async fn example() {
//!     let backend = HttpBackend::new("http://localhost:8000", Duration::from_secs(10)).unwrap();
//!     let identity = backend.whoami().await.unwrap();
//!     let snapshot = backend.list_posts().await.unwrap();
//!     println!("{} sees {} posts", identity.public_key, snapshot.logs.total_operations());
//! }
//! ```

pub mod backend;
pub mod endpoint;
pub mod error;
pub mod http;

pub use backend::{memory::Fault, memory::MemoryBackend, Backend};
pub use endpoint::{Endpoint, PostBody};
pub use error::{ClientError, Result};
pub use http::HttpBackend;
