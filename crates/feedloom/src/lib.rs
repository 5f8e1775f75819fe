//! # Feedloom
//!
//! A feed viewer for a node that keeps one append-only log per author.
//!
//! ## Overview
//!
//! Each load cycle:
//!
//! - asks the node who the viewer is (`GET /id`) and for every log (`GET /posts`)
//! - merges all logs into one feed, oldest first
//! - annotates each entry with a key-derived avatar and a self marker
//! - replaces whatever the [`Surface`] showed before
//!
//! Posting (`POST /post`) is followed by a fresh load, never by a local
//! insert.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use feedloom::{Aggregator, FeedConfig, TerminalSurface};
//! use feedloom::client::HttpBackend;
//!
//! async fn example() {
//!     let config = FeedConfig::default();
//!     let backend = HttpBackend::new("http://localhost:8000", config.request_timeout).unwrap();
//!     let aggregator = Aggregator::new(backend, TerminalSurface::new(true), config);
//!
//!     let report = aggregator.load().await.unwrap();
//!     println!("{} entries", report.rendered());
//!
//!     aggregator.submit_post("hello").await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `feedloom::core` - Operations, keys, merging and avatars
//! - `feedloom::client` - The node backend seam and its HTTP implementation

pub mod aggregator;
pub mod config;
pub mod error;
pub mod html;
pub mod logging;
pub mod record;
pub mod surface;
pub mod text;

pub use feedloom_client as client;
pub use feedloom_core as core;

pub use aggregator::{Aggregator, LoadPhase, LoadReport, SubmitPhase, SubmitReport};
pub use config::{FeedConfig, TimestampUnit};
pub use error::{FailureKind, FeedError, Result};
pub use record::{build_view, DisplayRecord, FeedView};
pub use surface::{HtmlFileSurface, MemorySurface, Shown, Surface, TerminalSurface};

pub use feedloom_core::{AuthorKey, Avatar, Identity, LogCollection, LogId, Operation, Timestamp};
