//! # Feedloom Core
//!
//! Pure primitives for Feedloom: operations, log collections, the feed merge,
//! and key-derived avatars.
//!
//! This crate contains no I/O and no networking. Everything here is a pure
//! function of its input.
//!
//! ## Key Types
//!
//! - [`Operation`] - One posted entry (author key, timestamp, body)
//! - [`LogCollection`] - The server snapshot: log id -> operations
//! - [`Identity`] - The viewer's own public key
//! - [`Avatar`] - Deterministic two-tone square derived from a key
//!
//! ## Merging
//!
//! [`merge_feed`] flattens every log and sorts the result by timestamp with a
//! stable sort. See the [`merge`] module.

pub mod avatar;
pub mod error;
pub mod merge;
pub mod operation;
pub mod types;
pub mod validation;

pub use avatar::{Avatar, Rgb, AVATAR_SIZE_PX};
pub use error::{CoreError, ValidationError};
pub use merge::{is_time_ordered, merge_feed, merge_logs};
pub use operation::{Identity, LogCollection, Operation};
pub use types::{AuthorKey, LogId, Timestamp, MIN_KEY_LEN, SHORT_KEY_LEN};
pub use validation::{parse_identity, parse_log_collection, parse_operation, ParsedLogs, Rejected};
