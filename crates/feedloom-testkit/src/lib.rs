//! # Feedloom Testkit
//!
//! Testing utilities for Feedloom.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Keys with the avatar colors they must produce
//! - **Generators**: Proptest strategies for keys, operations and snapshots
//! - **Fixtures**: Authors with real Ed25519 keys and preloaded memory nodes
//!
//! ## Golden Vectors
//!
//! ```rust
//! use feedloom_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, fill, band) in verify_all_vectors() {
//!     assert!(matches, "{name}: {fill} / {band}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use feedloom_core::{is_time_ordered, merge_feed};
//! use feedloom_testkit::generators::log_collection;
//!
//! proptest! {
//!     #[test]
//!     fn merged_feed_is_ordered(logs in log_collection(4, 8)) {
//!         prop_assert!(is_time_ordered(&merge_feed(&logs)));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use feedloom_testkit::fixtures::{multi_party_fixtures, snapshot};
//!
//! let parties = multi_party_fixtures(2);
//! let logs = snapshot(&[
//!     (&parties[0], vec![(1, "first")]),
//!     (&parties[1], vec![(2, "second")]),
//! ]);
//! assert_eq!(logs.total_operations(), 2);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, preloaded_backend, snapshot, two_log_scenario, TestAuthor};
pub use generators::{log_collection, malformed_entry, operation, to_wire};
pub use vectors::{all_vectors, avatar_from_vector, verify_all_vectors, GoldenVector};
