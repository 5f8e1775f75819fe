//! Operations, identities and the multi-log snapshot.
//!
//! An operation is one posted entry. It belongs to the log of its author and
//! never moves between logs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{AuthorKey, LogId, Timestamp};

/// A single posted entry.
///
/// On the wire the author is sent as `public_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The public key of the authoring participant.
    #[serde(rename = "public_key")]
    pub author_key: AuthorKey,

    /// When the author's node created the entry. Not unique.
    pub timestamp: Timestamp,

    /// Free-form text, untrusted.
    pub body: String,
}

impl Operation {
    pub fn new(author_key: AuthorKey, timestamp: impl Into<Timestamp>, body: impl Into<String>) -> Self {
        Self {
            author_key,
            timestamp: timestamp.into(),
            body: body.into(),
        }
    }

    /// Whether this operation was written by `key`.
    pub fn is_authored_by(&self, key: &AuthorKey) -> bool {
        self.author_key == *key
    }
}

/// The viewer's own record, as returned by `whoami`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub public_key: AuthorKey,
}

impl Identity {
    pub fn new(public_key: AuthorKey) -> Self {
        Self { public_key }
    }
}

/// The server snapshot: log identifier -> operations in append order.
///
/// Backed by a `BTreeMap` so that iteration follows log-id order no matter
/// how the snapshot was assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogCollection {
    logs: BTreeMap<LogId, Vec<Operation>>,
}

impl LogCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation to the end of a log, creating the log if needed.
    pub fn append(&mut self, log_id: LogId, operation: Operation) {
        self.logs.entry(log_id).or_default().push(operation);
    }

    /// Replace a whole log.
    pub fn insert_log(&mut self, log_id: LogId, operations: Vec<Operation>) -> Option<Vec<Operation>> {
        self.logs.insert(log_id, operations)
    }

    /// Get one log's operations in append order.
    pub fn get(&self, log_id: &LogId) -> Option<&[Operation]> {
        self.logs.get(log_id).map(Vec::as_slice)
    }

    /// Iterate over logs in log-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&LogId, &[Operation])> {
        self.logs.iter().map(|(id, ops)| (id, ops.as_slice()))
    }

    /// Number of logs.
    pub fn log_count(&self) -> usize {
        self.logs.len()
    }

    /// Number of operations across all logs.
    pub fn total_operations(&self) -> usize {
        self.logs.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_operations() == 0
    }
}

impl FromIterator<(LogId, Vec<Operation>)> for LogCollection {
    fn from_iter<I: IntoIterator<Item = (LogId, Vec<Operation>)>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (log_id, operations) in iter {
            collection.logs.entry(log_id).or_default().extend(operations);
        }
        collection
    }
}
