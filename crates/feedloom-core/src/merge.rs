//! Feed merge: flatten every log and order the result by timestamp.
//!
//! The merge is a pure function of its input. Sorting is stable, so
//! operations with equal timestamps keep the order in which they were
//! flattened, and repeated merges of the same snapshot are identical.

use crate::operation::{LogCollection, Operation};

/// Merge a snapshot into one feed, ascending by timestamp.
///
/// Logs are flattened in log-id order, which [`LogCollection`] fixes
/// whatever order the logs were inserted or served in, so ties between logs
/// always resolve the same way. Nothing is deduplicated.
pub fn merge_feed(logs: &LogCollection) -> Vec<Operation> {
    merge_logs(logs.iter().map(|(_, ops)| ops))
}

/// Merge logs given in an explicit flattening order.
pub fn merge_logs<'a, I>(logs: I) -> Vec<Operation>
where
    I: IntoIterator<Item = &'a [Operation]>,
{
    let mut feed: Vec<Operation> = logs.into_iter().flatten().cloned().collect();
    // `sort_by_key` is a stable sort.
    feed.sort_by_key(|op| op.timestamp);
    feed
}

/// Check that a feed is in non-decreasing timestamp order.
pub fn is_time_ordered(feed: &[Operation]) -> bool {
    feed.windows(2).all(|w| w[0].timestamp <= w[1].timestamp)
}
