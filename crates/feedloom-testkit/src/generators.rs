//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use feedloom_core::{AuthorKey, LogCollection, LogId, Operation, Timestamp};

/// Generate a valid author key, mixed case, 12 to 64 hex characters.
pub fn author_key() -> impl Strategy<Value = AuthorKey> {
    "[0-9a-fA-F]{12,64}".prop_filter_map("valid author key", |s| AuthorKey::parse(s).ok())
}

/// Generate a string that is never a valid author key.
pub fn invalid_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9a-f]{0,11}",
        "[0-9a-f]{6}[g-z][0-9a-f]{6,20}",
    ]
}

/// Generate a reasonable timestamp, in epoch seconds.
pub fn timestamp() -> impl Strategy<Value = Timestamp> {
    (0u64..=4_000_000_000).prop_map(Timestamp)
}

/// Generate a timestamp from a tiny range, so ties are common.
pub fn clustered_timestamp() -> impl Strategy<Value = Timestamp> {
    (0u64..8).prop_map(Timestamp)
}

/// Generate a post body, including markup and the empty body.
pub fn body() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ -~]{1,60}",
        "<[a-z]{1,6}>[^<]{0,20}</[a-z]{1,6}>",
    ]
}

/// Generate a log id.
pub fn log_id() -> impl Strategy<Value = LogId> {
    "log-[a-z0-9]{1,8}".prop_map(LogId::new)
}

/// Generate an operation with timestamps drawn from `ts`.
pub fn operation_with(
    ts: impl Strategy<Value = Timestamp>,
) -> impl Strategy<Value = Operation> {
    (author_key(), ts, body()).prop_map(|(key, ts, body)| Operation::new(key, ts, body))
}

/// Generate an operation.
pub fn operation() -> impl Strategy<Value = Operation> {
    operation_with(timestamp())
}

/// Generate a snapshot of up to `max_logs` logs with up to `max_ops` each.
///
/// Timestamps are clustered so merges see plenty of ties.
pub fn log_collection(max_logs: usize, max_ops: usize) -> impl Strategy<Value = LogCollection> {
    prop::collection::btree_map(
        log_id(),
        prop::collection::vec(operation_with(clustered_timestamp()), 0..=max_ops),
        0..=max_logs,
    )
    .prop_map(|logs| logs.into_iter().collect())
}

/// Generate a JSON entry that validation must reject.
pub fn malformed_entry() -> impl Strategy<Value = Value> {
    let key = "[0-9a-f]{12,24}";
    prop_oneof![
        (key, body()).prop_map(|(k, b)| json!({ "public_key": k, "body": b })),
        (timestamp(), body()).prop_map(|(t, b)| json!({ "timestamp": t.value(), "body": b })),
        (key, timestamp()).prop_map(|(k, t)| json!({ "public_key": k, "timestamp": t.value() })),
        (key, body()).prop_map(|(k, b)| json!({ "public_key": k, "timestamp": "soon", "body": b })),
        (key, body()).prop_map(|(k, b)| json!({ "public_key": k, "timestamp": -1, "body": b })),
        (key, body()).prop_map(|(k, b)| json!({ "public_key": k, "timestamp": 1.5, "body": b })),
        (invalid_key(), timestamp(), body())
            .prop_map(|(k, t, b)| json!({ "public_key": k, "timestamp": t.value(), "body": b })),
        any::<i64>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// The wire form of an operation, as a node sends it.
pub fn to_wire(op: &Operation) -> Value {
    json!({
        "public_key": op.author_key.as_str(),
        "timestamp": op.timestamp.value(),
        "body": op.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedloom_core::{parse_log_collection, parse_operation};

    proptest! {
        #[test]
        fn test_generated_operations_validate(op in operation()) {
            prop_assert_eq!(parse_operation(&to_wire(&op)), Ok(op));
        }

        #[test]
        fn test_invalid_keys_never_parse(s in invalid_key()) {
            prop_assert!(AuthorKey::parse(s).is_err());
        }

        #[test]
        fn test_malformed_entries_are_skipped_not_fatal(
            good in prop::collection::vec(operation(), 0..5),
            bad in prop::collection::vec(malformed_entry(), 1..5),
        ) {
            let mut entries: Vec<Value> = good.iter().map(to_wire).collect();
            entries.extend(bad.iter().cloned());
            let snapshot = json!({ "log-a": entries });

            let parsed = parse_log_collection(&snapshot).unwrap();
            prop_assert_eq!(parsed.rejected.len(), bad.len());
            prop_assert_eq!(parsed.logs.total_operations(), good.len());
        }
    }
}
