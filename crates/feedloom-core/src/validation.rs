//! Response validation: turning untrusted JSON into typed records.
//!
//! A malformed identity is fatal to the load that fetched it. A malformed
//! operation is not: it is set aside as [`Rejected`] and the rest of the
//! snapshot is kept.

use serde_json::{Map, Value};

use crate::error::{CoreError, ValidationError};
use crate::operation::{Identity, LogCollection, Operation};
use crate::types::{AuthorKey, LogId, Timestamp};

/// An operation that failed validation, with its position in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// The log the operation was listed under.
    pub log_id: LogId,
    /// Index within that log's array.
    pub index: usize,
    /// Why it was rejected.
    pub reason: ValidationError,
}

/// A validated snapshot plus everything that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLogs {
    pub logs: LogCollection,
    pub rejected: Vec<Rejected>,
}

/// Validate the `whoami` response.
pub fn parse_identity(value: &Value) -> Result<Identity, CoreError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;
    let public_key = parse_key(obj)?;
    Ok(Identity::new(public_key))
}

/// Validate a single wire operation.
pub fn parse_operation(value: &Value) -> Result<Operation, ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

    let author_key = parse_key(obj)?;

    let timestamp = match obj.get("timestamp") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("timestamp")),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Timestamp::new)
            .ok_or_else(|| ValidationError::InvalidTimestamp(n.to_string()))?,
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "timestamp",
                expected: "a number",
            })
        }
    };

    let body = match obj.get("body") {
        None | Some(Value::Null) => return Err(ValidationError::MissingField("body")),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ValidationError::WrongType {
                field: "body",
                expected: "a string",
            })
        }
    };

    Ok(Operation {
        author_key,
        timestamp,
        body,
    })
}

/// Validate the `list posts` response.
///
/// The top level must be an object whose values are arrays; anything else is
/// a [`CoreError::MalformedResponse`]. Individual operations that fail
/// validation end up in [`ParsedLogs::rejected`].
pub fn parse_log_collection(value: &Value) -> Result<ParsedLogs, CoreError> {
    let obj = value.as_object().ok_or_else(|| {
        CoreError::MalformedResponse("log collection must be a JSON object".into())
    })?;

    let mut parsed = ParsedLogs::default();

    for (log_id, entries) in obj {
        let log_id = LogId::new(log_id.as_str());
        let entries = entries.as_array().ok_or_else(|| {
            CoreError::MalformedResponse(format!("log {log_id} must be a JSON array"))
        })?;

        let mut operations = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match parse_operation(entry) {
                Ok(op) => operations.push(op),
                Err(reason) => parsed.rejected.push(Rejected {
                    log_id: log_id.clone(),
                    index,
                    reason,
                }),
            }
        }
        parsed.logs.insert_log(log_id, operations);
    }

    Ok(parsed)
}

fn parse_key(obj: &Map<String, Value>) -> Result<AuthorKey, ValidationError> {
    match obj.get("public_key") {
        None | Some(Value::Null) => Err(ValidationError::MissingField("public_key")),
        Some(Value::String(s)) => AuthorKey::parse(s.as_str()).map_err(ValidationError::InvalidKey),
        Some(_) => Err(ValidationError::WrongType {
            field: "public_key",
            expected: "a hex string",
        }),
    }
}
