//! Strong type definitions for Feedloom.
//!
//! Keys, log identifiers and timestamps are newtypes so they cannot be mixed
//! up with free-form strings and numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Minimum number of hex characters a key must carry to be renderable.
///
/// Characters `[0, 6)` and `[6, 12)` each encode one avatar color.
pub const MIN_KEY_LEN: usize = 12;

/// Number of key characters shown next to a post.
pub const SHORT_KEY_LEN: usize = 9;

/// The public key of a participant, as the hex string the server sends.
///
/// Case is preserved verbatim and equality is exact string equality, so a
/// key only matches the identity when the server spells it the same way.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorKey(String);

impl AuthorKey {
    /// Parse a key, requiring at least [`MIN_KEY_LEN`] ASCII hex digits.
    pub fn parse(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if let Some((position, found)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(CoreError::NonHexKey { position, found });
        }
        if s.len() < MIN_KEY_LEN {
            return Err(CoreError::InvalidKeyFormat {
                min: MIN_KEY_LEN,
                len: s.len(),
            });
        }
        Ok(Self(s))
    }

    /// The full key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first [`SHORT_KEY_LEN`] characters, for display.
    pub fn short(&self) -> &str {
        // Keys are ASCII, so byte slicing is on char boundaries.
        &self.0[..SHORT_KEY_LEN.min(self.0.len())]
    }
}

impl fmt::Debug for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorKey({})", self.short())
    }
}

impl fmt::Display for AuthorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AuthorKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthorKey {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for AuthorKey {
    type Error = CoreError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<AuthorKey> for String {
    fn from(key: AuthorKey) -> Self {
        key.0
    }
}

/// Identifier of a single log in the server snapshot.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(pub String);

impl LogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogId({})", self.0)
    }
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&AuthorKey> for LogId {
    fn from(key: &AuthorKey) -> Self {
        Self(key.as_str().to_string())
    }
}

/// An epoch timestamp as written by the author's node.
///
/// The unit (seconds or milliseconds) is a presentation concern; ordering
/// only needs the integer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_key_accepts_twelve_hex_chars() {
        let key = AuthorKey::parse("aaa111bbb222").unwrap();
        assert_eq!(key.as_str(), "aaa111bbb222");
        assert_eq!(key.short(), "aaa111bbb");
    }

    #[test]
    fn test_author_key_rejects_short_keys() {
        let err = AuthorKey::parse("abc123").unwrap_err();
        assert_eq!(err, CoreError::InvalidKeyFormat { min: 12, len: 6 });
    }

    #[test]
    fn test_author_key_rejects_non_hex() {
        let err = AuthorKey::parse("aaa111bbb22z").unwrap_err();
        assert_eq!(
            err,
            CoreError::NonHexKey {
                position: 11,
                found: 'z'
            }
        );
    }

    #[test]
    fn test_author_key_preserves_case() {
        let upper = AuthorKey::parse("AAA111BBB222").unwrap();
        let lower = AuthorKey::parse("aaa111bbb222").unwrap();
        assert_ne!(upper, lower);
        assert_eq!(upper.to_string(), "AAA111BBB222");
    }

    #[test]
    fn test_author_key_serde_rejects_short_key() {
        let result: Result<AuthorKey, _> = serde_json::from_str("\"abc\"");
        assert!(result.is_err());

        let key: AuthorKey = serde_json::from_str("\"0123456789abcdef\"").unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"0123456789abcdef\"");
    }

    #[test]
    fn test_author_key_debug() {
        let key = AuthorKey::parse("0123456789abcdef").unwrap();
        assert_eq!(format!("{:?}", key), "AuthorKey(012345678)");
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp::new(50) < Timestamp::new(100));
        assert_eq!(Timestamp::from(7).value(), 7);
    }
}
