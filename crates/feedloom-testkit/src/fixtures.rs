//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use ed25519_dalek::SigningKey;

use feedloom_client::MemoryBackend;
use feedloom_core::{AuthorKey, Identity, LogCollection, LogId, Operation};

/// An author with a real Ed25519 key.
///
/// Nodes name authors by the hex encoding of their 32-byte public key, so
/// fixture keys are 64 hex characters.
pub struct TestAuthor {
    pub signing_key: SigningKey,
    pub key: AuthorKey,
}

impl TestAuthor {
    /// Create with a deterministic key from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(&seed))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let hex_key = hex::encode(signing_key.verifying_key().to_bytes());
        let key = AuthorKey::parse(hex_key).expect("hex-encoded public key is a valid author key");
        Self { signing_key, key }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.key.clone())
    }

    /// The log this author appends to. Nodes key logs by the author's key.
    pub fn log_id(&self) -> LogId {
        LogId::from(&self.key)
    }

    /// An operation by this author.
    pub fn op(&self, timestamp: u64, body: &str) -> Operation {
        Operation::new(self.key.clone(), timestamp, body)
    }
}

/// Create multiple authors for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestAuthor> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            TestAuthor::with_seed(seed)
        })
        .collect()
}

/// Build a snapshot where each author has one log holding `(timestamp, body)`
/// entries in the given order.
pub fn snapshot(entries: &[(&TestAuthor, Vec<(u64, &str)>)]) -> LogCollection {
    let mut logs = LogCollection::new();
    for (author, posts) in entries {
        let ops = posts.iter().map(|(ts, body)| author.op(*ts, body)).collect();
        logs.insert_log(author.log_id(), ops);
    }
    logs
}

/// The two-log scenario: the viewer `aaa111bbb222` posted "hi" at 100 and
/// `ccc333ddd444` posted "yo" at 50.
pub fn two_log_scenario() -> (Identity, LogCollection) {
    let me = AuthorKey::parse("aaa111bbb222").expect("valid key");
    let other = AuthorKey::parse("ccc333ddd444").expect("valid key");

    let mut logs = LogCollection::new();
    logs.append(LogId::new("log1"), Operation::new(me.clone(), 100, "hi"));
    logs.append(LogId::new("log2"), Operation::new(other, 50, "yo"));
    (Identity::new(me), logs)
}

/// A memory node serving `logs` to `viewer`. Posts made through it are
/// stamped from `start_time` upward.
pub async fn preloaded_backend(
    viewer: &Identity,
    logs: &LogCollection,
    start_time: u64,
) -> MemoryBackend {
    let backend = MemoryBackend::new(&viewer.public_key, start_time);
    for (log_id, ops) in logs.iter() {
        for op in ops {
            backend.push(log_id, op).await;
        }
    }
    backend
}
