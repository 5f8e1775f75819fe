//! Display records: the structured form of a rendered feed.
//!
//! Building records is separate from turning them into markup, so the
//! merge-and-annotate logic can be tested without any presentation surface.

use feedloom_core::{AuthorKey, Avatar, Identity, Operation, Timestamp};

use crate::config::FeedConfig;

/// One feed entry, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Avatar derived from the author's key.
    pub avatar: Avatar,
    /// The full author key.
    pub author_key: AuthorKey,
    /// The first nine characters of the author key.
    pub short_key: String,
    /// Whether the viewer wrote this entry.
    pub is_self: bool,
    /// The raw timestamp.
    pub timestamp: Timestamp,
    /// Human-readable timestamp.
    pub posted_at: String,
    /// The body, verbatim. Escape before embedding.
    pub body: String,
}

/// A complete rendered feed for one load cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub identity: Identity,
    /// The viewer's own avatar, for the identity placeholders.
    pub identity_avatar: Avatar,
    /// Marker text for self-authored records.
    pub self_marker: String,
    /// Records in feed order.
    pub records: Vec<DisplayRecord>,
}

impl FeedView {
    /// Number of records the viewer authored.
    pub fn self_authored(&self) -> usize {
        self.records.iter().filter(|r| r.is_self).count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Annotate a merged feed for display.
pub fn build_view(feed: &[Operation], identity: &Identity, config: &FeedConfig) -> FeedView {
    let records = feed
        .iter()
        .map(|op| DisplayRecord {
            avatar: Avatar::for_author(&op.author_key),
            author_key: op.author_key.clone(),
            short_key: op.author_key.short().to_string(),
            is_self: op.is_authored_by(&identity.public_key),
            timestamp: op.timestamp,
            posted_at: config.timestamp_unit.format(op.timestamp),
            body: op.body.clone(),
        })
        .collect();

    FeedView {
        identity: identity.clone(),
        identity_avatar: Avatar::for_author(&identity.public_key),
        self_marker: config.self_marker.clone(),
        records,
    }
}
