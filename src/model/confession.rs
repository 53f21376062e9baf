//! Domain models for confession records.

use chrono::{DateTime, Utc};

/// One accepted confession or reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Confession {
    /// Unique identifier for the record.
    pub id: i32,
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Guild-scoped confession number, 1-based, never reused.
    pub sequence_number: i64,
    /// Submitter's Discord user ID. Never rendered in public-facing output.
    pub author_id: String,
    /// Validated submission text.
    pub body: String,
    /// Discussion thread hosting this record's reply chain, once one exists.
    pub thread_id: Option<String>,
    /// The message this record's interactive control is attached to.
    pub anchor_message_id: String,
    /// Whether this record is a reply to an earlier confession.
    pub is_reply: bool,
    /// Chain root's sequence number; set iff `is_reply`.
    pub reply_to_sequence: Option<i64>,
    /// Number of replies accepted against this record.
    pub reply_count: i32,
    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,
}

impl Confession {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::confession::Model) -> Self {
        Self {
            id: entity.id,
            guild_id: entity.guild_id,
            sequence_number: entity.sequence_number,
            author_id: entity.author_id,
            body: entity.body,
            thread_id: entity.thread_id,
            anchor_message_id: entity.anchor_message_id,
            is_reply: entity.is_reply,
            reply_to_sequence: entity.reply_to_sequence,
            reply_count: entity.reply_count,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for persisting an accepted submission.
///
/// `reply_to_sequence` carries the chain root's number for replies and `None`
/// for new confessions; the repository derives `is_reply` from it.
#[derive(Debug, Clone)]
pub struct CreateConfessionParam {
    /// Discord guild ID.
    pub guild_id: u64,
    /// Sequence number already allocated for this submission.
    pub sequence_number: i64,
    /// Submitter's Discord user ID.
    pub author_id: u64,
    /// Validated submission text.
    pub body: String,
    /// Discussion thread the record lives in, if one exists yet.
    pub thread_id: Option<u64>,
    /// The message the record's interactive control is attached to.
    pub anchor_message_id: u64,
    /// Chain root's sequence number when this submission is a reply.
    pub reply_to_sequence: Option<i64>,
}

/// Aggregate confession counts for a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfessionStats {
    /// All records ever accepted.
    pub total: u64,
    /// Records accepted since the start of the current UTC day.
    pub today: u64,
    /// Records that are replies.
    pub replies: u64,
}
