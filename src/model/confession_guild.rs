//! Domain models for per-guild confession configuration.

use chrono::{DateTime, Utc};

/// Per-guild confession configuration.
///
/// Discord snowflakes are stored as strings (the storage representation);
/// services parse them to `u64` where an API call needs one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfessionGuildConfig {
    /// Unique identifier for the config record.
    pub id: i32,
    /// Discord guild ID (stored as String).
    pub guild_id: String,
    /// Channel confessions are published to; `None` means unconfigured.
    pub confession_channel_id: Option<String>,
    /// Channel for the content-redacted public log; `None` disables it.
    pub public_log_channel_id: Option<String>,
    /// Channel for the author-revealing private log; `None` disables it.
    pub private_log_channel_id: Option<String>,
    /// Last confession number issued for this guild.
    pub sequence_counter: i64,
    /// The standing "click to confess" message, if one has been posted.
    pub anchor_message_id: Option<String>,
    /// Timestamp when the record was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ConfessionGuildConfig {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::confession_guild::Model) -> Self {
        Self {
            id: entity.id,
            guild_id: entity.guild_id,
            confession_channel_id: entity.confession_channel_id,
            public_log_channel_id: entity.public_log_channel_id,
            private_log_channel_id: entity.private_log_channel_id,
            sequence_counter: entity.sequence_counter,
            anchor_message_id: entity.anchor_message_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for creating or updating a guild's confession setup.
///
/// Re-running setup for an already configured guild replaces the channel and
/// anchor message but preserves the sequence counter, so numbering continues
/// where it left off.
#[derive(Debug, Clone)]
pub struct SetupGuildParam {
    /// Discord guild ID.
    pub guild_id: u64,
    /// Channel confessions will be published to.
    pub confession_channel_id: u64,
    /// The freshly posted starter message carrying the start-confession control.
    pub anchor_message_id: u64,
}
