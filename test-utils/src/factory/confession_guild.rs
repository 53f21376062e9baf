//! Confession guild factory for creating test guild configurations.
//!
//! This module provides factory methods for creating confession guild config
//! entities with sensible defaults, reducing boilerplate in tests. The factory
//! supports customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test confession guild configs with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::confession_guild::ConfessionGuildFactory;
///
/// let guild = ConfessionGuildFactory::new(&db)
///     .guild_id("987654321")
///     .public_log_channel_id(Some("111".to_string()))
///     .build()
///     .await?;
/// ```
pub struct ConfessionGuildFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    confession_channel_id: Option<String>,
    public_log_channel_id: Option<String>,
    private_log_channel_id: Option<String>,
    sequence_counter: i64,
    anchor_message_id: Option<String>,
}

impl<'a> ConfessionGuildFactory<'a> {
    /// Creates a new ConfessionGuildFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented unique id
    /// - confession_channel_id: `Some("channel_{id}")` (guild is configured)
    /// - public_log_channel_id / private_log_channel_id: `None`
    /// - sequence_counter: `0`
    /// - anchor_message_id: `Some("anchor_{id}")`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            confession_channel_id: Some(format!("channel_{}", id)),
            public_log_channel_id: None,
            private_log_channel_id: None,
            sequence_counter: 0,
            anchor_message_id: Some(format!("anchor_{}", id)),
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the confession channel. `None` leaves the guild unconfigured.
    pub fn confession_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.confession_channel_id = channel_id;
        self
    }

    /// Sets the public log channel.
    pub fn public_log_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.public_log_channel_id = channel_id;
        self
    }

    /// Sets the private log channel.
    pub fn private_log_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.private_log_channel_id = channel_id;
        self
    }

    /// Sets the last issued sequence number.
    pub fn sequence_counter(mut self, counter: i64) -> Self {
        self.sequence_counter = counter;
        self
    }

    /// Sets the standing anchor message id.
    pub fn anchor_message_id(mut self, message_id: Option<String>) -> Self {
        self.anchor_message_id = message_id;
        self
    }

    /// Builds and inserts the guild config entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::confession_guild::Model)` - Created guild config entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::confession_guild::Model, DbErr> {
        let now = Utc::now();
        entity::confession_guild::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            confession_channel_id: ActiveValue::Set(self.confession_channel_id),
            public_log_channel_id: ActiveValue::Set(self.public_log_channel_id),
            private_log_channel_id: ActiveValue::Set(self.private_log_channel_id),
            sequence_counter: ActiveValue::Set(self.sequence_counter),
            anchor_message_id: ActiveValue::Set(self.anchor_message_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a configured confession guild with default values.
///
/// Shorthand for `ConfessionGuildFactory::new(db).build().await`.
pub async fn create_guild(
    db: &DatabaseConnection,
) -> Result<entity::confession_guild::Model, DbErr> {
    ConfessionGuildFactory::new(db).build().await
}
