//! Confession factory for creating test confession records.
//!
//! This module provides factory methods for creating confession record
//! entities with sensible defaults, reducing boilerplate in tests. The factory
//! supports customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test confession records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::confession::ConfessionFactory;
///
/// let reply = ConfessionFactory::new(&db, &guild.guild_id)
///     .sequence_number(2)
///     .reply_to(1)
///     .thread_id(Some("thread_1".to_string()))
///     .build()
///     .await?;
/// ```
pub struct ConfessionFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    sequence_number: i64,
    author_id: String,
    body: String,
    thread_id: Option<String>,
    anchor_message_id: String,
    is_reply: bool,
    reply_to_sequence: Option<i64>,
    reply_count: i32,
    created_at: DateTime<Utc>,
}

impl<'a> ConfessionFactory<'a> {
    /// Creates a new ConfessionFactory with default values.
    ///
    /// Defaults:
    /// - sequence_number: auto-incremented unique value
    /// - author_id: `"author_{id}"`
    /// - body: `"Confession body {id}"`
    /// - thread_id: `None`
    /// - anchor_message_id: `"message_{id}"`
    /// - is_reply: `false`, reply_to_sequence: `None`, reply_count: `0`
    /// - created_at: now
    pub fn new(db: &'a DatabaseConnection, guild_id: &str) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: guild_id.to_string(),
            sequence_number: id as i64,
            author_id: format!("author_{}", id),
            body: format!("Confession body {}", id),
            thread_id: None,
            anchor_message_id: format!("message_{}", id),
            is_reply: false,
            reply_to_sequence: None,
            reply_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Sets the guild-scoped sequence number.
    pub fn sequence_number(mut self, sequence_number: i64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Sets the author id.
    pub fn author_id(mut self, author_id: impl Into<String>) -> Self {
        self.author_id = author_id.into();
        self
    }

    /// Sets the confession body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the discussion thread id.
    pub fn thread_id(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id;
        self
    }

    /// Sets the anchor message id.
    pub fn anchor_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.anchor_message_id = message_id.into();
        self
    }

    /// Marks the record as a reply to the given sequence number.
    pub fn reply_to(mut self, target_sequence: i64) -> Self {
        self.is_reply = true;
        self.reply_to_sequence = Some(target_sequence);
        self
    }

    /// Sets the denormalized reply counter.
    pub fn reply_count(mut self, reply_count: i32) -> Self {
        self.reply_count = reply_count;
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the confession entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::confession::Model)` - Created confession entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::confession::Model, DbErr> {
        entity::confession::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            sequence_number: ActiveValue::Set(self.sequence_number),
            author_id: ActiveValue::Set(self.author_id),
            body: ActiveValue::Set(self.body),
            thread_id: ActiveValue::Set(self.thread_id),
            anchor_message_id: ActiveValue::Set(self.anchor_message_id),
            is_reply: ActiveValue::Set(self.is_reply),
            reply_to_sequence: ActiveValue::Set(self.reply_to_sequence),
            reply_count: ActiveValue::Set(self.reply_count),
            created_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a confession record with default values in the given guild.
///
/// Shorthand for `ConfessionFactory::new(db, guild_id).build().await`.
pub async fn create_confession(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::confession::Model, DbErr> {
    ConfessionFactory::new(db, guild_id).build().await
}
