//! Discussion thread resolution for confession records.
//!
//! At most one thread ever exists per confession anchor message. Concurrent
//! repliers racing to be first on an unthreaded confession are resolved
//! through the store, not through in-process locks: whoever persists a thread
//! id first wins, and everyone else re-reads and reuses the winner's thread.
//! Correctness therefore survives restarts and multiple workers.

use sea_orm::DatabaseConnection;
use serenity::all::{AutoArchiveDuration, ChannelId, CreateThread, MessageId};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    data::confession::ConfessionRepository, error::confession::ConfessionError,
    model::confession::Confession,
};

use super::{parse_snowflake, thread_title};

/// Service struct resolving or lazily creating discussion threads.
pub struct ThreadResolver<'a> {
    /// Database connection for reading and claiming persisted thread ids
    pub db: &'a DatabaseConnection,
    /// Discord HTTP client for fetching anchors and creating threads
    pub http: Arc<Http>,
}

impl<'a> ThreadResolver<'a> {
    /// Creates a new ThreadResolver instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Returns the discussion thread for a root confession, creating it if needed.
    ///
    /// Resolution order:
    /// 1. A persisted thread id is returned directly, with no platform call.
    /// 2. Otherwise the anchor message is re-fetched; a deleted anchor fails
    ///    with `AnchorNotFound`.
    /// 3. Thread creation is attempted. The new id is claimed through a
    ///    conditional update; if a concurrent resolver claimed first, the
    ///    persisted winner is re-read and returned instead.
    /// 4. If the platform call fails, the persisted state is re-read once (the
    ///    winner may have committed meanwhile) before failing with
    ///    `ThreadCreateFailed`.
    ///
    /// # Arguments
    /// - `channel_id` - The guild's confession channel, where the anchor lives
    /// - `root` - The chain root record to resolve a thread for
    ///
    /// # Returns
    /// - `Ok(thread_id)` - The record's single discussion thread
    /// - `Err(ConfessionError::AnchorNotFound)` - Anchor message is gone
    /// - `Err(ConfessionError::ThreadCreateFailed)` - Creation failed and no
    ///   concurrent resolver succeeded either
    /// - `Err(ConfessionError::Database)` - Store error
    pub async fn resolve_or_create(
        &self,
        channel_id: u64,
        root: &Confession,
    ) -> Result<u64, ConfessionError> {
        if let Some(ref existing) = root.thread_id {
            return parse_snowflake(existing, "thread id");
        }

        let guild_id = parse_snowflake(&root.guild_id, "guild id")?;
        let anchor_id = parse_snowflake(&root.anchor_message_id, "anchor message id")?;
        let channel = ChannelId::new(channel_id);

        if let Err(e) = channel.message(&self.http, MessageId::new(anchor_id)).await {
            tracing::warn!(
                "Anchor message {} for confession #{} in guild {} is unavailable: {:?}",
                anchor_id,
                root.sequence_number,
                root.guild_id,
                e
            );
            return Err(ConfessionError::AnchorNotFound(root.sequence_number));
        }

        let repo = ConfessionRepository::new(self.db);

        let created = channel
            .create_thread_from_message(
                &self.http,
                MessageId::new(anchor_id),
                CreateThread::new(thread_title(root.sequence_number))
                    .auto_archive_duration(AutoArchiveDuration::OneDay),
            )
            .await;

        match created {
            Ok(thread) => {
                let thread_id = thread.id.get();

                if repo
                    .set_thread_if_absent(guild_id, root.sequence_number, thread_id)
                    .await?
                {
                    tracing::info!(
                        "Created thread {} for confession #{} in guild {}",
                        thread_id,
                        root.sequence_number,
                        root.guild_id
                    );
                    return Ok(thread_id);
                }

                // A concurrent resolver persisted first; their thread is the one.
                tracing::warn!(
                    "Lost thread-creation race for confession #{} in guild {}, reusing persisted thread",
                    root.sequence_number,
                    root.guild_id
                );
                match self.read_persisted(&repo, guild_id, root.sequence_number).await? {
                    Some(winner) => Ok(winner),
                    None => Ok(thread_id),
                }
            }
            Err(e) => {
                // Creation can fail because a concurrent resolver already made
                // the thread on this anchor; re-read before giving up.
                if let Some(winner) =
                    self.read_persisted(&repo, guild_id, root.sequence_number).await?
                {
                    return Ok(winner);
                }

                Err(ConfessionError::ThreadCreateFailed(Box::new(e)))
            }
        }
    }

    async fn read_persisted(
        &self,
        repo: &ConfessionRepository<'_>,
        guild_id: u64,
        sequence_number: i64,
    ) -> Result<Option<u64>, ConfessionError> {
        let record = repo.get_by_sequence(guild_id, sequence_number).await?;

        match record.and_then(|r| r.thread_id) {
            Some(ref thread_id) => Ok(Some(parse_snowflake(thread_id, "thread id")?)),
            None => Ok(None),
        }
    }
}
