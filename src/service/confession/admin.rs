//! Administrative confession operations.
//!
//! These are the operations exposed to the command dispatch layer: guild
//! setup, log channel configuration, statistics, and record lookup.

use chrono::{NaiveTime, Utc};
use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, CreateEmbed, CreateEmbedFooter, CreateMessage, Timestamp};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    bot::controls,
    data::{confession::ConfessionRepository, confession_guild::ConfessionGuildRepository},
    error::AppError,
    model::confession::{Confession, ConfessionStats},
    model::confession_guild::{ConfessionGuildConfig, SetupGuildParam},
};

use super::CONFESSION_COLOR;

/// Service struct for administrative confession operations.
pub struct ConfessionAdmin<'a> {
    /// Database connection for config and record access
    pub db: &'a DatabaseConnection,
    /// Discord HTTP client for posting the starter message
    pub http: Arc<Http>,
}

impl<'a> ConfessionAdmin<'a> {
    /// Creates a new ConfessionAdmin instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Sets up the confession system for a guild.
    ///
    /// Posts the standing starter message with the start-confession control to
    /// the chosen channel, then upserts the guild config pointing at both. An
    /// existing guild keeps its sequence counter, so numbering continues where
    /// it left off.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `channel_id` - Channel confessions will be published to
    ///
    /// # Returns
    /// - `Ok(ConfessionGuildConfig)` - The stored configuration
    /// - `Err(AppError)` - Starter message send or database error
    pub async fn setup(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<ConfessionGuildConfig, AppError> {
        let starter = CreateEmbed::new()
            .title("Anonymous Confessions")
            .description(
                "**Click the button below:**\n\n\
                 - **Confess** - Send a new anonymous confession\n\
                 - Each confession gets its own discussion thread\n\
                 - Use the **Reply** button on a confession to respond anonymously",
            )
            .color(CONFESSION_COLOR)
            .footer(CreateEmbedFooter::new("Be respectful. Stay anonymous."));

        let message = ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new()
                    .embed(starter)
                    .components(vec![controls::starter_row()]),
            )
            .await?;

        let config = ConfessionGuildRepository::new(self.db)
            .setup(SetupGuildParam {
                guild_id,
                confession_channel_id: channel_id,
                anchor_message_id: message.id.get(),
            })
            .await?;

        tracing::info!(
            "Confession setup complete for guild {} in channel {}",
            guild_id,
            channel_id
        );

        Ok(config)
    }

    /// Sets the public (content-redacted) log channel for a guild.
    ///
    /// # Returns
    /// - `Ok(ConfessionGuildConfig)` - The updated configuration
    /// - `Err(AppError::NotFound)` - Guild has never been set up
    pub async fn set_public_log(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<ConfessionGuildConfig, AppError> {
        ConfessionGuildRepository::new(self.db)
            .set_public_log_channel(guild_id, Some(channel_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Confession system is not set up".to_string()))
    }

    /// Sets the private (author-revealing) log channel for a guild.
    ///
    /// Visibility of the channel itself is the server admin's responsibility;
    /// this only records where entries go.
    ///
    /// # Returns
    /// - `Ok(ConfessionGuildConfig)` - The updated configuration
    /// - `Err(AppError::NotFound)` - Guild has never been set up
    pub async fn set_private_log(
        &self,
        guild_id: u64,
        channel_id: u64,
    ) -> Result<ConfessionGuildConfig, AppError> {
        ConfessionGuildRepository::new(self.db)
            .set_private_log_channel(guild_id, Some(channel_id))
            .await?
            .ok_or_else(|| AppError::NotFound("Confession system is not set up".to_string()))
    }

    /// Computes confession statistics for a guild.
    ///
    /// "Today" is counted from the start of the current UTC day.
    ///
    /// # Returns
    /// - `Ok(ConfessionStats)` - Total, today, and reply counts
    /// - `Err(AppError::NotFound)` - Guild has never been set up
    pub async fn get_stats(&self, guild_id: u64) -> Result<ConfessionStats, AppError> {
        ConfessionGuildRepository::new(self.db)
            .get_by_guild_id(guild_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Confession system is not set up".to_string()))?;

        let day_start = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        let stats = ConfessionRepository::new(self.db)
            .get_stats(guild_id, day_start)
            .await?;

        Ok(stats)
    }

    /// Looks up a confession record by number, author included.
    ///
    /// The caller is responsible for restricting who sees the result; this is
    /// the only read path that exposes `author_id` outside the private log.
    ///
    /// # Returns
    /// - `Ok(Confession)` - The record
    /// - `Err(AppError::NotFound)` - No record with that number in this guild
    pub async fn get_record_info(
        &self,
        guild_id: u64,
        sequence_number: i64,
    ) -> Result<Confession, AppError> {
        ConfessionRepository::new(self.db)
            .get_by_sequence(guild_id, sequence_number)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Confession #{} not found", sequence_number))
            })
    }

    /// Builds the admin-facing embed for a record lookup.
    ///
    /// Body is truncated to 500 characters for display; the timestamp renders
    /// as a Discord relative time.
    pub fn record_info_embed(&self, record: &Confession) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .title(format!("Confession #{} Info", record.sequence_number))
            .color(CONFESSION_COLOR)
            .timestamp(Timestamp::now())
            .field(
                "Author",
                format!("<@{}> ({})", record.author_id, record.author_id),
                false,
            )
            .field(
                "Type",
                if record.is_reply { "Reply" } else { "Confession" },
                true,
            );

        if let Some(target) = record.reply_to_sequence {
            embed = embed.field("Reply To", format!("Confession #{}", target), true);
        }

        let body: String = if record.body.chars().count() > 500 {
            format!("{}...", record.body.chars().take(500).collect::<String>())
        } else {
            record.body.clone()
        };
        embed = embed.field("Message", body, false);

        embed = embed.field(
            "Time",
            format!("<t:{}:R>", record.created_at.timestamp()),
            true,
        );

        embed
    }
}
