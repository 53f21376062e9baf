//! Best-effort audit fan-out for accepted submissions.
//!
//! Each configured log destination is attempted independently and failures
//! are swallowed: a broken log channel never affects the other destination,
//! the persisted record, or the submitter's acknowledgment. Nothing here is
//! retried.

use serenity::all::{ChannelId, CreateEmbed, CreateMessage, Timestamp};
use serenity::http::Http;
use std::sync::Arc;

use crate::model::{confession::Confession, confession_guild::ConfessionGuildConfig};

use super::{parse_snowflake, LOG_PREVIEW_CHARS, PRIVATE_LOG_COLOR, PUBLIC_LOG_COLOR};

/// Service struct delivering audit log entries for accepted submissions.
pub struct ConfessionAudit {
    /// Discord HTTP client for sending log messages
    pub http: Arc<Http>,
}

impl ConfessionAudit {
    /// Creates a new ConfessionAudit instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Delivers audit entries for an accepted record to the configured channels.
    ///
    /// The public entry omits the author and truncates the body to a fixed
    /// preview; the private entry carries the author and the full body (the
    /// private channel's visibility is restricted by server permissions, not
    /// here). Fire-and-forget: every failure is logged locally and dropped.
    ///
    /// # Arguments
    /// - `config` - The guild's confession configuration
    /// - `record` - The freshly persisted record
    pub async fn publish_logs(&self, config: &ConfessionGuildConfig, record: &Confession) {
        if let Some(ref channel) = config.public_log_channel_id {
            self.send_entry(channel, self.public_embed(record), "public", record)
                .await;
        }

        if let Some(ref channel) = config.private_log_channel_id {
            self.send_entry(channel, self.private_embed(record), "private", record)
                .await;
        }
    }

    async fn send_entry(
        &self,
        channel_id: &str,
        embed: CreateEmbed,
        kind: &str,
        record: &Confession,
    ) {
        let channel = match parse_snowflake(channel_id, "log channel id") {
            Ok(id) => ChannelId::new(id),
            Err(e) => {
                tracing::warn!(
                    "Skipping {} log for confession #{} in guild {}: {}",
                    kind,
                    record.sequence_number,
                    record.guild_id,
                    e
                );
                return;
            }
        };

        if let Err(e) = channel
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!(
                "Failed to deliver {} log for confession #{} in guild {}: {:?}",
                kind,
                record.sequence_number,
                record.guild_id,
                e
            );
        }
    }

    fn public_embed(&self, record: &Confession) -> CreateEmbed {
        let title = if record.is_reply {
            format!("Reply #{}", record.sequence_number)
        } else {
            format!("Confession #{}", record.sequence_number)
        };

        let mut embed = CreateEmbed::new()
            .title(title)
            .color(PUBLIC_LOG_COLOR)
            .timestamp(Timestamp::now());

        if let Some(target) = record.reply_to_sequence {
            embed = embed.field("Reply To", format!("Confession #{}", target), true);
        }

        embed = embed.field("Preview", preview(&record.body), false);

        if let Some(ref thread_id) = record.thread_id {
            embed = embed.field("Thread", format!("<#{}>", thread_id), true);
        }

        embed
    }

    fn private_embed(&self, record: &Confession) -> CreateEmbed {
        let kind = if record.is_reply { "Reply" } else { "Confession" };

        let mut embed = CreateEmbed::new()
            .title(format!("{} #{}", kind, record.sequence_number))
            .color(PRIVATE_LOG_COLOR)
            .timestamp(Timestamp::now())
            .field(
                "User",
                format!("<@{}> ({})", record.author_id, record.author_id),
                false,
            );

        if let Some(target) = record.reply_to_sequence {
            embed = embed.field("Reply To", format!("Confession #{}", target), true);
        }

        embed = embed.field("Message", record.body.clone(), false);

        if let Some(ref thread_id) = record.thread_id {
            embed = embed.field("Thread", format!("<#{}>", thread_id), true);
        }

        embed
    }
}

/// Truncates a body to the public log preview length on a character boundary.
fn preview(body: &str) -> String {
    if body.chars().count() <= LOG_PREVIEW_CHARS {
        return body.to_string();
    }

    let truncated: String = body.chars().take(LOG_PREVIEW_CHARS).collect();
    format!("{}...", truncated)
}
