//! The submission pipeline for confessions and replies.
//!
//! A submission moves through validation, sequence allocation, publishing,
//! thread resolution, persistence, and audit fan-out. Steps after allocation
//! are never rolled back: a sequence number consumed by a submission that
//! later fails stays consumed, because the Discord send it may have paid for
//! cannot be un-sent. Each inbound submission runs as its own task; all
//! coordination happens through the store.

use sea_orm::DatabaseConnection;
use serenity::all::{ChannelId, CreateMessage, EditMessage};
use serenity::http::Http;
use std::sync::Arc;

use crate::{
    bot::controls,
    data::{confession::ConfessionRepository, confession_guild::ConfessionGuildRepository},
    error::confession::ConfessionError,
    model::confession::{Confession, CreateConfessionParam},
    model::confession_guild::ConfessionGuildConfig,
};

use super::{
    confession_embed, parse_snowflake, thread_title, ConfessionAudit, ThreadResolver,
    MAX_BODY_CHARS, MIN_BODY_CHARS,
};

/// An inbound submission event, already stripped of transport details.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// Guild the submission was made in.
    pub guild_id: u64,
    /// Submitting user. Only persisted for the private audit path.
    pub author_id: u64,
    /// Raw submission text as entered in the modal.
    pub body: String,
    /// Sequence number of the confession being replied to, for replies.
    pub reply_to: Option<i64>,
}

/// The result of an accepted submission, used for the submitter acknowledgment.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// The persisted record.
    pub record: Confession,
    /// The discussion thread, when one exists by the time the record persisted.
    pub thread_id: Option<u64>,
}

/// Service struct orchestrating the submission pipeline.
pub struct ConfessionSubmission<'a> {
    /// Database connection for allocation and persistence
    pub db: &'a DatabaseConnection,
    /// Discord HTTP client for publishing messages and threads
    pub http: Arc<Http>,
}

impl<'a> ConfessionSubmission<'a> {
    /// Creates a new ConfessionSubmission instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(db: &'a DatabaseConnection, http: Arc<Http>) -> Self {
        Self { db, http }
    }

    /// Runs a submission through the full pipeline.
    ///
    /// Validation happens before allocation, so rejected input never consumes
    /// a sequence number. From allocation onward failures surface to the
    /// submitter but leave completed steps in place. The audit fan-out runs
    /// last and can never fail the submission.
    ///
    /// # Arguments
    /// - `request` - The inbound submission event
    ///
    /// # Returns
    /// - `Ok(SubmissionOutcome)` - Accepted; record persisted
    /// - `Err(ConfessionError)` - Rejected; see the variant for how far the
    ///   pipeline got
    pub async fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionOutcome, ConfessionError> {
        let body = validate_body(&request.body)?;

        let guild_repo = ConfessionGuildRepository::new(self.db);
        let config = guild_repo
            .get_by_guild_id(request.guild_id)
            .await?
            .ok_or(ConfessionError::NotConfigured)?;
        let channel_id = match config.confession_channel_id {
            Some(ref id) => parse_snowflake(id, "confession channel id")?,
            None => return Err(ConfessionError::NotConfigured),
        };

        // The number is consumed from here on, even if a later step fails.
        let sequence_number = guild_repo
            .allocate_next_sequence(request.guild_id)
            .await?
            .ok_or(ConfessionError::NotConfigured)?;

        let outcome = match request.reply_to {
            Some(target) => {
                self.submit_reply(&request, channel_id, sequence_number, body, target)
                    .await?
            }
            None => {
                self.submit_new(&request, channel_id, sequence_number, body)
                    .await?
            }
        };

        self.fan_out_logs(&config, &outcome.record).await;

        Ok(outcome)
    }

    /// Publishes a new confession and persists its record.
    async fn submit_new(
        &self,
        request: &SubmissionRequest,
        channel_id: u64,
        sequence_number: i64,
        body: String,
    ) -> Result<SubmissionOutcome, ConfessionError> {
        let channel = ChannelId::new(channel_id);

        let message = channel
            .send_message(
                &self.http,
                CreateMessage::new().embed(confession_embed(sequence_number, &body)),
            )
            .await
            .map_err(|e| ConfessionError::PublishFailed(Box::new(e)))?;

        // Thread creation is best-effort here: the confession is already
        // public, and the first reply will force a thread if this fails.
        let thread_id = match channel
            .create_thread_from_message(
                &self.http,
                message.id,
                serenity::all::CreateThread::new(thread_title(sequence_number))
                    .auto_archive_duration(serenity::all::AutoArchiveDuration::OneDay),
            )
            .await
        {
            Ok(thread) => Some(thread.id.get()),
            Err(e) => {
                tracing::warn!(
                    "Thread creation for confession #{} in guild {} failed: {:?}",
                    sequence_number,
                    request.guild_id,
                    e
                );
                None
            }
        };

        // Control attachment is best-effort too; a confession without buttons
        // is still a published confession.
        if let Err(e) = channel
            .edit_message(
                &self.http,
                message.id,
                EditMessage::new().components(vec![controls::confession_message_row(
                    sequence_number,
                )]),
            )
            .await
        {
            tracing::warn!(
                "Failed to attach controls to confession #{} in guild {}: {:?}",
                sequence_number,
                request.guild_id,
                e
            );
        }

        let record = ConfessionRepository::new(self.db)
            .create(CreateConfessionParam {
                guild_id: request.guild_id,
                sequence_number,
                author_id: request.author_id,
                body,
                thread_id,
                anchor_message_id: message.id.get(),
                reply_to_sequence: None,
            })
            .await?;

        Ok(SubmissionOutcome { record, thread_id })
    }

    /// Publishes a reply into its chain's thread and persists its record.
    async fn submit_reply(
        &self,
        request: &SubmissionRequest,
        channel_id: u64,
        sequence_number: i64,
        body: String,
        target: i64,
    ) -> Result<SubmissionOutcome, ConfessionError> {
        let repo = ConfessionRepository::new(self.db);

        // Replies always land in the chain root's thread, however deep the
        // reply-to-reply chain the target sits in.
        let root = repo
            .resolve_root(request.guild_id, target)
            .await?
            .ok_or(ConfessionError::TargetNotFound(target))?;

        let resolver = ThreadResolver::new(self.db, self.http.clone());
        let thread_id = resolver.resolve_or_create(channel_id, &root).await?;

        let thread = ChannelId::new(thread_id);
        let message = thread
            .send_message(
                &self.http,
                CreateMessage::new().embed(confession_embed(sequence_number, &body)),
            )
            .await
            .map_err(|e| ConfessionError::PublishFailed(Box::new(e)))?;

        if let Err(e) = thread
            .edit_message(
                &self.http,
                message.id,
                EditMessage::new().components(vec![controls::thread_reply_row(
                    root.sequence_number,
                )]),
            )
            .await
        {
            tracing::warn!(
                "Failed to attach controls to reply #{} in guild {}: {:?}",
                sequence_number,
                request.guild_id,
                e
            );
        }

        let record = repo
            .create(CreateConfessionParam {
                guild_id: request.guild_id,
                sequence_number,
                author_id: request.author_id,
                body,
                thread_id: Some(thread_id),
                anchor_message_id: message.id.get(),
                reply_to_sequence: Some(root.sequence_number),
            })
            .await?;

        Ok(SubmissionOutcome {
            record,
            thread_id: Some(thread_id),
        })
    }

    /// Audit fan-out, attempted last and never failing the submission.
    async fn fan_out_logs(&self, config: &ConfessionGuildConfig, record: &Confession) {
        ConfessionAudit::new(self.http.clone())
            .publish_logs(config, record)
            .await;
    }
}

/// Validates a raw submission body and returns the trimmed text to persist.
///
/// Length limits are counted in characters, not bytes, so multibyte input is
/// not cut short.
pub(crate) fn validate_body(body: &str) -> Result<String, ConfessionError> {
    let trimmed = body.trim();
    let length = trimmed.chars().count();

    if length < MIN_BODY_CHARS {
        return Err(ConfessionError::TooShort);
    }
    if length > MAX_BODY_CHARS {
        return Err(ConfessionError::TooLong);
    }

    Ok(trimmed.to_string())
}
