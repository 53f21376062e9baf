//! Confession relay services.
//!
//! This module hosts the confession core: the submission pipeline
//! (`ConfessionSubmission`), the per-anchor thread resolver
//! (`ThreadResolver`), the best-effort audit fan-out (`ConfessionAudit`), and
//! the administrative operations (`ConfessionAdmin`). All shared mutable state
//! lives in the store; these services hold only a database connection and a
//! Discord HTTP client, so any number of submissions can be in flight at once.

pub mod admin;
pub mod audit;
pub mod submit;
pub mod thread;

#[cfg(test)]
mod test;

pub use admin::ConfessionAdmin;
pub use audit::ConfessionAudit;
pub use submit::{ConfessionSubmission, SubmissionOutcome, SubmissionRequest};
pub use thread::ThreadResolver;

use sea_orm::DbErr;
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::error::confession::ConfessionError;

/// Minimum submission body length in characters.
pub const MIN_BODY_CHARS: usize = 2;
/// Maximum submission body length in characters.
pub const MAX_BODY_CHARS: usize = 2000;
/// Body preview length used by the public audit log.
pub const LOG_PREVIEW_CHARS: usize = 150;

/// Embed color for published confessions and replies.
pub const CONFESSION_COLOR: u32 = 0x9370DB;
/// Embed color for public (content-redacted) audit entries.
pub const PUBLIC_LOG_COLOR: u32 = 0x607D8B;
/// Embed color for private (author-revealing) audit entries.
pub const PRIVATE_LOG_COLOR: u32 = 0xE67E22;

/// Builds the embed for a published confession or reply.
///
/// Replies deliberately render identically to confessions: same title shape,
/// same color, same footer, so nothing in the public channel distinguishes
/// who replied to whom.
pub(crate) fn confession_embed(sequence_number: i64, body: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("Confession #{}", sequence_number))
        .description(body.to_string())
        .color(CONFESSION_COLOR)
        .footer(CreateEmbedFooter::new("Anonymous confession"))
        .timestamp(Timestamp::now())
}

/// Discussion thread title for a confession.
pub(crate) fn thread_title(sequence_number: i64) -> String {
    format!("Confession #{} - Discussion", sequence_number)
}

/// Parses a Discord snowflake persisted as a string column.
///
/// Stored identifiers are written from `u64` values, so a parse failure means
/// the store itself is corrupted and is reported as a database error.
pub(crate) fn parse_snowflake(value: &str, field: &str) -> Result<u64, ConfessionError> {
    value.parse::<u64>().map_err(|e| {
        ConfessionError::Database(DbErr::Custom(format!(
            "invalid {} `{}` in store: {}",
            field, value, e
        )))
    })
}
