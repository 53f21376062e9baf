//! Rejection taxonomy for confession submissions.
//!
//! Every failure here is scoped to the single submission that triggered it;
//! none is fatal to the process. Variants that occur after sequence
//! allocation leave the allocated number consumed (numbers are never
//! reclaimed, so a failed submission can leave a gap on the Discord side).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfessionError {
    /// Body is empty or under the minimum length after trimming.
    #[error("submission body is too short")]
    TooShort,

    /// Body exceeds the maximum length.
    #[error("submission body is too long")]
    TooLong,

    /// The guild has no config row or no confession channel set.
    #[error("confession system is not configured for this guild")]
    NotConfigured,

    /// The record a reply targets does not exist in this guild.
    ///
    /// # Fields
    /// - The targeted sequence number
    #[error("confession #{0} not found")]
    TargetNotFound(i64),

    /// The target record exists but its anchor message is gone from Discord.
    ///
    /// # Fields
    /// - The targeted sequence number
    #[error("anchor message for confession #{0} no longer exists")]
    AnchorNotFound(i64),

    /// Sending the confession or reply message to Discord failed.
    ///
    /// Any sequence number already allocated stands; nothing is rolled back.
    #[error("failed to publish submission: {0}")]
    PublishFailed(#[source] Box<serenity::Error>),

    /// Creating the discussion thread failed where a thread was required
    /// (reply path). For new confessions thread creation failure is non-fatal
    /// and never surfaces as this error.
    #[error("failed to create discussion thread: {0}")]
    ThreadCreateFailed(#[source] Box<serenity::Error>),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl ConfessionError {
    /// The ephemeral message shown to the submitter when a submission is
    /// rejected. Kept deliberately narrow: it names what failed, not what
    /// already succeeded on the Discord side.
    pub fn user_message(&self) -> String {
        match self {
            Self::TooShort => "Your message must be at least 2 characters long.".to_string(),
            Self::TooLong => "Your message is too long. The maximum is 2000 characters.".to_string(),
            Self::NotConfigured => {
                "The confession system is not set up on this server. Ask an admin to run /setupconfess.".to_string()
            }
            Self::TargetNotFound(sequence) => {
                format!("Confession #{} could not be found.", sequence)
            }
            Self::AnchorNotFound(sequence) => {
                format!("The message for confession #{} no longer exists, so it cannot be replied to.", sequence)
            }
            Self::PublishFailed(_) => {
                "Your submission could not be delivered. Please try again later.".to_string()
            }
            Self::ThreadCreateFailed(_) => {
                "A discussion thread could not be created for that confession. Please try again later.".to_string()
            }
            Self::Database(_) => "An internal error occurred. Please try again later.".to_string(),
        }
    }
}
