//! Routing for inbound interactions.
//!
//! Control clicks open a modal; modal submissions run the submission
//! pipeline; slash commands dispatch to the admin operations. Every failure
//! is scoped to the single interaction that triggered it.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, Interaction, ModalInteraction,
};

use crate::bot::controls::{self, ConfessionModalKind, PersistentControl};
use crate::service::confession::{ConfessionSubmission, SubmissionOutcome, SubmissionRequest};

use super::command;

/// Dispatches an inbound interaction to its handler.
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    ctx: Context,
    interaction: Interaction,
) {
    match interaction {
        Interaction::Command(interaction) => {
            command::dispatch(db, &ctx, interaction).await;
        }
        Interaction::Component(interaction) => {
            handle_component(&ctx, interaction).await;
        }
        Interaction::Modal(interaction) => {
            handle_modal(db, &ctx, interaction).await;
        }
        _ => {}
    }
}

/// Handles a persistent control click by opening the matching modal.
///
/// The click itself needs no store access: the control's custom id already
/// carries the chain root where one is needed, and everything else is
/// resolved when the modal is submitted.
async fn handle_component(ctx: &Context, interaction: ComponentInteraction) {
    let Some(control) = PersistentControl::parse(&interaction.data.custom_id) else {
        return;
    };

    let modal = match control {
        PersistentControl::StartConfession => controls::new_confession_modal(),
        PersistentControl::ReplyToConfession { root_sequence }
        | PersistentControl::ThreadReply { root_sequence } => controls::reply_modal(root_sequence),
    };

    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
        .await
    {
        tracing::error!(
            "Failed to open confession modal for control {}: {:?}",
            interaction.data.custom_id,
            e
        );
    }
}

/// Handles a submitted confession modal by running the submission pipeline.
async fn handle_modal(db: &DatabaseConnection, ctx: &Context, interaction: ModalInteraction) {
    let Some(kind) = ConfessionModalKind::parse(&interaction.data.custom_id) else {
        return;
    };

    let Some(guild_id) = interaction.guild_id else {
        return;
    };

    let Some(body) = controls::modal_body(&interaction) else {
        tracing::warn!(
            "Confession modal {} submitted without a body input",
            interaction.data.custom_id
        );
        return;
    };

    // Publishing and thread creation can take a moment; acknowledge first so
    // the interaction token does not expire.
    if let Err(e) = interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await
    {
        tracing::error!("Failed to defer confession modal response: {:?}", e);
        return;
    }

    let request = SubmissionRequest {
        guild_id: guild_id.get(),
        author_id: interaction.user.id.get(),
        body,
        reply_to: match kind {
            ConfessionModalKind::New => None,
            ConfessionModalKind::Reply { root_sequence } => Some(root_sequence),
        },
    };

    let submission = ConfessionSubmission::new(db, ctx.http.clone());
    let reply = match submission.submit(request).await {
        Ok(outcome) => acknowledgment(&outcome),
        Err(e) => {
            tracing::warn!("Submission rejected in guild {}: {}", guild_id, e);
            e.user_message()
        }
    };

    if let Err(e) = interaction
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(reply)
                .ephemeral(true),
        )
        .await
    {
        tracing::error!("Failed to send submission acknowledgment: {:?}", e);
    }
}

/// The ephemeral confirmation sent to the submitter.
fn acknowledgment(outcome: &SubmissionOutcome) -> String {
    let sequence = outcome.record.sequence_number;

    match (outcome.record.is_reply, outcome.thread_id) {
        (true, Some(thread)) => {
            format!("Confession #{} sent in <#{}>.", sequence, thread)
        }
        (false, Some(thread)) => {
            format!(
                "Confession #{} sent. Join the discussion in <#{}>.",
                sequence, thread
            )
        }
        _ => format!("Confession #{} sent.", sequence),
    }
}
