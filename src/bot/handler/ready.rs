use serenity::all::{ActivityData, Command, Context, Ready};

use super::command;

/// Handles the ready event: registers slash commands and confirms control
/// rehydration.
///
/// Interactive controls are routed purely by custom id and resolve sequence
/// numbers and thread ids from the store at click time, so buttons on
/// messages sent before this process started work again the moment the
/// gateway connects — there is no per-message state to restore.
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord!", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("for confessions")));

    match Command::set_global_commands(&ctx.http, command::all()).await {
        Ok(commands) => {
            tracing::info!("Registered {} slash commands", commands.len());
        }
        Err(e) => {
            tracing::error!("Failed to register slash commands: {:?}", e);
        }
    }

    tracing::info!("Persistent confession controls active");
}
