//! Slash command registration and routing.
//!
//! This is thin dispatch over the administrative service operations: each
//! handler extracts its options, calls the service, and sends an ephemeral
//! response. Admin-only commands are gated through Discord default member
//! permissions at registration time.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage, Permissions,
    ResolvedValue,
};

use crate::error::AppError;
use crate::service::confession::{ConfessionAdmin, CONFESSION_COLOR};

/// All slash commands registered on startup.
pub fn all() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("setupconfess")
            .description("Set up the confession system in a channel")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel confessions will be published to",
                )
                .required(true),
            )
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false),
        CreateCommand::new("logconfess")
            .description("Set the public confession log channel")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel for content-redacted log entries",
                )
                .required(true),
            )
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false),
        CreateCommand::new("loguserconfess")
            .description("Set the private confession log channel (includes authors)")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel for full log entries with authors",
                )
                .required(true),
            )
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false),
        CreateCommand::new("confessstats")
            .description("Show confession statistics for this server")
            .dm_permission(false),
        CreateCommand::new("confessinfo")
            .description("Look up a confession by number (admin)")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "number",
                    "The confession number",
                )
                .min_int_value(1)
                .required(true),
            )
            .default_member_permissions(Permissions::ADMINISTRATOR)
            .dm_permission(false),
    ]
}

/// Routes a command interaction to its handler.
pub async fn dispatch(db: &DatabaseConnection, ctx: &Context, interaction: CommandInteraction) {
    let Some(guild_id) = interaction.guild_id else {
        return;
    };

    let admin = ConfessionAdmin::new(db, ctx.http.clone());

    let result = match interaction.data.name.as_str() {
        "setupconfess" => setup_confess(&admin, ctx, &interaction, guild_id.get()).await,
        "logconfess" => log_confess(&admin, ctx, &interaction, guild_id.get(), true).await,
        "loguserconfess" => log_confess(&admin, ctx, &interaction, guild_id.get(), false).await,
        "confessstats" => confess_stats(&admin, ctx, &interaction, guild_id.get()).await,
        "confessinfo" => confess_info(&admin, ctx, &interaction, guild_id.get()).await,
        _ => return,
    };

    if let Err(e) = result {
        let message = match e {
            AppError::NotFound(msg) => msg,
            other => {
                tracing::error!(
                    "Command `{}` failed in guild {}: {:?}",
                    interaction.data.name,
                    guild_id,
                    other
                );
                "An internal error occurred. Please try again later.".to_string()
            }
        };

        if let Err(e) = respond_content(ctx, &interaction, &message).await {
            tracing::error!("Failed to send command error response: {:?}", e);
        }
    }
}

async fn setup_confess(
    admin: &ConfessionAdmin<'_>,
    ctx: &Context,
    interaction: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let Some(channel) = channel_option(interaction) else {
        return respond_content(ctx, interaction, "A channel is required.").await;
    };

    admin.setup(guild_id, channel.get()).await?;

    let embed = CreateEmbed::new()
        .title("Confession System Setup")
        .description(format!(
            "Confession channel set to <#{}>\n\n\
             **How it works:**\n\
             - **Confess** posts a new anonymous confession\n\
             - **Reply** responds to a specific confession\n\
             - All replies collect in the confession's thread",
            channel.get()
        ))
        .color(CONFESSION_COLOR);

    respond_embed(ctx, interaction, embed).await
}

async fn log_confess(
    admin: &ConfessionAdmin<'_>,
    ctx: &Context,
    interaction: &CommandInteraction,
    guild_id: u64,
    public: bool,
) -> Result<(), AppError> {
    let Some(channel) = channel_option(interaction) else {
        return respond_content(ctx, interaction, "A channel is required.").await;
    };

    if public {
        admin.set_public_log(guild_id, channel.get()).await?;
    } else {
        admin.set_private_log(guild_id, channel.get()).await?;
    }

    let kind = if public { "Log" } else { "User log" };
    respond_content(
        ctx,
        interaction,
        &format!("{} channel set to <#{}>", kind, channel.get()),
    )
    .await
}

async fn confess_stats(
    admin: &ConfessionAdmin<'_>,
    ctx: &Context,
    interaction: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let stats = admin.get_stats(guild_id).await?;

    let embed = CreateEmbed::new()
        .title("Confession Statistics")
        .color(CONFESSION_COLOR)
        .field("Total Confessions", format!("**{}**", stats.total), true)
        .field("Today", format!("**{}**", stats.today), true)
        .field("Replies", format!("**{}**", stats.replies), true);

    respond_embed(ctx, interaction, embed).await
}

async fn confess_info(
    admin: &ConfessionAdmin<'_>,
    ctx: &Context,
    interaction: &CommandInteraction,
    guild_id: u64,
) -> Result<(), AppError> {
    let Some(number) = integer_option(interaction) else {
        return respond_content(ctx, interaction, "A confession number is required.").await;
    };

    let record = admin.get_record_info(guild_id, number).await?;
    let embed = admin.record_info_embed(&record);

    respond_embed(ctx, interaction, embed).await
}

fn channel_option(interaction: &CommandInteraction) -> Option<ChannelId> {
    for option in interaction.data.options() {
        if let ResolvedValue::Channel(channel) = option.value {
            return Some(channel.id);
        }
    }

    None
}

fn integer_option(interaction: &CommandInteraction) -> Option<i64> {
    for option in interaction.data.options() {
        if let ResolvedValue::Integer(value) = option.value {
            return Some(value);
        }
    }

    None
}

async fn respond_content(
    ctx: &Context,
    interaction: &CommandInteraction,
    content: &str,
) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content.to_string())
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

async fn respond_embed(
    ctx: &Context,
    interaction: &CommandInteraction,
    embed: CreateEmbed,
) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}
