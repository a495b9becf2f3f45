use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Configure the AI chat settings for a server.
#[poise::command(
    slash_command,
    rename = "chat-config",
    subcommands("set_key", "set_persona", "view"),
    subcommand_required,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub(super) async fn chat_config(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Set a custom OpenAI API key for this server.
#[poise::command(slash_command, rename = "set-key", guild_only)]
async fn set_key(
    ctx: Context<'_>,
    #[description = "Your OpenAI API key. Use 'reset' to remove."] key: String,
) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::set_key(ctx, key).await {
        Handler::on_error(why).await;
    }

    Ok(())
}

/// Set a custom personality for the AI.
#[poise::command(slash_command, rename = "set-persona", guild_only)]
async fn set_persona(
    ctx: Context<'_>,
    #[description = "A description of the AI's personality. Use 'reset' to remove."]
    persona: String,
) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::set_persona(ctx, persona).await {
        Handler::on_error(why).await;
    }

    Ok(())
}

/// View the current chat configuration.
#[poise::command(slash_command, guild_only)]
async fn view(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::view(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
