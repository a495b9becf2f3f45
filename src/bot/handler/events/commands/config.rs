use poise::CreateReply;
use serenity::all::CreateEmbed;

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;
use crate::utils::macros::config;

/// Stores or clears the guild's API key override.
pub async fn set_key(ctx: Context<'_>, key: String) -> HandlerResult<()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        let config = config!(data);

        if !config.chat.allow_user_keys {
            ctx.send(
                CreateReply::default()
                    .content("The bot owner has disabled custom API keys.")
                    .ephemeral(true),
            )
            .await?;

            return Ok(());
        }

        let guild_id = guild_id(&ctx)?;

        let content = match key.to_lowercase() == "reset" {
            true => {
                data.tenants.set_key(guild_id, None).await?;
                "✅ Server API key removed."
            }
            false => {
                data.tenants.set_key(guild_id, Some(key)).await?;
                "✅ Server API key saved."
            }
        };

        ctx.send(CreateReply::default().content(content).ephemeral(true))
            .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}

/// Stores or clears the guild's persona override.
pub async fn set_persona(ctx: Context<'_>, persona: String) -> HandlerResult<()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        if persona.chars().count() > 500 {
            ctx.send(
                CreateReply::default()
                    .content("Persona is too long (max 500 chars).")
                    .ephemeral(true),
            )
            .await?;

            return Ok(());
        }

        let guild_id = guild_id(&ctx)?;

        let content = match persona.to_lowercase() == "reset" {
            true => {
                data.tenants.set_persona(guild_id, None).await?;
                "✅ AI persona reset to default."
            }
            false => {
                data.tenants.set_persona(guild_id, Some(persona)).await?;
                "✅ AI persona updated."
            }
        };

        ctx.send(CreateReply::default().content(content).ephemeral(true))
            .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}

/// Shows the guild's effective chat configuration.
pub async fn view(ctx: Context<'_>) -> HandlerResult<()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        let config = config!(data);
        let guild_id = guild_id(&ctx)?;

        let row = data.tenants.resolve(Some(guild_id)).await;

        let key_status = match &row.api_key {
            Some(key) => format!("`{}` (Custom)", mask_key(key)),
            None if config.chat.api_key.is_some() => "Using Bot's Default Key".to_string(),
            None => "⚠️ Not Configured".to_string(),
        };

        let persona = row
            .persona
            .clone()
            .unwrap_or_else(|| "Default (Friendly, helpful, and web-enabled)".to_string());

        let web_search = match data.sessions.web_search_available() {
            true => "✅ Enabled",
            false => "⚠️ Disabled (Bot owner has not configured Google API keys)",
        };

        let guild_name = ctx
            .guild()
            .map(|guild| guild.name.clone())
            .unwrap_or_else(|| "this server".to_string());

        let mut embed = CreateEmbed::default()
            .color(0x3498DB)
            .title(format!("Chat Configuration for {guild_name}"))
            .field("Server API Key", key_status, false)
            .field("AI Persona", persona, false)
            .field("Web Search", web_search, false)
            .field("API Base URL", format!("`{}`", config.chat.api_base), false);

        if let Some(updated_at) = row.updated_at {
            embed = embed.field(
                "Overrides Updated",
                updated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
                false,
            );
        }

        ctx.send(CreateReply::default().embed(embed).ephemeral(true))
            .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}

fn guild_id(ctx: &Context<'_>) -> anyhow::Result<u64> {
    ctx.guild_id()
        .map(|id| id.get())
        .ok_or_else(|| anyhow::anyhow!("guild-only command invoked outside a guild"))
}

/// First five and last four characters, enough to recognize a key without
/// exposing it.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(5).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();

    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::mask_key;

    #[test]
    fn long_keys_keep_only_the_edges() {
        assert_eq!(mask_key("sk-abcdefghijklmnop"), "sk-ab...mnop");
    }

    #[test]
    fn short_keys_do_not_panic() {
        assert_eq!(mask_key("abc"), "abc...abc");
    }
}
