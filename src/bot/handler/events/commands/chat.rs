use poise::CreateReply;

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;
use crate::chat::{ChatError, ContextId, TenantConfig};
use crate::utils::macros::config;

/// Runs one conversation turn for the invoker's context.
pub async fn chat(
    ctx: Context<'_>,
    prompt: String,
    model: Option<String>,
    search_web: bool,
) -> HandlerResult<()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        // the model can take a while, keep the interaction alive
        ctx.defer().await?;

        let config = config!(data);

        let tenant_id = ctx.guild_id().map(|id| id.get());
        let context_id = context_id(&ctx);

        let row = data.tenants.resolve(tenant_id).await;
        let tenant = TenantConfig {
            api_key: row.api_key.or_else(|| config.chat.api_key.clone()),
            persona: row.persona,
        };

        let turn = data
            .sessions
            .submit_turn(context_id, &prompt, tenant, search_web, model.as_deref())
            .await;

        match turn {
            Ok(answer) => {
                ctx.send(CreateReply::default().content(answer)).await?;
            }
            Err(why) => {
                if let ChatError::Unexpected(ref inner) = why {
                    log::error!("chat turn failed: {inner:?}");
                }

                ctx.send(
                    CreateReply::default()
                        .content(why.user_reply())
                        .ephemeral(true),
                )
                .await?;
            }
        }

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}

/// One conversation thread per channel in guilds, per user everywhere else.
pub(super) fn context_id(ctx: &Context<'_>) -> ContextId {
    match ctx.guild_id() {
        Some(_) => ContextId::from(ctx.channel_id().get()),
        None => ContextId::from(ctx.author().id.get()),
    }
}
