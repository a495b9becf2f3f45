use poise::CreateReply;

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;

use super::chat::context_id;

/// Discards the invoker's conversation context.
pub async fn reset(ctx: Context<'_>) -> HandlerResult<()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        data.sessions.reset_context(context_id(&ctx)).await;

        ctx.send(
            CreateReply::default()
                .content("🤖 Your conversation history has been reset.")
                .ephemeral(true),
        )
        .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
