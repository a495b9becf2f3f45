use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Resets your conversation history with the AI.
#[poise::command(slash_command, rename = "chat-reset")]
pub(super) async fn chat_reset(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::reset(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
