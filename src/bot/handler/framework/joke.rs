use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Tells a random joke.
#[poise::command(slash_command)]
pub(super) async fn joke(ctx: Context<'_>) -> Result<(), Error> {
    if let HandlerResult::Err(why) = commands::joke(ctx).await {
        Handler::on_error(why).await;
    }

    Ok(())
}
