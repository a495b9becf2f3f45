use super::{Context, Error};
use crate::bot::handler::{
    Handler,
    events::{HandlerResult, commands},
};

/// Chat with the AI, with optional live web search.
#[poise::command(slash_command)]
pub(super) async fn chat(
    ctx: Context<'_>,
    #[description = "What to talk about?"] prompt: String,
    #[description = "Choose a specific AI model."]
    #[autocomplete = "autocomplete_model"]
    model: Option<String>,
    #[description = "Set to 'True' to allow the AI to search the web for current info."]
    search_web: Option<bool>,
) -> Result<(), Error> {
    if let HandlerResult::Err(why) =
        commands::chat(ctx, prompt, model, search_web.unwrap_or(false)).await
    {
        Handler::on_error(why).await;
    }

    Ok(())
}

async fn autocomplete_model(ctx: Context<'_>, partial: &str) -> impl Iterator<Item = String> {
    let partial = partial.to_lowercase();
    let allowed = ctx.data().config.read().await.chat.allowed_models.clone();

    allowed
        .into_iter()
        .filter(move |model| model.to_lowercase().contains(&partial))
}
