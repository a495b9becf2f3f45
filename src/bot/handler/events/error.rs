use poise::CreateReply;
use serenity::all::CreateEmbed;

use crate::bot::handler::framework::Context;

use super::super::Handler;

impl Handler {
    /// attempts to relay an error back to the invoker, still logging it
    pub async fn on_error(error: HandlerError<'_>) {
        let HandlerError { error, location } = error;

        log::error!("handling error:\n\n{error:?}\n");

        let embed = CreateEmbed::default()
            .color(0xFF6961)
            .title("Milo encountered an error")
            .description(format!("```{error}```"));

        if let Err(why) = location
            .send(CreateReply::default().embed(embed).ephemeral(true))
            .await
        {
            log::error!("error during propagation of error to user: {why:?}");
        }
    }
}

pub struct HandlerError<'a> {
    error: anyhow::Error,
    location: Context<'a>,
}

pub enum HandlerResult<'a, T> {
    Ok(T),
    Err(HandlerError<'a>),
}

impl<'a, T> HandlerResult<'a, T> {
    pub fn ok(value: T) -> Self {
        Self::Ok(value)
    }

    pub fn err(error: impl Into<anyhow::Error>, location: Context<'a>) -> Self {
        Self::Err(HandlerError {
            error: error.into(),
            location,
        })
    }
}
