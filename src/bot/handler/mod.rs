use serenity::{
    all::{Context, EventHandler, Ready},
    async_trait,
};

mod events;
pub mod framework;

pub struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        log::info!("{} is connected!", ready.user.name);

        ctx.set_presence(None, serenity::all::OnlineStatus::Online);
    }
}
