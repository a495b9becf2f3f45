use std::path::PathBuf;

use config::store::ChatBotConfig;
use utils::log::Logger;

mod bot;
mod chat;
mod config;
mod utils;

#[tokio::main]
async fn main() {
    Logger::init(None);

    let config = match ChatBotConfig::read(PathBuf::from("config.toml")) {
        Ok(config) => config,
        Err(why) => {
            log::error!("could not load config.toml: {why:?}");
            return;
        }
    };

    let bot = match bot::ChatBot::new(config).await {
        Ok(bot) => bot,
        Err(why) => {
            log::error!("failed to start the bot: {why:?}");
            return;
        }
    };

    bot.run().await;
}
