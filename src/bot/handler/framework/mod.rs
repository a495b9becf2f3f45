use std::sync::Arc;

use serenity::all::Framework;

use tokio::sync::RwLock;

use crate::{
    chat::{GoogleSearch, HistoryStore, OpenAiClient, SearchProvider, SessionManager},
    config::{store::ChatBotConfig, tenants::TenantStore},
};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

mod chat;
mod config;
mod joke;
mod reset;

pub struct InnerData {
    pub config: RwLock<ChatBotConfig>,
    pub tenants: TenantStore,
    pub sessions: SessionManager,
}
pub type Data = Arc<InnerData>;

pub async fn framework(config: ChatBotConfig) -> anyhow::Result<impl Framework + 'static> {
    let http = reqwest::Client::new();

    let completion = Arc::new(OpenAiClient::new(http.clone(), config.chat.api_base.clone()));

    let search = match (&config.search.google_api_key, &config.search.google_cse_id) {
        (Some(api_key), Some(cse_id)) => Some(Arc::new(GoogleSearch::new(
            http,
            api_key.clone(),
            cse_id.clone(),
        )) as Arc<dyn SearchProvider>),
        _ => None,
    };

    if search.is_none() {
        log::warn!("google search keys absent, web search disabled");
    }

    let sessions = SessionManager::new(
        HistoryStore::new(),
        completion,
        search,
        config.chat.persona.clone(),
        config.chat.default_model.clone(),
    );

    let tenants = TenantStore::read(config.path.with_file_name("tenants.toml"))?;

    let data = Arc::new(InnerData {
        config: RwLock::new(config),
        tenants,
        sessions,
    });

    Ok(poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                chat::chat(),
                reset::chat_reset(),
                config::chat_config(),
                joke::joke(),
            ],
            ..Default::default()
        })
        .setup({
            move |ctx, _ready, framework| {
                Box::pin({
                    async move {
                        poise::builtins::register_globally(ctx, &framework.options().commands)
                            .await?;
                        Ok(data)
                    }
                })
            }
        })
        .build())
}
