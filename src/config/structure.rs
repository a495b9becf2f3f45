use serde::{Deserialize, Serialize};

/// Persona used whenever neither the config file nor a tenant override
/// provides one.
pub const DEFAULT_PERSONA: &str = "You are Milo, a friendly and helpful Discord bot. \
     You can access real-time information using the 'search' tool for current events \
     or specific data. Keep your answers concise and engaging.";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ChatBotConfigTOML {
    pub config: ChatBotConfigInner,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatBotConfigInner {
    pub discord: DiscordConfig,
    pub chat: ChatConfig,
    pub search: SearchConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DiscordConfig {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Process-wide fallback key; tenants may override it per guild.
    pub api_key: Option<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_allowed_models")]
    pub allowed_models: Vec<String>,
    /// Gates `/chat-config set-key`.
    #[serde(default = "default_allow_user_keys")]
    pub allow_user_keys: bool,
    #[serde(default = "default_persona")]
    pub persona: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            default_model: default_model(),
            allowed_models: default_allowed_models(),
            allow_user_keys: default_allow_user_keys(),
            persona: default_persona(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchConfig {
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
}

impl SearchConfig {
    /// Web search is provisioned only when both halves are present.
    pub fn enabled(&self) -> bool {
        self.google_api_key.is_some() && self.google_cse_id.is_some()
    }
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_allowed_models() -> Vec<String> {
    vec![default_model()]
}

fn default_allow_user_keys() -> bool {
    true
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_minimal_file_fills_in_the_defaults() {
        let parsed: ChatBotConfigTOML = toml::from_str(
            r#"
            [config.discord]
            token = "discord-token"

            [config.chat]

            [config.search]
            "#,
        )
        .unwrap();

        let chat = &parsed.config.chat;
        assert_eq!(chat.api_key, None);
        assert_eq!(chat.api_base, "https://api.openai.com/v1");
        assert_eq!(chat.default_model, "gpt-3.5-turbo");
        assert_eq!(chat.allowed_models, vec!["gpt-3.5-turbo"]);
        assert!(chat.allow_user_keys);
        assert_eq!(chat.persona, DEFAULT_PERSONA);
        assert!(!parsed.config.search.enabled());
    }

    #[test]
    fn search_is_enabled_only_with_both_keys() {
        let half = SearchConfig {
            google_api_key: Some("key".to_string()),
            google_cse_id: None,
        };
        assert!(!half.enabled());

        let full = SearchConfig {
            google_api_key: Some("key".to_string()),
            google_cse_id: Some("cse".to_string()),
        };
        assert!(full.enabled());
    }
}
