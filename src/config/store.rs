use anyhow::bail;

use super::structure::{ChatBotConfigInner, ChatBotConfigTOML};
use std::{
    ops::{Deref, DerefMut},
    path::PathBuf,
};

#[derive(Debug)]
pub struct ChatBotConfig {
    pub path: PathBuf,
    cached: ChatBotConfigTOML,
}

impl ChatBotConfig {
    pub fn read(path: PathBuf) -> Result<Self, anyhow::Error> {
        let path = match path.is_dir() {
            true => path.join("config.toml"),
            false => path,
        };

        if !path.exists() {
            return Self::new(path);
        }

        if !path.is_file() {
            bail!(
                "Given path exists and is not a file... either change the path or delete the file."
            );
        }

        let config_str = std::fs::read_to_string(&path)?;

        Ok(Self {
            path,
            cached: toml::from_str(&config_str)?,
        })
    }

    /// Re-reads the file, returning whether the cached copy changed. A file
    /// that stopped parsing keeps the cached copy.
    pub fn update(&mut self) -> bool {
        let new = match Self::read(self.path.clone()) {
            Ok(new) => new,
            Err(why) => {
                log::warn!("config re-read failed, keeping cached copy: {why:?}");
                return false;
            }
        };

        match self.cached.config == new.cached.config {
            true => false,
            false => {
                self.cached = new.cached;
                true
            }
        }
    }

    fn new(path: PathBuf) -> Result<Self, anyhow::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let config = Self {
            path,
            cached: ChatBotConfigTOML::default(),
        };

        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, toml::to_string(&self.cached)?)?;

        Ok(())
    }
}

impl Deref for ChatBotConfig {
    type Target = ChatBotConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.cached.config
    }
}

impl DerefMut for ChatBotConfig {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cached.config
    }
}

impl Clone for ChatBotConfig {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            cached: self.cached.clone(),
        }
    }
}

impl PartialEq for ChatBotConfig {
    fn eq(&self, other: &Self) -> bool {
        self.cached.config == other.cached.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = ChatBotConfig::read(path.clone()).unwrap();

        assert!(path.is_file());
        assert_eq!(config.chat.default_model, "gpt-3.5-turbo");
        assert_eq!(config.discord.token, "");
    }

    #[test]
    fn a_directory_path_resolves_to_config_toml_inside_it() {
        let dir = tempfile::tempdir().unwrap();

        let config = ChatBotConfig::read(dir.path().to_path_buf()).unwrap();

        assert_eq!(config.path, dir.path().join("config.toml"));
    }

    #[test]
    fn values_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ChatBotConfig::read(path.clone()).unwrap();
        config.discord.token = "discord-token".to_string();
        config.chat.api_key = Some("sk-round-trip".to_string());
        config.search.google_api_key = Some("g-key".to_string());
        config.save().unwrap();

        let reread = ChatBotConfig::read(path).unwrap();
        assert_eq!(reread.discord.token, "discord-token");
        assert_eq!(reread.chat.api_key.as_deref(), Some("sk-round-trip"));
        assert_eq!(reread.search.google_api_key.as_deref(), Some("g-key"));
    }

    #[test]
    fn update_detects_external_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ChatBotConfig::read(path.clone()).unwrap();
        assert!(!config.update());

        let mut edited = config.clone();
        edited.chat.default_model = "gpt-4".to_string();
        edited.save().unwrap();

        assert!(config.update());
        assert_eq!(config.chat.default_model, "gpt-4");
    }
}
