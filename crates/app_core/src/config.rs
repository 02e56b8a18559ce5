//! Application configuration

use crate::command::CommandId;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub browser: BrowserConfig,
    pub keybindings: HashMap<String, Vec<String>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Directory opened at startup; `./images` when unset
    pub start_directory: Option<PathBuf>,
    /// Where quarantined files are moved, relative to the working directory
    pub quarantine_dir: PathBuf,
    /// Start on a random image instead of the first one
    pub random_on_start: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            start_directory: None,
            quarantine_dir: PathBuf::from("trash"),
            random_on_start: true,
        }
    }
}

impl BrowserConfig {
    /// Resolve the directory to browse at startup
    pub fn start_directory(&self) -> PathBuf {
        match &self.start_directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("images"),
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config = Self::from_toml(&content)?;
            tracing::info!("Configuration loaded from {:?}", config_path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        tracing::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "RandomImageViewer", "RandomImageViewer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();

    // Navigation
    kb.insert(CommandId::NAV_STEP_LEFT.into(), vec!["Left".into(), "h".into()]);
    kb.insert(CommandId::NAV_STEP_RIGHT.into(), vec!["Right".into(), "l".into()]);
    kb.insert(CommandId::NAV_RANDOM.into(), vec!["r".into(), "Space".into()]);
    kb.insert(CommandId::NAV_BACK.into(), vec!["Backspace".into(), "b".into()]);

    // File
    kb.insert(CommandId::FILE_QUARANTINE.into(), vec!["Delete".into(), "x".into()]);

    // App
    kb.insert(CommandId::APP_OPEN_FOLDER.into(), vec!["o".into()]);
    kb.insert(CommandId::APP_QUIT.into(), vec!["q".into(), "Escape".into()]);

    kb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.browser.quarantine_dir, PathBuf::from("trash"));
        assert!(config.browser.random_on_start);
        assert!(config.browser.start_directory().ends_with("images"));
        assert!(config.keybindings.contains_key(CommandId::FILE_QUARANTINE));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [browser]
            start_directory = "/srv/pictures"
            random_on_start = false
            "#,
        )
        .unwrap();

        assert_eq!(config.browser.start_directory(), PathBuf::from("/srv/pictures"));
        assert!(!config.browser.random_on_start);
        assert_eq!(config.browser.quarantine_dir, PathBuf::from("trash"));
        assert!(config.keybindings.contains_key(CommandId::NAV_RANDOM));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.browser.quarantine_dir = PathBuf::from("rejects");

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();

        assert_eq!(parsed.browser.quarantine_dir, PathBuf::from("rejects"));
        assert_eq!(parsed.keybindings, config.keybindings);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(AppConfig::from_toml("browser = 3").is_err());
    }
}
