use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::alternatives::LinkOptions;
use crate::error::{Result, StylistError};

/// Global stylist configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Chat model to ask for advice
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Where the stylist app is hosted, for app links and the bookmarklet
    #[serde(default)]
    pub app_url: Option<String>,

    /// Ask for short advice unless --full is given
    #[serde(default = "default_true")]
    pub short_by_default: bool,

    /// Shop alternative link settings
    #[serde(default)]
    pub links: LinkOptions,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_tokens() -> u32 {
    450
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
            app_url: None,
            short_by_default: true,
            links: LinkOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse_toml(&content)
        } else {
            tracing::debug!(?path, "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML config
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| StylistError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        tracing::info!(path = ?config_path, "wrote config file");
        Ok(())
    }

    /// Reject values the rest of the crate cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(StylistError::ConfigError("model must not be empty".into()));
        }
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(StylistError::ConfigError(format!(
                "api_base '{}' must be an http(s) URL",
                self.api_base
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StylistError::ConfigError(format!(
                "temperature {} is out of range (0.0 - 2.0)",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(StylistError::ConfigError("max_tokens must be positive".into()));
        }
        if !(3..=8).contains(&self.links.keyword_tokens) {
            return Err(StylistError::ConfigError(format!(
                "links.keyword_tokens {} is out of range (3 - 8)",
                self.links.keyword_tokens
            )));
        }
        if let Some(app_url) = &self.app_url {
            url::Url::parse(app_url)?;
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports STYLIST_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("STYLIST_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "stylist")
            .ok_or_else(|| StylistError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Endpoint for chat completions
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 450);
        assert!(config.short_by_default);
        assert_eq!(config.links, LinkOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::parse_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::parse_toml(
            "model = \"gpt-4o\"\n[links]\nkeyword_tokens = 5\ninclude_web_search = true\n",
        )
        .unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.links.keyword_tokens, 5);
        assert_eq!(config.links.search_links, 2);
        assert!(config.links.include_web_search);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(Config::parse_toml("temperature = 3.5").is_err());
        assert!(Config::parse_toml("[links]\nkeyword_tokens = 12").is_err());
        assert!(Config::parse_toml("api_base = \"ftp://x\"").is_err());
        assert!(Config::parse_toml("app_url = \"not a url\"").is_err());
    }

    #[test]
    fn test_completions_url() {
        let config = Config {
            api_base: "http://localhost:11434/v1/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.completions_url(), "http://localhost:11434/v1/chat/completions");
    }
}
