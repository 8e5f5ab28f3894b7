use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::{env, path::Path};

/// Main configuration for the bot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Discord bot configuration
    pub discord: DiscordConfig,
    /// MarketHunt API configuration
    #[serde(default)]
    pub market: MarketConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Discord bot token
    pub token: String,
    /// Discord application ID
    pub application_id: Option<u64>,
    /// Legacy text command prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Base URL for the MarketHunt API
    pub base_url: String,
    /// Timeout for outbound API calls, in seconds
    pub timeout_secs: u64,
}

fn default_prefix() -> String {
    "!".to_string()
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.markethunt.win".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig {
                token: String::new(),
                application_id: None,
                prefix: default_prefix(),
            },
            market: MarketConfig::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.discord.token.is_empty() {
            return Err(ConfigError::Invalid {
                field: "discord.token".to_string(),
                reason: "Discord token cannot be empty".to_string(),
            }
            .into());
        }

        if self.market.base_url.is_empty() {
            return Err(ConfigError::Invalid {
                field: "market.base_url".to_string(),
                reason: "API base URL cannot be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Load configuration from environment variables and config file
    pub fn load() -> Result<Self> {
        // Try to load from file first
        let config_path =
            env::var("MARKETHUNT_CONFIG").unwrap_or_else(|_| "markethunt.toml".to_string());

        if Path::new(&config_path).exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|_e| ConfigError::NotFound {
                    path: config_path.clone(),
                })?;
            let config: Config =
                toml::from_str(&contents).map_err(|e| ConfigError::ParseFailed { source: e })?;

            // Override with environment variables
            Ok(config.override_from_env())
        } else {
            // Load from environment variables only
            Ok(Self::from_env())
        }
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::default().override_from_env()
    }

    /// Override config values with environment variables
    fn override_from_env(mut self) -> Self {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            self.discord.token = token;
        }
        if let Ok(app_id) = env::var("APP_ID") {
            if let Ok(id) = app_id.parse() {
                self.discord.application_id = Some(id);
            }
        }
        if let Ok(prefix) = env::var("COMMAND_PREFIX") {
            self.discord.prefix = prefix;
        }

        if let Ok(url) = env::var("MARKETHUNT_API_URL") {
            self.market.base_url = url;
        }
        if let Ok(timeout) = env::var("MARKETHUNT_API_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.market.timeout_secs = secs;
            }
        }

        self
    }
}

/// Helper to load dotenv file if it exists
pub fn load_dotenv() {
    if let Ok(path) = env::var("DOTENV_PATH") {
        dotenv::from_path(&path).ok();
    } else {
        dotenv::dotenv().ok();
    }
}
