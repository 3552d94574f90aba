use std::path::PathBuf;

use thiserror::Error;

use crate::directory::DEFAULT_FUTURE_EVENTS_CAP;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub chat_id: i64,
    pub telegram_api_url: String,

    // Database
    pub database_path: PathBuf,

    // Webhook
    pub web_host: String,
    pub web_port: u16,
    pub webhook_path: String,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,

    // Directory
    pub future_events_cap: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Telegram
            bot_token: required_env("BOT_TOKEN")?,
            chat_id: parse_required_i64("CHAT_ID")?,
            telegram_api_url: env_or_default("TELEGRAM_API_URL", "https://api.telegram.org")
                .trim_end_matches('/')
                .to_string(),

            // Database
            database_path: PathBuf::from(env_or_default("DATABASE_PATH", "./data/posts.sqlite")),

            // Webhook
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("PORT", 8080)?,
            webhook_path: env_or_default("WEBHOOK_PATH", "/"),
            webhook_url: optional_env("WEBHOOK_URL"),
            webhook_secret: optional_env("WEBHOOK_SECRET"),

            // Directory
            future_events_cap: parse_env_usize("FUTURE_EVENTS_CAP", DEFAULT_FUTURE_EVENTS_CAP)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "BOT_TOKEN".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.future_events_cap == 0 {
            return Err(ConfigError::InvalidValue {
                name: "FUTURE_EVENTS_CAP".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.webhook_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                name: "WEBHOOK_PATH".to_string(),
                message: format!("must start with '/', got '{}'", self.webhook_path),
            });
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_required_i64(name: &str) -> Result<i64, ConfigError> {
    required_env(name)?
        .trim()
        .parse()
        .map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        })
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
