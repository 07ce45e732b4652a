//! # Configuration Module
//!
//! Runtime settings read from the process environment (and `.env`, loaded by
//! `main` before [`BotConfig::from_env`] is called).

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::localization::SUPPORTED_LANGUAGES;

/// Environment variable holding the Bot API token
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Environment variable selecting the log output format
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";
/// Environment variable selecting the fallback locale
pub const DEFAULT_LANGUAGE_VAR: &str = "DEFAULT_LANGUAGE";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "collate_bot=info,teloxide=warn";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid {
                name: LOG_FORMAT_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Bot configuration
#[derive(Clone)]
pub struct BotConfig {
    /// Telegram Bot API token
    pub bot_token: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Locale used when a sender's language is unknown or unsupported
    pub default_language: String,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("log_format", &self.log_format)
            .field("default_language", &self.default_language)
            .finish()
    }
}

impl BotConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `TELEGRAM_BOT_TOKEN`
    /// - `LOG_FORMAT` (optional, `pretty` or `json`, defaults to `pretty`)
    /// - `DEFAULT_LANGUAGE` (optional, defaults to `en`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(TOKEN_VAR)
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing(TOKEN_VAR))?;

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        let default_language = match lookup(DEFAULT_LANGUAGE_VAR) {
            Some(value) => {
                let lang = value.trim().to_ascii_lowercase();
                if !SUPPORTED_LANGUAGES.contains(&lang.as_str()) {
                    return Err(ConfigError::Invalid {
                        name: DEFAULT_LANGUAGE_VAR,
                        value,
                    });
                }
                lang
            }
            None => "en".to_string(),
        };

        Ok(Self {
            bot_token,
            log_format,
            default_language,
        })
    }
}
