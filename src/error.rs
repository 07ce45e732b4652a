//! # Error Types Module
//!
//! Error types shared by the conversation controller and the Telegram adapter.

/// Errors raised while loading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    /// A variable is set but its value cannot be used
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Errors produced by the collate bot
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    /// Sending through the chat transport failed
    #[error("transport error: {0}")]
    Transport(#[from] teloxide::RequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let missing = ConfigError::Missing("TELEGRAM_BOT_TOKEN");
        assert_eq!(
            missing.to_string(),
            "missing environment variable: TELEGRAM_BOT_TOKEN"
        );

        let invalid = ConfigError::Invalid {
            name: "LOG_FORMAT",
            value: "xml".to_string(),
        };
        assert_eq!(invalid.to_string(), "invalid value for LOG_FORMAT: xml");
    }
}
