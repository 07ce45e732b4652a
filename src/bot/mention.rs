//! Mention Detector module for recognising `@botname` in group messages

use regex::Regex;

/// Finds and removes mentions of the bot's username
#[derive(Debug, Clone)]
pub struct MentionDetector {
    pattern: Regex,
}

impl MentionDetector {
    /// Create a detector for `bot_username` (with or without the leading `@`)
    pub fn new(bot_username: &str) -> Result<Self, regex::Error> {
        let username = bot_username.trim_start_matches('@');
        // Telegram usernames are case-insensitive
        let pattern = Regex::new(&format!(r"(?i)@{}\b", regex::escape(username)))?;
        Ok(Self { pattern })
    }

    pub fn mentions(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Text with every mention removed, or `None` when the bot is not mentioned
    pub fn strip(&self, text: &str) -> Option<String> {
        if !self.mentions(text) {
            return None;
        }
        Some(self.pattern.replace_all(text, "").into_owned())
    }
}
