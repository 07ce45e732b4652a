//! # Chat Transport Module
//!
//! The outbound seam between the conversation controller and the chat
//! network. The Telegram implementation lives here; tests substitute their
//! own recorder.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ForceReply, MessageId, ReplyParameters};

use crate::error::BotError;
use crate::session::MessageRef;

/// Options for an outbound message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Message to reply to
    pub reply_to: Option<MessageRef>,
    /// Ask the client to open a reply box for the replied-to sender only
    pub force_reply: bool,
}

impl SendOptions {
    pub fn reply_to(message: Option<MessageRef>) -> Self {
        Self {
            reply_to: message,
            force_reply: false,
        }
    }

    /// Reply to `message` and request a direct reply from its sender
    pub fn request_reply(message: Option<MessageRef>) -> Self {
        Self {
            reply_to: message,
            force_reply: true,
        }
    }
}

/// Sends text into the chat an event came from
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `text`, returning a reference to the posted message
    async fn send(&self, text: &str, options: SendOptions) -> Result<MessageRef, BotError>;
}

/// Telegram transport bound to a single chat
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramTransport {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, text: &str, options: SendOptions) -> Result<MessageRef, BotError> {
        let mut request = self.bot.send_message(self.chat_id, text);

        if let Some(MessageRef(id)) = options.reply_to {
            request = request.reply_parameters(ReplyParameters::new(MessageId(id)));
        }
        if options.force_reply {
            request = request.reply_markup(ForceReply::new().selective());
        }

        let sent = request.await?;
        Ok(MessageRef(sent.id.0))
    }
}
