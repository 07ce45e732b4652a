//! Message Handler module for turning Telegram messages into chat events

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::commands::Command;
use crate::controller::{ChatEvent, ConversationController, RoomKind, TextEvent};
use crate::session::{MessageRef, Participant};
use crate::transport::TelegramTransport;

use super::mention::MentionDetector;

/// The controller shared by every handler task.
///
/// The lock is held while an event is handled, including its replies, so
/// events are applied one at a time in arrival order.
pub type SharedController = Arc<Mutex<ConversationController>>;

/// The human sender of `msg`, if any
pub fn sender_of(msg: &Message) -> Option<Participant> {
    let user = msg.from.as_ref()?;
    if user.is_bot {
        return None;
    }

    let name = user
        .username
        .clone()
        .unwrap_or_else(|| user.full_name());
    Some(Participant::new(user.id.0, name))
}

pub fn room_kind(msg: &Message) -> RoomKind {
    if msg.chat.is_private() {
        RoomKind::Private
    } else {
        RoomKind::Group
    }
}

fn language_of(msg: &Message) -> Option<String> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.clone())
}

/// Plain text that is not a command
pub fn is_plain_text(msg: Message) -> bool {
    msg.text().is_some_and(|text| !text.starts_with('/'))
}

/// Build the event for a plain text message
pub fn text_event(msg: &Message, mentions: &MentionDetector) -> Option<TextEvent> {
    let text = msg.text()?;
    let sender = sender_of(msg)?;

    Some(TextEvent {
        sender,
        room: room_kind(msg),
        text: text.to_string(),
        mentioned_text: mentions.strip(text),
        reply_to: msg.reply_to_message().map(|reply| MessageRef(reply.id.0)),
        language_code: language_of(msg),
    })
}

async fn dispatch(
    bot: Bot,
    msg: &Message,
    controller: SharedController,
    event: ChatEvent,
) -> Result<()> {
    let transport = TelegramTransport::new(bot, msg.chat.id);
    let mut controller = controller.lock().await;

    // Delivery failures are logged only; the user is not told and nothing is retried.
    if let Err(e) = controller.handle(&transport, event).await {
        error!(
            chat_id = %msg.chat.id,
            state = controller.state().as_str(),
            error = %e,
            "Failed to deliver reply"
        );
    }

    Ok(())
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    controller: SharedController,
) -> Result<()> {
    let Some(sender) = sender_of(&msg) else {
        return Ok(());
    };
    debug!(user_id = sender.id, chat_id = %msg.chat.id, command = ?cmd, "Received command");

    let event = ChatEvent::Command {
        sender,
        command: cmd,
        message: Some(MessageRef(msg.id.0)),
        language_code: language_of(&msg),
    };
    dispatch(bot, &msg, controller, event).await
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    controller: SharedController,
    mentions: Arc<MentionDetector>,
) -> Result<()> {
    let Some(event) = text_event(&msg, &mentions) else {
        return Ok(());
    };
    debug!(
        user_id = event.sender.id,
        chat_id = %msg.chat.id,
        room = ?event.room,
        mentioned = event.mentioned_text.is_some(),
        message_length = event.text.len(),
        "Received text message"
    );

    dispatch(bot, &msg, controller, ChatEvent::Text(event)).await
}
