//! # Conversation Controller Module
//!
//! The list lifecycle: `/start` opens a session and asks the initiator for a
//! topic, the initiator's reply to that prompt sets the topic, participants
//! then submit responses until `/stop` posts the final list and closes the
//! session.
//!
//! Events that do not fit the current state are dropped without a reply.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::commands::Command;
use crate::error::BotError;
use crate::formatter::format_list;
use crate::localization::{t_args_lang, t_lang};
use crate::session::{validate_topic, ListSession, MessageRef, Participant};
use crate::transport::{ChatTransport, SendOptions};

/// Where the current list is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ListState {
    /// No list is open
    #[default]
    Idle,
    /// Waiting for the owner to reply to the topic prompt
    AwaitingTopic,
    /// Accepting responses
    CollectingItems,
}

impl ListState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListState::Idle => "idle",
            ListState::AwaitingTopic => "awaiting_topic",
            ListState::CollectingItems => "collecting_items",
        }
    }
}

/// Kind of chat an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind {
    /// One-to-one chat with the bot
    Private,
    /// Multi-party chat
    Group,
}

/// A plain text message
#[derive(Debug, Clone)]
pub struct TextEvent {
    pub sender: Participant,
    pub room: RoomKind,
    /// Text as received
    pub text: String,
    /// Text with the bot mention removed, present only when the message mentioned the bot
    pub mentioned_text: Option<String>,
    /// Message this one replies to
    pub reply_to: Option<MessageRef>,
    pub language_code: Option<String>,
}

/// An inbound chat event
#[derive(Debug, Clone)]
pub enum ChatEvent {
    Command {
        sender: Participant,
        command: Command,
        /// The command message itself
        message: Option<MessageRef>,
        language_code: Option<String>,
    },
    Text(TextEvent),
}

/// Drives a single list session from chat events
#[derive(Debug, Default)]
pub struct ConversationController {
    state: ListState,
    session: ListSession,
}

impl ConversationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn session(&self) -> &ListSession {
        &self.session
    }

    /// Route `event` to the operation it triggers in the current state
    pub async fn handle<T>(&mut self, transport: &T, event: ChatEvent) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        match event {
            ChatEvent::Command {
                sender,
                command,
                message,
                language_code,
            } => {
                let lang = language_code.as_deref();
                match command {
                    Command::Start => self.start(transport, sender, message, lang).await,
                    Command::Help => self.help(transport, message, lang).await,
                    Command::Collate => self.collate(transport, message, lang).await,
                    Command::Stop => self.stop(transport, message, lang).await,
                }
            }
            ChatEvent::Text(event) => match self.state {
                ListState::AwaitingTopic => self.submit_topic(transport, event).await,
                ListState::CollectingItems => {
                    self.submit_item(event);
                    Ok(())
                }
                ListState::Idle => {
                    debug!(user_id = event.sender.id, "No open list, ignoring message");
                    Ok(())
                }
            },
        }
    }

    /// Open a new list owned by `initiator` and ask them for a topic
    pub async fn start<T>(
        &mut self,
        transport: &T,
        initiator: Participant,
        message: Option<MessageRef>,
        language_code: Option<&str>,
    ) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        if self.state != ListState::Idle {
            info!(
                previous_state = self.state.as_str(),
                discarded_responses = self.session.response_count(),
                "Replacing open list"
            );
        }

        let prompt = t_args_lang(
            "list-started",
            &[("owner", initiator.name.as_str())],
            language_code,
        );
        info!(user_id = initiator.id, owner = %initiator, "Starting new list");

        self.session.open(initiator);
        self.state = ListState::AwaitingTopic;

        let prompt_ref = transport
            .send(&prompt, SendOptions::request_reply(message))
            .await?;
        self.session.set_prompt(prompt_ref);
        debug!(prompt_id = prompt_ref.0, "Topic prompt sent");

        Ok(())
    }

    /// Accept the owner's reply to the topic prompt
    pub async fn submit_topic<T>(&mut self, transport: &T, event: TextEvent) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        if self.state != ListState::AwaitingTopic {
            debug!(state = self.state.as_str(), "Not awaiting a topic, ignoring");
            return Ok(());
        }

        let prompt = self.session.prompt();
        if prompt.is_none() || event.reply_to != prompt {
            debug!(user_id = event.sender.id, "Message is not a reply to the topic prompt");
            return Ok(());
        }

        if !self.session.is_owner(&event.sender) {
            debug!(user_id = event.sender.id, "Topic suggested by someone other than the owner");
            return Ok(());
        }

        let candidate = event.mentioned_text.as_deref().unwrap_or(&event.text);
        let topic = match validate_topic(candidate) {
            Ok(topic) => topic,
            Err(reason) => {
                debug!(user_id = event.sender.id, reason, "Rejected topic");
                return Ok(());
            }
        };

        info!(user_id = event.sender.id, topic = %topic, "Topic set");
        let ack = t_args_lang(
            "topic-accepted",
            &[("topic", topic.as_str())],
            event.language_code.as_deref(),
        );
        self.session.set_topic(topic);
        self.state = ListState::CollectingItems;

        transport.send(&ack, SendOptions::reply_to(None)).await?;
        Ok(())
    }

    /// Record a participant's response.
    ///
    /// Group messages count only when they mention the bot; private messages
    /// are stored verbatim.
    pub fn submit_item(&mut self, event: TextEvent) {
        if self.state != ListState::CollectingItems {
            debug!(state = self.state.as_str(), "Not collecting, ignoring message");
            return;
        }

        let text = match event.room {
            RoomKind::Group => match event.mentioned_text {
                Some(text) => text.trim().to_string(),
                None => {
                    debug!(user_id = event.sender.id, "Group message without mention, ignoring");
                    return;
                }
            },
            RoomKind::Private => event.text,
        };

        if text.is_empty() {
            debug!(user_id = event.sender.id, "Empty response, ignoring");
            return;
        }

        let user_id = event.sender.id;
        let replaced = self.session.submit(event.sender, text);
        info!(
            user_id,
            replaced,
            responses = self.session.response_count(),
            "Response received"
        );
    }

    /// Post the list collected so far
    pub async fn collate<T>(
        &self,
        transport: &T,
        message: Option<MessageRef>,
        language_code: Option<&str>,
    ) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        let list = format_list(&self.session, language_code);
        transport.send(&list, SendOptions::reply_to(message)).await?;
        Ok(())
    }

    /// Post the final list and close the session
    pub async fn stop<T>(
        &mut self,
        transport: &T,
        message: Option<MessageRef>,
        language_code: Option<&str>,
    ) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        let announcement = format!(
            "{}\n\n{}",
            t_args_lang("list-closed", &[("topic", self.session.topic())], language_code),
            format_list(&self.session, language_code)
        );

        match serde_json::to_string(&self.session) {
            Ok(snapshot) => info!(
                previous_state = self.state.as_str(),
                responses = self.session.response_count(),
                opened_at = ?self.session.opened_at(),
                snapshot = %snapshot,
                "List closed"
            ),
            Err(e) => warn!(error = %e, "Failed to serialize closed list"),
        }

        self.session.clear();
        self.state = ListState::Idle;

        transport
            .send(&announcement, SendOptions::reply_to(message))
            .await?;
        Ok(())
    }

    /// Post usage instructions
    pub async fn help<T>(
        &self,
        transport: &T,
        message: Option<MessageRef>,
        language_code: Option<&str>,
    ) -> Result<(), BotError>
    where
        T: ChatTransport + ?Sized,
    {
        transport
            .send(
                &t_lang("help-message", language_code),
                SendOptions::reply_to(message),
            )
            .await?;
        Ok(())
    }
}
