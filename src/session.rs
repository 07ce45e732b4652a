//! # List Session Module
//!
//! In-memory state of the list currently being collected: its topic, owner,
//! the prompt the owner must reply to, and each participant's latest response.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A chat participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    /// Telegram user id, used for identity comparisons
    pub id: u64,
    /// Name shown in collated output
    pub name: String,
}

impl Participant {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Opaque reference to a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MessageRef(pub i32);

/// A participant's latest response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub participant: Participant,
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

/// The list currently being collected.
///
/// `responses` keeps first-submission order; resubmitting replaces the text
/// in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSession {
    topic: String,
    owner: Option<Participant>,
    responses: IndexMap<u64, Submission>,
    prompt: Option<MessageRef>,
    opened_at: Option<DateTime<Utc>>,
}

impl ListSession {
    /// Reset to a fresh session owned by `owner` with no topic
    pub fn open(&mut self, owner: Participant) {
        *self = Self {
            owner: Some(owner),
            opened_at: Some(Utc::now()),
            ..Self::default()
        };
    }

    /// Forget everything about the current session
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record the prompt message the owner must reply to
    pub fn set_prompt(&mut self, prompt: MessageRef) {
        self.prompt = Some(prompt);
    }

    pub fn set_topic(&mut self, topic: String) {
        self.topic = topic;
    }

    /// Store `text` as `participant`'s response, replacing any earlier one.
    ///
    /// Returns `true` when an earlier response was replaced.
    pub fn submit(&mut self, participant: Participant, text: String) -> bool {
        let submission = Submission {
            participant,
            text,
            submitted_at: Utc::now(),
        };
        self.responses
            .insert(submission.participant.id, submission)
            .is_some()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty()
    }

    pub fn owner(&self) -> Option<&Participant> {
        self.owner.as_ref()
    }

    /// Whether `participant` opened this session
    pub fn is_owner(&self, participant: &Participant) -> bool {
        self.owner.as_ref().is_some_and(|owner| owner.id == participant.id)
    }

    pub fn prompt(&self) -> Option<MessageRef> {
        self.prompt
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.opened_at
    }

    /// Responses in first-submission order
    pub fn responses(&self) -> impl Iterator<Item = &Submission> {
        self.responses.values()
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    pub fn response_of(&self, participant: &Participant) -> Option<&str> {
        self.responses
            .get(&participant.id)
            .map(|submission| submission.text.as_str())
    }
}

/// Validates a topic suggestion
pub fn validate_topic(topic: &str) -> Result<String, &'static str> {
    let trimmed = topic.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_validation() {
        assert!(validate_topic("Dinner Plans").is_ok());
        assert!(validate_topic("  Weekend trip  ").is_ok());

        assert_eq!(validate_topic(""), Err("empty"));
        assert_eq!(validate_topic("   "), Err("empty"));
        assert_eq!(validate_topic(&"a".repeat(300)).unwrap().len(), 300);
    }

    #[test]
    fn test_topic_trimming() {
        assert_eq!(validate_topic("  Dinner Plans \n").unwrap(), "Dinner Plans");
    }

    #[test]
    fn test_resubmission_keeps_position() {
        let mut session = ListSession::default();
        session.open(Participant::new(1, "alice"));

        let bob = Participant::new(2, "bob");
        let carol = Participant::new(3, "carol");
        assert!(!session.submit(bob.clone(), "Pizza".to_string()));
        assert!(!session.submit(carol.clone(), "Tacos".to_string()));
        assert!(session.submit(bob.clone(), "Burgers".to_string()));

        let order: Vec<(&str, &str)> = session
            .responses()
            .map(|s| (s.participant.name.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(order, vec![("bob", "Burgers"), ("carol", "Tacos")]);
        assert_eq!(session.response_of(&bob), Some("Burgers"));
    }

    #[test]
    fn test_open_resets_previous_session() {
        let mut session = ListSession::default();
        session.open(Participant::new(1, "alice"));
        session.set_topic("Lunch".to_string());
        session.set_prompt(MessageRef(10));
        session.submit(Participant::new(2, "bob"), "Soup".to_string());

        session.open(Participant::new(2, "bob"));
        assert!(!session.has_topic());
        assert_eq!(session.response_count(), 0);
        assert_eq!(session.prompt(), None);
        assert!(session.is_owner(&Participant::new(2, "bob")));
        assert!(!session.is_owner(&Participant::new(1, "alice")));
        assert!(session.opened_at().is_some());
    }

    #[test]
    fn test_owner_identity_uses_id() {
        let mut session = ListSession::default();
        session.open(Participant::new(7, "alice"));
        assert!(session.is_owner(&Participant::new(7, "alice_renamed")));
    }

    #[test]
    fn test_clear() {
        let mut session = ListSession::default();
        session.open(Participant::new(1, "alice"));
        session.set_topic("Lunch".to_string());
        session.clear();
        assert!(session.owner().is_none());
        assert!(!session.has_topic());
        assert!(session.opened_at().is_none());
    }
}
