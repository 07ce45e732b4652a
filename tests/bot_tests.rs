//! # Bot Adapter Tests
//!
//! Translation of Telegram messages (deserialized from Bot API JSON) into
//! controller events.

use serde_json::json;
use teloxide::types::Message;

use collate_bot::bot::message_handler::{is_plain_text, room_kind, sender_of, text_event};
use collate_bot::bot::MentionDetector;
use collate_bot::controller::RoomKind;
use collate_bot::session::MessageRef;

fn group_chat() -> serde_json::Value {
    json!({ "id": -100123, "type": "supergroup", "title": "Friends" })
}

fn bob() -> serde_json::Value {
    json!({
        "id": 2,
        "is_bot": false,
        "first_name": "Bob",
        "last_name": "Builder",
        "username": "bob",
        "language_code": "fr-FR"
    })
}

fn message(chat: serde_json::Value, from: serde_json::Value, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 10,
        "date": 1_700_000_000,
        "chat": chat,
        "from": from,
        "text": text
    }))
    .expect("valid message json")
}

fn detector() -> MentionDetector {
    MentionDetector::new("collatebot").unwrap()
}

#[test]
fn test_group_message_with_mention() {
    let msg = message(group_chat(), bob(), "@collatebot  Pizza ");
    let event = text_event(&msg, &detector()).unwrap();

    assert_eq!(event.sender.id, 2);
    assert_eq!(event.sender.name, "bob");
    assert_eq!(event.room, RoomKind::Group);
    assert_eq!(event.text, "@collatebot  Pizza ");
    assert_eq!(event.mentioned_text.as_deref(), Some("  Pizza "));
    assert_eq!(event.reply_to, None);
    assert_eq!(event.language_code.as_deref(), Some("fr-FR"));
}

#[test]
fn test_private_message_without_mention() {
    let chat = json!({ "id": 2, "type": "private", "first_name": "Bob" });
    let msg = message(chat, bob(), "Pizza");
    let event = text_event(&msg, &detector()).unwrap();

    assert_eq!(room_kind(&msg), RoomKind::Private);
    assert_eq!(event.room, RoomKind::Private);
    assert_eq!(event.mentioned_text, None);
}

#[test]
fn test_reply_reference_is_extracted() {
    let msg: Message = serde_json::from_value(json!({
        "message_id": 11,
        "date": 1_700_000_001,
        "chat": group_chat(),
        "from": bob(),
        "text": "Dinner Plans",
        "reply_to_message": {
            "message_id": 7,
            "date": 1_700_000_000,
            "chat": group_chat(),
            "from": { "id": 99, "is_bot": true, "first_name": "Collate", "username": "collatebot" },
            "text": "bob has started a new list. Please suggest a topic or title."
        }
    }))
    .unwrap();

    let event = text_event(&msg, &detector()).unwrap();
    assert_eq!(event.reply_to, Some(MessageRef(7)));
}

#[test]
fn test_sender_without_username_uses_full_name() {
    let from = json!({ "id": 3, "is_bot": false, "first_name": "Carol", "last_name": "Danvers" });
    let msg = message(group_chat(), from, "hello");

    let sender = sender_of(&msg).unwrap();
    assert_eq!(sender.id, 3);
    assert_eq!(sender.name, "Carol Danvers");
}

#[test]
fn test_bot_senders_are_ignored() {
    let from = json!({ "id": 4, "is_bot": true, "first_name": "Other", "username": "otherbot" });
    let msg = message(group_chat(), from, "@collatebot hi");

    assert!(sender_of(&msg).is_none());
    assert!(text_event(&msg, &detector()).is_none());
}

#[test]
fn test_commands_are_not_plain_text() {
    assert!(!is_plain_text(message(group_chat(), bob(), "/collate")));
    assert!(!is_plain_text(message(group_chat(), bob(), "/unknown@collatebot")));
    assert!(is_plain_text(message(group_chat(), bob(), "Pizza /please")));
}
