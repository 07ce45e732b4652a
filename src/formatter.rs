//! Collated list rendering.

use crate::localization::t_args_lang;
use crate::localization::t_lang;
use crate::session::ListSession;

/// Render the collated list for `session`.
///
/// A header naming the topic and owner, then one `participant: text` line per
/// response in first-submission order. Fixed messages are returned when no
/// topic or no response exists yet.
pub fn format_list(session: &ListSession, language_code: Option<&str>) -> String {
    if !session.has_topic() {
        return t_lang("list-no-topic", language_code);
    }

    if session.response_count() == 0 {
        return t_lang("list-no-responses", language_code);
    }

    let owner = session
        .owner()
        .map(|owner| owner.name.as_str())
        .unwrap_or_default();

    let mut result = t_args_lang(
        "list-header",
        &[("topic", session.topic()), ("owner", owner)],
        language_code,
    );
    result.push('\n');

    for submission in session.responses() {
        result.push_str(&t_args_lang(
            "list-entry",
            &[
                ("participant", submission.participant.name.as_str()),
                ("text", submission.text.as_str()),
            ],
            language_code,
        ));
        result.push('\n');
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Participant;

    fn dinner_session() -> ListSession {
        let mut session = ListSession::default();
        session.open(Participant::new(1, "alice"));
        session.set_topic("Dinner Plans".to_string());
        session
    }

    #[test]
    fn test_no_topic() {
        let session = ListSession::default();
        assert_eq!(
            format_list(&session, None),
            "No topic yet. Use /start to begin a new list."
        );
    }

    #[test]
    fn test_no_responses() {
        assert_eq!(format_list(&dinner_session(), None), "No responses yet.");
    }

    #[test]
    fn test_header_and_entries() {
        let mut session = dinner_session();
        session.submit(Participant::new(2, "bob"), "Pizza".to_string());
        session.submit(Participant::new(3, "carol"), "Tacos".to_string());
        session.submit(Participant::new(2, "bob"), "Burgers".to_string());

        assert_eq!(
            format_list(&session, Some("en")),
            "Dinner Plans  (by alice)\nbob: Burgers\ncarol: Tacos\n"
        );
    }

    #[test]
    fn test_french_output() {
        let mut session = dinner_session();
        session.submit(Participant::new(2, "bob"), "Pizza".to_string());

        assert_eq!(
            format_list(&session, Some("fr-FR")),
            "Dinner Plans  (par alice)\nbob : Pizza\n"
        );
    }
}
