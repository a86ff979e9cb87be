//! Poll answer record as served by the backend.

use serde::{Deserialize, Serialize};

/// One answer belonging to a question.
///
/// `checked` is the only mutable part: toggling it locally and sending
/// the record back is how a vote is cast. The backend omits the key for
/// answers nobody voted on, so it defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    id_moderator: Option<String>,
    id_poll: Option<String>,
    id_question: Option<String>,
    id_answer: Option<String>,
    title: Option<String>,
    details: Option<String>,
    #[serde(default)]
    checked: bool,
}

impl Answer {
    /// Id of the moderator who owns the poll.
    pub fn id_moderator(&self) -> Option<&str> {
        self.id_moderator.as_deref()
    }

    /// Id of the poll this answer belongs to.
    pub fn id_poll(&self) -> Option<&str> {
        self.id_poll.as_deref()
    }

    /// Id of the question this answer belongs to.
    pub fn id_question(&self) -> Option<&str> {
        self.id_question.as_deref()
    }

    /// Unique id of this answer.
    pub fn id_answer(&self) -> Option<&str> {
        self.id_answer.as_deref()
    }

    /// Short answer title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Longer description, often empty.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Whether this session has a vote on the answer.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Flip the local vote mark.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    /// Set the local vote mark.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let json = r#"{"idModerator":"7","idPoll":"3","idQuestion":"9","idAnswer":"21","title":"Blue","details":"","checked":true}"#;
        let answer: Answer = serde_json::from_str(json).unwrap();

        assert_eq!(answer.id_moderator(), Some("7"));
        assert_eq!(answer.id_poll(), Some("3"));
        assert_eq!(answer.id_question(), Some("9"));
        assert_eq!(answer.id_answer(), Some("21"));
        assert_eq!(answer.title(), Some("Blue"));
        assert_eq!(answer.details(), Some(""));
        assert!(answer.is_checked());
    }

    #[test]
    fn test_checked_defaults_to_false() {
        let answer: Answer = serde_json::from_str(r#"{"idAnswer":"2","title":"Red"}"#).unwrap();
        assert!(!answer.is_checked());
    }

    #[test]
    fn test_toggle() {
        let mut answer: Answer = serde_json::from_str(r#"{"idAnswer":"2"}"#).unwrap();

        answer.toggle();
        assert!(answer.is_checked());
        answer.toggle();
        assert!(!answer.is_checked());

        answer.set_checked(true);
        assert!(answer.is_checked());
    }

    #[test]
    fn test_vote_body_carries_checked() {
        let mut answer: Answer = serde_json::from_str(r#"{"idAnswer":"2","title":"Red"}"#).unwrap();
        answer.toggle();

        let json = serde_json::to_string(&answer).unwrap();
        assert!(json.contains("\"checked\":true"));
        assert!(json.contains("\"idAnswer\":\"2\""));
    }
}
