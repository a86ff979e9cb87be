//! Poll question record as served by the backend.

use serde::{Deserialize, Serialize};

/// One question within a poll, as received from the server.
///
/// Every field is optional: the backend omits keys it has no value for,
/// and the record keeps whatever subset arrived. The answer bounds stay
/// string-encoded because that is how the wire encodes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id_moderator: Option<String>,
    id_poll: Option<String>,
    id_question: Option<String>,
    title: Option<String>,
    details: Option<String>,
    answer_min: Option<String>,
    answer_max: Option<String>,
}

impl Question {
    /// Id of the moderator who owns the poll.
    pub fn id_moderator(&self) -> Option<&str> {
        self.id_moderator.as_deref()
    }

    /// Id of the poll this question belongs to.
    pub fn id_poll(&self) -> Option<&str> {
        self.id_poll.as_deref()
    }

    /// Unique id of this question.
    pub fn id_question(&self) -> Option<&str> {
        self.id_question.as_deref()
    }

    /// Short question title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Longer description, often empty.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Minimum number of answers to check, string-encoded on the wire.
    pub fn answer_min(&self) -> Option<&str> {
        self.answer_min.as_deref()
    }

    /// Maximum number of answers to check, string-encoded on the wire.
    pub fn answer_max(&self) -> Option<&str> {
        self.answer_max.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let json = r#"{"idModerator":"7","idPoll":"3","idQuestion":"9","title":"Favorite color?","details":"","answerMin":"1","answerMax":"5"}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id_moderator(), Some("7"));
        assert_eq!(question.id_poll(), Some("3"));
        assert_eq!(question.id_question(), Some("9"));
        assert_eq!(question.title(), Some("Favorite color?"));
        assert_eq!(question.details(), Some(""));
        assert_eq!(question.answer_min(), Some("1"));
        assert_eq!(question.answer_max(), Some("5"));
    }

    #[test]
    fn test_missing_keys_stay_unset() {
        let question: Question = serde_json::from_str(r#"{"title":"Lunch spot?"}"#).unwrap();

        assert_eq!(question.title(), Some("Lunch spot?"));
        assert_eq!(question.id_moderator(), None);
        assert_eq!(question.id_poll(), None);
        assert_eq!(question.id_question(), None);
        assert_eq!(question.details(), None);
        assert_eq!(question.answer_min(), None);
        assert_eq!(question.answer_max(), None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r#"{"idQuestion":"4","title":"Venue?","indexInPoll":2,"visibility":"open"}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.id_question(), Some("4"));
        assert_eq!(question.title(), Some("Venue?"));
    }

    #[test]
    fn test_bounds_stay_strings() {
        let json = r#"{"answerMin":"007","answerMax":"1e3"}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        assert_eq!(question.answer_min(), Some("007"));
        assert_eq!(question.answer_max(), Some("1e3"));
    }

    #[test]
    fn test_round_trip() {
        let json = r#"{"idModerator":"7","idPoll":"3","idQuestion":"9","title":"Favorite color?","details":"Pick one","answerMin":"1","answerMax":"5"}"#;
        let question: Question = serde_json::from_str(json).unwrap();

        let encoded = serde_json::to_string(&question).unwrap();
        assert!(encoded.contains("\"idModerator\":\"7\""));
        assert!(encoded.contains("\"answerMax\":\"5\""));

        let decoded: Question = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, question);
    }
}
