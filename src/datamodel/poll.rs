//! Poll record as served by the backend.

use serde::{Deserialize, Serialize};

/// A poll header: the collection the questions hang off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    id_moderator: Option<String>,
    id_poll: Option<String>,
    title: Option<String>,
    details: Option<String>,
}

impl Poll {
    /// Id of the moderator who owns the poll.
    pub fn id_moderator(&self) -> Option<&str> {
        self.id_moderator.as_deref()
    }

    /// Unique id of this poll.
    pub fn id_poll(&self) -> Option<&str> {
        self.id_poll.as_deref()
    }

    /// Short poll title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Longer description, often empty.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let json = r#"{"idModerator":"7","idPoll":"3","title":"Team offsite","details":"June edition"}"#;
        let poll: Poll = serde_json::from_str(json).unwrap();

        assert_eq!(poll.id_moderator(), Some("7"));
        assert_eq!(poll.id_poll(), Some("3"));
        assert_eq!(poll.title(), Some("Team offsite"));
        assert_eq!(poll.details(), Some("June edition"));
    }

    #[test]
    fn test_empty_payload() {
        let poll: Poll = serde_json::from_str("{}").unwrap();
        assert_eq!(poll.title(), None);
        assert_eq!(poll, Poll::default());
    }
}
