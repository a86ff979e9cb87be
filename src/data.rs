//! Fixture loading for local sessions.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::datamodel::{Answer, Poll, Question};

/// A whole poll held in one JSON file.
#[derive(Debug, Deserialize)]
pub struct PollFixture {
    /// Poll header; optional in the file.
    #[serde(default)]
    pub poll: Poll,
    /// Questions of the poll.
    pub questions: Vec<Question>,
    /// Answers of every question, matched up by `idQuestion`.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Error loading a fixture file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file is not a valid poll fixture.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The fixture holds no questions.
    #[error("{0} must contain at least one question")]
    Empty(String),
}

/// Load a poll fixture from a JSON file.
pub fn load_poll_file<P: AsRef<Path>>(path: P) -> Result<PollFixture, LoadError> {
    let path = path.as_ref();

    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let fixture: PollFixture = serde_json::from_str(&json).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    if fixture.questions.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    Ok(fixture)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "poll": {"idPoll": "3", "title": "Team offsite"},
        "questions": [
            {"idModerator": "7", "idPoll": "3", "idQuestion": "9",
             "title": "Where should we go?", "answerMin": "1", "answerMax": "1"}
        ],
        "answers": [
            {"idQuestion": "9", "idAnswer": "1", "title": "Mountains"}
        ]
    }"#;

    #[test]
    fn test_parse_fixture() {
        let fixture: PollFixture = serde_json::from_str(FIXTURE).unwrap();

        assert_eq!(fixture.poll.title(), Some("Team offsite"));
        assert_eq!(fixture.questions.len(), 1);
        assert_eq!(fixture.answers.len(), 1);
        assert_eq!(fixture.answers[0].title(), Some("Mountains"));
    }

    #[test]
    fn test_poll_header_is_optional() {
        let fixture: PollFixture =
            serde_json::from_str(r#"{"questions": [{"idQuestion": "9"}]}"#).unwrap();

        assert_eq!(fixture.poll.title(), None);
        assert!(fixture.answers.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_poll_file("definitely-not-there.json").unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_malformed_file() {
        let path = std::env::temp_dir().join("pollpad-malformed-fixture.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_poll_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_fixture_without_questions() {
        let path = std::env::temp_dir().join("pollpad-empty-fixture.json");
        fs::write(&path, r#"{"questions": []}"#).unwrap();

        let err = load_poll_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Empty(_)));
        assert!(err.to_string().ends_with("must contain at least one question"));

        let _ = fs::remove_file(&path);
    }
}
