//! Error taxonomy for backend calls.

use thiserror::Error;

/// Errors surfaced by [`PollApi`](super::PollApi) requests.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The backend rejected the session token.
    #[error("the server rejected the session token")]
    TokenNotValid,

    /// Any other non-success HTTP status.
    #[error("unexpected status {0} from the server")]
    Status(u16),

    /// Transport-level failure: DNS, connect, or body decode.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A record lacks an id needed to build a request path.
    #[error("record is missing the {0} field")]
    IncompleteRecord(&'static str),
}

impl NetworkError {
    /// True when the session token is no longer usable and the client
    /// should stop talking to the backend.
    pub fn is_token_rejection(&self) -> bool {
        matches!(self, NetworkError::TokenNotValid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            NetworkError::Status(503).to_string(),
            "unexpected status 503 from the server"
        );
        assert_eq!(
            NetworkError::IncompleteRecord("idPoll").to_string(),
            "record is missing the idPoll field"
        );
    }

    #[test]
    fn test_token_rejection() {
        assert!(NetworkError::TokenNotValid.is_token_rejection());
        assert!(!NetworkError::Status(404).is_token_rejection());
    }
}
