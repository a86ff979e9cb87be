//! REST client for the poll backend.

use log::debug;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::datamodel::{Answer, Poll, Question};

use super::NetworkError;

/// HTTP client bound to one backend and one session token.
///
/// The token rides along as a `token` query parameter on every request.
/// Request paths are built from the ids carried by the records
/// themselves, so a record that arrived without its ids cannot be
/// followed up on and yields [`NetworkError::IncompleteRecord`].
pub struct PollApi {
    base: String,
    token: String,
    client: reqwest::Client,
}

impl PollApi {
    /// Create a client for the given backend base URL.
    pub fn new(base: String, token: String) -> Self {
        let mut base = base;
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the poll header.
    pub async fn poll(&self, id_moderator: &str, id_poll: &str) -> Result<Poll, NetworkError> {
        let url = format!("{}/mod/{}/poll/{}", self.base, id_moderator, id_poll);
        self.get_json(&url).await
    }

    /// Fetch every question of the poll.
    pub async fn questions(
        &self,
        id_moderator: &str,
        id_poll: &str,
    ) -> Result<Vec<Question>, NetworkError> {
        let url = format!("{}/mod/{}/poll/{}/question", self.base, id_moderator, id_poll);
        self.get_json(&url).await
    }

    /// Fetch the answers of one question.
    pub async fn answers(&self, question: &Question) -> Result<Vec<Answer>, NetworkError> {
        let url = self.answers_url(question)?;
        self.get_json(&url).await
    }

    /// Cast a vote by sending the answer back with its current mark.
    ///
    /// The response body is not inspected; the next answers fetch picks
    /// up whatever the backend decided.
    pub async fn vote(&self, answer: &Answer) -> Result<(), NetworkError> {
        let url = self.vote_url(answer)?;
        debug!("PUT {}", url);

        let response = self
            .client
            .put(&url)
            .query(&[("token", self.token.as_str())])
            .json(answer)
            .send()
            .await?;

        check_status(response.status())
    }

    fn answers_url(&self, question: &Question) -> Result<String, NetworkError> {
        let id_moderator = require(question.id_moderator(), "idModerator")?;
        let id_poll = require(question.id_poll(), "idPoll")?;
        let id_question = require(question.id_question(), "idQuestion")?;

        Ok(format!(
            "{}/mod/{}/poll/{}/question/{}/answer",
            self.base, id_moderator, id_poll, id_question
        ))
    }

    fn vote_url(&self, answer: &Answer) -> Result<String, NetworkError> {
        let id_moderator = require(answer.id_moderator(), "idModerator")?;
        let id_poll = require(answer.id_poll(), "idPoll")?;
        let id_question = require(answer.id_question(), "idQuestion")?;
        let id_answer = require(answer.id_answer(), "idAnswer")?;

        Ok(format!(
            "{}/mod/{}/poll/{}/question/{}/answer/{}",
            self.base, id_moderator, id_poll, id_question, id_answer
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NetworkError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        check_status(response.status())?;
        Ok(response.json::<T>().await?)
    }
}

fn require<'a>(id: Option<&'a str>, key: &'static str) -> Result<&'a str, NetworkError> {
    id.ok_or(NetworkError::IncompleteRecord(key))
}

fn check_status(status: StatusCode) -> Result<(), NetworkError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(NetworkError::TokenNotValid);
    }
    if !status.is_success() {
        return Err(NetworkError::Status(status.as_u16()));
    }
    Ok(())
}
