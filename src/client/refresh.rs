//! Background network loop for live sessions.
//!
//! Two event sources feed one loop: a periodic tick that re-fetches the
//! question list and the open question's answers, and a command channel
//! the input loop pushes votes and fetch requests into. The two are
//! merged into a single stream so ticks cannot starve commands.

use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::time;

use crate::datamodel::{Answer, Question};
use crate::network::{NetworkError, PollApi};

use super::client::SharedSession;
use super::session::REFRESH_DELAY;

/// Instructions sent from the input loop to the network loop.
#[derive(Debug)]
pub enum NetCommand {
    /// Send this answer's new mark to the backend.
    Vote(Answer),
    /// Fetch the answers of a freshly opened question.
    FetchAnswers(Question),
}

enum NetEvent {
    Tick,
    Command(NetCommand),
}

/// Drive periodic refreshes and queued commands until the session hits
/// trouble. The caller aborts the task when the TUI stops.
pub async fn run(
    api: PollApi,
    id_moderator: String,
    id_poll: String,
    session: SharedSession,
    commands: mpsc::UnboundedReceiver<NetCommand>,
) {
    let ticks = stream::unfold(
        time::interval_at(time::Instant::now() + REFRESH_DELAY, REFRESH_DELAY),
        |mut interval| async move {
            interval.tick().await;
            Some((NetEvent::Tick, interval))
        },
    );
    let commands = stream::unfold(commands, |mut rx| async move {
        rx.recv().await.map(|command| (NetEvent::Command(command), rx))
    });

    let mut events = stream::select(Box::pin(ticks), Box::pin(commands));

    while let Some(event) = events.next().await {
        if session.lock().await.in_trouble() {
            break;
        }

        match event {
            NetEvent::Tick => {
                if session.lock().await.allow_periodic_refresh(Instant::now()) {
                    refresh_questions(&api, &id_moderator, &id_poll, &session).await;
                    refresh_current_answers(&api, &session).await;
                }
            }
            NetEvent::Command(NetCommand::Vote(answer)) => {
                push_vote(&api, &session, &answer).await;
            }
            NetEvent::Command(NetCommand::FetchAnswers(question)) => {
                fetch_answers(&api, &session, &question).await;
            }
        }
    }
}

async fn refresh_questions(
    api: &PollApi,
    id_moderator: &str,
    id_poll: &str,
    session: &SharedSession,
) {
    match api.questions(id_moderator, id_poll).await {
        Ok(questions) => {
            let mut session = session.lock().await;
            session.set_questions(questions);
            session.clear_notice();
        }
        Err(e) => report(session, e).await,
    }
}

async fn refresh_current_answers(api: &PollApi, session: &SharedSession) {
    let question = {
        let session = session.lock().await;
        session.current_question().cloned()
    };

    if let Some(question) = question {
        fetch_answers(api, session, &question).await;
    }
}

async fn fetch_answers(api: &PollApi, session: &SharedSession, question: &Question) {
    let Some(id) = question.id_question().map(str::to_string) else {
        debug!("Skipping answers fetch for a question without idQuestion");
        return;
    };

    match api.answers(question).await {
        Ok(answers) => session.lock().await.set_answers(&id, answers),
        Err(e) => report(session, e).await,
    }
}

async fn push_vote(api: &PollApi, session: &SharedSession, answer: &Answer) {
    // The response body is ignored; the next answers fetch settles it.
    if let Err(e) = api.vote(answer).await {
        report(session, e).await;
    }
}

/// Log a failure and surface it. A rejected token ends the session,
/// anything else shows up as a transient notice.
async fn report(session: &SharedSession, error: NetworkError) {
    warn!("{}", error);

    let mut session = session.lock().await;
    if error.is_token_rejection() {
        session.fail("The server rejected the session token".to_string());
    } else {
        session.set_notice(error.to_string());
    }
}
