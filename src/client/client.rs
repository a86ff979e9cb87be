//! Live and local poll clients.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};

use crate::data;
use crate::network::PollApi;
use crate::terminal;
use crate::PollError;

use super::refresh::{self, NetCommand};
use super::session::{PollSession, SelectOutcome, SessionView};
use super::ui;

/// Shared session handle used by the TUI and the network loop.
pub(crate) type SharedSession = Arc<Mutex<PollSession>>;

/// Connection settings for a live session.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Backend base URL.
    pub base_url: String,
    /// Id of the moderator owning the poll.
    pub moderator: String,
    /// Id of the poll to open.
    pub poll: String,
    /// Session token issued by the backend.
    pub token: String,
}

/// Run a session against a live backend.
///
/// The poll and its questions are fetched before the terminal is taken
/// over, so connection problems surface as plain errors instead of a
/// broken screen.
pub async fn run_live(config: LiveConfig) -> Result<(), PollError> {
    println!("Connecting to {}...", config.base_url);

    let api = PollApi::new(config.base_url.clone(), config.token.clone());
    let poll = api.poll(&config.moderator, &config.poll).await?;
    let questions = api.questions(&config.moderator, &config.poll).await?;
    info!(
        "Opened poll {} with {} questions",
        poll.title().unwrap_or("(untitled)"),
        questions.len()
    );

    let mut session = PollSession::new(poll, questions);

    // Warm the first question's answers; a failure is retried on entry.
    if let Some(first) = session.questions().first().cloned() {
        if let Some(id) = first.id_question() {
            match api.answers(&first).await {
                Ok(answers) => session.set_answers(id, answers),
                Err(err) => warn!("Could not prefetch answers: {}", err),
            }
        }
    }

    let session = Arc::new(Mutex::new(session));
    let (tx, rx) = mpsc::unbounded_channel::<NetCommand>();

    let refresh_task = tokio::spawn(refresh::run(
        api,
        config.moderator.clone(),
        config.poll.clone(),
        Arc::clone(&session),
        rx,
    ));

    run_tui(session, tx).await?;

    refresh_task.abort();

    Ok(())
}

/// Run a session from a local fixture file, without a backend.
pub async fn run_local(path: &Path) -> Result<(), PollError> {
    let fixture = data::load_poll_file(path)?;
    let session = Arc::new(Mutex::new(PollSession::from_fixture(fixture)));
    let (tx, mut rx) = mpsc::unbounded_channel::<NetCommand>();

    // No backend to talk to: marks stay local and commands are drained.
    let sink = tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            debug!("Local session, dropping {:?}", command);
        }
    });

    run_tui(session, tx).await?;

    sink.abort();

    Ok(())
}

/// Run the session TUI.
async fn run_tui(
    session: SharedSession,
    tx: mpsc::UnboundedSender<NetCommand>,
) -> Result<(), PollError> {
    let mut terminal = terminal::init()?;

    loop {
        // Check if should quit
        {
            let session = session.lock().await;
            if session.should_quit {
                break;
            }
        }

        // Render UI
        {
            let session = session.lock().await;
            terminal.draw(|frame| ui::render(frame, &session))?;
        }

        // Handle input with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let should_quit = handle_input(&session, &tx, key.code).await;
                if should_quit {
                    break;
                }
            }
        }
    }

    terminal::restore()?;
    Ok(())
}

/// Handle keyboard input. Returns true when the client should exit.
async fn handle_input(
    session: &SharedSession,
    tx: &mpsc::UnboundedSender<NetCommand>,
    key: KeyCode,
) -> bool {
    let mut session = session.lock().await;

    match session.view() {
        SessionView::Overview { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                session.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                session.select_next();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(question) = session.enter_question() {
                    let _ = tx.send(NetCommand::FetchAnswers(question));
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                session.should_quit = true;
                return true;
            }
            _ => {}
        },
        SessionView::Question { .. } => match key {
            KeyCode::Up | KeyCode::Char('k') => {
                session.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                session.select_next();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                match session.select_answer(Instant::now()) {
                    SelectOutcome::Voted(answer) => {
                        let _ = tx.send(NetCommand::Vote(answer));
                    }
                    SelectOutcome::MaxReached(max) => {
                        debug!("Vote blocked, at most {} answers allowed", max);
                    }
                    SelectOutcome::Ignored => {}
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(question) = session.change_to_previous() {
                    let _ = tx.send(NetCommand::FetchAnswers(question));
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(question) = session.change_to_next() {
                    let _ = tx.send(NetCommand::FetchAnswers(question));
                }
            }
            KeyCode::Esc => {
                session.leave_question();
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                session.should_quit = true;
                return true;
            }
            _ => {}
        },
        SessionView::Trouble { .. } => {
            if matches!(
                key,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
            ) {
                session.should_quit = true;
                return true;
            }
        }
    }

    false
}
