//! Poll session state.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::warn;

use crate::data::PollFixture;
use crate::datamodel::{Answer, Poll, Question};

/// Quiet period after a vote during which periodic answer refreshes are
/// skipped, so a fetch cannot overwrite a mark the server has not
/// acknowledged yet. Also the period of the background refresh itself.
pub const REFRESH_DELAY: Duration = Duration::from_millis(5000);

/// Which screen the session is showing.
#[derive(Debug, Clone)]
pub enum SessionView {
    /// Question list for the whole poll.
    Overview { cursor: usize },

    /// One question with its answers.
    Question {
        index: usize,
        cursor: usize,
        max_alert: Option<u32>,
    },

    /// Unrecoverable problem; the session is over.
    Trouble { message: String },
}

/// What came out of a selection attempt.
#[derive(Debug)]
pub enum SelectOutcome {
    /// The mark flipped locally and the vote should go out.
    Voted(Answer),
    /// The cap is reached; nothing changed.
    MaxReached(u32),
    /// Nothing to act on.
    Ignored,
}

/// State of one poll-taking session.
///
/// Questions are held in server order; answers arrive per question and
/// are kept in a map keyed by `idQuestion`. The session never talks to
/// the network itself: callers feed it fresh records and it hands back
/// the answers to vote on.
pub struct PollSession {
    poll: Poll,
    questions: Vec<Question>,
    answer_sets: HashMap<String, Vec<Answer>>,
    view: SessionView,
    last_vote_at: Option<Instant>,
    notice: Option<String>,
    /// Whether the client should quit.
    pub should_quit: bool,
}

impl PollSession {
    /// Start a session on the overview screen.
    pub fn new(poll: Poll, questions: Vec<Question>) -> Self {
        Self {
            poll,
            questions,
            answer_sets: HashMap::new(),
            view: SessionView::Overview { cursor: 0 },
            last_vote_at: None,
            notice: None,
            should_quit: false,
        }
    }

    /// Build a session from a local fixture, grouping its answers by
    /// question id. Answers without one cannot be shown and are dropped.
    pub fn from_fixture(fixture: PollFixture) -> Self {
        let mut session = Self::new(fixture.poll, fixture.questions);

        let mut sets: HashMap<String, Vec<Answer>> = HashMap::new();
        for answer in fixture.answers {
            match answer.id_question() {
                Some(id) => sets.entry(id.to_string()).or_default().push(answer),
                None => warn!("Dropping an answer without idQuestion"),
            }
        }
        for (id, answers) in sets {
            session.set_answers(&id, answers);
        }

        session
    }

    /// The poll header.
    pub fn poll(&self) -> &Poll {
        &self.poll
    }

    /// All questions, in server order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The active view.
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    /// Transient status line, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the session hit an unrecoverable problem.
    pub fn in_trouble(&self) -> bool {
        matches!(self.view, SessionView::Trouble { .. })
    }

    /// The question currently open, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.view {
            SessionView::Question { index, .. } => self.questions.get(index),
            _ => None,
        }
    }

    /// Answers of the open question. `None` until they arrived once.
    pub fn current_answers(&self) -> Option<&[Answer]> {
        let id = self.current_question()?.id_question()?;
        self.answer_sets.get(id).map(Vec::as_slice)
    }

    /// How many answers of the open question carry a mark.
    pub fn checked_count(&self) -> usize {
        self.current_answers()
            .map(|answers| answers.iter().filter(|a| a.is_checked()).count())
            .unwrap_or(0)
    }

    /// One-based position of the open question, with the total.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.view {
            SessionView::Question { index, .. } => Some((index + 1, self.questions.len())),
            _ => None,
        }
    }

    /// Toggle the mark under the cursor, enforcing the answer cap.
    ///
    /// The cap comes from `answerMax`, read as 0 (no limit) when it is
    /// missing, unparsable, or below `answerMin`. Removing a mark is
    /// always allowed. A vote records `now` so periodic refreshes back
    /// off for [`REFRESH_DELAY`].
    pub fn select_answer(&mut self, now: Instant) -> SelectOutcome {
        let (index, cursor) = match self.view {
            SessionView::Question { index, cursor, .. } => (index, cursor),
            _ => return SelectOutcome::Ignored,
        };

        let Some(question) = self.questions.get(index) else {
            return SelectOutcome::Ignored;
        };
        let Some(id) = question.id_question().map(str::to_string) else {
            return SelectOutcome::Ignored;
        };

        let min = parse_bound(question.answer_min());
        let max = parse_bound(question.answer_max());
        let cap = if max < min { 0 } else { max };

        let Some(answers) = self.answer_sets.get_mut(&id) else {
            return SelectOutcome::Ignored;
        };
        let checked = answers.iter().filter(|a| a.is_checked()).count();
        let Some(answer) = answers.get_mut(cursor) else {
            return SelectOutcome::Ignored;
        };

        if answer.is_checked() || cap == 0 || cap as usize > checked {
            answer.toggle();
            let voted = answer.clone();
            self.last_vote_at = Some(now);
            SelectOutcome::Voted(voted)
        } else if cap as usize == checked {
            self.set_max_alert(cap);
            SelectOutcome::MaxReached(cap)
        } else {
            SelectOutcome::Ignored
        }
    }

    /// Number required by `answerMin` while the current marks are still
    /// below it, for the alert line.
    pub fn min_alert(&self) -> Option<u32> {
        let question = self.current_question()?;
        let min = parse_bound(question.answer_min());
        if min > 0 && self.checked_count() < min as usize {
            Some(min)
        } else {
            None
        }
    }

    /// Move the cursor down in the active list.
    pub fn select_next(&mut self) {
        let questions = self.questions.len();
        let answers = self.current_answers().map(|a| a.len()).unwrap_or(0);

        match &mut self.view {
            SessionView::Overview { cursor } => {
                if questions > 0 {
                    *cursor = (*cursor + 1).min(questions - 1);
                }
            }
            SessionView::Question {
                cursor, max_alert, ..
            } => {
                *max_alert = None;
                if answers > 0 {
                    *cursor = (*cursor + 1).min(answers - 1);
                }
            }
            SessionView::Trouble { .. } => {}
        }
    }

    /// Move the cursor up in the active list.
    pub fn select_previous(&mut self) {
        match &mut self.view {
            SessionView::Overview { cursor } => {
                *cursor = cursor.saturating_sub(1);
            }
            SessionView::Question {
                cursor, max_alert, ..
            } => {
                *max_alert = None;
                *cursor = cursor.saturating_sub(1);
            }
            SessionView::Trouble { .. } => {}
        }
    }

    /// Open the question under the overview cursor. Returns it so the
    /// caller can request its answers.
    pub fn enter_question(&mut self) -> Option<Question> {
        let cursor = match self.view {
            SessionView::Overview { cursor } => cursor,
            _ => return None,
        };
        self.show_question(cursor)
    }

    /// Go back from the open question to the overview.
    pub fn leave_question(&mut self) {
        if let SessionView::Question { index, .. } = self.view {
            self.view = SessionView::Overview { cursor: index };
        }
    }

    /// Whether a question precedes the open one.
    pub fn has_previous(&self) -> bool {
        matches!(self.view, SessionView::Question { index, .. } if index > 0)
    }

    /// Whether a question follows the open one.
    pub fn has_next(&self) -> bool {
        match self.view {
            SessionView::Question { index, .. } => index + 1 < self.questions.len(),
            _ => false,
        }
    }

    /// Step to the previous question in poll order. Returns the
    /// question now showing so the caller can request its answers.
    pub fn change_to_previous(&mut self) -> Option<Question> {
        if !self.has_previous() {
            return None;
        }
        match self.view {
            SessionView::Question { index, .. } => self.show_question(index - 1),
            _ => None,
        }
    }

    /// Step to the next question in poll order. Returns the question
    /// now showing so the caller can request its answers.
    pub fn change_to_next(&mut self) -> Option<Question> {
        if !self.has_next() {
            return None;
        }
        match self.view {
            SessionView::Question { index, .. } => self.show_question(index + 1),
            _ => None,
        }
    }

    fn show_question(&mut self, index: usize) -> Option<Question> {
        let question = self.questions.get(index)?.clone();
        self.view = SessionView::Question {
            index,
            cursor: 0,
            max_alert: None,
        };
        Some(question)
    }

    /// Replace the question list with a fresh server copy.
    ///
    /// The open question is re-resolved by id so the view follows it
    /// when the server reorders the list. A question that vanished
    /// sends the view back to the overview.
    pub fn set_questions(&mut self, questions: Vec<Question>) {
        let current_id = self
            .current_question()
            .and_then(|q| q.id_question())
            .map(str::to_string);

        self.questions = questions;

        match self.view {
            SessionView::Overview { cursor } => {
                let last = self.questions.len().saturating_sub(1);
                self.view = SessionView::Overview {
                    cursor: cursor.min(last),
                };
            }
            SessionView::Question {
                index,
                cursor,
                max_alert,
            } => {
                let resolved = match current_id.as_deref() {
                    Some(id) => self
                        .questions
                        .iter()
                        .position(|q| q.id_question() == Some(id)),
                    None if index < self.questions.len() => Some(index),
                    None => None,
                };
                self.view = match resolved {
                    Some(index) => SessionView::Question {
                        index,
                        cursor,
                        max_alert,
                    },
                    None => SessionView::Overview { cursor: 0 },
                };
            }
            SessionView::Trouble { .. } => {}
        }
    }

    /// Store a fresh answer list for a question, in stable id order.
    pub fn set_answers(&mut self, id_question: &str, mut answers: Vec<Answer>) {
        answers.sort_by_key(answer_order);
        let len = answers.len();
        self.answer_sets.insert(id_question.to_string(), answers);

        // Keep the cursor inside the new list when it is on screen.
        let on_screen = self
            .current_question()
            .and_then(|q| q.id_question())
            .is_some_and(|id| id == id_question);
        if on_screen {
            if let SessionView::Question { cursor, .. } = &mut self.view {
                *cursor = (*cursor).min(len.saturating_sub(1));
            }
        }
    }

    /// Whether a periodic answers refresh may run at `now`.
    pub fn allow_periodic_refresh(&self, now: Instant) -> bool {
        match self.last_vote_at {
            Some(at) => now > at + REFRESH_DELAY,
            None => true,
        }
    }

    /// Drop the session onto the trouble screen.
    pub fn fail(&mut self, message: String) {
        self.view = SessionView::Trouble { message };
    }

    /// Put a transient status line at the bottom of the screen.
    pub fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    /// Clear the status line.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    fn set_max_alert(&mut self, max: u32) {
        if let SessionView::Question { max_alert, .. } = &mut self.view {
            *max_alert = Some(max);
        }
    }
}

/// Numeric reading of a wire bound. Unset or unparsable counts as 0,
/// which stands for "no limit".
fn parse_bound(bound: Option<&str>) -> u32 {
    bound.and_then(|b| b.trim().parse().ok()).unwrap_or(0)
}

/// Sort key for answers: numeric id order when the ids parse, raw
/// string order otherwise, with unparsable ids first.
fn answer_order(answer: &Answer) -> (Option<i64>, String) {
    let raw = answer.id_answer().unwrap_or_default().to_string();
    (raw.parse::<i64>().ok(), raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(id: &str, min: &str, max: &str) -> Question {
        serde_json::from_value(json!({
            "idModerator": "1",
            "idPoll": "2",
            "idQuestion": id,
            "title": format!("Question {}", id),
            "answerMin": min,
            "answerMax": max,
        }))
        .unwrap()
    }

    fn answer(id: &str, id_question: &str, checked: bool) -> Answer {
        serde_json::from_value(json!({
            "idModerator": "1",
            "idPoll": "2",
            "idQuestion": id_question,
            "idAnswer": id,
            "title": format!("Answer {}", id),
            "checked": checked,
        }))
        .unwrap()
    }

    fn open_session(min: &str, max: &str, answers: Vec<Answer>) -> PollSession {
        let mut session = PollSession::new(Poll::default(), vec![question("9", min, max)]);
        session.enter_question();
        session.set_answers("9", answers);
        session
    }

    #[test]
    fn test_select_toggles_and_reports_vote() {
        let mut session = open_session(
            "0",
            "2",
            vec![answer("1", "9", false), answer("2", "9", false)],
        );
        let now = Instant::now();

        match session.select_answer(now) {
            SelectOutcome::Voted(voted) => {
                assert_eq!(voted.id_answer(), Some("1"));
                assert!(voted.is_checked());
            }
            other => panic!("expected a vote, got {:?}", other),
        }

        assert_eq!(session.checked_count(), 1);
        assert!(!session.allow_periodic_refresh(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_cap_blocks_additional_votes() {
        let mut session = open_session(
            "0",
            "1",
            vec![answer("1", "9", true), answer("2", "9", false)],
        );
        session.select_next();

        assert!(matches!(
            session.select_answer(Instant::now()),
            SelectOutcome::MaxReached(1)
        ));
        assert!(matches!(
            session.view(),
            SessionView::Question {
                max_alert: Some(1),
                ..
            }
        ));

        // Moving the cursor dismisses the alert.
        session.select_previous();
        assert!(matches!(
            session.view(),
            SessionView::Question {
                max_alert: None,
                ..
            }
        ));
    }

    #[test]
    fn test_uncheck_always_allowed() {
        let mut session = open_session("0", "1", vec![answer("1", "9", true)]);

        match session.select_answer(Instant::now()) {
            SelectOutcome::Voted(voted) => assert!(!voted.is_checked()),
            other => panic!("expected a vote, got {:?}", other),
        }
        assert_eq!(session.checked_count(), 0);
    }

    #[test]
    fn test_inverted_bounds_mean_no_limit() {
        let mut session = open_session(
            "3",
            "1",
            vec![
                answer("1", "9", true),
                answer("2", "9", true),
                answer("3", "9", false),
            ],
        );
        session.select_next();
        session.select_next();

        assert!(matches!(
            session.select_answer(Instant::now()),
            SelectOutcome::Voted(_)
        ));
        assert_eq!(session.checked_count(), 3);
    }

    #[test]
    fn test_zero_max_means_no_limit() {
        let mut session = open_session(
            "0",
            "0",
            vec![answer("1", "9", true), answer("2", "9", false)],
        );
        session.select_next();

        assert!(matches!(
            session.select_answer(Instant::now()),
            SelectOutcome::Voted(_)
        ));
    }

    #[test]
    fn test_unparsable_max_means_no_limit() {
        let mut session = open_session(
            "0",
            "lots",
            vec![answer("1", "9", true), answer("2", "9", false)],
        );
        session.select_next();

        assert!(matches!(
            session.select_answer(Instant::now()),
            SelectOutcome::Voted(_)
        ));
    }

    #[test]
    fn test_min_alert_until_enough_marks() {
        let mut session = open_session(
            "2",
            "3",
            vec![answer("1", "9", false), answer("2", "9", false)],
        );
        assert_eq!(session.min_alert(), Some(2));

        session.select_answer(Instant::now());
        assert_eq!(session.min_alert(), Some(2));

        session.select_next();
        session.select_answer(Instant::now());
        assert_eq!(session.min_alert(), None);
    }

    #[test]
    fn test_answers_sorted_by_id() {
        let session = open_session(
            "0",
            "0",
            vec![
                answer("10", "9", false),
                answer("2", "9", false),
                answer("x", "9", false),
                answer("1", "9", false),
            ],
        );

        let ids: Vec<_> = session
            .current_answers()
            .unwrap()
            .iter()
            .map(|a| a.id_answer().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["x", "1", "2", "10"]);
    }

    #[test]
    fn test_navigation_between_questions() {
        let questions = vec![
            question("9", "0", "0"),
            question("5", "0", "0"),
            question("7", "0", "0"),
        ];
        let mut session = PollSession::new(Poll::default(), questions);

        let opened = session.enter_question().unwrap();
        assert_eq!(opened.id_question(), Some("9"));
        assert!(!session.has_previous());
        assert!(session.has_next());

        let next = session.change_to_next().unwrap();
        assert_eq!(next.id_question(), Some("5"));
        assert!(session.has_previous());

        let last = session.change_to_next().unwrap();
        assert_eq!(last.id_question(), Some("7"));
        assert!(!session.has_next());
        assert!(session.change_to_next().is_none());

        session.leave_question();
        assert!(matches!(session.view(), SessionView::Overview { cursor: 2 }));
    }

    #[test]
    fn test_refresh_follows_question_by_id() {
        let mut session =
            PollSession::new(Poll::default(), vec![question("9", "0", "0"), question("5", "0", "0")]);
        session.enter_question();

        session.set_questions(vec![question("5", "0", "0"), question("9", "0", "0")]);

        assert!(matches!(
            session.view(),
            SessionView::Question { index: 1, .. }
        ));
        assert_eq!(
            session.current_question().and_then(|q| q.id_question()),
            Some("9")
        );
    }

    #[test]
    fn test_vanished_question_returns_to_overview() {
        let mut session =
            PollSession::new(Poll::default(), vec![question("9", "0", "0"), question("5", "0", "0")]);
        session.enter_question();

        session.set_questions(vec![question("5", "0", "0")]);

        assert!(matches!(session.view(), SessionView::Overview { cursor: 0 }));
    }

    #[test]
    fn test_vote_throttles_periodic_refresh() {
        let mut session = open_session("0", "0", vec![answer("1", "9", false)]);
        let now = Instant::now();

        assert!(session.allow_periodic_refresh(now));
        session.select_answer(now);

        assert!(!session.allow_periodic_refresh(now + Duration::from_secs(1)));
        assert!(session.allow_periodic_refresh(now + Duration::from_secs(6)));
    }

    #[test]
    fn test_fixture_groups_answers_by_question() {
        let fixture: PollFixture = serde_json::from_value(json!({
            "poll": {"idPoll": "2", "title": "Offsite"},
            "questions": [
                {"idQuestion": "9", "title": "Where?"},
                {"idQuestion": "5", "title": "When?"},
            ],
            "answers": [
                {"idQuestion": "9", "idAnswer": "1", "title": "Mountains"},
                {"idQuestion": "9", "idAnswer": "2", "title": "Seaside"},
                {"idQuestion": "5", "idAnswer": "3", "title": "June"},
                {"idAnswer": "4", "title": "Orphan"},
            ],
        }))
        .unwrap();

        let mut session = PollSession::from_fixture(fixture);
        session.enter_question();

        assert_eq!(session.current_answers().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_trouble_is_terminal_for_input() {
        let mut session = open_session("0", "0", vec![answer("1", "9", false)]);
        session.fail("token rejected".to_string());

        assert!(session.in_trouble());
        assert!(matches!(
            session.select_answer(Instant::now()),
            SelectOutcome::Ignored
        ));
        assert!(session.enter_question().is_none());
    }
}
