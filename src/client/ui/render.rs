//! Main session UI renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::client::session::{PollSession, SessionView};
use crate::datamodel::Question;

use super::{overview, question, trouble};

/// Render the session UI based on the active view.
pub fn render(frame: &mut Frame, session: &PollSession) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let chunks = Layout::vertical([Constraint::Min(10), Constraint::Length(1)]).split(area);

    match session.view() {
        SessionView::Overview { .. } => overview::render(frame, chunks[0], session),
        SessionView::Question { .. } => question::render(frame, chunks[0], session),
        SessionView::Trouble { message } => trouble::render(frame, chunks[0], message),
    }

    render_notice(frame, chunks[1], session);
}

fn render_notice(frame: &mut Frame, area: Rect, session: &PollSession) {
    if let Some(notice) = session.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .fg(Color::Red);
        frame.render_widget(widget, area);
    }
}

/// Bounds label for a question, echoing the wire strings as-is.
pub(super) fn bounds_hint(question: &Question) -> String {
    format!(
        "pick {}..{}",
        question.answer_min().unwrap_or("0"),
        question.answer_max().unwrap_or("0"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_hint() {
        let question: Question =
            serde_json::from_str(r#"{"answerMin":"1","answerMax":"5"}"#).unwrap();
        assert_eq!(bounds_hint(&question), "pick 1..5");

        let bare: Question = serde_json::from_str("{}").unwrap();
        assert_eq!(bounds_hint(&bare), "pick 0..0");

        // Bounds are display-only here; odd strings pass through.
        let odd: Question = serde_json::from_str(r#"{"answerMax":"1e3"}"#).unwrap();
        assert_eq!(bounds_hint(&odd), "pick 0..1e3");
    }
}
