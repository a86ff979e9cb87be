//! Overview screen: the poll's question list.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::session::{PollSession, SessionView};

use super::render::bounds_hint;

/// Render the question list for the whole poll.
pub fn render(frame: &mut Frame, area: Rect, session: &PollSession) {
    let SessionView::Overview { cursor } = session.view() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Poll header
        Constraint::Min(6),    // Questions
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session);
    render_questions(frame, chunks[1], session, *cursor);
    render_controls(frame, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, session: &PollSession) {
    let poll = session.poll();

    let mut lines = vec![Line::from(Span::styled(
        poll.title().unwrap_or("Untitled poll"),
        Style::default().fg(Color::Cyan).bold(),
    ))];
    if let Some(details) = poll.details().filter(|d| !d.is_empty()) {
        lines.push(Line::from(Span::styled(
            details,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" pollpad ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_questions(frame: &mut Frame, area: Rect, session: &PollSession, cursor: usize) {
    let questions = session.questions();

    if questions.is_empty() {
        let empty = Paragraph::new("No questions in this poll yet.")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let is_selected = i == cursor;
            let prefix = if is_selected { "> " } else { "  " };
            let hint = format!("  {}", bounds_hint(question));

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(question.title().unwrap_or("(untitled question)"), style),
                Span::styled(hint, Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Questions ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k or arrows to move  ·  Enter to open  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
