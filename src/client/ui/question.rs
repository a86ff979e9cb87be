//! Question screen: one question and its answers.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::client::session::{PollSession, SessionView};
use crate::datamodel::Question;

use super::render::bounds_hint;

/// Render the open question with its answers.
pub fn render(frame: &mut Frame, area: Rect, session: &PollSession) {
    let SessionView::Question {
        cursor, max_alert, ..
    } = session.view()
    else {
        return;
    };

    let Some(question) = session.current_question() else {
        let waiting = Paragraph::new("Waiting for the question...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(waiting, area);
        return;
    };

    let has_details = question.details().is_some_and(|d| !d.is_empty());

    let chunks = if has_details {
        Layout::vertical([
            Constraint::Length(3), // Progress
            Constraint::Length(4), // Title
            Constraint::Length(4), // Details
            Constraint::Min(6),    // Answers
            Constraint::Length(1), // Bounds
            Constraint::Length(1), // Alert
            Constraint::Length(2), // Controls
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(3), // Progress
            Constraint::Length(5), // Title
            Constraint::Min(6),    // Answers
            Constraint::Length(1), // Bounds
            Constraint::Length(1), // Alert
            Constraint::Length(2), // Controls
        ])
        .margin(1)
        .split(area)
    };

    render_progress(frame, chunks[0], session);
    render_title(frame, chunks[1], question.title().unwrap_or("(untitled question)"));

    if has_details {
        render_details(frame, chunks[2], question.details().unwrap_or(""));
        render_answers(frame, chunks[3], session, *cursor);
        render_bounds(frame, chunks[4], question);
        render_alert(frame, chunks[5], session, *max_alert);
        render_controls(frame, chunks[6]);
    } else {
        render_answers(frame, chunks[2], session, *cursor);
        render_bounds(frame, chunks[3], question);
        render_alert(frame, chunks[4], session, *max_alert);
        render_controls(frame, chunks[5]);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, session: &PollSession) {
    let Some((position, total)) = session.progress() else {
        return;
    };

    let back = if session.has_previous() { "<" } else { " " };
    let forward = if session.has_next() { ">" } else { " " };
    let text = format!("{} Question {} of {} {}", back, position, total, forward);

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());

    frame.render_widget(widget, area);
}

fn render_title(frame: &mut Frame, area: Rect, title: &str) {
    let widget = Paragraph::new(title)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_details(frame: &mut Frame, area: Rect, details: &str) {
    let widget = Paragraph::new(details)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Details ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_answers(frame: &mut Frame, area: Rect, session: &PollSession, cursor: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Answers ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    let Some(answers) = session.current_answers() else {
        let waiting = Paragraph::new("Waiting for answers...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow)
            .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    if answers.is_empty() {
        let empty = Paragraph::new("This question has no answers.")
            .alignment(Alignment::Center)
            .fg(Color::Yellow)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| {
            let is_selected = i == cursor;
            let prefix = if is_selected { "> " } else { "  " };
            let mark = if answer.is_checked() { "[x] " } else { "[ ] " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else if answer.is_checked() {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(mark, style),
                Span::styled(answer.title().unwrap_or("(untitled answer)"), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(block);
    frame.render_widget(widget, area);
}

fn render_bounds(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(bounds_hint(question))
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}

fn render_alert(frame: &mut Frame, area: Rect, session: &PollSession, max_alert: Option<u32>) {
    let (text, color) = if let Some(max) = max_alert {
        (format!("Select at most {} answer(s)", max), Color::Red)
    } else if let Some(min) = session.min_alert() {
        (format!("Select at least {} answer(s)", min), Color::Yellow)
    } else {
        return;
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold());

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "j/k move  ·  Enter/Space vote  ·  h/l switch question  ·  Esc back  ·  q quit",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
