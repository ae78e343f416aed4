//! Score summary screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::session::Session;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let summary = session.score();
    let grade_color = grade_color(summary.percent);

    let chunks = Layout::vertical([
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let header = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ FINISHED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Well done, ", Style::default().fg(Color::White)),
            Span::styled(session.username(), Style::default().fg(Color::Cyan).bold()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("{} correct", summary.correct),
                Style::default().fg(Color::Green).bold(),
            ),
            Span::styled("   ", Style::default()),
            Span::styled(
                format!("{} wrong", summary.incorrect),
                Style::default().fg(Color::Red).bold(),
            ),
            Span::styled("   ", Style::default()),
            Span::styled(
                format!(
                    "{:.1}%  ({} of {} answered)",
                    summary.percent,
                    summary.answered,
                    session.questions().len()
                ),
                Style::default().fg(grade_color).bold(),
            ),
        ]),
        Line::from(""),
    ];

    let widget = Paragraph::new(header).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[0]);

    render_breakdown(frame, chunks[1], session);
    render_controls(frame, chunks[2]);
}

fn grade_color(percent: f64) -> Color {
    match percent as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_breakdown(frame: &mut Frame, area: Rect, session: &Session) {
    let lines: Vec<Line> = session
        .answers()
        .iter()
        .zip(session.questions().iter())
        .enumerate()
        .map(|(index, (answer, question))| {
            let (symbol, color) = match answer {
                Some(a) if question.is_correct(a) => ("+", Color::Green),
                Some(_) => ("-", Color::Red),
                None => ("·", Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.text),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget =
        Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r restart  ·  l log out  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
