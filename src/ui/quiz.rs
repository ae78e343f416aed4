//! Question screen: progress, clock, answer options.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap};

use crate::session::Session;

/// Remaining seconds at which the clock switches to the warning style.
const LOW_TIME_SECONDS: u32 = 60;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let Some(question) = session.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(2), // Header: player, progress, clock
        Constraint::Length(1), // Progress gauge
        Constraint::Length(7), // Question text
        Constraint::Min(8),    // Options
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], session);
    render_progress_gauge(frame, chunks[1], session);
    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], session);
    render_controls(frame, chunks[4], session.input_locked());
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let halves = Layout::horizontal([Constraint::Min(0), Constraint::Length(10)]).split(area);

    let progress = Line::from(vec![
        Span::styled(session.username(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(
                "  ·  Question {} of {}",
                session.current_index() + 1,
                session.questions().len()
            ),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(progress), halves[0]);

    let remaining = session.remaining_seconds();
    let clock_style = if remaining <= LOW_TIME_SECONDS {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let clock = Paragraph::new(format_clock(remaining))
        .alignment(Alignment::Right)
        .style(clock_style);
    frame.render_widget(clock, halves[1]);
}

fn render_progress_gauge(frame: &mut Frame, area: Rect, session: &Session) {
    let total = session.questions().len();
    let ratio = if total > 0 {
        (session.current_index() + 1) as f64 / total as f64
    } else {
        0.0
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .label("")
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
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

fn render_options(frame: &mut Frame, area: Rect, session: &Session) {
    let Some(question) = session.current_question() else {
        return;
    };
    let chosen = session.current_answer();
    let locked = session.input_locked() || chosen.is_some();

    let lines: Vec<Line> = question
        .answers
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let is_chosen = chosen == Some(option.as_str());
            let is_cursor = !locked && i == session.cursor();

            let style = if is_chosen {
                Style::default().fg(Color::Black).bg(Color::Yellow).bold()
            } else if locked {
                Style::default().fg(Color::DarkGray)
            } else if is_cursor {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_cursor { "> " } else { "  " };
            let label = OPTION_LABELS.get(i).copied().unwrap_or('?');

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{label}) "), style),
                Span::styled(option.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, locked: bool) {
    let text = if locked {
        "answer locked in..."
    } else {
        "j/k or arrows to select  ·  Enter/Space to answer  ·  l log out  ·  q quit"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
