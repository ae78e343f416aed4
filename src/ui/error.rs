//! Error screen with a retry path.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::session::{LoadFailureKind, Session};

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let headline = match session.failure().map(|f| f.kind) {
        Some(LoadFailureKind::SourceRejected) => "The question source turned the request down",
        _ => "Network trouble while fetching questions",
    };
    let detail = session
        .failure()
        .map(|f| f.message.clone())
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(headline, Style::default().fg(Color::Red).bold())),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "[R] retry  ·  [L] log out  ·  [Q] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
