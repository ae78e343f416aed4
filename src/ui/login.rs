//! Name entry screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::session::Session;

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Anime & Manga · 10 questions · 5 minutes".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter your name: ", Style::default().fg(Color::White)),
            Span::styled(session.name_input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    if let Some(err) = session.name_error() {
        content.push(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Enter] start  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
