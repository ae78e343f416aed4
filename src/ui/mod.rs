mod error;
mod loading;
mod login;
mod quiz;
mod result;

use ratatui::{prelude::*, widgets::Block};

use crate::session::{Phase, Session};

pub fn render(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match session.phase() {
        Phase::LoggedOut => login::render(frame, area, session),
        Phase::Loading => loading::render(frame, area),
        Phase::Error => error::render(frame, area, session),
        Phase::Playing => quiz::render(frame, area, session),
        Phase::Finished => result::render(frame, area, session),
    }
}
