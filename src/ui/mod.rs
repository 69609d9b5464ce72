mod game_over;
mod quiz;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Question | AppState::Feedback => quiz::render(frame, area, app),
        AppState::GameOver => game_over::render(frame, area, app),
    }
}
