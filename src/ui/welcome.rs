use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::models::QuestionMode;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
    ])
    .split(area);

    let config = app.round().config();
    let mode = match config.mode {
        QuestionMode::MultipleChoice => "Multiple Choice",
        QuestionMode::TrueFalse => "True or False",
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA LOCK",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Questions · {}", app.total_questions(), mode),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("Answer {} correctly to open the lock", config.win_threshold),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
