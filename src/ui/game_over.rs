use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::round::{EndReason, RoundOutcome};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let round = app.round();
    let won = round.outcome() == Some(RoundOutcome::Won);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let (banner, color) = if won {
        ("YOU WIN! THE LOCK IS OPEN", Color::Green)
    } else {
        ("GAME OVER", Color::Red)
    };

    let reason = match round.end_reason() {
        Some(EndReason::ThresholdReached) => "Win threshold reached",
        Some(EndReason::Exhausted) => "No questions left",
        None => "",
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(banner, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} correct out of {} asked",
                round.correct_count(),
                round.position()
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!("{} needed to win", round.config().win_threshold),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(reason, Style::default().fg(Color::DarkGray))),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color),
    );
    frame.render_widget(widget, chunks[1]);

    render_controls(frame, chunks[3], app.restart_at());
}

fn render_controls(frame: &mut Frame, area: Rect, restart_at: Option<Instant>) {
    let text = match restart_at {
        Some(at) => {
            let secs = at.saturating_duration_since(Instant::now()).as_secs_f32().ceil();
            format!("new round in {}s  ·  r restart now  ·  q quit", secs as u64)
        }
        None => "r restart  ·  q quit".to_string(),
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
