use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, LOCK_STAGES};
use crate::models::{AppState, Question};
use crate::round::AnswerResult;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.displayed_question() else {
        return;
    };
    let has_code = question.code.is_some();
    let chunks = create_layout(area, has_code);

    render_status(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.text);

    let options_chunk = match &question.code {
        Some(code) => {
            render_code_block(frame, chunks[2], code);
            chunks[3]
        }
        None => chunks[2],
    };

    let feedback = match app.state {
        AppState::Feedback => app.last_result(),
        _ => None,
    };
    render_options(frame, options_chunk, question, app.selected_option(), feedback);

    let controls_chunk = if has_code { chunks[4] } else { chunks[3] };
    render_controls(frame, controls_chunk, feedback);
}

fn create_layout(area: Rect, has_code: bool) -> std::rc::Rc<[Rect]> {
    if has_code {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .margin(2)
        .split(area)
    }
}

/// Lock indicator on the left, question progress on the right.
fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    if let Some(stage) = app.lock_stage() {
        let filled = stage + 1;
        let lock = Line::from(vec![
            Span::styled("LOCK ", Style::default().fg(Color::DarkGray)),
            Span::styled("■".repeat(filled), Style::default().fg(Color::Yellow)),
            Span::styled(
                "□".repeat(LOCK_STAGES - filled),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(lock), halves[0]);
    }

    let progress = format!(
        "{} correct  ·  {}/{}",
        app.round().correct_count(),
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_code_block(frame: &mut Frame, area: Rect, code: &str) {
    let code_lines: Vec<Line> = code
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Yellow))))
        .collect();

    let widget = Paragraph::new(code_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn option_style(index: usize, selected: usize, feedback: Option<AnswerResult>) -> (Style, &'static str) {
    match feedback {
        Some(result) if index == result.correct_index => {
            (Style::default().fg(Color::Green).bold(), "✓")
        }
        Some(result) if index == result.selected_index => {
            (Style::default().fg(Color::Red).bold(), "✗")
        }
        Some(_) => (Style::default().fg(Color::DarkGray), " "),
        None if index == selected => (Style::default().fg(Color::Cyan).bold(), ">"),
        None => (Style::default().fg(Color::Gray), " "),
    }
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    feedback: Option<AnswerResult>,
) {
    let options = question.options();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let (style, marker) = option_style(index, selected, feedback);
        let label = OPTION_LABELS.get(index).copied().unwrap_or('?');

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", label), style),
            Span::styled(option.to_string(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, feedback: Option<AnswerResult>) {
    let widget = match feedback {
        Some(result) if result.is_correct => Paragraph::new("Correct!").fg(Color::Green).bold(),
        Some(_) => Paragraph::new("Wrong!").fg(Color::Red).bold(),
        None => Paragraph::new("j/k navigate  ·  enter select  ·  1-4 answer  ·  q quit")
            .fg(Color::DarkGray),
    };
    frame.render_widget(widget.alignment(Alignment::Center), area);
}
