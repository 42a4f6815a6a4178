use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::create_titled_block;
use crate::app::App;
use crate::quiz::Answer;

/// Draw the guessing game: lyrics on display, last answer and score.
pub fn draw_quiz(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let lyrics_block = create_titled_block("Gaming zone - Is it Bob Marley's lyrics?", true);
    let lyrics = match app.quiz.current() {
        Some(example) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                example.text.trim().to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            )),
        ]),
        None => Paragraph::new(Span::styled(
            format!("No lyrics to play with. Build {} first.", app.config.dataset_path.display()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        lyrics.alignment(Alignment::Center).wrap(Wrap { trim: true }).block(lyrics_block),
        chunks[0],
    );

    let (correct, played) = app.quiz.score();
    let mut status = vec![Span::raw(" ")];
    match app.quiz.last_answer() {
        Some(answer) => {
            let color = match answer {
                Answer::Correct => Color::Green,
                Answer::Wrong => Color::Red,
            };
            status.push(Span::styled(answer.message(), Style::default().fg(color).add_modifier(Modifier::BOLD)));
        }
        None => status.push(Span::styled("Bob (b) or not Bob (n)?", Style::default().fg(Color::Yellow))),
    }
    status.push(Span::styled(format!("   {correct}/{played} correct"), Style::default().fg(Color::Gray)));

    f.render_widget(Paragraph::new(Line::from(status)).block(create_titled_block("Answer", false)), chunks[1]);
}
