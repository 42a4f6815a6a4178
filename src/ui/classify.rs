use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::create_titled_block;
use crate::app::App;
use crate::classifier::Verdict;
use crate::constants::ui::INPUT_HEIGHT;

/// Draw the lyrics text box, the threshold and the latest verdict.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_classify(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    let input_block = create_titled_block("Write some lyrics and find out if it could be a Bob Marley song!", true);
    let input_inner = input_block.inner(chunks[0]);
    let input = if app.input.is_empty() {
        Paragraph::new("Your lyrics").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.as_str())
    };
    f.render_widget(input.block(input_block), chunks[0]);

    // Keep the cursor at the end of the visible text
    if app.error_message.is_none() && !app.show_help && !app.show_methodology {
        let typed = app.input.chars().count() as u16;
        let x = input_inner.x + typed.min(input_inner.width.saturating_sub(1));
        f.set_cursor(x, input_inner.y);
    }

    let threshold = Paragraph::new(Line::from(vec![
        Span::raw(" Threshold for Bob : "),
        Span::styled(format!("{:.2}", app.threshold), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("  (↑/↓ to adjust)", Style::default().fg(Color::DarkGray)),
    ]))
    .block(create_titled_block("Threshold", false));
    f.render_widget(threshold, chunks[1]);

    let result_block = create_titled_block("Is it Bob?", false);
    let content = match (&app.last_prediction, app.verdict()) {
        (Some((text, prediction)), Some(verdict)) => {
            vec![
                Line::from(Span::styled(verdict.headline(), Style::default().fg(verdict_color(&verdict)).add_modifier(Modifier::BOLD))),
                Line::from(""),
                Line::from(Span::styled(format!("\"{text}\""), Style::default().fg(Color::Gray))),
                Line::from(Span::styled(
                    format!("Model output: {} ({:.4})", prediction.label, prediction.score),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        _ => vec![Line::from(Span::styled("Press Enter to ask the model.", Style::default().fg(Color::DarkGray)))],
    };
    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: true }).block(result_block), chunks[2]);
}

fn verdict_color(verdict: &Verdict) -> Color {
    if verdict.is_target() { Color::Green } else { Color::Red }
}
