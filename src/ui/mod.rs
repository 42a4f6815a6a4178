//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod classify;
mod quiz;

pub use classify::draw_classify;
pub use quiz::draw_quiz;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode};
use crate::constants::genius::{OTHER_MAX_SONGS, ROSTER, TARGET_ARTIST_NAME, TARGET_MAX_SONGS};

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Splash => draw_splash(f, chunks[0]),
        AppMode::Classify => draw_classify(f, app, chunks[0]),
        AppMode::Quiz => draw_quiz(f, app, chunks[0]),
    }

    if app.mode == AppMode::Splash {
        let msg = "Press any key to continue...";
        if chunks[1].width >= msg.len() as u16 && chunks[1].height >= 3 {
            let width = msg.len() as u16;
            let text_area = Rect {
                x: chunks[1].left() + (chunks[1].width.saturating_sub(width)) / 2,
                y: chunks[1].top() + 1,
                width,
                height: 1,
            };
            f.render_widget(Paragraph::new(msg).style(Style::default().fg(Color::Yellow)), text_area);
        }
    } else {
        draw_command_bar(f, app, chunks[1]);
    }

    if app.is_loading {
        draw_loading_indicator(f);
    }

    // Error message is blocking
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    } else if app.show_methodology {
        draw_methodology(f, app);
    }
}

fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled("Commands/Status", Style::default().fg(Color::Yellow)));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let help_text = match app.mode {
        AppMode::Splash => vec![],
        AppMode::Classify => create_help_text(&[
            ("Enter", "Classify"),
            ("↑/↓", "Threshold"),
            ("Tab", "Game"),
            ("F2", "Methodology"),
            ("F1", "Help"),
        ]),
        AppMode::Quiz => {
            let (correct, played) = app.quiz.score();
            let mut text = create_help_text(&[
                ("b", "Bob"),
                ("n", "Not Bob"),
                ("r", "New lyrics"),
                ("Tab", "Classifier"),
                ("q", "Quit"),
            ]);
            text.push(Span::styled(format!(" | Score {correct}/{played}"), Style::default().fg(Color::Gray)));
            text
        }
    };

    f.render_widget(Paragraph::new(Line::from(help_text)).style(Style::default().fg(Color::Gray)), inner_area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));
        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rectangle of the given size centered in `outer`.
fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: outer.x + (outer.width.saturating_sub(width)) / 2,
        y: outer.y + (outer.height.saturating_sub(height)) / 2,
        width: width.min(outer.width),
        height: height.min(outer.height),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, area: Rect) {
    let logo = [
        r"  ___       _                       _     ___       _    ___  ",
        r" | _ ) ___ | |__   ___  _ _   _ _  ___ | |_ | _ ) ___ | |__|__ \ ",
        r" | _ \/ _ \| '_ \ / _ \| '_| | ' \/ _ \|  _|| _ \/ _ \| '_ \ /_/ ",
        r" |___/\___/|_.__/ \___/|_|   |_||_\___/ \__||___/\___/|_.__/(_)  ",
        r"                                                               ",
        r"   Write some lyrics and find out if it could be a Bob Marley song",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightGreen))
        .title(Span::styled("Bob or not Bob?", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = logo
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let style = if i < 4 {
                Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow)
            };
            Line::from(Span::styled(*line, style))
        })
        .collect();

    let logo_width = logo.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let logo_area = centered(inner_area, logo_width as u16, logo.len() as u16);
    f.render_widget(Paragraph::new(lines), logo_area);

    let version_text = concat!("v", env!("CARGO_PKG_VERSION"));
    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };
        f.render_widget(Paragraph::new(version_text).style(Style::default().fg(Color::Gray)), version_area);
    }
}

// Draw a loading indicator overlay
fn draw_loading_indicator(f: &mut Frame) {
    let area = centered(f.size(), 22, 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let inner_area = block.inner(area);

    let text = Paragraph::new("Wait for it...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(text, inner_area);
}

// Draw an error message overlay
fn draw_error_message(f: &mut Frame, message: &str) {
    let size = f.size();
    let area = centered(size, 50.min(size.width.saturating_sub(4)), 7);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(text, inner_area[0]);
    f.render_widget(hint, inner_area[1]);
}

/// Draw a modal with a title and prepared lines.
fn draw_modal(f: &mut Frame, title: &str, lines: Vec<Line<'_>>, width: u16, height: u16) {
    let size = f.size();
    let area = centered(size, width.min(size.width.saturating_sub(4)), height.min(size.height.saturating_sub(4)));

    let block = Block::default()
        .title(Span::styled(format!(" {title} "), Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    let inner_area = block.inner(area);

    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner_area);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let help_text: Vec<Line> = build_help_content(app)
        .into_iter()
        .map(|(key, desc, is_header)| {
            if is_header {
                Line::from(Span::styled(key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>12}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    draw_modal(f, "Help - Keybindings", help_text, 60, 20);
}

// Build help content based on current mode
fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1", "Show this help", false),
        ("F2", "See methodology", false),
        ("Tab", "Switch classifier / game", false),
        ("F10 / Ctrl+C", "Quit application", false),
        ("Esc", "Dismiss modal", false),
        ("", "", false),
    ];

    match app.mode {
        AppMode::Classify => lines.extend([
            ("── Classifier ──", "", true),
            ("Type", "Enter your lyrics", false),
            ("Enter", "Is it Bob?", false),
            ("↑/↓", "Raise/lower the Bob threshold", false),
            ("Esc", "Clear the lyrics", false),
        ]),
        AppMode::Quiz => lines.extend([
            ("── Gaming zone ──", "", true),
            ("b", "Guess Bob", false),
            ("n", "Guess Not Bob", false),
            ("r", "Give me new lyrics", false),
            ("q", "Quit", false),
        ]),
        AppMode::Splash => lines.extend([
            ("── Splash ──", "", true),
            ("Any key", "Continue to app", false),
        ]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc or F1 to close", "", true));
    lines
}

// Draw the methodology panel
fn draw_methodology(f: &mut Frame, app: &App) {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled("Data", heading)),
        Line::from("Lyrics are collected from Genius. To tell Bob Marley apart, lyrics from several singers are used:"),
        Line::from(format!("  - {TARGET_MAX_SONGS} songs from {TARGET_ARTIST_NAME}")),
        Line::from(format!("  - {OTHER_MAX_SONGS} songs for each of:")),
    ];
    lines.extend(
        ROSTER
            .iter()
            .filter(|artist| **artist != TARGET_ARTIST_NAME)
            .map(|artist| Line::from(format!("      {artist}"))),
    );
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("Cleaning", heading)),
        Line::from("The text is cleaned and split into lines for each artist. To add context, lines are combined"),
        Line::from(format!("into lyrics of at most {} characters. Labels are binary: Bob or not Bob.", app.config.max_len)),
        Line::from(""),
        Line::from(Span::styled("Loaded game table", heading)),
    ]);

    let counts = app.quiz.dataset().label_counts();
    if counts.is_empty() {
        lines.push(Line::from(Span::styled("  no rows loaded", Style::default().fg(Color::Gray))));
    }
    lines.extend(
        counts
            .into_iter()
            .map(|(label, n)| Line::from(format!("  {:<8} {n}", label.display_name()))),
    );
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("Model", heading)),
        Line::from(format!("  {} (binary sequence classification head)", app.config.model_id)),
    ]);

    draw_modal(f, "Methodology", lines, 100, 30);
}
