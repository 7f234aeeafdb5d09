use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::session::Session;

const SEPARATOR: &str = " │ ";
const FULL_LABELS: [&str; 4] = ["Length", "Level", "Score", "Hi"];
const COMPACT_LABELS: [&str; 4] = ["L", "V", "S", "H"];

/// Renders the one-line HUD below the play area and returns what remains.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &Session) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(hud_line(
            session.engine.snake.len(),
            session.speed_level(),
            session.score,
            session.high_score,
            usize::from(hud_area.width),
        ))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

/// Builds the HUD line, falling back to one-letter labels when the full
/// labels would overflow the available width.
fn hud_line(
    length: usize,
    level: u32,
    score: u32,
    high_score: u32,
    available_width: usize,
) -> Line<'static> {
    let full = plain_text(FULL_LABELS, length, level, score, high_score);
    let labels = if full.width() > available_width {
        COMPACT_LABELS
    } else {
        FULL_LABELS
    };
    let [length_label, level_label, score_label, high_score_label] = labels;

    let value_style = Style::default().fg(Color::White);
    let score_style = if score > 0 && score >= high_score {
        Style::default().fg(Color::Yellow)
    } else {
        value_style
    };

    Line::from(vec![
        Span::raw(format!("{length_label}: ")),
        Span::styled(length.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{level_label}: ")),
        Span::styled(level.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{score_label}: ")),
        Span::styled(score.to_string(), score_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{high_score_label}: ")),
        Span::styled(high_score.to_string(), value_style),
    ])
}

fn plain_text(labels: [&str; 4], length: usize, level: u32, score: u32, high_score: u32) -> String {
    let [length_label, level_label, score_label, high_score_label] = labels;
    format!(
        "{length_label}: {length}{SEPARATOR}{level_label}: {level}{SEPARATOR}\
         {score_label}: {score}{SEPARATOR}{high_score_label}: {high_score}"
    )
}
