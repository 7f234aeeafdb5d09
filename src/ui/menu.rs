use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::engine::GameOverReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, accent: Color) {
    let lines = vec![
        Line::styled(
            "NEON SNAKE",
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter] Start"),
        Line::from("[Q]/[Esc] Quit"),
        Line::from(""),
        Line::styled(
            "Arrows or WASD steer, Space pauses",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    draw_popup(frame, area, " start ", 70, 45, lines);
}

/// Draws the pause overlay as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space]/[P] Resume"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    draw_popup(frame, area, " pause ", 60, 30, lines);
}

/// Draws the game-over popup with the final score and the cause of death.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    reference_high_score: u32,
    reason: Option<GameOverReason>,
) {
    let is_new_high = score > reference_high_score;
    let lines = vec![
        Line::from("GAME OVER"),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!(
            "High score: {}",
            if is_new_high { score } else { reference_high_score }
        )),
        Line::from(match reason {
            Some(GameOverReason::HitWall) => "Cause: ran into the wall",
            Some(GameOverReason::HitSelf) => "Cause: ran into yourself",
            Some(GameOverReason::BoardFull) => "Cause: no room left for food",
            None => "",
        }),
        Line::from(if is_new_high { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter] Play Again"),
        Line::from("[Q]/[Esc] Quit"),
    ];

    draw_popup(frame, area, " game over ", 70, 45, lines);
}

fn draw_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    width_percent: u16,
    height_percent: u16,
    lines: Vec<Line<'_>>,
) {
    let popup = centered_popup(area, width_percent, height_percent);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title.to_string())),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
