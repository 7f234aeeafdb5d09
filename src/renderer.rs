use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    Skin, BORDER_HALF_BLOCK, FIELD_BG, GLYPH_FOOD, GLYPH_MINIMAP_CELL, GLYPH_MINIMAP_FOOD,
    GLYPH_SNAKE_SEGMENT, GLYPH_SPECIAL_FOOD, SPECIAL_FOOD_COLOR,
};
use crate::grid::{Cell, Grid};
use crate::session::{Phase, Session};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

const MINIMAP_WIDTH: u16 = 10;
const MINIMAP_HEIGHT: u16 = 5;
const MINIMAP_MARGIN: u16 = 1;
const MINIMAP_BG: Color = Color::Rgb(24, 24, 24);

/// Renders one full frame from immutable session state.
pub fn render(frame: &mut Frame<'_>, session: &Session, skin: Skin) {
    let area = frame.area();
    let play_area = render_hud(frame, area, session);

    let accent = skin.segment_color(0, session.engine.tick_count);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(accent))
        .style(Style::new().bg(FIELD_BG));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, session);
    render_snake(frame, inner, session, skin);
    render_minimap(frame, inner, session, skin);

    match session.phase {
        Phase::Idle => render_start_menu(frame, play_area, session.high_score, accent),
        Phase::Paused => render_pause_menu(frame, play_area),
        Phase::GameOver => render_game_over_menu(
            frame,
            play_area,
            session.score,
            session.round_start_high_score,
            session.game_over_reason,
        ),
        Phase::Running => {}
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, session: &Session) {
    let grid = session.engine.grid();
    let buffer = frame.buffer_mut();

    let food = session.engine.food.regular;
    if let Some((x, y)) = logical_to_terminal(inner, grid, food.cell) {
        buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(food.color));
    }

    if let Some(special) = session.engine.food.special {
        let Some((x, y)) = logical_to_terminal(inner, grid, special.cell) else {
            return;
        };
        // Tick-parity pulse so the bonus reads as urgent.
        let pulse = if session.engine.tick_count % 2 == 0 {
            Modifier::BOLD
        } else {
            Modifier::DIM
        };
        buffer.set_string(
            x,
            y,
            GLYPH_SPECIAL_FOOD,
            Style::new().fg(SPECIAL_FOOD_COLOR).add_modifier(pulse),
        );
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, session: &Session, skin: Skin) {
    let grid = session.engine.grid();
    let head = session.engine.snake.head();
    let tick = session.engine.tick_count;

    let buffer = frame.buffer_mut();
    for (index, segment) in session.engine.snake.segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, grid, segment) else {
            continue;
        };

        let mut style = Style::new().fg(skin.segment_color(index, tick));
        if segment == head {
            style = style.add_modifier(Modifier::BOLD);
        }
        buffer.set_string(x, y, GLYPH_SNAKE_SEGMENT, style);
    }
}

/// Projects the whole board into a small viewport in the top-right corner.
fn render_minimap(frame: &mut Frame<'_>, inner: Rect, session: &Session, skin: Skin) {
    // Skip the minimap when it would cover a meaningful share of the field.
    if inner.width < MINIMAP_WIDTH * 3 || inner.height < MINIMAP_HEIGHT * 3 {
        return;
    }

    let viewport = Rect {
        x: inner.right() - MINIMAP_WIDTH - MINIMAP_MARGIN,
        y: inner.y + MINIMAP_MARGIN,
        width: MINIMAP_WIDTH,
        height: MINIMAP_HEIGHT,
    };

    let buffer = frame.buffer_mut();
    for y in viewport.y..viewport.bottom() {
        for x in viewport.x..viewport.right() {
            buffer.set_string(x, y, " ", Style::new().bg(MINIMAP_BG));
        }
    }

    let grid = session.engine.grid();
    let tick = session.engine.tick_count;
    for (index, segment) in session.engine.snake.segments().enumerate() {
        if let Some((x, y)) = project(segment, grid, viewport) {
            buffer.set_string(
                x,
                y,
                GLYPH_MINIMAP_CELL,
                Style::new().fg(skin.segment_color(index, tick)).bg(MINIMAP_BG),
            );
        }
    }

    let food = session.engine.food.regular;
    if let Some((x, y)) = project(food.cell, grid, viewport) {
        buffer.set_string(x, y, GLYPH_MINIMAP_FOOD, Style::new().fg(food.color).bg(MINIMAP_BG));
    }

    if let Some(special) = session.engine.food.special {
        if let Some((x, y)) = project(special.cell, grid, viewport) {
            buffer.set_string(
                x,
                y,
                GLYPH_MINIMAP_FOOD,
                Style::new().fg(SPECIAL_FOOD_COLOR).bg(MINIMAP_BG),
            );
        }
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, cell: Cell) -> Option<(u16, u16)> {
    if !grid.is_in_bounds(cell) {
        return None;
    }

    let x = inner.x.saturating_add(u16::try_from(cell.x).ok()?);
    let y = inner.y.saturating_add(u16::try_from(cell.y).ok()?);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

fn project(cell: Cell, grid: Grid, viewport: Rect) -> Option<(u16, u16)> {
    if !grid.is_in_bounds(cell) {
        return None;
    }

    let x = u32::try_from(cell.x).ok()? * u32::from(viewport.width) / u32::from(grid.width());
    let y = u32::try_from(cell.y).ok()? * u32::from(viewport.height) / u32::from(grid.height());
    Some((
        viewport.x + u16::try_from(x).ok()?,
        viewport.y + u16::try_from(y).ok()?,
    ))
}
