use std::collections::VecDeque;

use crate::grid::Cell;
use crate::input::Direction;

/// Ordered snake body, head first.
///
/// The snake is pure geometry: direction buffering and collision rules live
/// in the engine, which is also the only caller of [`Snake::advance`].
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates a horizontal snake with its head at `head` and the body
    /// trailing off to the left, ready to move right.
    #[must_use]
    pub fn starting_at(head: Cell, length: usize) -> Self {
        debug_assert!(length >= 1);

        let body = (0..length as i32)
            .map(|offset| Cell {
                x: head.x - offset,
                y: head.y,
            })
            .collect();
        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        debug_assert!(!segments.is_empty());
        Self {
            body: VecDeque::from(segments),
        }
    }

    /// Returns the cell the head would occupy after one step in `direction`.
    #[must_use]
    pub fn peek_next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Prepends `new_head`; drops the tail unless the snake grows this step.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Iterates over every segment except the head.
    pub fn body_without_head(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().skip(1).copied()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
