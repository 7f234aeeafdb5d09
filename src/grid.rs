use rand::Rng;

use crate::input::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so that a prospective head one step outside the
/// play field stays representable for the bounds check.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Returns this cell offset by one unit in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Up => Self {
                x: self.x,
                y: self.y - 1,
            },
            Direction::Down => Self {
                x: self.x,
                y: self.y + 1,
            },
            Direction::Left => Self {
                x: self.x - 1,
                y: self.y,
            },
            Direction::Right => Self {
                x: self.x + 1,
                y: self.y,
            },
        }
    }
}

/// Discrete play-field dimensions and coordinate space.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    /// Creates a grid of `width` by `height` cells.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { width, height }
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when the cell lies inside the play field.
    #[must_use]
    pub fn is_in_bounds(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.width)
            && cell.y < i32::from(self.height)
    }

    /// Returns the center cell of the grid.
    #[must_use]
    pub fn center(self) -> Cell {
        Cell {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Draws a uniformly random cell for which `is_occupied` returns false.
    ///
    /// Returns `None` when every cell is occupied, so a full board surfaces
    /// as a spawn failure instead of a spin.
    #[must_use]
    pub fn random_free_cell<R, F>(self, rng: &mut R, is_occupied: F) -> Option<Cell>
    where
        R: Rng + ?Sized,
        F: Fn(Cell) -> bool,
    {
        let mut candidates = Vec::with_capacity(self.total_cells());

        for y in 0..i32::from(self.height) {
            for x in 0..i32::from(self.width) {
                let cell = Cell { x, y };
                if !is_occupied(cell) {
                    candidates.push(cell);
                }
            }
        }

        if candidates.is_empty() {
            return None;
        }

        let index = rng.gen_range(0..candidates.len());
        Some(candidates[index])
    }
}
