use log::debug;
use rand::Rng;
use ratatui::style::Color;
use thiserror::Error;

use crate::config::{
    FOOD_COLORS, SPECIAL_FOOD_POINTS, SPECIAL_FOOD_PROBABILITY, SPECIAL_FOOD_TTL_TICKS,
};
use crate::grid::{Cell, Grid};
use crate::snake::Snake;

/// No free cell was left to place food on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left on the board")]
pub struct BoardFull;

/// Regular food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub cell: Cell,
    pub color: Color,
}

/// Time-limited bonus food. At most one is alive at any time.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpecialFood {
    pub cell: Cell,
    pub points: u32,
    /// Simulation tick at which the bonus disappears if uneaten.
    pub expires_at_tick: u64,
}

/// What a step's consumption check found at the new head cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Consumed {
    Regular,
    Special { points: u32 },
}

impl Consumed {
    /// Returns the score value granted for this consumption.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Regular => crate::config::REGULAR_FOOD_POINTS,
            Self::Special { points } => points,
        }
    }
}

/// Owns spawn, expiry, and consumption rules for both food kinds.
///
/// Exactly one regular food is alive while a round runs; the bonus food is
/// optional and never shares a cell with the regular food or the snake.
#[derive(Debug, Clone)]
pub struct FoodManager {
    pub regular: Food,
    pub special: Option<SpecialFood>,
}

impl FoodManager {
    /// Places the first regular food and rolls for a bonus alongside it.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        now: u64,
    ) -> Result<Self, BoardFull> {
        let cell = grid
            .random_free_cell(rng, |cell| snake.occupies(cell))
            .ok_or(BoardFull)?;
        let mut manager = Self {
            regular: Food {
                cell,
                color: random_food_color(rng),
            },
            special: None,
        };
        manager.roll_special(rng, grid, snake, now);
        Ok(manager)
    }

    /// Returns true when either food kind sits at `cell`.
    ///
    /// Pure lookup; the engine uses it to decide growth before any mutation.
    #[must_use]
    pub fn has_food_at(&self, cell: Cell) -> bool {
        self.regular.cell == cell
            || self.special.map_or(false, |special| special.cell == cell)
    }

    /// Consumes whatever food sits at `cell`, if any.
    ///
    /// Eating the regular food respawns it immediately, which may in turn
    /// roll a new bonus. Eating the bonus clears only the bonus.
    pub fn consume_if_match<R: Rng + ?Sized>(
        &mut self,
        cell: Cell,
        now: u64,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
    ) -> Result<Option<Consumed>, BoardFull> {
        if cell == self.regular.cell {
            self.place_regular(rng, grid, snake)?;
            self.roll_special(rng, grid, snake, now);
            return Ok(Some(Consumed::Regular));
        }

        if let Some(special) = self.special {
            if special.cell == cell {
                self.special = None;
                return Ok(Some(Consumed::Special {
                    points: special.points,
                }));
            }
        }

        Ok(None)
    }

    /// Drops the bonus food once its expiry tick has been reached.
    pub fn expire_special_if_due(&mut self, now: u64) {
        if let Some(special) = self.special {
            if now >= special.expires_at_tick {
                debug!("bonus food at {:?} expired uneaten", special.cell);
                self.special = None;
            }
        }
    }

    fn place_regular<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
    ) -> Result<(), BoardFull> {
        let special_cell = self.special.map(|special| special.cell);
        let cell = grid
            .random_free_cell(rng, |cell| {
                snake.occupies(cell) || Some(cell) == special_cell
            })
            .ok_or(BoardFull)?;
        self.regular = Food {
            cell,
            color: random_food_color(rng),
        };
        Ok(())
    }

    fn roll_special<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        snake: &Snake,
        now: u64,
    ) {
        if self.special.is_some() || !rng.gen_bool(SPECIAL_FOOD_PROBABILITY) {
            return;
        }

        let regular_cell = self.regular.cell;
        let Some(cell) = grid.random_free_cell(rng, |cell| {
            snake.occupies(cell) || cell == regular_cell
        }) else {
            // Too crowded for a bonus; the round continues without one.
            return;
        };

        let expires_at_tick = now + SPECIAL_FOOD_TTL_TICKS;
        debug!("bonus food at {cell:?}, expires at tick {expires_at_tick}");
        self.special = Some(SpecialFood {
            cell,
            points: SPECIAL_FOOD_POINTS,
            expires_at_tick,
        });
    }
}

fn random_food_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    FOOD_COLORS[rng.gen_range(0..FOOD_COLORS.len())]
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::{FOOD_COLORS, SPECIAL_FOOD_POINTS, SPECIAL_FOOD_TTL_TICKS};
    use crate::grid::{Cell, Grid};
    use crate::snake::Snake;

    use super::{BoardFull, Consumed, Food, FoodManager, SpecialFood};

    fn test_snake() -> Snake {
        Snake::from_segments(vec![
            Cell { x: 0, y: 0 },
            Cell { x: 1, y: 0 },
            Cell { x: 2, y: 0 },
        ])
    }

    #[test]
    fn spawn_never_lands_on_the_snake() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();

        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let manager =
                FoodManager::spawn(&mut rng, grid, &snake, 0).expect("grid has free cells");
            assert!(!snake.occupies(manager.regular.cell));
        }
    }

    #[test]
    fn bonus_never_shares_a_cell_with_regular_food_or_snake() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();
        let mut seen_special = false;

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let manager =
                FoodManager::spawn(&mut rng, grid, &snake, 0).expect("grid has free cells");
            if let Some(special) = manager.special {
                seen_special = true;
                assert_ne!(special.cell, manager.regular.cell);
                assert!(!snake.occupies(special.cell));
            }
        }

        assert!(seen_special, "no seed in range rolled a bonus spawn");
    }

    #[test]
    fn bonus_expiry_is_set_one_ttl_after_spawn() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();

        let manager = (0..200)
            .find_map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                FoodManager::spawn(&mut rng, grid, &snake, 0)
                    .ok()
                    .filter(|manager| manager.special.is_some())
            })
            .expect("no seed in range rolled a bonus spawn");

        let special = manager.special.expect("filtered for a live bonus");
        assert_eq!(special.expires_at_tick, SPECIAL_FOOD_TTL_TICKS);
        assert_eq!(special.points, SPECIAL_FOOD_POINTS);
    }

    #[test]
    fn eating_regular_food_respawns_it_elsewhere() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();
        let mut rng = StdRng::seed_from_u64(9);
        let mut manager =
            FoodManager::spawn(&mut rng, grid, &snake, 0).expect("grid has free cells");
        let eaten_cell = manager.regular.cell;

        let consumed = manager
            .consume_if_match(eaten_cell, 1, &mut rng, grid, &snake)
            .expect("respawn has room");

        assert_eq!(consumed, Some(Consumed::Regular));
        assert_eq!(consumed.map(Consumed::points), Some(1));
        assert!(!snake.occupies(manager.regular.cell));
    }

    #[test]
    fn eating_the_bonus_clears_only_the_bonus() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();
        let mut rng = StdRng::seed_from_u64(9);
        let mut manager =
            FoodManager::spawn(&mut rng, grid, &snake, 0).expect("grid has free cells");
        let regular_cell = manager.regular.cell;
        manager.special = Some(SpecialFood {
            cell: Cell { x: 7, y: 5 },
            points: SPECIAL_FOOD_POINTS,
            expires_at_tick: 30,
        });

        let consumed = manager
            .consume_if_match(Cell { x: 7, y: 5 }, 1, &mut rng, grid, &snake)
            .expect("nothing respawns here");

        assert_eq!(
            consumed,
            Some(Consumed::Special {
                points: SPECIAL_FOOD_POINTS
            })
        );
        assert!(manager.special.is_none());
        assert_eq!(manager.regular.cell, regular_cell);
    }

    #[test]
    fn missing_the_food_consumes_nothing() {
        let grid = Grid::new(8, 6);
        let snake = test_snake();
        let mut rng = StdRng::seed_from_u64(9);
        let mut manager =
            FoodManager::spawn(&mut rng, grid, &snake, 0).expect("grid has free cells");
        manager.regular = Food {
            cell: Cell { x: 7, y: 5 },
            color: FOOD_COLORS[0],
        };
        manager.special = None;

        let consumed = manager
            .consume_if_match(Cell { x: 4, y: 4 }, 1, &mut rng, grid, &snake)
            .expect("no respawn happens");

        assert_eq!(consumed, None);
    }

    #[test]
    fn bonus_expires_exactly_at_its_expiry_tick() {
        let mut manager = FoodManager {
            regular: Food {
                cell: Cell { x: 0, y: 0 },
                color: FOOD_COLORS[0],
            },
            special: Some(SpecialFood {
                cell: Cell { x: 3, y: 3 },
                points: SPECIAL_FOOD_POINTS,
                expires_at_tick: 10,
            }),
        };

        manager.expire_special_if_due(9);
        assert!(manager.special.is_some());

        manager.expire_special_if_due(10);
        assert!(manager.special.is_none());
    }

    #[test]
    fn spawn_on_a_fully_occupied_board_fails() {
        let grid = Grid::new(2, 2);
        let snake = Snake::from_segments(vec![
            Cell { x: 0, y: 0 },
            Cell { x: 1, y: 0 },
            Cell { x: 1, y: 1 },
            Cell { x: 0, y: 1 },
        ]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            FoodManager::spawn(&mut rng, grid, &snake, 0).unwrap_err(),
            BoardFull
        );
    }

    #[test]
    fn has_food_at_sees_both_kinds() {
        let manager = FoodManager {
            regular: Food {
                cell: Cell { x: 1, y: 1 },
                color: FOOD_COLORS[0],
            },
            special: Some(SpecialFood {
                cell: Cell { x: 2, y: 2 },
                points: SPECIAL_FOOD_POINTS,
                expires_at_tick: 10,
            }),
        };

        assert!(manager.has_food_at(Cell { x: 1, y: 1 }));
        assert!(manager.has_food_at(Cell { x: 2, y: 2 }));
        assert!(!manager.has_food_at(Cell { x: 3, y: 3 }));
    }
}
