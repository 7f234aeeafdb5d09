use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::INITIAL_SNAKE_LENGTH;
use crate::food::{BoardFull, Consumed, FoodManager};
use crate::grid::{Cell, Grid};
use crate::input::{direction_change_is_valid, Direction};
use crate::snake::Snake;

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
    /// Food had nowhere left to respawn.
    BoardFull,
}

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    Continue,
    Scored(Consumed),
    Terminated(GameOverReason),
}

/// Discrete-time simulation engine for one round.
///
/// Advances the snake one cell per [`Engine::step`] call; the session layer
/// decides when steps happen and what score and speed follow from them.
#[derive(Debug, Clone)]
pub struct Engine {
    pub snake: Snake,
    pub food: FoodManager,
    pub tick_count: u64,
    grid: Grid,
    current_direction: Direction,
    pending_direction: Direction,
    rng: StdRng,
}

impl Engine {
    /// Creates a round with entropy-seeded food placement.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic round for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, mut rng: StdRng) -> Self {
        assert!(
            i32::from(grid.width() / 2) >= INITIAL_SNAKE_LENGTH as i32 - 1,
            "grid {}x{} is too narrow for the starting snake",
            grid.width(),
            grid.height()
        );

        let snake = Snake::starting_at(grid.center(), INITIAL_SNAKE_LENGTH);
        let food = FoodManager::spawn(&mut rng, grid, &snake, 0)
            .expect("a fresh board always has a free cell for the first food");

        Self {
            snake,
            food,
            tick_count: 0,
            grid,
            current_direction: Direction::Right,
            pending_direction: Direction::Right,
            rng,
        }
    }

    /// Buffers a direction change for the next tick, last input wins.
    ///
    /// A request reversing the direction applied this tick is silently
    /// dropped, so the snake can never fold onto its own neck.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.current_direction, direction) {
            self.pending_direction = direction;
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepOutcome {
        self.current_direction = self.pending_direction;
        self.tick_count += 1;

        let new_head = self.snake.peek_next_head(self.current_direction);
        let grow = self.food.has_food_at(new_head);

        if !self.grid.is_in_bounds(new_head) {
            debug!("tick {}: head {new_head:?} left the field", self.tick_count);
            return StepOutcome::Terminated(GameOverReason::HitWall);
        }

        // The tail cell is vacated on the same tick the head arrives, so it
        // only counts as a collision when growth keeps it in place.
        let vacating_tail = if grow { None } else { Some(self.snake.tail()) };
        let hit_self = self
            .snake
            .body_without_head()
            .filter(|&segment| Some(segment) != vacating_tail)
            .any(|segment| segment == new_head);
        if hit_self {
            debug!("tick {}: head {new_head:?} hit the body", self.tick_count);
            return StepOutcome::Terminated(GameOverReason::HitSelf);
        }

        self.snake.advance(new_head, grow);

        let consumed = match self.food.consume_if_match(
            new_head,
            self.tick_count,
            &mut self.rng,
            self.grid,
            &self.snake,
        ) {
            Ok(consumed) => consumed,
            Err(BoardFull) => {
                debug!("tick {}: board full, nowhere to respawn food", self.tick_count);
                return StepOutcome::Terminated(GameOverReason::BoardFull);
            }
        };

        self.food.expire_special_if_due(self.tick_count);

        match consumed {
            Some(consumed) => StepOutcome::Scored(consumed),
            None => StepOutcome::Continue,
        }
    }

    /// Returns the play-field dimensions.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Returns the direction applied on the most recent tick.
    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    /// Returns the prospective head cell for the buffered direction.
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.snake.peek_next_head(self.pending_direction)
    }
}
