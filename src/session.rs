use std::time::Duration;

use log::{debug, info};

use crate::config::{INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, TICK_INTERVAL_DECREMENT_MS};
use crate::engine::{Engine, GameOverReason, StepOutcome};
use crate::food::Consumed;
use crate::grid::Grid;
use crate::input::Direction;
use crate::score::HighScoreStore;

/// High-level state of one play session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Owns the engine plus everything that outlives a single round: score,
/// speed, and the persisted high score.
///
/// The driver calls [`Session::tick`] on its timer and forwards input; all
/// gameplay outcomes resolve into phase and score changes here, never into
/// errors.
pub struct Session {
    pub engine: Engine,
    pub phase: Phase,
    pub score: u32,
    pub tick_interval: Duration,
    pub high_score: u32,
    /// High score on record when the current round started, kept so the
    /// game-over screen can tell a fresh record from an old one.
    pub round_start_high_score: u32,
    pub game_over_reason: Option<GameOverReason>,
    seed: Option<u64>,
    store: Box<dyn HighScoreStore>,
}

impl Session {
    /// Creates an idle session and reads the persisted high score.
    #[must_use]
    pub fn new(grid: Grid, seed: Option<u64>, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load();

        Self {
            engine: build_engine(grid, seed),
            phase: Phase::Idle,
            score: 0,
            tick_interval: Duration::from_millis(INITIAL_TICK_INTERVAL_MS),
            high_score,
            round_start_high_score: high_score,
            game_over_reason: None,
            seed,
            store,
        }
    }

    /// Starts a fresh round from any phase.
    pub fn start(&mut self) {
        let grid = self.engine.grid();
        self.engine = build_engine(grid, self.seed);
        self.score = 0;
        self.tick_interval = Duration::from_millis(INITIAL_TICK_INTERVAL_MS);
        self.round_start_high_score = self.high_score;
        self.game_over_reason = None;
        self.phase = Phase::Running;
        info!("round started on a {}x{} grid", grid.width(), grid.height());
    }

    /// Flips between Running and Paused; does nothing in other phases.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => {
                debug!("paused");
                Phase::Paused
            }
            Phase::Paused => {
                debug!("resumed");
                Phase::Running
            }
            other => other,
        };
    }

    /// Buffers a direction change; accepted in any phase, consumed on the
    /// next Running tick.
    pub fn buffer_direction(&mut self, direction: Direction) {
        self.engine.buffer_direction(direction);
    }

    /// Advances the simulation by one tick while Running.
    ///
    /// Ticks arriving in any other phase are no-ops and return `None`.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.phase != Phase::Running {
            return None;
        }

        let outcome = self.engine.step();
        match outcome {
            StepOutcome::Scored(consumed) => {
                self.score += consumed.points();
                if consumed == Consumed::Regular {
                    self.shrink_tick_interval();
                }
                if self.score > self.high_score {
                    self.high_score = self.score;
                    self.store.save(self.high_score);
                }
            }
            StepOutcome::Terminated(reason) => {
                info!("game over ({reason:?}), final score {}", self.score);
                self.phase = Phase::GameOver;
                self.game_over_reason = Some(reason);
            }
            StepOutcome::Continue => {}
        }

        Some(outcome)
    }

    /// Returns the 1-based speed level derived from the tick interval.
    #[must_use]
    pub fn speed_level(&self) -> u32 {
        let shaved_ms = INITIAL_TICK_INTERVAL_MS.saturating_sub(self.tick_interval.as_millis() as u64);
        1 + (shaved_ms / TICK_INTERVAL_DECREMENT_MS) as u32
    }

    fn shrink_tick_interval(&mut self) {
        let floor = Duration::from_millis(MIN_TICK_INTERVAL_MS);
        self.tick_interval = self
            .tick_interval
            .saturating_sub(Duration::from_millis(TICK_INTERVAL_DECREMENT_MS))
            .max(floor);
    }
}

fn build_engine(grid: Grid, seed: Option<u64>) -> Engine {
    match seed {
        Some(seed) => Engine::new_with_seed(grid, seed),
        None => Engine::new(grid),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::config::{
        FOOD_COLORS, INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, SPECIAL_FOOD_POINTS,
        TICK_INTERVAL_DECREMENT_MS,
    };
    use crate::engine::{GameOverReason, StepOutcome};
    use crate::food::{Consumed, Food, SpecialFood};
    use crate::grid::{Cell, Grid};
    use crate::score::HighScoreStore;
    use crate::snake::Snake;

    use super::{Phase, Session};

    struct RecordingStore {
        initial: u32,
        saves: Rc<RefCell<Vec<u32>>>,
    }

    impl HighScoreStore for RecordingStore {
        fn load(&self) -> u32 {
            self.initial
        }

        fn save(&self, score: u32) {
            self.saves.borrow_mut().push(score);
        }
    }

    fn session_with_high_score(initial: u32) -> (Session, Rc<RefCell<Vec<u32>>>) {
        let saves = Rc::new(RefCell::new(Vec::new()));
        let store = RecordingStore {
            initial,
            saves: Rc::clone(&saves),
        };
        let session = Session::new(Grid::new(10, 10), Some(7), Box::new(store));
        (session, saves)
    }

    fn park_food(session: &mut Session) {
        session.engine.food.regular = Food {
            cell: Cell { x: 0, y: 9 },
            color: FOOD_COLORS[0],
        };
        session.engine.food.special = None;
    }

    #[test]
    fn new_session_is_idle_and_loads_the_high_score() {
        let (mut session, _saves) = session_with_high_score(12);

        assert_eq!(session.phase, Phase::Idle);
        assert_eq!(session.high_score, 12);
        assert!(session.tick().is_none());
    }

    #[test]
    fn start_resets_score_speed_and_reason() {
        let (mut session, _saves) = session_with_high_score(0);
        session.score = 9;
        session.tick_interval = Duration::from_millis(80);
        session.game_over_reason = Some(GameOverReason::HitWall);

        session.start();

        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.score, 0);
        assert_eq!(
            session.tick_interval,
            Duration::from_millis(INITIAL_TICK_INTERVAL_MS)
        );
        assert_eq!(session.game_over_reason, None);
    }

    #[test]
    fn pause_toggle_only_flips_running_and_paused() {
        let (mut session, _saves) = session_with_high_score(0);

        session.toggle_pause();
        assert_eq!(session.phase, Phase::Idle);

        session.start();
        session.toggle_pause();
        assert_eq!(session.phase, Phase::Paused);
        assert!(session.tick().is_none());

        session.toggle_pause();
        assert_eq!(session.phase, Phase::Running);
    }

    #[test]
    fn regular_food_scores_speeds_up_and_saves_the_record() {
        let (mut session, saves) = session_with_high_score(0);
        session.start();
        park_food(&mut session);
        session.engine.food.regular.cell = session.engine.next_head();

        let outcome = session.tick();

        assert_eq!(outcome, Some(StepOutcome::Scored(Consumed::Regular)));
        assert_eq!(session.score, 1);
        assert_eq!(session.high_score, 1);
        assert_eq!(saves.borrow().as_slice(), &[1]);
        assert_eq!(
            session.tick_interval,
            Duration::from_millis(INITIAL_TICK_INTERVAL_MS - TICK_INTERVAL_DECREMENT_MS)
        );
        assert_eq!(session.speed_level(), 2);
    }

    #[test]
    fn bonus_food_scores_without_speeding_up() {
        let (mut session, saves) = session_with_high_score(0);
        session.start();
        park_food(&mut session);
        session.engine.food.special = Some(SpecialFood {
            cell: session.engine.next_head(),
            points: SPECIAL_FOOD_POINTS,
            expires_at_tick: 100,
        });

        session.tick();

        assert_eq!(session.score, SPECIAL_FOOD_POINTS);
        assert_eq!(saves.borrow().as_slice(), &[SPECIAL_FOOD_POINTS]);
        assert_eq!(
            session.tick_interval,
            Duration::from_millis(INITIAL_TICK_INTERVAL_MS)
        );
    }

    #[test]
    fn no_save_happens_without_a_new_record() {
        let (mut session, saves) = session_with_high_score(10);
        session.start();
        park_food(&mut session);
        session.engine.food.regular.cell = session.engine.next_head();

        session.tick();

        assert_eq!(session.score, 1);
        assert_eq!(session.high_score, 10);
        assert!(saves.borrow().is_empty());
    }

    #[test]
    fn tick_interval_never_drops_below_the_floor() {
        let (mut session, _saves) = session_with_high_score(0);
        session.start();
        session.tick_interval = Duration::from_millis(MIN_TICK_INTERVAL_MS + 1);
        park_food(&mut session);
        session.engine.food.regular.cell = session.engine.next_head();

        session.tick();
        assert_eq!(
            session.tick_interval,
            Duration::from_millis(MIN_TICK_INTERVAL_MS)
        );

        park_food(&mut session);
        session.engine.food.regular.cell = session.engine.next_head();
        session.tick();
        assert_eq!(
            session.tick_interval,
            Duration::from_millis(MIN_TICK_INTERVAL_MS)
        );
    }

    #[test]
    fn collision_moves_the_session_to_game_over() {
        let (mut session, _saves) = session_with_high_score(0);
        session.start();
        park_food(&mut session);
        session.engine.snake = Snake::from_segments(vec![
            Cell { x: 9, y: 5 },
            Cell { x: 8, y: 5 },
            Cell { x: 7, y: 5 },
        ]);

        let outcome = session.tick();

        assert_eq!(
            outcome,
            Some(StepOutcome::Terminated(GameOverReason::HitWall))
        );
        assert_eq!(session.phase, Phase::GameOver);
        assert_eq!(session.game_over_reason, Some(GameOverReason::HitWall));
        assert!(session.tick().is_none());
    }

    #[test]
    fn start_after_game_over_begins_a_fresh_round() {
        let (mut session, _saves) = session_with_high_score(0);
        session.start();
        park_food(&mut session);
        session.engine.snake = Snake::from_segments(vec![
            Cell { x: 9, y: 5 },
            Cell { x: 8, y: 5 },
            Cell { x: 7, y: 5 },
        ]);
        session.tick();
        assert_eq!(session.phase, Phase::GameOver);

        session.start();

        assert_eq!(session.phase, Phase::Running);
        assert_eq!(session.score, 0);
        assert_eq!(session.engine.snake.len(), 3);
    }
}
