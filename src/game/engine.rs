use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::Rng;

/// What happened during one frame or tick.
///
/// The engine never touches audio or the screen; the mode layer reacts to
/// these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameEvents {
    /// The head landed on the flower this frame
    pub ate_flower: bool,
    /// The snake died this frame. Reported at most once per episode, so a
    /// head parked on the wall for many frames yields exactly one event.
    pub died: Option<CollisionType>,
}

/// The game engine: owns the config, the RNG and the session high score,
/// and mutates a `GameState` passed in by the caller
pub struct GameEngine {
    config: GameConfig,
    hi_score: u32,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            hi_score: config.starting_hi_score,
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to its starting conditions. The high score carries
    /// over; everything else matches a fresh start.
    pub fn reset(&mut self) -> GameState {
        let cell = self.config.cell_size;

        let head = Position::new(
            self.config.start_column * cell,
            self.config.start_row * cell,
        );
        let snake = Snake::new(head, Direction::Left, self.config.initial_snake_length, cell);

        let (fx, fy) = self.config.flower_start_cell;
        let flower = Position::new(fx * cell, fy * cell);

        let mut state = GameState::new(
            snake,
            flower,
            self.config.width_px(),
            self.config.height_px(),
            cell,
        );
        state.hi_score = self.hi_score;
        state
    }

    /// Per-frame checks against the current head position: the wall first,
    /// then the flower. Runs every frame, tick boundary or not.
    pub fn frame(&mut self, state: &mut GameState) -> FrameEvents {
        let mut events = FrameEvents::default();
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            events.died = mark_dead(state, CollisionType::Wall);
        }

        if state.is_alive && head == state.flower {
            events.ate_flower = true;
            state.snake.grow();
            state.score += 1;
            if state.score > state.hi_score {
                state.hi_score = state.score;
                self.hi_score = state.score;
            }
            state.flower = self.spawn_flower(state);
        }

        events
    }

    /// Movement tick, run once every `frames_per_tick` frames: apply the
    /// buffered direction, then advance the head one cell.
    ///
    /// The move commits without a bounds check; a head that steps onto the
    /// edge is killed by the next frame's wall check, so the crash is drawn
    /// where it happened.
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> FrameEvents {
        let mut events = FrameEvents::default();

        // Direction input is accepted even while dead; it only matters
        // again after a restart. Reversing straight into the body is
        // rejected rather than being an instant death.
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        if !state.is_alive {
            return events;
        }

        let candidate = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction, state.cell_size);

        // Candidate head against every currently occupied segment,
        // before the move commits.
        if state.snake.body.contains(&candidate) {
            events.died = mark_dead(state, CollisionType::SelfCollision);
        } else {
            state.snake.advance(candidate);
        }

        events
    }

    /// Pick a new flower cell: uniform inside the one-cell border, snapped
    /// to the grid. Snake-occupied cells are not excluded; the overlap is
    /// rare and resolves itself on the next eat.
    fn spawn_flower(&mut self, state: &GameState) -> Position {
        let cell = state.cell_size;
        let x = self.random_grid_coord(cell, state.width_px - cell);
        let y = self.random_grid_coord(cell, state.height_px - cell);
        Position::new(x, y)
    }

    /// Uniform pixel coordinate in `[lower, upper]`, rounded to the nearest
    /// multiple of the cell size
    fn random_grid_coord(&mut self, lower: i32, upper: i32) -> i32 {
        let cell = self.config.cell_size;
        let raw = self.rng.gen_range(lower..=upper);
        ((raw + cell / 2) / cell) * cell
    }
}

/// Flip the state to dead, reporting the collision only the first time
fn mark_dead(state: &mut GameState, collision: CollisionType) -> Option<CollisionType> {
    state.is_alive = false;
    if state.death_reported {
        None
    } else {
        state.death_reported = true;
        Some(collision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_starting_conditions() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_alive);
        assert!(!state.death_reported);
        assert_eq!(state.score, 0);
        assert_eq!(state.hi_score, 150);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.direction, Direction::Left);
        assert_eq!(state.flower, Position::new(64, 192));

        // Four contiguous cells on the starting row, head first
        assert_eq!(state.snake.head(), Position::new(400, 192));
        for (i, segment) in state.snake.body.iter().enumerate() {
            assert_eq!(*segment, Position::new(400 + 16 * i as i32, 192));
        }
    }

    #[test]
    fn test_tick_moves_one_cell_in_the_chosen_direction() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        let old_head = state.snake.head();

        let events = engine.tick(&mut state, Action::Continue);

        assert_eq!(events, FrameEvents::default());
        assert_eq!(state.snake.head(), old_head.moved_by(-16, 0));
        assert_eq!(state.snake.body[1], old_head);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_eating_the_flower() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        // Park the flower under the head
        state.flower = state.snake.head();
        let old_length = state.snake.len();

        let events = engine.frame(&mut state);

        assert!(events.ate_flower);
        assert!(events.died.is_none());
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), old_length + 1);

        // The replacement flower is grid-aligned and strictly inside
        assert!(state.flower.is_grid_aligned(16));
        assert!(state.is_in_bounds(state.flower));
    }

    #[test]
    fn test_flower_respawns_inside_the_border() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        for _ in 0..200 {
            state.flower = state.snake.head();
            engine.frame(&mut state);
            assert!(state.flower.is_grid_aligned(16));
            assert!(state.flower.x > 0 && state.flower.x < 640);
            assert!(state.flower.y > 0 && state.flower.y < 400);
        }
    }

    #[test]
    fn test_hi_score_updates_and_survives_restart() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        assert_eq!(state.hi_score, 0);

        state.flower = state.snake.head();
        engine.frame(&mut state);
        assert_eq!(state.hi_score, 1);

        let fresh = engine.reset();
        assert_eq!(fresh.hi_score, 1);
        assert_eq!(fresh.score, 0);
    }

    #[test]
    fn test_wall_collision_reports_death_exactly_once() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        state.snake = Snake::new(Position::new(16, 112), Direction::Left, 4, 16);

        // The move itself commits onto the edge without complaint
        let events = engine.tick(&mut state, Action::Continue);
        assert!(events.died.is_none());
        assert_eq!(state.snake.head(), Position::new(0, 112));

        // The following frame notices
        let events = engine.frame(&mut state);
        assert_eq!(events.died, Some(CollisionType::Wall));
        assert!(!state.is_alive);

        // Further frames on the wall stay quiet
        for _ in 0..10 {
            let events = engine.frame(&mut state);
            assert!(events.died.is_none());
            assert!(!events.ate_flower);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();

        // Length 4 at (80, 80) heading right, then a tight clockwise box:
        // right, down, left, up lands the head back on its own body.
        state.snake = Snake::new(Position::new(80, 80), Direction::Right, 4, 16);
        engine.tick(&mut state, Action::Continue);
        engine.tick(&mut state, Direction::Down.into());
        engine.tick(&mut state, Direction::Left.into());
        let events = engine.tick(&mut state, Direction::Up.into());

        assert_eq!(events.died, Some(CollisionType::SelfCollision));
        assert!(!state.is_alive);
        // The fatal move never commits
        assert_eq!(state.snake.head(), Position::new(80, 96));
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        assert_eq!(state.snake.direction, Direction::Left);

        engine.tick(&mut state, Direction::Right.into());
        assert_eq!(state.snake.direction, Direction::Left);

        engine.tick(&mut state, Direction::Up.into());
        assert_eq!(state.snake.direction, Direction::Up);
    }

    #[test]
    fn test_dead_snake_does_not_move_or_eat() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        state.is_alive = false;
        state.death_reported = true;

        let frozen = state.snake.clone();
        engine.tick(&mut state, Action::Continue);
        assert_eq!(state.snake.body, frozen.body);

        state.flower = state.snake.head();
        let events = engine.frame(&mut state);
        assert!(!events.ate_flower);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_matches_a_fresh_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let mut state = engine.reset();
        let fresh = state.clone();

        // Play a little, then die on the wall
        state.flower = state.snake.head();
        engine.frame(&mut state);
        state.snake = Snake::new(Position::new(0, 112), Direction::Left, 4, 16);
        engine.frame(&mut state);
        assert!(!state.is_alive);

        let mut restarted = engine.reset();
        // Identical apart from the high score, which persists in-process
        restarted.hi_score = fresh.hi_score;
        assert_eq!(restarted, fresh);
    }
}
