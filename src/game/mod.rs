//! Snake simulation
//!
//! A discrete grid state machine with continuous presentation: each segment
//! interpolates between two cells, the head turns only when it lands on a
//! cell, and eaten food travels down the body before the snake grows.

mod food;
mod queue;
mod snake;

pub use food::{Food, FoodSet};
pub use queue::{DirectionQueue, DIRECTION_QUEUE_CAPACITY};
pub use snake::SnakePart;

use crate::config::{GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::grid::{Direction, Grid, GridPos};
use crate::input::{InputLatch, Key};
use crate::math::Vec2;
use crate::util::Rng;

pub const INITIAL_LENGTH: usize = 2;
pub const DEFAULT_HEADING: Direction = Direction::Right;

/// Largest grid that still gives every cell at least one pixel
const MAX_HALF_EXTENT: i32 = (WINDOW_WIDTH as i32 - 1) / 2;

/// Checked in this order; the first key pressed this frame wins
const DIRECTION_KEYS: [(Key, Direction); 4] = [
    (Key::Up, Direction::Up),
    (Key::Down, Direction::Down),
    (Key::Left, Direction::Left),
    (Key::Right, Direction::Right),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameState {
    /// Nothing built yet; the next step resets
    Uninitialized,
    Playing,
    /// Frozen until the countdown runs out
    GameOver { countdown: f32 },
}

pub struct Game {
    config: GameConfig,
    grid: Grid,
    state: GameState,
    /// Seconds since the last reset
    elapsed: f32,
    spawn_timer: f32,
    heading: Direction,
    queue: DirectionQueue,
    foods: FoodSet,
    parts: Vec<SnakePart>,
    rng: Rng,
    score: u32,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let center = Vec2::new(WINDOW_WIDTH as f32 / 2.0, WINDOW_HEIGHT as f32 / 2.0);
        let half_extent = config.half_extent.clamp(1, MAX_HALF_EXTENT);
        let grid = Grid::new(center, config.cell_size, half_extent);
        let rng = config.seed.map_or_else(Rng::from_time, Rng::new);
        // A snake can never be longer than the grid has cells
        let max_parts = (grid.cells_per_side() * grid.cells_per_side()) as usize;
        Self {
            foods: FoodSet::with_capacity(config.food_capacity),
            parts: Vec::with_capacity(max_parts),
            queue: DirectionQueue::new(),
            state: GameState::Uninitialized,
            elapsed: 0.0,
            spawn_timer: 0.0,
            heading: DEFAULT_HEADING,
            score: 0,
            config,
            grid,
            rng,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, GameState::GameOver { .. })
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn queue(&self) -> &DirectionQueue {
        &self.queue
    }

    pub fn foods(&self) -> &FoodSet {
        &self.foods
    }

    /// Head first
    pub fn parts(&self) -> &[SnakePart] {
        &self.parts
    }

    pub fn head(&self) -> Option<&SnakePart> {
        self.parts.first()
    }

    /// Food eaten since the last reset
    pub fn score(&self) -> u32 {
        self.score
    }

    // ========================================================================
    // State transitions
    // ========================================================================

    /// Rebuild everything and start playing
    pub fn restart(&mut self) {
        self.foods.reset();
        self.queue.clear();
        self.parts.clear();
        self.heading = DEFAULT_HEADING;

        let step = self.heading.delta();
        let head = GridPos::ORIGIN;
        let behind = GridPos::new(-step.x, -step.y);
        self.parts.push(SnakePart::new(head, head + step));
        self.parts.push(SnakePart::new(behind, head));
        debug_assert_eq!(self.parts.len(), INITIAL_LENGTH);

        self.elapsed = 0.0;
        self.spawn_timer = 0.0;
        self.score = 0;
        self.state = GameState::Playing;
        tracing::debug!("game reset");
    }

    /// Reset if nothing has been built yet
    pub fn ensure_started(&mut self) {
        if self.state == GameState::Uninitialized {
            self.restart();
        }
    }

    pub(crate) fn game_over(&mut self) {
        self.state = GameState::GameOver {
            countdown: self.config.restart_delay,
        };
        tracing::info!(score = self.score, length = self.parts.len(), "game over");
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Queue at most one direction from this frame's key presses
    pub fn handle_input(&mut self, input: &InputLatch) {
        if self.state != GameState::Playing {
            return;
        }
        let pressed = DIRECTION_KEYS
            .iter()
            .find(|(key, _)| input.is_just_pressed(*key))
            .map(|&(_, dir)| dir);
        if let Some(dir) = pressed {
            self.queue_direction(dir);
        }
    }

    pub fn queue_direction(&mut self, dir: Direction) -> bool {
        self.queue.push(dir)
    }

    /// Place food at a specific cell
    pub fn spawn_food_at(&mut self, pos: GridPos) -> Option<usize> {
        let slot = self.foods.spawn(pos, self.config.food_lifespan);
        match slot {
            Some(slot) => tracing::trace!(slot, x = pos.x, y = pos.y, "food spawned"),
            None => tracing::trace!("no free food slot"),
        }
        slot
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.ensure_started();
        self.elapsed += dt;

        if let GameState::GameOver { countdown } = self.state {
            let countdown = countdown - dt;
            self.state = if countdown <= 0.0 {
                tracing::debug!("restart countdown elapsed");
                GameState::Uninitialized
            } else {
                GameState::GameOver { countdown }
            };
            return;
        }

        self.update_food(dt);

        // A segment retargets at most once per pass, so long steps move in
        // whole-cell chunks with a collision check before each one
        let mut remaining = match self.move_rate() * dt {
            advance if advance.is_finite() => advance.max(0.0),
            _ => 0.0,
        };
        loop {
            if self.check_collisions() {
                self.game_over();
                return;
            }
            let advance = remaining.min(1.0);
            self.advance_parts(advance);
            remaining -= advance;
            if remaining <= 0.0 {
                break;
            }
        }
        self.update_bellies();
    }

    fn update_food(&mut self, dt: f32) {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.config.food_spawn_interval {
            self.spawn_timer -= self.config.food_spawn_interval;
            let pos = self.grid.random_cell(&mut self.rng);
            self.spawn_food_at(pos);
        }
        let expired = self.foods.tick(dt);
        if expired > 0 {
            tracing::trace!(expired, "food expired");
        }
    }

    /// Marks food under the head as eaten. Returns true on self-collision.
    fn check_collisions(&mut self) -> bool {
        let Some(target) = self.parts.first().map(|head| head.to) else {
            return false;
        };

        if let Some(slot) = self.foods.eat_at(target) {
            self.score += 1;
            tracing::debug!(slot, score = self.score, "food eaten");
        }

        self.parts[1..].iter().any(|part| part.from == target)
    }

    /// Cells per second for this step. Faster while a turn is queued.
    fn move_rate(&self) -> f32 {
        match self.queue.peek() {
            Some(dir) if dir.is_turn_from(self.heading) => {
                self.config.move_rate * self.config.turn_boost
            },
            _ => self.config.move_rate,
        }
    }

    /// Move every segment `advance` cells along its interval, `advance <= 1`
    fn advance_parts(&mut self, advance: f32) {
        let last = self.parts.len().saturating_sub(1);
        let mut grow_at: Option<(usize, GridPos)> = None;

        for i in 0..self.parts.len() {
            self.parts[i].progress += advance;
            if self.parts[i].progress < 1.0 {
                continue;
            }

            // Food has reached the tail: the snake grows where it sits
            if i == last {
                let cell = self.parts[i].to;
                if let Some(slot) = self.foods.eaten_at(cell) {
                    grow_at = Some((slot, cell));
                }
            }

            let next = if i == 0 {
                self.next_head_target()
            } else {
                self.parts[i - 1].from
            };
            let part = &mut self.parts[i];
            part.progress -= 1.0;
            part.from = part.to;
            part.to = next;
        }

        if let Some((slot, cell)) = grow_at {
            self.grow(slot, cell);
        }
    }

    /// Take the next queued turn (reversals keep the current heading) and
    /// return the head's next cell.
    fn next_head_target(&mut self) -> GridPos {
        if let Some(dir) = self.queue.pop() {
            if dir == self.heading.opposite() {
                tracing::trace!(?dir, heading = ?self.heading, "reversal ignored");
            } else {
                self.heading = dir;
            }
        }
        let from = self.parts[0].to;
        self.grid.wrap(from + self.heading.delta())
    }

    fn grow(&mut self, slot: usize, cell: GridPos) {
        let progress = self.parts.last().map_or(0.0, |tail| tail.progress);
        let mut part = SnakePart::new(cell, cell);
        part.progress = progress;
        self.parts.push(part);
        self.foods.consume(slot);
        tracing::debug!(length = self.parts.len(), "snake grew");
    }

    fn update_bellies(&mut self) {
        for part in &mut self.parts {
            part.belly = self
                .foods
                .eaten_cells()
                .map(|cell| part.fullness_for(cell))
                .fold(0.0, f32::max);
        }
    }

    /// Seconds left before restart, while game over
    pub fn restart_countdown(&self) -> Option<f32> {
        match self.state {
            GameState::GameOver { countdown } => Some(countdown),
            _ => None,
        }
    }
}
