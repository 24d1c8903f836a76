//! Frame driver
//!
//! The single per-frame entry point for the platform layer: latch input into
//! the game, run the simulation in fixed steps, paint the frame.

use crate::config::GameConfig;
use crate::game::Game;
use crate::input::{InputLatch, Key};
use crate::raster::Pixmap;
use crate::render;

/// Smallest simulation step taken from a config
const MIN_FIXED_STEP: f32 = 1.0 / 1000.0;

pub struct FrameDriver {
    game: Game,
    fixed_step: f32,
    max_frame_delta: f32,
    /// Unsimulated time carried to the next frame
    accumulator: f32,
    paused: bool,
}

impl FrameDriver {
    pub fn new(config: GameConfig) -> Self {
        Self {
            fixed_step: config.fixed_step.max(MIN_FIXED_STEP),
            max_frame_delta: config.max_frame_delta.max(0.0),
            accumulator: 0.0,
            paused: false,
            game: Game::new(config),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run one frame. `dt` is the measured frame time in seconds.
    pub fn tick(&mut self, pixmap: &mut Pixmap, input: &InputLatch, dt: f32) {
        if input.is_just_pressed(Key::Pause) {
            self.paused = !self.paused;
            tracing::info!(paused = self.paused, "pause toggled");
        }

        if !self.paused {
            self.game.ensure_started();
            self.game.handle_input(input);

            // Long stalls (window drags, breakpoints) are not replayed
            let dt = if dt.is_finite() {
                dt.clamp(0.0, self.max_frame_delta)
            } else {
                0.0
            };
            self.accumulator += dt;
            while self.accumulator >= self.fixed_step {
                self.game.step(self.fixed_step);
                self.accumulator -= self.fixed_step;
            }
        }

        render::draw_frame(pixmap, &self.game);
    }
}
