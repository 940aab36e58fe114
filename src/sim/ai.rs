//! AI opponent: predicts where the ball will cross its paddle plane
//!
//! Bounces off the top and bottom walls are folded in closed form instead of
//! being simulated: the ball travels as if the arena were tiled vertically,
//! and every other tile is a mirror image.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::GameState;
use crate::consts::*;

/// Source of the AI's aiming error
pub trait AimJitter {
    /// Offset in [-half_height, half_height] added to a predicted target
    fn offset(&mut self, half_height: f32) -> f32;
}

/// Uniform jitter from a seeded PCG stream (deterministic per seed)
#[derive(Debug, Clone)]
pub struct SeededJitter {
    rng: Pcg32,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl AimJitter for SeededJitter {
    fn offset(&mut self, half_height: f32) -> f32 {
        if half_height <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(-half_height..=half_height)
    }
}

/// Perfect aim
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl AimJitter for NoJitter {
    fn offset(&mut self, _half_height: f32) -> f32 {
        0.0
    }
}

/// Always the same offset (clamped to the paddle)
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f32);

impl AimJitter for FixedJitter {
    fn offset(&mut self, half_height: f32) -> f32 {
        self.0.clamp(-half_height, half_height)
    }
}

/// Horizontal and vertical extents the prediction folds over
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionGeometry {
    pub arena_width: f32,
    pub arena_height: f32,
    pub paddle_offset: f32,
    pub paddle_width: f32,
}

impl Default for PredictionGeometry {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            paddle_offset: PADDLE_OFFSET,
            paddle_width: PADDLE_WIDTH,
        }
    }
}

impl PredictionGeometry {
    /// Horizontal span between the two paddle faces
    pub fn travel_width(&self) -> f32 {
        self.arena_width - 2.0 * (self.paddle_offset + self.paddle_width)
    }
}

/// Predict the y coordinate where a ball leaving the player's paddle at
/// `ball_y` with heading `angle` reaches the AI's paddle plane.
pub fn predict_crossing_y(geometry: &PredictionGeometry, ball_y: f32, angle: f32) -> f32 {
    let height = geometry.arena_height;
    // Screen y grows downward, so an upward heading has a negative displacement
    let travelled_y = -geometry.travel_width() * angle.tan();
    let unfolded = travelled_y + ball_y;
    let bounces = (unfolded / height).floor();

    if bounces.rem_euclid(2.0) == 0.0 {
        unfolded - bounces * height
    } else {
        height + bounces * height - unfolded
    }
}

/// Recompute the AI's steering target for a ball that just left the player's paddle
pub fn retarget(state: &mut GameState, jitter: &mut dyn AimJitter) {
    let predicted = predict_crossing_y(
        &PredictionGeometry::default(),
        state.ball.pos.y,
        state.ball.angle,
    );
    let offset = jitter.offset(state.ai.half_height);
    state.ai_target_y = predicted + offset;
    log::debug!(
        "AI predicts crossing at y = {:.1}, aiming at {:.1}",
        predicted,
        state.ai_target_y
    );
}
