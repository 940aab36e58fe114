//! Paddle Pong - a single-player Pong against a predictive AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, game state)
//! - `scheduler`: Real-time fixed-timestep driver and the shared input/snapshot cells
//! - `settings`: Runner configuration loaded from JSON

pub mod scheduler;
pub mod settings;
pub mod sim;

pub use scheduler::{FixedTimestep, SharedInput, SnapshotCell};
pub use settings::{RunnerSettings, SettingsError};
pub use sim::{GameState, Input, RenderState, Simulation};

/// Game configuration constants
///
/// All distances are logical arena units; speeds are units per tick.
pub mod consts {
    use std::f32::consts::{FRAC_PI_4, PI};

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 210.0;
    pub const ARENA_HEIGHT: f32 = 160.0;

    /// Paddle geometry (height 32)
    pub const PADDLE_HALF_HEIGHT: f32 = 16.0;
    pub const PADDLE_WIDTH: f32 = 2.0;
    /// Gap between the side wall and the back of a paddle
    pub const PADDLE_OFFSET: f32 = 2.0;

    /// Paddle speeds
    pub const PLAYER_PADDLE_SPEED: f32 = 2.0;
    pub const AI_PADDLE_SPEED: f32 = 1.0;

    /// Ball defaults
    pub const BALL_DIAMETER: f32 = 2.0;
    pub const BALL_BASE_SPEED: f32 = 2.0;
    pub const BALL_MAX_SPEED: f32 = 8.0;
    /// Speed multiplier applied on every paddle hit
    pub const BALL_SPEED_UP: f32 = 1.03;
    /// Serve heads toward the player
    pub const BALL_SERVE_ANGLE: f32 = PI;

    /// Maximum paddle deflection from the horizontal (45 degrees)
    pub const MAX_DEFLECTION: f32 = FRAC_PI_4;

    /// Points needed to close a match
    pub const WIN_SCORE: u32 = 11;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: f64 = 60.0;
    /// Default cap on catch-up ticks per loop iteration
    pub const MAX_CATCH_UP_TICKS: u32 = 8;
}
