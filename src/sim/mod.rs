//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected `AimJitter`
//! - No rendering, input or platform dependencies

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use ai::{AimJitter, FixedJitter, NoJitter, PredictionGeometry, SeededJitter, predict_crossing_y};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use geometry::{normalize_angle, paddle_deflection, reflect_off_horizontal_wall};
pub use state::{Ball, GameEvent, GameState, Paddle, RenderState, Score, Side};
pub use tick::{Input, Simulation, move_pads, tick};
