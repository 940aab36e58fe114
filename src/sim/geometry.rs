//! Angle geometry for the rectangular arena
//!
//! Angles are measured counter-clockwise from +x in radians. The arena uses
//! screen coordinates (y grows downward), so the heading of an angle is
//! `(cos, -sin)`.

use std::f32::consts::TAU;

use glam::Vec2;

use super::state::Side;
use crate::consts::MAX_DEFLECTION;

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    while angle >= TAU {
        angle -= TAU;
    }
    while angle < 0.0 {
        angle += TAU;
    }
    // -tiny + TAU can round up to exactly TAU in f32
    if angle >= TAU { 0.0 } else { angle }
}

/// Reflect a heading off the top or bottom wall
#[inline]
pub fn reflect_off_horizontal_wall(angle: f32) -> f32 {
    normalize_angle(TAU - angle)
}

/// Screen-space unit heading for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Where on the paddle the ball struck, in [-1, 1] (negative = above center)
pub fn hit_percent(ball_y: f32, paddle_y: f32, half_height: f32) -> f32 {
    ((ball_y - paddle_y) / half_height).clamp(-1.0, 1.0)
}

/// Outgoing angle after a paddle hit
///
/// The player's paddle sends the ball into [-π/4, π/4]; the AI's paddle
/// sends it into [3π/4, 5π/4]. Striking below center (positive percent)
/// turns the ball downward on both sides.
pub fn paddle_deflection(side: Side, percent: f32) -> f32 {
    let percent = percent.clamp(-1.0, 1.0);
    match side {
        Side::Player => -percent * MAX_DEFLECTION,
        Side::Ai => std::f32::consts::PI + percent * MAX_DEFLECTION,
    }
}

/// Heading is moving up the screen (toward y = 0)
#[inline]
pub fn heading_up(angle: f32) -> bool {
    angle.sin() > 0.0
}

/// Heading is moving down the screen (toward y = height)
#[inline]
pub fn heading_down(angle: f32) -> bool {
    angle.sin() < 0.0
}

/// Heading is moving toward the given side's wall
#[inline]
pub fn heading_toward(side: Side, angle: f32) -> bool {
    match side {
        Side::Player => angle.cos() < 0.0,
        Side::Ai => angle.cos() > 0.0,
    }
}
