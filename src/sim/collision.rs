//! Collision detection and response
//!
//! Runs once per ball sub-step. Checks are ordered: horizontal walls, then
//! the scoring walls, then the paddles. All bounds are inclusive, so a ball
//! exactly tangent to a wall or paddle edge counts as touching it.

use super::ai::{AimJitter, retarget};
use super::geometry::{
    heading_down, heading_toward, heading_up, hit_percent, paddle_deflection,
    reflect_off_horizontal_wall,
};
use super::state::{GameEvent, GameState, Side};
use crate::consts::*;

/// What a collision pass did to the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Nothing touched
    Clear,
    /// Ball reflected off a wall and/or paddle and is still in play
    Deflected,
    /// A point was scored and the ball was served again
    Scored(Side),
}

impl CollisionOutcome {
    pub fn is_score(&self) -> bool {
        matches!(self, CollisionOutcome::Scored(_))
    }
}

/// Resolve every collision for the ball's current position
pub fn resolve_collisions(state: &mut GameState, jitter: &mut dyn AimJitter) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::Clear;

    // --- HORIZONTAL WALLS ---
    // Only reflect while still heading into the wall; a ball that overlaps
    // the wall on the following sub-step is already on its way out.
    let ball = &mut state.ball;
    let hits_top = ball.top() <= 0.0 && heading_up(ball.angle);
    let hits_bottom = ball.bottom() >= ARENA_HEIGHT && heading_down(ball.angle);
    if hits_top || hits_bottom {
        ball.angle = reflect_off_horizontal_wall(ball.angle);
        state.events.push(GameEvent::WallBounce);
        outcome = CollisionOutcome::Deflected;
    }

    // --- SCORING WALLS ---
    if state.ball.right() >= ARENA_WIDTH {
        state.award_point(Side::Player);
        return CollisionOutcome::Scored(Side::Player);
    }
    if state.ball.left() <= 0.0 {
        state.award_point(Side::Ai);
        return CollisionOutcome::Scored(Side::Ai);
    }

    // --- PADDLES ---
    if paddle_hit(state, Side::Player) {
        bounce_off_paddle(state, Side::Player);
        // Ball is now heading for the AI: predict where it will arrive
        retarget(state, jitter);
        outcome = CollisionOutcome::Deflected;
    }
    if paddle_hit(state, Side::Ai) {
        bounce_off_paddle(state, Side::Ai);
        // Returned: drift back to the middle until the next prediction
        state.ai_target_y = ARENA_HEIGHT / 2.0;
        outcome = CollisionOutcome::Deflected;
    }

    outcome
}

/// Ball has reached the paddle's face, overlaps it vertically, and is travelling toward it
pub fn paddle_hit(state: &GameState, side: Side) -> bool {
    let ball = &state.ball;
    let paddle = state.paddle(side);

    let crossed_face = match side {
        Side::Player => ball.left() <= paddle.reach(),
        Side::Ai => ball.right() >= ARENA_WIDTH - paddle.reach(),
    };

    crossed_face
        && paddle.overlaps_span(ball.top(), ball.bottom())
        && heading_toward(side, ball.angle)
}

/// Send the ball back with a deflection based on where it struck, and speed it up
fn bounce_off_paddle(state: &mut GameState, side: Side) {
    let paddle = state.paddle(side);
    let percent = hit_percent(state.ball.pos.y, paddle.y, paddle.half_height);

    state.ball.angle = paddle_deflection(side, percent);
    state.ball.speed_up();
    state.events.push(GameEvent::PaddleHit(side));

    log::debug!(
        "{} paddle hit at {:+.2}, angle {:.3} rad, speed {:.2}",
        side.as_str(),
        percent,
        state.ball.angle,
        state.ball.speed
    );
}
