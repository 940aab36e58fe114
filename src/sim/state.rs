//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which side of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by input
    Player,
    /// Right paddle, driven by the predictor
    Ai,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Ai => "ai",
        }
    }
}

/// Something that happened during the last tick (for sound/feedback)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit(Side),
    /// A point was scored by this side
    Scored(Side),
    /// A side reached the win score and the match restarted
    MatchRollover { winner: Side },
}

/// A vertical paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Vertical center
    pub y: f32,
    pub half_height: f32,
    pub width: f32,
    /// Gap between the side wall and the paddle's back
    pub offset: f32,
    /// Units moved per tick
    pub speed: f32,
}

impl Paddle {
    pub fn new(speed: f32) -> Self {
        Self {
            y: ARENA_HEIGHT / 2.0,
            half_height: PADDLE_HALF_HEIGHT,
            width: PADDLE_WIDTH,
            offset: PADDLE_OFFSET,
            speed,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y - self.half_height
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.half_height
    }

    /// Distance from the side wall to the paddle's face
    #[inline]
    pub fn reach(&self) -> f32 {
        self.offset + self.width
    }

    /// Keep the paddle fully inside the arena
    pub fn clamp_to_arena(&mut self) {
        self.y = self
            .y
            .clamp(self.half_height, ARENA_HEIGHT - self.half_height);
    }

    /// Move one speed unit toward a target, stopping on it rather than overshooting
    pub fn step_toward(&mut self, target: f32) {
        let delta = target - self.y;
        self.y += delta.clamp(-self.speed, self.speed);
        self.clamp_to_arena();
    }

    /// Whether a ball spanning [ball_top, ball_bottom] overlaps this paddle (inclusive)
    pub fn overlaps_span(&self, ball_top: f32, ball_bottom: f32) -> bool {
        ball_bottom >= self.top() && ball_top <= self.bottom()
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Heading in radians (counter-clockwise from +x, screen y inverted)
    pub angle: f32,
    /// Scalar speed in units per tick
    pub speed: f32,
    pub diameter: f32,
}

impl Ball {
    /// Ball at the center of the arena, heading toward the player at base speed
    pub fn served() -> Self {
        Self {
            pos: Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            angle: BALL_SERVE_ANGLE,
            speed: BALL_BASE_SPEED,
            diameter: BALL_DIAMETER,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius()
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius()
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius()
    }

    /// Apply the per-hit speed-up, capped at the maximum speed
    pub fn speed_up(&mut self) {
        self.speed = (self.speed * BALL_SPEED_UP).min(BALL_MAX_SPEED);
    }
}

/// Points in the current match, plus matches won this session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
    /// Matches won since startup (not persisted)
    pub player_matches: u32,
    pub ai_matches: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }

    /// Side that has reached the win score, if any
    pub fn winner(&self) -> Option<Side> {
        if self.player >= WIN_SCORE {
            Some(Side::Player)
        } else if self.ai >= WIN_SCORE {
            Some(Side::Ai)
        } else {
            None
        }
    }

    /// Zero both sides if the match is over, crediting the match to the winner
    pub fn roll_over(&mut self) -> Option<Side> {
        let winner = self.winner()?;
        match winner {
            Side::Player => self.player_matches += 1,
            Side::Ai => self.ai_matches += 1,
        }
        self.player = 0;
        self.ai = 0;
        Some(winner)
    }
}

/// Consistent view of the state for presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    pub ball_x: f32,
    pub ball_y: f32,
    pub player_pad_y: f32,
    pub ai_pad_y: f32,
    pub player_score: u32,
    pub ai_score: u32,
}

impl Default for RenderState {
    fn default() -> Self {
        GameState::new().render_state()
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub player: Paddle,
    pub ai: Paddle,
    pub score: Score,
    /// Point the AI paddle steers toward
    pub ai_target_y: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised during the last tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh game: centered paddles, served ball, zero score
    pub fn new() -> Self {
        Self {
            ball: Ball::served(),
            player: Paddle::new(PLAYER_PADDLE_SPEED),
            ai: Paddle::new(AI_PADDLE_SPEED),
            score: Score::new(),
            ai_target_y: ARENA_HEIGHT / 2.0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Serve reset: recenter everything and roll the match over if it is decided
    pub fn serve(&mut self) {
        self.ball = Ball::served();
        self.player.y = ARENA_HEIGHT / 2.0;
        self.ai.y = ARENA_HEIGHT / 2.0;
        self.ai.speed = AI_PADDLE_SPEED;
        self.ai_target_y = ARENA_HEIGHT / 2.0;

        if let Some(winner) = self.score.roll_over() {
            log::info!(
                "Match to {} - {} matches to {}",
                winner.as_str(),
                self.score.player_matches,
                self.score.ai_matches
            );
            self.events.push(GameEvent::MatchRollover { winner });
        }
    }

    /// Score a point: serve first (which may roll the match over), then credit the scorer
    pub fn award_point(&mut self, side: Side) {
        self.serve();
        self.score.increment(side);
        self.events.push(GameEvent::Scored(side));
        log::info!(
            "Point to {}: {} - {}",
            side.as_str(),
            self.score.player,
            self.score.ai
        );
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    /// Snapshot for presentation
    pub fn render_state(&self) -> RenderState {
        RenderState {
            ball_x: self.ball.pos.x,
            ball_y: self.ball.pos.y,
            player_pad_y: self.player.y,
            ai_pad_y: self.ai.y,
            player_score: self.score.player,
            ai_score: self.score.ai,
        }
    }

    /// Check the invariants every tick must leave intact
    pub(crate) fn debug_assert_invariants(&self) {
        debug_assert!(
            self.player.top() >= 0.0 && self.player.bottom() <= ARENA_HEIGHT,
            "player paddle left the arena: y = {}",
            self.player.y
        );
        debug_assert!(
            self.ai.top() >= 0.0 && self.ai.bottom() <= ARENA_HEIGHT,
            "ai paddle left the arena: y = {}",
            self.ai.y
        );
        debug_assert!(
            (BALL_BASE_SPEED..=BALL_MAX_SPEED).contains(&self.ball.speed),
            "ball speed out of range: {}",
            self.ball.speed
        );
        debug_assert!(
            self.ball.left() > 0.0 && self.ball.right() < ARENA_WIDTH,
            "ball left the arena without scoring: x = {}",
            self.ball.pos.x
        );
    }
}
