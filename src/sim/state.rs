//! Game state and core simulation types
//!
//! A session owns every mutable entity. Nothing here touches the display
//! or the network; `tick` mutates a session, the render adapter reads it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball attached to paddle, waiting for launch input
    Idle,
    /// Ball moving under its own velocity
    Launched,
    /// Simulation frozen
    Paused,
    /// Session ended; terminal until an explicit restart
    Over,
}

/// How an ended session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every brick destroyed
    Won,
    /// Lives ran out
    Lost,
}

/// The ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Constant for the whole session
    pub radius: f32,
}

impl Ball {
    /// Ball at the canonical serve position with serve velocity
    pub fn serve() -> Self {
        Self {
            pos: Vec2::new(
                FIELD_WIDTH / 2.0,
                paddle_lane_y() - SERVE_LIFT,
            ),
            vel: Vec2::new(SERVE_VEL_X, SERVE_VEL_Y),
            radius: BALL_RADIUS,
        }
    }

    /// Snap the ball to rest on the paddle center (Idle phase)
    pub fn attach_to(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle_lane_y() - self.radius);
    }
}

/// The player's paddle; y is fixed to the paddle lane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge x, always within `[0, FIELD_WIDTH - PADDLE_WIDTH]`
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    /// Horizontal center of the paddle
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + PADDLE_WIDTH / 2.0
    }

    /// The paddle's rectangle in field coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, paddle_lane_y(), PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    /// Shift the paddle horizontally, clamped to the field bounds
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, FIELD_WIDTH - PADDLE_WIDTH);
    }

    /// True if the given x lies within the paddle span
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x > self.x && x < self.x + PADDLE_WIDTH
    }
}

/// Destructible target status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Active,
    Destroyed,
}

/// A destructible rectangular target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Position assigned once at layout time from the grid indices
    pub rect: Rect,
    pub status: BrickStatus,
    /// Display label painted on the brick face
    pub label: String,
    /// Display color (CSS hex)
    pub color: String,
}

impl Brick {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == BrickStatus::Active
    }
}

/// Labels painted on the bricks, assigned in column-major layout order
const BRICK_LABELS: [&str; 12] = [
    "Deep Learning",
    "Machine Learning",
    "Embedded Systems",
    "Reinforcem. Learning",
    "Signals & Systems",
    "Software Design",
    "Logic Design",
    "Circuits",
    "Controls",
    "Probability, Stats & DS",
    "Computer Arch.",
    "CAD",
];

/// Brick face colors, same order as the labels
const BRICK_COLORS: [&str; 12] = [
    "#8A2BE2", "#9400D3", "#9932CC", "#BA55D3", "#800080", "#8B008B",
    "#4B0082", "#7B68EE", "#6A5ACD", "#9370DB", "#5D3FD3", "#663399",
];

/// Build the brick grid, column-major then row, positions derived from
/// the grid indices, padding, and offsets
pub fn layout_bricks() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_COLS * BRICK_ROWS);
    for col in 0..BRICK_COLS {
        for row in 0..BRICK_ROWS {
            let idx = col * BRICK_ROWS + row;
            let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT;
            let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
            bricks.push(Brick {
                rect: Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
                status: BrickStatus::Active,
                label: BRICK_LABELS[idx % BRICK_LABELS.len()].to_string(),
                color: BRICK_COLORS[idx % BRICK_COLORS.len()].to_string(),
            });
        }
    }
    bricks
}

/// Complete state of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Monotonically non-decreasing within a session
    pub score: u32,
    /// Monotonically non-increasing within a session
    pub lives: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Set exactly once, when the session reaches `Over`
    pub outcome: Option<GameOutcome>,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Bricks in column-major layout order (also the collision scan order)
    pub bricks: Vec<Brick>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// A fresh session: centered paddle, ball attached, all bricks active,
    /// score 0, full lives, Idle
    pub fn new() -> Self {
        let paddle = Paddle::default();
        let mut ball = Ball::serve();
        ball.attach_to(&paddle);
        Self {
            score: 0,
            lives: START_LIVES,
            phase: GamePhase::Idle,
            outcome: None,
            ball,
            paddle,
            bricks: layout_bricks(),
        }
    }

    /// Full reset; indistinguishable from a first-time start
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Put the ball back on the paddle for a re-serve after a lost life,
    /// keeping score, lives, and brick statuses
    pub fn reserve_ball(&mut self) {
        self.ball = Ball::serve();
        self.ball.attach_to(&self.paddle);
        self.phase = GamePhase::Idle;
    }

    /// Total bricks laid out for this session
    pub fn total_bricks(&self) -> u32 {
        self.bricks.len() as u32
    }

    /// Count of bricks still standing
    pub fn bricks_remaining(&self) -> u32 {
        self.bricks.iter().filter(|b| b.is_active()).count() as u32
    }

    /// True once the session has ended
    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }
}
