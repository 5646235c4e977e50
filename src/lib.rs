//! Grid Breakout - a brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `renderer`: Render adapter boundary + Canvas 2D implementation
//! - `leaderboard`: Remote leaderboard data model and HTTP client

pub mod leaderboard;
pub mod renderer;
pub mod sim;

pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use renderer::{Frame, RenderAdapter};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (matches the embedded canvas)
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 320.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 75.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between the paddle and the bottom of the field
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    /// Paddle speed in pixels/second (7 px per 60 Hz frame)
    pub const PADDLE_SPEED: f32 = 420.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Serve velocity in pixels/second (2 px per 60 Hz frame, up and right)
    pub const SERVE_VEL_X: f32 = 120.0;
    pub const SERVE_VEL_Y: f32 = -120.0;
    /// Serve height above the paddle lane
    pub const SERVE_LIFT: f32 = 50.0;

    /// Brick grid layout
    pub const BRICK_ROWS: usize = 3;
    pub const BRICK_COLS: usize = 4;
    pub const BRICK_WIDTH: f32 = 100.0;
    pub const BRICK_HEIGHT: f32 = 40.0;
    pub const BRICK_PADDING: f32 = 15.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 15.0;
    /// Total bricks in a session
    pub const TOTAL_BRICKS: u32 = (BRICK_ROWS * BRICK_COLS) as u32;

    /// Paddle rebound: horizontal speed per pixel of offset from paddle
    /// center, in 1/second (0.15 per 60 Hz frame)
    pub const REBOUND_ANGLE_FACTOR: f32 = 9.0;
    /// Speed-up multipliers applied on every successful paddle return
    pub const REBOUND_SPEEDUP_X: f32 = 1.1;
    pub const REBOUND_SPEEDUP_Y: f32 = 1.3;

    /// Lives at session start
    pub const START_LIVES: u32 = 2;

    /// Top edge of the paddle lane; the ball rebounds or costs a life here
    pub const fn paddle_lane_y() -> f32 {
        FIELD_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN
    }
}
