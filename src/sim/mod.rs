//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit `tick(session, input, dt)` entry point, no scheduling assumptions
//! - Stable brick scan order (column-major layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, Side, ball_rect_overlap, resolve_side, struck_side};
pub use state::{
    Ball, Brick, BrickStatus, GameOutcome, GamePhase, GameSession, Paddle, layout_bricks,
};
pub use tick::{TickInput, tick};
