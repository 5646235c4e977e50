//! Render adapter boundary
//!
//! The simulation never draws. Each frame the driver hands a read-only
//! [`Frame`] snapshot to whatever [`RenderAdapter`] is wired in; the
//! Canvas 2D implementation lives in [`canvas`] (wasm32 only).

use serde::Serialize;

use crate::sim::{Ball, Brick, GameOutcome, GamePhase, GameSession, Paddle};

#[cfg(target_arch = "wasm32")]
pub mod canvas;

/// Read-only snapshot of one session, taken once per rendered frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub ball: &'a Ball,
    pub paddle: &'a Paddle,
    pub bricks: &'a [Brick],
    pub score: u32,
    pub lives: u32,
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
}

impl<'a> Frame<'a> {
    /// Snapshot the current state of a session
    pub fn of(session: &'a GameSession) -> Self {
        Self {
            ball: &session.ball,
            paddle: &session.paddle,
            bricks: &session.bricks,
            score: session.score,
            lives: session.lives,
            phase: session.phase,
            outcome: session.outcome,
        }
    }
}

/// Paints a frame; must not mutate the snapshot
pub trait RenderAdapter {
    fn draw(&mut self, frame: &Frame<'_>);
}
