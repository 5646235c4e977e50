//! Canvas 2D render adapter (wasm32)
//!
//! Draws the play field onto a `<canvas>` 2D context: bricks with their
//! wrapped labels, the paddle, the ball, the score/lives HUD, and a pause
//! glyph while the session is paused.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Frame, RenderAdapter};
use crate::consts::*;
use crate::sim::GamePhase;

const FIELD_COLOR: &str = "#333";
const BALL_COLOR: &str = "#e6e6fa";
const PADDLE_COLOR: &str = "#9370DB";
const TEXT_COLOR: &str = "#fff";

/// Render adapter backed by a Canvas 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Attach to a canvas element, failing with a message if the element
    /// has no 2D context
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "canvas.getContext(\"2d\") threw".to_string())?
            .ok_or_else(|| "canvas has no 2d context".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "context is not CanvasRenderingContext2d".to_string())?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        Ok(Self { ctx })
    }

    fn rounded_rect(&self, x: f64, y: f64, w: f64, h: f64, r: f64, fill: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.line_to(x + w - r, y);
        ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        ctx.line_to(x + w, y + h - r);
        ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        ctx.line_to(x + r, y + h);
        ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        ctx.line_to(x, y + r);
        ctx.quadratic_curve_to(x, y, x + r, y);
        ctx.set_fill_style_str(fill);
        ctx.fill();
        ctx.close_path();
    }

    /// Word-wrap a label into the brick face
    fn wrapped_text(&self, text: &str, x: f64, mut y: f64, max_width: f64, line_height: f64) {
        let ctx = &self.ctx;
        let mut current = String::new();
        for word in text.split(' ') {
            let candidate = format!("{current}{word} ");
            let width = ctx
                .measure_text(&candidate)
                .map(|m| m.width())
                .unwrap_or(0.0);
            if width > max_width && !current.is_empty() {
                let _ = ctx.fill_text(&current, x, y);
                current = format!("{word} ");
                y += line_height;
            } else {
                current = candidate;
            }
        }
        let _ = ctx.fill_text(&current, x, y);
    }

    fn draw_bricks(&self, frame: &Frame<'_>) {
        self.ctx.set_font("14px Arial");
        self.ctx.set_text_baseline("top");
        for brick in frame.bricks.iter().filter(|b| b.is_active()) {
            let r = brick.rect;
            self.rounded_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64, 5.0, &brick.color);
            self.ctx.set_fill_style_str(TEXT_COLOR);
            self.wrapped_text(
                &brick.label,
                (r.x + 8.0) as f64,
                (r.y + 8.0) as f64,
                (r.w - 16.0) as f64,
                16.0,
            );
        }
    }

    fn draw_ball(&self, frame: &Frame<'_>) {
        let ball = frame.ball;
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            ball.pos.x as f64,
            ball.pos.y as f64,
            ball.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(BALL_COLOR);
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn draw_paddle(&self, frame: &Frame<'_>) {
        let r = frame.paddle.rect();
        self.rounded_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64, 5.0, PADDLE_COLOR);
    }

    fn draw_hud(&self, frame: &Frame<'_>) {
        let ctx = &self.ctx;
        ctx.set_font("16px Arial");
        ctx.set_fill_style_str(TEXT_COLOR);
        let _ = ctx.fill_text(&format!("Score: {}", frame.score), 8.0, 24.0);
        let _ = ctx.fill_text(
            &format!("Lives: {}", frame.lives),
            (FIELD_WIDTH - 85.0) as f64,
            24.0,
        );
    }

    fn draw_pause_glyph(&self) {
        let bar_w = 10.0;
        let bar_h = 40.0;
        let gap = 10.0;
        let cx = (FIELD_WIDTH / 2.0) as f64;
        let cy = (FIELD_HEIGHT / 2.0) as f64;
        self.rounded_rect(cx - bar_w - gap / 2.0, cy - bar_h / 2.0, bar_w, bar_h, 3.0, "#ffffff");
        self.rounded_rect(cx + gap / 2.0, cy - bar_h / 2.0, bar_w, bar_h, 3.0, "#ffffff");
    }
}

impl RenderAdapter for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.ctx.set_fill_style_str(FIELD_COLOR);
        self.ctx
            .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        self.draw_bricks(frame);
        self.draw_paddle(frame);
        self.draw_hud(frame);

        if frame.phase == GamePhase::Paused {
            self.draw_pause_glyph();
        } else {
            self.draw_ball(frame);
        }
    }
}
