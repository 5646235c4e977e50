//! Collision detection and response for axis-aligned geometry
//!
//! The kernel is deliberately simple: the ball is tested against brick
//! rectangles with a bounding-box approximation (the ball's bounding
//! square vs the rectangle). This can register hits slightly before true
//! circular contact; the behavior is kept because it is what players see.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Horizontal center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

/// Which edge of a rectangle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Bounding-box overlap test between the ball and a rectangle
///
/// Overlap holds iff the ball's bounding square intersects the rectangle.
#[inline]
pub fn ball_rect_overlap(pos: Vec2, radius: f32, rect: &Rect) -> bool {
    pos.x + radius > rect.x
        && pos.x - radius < rect.right()
        && pos.y + radius > rect.y
        && pos.y - radius < rect.bottom()
}

/// Pick the struck edge by comparing the ball's next predicted center
/// against the four rectangle edges
///
/// The edge with the minimum absolute distance wins; ties break in the
/// fixed evaluation order left, right, top, bottom.
pub fn struck_side(next_center: Vec2, rect: &Rect) -> Side {
    let dist_left = (next_center.x - rect.x).abs();
    let dist_right = (next_center.x - rect.right()).abs();
    let dist_top = (next_center.y - rect.y).abs();
    let dist_bottom = (next_center.y - rect.bottom()).abs();

    let min_dist = dist_left.min(dist_right).min(dist_top).min(dist_bottom);

    if min_dist == dist_left {
        Side::Left
    } else if min_dist == dist_right {
        Side::Right
    } else if min_dist == dist_top {
        Side::Top
    } else {
        Side::Bottom
    }
}

/// Apply the rebound for a struck edge
///
/// Reflects the matching velocity component's sign and repositions the
/// ball center exactly `radius + 1` outside the edge, so the next tick
/// cannot re-detect the same overlap.
pub fn resolve_side(side: Side, pos: Vec2, vel: Vec2, radius: f32, rect: &Rect) -> (Vec2, Vec2) {
    let mut pos = pos;
    let mut vel = vel;
    match side {
        Side::Left => {
            vel.x = -vel.x.abs();
            pos.x = rect.x - radius - 1.0;
        }
        Side::Right => {
            vel.x = vel.x.abs();
            pos.x = rect.right() + radius + 1.0;
        }
        Side::Top => {
            vel.y = -vel.y.abs();
            pos.y = rect.y - radius - 1.0;
        }
        Side::Bottom => {
            vel.y = vel.y.abs();
            pos.y = rect.bottom() + radius + 1.0;
        }
    }
    (pos, vel)
}

/// Detect and resolve a ball/rectangle hit in one call
///
/// Returns the corrected position and velocity if the ball overlaps the
/// rectangle, `None` otherwise. `next_center` is the predicted center for
/// the coming tick (`pos + vel * dt`), used only for side selection.
pub fn resolve_rect_hit(
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    next_center: Vec2,
    rect: &Rect,
) -> Option<(Vec2, Vec2)> {
    if !ball_rect_overlap(pos, radius, rect) {
        return None;
    }
    let side = struck_side(next_center, rect);
    Some(resolve_side(side, pos, vel, radius, rect))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect::new(100.0, 50.0, 100.0, 40.0);

    #[test]
    fn test_overlap_inside() {
        assert!(ball_rect_overlap(Vec2::new(150.0, 70.0), 10.0, &RECT));
    }

    #[test]
    fn test_overlap_edge_graze() {
        // Bounding square just touching from the left: x + r == rect.x is
        // not an overlap (strict inequality)
        assert!(!ball_rect_overlap(Vec2::new(90.0, 70.0), 10.0, &RECT));
        assert!(ball_rect_overlap(Vec2::new(90.1, 70.0), 10.0, &RECT));
    }

    #[test]
    fn test_overlap_miss_diagonal() {
        // Bounding square catches the corner even though the circle would
        // miss - the accepted approximation
        assert!(ball_rect_overlap(Vec2::new(92.0, 42.0), 10.0, &RECT));
    }

    #[test]
    fn test_struck_side_selection() {
        assert_eq!(struck_side(Vec2::new(101.0, 70.0), &RECT), Side::Left);
        assert_eq!(struck_side(Vec2::new(199.0, 70.0), &RECT), Side::Right);
        assert_eq!(struck_side(Vec2::new(150.0, 51.0), &RECT), Side::Top);
        assert_eq!(struck_side(Vec2::new(150.0, 89.0), &RECT), Side::Bottom);
    }

    #[test]
    fn test_struck_side_tie_order() {
        // Exactly equidistant from left and top edges: left wins
        assert_eq!(struck_side(Vec2::new(105.0, 55.0), &RECT), Side::Left);
        // Equidistant from top and bottom (vertical center): top wins
        assert_eq!(struck_side(Vec2::new(150.0, 70.0), &RECT), Side::Top);
    }

    #[test]
    fn test_resolve_left_repositions_outside() {
        let (pos, vel) = resolve_side(
            Side::Left,
            Vec2::new(105.0, 70.0),
            Vec2::new(120.0, 60.0),
            10.0,
            &RECT,
        );
        assert_eq!(pos.x, RECT.x - 10.0 - 1.0);
        assert_eq!(vel.x, -120.0);
        assert_eq!(vel.y, 60.0);
        assert!(!ball_rect_overlap(pos, 10.0, &RECT));
    }

    #[test]
    fn test_resolve_bottom_repositions_outside() {
        let (pos, vel) = resolve_side(
            Side::Bottom,
            Vec2::new(150.0, 85.0),
            Vec2::new(50.0, -90.0),
            10.0,
            &RECT,
        );
        assert_eq!(pos.y, RECT.bottom() + 10.0 + 1.0);
        assert_eq!(vel.y, 90.0);
        assert!(!ball_rect_overlap(pos, 10.0, &RECT));
    }

    #[test]
    fn test_resolve_preserves_speed_magnitude() {
        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let vel = Vec2::new(87.0, -143.0);
            let (_, out) = resolve_side(side, Vec2::new(150.0, 70.0), vel, 10.0, &RECT);
            assert_eq!(out.x.abs(), vel.x.abs());
            assert_eq!(out.y.abs(), vel.y.abs());
        }
    }

    #[test]
    fn test_resolve_rect_hit_miss() {
        let pos = Vec2::new(300.0, 200.0);
        let vel = Vec2::new(120.0, -120.0);
        assert!(resolve_rect_hit(pos, vel, 10.0, pos + vel * 0.01, &RECT).is_none());
    }
}
