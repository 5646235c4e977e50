//! Per-frame simulation step
//!
//! `tick` advances one session by `dt` seconds. It is a pure function of
//! (session, input, dt): no globals, no platform calls, so an external
//! driver can schedule it however it likes and tests can drive it directly.

use super::collision::{ball_rect_overlap, resolve_side, struck_side};
use super::state::{BrickStatus, GameOutcome, GamePhase, GameSession};
use crate::consts::*;

/// Input state for a single tick
///
/// `left`/`right` are the latest held-key flags; `launch` and `pause` are
/// edge-triggered and must be cleared by the driver after each tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Launch the ball (space)
    pub launch: bool,
    /// Pause from Launched, resume from Paused
    pub pause: bool,
}

/// Advance the session by one tick of `dt` seconds
///
/// Inputs that do not apply to the current phase are ignored; invoking the
/// step while the session is not Launched is a no-op, never an error.
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    // Pause only applies mid-flight, resume only while paused
    if input.pause {
        match session.phase {
            GamePhase::Launched => {
                session.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => session.phase = GamePhase::Launched,
            _ => {}
        }
    }

    match session.phase {
        GamePhase::Paused | GamePhase::Over => return,
        GamePhase::Idle => {
            // Paddle still moves before launch; the ball rides along
            apply_paddle_input(session, input, dt);
            session.ball.attach_to(&session.paddle);
            if input.launch {
                session.phase = GamePhase::Launched;
            }
            return;
        }
        GamePhase::Launched => {}
    }

    // 1. Paddle movement from held flags
    apply_paddle_input(session, input, dt);

    let mut pos = session.ball.pos;
    let mut vel = session.ball.vel;
    let radius = session.ball.radius;

    // 2. Side walls: reflect if the next x would exit the field
    let next_x = pos.x + vel.x * dt;
    if next_x > FIELD_WIDTH - radius || next_x < radius {
        vel.x = -vel.x;
    }

    // 3. Top wall, 4. paddle lane (mutually exclusive per tick)
    let next_y = pos.y + vel.y * dt;
    if next_y < radius {
        vel.y = -vel.y;
    } else if next_y > paddle_lane_y() - radius {
        if session.paddle.spans(pos.x) {
            // Dynamic rebound: exit angle from the offset to the paddle
            // center, then speed up so every return raises the difficulty
            let offset = pos.x - session.paddle.center_x();
            let new_vx = offset * REBOUND_ANGLE_FACTOR * REBOUND_SPEEDUP_X;
            // A dead-center return keeps its incoming angle rather than
            // going perfectly vertical
            vel.x = if new_vx == 0.0 {
                vel.x * REBOUND_SPEEDUP_X
            } else {
                new_vx
            };
            vel.y = -vel.y.abs() * REBOUND_SPEEDUP_Y;
        } else {
            session.lives = session.lives.saturating_sub(1);
            if session.lives == 0 {
                session.phase = GamePhase::Over;
                session.outcome = Some(GameOutcome::Lost);
                return;
            }
            // Back to the paddle; score, lives, and bricks carry over
            session.reserve_ball();
            return;
        }
    }

    // 5. Brick scan in layout order; at most one brick resolved per tick
    let next_center = pos + vel * dt;
    for brick in &mut session.bricks {
        if !brick.is_active() {
            continue;
        }
        if ball_rect_overlap(pos, radius, &brick.rect) {
            brick.status = BrickStatus::Destroyed;
            session.score += 1;
            let side = struck_side(next_center, &brick.rect);
            (pos, vel) = resolve_side(side, pos, vel, radius, &brick.rect);
            break;
        }
    }

    // 6. Win when every brick is down
    if session.score == session.total_bricks() {
        session.ball.pos = pos;
        session.ball.vel = vel;
        session.phase = GamePhase::Over;
        session.outcome = Some(GameOutcome::Won);
        return;
    }

    // 7. Integrate
    session.ball.pos = pos + vel * dt;
    session.ball.vel = vel;
}

/// Move the paddle from the held flags, clamped to the field
///
/// Right wins when both flags are held.
fn apply_paddle_input(session: &mut GameSession, input: &TickInput, dt: f32) {
    if input.right {
        session.paddle.shift(PADDLE_SPEED * dt);
    } else if input.left {
        session.paddle.shift(-PADDLE_SPEED * dt);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    const DT: f32 = SIM_DT;

    fn launched_session() -> GameSession {
        let mut session = GameSession::new();
        tick(&mut session, &TickInput { launch: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Launched);
        session
    }

    /// Park the ball mid-field so no wall, paddle, or brick is in play
    fn park_ball(session: &mut GameSession, pos: Vec2, vel: Vec2) {
        session.ball.pos = pos;
        session.ball.vel = vel;
    }

    #[test]
    fn test_launch_from_idle() {
        let mut session = GameSession::new();
        assert_eq!(session.phase, GamePhase::Idle);
        tick(&mut session, &TickInput { launch: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Launched);
    }

    #[test]
    fn test_pause_is_noop_in_idle() {
        let mut session = GameSession::new();
        tick(&mut session, &TickInput { pause: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Idle);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut session = launched_session();
        park_ball(&mut session, Vec2::new(240.0, 220.0), Vec2::new(120.0, -120.0));

        tick(&mut session, &TickInput { pause: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Paused);

        // Frozen: nothing moves while paused
        let frozen = session.ball.pos;
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.ball.pos, frozen);

        tick(&mut session, &TickInput { pause: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Launched);
        tick(&mut session, &TickInput::default(), DT);
        assert_ne!(session.ball.pos, frozen);
    }

    #[test]
    fn test_launch_is_noop_while_launched() {
        let mut session = launched_session();
        park_ball(&mut session, Vec2::new(240.0, 220.0), Vec2::new(120.0, -120.0));
        tick(&mut session, &TickInput { launch: true, ..Default::default() }, DT);
        assert_eq!(session.phase, GamePhase::Launched);
    }

    #[test]
    fn test_idle_ball_follows_paddle() {
        let mut session = GameSession::new();
        let input = TickInput { right: true, ..Default::default() };
        for _ in 0..10 {
            tick(&mut session, &input, DT);
        }
        assert_eq!(session.ball.pos.x, session.paddle.center_x());
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut session = launched_session();
        park_ball(
            &mut session,
            Vec2::new(FIELD_WIDTH - BALL_RADIUS - 0.5, 220.0),
            Vec2::new(120.0, -60.0),
        );
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.ball.vel, Vec2::new(-120.0, -60.0));
    }

    #[test]
    fn test_top_wall_reflects() {
        let mut session = launched_session();
        // Above the brick rows, heading straight up
        park_ball(
            &mut session,
            Vec2::new(227.0, BALL_RADIUS + 0.5),
            Vec2::new(0.0, -120.0),
        );
        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.ball.vel.y, 120.0);
    }

    #[test]
    fn test_paddle_rebound_angle_and_speedup() {
        let mut session = launched_session();
        let offset = 20.0;
        let ball_x = session.paddle.center_x() + offset;
        park_ball(
            &mut session,
            Vec2::new(ball_x, paddle_lane_y() - BALL_RADIUS - 0.5),
            Vec2::new(60.0, 120.0),
        );
        tick(&mut session, &TickInput::default(), DT);

        let vel = session.ball.vel;
        assert_eq!(vel.x, offset * REBOUND_ANGLE_FACTOR * REBOUND_SPEEDUP_X);
        assert_eq!(vel.y, -120.0 * REBOUND_SPEEDUP_Y);
        assert!(vel.y < 0.0, "rebound must send the ball upward");
        assert_eq!(session.lives, START_LIVES);
    }

    #[test]
    fn test_miss_costs_life_and_reserves() {
        let mut session = launched_session();
        // Ball dropping far from the paddle span
        park_ball(
            &mut session,
            Vec2::new(50.0, paddle_lane_y() - BALL_RADIUS - 0.5),
            Vec2::new(0.0, 120.0),
        );
        tick(&mut session, &TickInput::default(), DT);

        assert_eq!(session.lives, START_LIVES - 1);
        assert_eq!(session.phase, GamePhase::Idle);
        assert!(session.outcome.is_none());
        // Re-serve: ball back on the paddle at serve velocity
        assert_eq!(session.ball.pos.x, session.paddle.center_x());
        assert_eq!(session.ball.vel, Vec2::new(SERVE_VEL_X, SERVE_VEL_Y));
    }

    #[test]
    fn test_two_misses_lose_without_negative_lives() {
        let mut session = launched_session();
        for miss in 0..2 {
            if session.phase == GamePhase::Idle {
                tick(&mut session, &TickInput { launch: true, ..Default::default() }, DT);
            }
            park_ball(
                &mut session,
                Vec2::new(50.0, paddle_lane_y() - BALL_RADIUS - 0.5),
                Vec2::new(0.0, 120.0),
            );
            tick(&mut session, &TickInput::default(), DT);
            assert_eq!(session.lives, START_LIVES - 1 - miss);
        }
        assert_eq!(session.lives, 0);
        assert_eq!(session.phase, GamePhase::Over);
        assert_eq!(session.outcome, Some(GameOutcome::Lost));
    }

    #[test]
    fn test_brick_hit_scores_once() {
        let mut session = launched_session();
        let rect = session.bricks[0].rect;
        park_ball(
            &mut session,
            Vec2::new(rect.center_x(), rect.bottom() + BALL_RADIUS - 1.0),
            Vec2::new(0.0, -120.0),
        );
        tick(&mut session, &TickInput::default(), DT);

        assert_eq!(session.score, 1);
        assert_eq!(session.bricks[0].status, BrickStatus::Destroyed);
        // Rebound off the bottom edge, repositioned outside
        assert!(session.ball.vel.y > 0.0);
        assert!(!ball_rect_overlap(session.ball.pos, BALL_RADIUS, &rect));
    }

    #[test]
    fn test_destroyed_brick_is_inert() {
        let mut session = launched_session();
        let rect = session.bricks[0].rect;
        session.bricks[0].status = BrickStatus::Destroyed;
        let vel = Vec2::new(0.0, -120.0);
        park_ball(
            &mut session,
            Vec2::new(rect.center_x(), rect.bottom() + BALL_RADIUS - 1.0),
            vel,
        );
        tick(&mut session, &TickInput::default(), DT);

        assert_eq!(session.score, 0);
        // Velocity unchanged; the ball sails straight through
        assert_eq!(session.ball.vel, vel);
    }

    #[test]
    fn test_one_brick_per_tick() {
        let mut session = launched_session();
        // Drop the ball into the padding gap between two rows of column 0
        // so its bounding square overlaps both bricks at once
        let upper = session.bricks[0].rect;
        let lower = session.bricks[1].rect;
        park_ball(
            &mut session,
            Vec2::new(upper.center_x(), (upper.bottom() + lower.y) / 2.0),
            Vec2::new(0.0, -120.0),
        );
        assert!(ball_rect_overlap(session.ball.pos, BALL_RADIUS, &upper));
        assert!(ball_rect_overlap(session.ball.pos, BALL_RADIUS, &lower));

        tick(&mut session, &TickInput::default(), DT);
        assert_eq!(session.score, 1);
        assert_eq!(session.bricks_remaining(), session.total_bricks() - 1);
    }

    #[test]
    fn test_clearing_all_bricks_wins() {
        let mut session = launched_session();
        let rects: Vec<_> = session.bricks.iter().map(|b| b.rect).collect();
        for rect in rects {
            assert_eq!(session.phase, GamePhase::Launched);
            park_ball(
                &mut session,
                Vec2::new(rect.center_x(), rect.bottom() + BALL_RADIUS - 1.0),
                Vec2::new(0.0, -120.0),
            );
            tick(&mut session, &TickInput::default(), DT);
        }
        assert_eq!(session.score, session.total_bricks());
        assert_eq!(session.phase, GamePhase::Over);
        assert_eq!(session.outcome, Some(GameOutcome::Won));
    }

    #[test]
    fn test_over_is_terminal_until_reset() {
        let mut session = launched_session();
        session.phase = GamePhase::Over;
        session.outcome = Some(GameOutcome::Lost);
        let input = TickInput { launch: true, pause: true, left: true, ..Default::default() };
        tick(&mut session, &input, DT);
        assert_eq!(session.phase, GamePhase::Over);

        session.reset();
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, START_LIVES);
        assert!(session.outcome.is_none());
        assert_eq!(session.bricks_remaining(), session.total_bricks());
    }

    #[test]
    fn test_score_bounded_by_brick_count() {
        let mut session = launched_session();
        for _ in 0..2000 {
            tick(&mut session, &TickInput::default(), DT);
            assert!(session.score <= session.total_bricks());
            if session.is_over() {
                break;
            }
        }
    }
}
