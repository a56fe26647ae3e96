//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is treated as a circle against
//! horizontal walls, vertical paddle faces and the two goal lines.

use super::state::{Ball, Board, Paddle, Side};
use crate::consts::*;

/// Bounce the ball off the top or bottom wall.
///
/// Flips the vertical velocity and pulls the ball back inside so its center
/// stays within `[radius, height - radius]`. Returns true on a bounce.
pub fn resolve_walls(ball: &mut Ball, board: &Board) -> bool {
    if ball.top() < 0.0 {
        ball.pos.y = ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else if ball.bottom() > board.height {
        ball.pos.y = board.height - ball.radius;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Whether the ball overlaps a paddle's inner face this tick.
///
/// The vertical test is strict: a ball center exactly level with a paddle
/// corner slips past.
pub fn ball_hits_paddle(ball: &Ball, paddle: &Paddle, board: &Board) -> bool {
    let x = paddle.x(board);
    let crossed = match paddle.side {
        Side::Player => ball.left() < x + PADDLE_WIDTH,
        Side::Ai => ball.right() > x,
    };
    crossed && ball.pos.y > paddle.y && ball.pos.y < paddle.bottom()
}

/// Vertical velocity imparted by a hit.
///
/// Linear in the offset from the paddle center, normalized by half the paddle
/// height: dead center gives 0, the edges give `±BALL_SPEED`.
pub fn spin(ball_y: f32, paddle: &Paddle) -> f32 {
    let hit_point = (ball_y - paddle.center_y()) / (PADDLE_HEIGHT / 2.0);
    BALL_SPEED * hit_point
}

/// Bounce the ball off a paddle if it overlaps. Returns true on a hit.
///
/// The ball is placed just outside the paddle face, its horizontal velocity is
/// reversed and its vertical velocity replaced by [`spin`]. Total speed is not
/// normalized.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, board: &Board) -> bool {
    if !ball_hits_paddle(ball, paddle, board) {
        return false;
    }

    let x = paddle.x(board);
    ball.pos.x = match paddle.side {
        Side::Player => x + PADDLE_WIDTH + ball.radius,
        Side::Ai => x - ball.radius,
    };
    ball.vel.x = -ball.vel.x;
    ball.vel.y = spin(ball.pos.y, paddle);
    true
}

/// The side that scores if the ball has left the board horizontally
pub fn scoring_side(ball: &Ball, board: &Board) -> Option<Side> {
    if ball.left() < 0.0 {
        Some(Side::Ai)
    } else if ball.right() > board.width {
        Some(Side::Player)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn board() -> Board {
        Board::new(800.0, 400.0)
    }

    #[test]
    fn test_wall_bounce_top() {
        let mut ball = Ball::new(Vec2::new(400.0, 4.0), Vec2::new(6.0, -3.0));
        assert!(resolve_walls(&mut ball, &board()));
        assert_eq!(ball.pos.y, BALL_RADIUS);
        assert_eq!(ball.vel.y, 3.0);
    }

    #[test]
    fn test_wall_bounce_bottom() {
        let mut ball = Ball::new(Vec2::new(400.0, 395.0), Vec2::new(6.0, 5.0));
        assert!(resolve_walls(&mut ball, &board()));
        assert_eq!(ball.pos.y, 400.0 - BALL_RADIUS);
        assert_eq!(ball.vel.y, -5.0);
    }

    #[test]
    fn test_no_wall_bounce_inside() {
        let mut ball = Ball::new(Vec2::new(400.0, 200.0), Vec2::new(6.0, 5.0));
        assert!(!resolve_walls(&mut ball, &board()));
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_player_paddle_center_hit() {
        let board = board();
        let mut paddle = Paddle::new(Side::Player, &board);
        paddle.y = 160.0;
        let mut ball = Ball::new(Vec2::new(9.0, 200.0), Vec2::new(-6.0, 0.0));

        assert!(resolve_paddle(&mut ball, &paddle, &board));
        assert_eq!(ball.pos.x, PADDLE_MARGIN + PADDLE_WIDTH + BALL_RADIUS);
        assert_eq!(ball.vel.x, 6.0);
        assert_eq!(ball.vel.y, 0.0);
    }

    #[test]
    fn test_ai_paddle_edge_hit_spins() {
        let board = board();
        let mut paddle = Paddle::new(Side::Ai, &board);
        paddle.y = 100.0;
        let ai_x = paddle.x(&board);
        // 30 below center (140) -> hit point 0.75
        let mut ball = Ball::new(Vec2::new(ai_x - 5.0, 170.0), Vec2::new(6.0, 1.0));

        assert!(resolve_paddle(&mut ball, &paddle, &board));
        assert_eq!(ball.pos.x, ai_x - BALL_RADIUS);
        assert_eq!(ball.vel.x, -6.0);
        assert!((ball.vel.y - BALL_SPEED * 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_vertical_test_is_strict() {
        let board = board();
        let mut paddle = Paddle::new(Side::Player, &board);
        paddle.y = 160.0;

        let at_top = Ball::new(Vec2::new(25.0, 160.0), Vec2::new(-6.0, 0.0));
        let at_bottom = Ball::new(Vec2::new(25.0, 240.0), Vec2::new(-6.0, 0.0));
        let inside = Ball::new(Vec2::new(25.0, 160.5), Vec2::new(-6.0, 0.0));
        assert!(!ball_hits_paddle(&at_top, &paddle, &board));
        assert!(!ball_hits_paddle(&at_bottom, &paddle, &board));
        assert!(ball_hits_paddle(&inside, &paddle, &board));
    }

    #[test]
    fn test_spin_range() {
        let board = board();
        let mut paddle = Paddle::new(Side::Player, &board);
        paddle.y = 0.0;
        assert_eq!(spin(40.0, &paddle), 0.0);
        assert_eq!(spin(0.0, &paddle), -BALL_SPEED);
        assert_eq!(spin(80.0, &paddle), BALL_SPEED);
    }

    #[test]
    fn test_scoring_side() {
        let board = board();
        let left = Ball::new(Vec2::new(5.0, 200.0), Vec2::ZERO);
        let right = Ball::new(Vec2::new(795.0, 200.0), Vec2::ZERO);
        let middle = Ball::new(Vec2::new(400.0, 200.0), Vec2::ZERO);
        assert_eq!(scoring_side(&left, &board), Some(Side::Ai));
        assert_eq!(scoring_side(&right, &board), Some(Side::Player));
        assert_eq!(scoring_side(&middle, &board), None);
    }
}
