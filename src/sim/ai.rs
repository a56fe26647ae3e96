//! AI opponent
//!
//! A bang-bang tracker: the paddle moves at full `PADDLE_SPEED` toward the
//! ball's Y, or holds still inside the dead-zone.

use super::state::{Board, Paddle};
use crate::consts::{AI_DEAD_ZONE, PADDLE_SPEED};

/// Direction the AI wants to move this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiMove {
    Up,
    Down,
    Hold,
}

/// Decide a move by comparing the paddle center to the ball's Y
pub fn decide(paddle: &Paddle, ball_y: f32) -> AiMove {
    let center = paddle.center_y();
    if center < ball_y - AI_DEAD_ZONE {
        AiMove::Down
    } else if center > ball_y + AI_DEAD_ZONE {
        AiMove::Up
    } else {
        AiMove::Hold
    }
}

/// Move the AI paddle one tick toward the ball, clamped to the board
pub fn track_ball(paddle: &mut Paddle, ball_y: f32, board: &Board) {
    let dy = match decide(paddle, ball_y) {
        AiMove::Up => -PADDLE_SPEED,
        AiMove::Down => PADDLE_SPEED,
        AiMove::Hold => 0.0,
    };
    paddle.set_y(paddle.y + dy, board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BOARD_HEIGHT, PADDLE_HEIGHT};
    use crate::sim::state::Side;

    fn ai_at(y: f32) -> (Paddle, Board) {
        let board = Board::default();
        let mut paddle = Paddle::new(Side::Ai, &board);
        paddle.y = y;
        (paddle, board)
    }

    #[test]
    fn test_holds_inside_dead_zone() {
        // center at 200
        let (paddle, _) = ai_at(160.0);
        assert_eq!(decide(&paddle, 200.0), AiMove::Hold);
        assert_eq!(decide(&paddle, 210.0), AiMove::Hold);
        assert_eq!(decide(&paddle, 190.0), AiMove::Hold);
    }

    #[test]
    fn test_moves_at_full_speed() {
        let (mut paddle, board) = ai_at(160.0);
        track_ball(&mut paddle, 211.0, &board);
        assert_eq!(paddle.y, 166.0);

        let (mut paddle, board) = ai_at(160.0);
        track_ball(&mut paddle, 189.0, &board);
        assert_eq!(paddle.y, 154.0);
    }

    #[test]
    fn test_clamped_at_edges() {
        let (mut paddle, board) = ai_at(2.0);
        track_ball(&mut paddle, 0.0, &board);
        assert_eq!(paddle.y, 0.0);

        let (mut paddle, board) = ai_at(BOARD_HEIGHT - PADDLE_HEIGHT - 1.0);
        track_ball(&mut paddle, BOARD_HEIGHT, &board);
        assert_eq!(paddle.y, BOARD_HEIGHT - PADDLE_HEIGHT);
    }
}
