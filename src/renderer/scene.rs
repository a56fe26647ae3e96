//! Scene assembly: turns a match state into a triangle list in board coordinates

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{PADDLE_HEIGHT, PADDLE_WIDTH};
use crate::sim::{GamePhase, MatchState, Paddle};

/// Center divider dash pattern
const DIVIDER_DASH: f32 = 12.0;
const DIVIDER_GAP: f32 = 16.0;
const DIVIDER_THICKNESS: f32 = 2.0;
/// Circle tessellation for the ball
const BALL_SEGMENTS: u32 = 24;

/// Build every vertex for one frame: board, divider, paddles, ball.
///
/// The ball is hidden once the match has ended.
pub fn build_scene(state: &MatchState) -> Vec<Vertex> {
    let board = state.board;
    let mut vertices = Vec::with_capacity(256);

    vertices.extend(shapes::rect(
        Vec2::ZERO,
        Vec2::new(board.width, board.height),
        colors::BOARD,
    ));
    vertices.extend(shapes::dashed_vline(
        board.width / 2.0,
        0.0,
        board.height,
        DIVIDER_THICKNESS,
        DIVIDER_DASH,
        DIVIDER_GAP,
        colors::DIVIDER,
    ));

    for paddle in [&state.player, &state.ai] {
        vertices.extend(paddle_quad(paddle, state));
    }

    if ball_visible(state.phase) {
        vertices.extend(shapes::circle(
            state.ball.pos,
            state.ball.radius,
            colors::BALL,
            BALL_SEGMENTS,
        ));
    }

    vertices
}

fn paddle_quad(paddle: &Paddle, state: &MatchState) -> Vec<Vertex> {
    shapes::rect(
        Vec2::new(paddle.x(&state.board), paddle.y),
        Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        colors::PADDLE,
    )
}

fn ball_visible(phase: GamePhase) -> bool {
    !matches!(phase, GamePhase::GameOver { .. })
}
