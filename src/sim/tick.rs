//! Fixed timestep simulation tick
//!
//! `tick` applies one frame's input and advances the control state machine;
//! `update` is the physics step that only runs while the match is Running.

use super::ai;
use super::collision::{resolve_paddle, resolve_walls, scoring_side};
use super::control::{self, ControlEvent};
use super::state::{GameEvent, GamePhase, MatchState, Side};
use crate::consts::WINNING_SCORE;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer Y in board coordinates (player paddle centers on it)
    pub pointer_y: Option<f32>,
    /// Start the match (click/tap/space); restarts after game over
    pub start: bool,
    /// Restart the match from any non-idle phase
    pub restart: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they have been processed
    pub fn clear_one_shots(&mut self) {
        self.start = false;
        self.restart = false;
        self.pause = false;
    }
}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if input.restart {
        control::apply(state, ControlEvent::Restart);
    } else if input.start {
        control::apply(state, ControlEvent::Start);
    }
    if input.pause {
        control::apply(state, ControlEvent::TogglePause);
    }

    if let Some(y) = input.pointer_y {
        if state.phase != GamePhase::Paused {
            let board = state.board;
            state.player.center_on(y, &board);
        }
    }

    match state.phase {
        GamePhase::Countdown { .. } => control::advance_countdown(state),
        GamePhase::Running => update(state),
        GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver { .. } => {}
    }
}

/// Physics step: move the ball, resolve collisions, score, move the AI.
///
/// A no-op unless the match is Running.
pub fn update(state: &mut MatchState) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;
    let board = state.board;

    // Integrate
    state.ball.pos += state.ball.vel;

    if resolve_walls(&mut state.ball, &board) {
        state.events.push(GameEvent::WallBounce);
    }

    for side in [Side::Player, Side::Ai] {
        let paddle = *state.paddle(side);
        if resolve_paddle(&mut state.ball, &paddle, &board) {
            state.rally += 1;
            state.events.push(GameEvent::PaddleHit(side));
        }
    }

    if let Some(scorer) = scoring_side(&state.ball, &board) {
        let points = state.score.award(scorer);
        state.events.push(GameEvent::Scored(scorer));
        log::debug!(
            "{} scores ({} - {})",
            scorer.label(),
            state.score.player,
            state.score.ai
        );

        if points >= WINNING_SCORE {
            // Park the ball so nothing is drawn off the board behind the overlay
            state.ball.pos = board.center();
            state.ball.vel = glam::Vec2::ZERO;
            state.set_phase(GamePhase::GameOver { winner: scorer });
            state.events.push(GameEvent::MatchWon(scorer));
            log::info!("{} wins {} - {}", scorer.label(), state.score.player, state.score.ai);
            return;
        }
        state.reset_ball();
    }

    let ball_y = state.ball.pos.y;
    ai::track_ball(&mut state.ai, ball_y, &board);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Ball, Score};
    use glam::Vec2;

    fn running(seed: u64) -> MatchState {
        let mut state = MatchState::new(seed);
        state.phase = GamePhase::Running;
        state
    }

    #[test]
    fn test_idle_to_running() {
        let mut state = MatchState::new(12345);
        assert_eq!(state.phase, GamePhase::Idle);

        // Tick without start - should stay Idle and keep the ball still
        let ball = state.ball;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.ball, ball);

        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(matches!(state.phase, GamePhase::Countdown { .. }));

        // Ball is frozen during the countdown
        let ball = state.ball;
        for _ in 0..COUNTDOWN_STEPS as u32 * COUNTDOWN_STEP_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.ball, ball);
        }
        assert_eq!(state.phase, GamePhase::Running);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, ball.pos + ball.vel);
    }

    #[test]
    fn test_player_paddle_center_hit() {
        let mut state = running(1);
        state.player.y = 160.0;
        state.ball = Ball::new(Vec2::new(15.0, 200.0), Vec2::new(-6.0, 0.0));

        update(&mut state);

        assert_eq!(state.ball.pos.x, PADDLE_MARGIN + PADDLE_WIDTH + BALL_RADIUS);
        assert_eq!(state.ball.vel.x, 6.0);
        assert_eq!(state.ball.vel.y, 0.0);
        assert_eq!(state.rally, 1);
        assert!(state.events.contains(&GameEvent::PaddleHit(Side::Player)));
    }

    #[test]
    fn test_left_boundary_scores_for_ai() {
        let mut state = running(2);
        state.player.y = 0.0;
        state.ball = Ball::new(Vec2::new(12.0, 350.0), Vec2::new(-6.0, 0.0));

        update(&mut state);

        assert_eq!(state.score, Score { player: 0, ai: 1 });
        assert_eq!(state.ball.pos, state.board.center());
        assert_eq!(state.ball.vel.x.abs(), BALL_SPEED);
        assert!(state.events.contains(&GameEvent::Scored(Side::Ai)));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_right_boundary_scores_for_player() {
        let mut state = running(3);
        state.ai.y = 0.0;
        state.ball = Ball::new(Vec2::new(788.0, 350.0), Vec2::new(6.0, 0.0));

        update(&mut state);

        assert_eq!(state.score, Score { player: 1, ai: 0 });
        assert_eq!(state.ball.pos, state.board.center());
    }

    #[test]
    fn test_ai_reaching_seven_ends_match() {
        let mut state = running(4);
        state.score = Score { player: 3, ai: 6 };
        state.player.y = 0.0;
        state.ball = Ball::new(Vec2::new(12.0, 350.0), Vec2::new(-6.0, 0.0));

        update(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver { winner: Side::Ai });
        assert_eq!(state.score, Score { player: 3, ai: 7 });
        assert!(state.events.contains(&GameEvent::MatchWon(Side::Ai)));

        // Terminal: further ticks change nothing
        let ball = state.ball;
        let ai_y = state.ai.y;
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball, ball);
        assert_eq!(state.ai.y, ai_y);
        assert_eq!(state.score, Score { player: 3, ai: 7 });

        // Pause is ignored during game over
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::GameOver { winner: Side::Ai });

        // Restart resets scores
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert!(matches!(state.phase, GamePhase::Countdown { .. }));
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_tick_pause() {
        let mut state = running(5);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let ball = state.ball;
        let ai = state.ai;
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.ball, ball);
        assert_eq!(state.ai, ai);

        // Pointer does not move the paddle while paused
        let player_y = state.player.y;
        let pointer = TickInput {
            pointer_y: Some(20.0),
            ..Default::default()
        };
        tick(&mut state, &pointer);
        assert_eq!(state.player.y, player_y);

        // Unpause
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
        assert_ne!(state.ball, ball);
    }

    #[test]
    fn test_pointer_moves_player_paddle() {
        let mut state = MatchState::new(6);
        let input = TickInput {
            pointer_y: Some(100.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.y, 60.0);

        let input = TickInput {
            pointer_y: Some(395.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.y, BOARD_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_update_is_noop_unless_running() {
        let mut state = MatchState::new(7);
        let ball = state.ball;
        update(&mut state);
        assert_eq!(state.ball, ball);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ai_follows_ball() {
        let mut state = running(8);
        state.ai.y = 160.0;
        state.ball = Ball::new(Vec2::new(400.0, 60.0), Vec2::new(1.0, 0.0));

        update(&mut state);
        assert_eq!(state.ai.y, 160.0 - PADDLE_SPEED);
    }
}
