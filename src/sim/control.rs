//! Match control state machine
//!
//! Discrete control events (start, restart, pause) move the match between
//! phases through a single transition table. The countdown is a timed phase
//! polled once per tick; its deadline lives inside the phase value, so a
//! restart simply replaces it.

use super::state::{GameEvent, GamePhase, MatchState};
use crate::consts::COUNTDOWN_STEP_TICKS;

/// Control events produced by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Begin the first match (also restarts from GameOver)
    Start,
    /// Reset scores and ball, then count down again
    Restart,
    /// Running <-> Paused
    TogglePause,
}

/// Next phase for an event, or None if the event is not valid in `phase`
pub fn next_phase(phase: GamePhase, event: ControlEvent) -> Option<GamePhase> {
    match (phase, event) {
        (GamePhase::Idle, ControlEvent::Start) => Some(GamePhase::countdown()),
        (GamePhase::GameOver { .. }, ControlEvent::Start) => Some(GamePhase::countdown()),

        (GamePhase::Idle, ControlEvent::Restart) => None,
        (_, ControlEvent::Restart) => Some(GamePhase::countdown()),

        (GamePhase::Running, ControlEvent::TogglePause) => Some(GamePhase::Paused),
        (GamePhase::Paused, ControlEvent::TogglePause) => Some(GamePhase::Running),

        _ => None,
    }
}

/// Apply a control event to the match. Returns false if it was rejected.
///
/// Entering a countdown resets scores, paddles and ball.
pub fn apply(state: &mut MatchState, event: ControlEvent) -> bool {
    let Some(next) = next_phase(state.phase, event) else {
        log::debug!("Ignoring {:?} in {:?}", event, state.phase);
        return false;
    };

    if let GamePhase::Countdown { remaining, .. } = next {
        state.reset_match();
        state.set_phase(next);
        state.events.push(GameEvent::CountdownStep(remaining));
    } else {
        state.set_phase(next);
    }
    log::info!("{:?} -> {:?}", event, state.phase);
    true
}

/// Advance a running countdown by one tick; no-op in other phases.
pub fn advance_countdown(state: &mut MatchState) {
    let GamePhase::Countdown {
        remaining,
        ticks_left,
    } = state.phase
    else {
        return;
    };

    if ticks_left > 1 {
        state.phase = GamePhase::Countdown {
            remaining,
            ticks_left: ticks_left - 1,
        };
        return;
    }

    let remaining = remaining.saturating_sub(1);
    if remaining == 0 {
        state.set_phase(GamePhase::Running);
        state.events.push(GameEvent::CountdownFinished);
        log::info!("Countdown finished, match running");
    } else {
        state.phase = GamePhase::Countdown {
            remaining,
            ticks_left: COUNTDOWN_STEP_TICKS,
        };
        state.events.push(GameEvent::CountdownStep(remaining));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COUNTDOWN_STEPS;
    use crate::sim::state::{Score, Side};

    const GAME_OVER: GamePhase = GamePhase::GameOver { winner: Side::Ai };

    #[test]
    fn test_transition_table() {
        use ControlEvent::*;

        assert_eq!(next_phase(GamePhase::Idle, Start), Some(GamePhase::countdown()));
        assert_eq!(next_phase(GamePhase::Idle, Restart), None);
        assert_eq!(next_phase(GamePhase::Idle, TogglePause), None);

        assert_eq!(next_phase(GamePhase::countdown(), Start), None);
        assert_eq!(next_phase(GamePhase::countdown(), TogglePause), None);
        assert_eq!(
            next_phase(GamePhase::countdown(), Restart),
            Some(GamePhase::countdown())
        );

        assert_eq!(next_phase(GamePhase::Running, Start), None);
        assert_eq!(next_phase(GamePhase::Running, TogglePause), Some(GamePhase::Paused));
        assert_eq!(next_phase(GamePhase::Paused, TogglePause), Some(GamePhase::Running));
        assert_eq!(next_phase(GamePhase::Paused, Restart), Some(GamePhase::countdown()));

        assert_eq!(next_phase(GAME_OVER, TogglePause), None);
        assert_eq!(next_phase(GAME_OVER, Restart), Some(GamePhase::countdown()));
        assert_eq!(next_phase(GAME_OVER, Start), Some(GamePhase::countdown()));
    }

    #[test]
    fn test_start_enters_countdown() {
        let mut state = MatchState::new(1);
        assert!(apply(&mut state, ControlEvent::Start));
        assert_eq!(state.phase, GamePhase::countdown());
        assert!(state.events.contains(&GameEvent::CountdownStep(COUNTDOWN_STEPS)));
    }

    #[test]
    fn test_countdown_reaches_running() {
        let mut state = MatchState::new(1);
        apply(&mut state, ControlEvent::Start);
        state.drain_events();

        let total = COUNTDOWN_STEPS as u32 * COUNTDOWN_STEP_TICKS;
        for _ in 0..total - 1 {
            advance_countdown(&mut state);
            assert!(matches!(state.phase, GamePhase::Countdown { .. }));
        }
        advance_countdown(&mut state);
        assert_eq!(state.phase, GamePhase::Running);

        let events = state.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::CountdownStep(_)))
                .count(),
            COUNTDOWN_STEPS as usize - 1
        );
        assert!(events.contains(&GameEvent::CountdownFinished));
    }

    #[test]
    fn test_countdown_steps_once_per_second() {
        let mut state = MatchState::new(1);
        apply(&mut state, ControlEvent::Start);
        for _ in 0..COUNTDOWN_STEP_TICKS {
            advance_countdown(&mut state);
        }
        assert!(matches!(state.phase, GamePhase::Countdown { remaining: 2, .. }));
    }

    #[test]
    fn test_restart_during_countdown_restarts_timer() {
        let mut state = MatchState::new(1);
        apply(&mut state, ControlEvent::Start);
        for _ in 0..COUNTDOWN_STEP_TICKS * 2 + 10 {
            advance_countdown(&mut state);
        }
        assert!(matches!(state.phase, GamePhase::Countdown { remaining: 1, .. }));

        assert!(apply(&mut state, ControlEvent::Restart));
        assert_eq!(state.phase, GamePhase::countdown());
    }

    #[test]
    fn test_restart_from_game_over_resets_scores() {
        let mut state = MatchState::new(1);
        state.score = Score { player: 4, ai: 7 };
        state.phase = GAME_OVER;

        assert!(!apply(&mut state, ControlEvent::TogglePause));
        assert_eq!(state.phase, GAME_OVER);
        assert_eq!(state.score.ai, 7);

        assert!(apply(&mut state, ControlEvent::Restart));
        assert_eq!(state.score, Score::default());
        assert_eq!(state.ball.pos, state.board.center());
    }

    #[test]
    fn test_pause_does_not_reset() {
        let mut state = MatchState::new(1);
        state.phase = GamePhase::Running;
        state.score = Score { player: 2, ai: 1 };
        assert!(apply(&mut state, ControlEvent::TogglePause));
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.score, Score { player: 2, ai: 1 });
    }
}
