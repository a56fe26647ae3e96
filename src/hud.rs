//! HUD text derived from match state
//!
//! Scores and overlay messages are drawn by the DOM, not the GPU. This module
//! decides what they say; `main` pushes the strings into the page.

use crate::sim::{GamePhase, MatchState};

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub player_score: String,
    pub ai_score: String,
    /// Centered overlay message, if any
    pub overlay: Option<String>,
    /// Rally counter, shown from two consecutive hits
    pub rally: Option<String>,
}

impl HudView {
    pub fn from_state(state: &MatchState) -> Self {
        Self {
            player_score: state.score.player.to_string(),
            ai_score: state.score.ai.to_string(),
            overlay: overlay_text(state.phase),
            rally: (state.is_running() && state.rally >= 2)
                .then(|| format!("Rally {}", state.rally)),
        }
    }
}

/// Overlay message for a phase
pub fn overlay_text(phase: GamePhase) -> Option<String> {
    match phase {
        GamePhase::Idle => Some("Click or press Space to start".to_string()),
        GamePhase::Countdown { remaining, .. } => Some(remaining.to_string()),
        GamePhase::Running => None,
        GamePhase::Paused => Some("Paused".to_string()),
        GamePhase::GameOver { winner } => Some(format!("{} Wins!", winner.label())),
    }
}
