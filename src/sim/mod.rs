//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Fixed timestep only (motion is per tick)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod control;
pub mod state;
pub mod tick;

pub use control::ControlEvent;
pub use state::{Ball, Board, GameEvent, GamePhase, MatchState, Paddle, Score, Side};
pub use tick::{TickInput, tick, update};
