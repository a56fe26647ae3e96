//! Solo Pong - single-player Pong against a reactive AI
//!
//! Core modules:
//! - `sim`: Simulation (ball/paddle physics, scoring, control state machine)
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: Score and overlay text derived from match state
//! - `platform`: Browser input mapping
//! - `audio`: Procedural sound cues
//! - `settings`: Persisted user preferences

pub mod audio;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use hud::HudView;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate. Motion is expressed per tick, so this is also the game speed.
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 400.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between a board edge and the outer face of its paddle
    pub const PADDLE_MARGIN: f32 = 20.0;
    /// AI paddle speed (units per tick)
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Horizontal serve speed and maximum spin (units per tick)
    pub const BALL_SPEED: f32 = 6.0;

    /// AI holds still while the ball is within this distance of its paddle center
    pub const AI_DEAD_ZONE: f32 = 10.0;

    /// First side to reach this score wins
    pub const WINNING_SCORE: u32 = 7;

    /// Countdown before play starts (3, 2, 1)
    pub const COUNTDOWN_STEPS: u8 = 3;
    /// One second per countdown step
    pub const COUNTDOWN_STEP_TICKS: u32 = SIM_HZ;
}

/// Clamp a paddle's top Y so the paddle stays on a board of the given height
#[inline]
pub fn clamp_paddle_y(y: f32, board_height: f32) -> f32 {
    y.clamp(0.0, (board_height - consts::PADDLE_HEIGHT).max(0.0))
}
