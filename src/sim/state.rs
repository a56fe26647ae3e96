//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in [`MatchState`], which is owned by
//! the game loop and passed explicitly to `tick`/`update`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clamp_paddle_y;
use crate::consts::*;

/// Which side of the board an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Mouse-controlled paddle on the left
    Player,
    /// AI-controlled paddle on the right
    Ai,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Idle,
    /// Counting down before play; the simulation is frozen
    Countdown {
        /// Number currently shown (3, 2, 1)
        remaining: u8,
        /// Ticks until `remaining` decrements
        ticks_left: u32,
    },
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// A side reached the winning score; terminal until restart
    GameOver { winner: Side },
}

impl GamePhase {
    /// Fresh countdown starting at [`COUNTDOWN_STEPS`]
    pub fn countdown() -> Self {
        GamePhase::Countdown {
            remaining: COUNTDOWN_STEPS,
            ticks_left: COUNTDOWN_STEP_TICKS,
        }
    }
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball struck a paddle
    PaddleHit(Side),
    /// A side scored a point
    Scored(Side),
    /// A side reached the winning score
    MatchWon(Side),
    /// Countdown advanced to a new number
    CountdownStep(u8),
    /// Countdown completed and play began
    CountdownFinished,
    /// Phase changed (start, pause, resume, restart)
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// Fixed board dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

impl Board {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Top Y that vertically centers a paddle
    pub fn centered_paddle_y(&self) -> f32 {
        clamp_paddle_y((self.height - PADDLE_HEIGHT) / 2.0, self.height)
    }
}

/// A paddle. Width, height and X are fixed; only Y moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Top edge
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side, board: &Board) -> Self {
        Self {
            side,
            y: board.centered_paddle_y(),
        }
    }

    /// Left edge X, derived from the side
    pub fn x(&self, board: &Board) -> f32 {
        match self.side {
            Side::Player => PADDLE_MARGIN,
            Side::Ai => board.width - PADDLE_WIDTH - PADDLE_MARGIN,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + PADDLE_HEIGHT
    }

    /// Set the top edge, clamped to the board
    pub fn set_y(&mut self, y: f32, board: &Board) {
        self.y = clamp_paddle_y(y, board.height);
    }

    /// Center the paddle on a pointer Y, clamped to the board
    pub fn center_on(&mut self, pointer_y: f32, board: &Board) {
        self.set_y(pointer_y - PADDLE_HEIGHT / 2.0, board);
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center position
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Ai => self.ai,
        }
    }

    /// Award a point and return the side's new total
    pub fn award(&mut self, side: Side) -> u32 {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Ai => &mut self.ai,
        };
        *slot += 1;
        *slot
    }
}

/// Complete match state (serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed the serve RNG was created from
    pub seed: u64,
    /// Serve randomization
    pub rng: Pcg32,
    pub board: Board,
    pub player: Paddle,
    pub ai: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub phase: GamePhase,
    /// Consecutive paddle hits since the last serve
    pub rally: u32,
    /// Ticks spent in Running
    pub time_ticks: u64,
    /// Events since the last drain (presentation only)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl MatchState {
    /// Create a match on the default board
    pub fn new(seed: u64) -> Self {
        Self::with_board(seed, Board::default())
    }

    /// Create a match with paddles centered and a freshly served ball
    pub fn with_board(seed: u64, board: Board) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            board,
            player: Paddle::new(Side::Player, &board),
            ai: Paddle::new(Side::Ai, &board),
            ball: Ball::new(board.center(), Vec2::ZERO),
            score: Score::default(),
            phase: GamePhase::Idle,
            rally: 0,
            time_ticks: 0,
            events: Vec::new(),
        };
        state.reset_ball();
        state
    }

    /// Put the ball back at the center with a random serve.
    ///
    /// Horizontal speed is always `BALL_SPEED` with a random sign; vertical
    /// speed is uniform in `[-BALL_SPEED, BALL_SPEED]`.
    pub fn reset_ball(&mut self) {
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let vy = self.rng.random_range(-BALL_SPEED..=BALL_SPEED);
        self.ball = Ball::new(self.board.center(), Vec2::new(BALL_SPEED * dir, vy));
        self.rally = 0;
    }

    /// Zero the scores, recenter paddles and serve a new ball.
    ///
    /// The phase is left to the caller.
    pub fn reset_match(&mut self) {
        self.score = Score::default();
        self.player = Paddle::new(Side::Player, &self.board);
        self.ai = Paddle::new(Side::Ai, &self.board);
        self.time_ticks = 0;
        self.reset_ball();
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Player => &self.player,
            Side::Ai => &self.ai,
        }
    }

    /// Change phase, recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.events.push(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}
