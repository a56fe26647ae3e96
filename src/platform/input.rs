//! Pointer and keyboard mapping
//!
//! Converts raw canvas/DOM input into simulation input. Kept free of web-sys
//! types so it can be tested natively.

use crate::sim::{Board, TickInput};

/// Converts pointer positions in canvas CSS pixels to board coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMapper {
    /// Canvas client (CSS) size
    pub client_size: (f32, f32),
    pub board: Board,
}

impl PointerMapper {
    pub fn new(client_width: f32, client_height: f32, board: Board) -> Self {
        Self {
            client_size: (client_width, client_height),
            board,
        }
    }

    pub fn set_client_size(&mut self, width: f32, height: f32) {
        self.client_size = (width, height);
    }

    /// Board Y for a pointer at canvas-local `offset_y`.
    ///
    /// Accounts for the letterbox the renderer adds when the canvas aspect
    /// differs from the board's. The paddle clamps the result, so no clamping
    /// happens here.
    pub fn to_board_y(&self, offset_y: f32) -> f32 {
        let (w, h) = self.client_size;
        if w <= 0.0 || h <= 0.0 {
            return offset_y;
        }
        let scale = (w / self.board.width).min(h / self.board.height);
        let drawn_height = self.board.height * scale;
        let top = (h - drawn_height) / 2.0;
        (offset_y - top) / scale
    }
}

/// Commands bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Start,
    Restart,
    TogglePause,
    ToggleMute,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        " " | "Enter" => Some(KeyCommand::Start),
        "r" | "R" => Some(KeyCommand::Restart),
        "p" | "P" | "Escape" => Some(KeyCommand::TogglePause),
        "m" | "M" => Some(KeyCommand::ToggleMute),
        _ => None,
    }
}

/// Record a simulation command in the pending tick input.
///
/// Returns false for commands the simulation does not handle (mute).
pub fn queue_command(input: &mut TickInput, command: KeyCommand) -> bool {
    match command {
        KeyCommand::Start => input.start = true,
        KeyCommand::Restart => input.restart = true,
        KeyCommand::TogglePause => input.pause = true,
        KeyCommand::ToggleMute => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_same_aspect() {
        let mapper = PointerMapper::new(800.0, 400.0, Board::new(800.0, 400.0));
        assert_eq!(mapper.to_board_y(0.0), 0.0);
        assert_eq!(mapper.to_board_y(200.0), 200.0);
    }

    #[test]
    fn test_pointer_scaled_canvas() {
        // CSS size is half the board
        let mapper = PointerMapper::new(400.0, 200.0, Board::new(800.0, 400.0));
        assert_eq!(mapper.to_board_y(100.0), 200.0);
    }

    #[test]
    fn test_pointer_letterboxed() {
        // Square canvas: board drawn 400x200 with 100px bars above and below
        let mapper = PointerMapper::new(400.0, 400.0, Board::new(800.0, 400.0));
        assert_eq!(mapper.to_board_y(100.0), 0.0);
        assert_eq!(mapper.to_board_y(200.0), 200.0);
        assert_eq!(mapper.to_board_y(300.0), 400.0);
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(key_command(" "), Some(KeyCommand::Start));
        assert_eq!(key_command("Enter"), Some(KeyCommand::Start));
        assert_eq!(key_command("R"), Some(KeyCommand::Restart));
        assert_eq!(key_command("Escape"), Some(KeyCommand::TogglePause));
        assert_eq!(key_command("p"), Some(KeyCommand::TogglePause));
        assert_eq!(key_command("m"), Some(KeyCommand::ToggleMute));
        assert_eq!(key_command("x"), None);
    }

    #[test]
    fn test_queue_command() {
        let mut input = TickInput::default();
        assert!(queue_command(&mut input, KeyCommand::TogglePause));
        assert!(input.pause && !input.start && !input.restart);
        assert!(!queue_command(&mut input, KeyCommand::ToggleMute));

        input.clear_one_shots();
        assert!(!input.pause);
    }
}
