//! Platform abstraction layer
//!
//! Handles browser input mapping: pointer position to board space and key
//! bindings to commands.

pub mod input;

pub use input::{KeyCommand, PointerMapper, key_command, queue_command};
