//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Command`]s and keeps the per-frame held/pressed
//! state the game core consumes, including on terminals without key-release
//! events.

pub mod map;
pub mod state;

pub use tetris3d_types as types;

pub use map::{key_label, parse_key, should_quit, KeyBindingError, KeyBindings, KeyMap};
pub use state::InputState;
