//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and instead renders into a simple framebuffer that
//! can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Show a 3D board readably with two orthographic panels
//! - Put the backend behind the [`Renderer`] trait so the run loop does not care

pub mod camera;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_types as types;

pub use camera::{OrbitCamera, OrbitCameraController};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{Facing, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, OffscreenRenderer, Renderer, TerminalRenderer};
