//! Three-dimensional falling-block puzzle game (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package
//! re-exports them as `tetris3d::{core,input,term,types}` and adds the TOML
//! [`settings`] shared by the binary and the tests.

pub mod settings;

pub use tetris3d_core as core;
pub use tetris3d_input as input;
pub use tetris3d_term as term;
pub use tetris3d_types as types;
