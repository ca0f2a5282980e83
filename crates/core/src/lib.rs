//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on terminals, cameras, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Scenarios are set up by filling boards and placing blocks directly
//! - **Portable**: Runs in a terminal, headless, or under a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: `width × depth × height` cube grid with layer clearing
//! - [`block`]: The seven shapes, axis rotations and wall-kick correction
//! - [`config`]: Board geometry and fall timing, with validation
//! - [`game_state`]: Complete game state including falling block, timers, score
//! - [`stepper`]: Per-frame update and the phase machine
//! - [`rng`]: Seeded LCG for block shapes and colors
//! - [`scoring`]: Points per cleared layers
//! - [`snapshot`]: Owned, serializable copies of a game
//!
//! # Game Rules
//!
//! - A random block spawns centered at the ceiling and falls one layer per step
//! - Blocks move and rotate relative to the camera; rotations shift off walls
//! - A block that cannot fall is merged into the board
//! - Completely filled horizontal layers are erased and score points
//! - The game is lost when a block comes to rest in an illegal placement
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use tetris3d_core::{process_game_update, GameConfig, GameState, Phase};
//! use tetris3d_types::{Command, FrameInput};
//!
//! let mut game = GameState::new(&GameConfig::default(), 12345).unwrap();
//! let view = Vec3::new(-1.0, -0.5, -1.0);
//!
//! // The first expired countdown spawns a block
//! process_game_update(&mut game, 1.0, &FrameInput::new(), view);
//! assert_eq!(game.phase(), Phase::NewBlockCreation);
//!
//! // Commands are edge-triggered
//! let input = FrameInput::new().with_pressed(Command::MoveTowards);
//! process_game_update(&mut game, 0.016, &input, view);
//! ```
//!
//! # Timing
//!
//! Call [`process_game_update`] every frame with elapsed seconds. At most one
//! discrete step runs per call; holding accelerate switches to the fastest fall
//! interval, and the normal interval is scaled every ramp period.

pub mod block;
pub mod board;
pub mod config;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stepper;

pub use tetris3d_types as types;

// Re-export commonly used types for convenience
pub use block::{shape_offsets, Block, CubeOffsets};
pub use board::Board3D;
pub use config::{BoardConfig, ConfigError, GameConfig, TimingConfig};
pub use game_state::GameState;
pub use rng::SimpleRng;
pub use scoring::calculate_game_score;
pub use snapshot::{BlockSnapshot, GameSnapshot};
pub use stepper::{
    apply_block_move, can_falling_block_fall, is_z_facing, merge_falling_block,
    process_game_update, resolve_command, single_step, BlockMove, FrameOutcome,
};
pub use types::{AxisRotation, BlockType, ColorRgb, Phase};
