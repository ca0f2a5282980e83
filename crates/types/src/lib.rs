//! Core types module - shared data structures and constants
//!
//! Pure data types used by the game core, the input layer and the terminal
//! renderer. Nothing here knows about boards, timers or terminals.
//!
//! # Board Dimensions
//!
//! The playfield is a `width × depth × height` grid of unit cubes:
//!
//! - **Width** (X): 10 cells
//! - **Depth** (Z): 10 cells
//! - **Height** (Y): 22 layers, layer 0 at the bottom
//!
//! # Timing Constants
//!
//! Fall timing is expressed in seconds per one-cell step:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BLOCK_INIT_FALL_STEP_SECONDS` | 0.5 | Interval at game start |
//! | `BLOCK_MAX_FALL_STEP_SECONDS` | 0.04 | Interval while accelerating |
//! | `BLOCK_SPEED_INC_MULTIPLIER` | 0.02 | Growth applied every ramp period |
//! | `BLOCK_SPEED_INC_PERIOD_SECONDS` | 10 | Ramp period |
//!
//! # Examples
//!
//! ```
//! use tetris3d_types::{BlockType, ColorRgb, Command, FrameInput};
//!
//! assert_eq!(BlockType::from_str("t"), Some(BlockType::TShape));
//! assert_eq!(ColorRgb::new(0x12, 0x34, 0x56).pack(), 0x123456);
//!
//! let input = FrameInput::new().with_pressed(Command::MoveAway);
//! assert!(input.is_pressed(Command::MoveAway));
//! assert!(input.is_down(Command::MoveAway));
//! ```

use serde::{Deserialize, Serialize};

/// Board width (X) in cells
pub const BOARD_WIDTH: u32 = 10;

/// Board depth (Z) in cells
pub const BOARD_DEPTH: u32 = 10;

/// Board height (Y) in layers
pub const BOARD_HEIGHT: u32 = 22;

/// Seconds per fall step when a game starts
pub const BLOCK_INIT_FALL_STEP_SECONDS: f32 = 1.0 / 2.0;

/// Seconds per fall step while the accelerate command is held
pub const BLOCK_MAX_FALL_STEP_SECONDS: f32 = 1.0 / 25.0;

/// Multiplier applied to the normal fall interval every ramp period
pub const BLOCK_SPEED_INC_MULTIPLIER: f32 = 0.02;

/// Seconds between two fall-interval ramps
pub const BLOCK_SPEED_INC_PERIOD_SECONDS: f32 = 10.0;

/// Cubes whose fall target is at or above this layer never block a fall.
///
/// Spawning can push a block above the ceiling; boards must stay below this.
pub const SPAWN_OVERSHOOT_Y: i32 = 50;

/// Rounds of lateral shifting tried when fixing a rotated block
pub const FIX_ATTEMPTS: usize = 3;

/// Frame interval of the terminal run loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Camera orbit step per key press, in degrees
pub const CAMERA_ROTATION_STEP_DEGREES: f32 = 45.0;

/// Layer clear scoring (index = layers cleared at once)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven block shapes, plus the sentinel used before the first spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockType {
    IShape,
    LShape,
    JShape,
    OShape,
    SShape,
    TShape,
    ZShape,
    #[default]
    Undefined,
}

impl BlockType {
    /// Every playable shape, in declaration order
    pub const ALL: [BlockType; 7] = [
        BlockType::IShape,
        BlockType::LShape,
        BlockType::JShape,
        BlockType::OShape,
        BlockType::SShape,
        BlockType::TShape,
        BlockType::ZShape,
    ];

    /// Parse block type from its one-letter name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(BlockType::IShape),
            "l" => Some(BlockType::LShape),
            "j" => Some(BlockType::JShape),
            "o" => Some(BlockType::OShape),
            "s" => Some(BlockType::SShape),
            "t" => Some(BlockType::TShape),
            "z" => Some(BlockType::ZShape),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::IShape => "i",
            BlockType::LShape => "l",
            BlockType::JShape => "j",
            BlockType::OShape => "o",
            BlockType::SShape => "s",
            BlockType::TShape => "t",
            BlockType::ZShape => "z",
            BlockType::Undefined => "undefined",
        }
    }

    /// Number of unit cubes making up the shape
    pub fn cube_count(&self) -> usize {
        match self {
            BlockType::OShape => 8,
            BlockType::Undefined => 0,
            _ => 4,
        }
    }
}

/// Stage of the single-block lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Uninitialized,
    NewBlockCreation,
    BlockFalling,
    BlockMerge,
    LayersErase,
    /// Terminal: the game is over.
    Lost,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::NewBlockCreation => "newBlockCreation",
            Phase::BlockFalling => "blockFalling",
            Phase::BlockMerge => "blockMerge",
            Phase::LayersErase => "layersErase",
            Phase::Lost => "lost",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Lost)
    }
}

/// Quarter-turn rotation about one world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisRotation {
    XClockwise,
    XCounterClockwise,
    YClockwise,
    YCounterClockwise,
    ZClockwise,
    ZCounterClockwise,
}

impl AxisRotation {
    pub const ALL: [AxisRotation; 6] = [
        AxisRotation::XClockwise,
        AxisRotation::XCounterClockwise,
        AxisRotation::YClockwise,
        AxisRotation::YCounterClockwise,
        AxisRotation::ZClockwise,
        AxisRotation::ZCounterClockwise,
    ];

    /// The rotation that undoes this one
    pub fn inverse(&self) -> Self {
        match self {
            AxisRotation::XClockwise => AxisRotation::XCounterClockwise,
            AxisRotation::XCounterClockwise => AxisRotation::XClockwise,
            AxisRotation::YClockwise => AxisRotation::YCounterClockwise,
            AxisRotation::YCounterClockwise => AxisRotation::YClockwise,
            AxisRotation::ZClockwise => AxisRotation::ZCounterClockwise,
            AxisRotation::ZCounterClockwise => AxisRotation::ZClockwise,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisRotation::XClockwise => "xCw",
            AxisRotation::XCounterClockwise => "xCcw",
            AxisRotation::YClockwise => "yCw",
            AxisRotation::YCounterClockwise => "yCcw",
            AxisRotation::ZClockwise => "zCw",
            AxisRotation::ZCounterClockwise => "zCcw",
        }
    }
}

/// 24-bit block color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorRgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into the board's cell representation (`0xRRGGBB`)
    pub fn pack(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn from_packed(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Logical player commands, independent of any key layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    HorizontalRotateClockwise,
    HorizontalRotateCounterClockwise,
    VerticalRotateAway,
    VerticalRotateTowards,
    MoveAway,
    MoveTowards,
    Accelerate,
    CameraLeft,
    CameraRight,
    CameraUp,
    CameraDown,
    Pause,
    Quit,
}

impl Command {
    pub const COUNT: usize = 13;

    pub const ALL: [Command; Command::COUNT] = [
        Command::HorizontalRotateClockwise,
        Command::HorizontalRotateCounterClockwise,
        Command::VerticalRotateAway,
        Command::VerticalRotateTowards,
        Command::MoveAway,
        Command::MoveTowards,
        Command::Accelerate,
        Command::CameraLeft,
        Command::CameraRight,
        Command::CameraUp,
        Command::CameraDown,
        Command::Pause,
        Command::Quit,
    ];

    /// The six edge-triggered commands that move or rotate the falling block,
    /// in the order they are applied within a frame
    pub const BLOCK_COMMANDS: [Command; 6] = [
        Command::HorizontalRotateClockwise,
        Command::HorizontalRotateCounterClockwise,
        Command::VerticalRotateAway,
        Command::VerticalRotateTowards,
        Command::MoveAway,
        Command::MoveTowards,
    ];

    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    #[inline]
    fn bit(&self) -> u16 {
        1 << (*self as u16)
    }

    /// Parse command from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        Command::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.as_str().to_lowercase() == lower)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::HorizontalRotateClockwise => "horizontalRotateClockwise",
            Command::HorizontalRotateCounterClockwise => "horizontalRotateCounterClockwise",
            Command::VerticalRotateAway => "verticalRotateAway",
            Command::VerticalRotateTowards => "verticalRotateTowards",
            Command::MoveAway => "moveAway",
            Command::MoveTowards => "moveTowards",
            Command::Accelerate => "accelerate",
            Command::CameraLeft => "cameraLeft",
            Command::CameraRight => "cameraRight",
            Command::CameraUp => "cameraUp",
            Command::CameraDown => "cameraDown",
            Command::Pause => "pause",
            Command::Quit => "quit",
        }
    }
}

/// Per-frame input snapshot handed to the game core.
///
/// `pressed` holds commands whose key went down this frame, `down` holds every
/// command whose key is currently held. A pressed command is always down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FrameInput {
    pressed: u16,
    down: u16,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw bitsets (bit `n` = `Command::ALL[n]`)
    pub fn from_bits(pressed: u16, down: u16) -> Self {
        Self {
            pressed,
            down: down | pressed,
        }
    }

    pub fn with_pressed(mut self, cmd: Command) -> Self {
        self.pressed |= cmd.bit();
        self.down |= cmd.bit();
        self
    }

    pub fn with_held(mut self, cmd: Command) -> Self {
        self.down |= cmd.bit();
        self
    }

    pub fn is_pressed(&self, cmd: Command) -> bool {
        self.pressed & cmd.bit() != 0
    }

    pub fn is_down(&self, cmd: Command) -> bool {
        self.down & cmd.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.down == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_constants() {
        assert_eq!(BLOCK_INIT_FALL_STEP_SECONDS, 0.5);
        assert_eq!(BLOCK_MAX_FALL_STEP_SECONDS, 0.04);
        assert_eq!(BLOCK_SPEED_INC_MULTIPLIER, 0.02);
        assert_eq!(BLOCK_SPEED_INC_PERIOD_SECONDS, 10.0);
        assert!((BOARD_HEIGHT as i32) < SPAWN_OVERSHOOT_Y);
    }

    #[test]
    fn block_type_round_trips_through_str() {
        for kind in BlockType::ALL {
            assert_eq!(BlockType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(BlockType::from_str("undefined"), None);
        assert!(!BlockType::ALL.contains(&BlockType::Undefined));
    }

    #[test]
    fn only_lost_is_terminal() {
        assert!(Phase::Lost.is_terminal());
        assert!(!Phase::LayersErase.is_terminal());
        assert!(!Phase::Uninitialized.is_terminal());
    }

    #[test]
    fn cube_counts() {
        assert_eq!(BlockType::OShape.cube_count(), 8);
        assert_eq!(BlockType::IShape.cube_count(), 4);
        assert_eq!(BlockType::Undefined.cube_count(), 0);
    }

    #[test]
    fn axis_rotation_inverse_is_involution() {
        for rotation in AxisRotation::ALL {
            assert_ne!(rotation.inverse(), rotation);
            assert_eq!(rotation.inverse().inverse(), rotation);
        }
    }

    #[test]
    fn color_packing() {
        let color = ColorRgb::new(0xab, 0x01, 0xff);
        assert_eq!(color.pack(), 0xab01ff);
        assert_eq!(ColorRgb::from_packed(0xab01ff), color);
        assert!(ColorRgb::default().is_black());
        assert!(!color.is_black());
    }

    #[test]
    fn command_indices_match_all_table() {
        for (i, cmd) in Command::ALL.iter().enumerate() {
            assert_eq!(cmd.index(), i);
            assert_eq!(Command::from_str(cmd.as_str()), Some(*cmd));
        }
        assert_eq!(Command::from_str("MOVEAWAY"), Some(Command::MoveAway));
        assert_eq!(Command::from_str("jump"), None);
    }

    #[test]
    fn frame_input_pressed_implies_down() {
        let input = FrameInput::new()
            .with_pressed(Command::VerticalRotateAway)
            .with_held(Command::Accelerate);

        assert!(input.is_pressed(Command::VerticalRotateAway));
        assert!(input.is_down(Command::VerticalRotateAway));
        assert!(input.is_down(Command::Accelerate));
        assert!(!input.is_pressed(Command::Accelerate));
        assert!(!input.is_down(Command::MoveAway));

        let raw = FrameInput::from_bits(1, 0);
        assert!(raw.is_down(Command::HorizontalRotateClockwise));
        assert!(FrameInput::new().is_empty());
    }
}
