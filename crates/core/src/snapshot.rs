//! Owned, serializable view of a game
//!
//! Renderers can read [`GameState`](crate::GameState) directly; snapshots are for
//! consumers that need to keep or ship the state (headless runs, logs, tests).

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::types::{BlockType, ColorRgb, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub kind: BlockType,
    pub position: [i32; 3],
    /// Cube offsets relative to `position`
    pub offsets: Vec<[i32; 3]>,
    /// Absolute cube positions
    pub cubes: Vec<[i32; 3]>,
    pub color: ColorRgb,
}

impl From<&Block> for BlockSnapshot {
    fn from(value: &Block) -> Self {
        Self {
            kind: value.kind,
            position: value.position.to_array(),
            offsets: value.cube_offsets.iter().map(|o| o.to_array()).collect(),
            cubes: value.cubes().map(|pos| pos.to_array()).collect(),
            color: value.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
    /// Board cells in storage order, packed RGB or 0
    pub cells: Vec<u32>,
    pub falling: BlockSnapshot,
    pub phase: Phase,
    pub score: u32,
    pub level: u32,
    pub paused: bool,
    pub fall_step_seconds: f32,
    pub total_time: f32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.depth = 0;
        self.height = 0;
        self.cells.clear();
        self.falling = BlockSnapshot::default();
        self.phase = Phase::Uninitialized;
        self.score = 0;
        self.level = 0;
        self.paused = false;
        self.fall_step_seconds = 0.0;
        self.total_time = 0.0;
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }
}
