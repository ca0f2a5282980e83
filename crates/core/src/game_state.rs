//! Game state module - everything one session owns
//!
//! Ties together the board, the falling block, the fall timers, score and the
//! lifecycle phase. All mutation goes through [`crate::stepper`]; this module only
//! constructs the state and exposes read access for renderers.

use crate::block::Block;
use crate::board::Board3D;
use crate::config::{ConfigError, GameConfig, TimingConfig};
use crate::rng::SimpleRng;
use crate::snapshot::{BlockSnapshot, GameSnapshot};
use crate::types::Phase;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board3D,
    pub(crate) falling_block: Block,

    pub(crate) score: u32,
    /// Scoring multiplier input; the core never changes it
    pub(crate) level: u32,
    pub(crate) phase: Phase,
    /// Advisory flag for the run loop
    paused: bool,

    /// Fall interval in effect this frame
    pub(crate) block_current_speed: f32,
    /// Fall interval without acceleration; grows every ramp period
    pub(crate) block_current_normal_speed: f32,
    pub(crate) seconds_to_next_block_fall: f32,
    pub(crate) seconds_from_last_speed_inc: f32,
    pub(crate) total_time: f32,

    timing: TimingConfig,
    pub(crate) rng: SimpleRng,
}

impl GameState {
    /// Create a new game from validated configuration
    pub fn new(config: &GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.timing.validate()?;
        let board = Board3D::from_config(&config.board)?;
        Ok(Self::with_board(board, config.timing, seed))
    }

    /// Create a new game on an existing board (tests start from prepared boards)
    pub fn with_board(board: Board3D, timing: TimingConfig, seed: u32) -> Self {
        Self {
            board,
            falling_block: Block::default(),
            score: 0,
            level: 0,
            phase: Phase::Uninitialized,
            paused: false,
            block_current_speed: timing.init_fall_step_seconds,
            block_current_normal_speed: timing.init_fall_step_seconds,
            seconds_to_next_block_fall: timing.init_fall_step_seconds,
            seconds_from_last_speed_inc: timing.speed_inc_period_seconds,
            total_time: 0.0,
            timing,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn board(&self) -> &Board3D {
        &self.board
    }

    /// Mutable board access, for setting up scenarios
    pub fn board_mut(&mut self) -> &mut Board3D {
        &mut self.board
    }

    pub fn falling_block(&self) -> &Block {
        &self.falling_block
    }

    /// Replace the falling block, for setting up scenarios
    pub fn set_falling_block(&mut self, block: Block) {
        self.falling_block = block;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag. Returns the new value.
    pub fn toggle_paused(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn block_current_speed(&self) -> f32 {
        self.block_current_speed
    }

    pub fn block_current_normal_speed(&self) -> f32 {
        self.block_current_normal_speed
    }

    pub fn seconds_to_next_block_fall(&self) -> f32 {
        self.seconds_to_next_block_fall
    }

    pub fn seconds_from_last_speed_inc(&self) -> f32 {
        self.seconds_from_last_speed_inc
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.depth = self.board.depth();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.falling = BlockSnapshot::from(&self.falling_block);
        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.paused = self.paused;
        out.fall_step_seconds = self.block_current_speed;
        out.total_time = self.total_time;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_board(Board3D::default(), TimingConfig::default(), 1)
    }
}
