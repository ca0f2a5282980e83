//! Stepper module - per-frame game update
//!
//! Free functions that drive a [`GameState`]:
//!
//! - [`process_game_update`]: called once per frame with elapsed time, the frame's
//!   input and the camera view direction
//! - [`single_step`]: one discrete transition of the phase machine
//!
//! # Phase machine
//!
//! ```text
//! Uninitialized ─► NewBlockCreation ─► BlockFalling ─► … ─► BlockMerge
//!                        ▲                                    │
//!                        └──────────── LayersErase ◄──────────┘
//! any falling phase with an illegal resting block ─► Lost (terminal)
//! ```
//!
//! # View-relative controls
//!
//! "Away", "towards" and the horizontal rotation direction are resolved against
//! the camera. A camera looking mostly along Z moves and tips the block along Z,
//! otherwise along X. See [`resolve_command`].

use glam::{IVec3, Vec3};

use crate::block::Block;
use crate::game_state::GameState;
use crate::scoring::calculate_game_score;
use crate::types::{AxisRotation, Command, FrameInput, Phase, SPAWN_OVERSHOOT_Y};

/// Concrete block transform a command resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMove {
    Rotate(AxisRotation),
    Translate(IVec3),
}

/// What one call to [`process_game_update`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// A discrete step ran this frame
    pub stepped: bool,
    /// Layers removed by the end-of-frame erase
    pub layers_erased: u32,
    pub points: u32,
}

/// True when the camera's horizontal heading is closer to the Z axis than to X.
///
/// A view with no horizontal component normalizes to NaN, the comparison fails
/// and the camera counts as X-facing.
pub fn is_z_facing(view: Vec3) -> bool {
    let horizontal = Vec3::new(view.x, 0.0, view.z).normalize();
    Vec3::X.dot(horizontal).abs() < std::f32::consts::FRAC_PI_4.cos()
}

/// Map a block command to the transform it means for this view direction.
///
/// Returns None for commands that do not touch the block.
pub fn resolve_command(cmd: Command, view: Vec3) -> Option<BlockMove> {
    let z_facing = is_z_facing(view);
    let block_move = match cmd {
        Command::HorizontalRotateClockwise => BlockMove::Rotate(if view.y < 0.0 {
            AxisRotation::YClockwise
        } else {
            AxisRotation::YCounterClockwise
        }),
        Command::HorizontalRotateCounterClockwise => BlockMove::Rotate(if view.y < 0.0 {
            AxisRotation::YCounterClockwise
        } else {
            AxisRotation::YClockwise
        }),
        Command::VerticalRotateAway => BlockMove::Rotate(match z_facing {
            true if view.z < 0.0 => AxisRotation::XClockwise,
            true => AxisRotation::XCounterClockwise,
            false if view.x < 0.0 => AxisRotation::ZCounterClockwise,
            false => AxisRotation::ZClockwise,
        }),
        Command::VerticalRotateTowards => BlockMove::Rotate(match z_facing {
            true if view.z > 0.0 => AxisRotation::XClockwise,
            true => AxisRotation::XCounterClockwise,
            false if view.x > 0.0 => AxisRotation::ZCounterClockwise,
            false => AxisRotation::ZClockwise,
        }),
        Command::MoveAway => BlockMove::Translate(match z_facing {
            true if view.z < 0.0 => IVec3::NEG_Z,
            true => IVec3::Z,
            false if view.x < 0.0 => IVec3::NEG_X,
            false => IVec3::X,
        }),
        Command::MoveTowards => BlockMove::Translate(match z_facing {
            true if view.z > 0.0 => IVec3::NEG_Z,
            true => IVec3::Z,
            false if view.x > 0.0 => IVec3::NEG_X,
            false => IVec3::X,
        }),
        _ => return None,
    };
    Some(block_move)
}

/// Apply a resolved transform to the falling block. Returns whether it moved.
pub fn apply_block_move(state: &mut GameState, block_move: BlockMove) -> bool {
    let board = &state.board;
    match block_move {
        BlockMove::Rotate(rotation) => state.falling_block.try_rotate_with_fix(board, rotation),
        BlockMove::Translate(delta) => state.falling_block.try_translate(board, delta),
    }
}

/// Advance the game by one frame.
///
/// Applies this frame's block commands, runs at most one discrete step when the
/// fall countdown expires, ramps the fall interval, then erases any filled
/// layers and scores them.
pub fn process_game_update(
    state: &mut GameState,
    elapsed_seconds: f32,
    input: &FrameInput,
    view_direction: Vec3,
) -> FrameOutcome {
    let mut outcome = FrameOutcome::default();

    for cmd in Command::BLOCK_COMMANDS {
        if input.is_pressed(cmd) {
            if let Some(block_move) = resolve_command(cmd, view_direction) {
                apply_block_move(state, block_move);
            }
        }
    }

    if input.is_down(Command::Accelerate) {
        state.block_current_speed = state.timing().max_fall_step_seconds;
        state.seconds_to_next_block_fall = state
            .seconds_to_next_block_fall
            .min(state.block_current_speed);
    } else {
        state.block_current_speed = state.block_current_normal_speed;
    }

    state.seconds_to_next_block_fall -= elapsed_seconds;
    state.seconds_from_last_speed_inc -= elapsed_seconds;

    if state.seconds_to_next_block_fall < 0.0 {
        single_step(state);
        outcome.stepped = true;

        if state.phase == Phase::BlockFalling {
            state.seconds_to_next_block_fall = state.block_current_speed;
        }
    }

    if state.seconds_from_last_speed_inc < 0.0 {
        let timing = *state.timing();
        state.block_current_normal_speed +=
            timing.speed_inc_multiplier * state.block_current_normal_speed;
        state.seconds_from_last_speed_inc = timing.speed_inc_period_seconds;
        log::debug!(
            "fall interval ramped to {:.3}s",
            state.block_current_normal_speed
        );
    }

    state.total_time += elapsed_seconds;

    let erased = state.board.erase_filled_layers();
    if erased > 0 {
        outcome.layers_erased = erased;
        outcome.points = calculate_game_score(erased, state.level);
        state.score = state.score.saturating_add(outcome.points);
        log::info!(
            "cleared {erased} layer(s) for {} points, score {}",
            outcome.points,
            state.score
        );
    }

    outcome
}

/// Run one discrete transition of the phase machine.
pub fn single_step(state: &mut GameState) {
    match state.phase {
        Phase::Lost => return,
        Phase::Uninitialized => {
            spawn_block(state);
            return;
        }
        Phase::BlockMerge => {
            let erased = state.board.erase_filled_layers();
            if erased > 0 {
                log::info!("merge completed {erased} layer(s)");
                set_phase(state, Phase::LayersErase);
                return;
            }
        }
        _ => {}
    }

    if matches!(state.phase, Phase::BlockMerge | Phase::LayersErase) {
        spawn_block(state);
        return;
    }

    if can_falling_block_fall(state) {
        state.falling_block.translate(IVec3::NEG_Y);
        set_phase(state, Phase::BlockFalling);
    } else if state.falling_block.is_valid(&state.board) {
        merge_falling_block(state);
        set_phase(state, Phase::BlockMerge);
    } else {
        log::info!(
            "game over at {:.1}s with score {}",
            state.total_time,
            state.score
        );
        set_phase(state, Phase::Lost);
    }
}

fn spawn_block(state: &mut GameState) {
    state.falling_block = Block::create_random(&state.board, &mut state.rng);
    log::debug!(
        "spawned {} at {}",
        state.falling_block.kind.as_str(),
        state.falling_block.position
    );
    set_phase(state, Phase::NewBlockCreation);
}

fn set_phase(state: &mut GameState, phase: Phase) {
    if state.phase != phase {
        log::trace!("phase {} -> {}", state.phase.as_str(), phase.as_str());
    }
    state.phase = phase;
}

/// Check whether every cube of the falling block can move down one layer.
///
/// Targets at or above [`SPAWN_OVERSHOOT_Y`] are ignored, as are targets between
/// the ceiling and that limit. Targets below the floor, outside the X/Z bounds or
/// on a settled cube block the fall.
pub fn can_falling_block_fall(state: &GameState) -> bool {
    let board = &state.board;
    state.falling_block.cubes().all(|cube| {
        let target = cube - IVec3::Y;
        if target.y >= SPAWN_OVERSHOOT_Y || target.y >= board.height() as i32 {
            return true;
        }
        target.y >= 0 && board.contains(target) && board.is_empty(target)
    })
}

/// Copy the falling block's cubes into the board with its packed color.
pub fn merge_falling_block(state: &mut GameState) {
    let value = state.falling_block.color.pack();
    for cube in state.falling_block.cubes() {
        state.board.fill(cube, value);
    }
}
