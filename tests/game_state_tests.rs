//! Game state tests - phase progression, merging, loss and snapshots

use glam::{IVec3, Vec3};
use tetris3d::core::{
    process_game_update, Block, Board3D, GameConfig, GameSnapshot, GameState, TimingConfig,
};
use tetris3d::types::{BlockType, ColorRgb, FrameInput, Phase};

const VIEW: Vec3 = Vec3::new(0.0, -0.5, -1.0);
const BLUE: ColorRgb = ColorRgb::new(0, 0, 255);

/// Advance past the first countdown so a block exists
fn spawned(mut state: GameState) -> GameState {
    process_game_update(&mut state, 1.0, &FrameInput::new(), VIEW);
    assert_eq!(state.phase(), Phase::NewBlockCreation);
    state
}

fn step(state: &mut GameState) {
    let outcome = process_game_update(state, 0.6, &FrameInput::new(), VIEW);
    assert!(outcome.stepped);
}

#[test]
fn test_new_game_starts_uninitialized() {
    let state = GameState::new(&GameConfig::default(), 42).unwrap();
    assert_eq!(state.phase(), Phase::Uninitialized);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 0);
    assert!(!state.paused());
    assert_eq!(state.falling_block().kind, BlockType::Undefined);
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.block_current_speed(), 0.5);
    assert_eq!(state.seconds_to_next_block_fall(), 0.5);
    assert_eq!(state.seconds_from_last_speed_inc(), 10.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = GameConfig::default();
    config.timing.init_fall_step_seconds = 0.0;
    assert!(GameState::new(&config, 1).is_err());

    let mut config = GameConfig::default();
    config.board.height = 0;
    assert!(GameState::new(&config, 1).is_err());
}

#[test]
fn test_no_step_before_countdown_expires() {
    let mut state = GameState::default();
    let outcome = process_game_update(&mut state, 0.25, &FrameInput::new(), VIEW);
    assert!(!outcome.stepped);
    assert_eq!(state.phase(), Phase::Uninitialized);
    assert_eq!(state.seconds_to_next_block_fall(), 0.25);
}

#[test]
fn test_block_falls_to_floor_then_merges() {
    let mut state = spawned(GameState::new(&GameConfig::default(), 7).unwrap());
    let block = Block::create(BlockType::IShape, BLUE, state.board());
    assert_eq!(block.position.y, 21);
    state.set_falling_block(block);

    for expected_y in (0..21).rev() {
        step(&mut state);
        assert_eq!(state.phase(), Phase::BlockFalling);
        assert_eq!(state.falling_block().position.y, expected_y);
    }

    step(&mut state);
    assert_eq!(state.phase(), Phase::BlockMerge);
    assert_eq!(state.board().occupied_count(), 4);
    for x in 3..=6 {
        assert_eq!(state.board().get(IVec3::new(x, 0, 5)), Some(BLUE.pack()));
    }

    step(&mut state);
    assert_eq!(state.phase(), Phase::NewBlockCreation);
    assert_ne!(state.falling_block().kind, BlockType::Undefined);
    assert!(state.falling_block().position.y >= 20);
}

#[test]
fn test_one_step_per_update() {
    let mut state = spawned(GameState::default());
    let y = state.falling_block().position.y;
    // A long frame still moves the block only one layer
    process_game_update(&mut state, 5.0, &FrameInput::new(), VIEW);
    assert_eq!(state.falling_block().position.y, y - 1);
}

#[test]
fn test_blocked_spawn_is_lost_and_stays_lost() {
    let mut board = Board3D::default();
    for y in 0..22 {
        for x in 0..10 {
            for z in 0..10 {
                // One hole per layer keeps every layer unfinished
                if (x, z) != (0, 0) {
                    board.fill(IVec3::new(x, y, z), 1);
                }
            }
        }
    }
    let mut state = spawned(GameState::with_board(board, TimingConfig::default(), 3));
    assert!(!state.falling_block().is_colliding_with_other_blocks(state.board()));
    assert!(!state.falling_block().is_valid(state.board()));

    process_game_update(&mut state, 0.016, &FrameInput::new(), VIEW);
    assert_eq!(state.phase(), Phase::Lost);
    assert!(state.game_over());

    let block = state.falling_block().clone();
    let occupied = state.board().occupied_count();
    for _ in 0..10 {
        process_game_update(&mut state, 1.0, &FrameInput::new(), VIEW);
    }
    assert_eq!(state.phase(), Phase::Lost);
    assert_eq!(state.falling_block(), &block);
    assert_eq!(state.board().occupied_count(), occupied);
}

#[test]
fn test_snapshot_reflects_state() {
    let mut state = spawned(GameState::default());
    state.set_paused(true);
    let snap = state.snapshot();

    assert_eq!(snap.width, 10);
    assert_eq!(snap.height, 22);
    assert_eq!(snap.cells.len(), 10 * 10 * 22);
    assert_eq!(snap.phase, Phase::NewBlockCreation);
    assert!(snap.paused);
    assert!(!snap.game_over());
    assert_eq!(snap.falling.kind, state.falling_block().kind);
    assert_eq!(snap.falling.cubes.len(), state.falling_block().kind.cube_count());
    let block = state.falling_block();
    for ((offset, cube), expected) in snap
        .falling
        .offsets
        .iter()
        .zip(&snap.falling.cubes)
        .zip(&block.cube_offsets)
    {
        assert_eq!(*offset, expected.to_array());
        assert_eq!(*cube, (block.position + *expected).to_array());
    }
    assert_eq!(snap.falling.offsets.len(), block.cube_offsets.len());
    assert_eq!(
        snap.falling.position,
        state.falling_block().position.to_array()
    );

    let json = serde_json::to_string(&snap).unwrap();
    let parsed: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snap);
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let state = spawned(GameState::default());
    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    let capacity = snap.cells.capacity();
    state.snapshot_into(&mut snap);
    assert_eq!(snap.cells.capacity(), capacity);
    assert_eq!(snap, state.snapshot());

    snap.clear();
    assert!(snap.cells.is_empty());
    assert_eq!(snap.phase, Phase::Uninitialized);
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut state = GameState::new(&GameConfig::default(), seed).unwrap();
        for _ in 0..600 {
            process_game_update(&mut state, 0.1, &FrameInput::new(), VIEW);
        }
        state.snapshot()
    };
    assert_eq!(run(11), run(11));
}
