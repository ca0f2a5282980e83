//! Block tests - shapes, spawning, rotations and wall kicks

use std::collections::HashSet;

use glam::IVec3;
use tetris3d::core::{shape_offsets, Block, Board3D, SimpleRng};
use tetris3d::types::{AxisRotation, BlockType, ColorRgb};

const GREEN: ColorRgb = ColorRgb::new(0, 200, 0);

fn vertical_i(board: &Board3D, position: IVec3) -> Block {
    let mut block = Block::create(BlockType::IShape, GREEN, board);
    block.cube_offsets = [(0, 0, 0), (0, -1, 0), (0, -2, 0), (0, 1, 0)]
        .into_iter()
        .map(|(x, y, z)| IVec3::new(x, y, z))
        .collect();
    block.position = position;
    block
}

#[test]
fn test_shape_table() {
    let expected: [(BlockType, &[(i32, i32, i32)]); 7] = [
        (BlockType::IShape, &[(0, 0, 0), (-1, 0, 0), (-2, 0, 0), (1, 0, 0)]),
        (BlockType::LShape, &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (1, 1, 0)]),
        (BlockType::JShape, &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (-1, 1, 0)]),
        (
            BlockType::OShape,
            &[
                (0, 0, 0),
                (0, 1, 0),
                (-1, 0, 0),
                (-1, 1, 0),
                (0, 0, 1),
                (0, 1, 1),
                (-1, 0, 1),
                (-1, 1, 1),
            ],
        ),
        (BlockType::SShape, &[(0, 0, 0), (-1, 0, 0), (0, 1, 0), (1, 1, 0)]),
        (BlockType::TShape, &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (0, 1, 0)]),
        (BlockType::ZShape, &[(0, 0, 0), (0, 1, 0), (-1, 1, 0), (1, 0, 0)]),
    ];

    for (kind, offsets) in expected {
        let actual: Vec<IVec3> = shape_offsets(kind).into_iter().collect();
        let wanted: Vec<IVec3> = offsets
            .iter()
            .map(|&(x, y, z)| IVec3::new(x, y, z))
            .collect();
        assert_eq!(actual, wanted, "{kind:?}");
    }
    assert!(shape_offsets(BlockType::Undefined).is_empty());
}

#[test]
fn test_spawn_positions_on_empty_board() {
    let board = Board3D::default();
    for kind in BlockType::ALL {
        let block = Block::create(kind, GREEN, &board);
        let bias = if kind == BlockType::IShape { 1 } else { 2 };
        assert_eq!(block.position, IVec3::new(5, 22 - bias, 5), "{kind:?}");
        assert!(block.is_valid(&board), "{kind:?}");
    }
}

#[test]
fn test_spawn_escapes_settled_cubes() {
    let mut board = Board3D::default();
    for y in 15..22 {
        board.fill(IVec3::new(5, y, 5), 1);
    }
    let block = Block::create(BlockType::TShape, GREEN, &board);
    assert!(!block.is_colliding_with_other_blocks(&board));
    // Lifted until the origin cube clears the ceiling
    assert_eq!(block.position, IVec3::new(5, 22, 5));
    assert!(!block.is_valid(&board));
}

#[test]
fn test_create_random_covers_every_shape() {
    let board = Board3D::default();
    let mut rng = SimpleRng::new(2024);
    let mut kinds = HashSet::new();
    for _ in 0..500 {
        let block = Block::create_random(&board, &mut rng);
        assert_ne!(block.kind, BlockType::Undefined);
        assert!(!block.color.is_black());
        assert_eq!(block.cube_offsets.len(), block.kind.cube_count());
        kinds.insert(block.kind);
    }
    assert_eq!(kinds.len(), 7);
}

#[test]
fn test_create_random_same_seed_same_blocks() {
    let board = Board3D::default();
    let mut a = SimpleRng::new(99);
    let mut b = SimpleRng::new(99);
    for _ in 0..20 {
        assert_eq!(
            Block::create_random(&board, &mut a),
            Block::create_random(&board, &mut b)
        );
    }
}

#[test]
fn test_four_quarter_turns_restore_every_shape() {
    let board = Board3D::default();
    for kind in BlockType::ALL {
        for rotation in AxisRotation::ALL {
            let mut block = Block::create(kind, GREEN, &board);
            let original = block.cube_offsets.clone();
            for _ in 0..4 {
                block.rotate(rotation);
            }
            assert_eq!(block.cube_offsets, original, "{kind:?} {rotation:?}");
        }
    }
}

#[test]
fn test_rotation_then_inverse_is_identity() {
    let board = Board3D::default();
    let mut block = Block::create(BlockType::LShape, GREEN, &board);
    let original = block.clone();
    for rotation in AxisRotation::ALL {
        block.rotate(rotation);
        block.rotate(rotation.inverse());
        assert_eq!(block, original, "{rotation:?}");
    }
}

#[test]
fn test_o_shape_ignores_rotation() {
    let board = Board3D::default();
    let mut block = Block::create(BlockType::OShape, GREEN, &board);
    let original = block.clone();
    block.rotate_x_clockwise();
    block.rotate_y_counter_clockwise();
    block.rotate_z_clockwise();
    assert_eq!(block, original);
}

#[test]
fn test_failed_moves_leave_block_untouched() {
    let mut board = Board3D::default();
    let mut block = Block::create(BlockType::TShape, GREEN, &board);
    block.position = IVec3::new(5, 3, 5);
    // Settled cubes on both sides and above
    board.fill(IVec3::new(7, 3, 5), 1);
    board.fill(IVec3::new(3, 3, 5), 1);
    board.fill(IVec3::new(5, 3, 6), 1);
    board.fill(IVec3::new(5, 3, 4), 1);
    let before = block.clone();

    assert!(!block.try_translate(&board, IVec3::X));
    assert!(!block.try_translate(&board, IVec3::NEG_X));
    assert_eq!(block, before);

    // Y rotation swings the arms into the Z neighbors
    assert!(!block.try_rotate(&board, AxisRotation::YClockwise));
    assert_eq!(block, before);

    assert!(block.try_translate(&board, IVec3::NEG_Y));
    assert_eq!(block.position, IVec3::new(5, 2, 5));
}

#[test]
fn test_rotation_kicks_off_x_wall() {
    let board = Board3D::default();
    let mut block = vertical_i(&board, IVec3::new(9, 5, 5));
    assert!(block.is_valid(&board));

    // Plain rotation pokes through the +X wall
    assert!(!block.try_rotate(&board, AxisRotation::ZClockwise));

    assert!(block.try_rotate_with_fix(&board, AxisRotation::ZClockwise));
    assert_eq!(block.position, IVec3::new(8, 5, 5));
    let (min, max) = block.world_bounds();
    assert_eq!(min, IVec3::new(6, 5, 5));
    assert_eq!(max, IVec3::new(9, 5, 5));
}

#[test]
fn test_rotation_kick_blocked_by_settled_cubes() {
    let mut board = Board3D::default();
    let mut block = vertical_i(&board, IVec3::new(9, 5, 5));
    for x in 3..9 {
        board.fill(IVec3::new(x, 5, 5), 1);
    }
    let before = block.clone();
    assert!(!block.try_rotate_with_fix(&board, AxisRotation::ZClockwise));
    assert_eq!(block, before);
}

#[test]
fn test_world_bounds_follow_position() {
    let board = Board3D::default();
    let mut block = Block::create(BlockType::OShape, GREEN, &board);
    block.position = IVec3::new(3, 4, 5);
    assert_eq!(
        block.world_bounds(),
        (IVec3::new(2, 4, 5), IVec3::new(3, 5, 6))
    );
    block.translate(IVec3::new(1, -1, 0));
    assert_eq!(
        block.world_bounds(),
        (IVec3::new(3, 3, 5), IVec3::new(4, 4, 6))
    );
}
