//! Block module - falling block shapes and transforms
//!
//! A block is a shape type, a world position, and a list of cube offsets relative
//! to that position. Every transform comes in two forms:
//!
//! - an unconditional primitive (`translate`, `rotate_*`)
//! - a `try_*` variant that computes a candidate copy and commits it only when
//!   the candidate is a legal placement
//!
//! # Rotation
//!
//! Quarter turns about the world axes, applied to offsets only:
//!
//! | Rotation | Mapping |
//! |----------|---------|
//! | X cw  | `(x, y, z) → (x, z, −y)` |
//! | X ccw | `(x, y, z) → (x, −z, y)` |
//! | Y cw  | `(x, y, z) → (−z, y, x)` |
//! | Y ccw | `(x, y, z) → (z, y, −x)` |
//! | Z cw  | `(x, y, z) → (y, −x, z)` |
//! | Z ccw | `(x, y, z) → (−y, x, z)` |
//!
//! The O shape is a 2×2×2 cube and never rotates.
//!
//! # Wall kicks
//!
//! When a rotation lands out of bounds or inside settled cubes,
//! [`Block::try_rotate_with_fix`] asks [`Block::try_fix`] to shift the rotated
//! block back toward where its bounding box used to be, at most
//! [`FIX_ATTEMPTS`] cells per direction.

use arrayvec::ArrayVec;
use glam::IVec3;

use crate::board::Board3D;
use crate::rng::SimpleRng;
use crate::types::{AxisRotation, BlockType, ColorRgb, FIX_ATTEMPTS};

/// Inline cube storage; the largest shape has 8 cubes
pub type CubeOffsets = ArrayVec<IVec3, 8>;

/// Offsets and spawn bias (cells below the ceiling) of one shape
struct ShapeDef {
    offsets: &'static [(i32, i32, i32)],
    spawn_bias: i32,
}

const I_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (-1, 0, 0), (-2, 0, 0), (1, 0, 0)],
    spawn_bias: 1,
};

const L_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (1, 1, 0)],
    spawn_bias: 2,
};

const J_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (-1, 1, 0)],
    spawn_bias: 2,
};

const O_SHAPE: ShapeDef = ShapeDef {
    offsets: &[
        (0, 0, 0),
        (0, 1, 0),
        (-1, 0, 0),
        (-1, 1, 0),
        (0, 0, 1),
        (0, 1, 1),
        (-1, 0, 1),
        (-1, 1, 1),
    ],
    spawn_bias: 2,
};

const S_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (-1, 0, 0), (0, 1, 0), (1, 1, 0)],
    spawn_bias: 2,
};

const T_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (-1, 0, 0), (1, 0, 0), (0, 1, 0)],
    spawn_bias: 2,
};

const Z_SHAPE: ShapeDef = ShapeDef {
    offsets: &[(0, 0, 0), (0, 1, 0), (-1, 1, 0), (1, 0, 0)],
    spawn_bias: 2,
};

fn shape_def(kind: BlockType) -> Option<&'static ShapeDef> {
    match kind {
        BlockType::IShape => Some(&I_SHAPE),
        BlockType::LShape => Some(&L_SHAPE),
        BlockType::JShape => Some(&J_SHAPE),
        BlockType::OShape => Some(&O_SHAPE),
        BlockType::SShape => Some(&S_SHAPE),
        BlockType::TShape => Some(&T_SHAPE),
        BlockType::ZShape => Some(&Z_SHAPE),
        BlockType::Undefined => None,
    }
}

/// Spawn-orientation offsets of a shape (empty for `Undefined`)
pub fn shape_offsets(kind: BlockType) -> CubeOffsets {
    shape_def(kind)
        .map(|def| {
            def.offsets
                .iter()
                .map(|&(x, y, z)| IVec3::new(x, y, z))
                .collect()
        })
        .unwrap_or_default()
}

/// The falling block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub kind: BlockType,
    /// Local origin in world cell coordinates
    pub position: IVec3,
    pub cube_offsets: CubeOffsets,
    pub color: ColorRgb,
}

impl Block {
    /// Create a block at the spawn point of `board`.
    ///
    /// The block starts centered at the ceiling, lowered by its shape's spawn
    /// bias, then lifted one layer at a time until none of its in-bounds cubes
    /// overlap settled ones. `Undefined` yields a block without cubes.
    pub fn create(kind: BlockType, color: ColorRgb, board: &Board3D) -> Self {
        let spawn_bias = shape_def(kind).map_or(0, |def| def.spawn_bias);
        let mut block = Self {
            kind,
            position: IVec3::new(
                (board.width() / 2) as i32,
                board.height() as i32 - spawn_bias,
                (board.depth() / 2) as i32,
            ),
            cube_offsets: shape_offsets(kind),
            color,
        };

        while block.is_colliding_with_other_blocks(board) {
            block.translate(IVec3::Y);
        }

        block
    }

    /// Create a block of a uniformly chosen shape with a random non-black color
    pub fn create_random(board: &Board3D, rng: &mut SimpleRng) -> Self {
        let kind = BlockType::ALL[rng.next_range(BlockType::ALL.len() as u32) as usize];

        let mut color = ColorRgb::default();
        while color.is_black() {
            color = ColorRgb::new(
                rng.next_range(256) as u8,
                rng.next_range(256) as u8,
                rng.next_range(256) as u8,
            );
        }

        Self::create(kind, color, board)
    }

    /// World positions of every cube
    pub fn cubes(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.cube_offsets.iter().map(move |&offset| self.position + offset)
    }

    pub fn translate(&mut self, delta: IVec3) {
        self.position += delta;
    }

    /// Apply a quarter turn to every offset (no-op for `OShape`)
    pub fn rotate(&mut self, rotation: AxisRotation) {
        if self.kind == BlockType::OShape {
            return;
        }
        for offset in &mut self.cube_offsets {
            let IVec3 { x, y, z } = *offset;
            *offset = match rotation {
                AxisRotation::XClockwise => IVec3::new(x, z, -y),
                AxisRotation::XCounterClockwise => IVec3::new(x, -z, y),
                AxisRotation::YClockwise => IVec3::new(-z, y, x),
                AxisRotation::YCounterClockwise => IVec3::new(z, y, -x),
                AxisRotation::ZClockwise => IVec3::new(y, -x, z),
                AxisRotation::ZCounterClockwise => IVec3::new(-y, x, z),
            };
        }
    }

    pub fn rotate_x_clockwise(&mut self) {
        self.rotate(AxisRotation::XClockwise);
    }

    pub fn rotate_x_counter_clockwise(&mut self) {
        self.rotate(AxisRotation::XCounterClockwise);
    }

    pub fn rotate_y_clockwise(&mut self) {
        self.rotate(AxisRotation::YClockwise);
    }

    pub fn rotate_y_counter_clockwise(&mut self) {
        self.rotate(AxisRotation::YCounterClockwise);
    }

    pub fn rotate_z_clockwise(&mut self) {
        self.rotate(AxisRotation::ZClockwise);
    }

    pub fn rotate_z_counter_clockwise(&mut self) {
        self.rotate(AxisRotation::ZCounterClockwise);
    }

    /// Translate if the result is a legal placement. Returns whether it moved.
    pub fn try_translate(&mut self, board: &Board3D, delta: IVec3) -> bool {
        let mut candidate = self.clone();
        candidate.translate(delta);
        self.commit_if_valid(board, candidate)
    }

    /// Rotate if the result is a legal placement. Returns whether it rotated.
    pub fn try_rotate(&mut self, board: &Board3D, rotation: AxisRotation) -> bool {
        let mut candidate = self.clone();
        candidate.rotate(rotation);
        self.commit_if_valid(board, candidate)
    }

    /// Rotate, shifting the result sideways if the plain rotation is illegal.
    pub fn try_rotate_with_fix(&mut self, board: &Board3D, rotation: AxisRotation) -> bool {
        let mut candidate = self.clone();
        candidate.rotate(rotation);
        if candidate.is_valid(board) || candidate.try_fix(board, self) {
            *self = candidate;
            true
        } else {
            false
        }
    }

    fn commit_if_valid(&mut self, board: &Board3D, candidate: Block) -> bool {
        if candidate.is_valid(board) {
            *self = candidate;
            true
        } else {
            false
        }
    }

    /// Every cube is inside the board and on an empty cell
    pub fn is_valid(&self, board: &Board3D) -> bool {
        self.cubes()
            .all(|pos| board.contains(pos) && board.is_empty(pos))
    }

    /// Some in-bounds cube overlaps a settled cube. Out-of-bounds cubes are ignored.
    pub fn is_colliding_with_other_blocks(&self, board: &Board3D) -> bool {
        self.cubes()
            .any(|pos| board.contains(pos) && !board.is_empty(pos))
    }

    /// Try to move an illegal placement back toward `prev`'s footprint.
    ///
    /// Proposes up to four single-axis shifts (+X, −X, +Z, −Z) from how this
    /// block's bounding box moved relative to `prev`. Each round pushes every
    /// candidate one more cell along its direction; the first legal one is
    /// committed. Returns false, leaving `self` unchanged, after
    /// [`FIX_ATTEMPTS`] rounds.
    pub fn try_fix(&mut self, board: &Board3D, prev: &Block) -> bool {
        debug_assert!(!self.is_valid(board));

        let (min, max) = self.world_bounds();
        let (prev_min, prev_max) = prev.world_bounds();

        let mut directions: ArrayVec<IVec3, 4> = ArrayVec::new();
        if min.x < prev_min.x || max.x < prev_max.x {
            directions.push(IVec3::X);
        }
        if min.x > prev_min.x || max.x > prev_max.x {
            directions.push(IVec3::NEG_X);
        }
        if min.z < prev_min.z || max.z < prev_max.z {
            directions.push(IVec3::Z);
        }
        if min.z > prev_min.z || max.z > prev_max.z {
            directions.push(IVec3::NEG_Z);
        }

        for round in 1..=FIX_ATTEMPTS as i32 {
            for &direction in &directions {
                let mut candidate = self.clone();
                candidate.translate(direction * round);
                if candidate.is_valid(board) {
                    *self = candidate;
                    return true;
                }
            }
        }
        false
    }

    /// Inclusive world-space bounding box `(min, max)`.
    ///
    /// A block without cubes reports `(IVec3::MAX, IVec3::MIN)`.
    pub fn world_bounds(&self) -> (IVec3, IVec3) {
        self.cubes()
            .fold((IVec3::MAX, IVec3::MIN), |(min, max), pos| {
                (min.min(pos), max.max(pos))
            })
    }
}
