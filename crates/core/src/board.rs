//! Board module - the 3D cell grid
//!
//! The board is a `width × depth × height` grid of settled cubes. Each cell holds
//! `0` when empty or the packed RGB color of the cube that settled there.
//! Uses a flat vector, one horizontal layer after another, bottom layer first.
//!
//! Coordinates: `(x, y, z)` with `x` in `0..width`, `y` in `0..height` (0 = floor)
//! and `z` in `0..depth`.

use glam::IVec3;

use crate::config::{BoardConfig, ConfigError};
use crate::types::{BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board3D {
    width: u32,
    depth: u32,
    height: u32,
    /// Flat array of cells, `(x * width + z) + y * width * depth`
    cells: Vec<u32>,
}

impl Board3D {
    /// Create a new empty board.
    ///
    /// Layers must be square (`width == depth`) for the index mapping to be
    /// collision-free, so sizes go through [`BoardConfig::validate`].
    pub fn new(width: u32, depth: u32, height: u32) -> Result<Self, ConfigError> {
        Self::from_config(&BoardConfig {
            width,
            depth,
            height,
        })
    }

    /// Create a board from validated configuration
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(config.width, config.depth, config.height))
    }

    fn empty(width: u32, depth: u32, height: u32) -> Self {
        Self {
            width,
            depth,
            height,
            cells: vec![0; (width * depth * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw cell storage, for renderers and snapshots
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Check if a world position lies inside the board
    #[inline]
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.width as i32
            && pos.y < self.height as i32
            && pos.z < self.depth as i32
    }

    /// Flat index of an in-bounds position
    #[inline(always)]
    pub fn index(&self, pos: IVec3) -> usize {
        debug_assert!(self.contains(pos), "position {pos} outside board");
        (pos.x as usize * self.width as usize + pos.z as usize)
            + pos.y as usize * self.layer_len()
    }

    #[inline(always)]
    fn layer_len(&self) -> usize {
        (self.width * self.depth) as usize
    }

    /// Check if a cell is empty. The position must be inside the board.
    #[inline]
    pub fn is_empty(&self, pos: IVec3) -> bool {
        self.cells[self.index(pos)] == 0
    }

    /// Write a cell unconditionally. The position must be inside the board.
    pub fn fill(&mut self, pos: IVec3, value: u32) {
        let index = self.index(pos);
        self.cells[index] = value;
    }

    /// Get the cell value at a position.
    /// Returns None if out of bounds
    pub fn get(&self, pos: IVec3) -> Option<u32> {
        if self.contains(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Check if every `(x, z)` cell of a layer is occupied
    pub fn is_layer_filled(&self, layer: u32) -> bool {
        if layer >= self.height {
            return false;
        }
        (0..self.width as i32).all(|x| {
            (0..self.depth as i32).all(|z| !self.is_empty(IVec3::new(x, layer as i32, z)))
        })
    }

    /// Clear a layer and shift every layer above it down by one.
    /// The top layer ends up empty.
    pub fn erase_layer(&mut self, layer: u32) {
        if layer >= self.height {
            return;
        }

        let len = self.layer_len();
        let start = layer as usize * len;
        let end = self.cells.len();

        // copy_within handles the overlapping ranges
        self.cells.copy_within(start + len..end, start);
        self.cells[end - len..].fill(0);
    }

    /// Erase every filled layer, compacting the ones above.
    ///
    /// A layer that was just erased is examined again, since the layer above it
    /// moved into its slot. Returns the number of erased layers.
    pub fn erase_filled_layers(&mut self) -> u32 {
        let mut erased = 0;
        let mut layer = 0;
        while layer < self.height {
            if self.is_layer_filled(layer) {
                self.erase_layer(layer);
                erased += 1;
            } else {
                layer += 1;
            }
        }
        if erased > 0 {
            log::debug!("erased {erased} filled layer(s)");
        }
        erased
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Highest occupied layer of a column plus one, or 0 for an empty column
    pub fn column_height(&self, x: i32, z: i32) -> u32 {
        (0..self.height)
            .rev()
            .find(|&y| self.get(IVec3::new(x, y as i32, z)).is_some_and(|c| c != 0))
            .map_or(0, |y| y + 1)
    }

    /// Clear the board (used by tests and benches)
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }
}

impl Default for Board3D {
    fn default() -> Self {
        Self::empty(BOARD_WIDTH, BOARD_DEPTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_layer(board: &mut Board3D, layer: i32, value: u32) {
        for x in 0..board.width() as i32 {
            for z in 0..board.depth() as i32 {
                board.fill(IVec3::new(x, layer, z), value);
            }
        }
    }

    #[test]
    fn test_board_new_is_empty() {
        let board = Board3D::default();
        assert_eq!(board.width(), 10);
        assert_eq!(board.depth(), 10);
        assert_eq!(board.height(), 22);
        assert_eq!(board.cells().len(), 10 * 10 * 22);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_contains_bounds() {
        let board = Board3D::new(4, 4, 6).unwrap();
        assert!(board.contains(IVec3::new(0, 0, 0)));
        assert!(board.contains(IVec3::new(3, 5, 3)));
        assert!(!board.contains(IVec3::new(-1, 0, 0)));
        assert!(!board.contains(IVec3::new(0, -1, 0)));
        assert!(!board.contains(IVec3::new(0, 0, -1)));
        assert!(!board.contains(IVec3::new(4, 0, 0)));
        assert!(!board.contains(IVec3::new(0, 6, 0)));
        assert!(!board.contains(IVec3::new(0, 0, 4)));
    }

    #[test]
    fn test_index_mapping() {
        let board = Board3D::new(4, 4, 3).unwrap();
        assert_eq!(board.index(IVec3::new(0, 0, 0)), 0);
        assert_eq!(board.index(IVec3::new(0, 0, 1)), 1);
        assert_eq!(board.index(IVec3::new(1, 0, 0)), 4);
        assert_eq!(board.index(IVec3::new(2, 1, 3)), (2 * 4 + 3) + 16);
        assert_eq!(board.index(IVec3::new(3, 2, 3)), 47);
    }

    #[test]
    fn test_fill_and_get() {
        let mut board = Board3D::new(4, 4, 4).unwrap();
        let pos = IVec3::new(1, 2, 3);
        assert!(board.is_empty(pos));
        board.fill(pos, 0xff0000);
        assert!(!board.is_empty(pos));
        assert_eq!(board.get(pos), Some(0xff0000));
        assert_eq!(board.get(IVec3::new(9, 0, 0)), None);
    }

    #[test]
    fn test_layer_filled_needs_every_cell() {
        let mut board = Board3D::new(3, 3, 4).unwrap();
        fill_layer(&mut board, 1, 7);
        assert!(board.is_layer_filled(1));
        board.fill(IVec3::new(2, 1, 2), 0);
        assert!(!board.is_layer_filled(1));
        assert!(!board.is_layer_filled(0));
        assert!(!board.is_layer_filled(99));
    }

    #[test]
    fn test_erase_layer_compacts() {
        let mut board = Board3D::new(3, 3, 4).unwrap();
        fill_layer(&mut board, 0, 1);
        board.fill(IVec3::new(1, 1, 2), 5);
        board.fill(IVec3::new(0, 3, 0), 9);

        board.erase_layer(0);

        assert_eq!(board.get(IVec3::new(1, 0, 2)), Some(5));
        assert_eq!(board.get(IVec3::new(0, 2, 0)), Some(9));
        assert_eq!(board.get(IVec3::new(0, 3, 0)), Some(0));
        assert_eq!(board.occupied_count(), 2);
    }

    #[test]
    fn test_erase_top_layer() {
        let mut board = Board3D::new(2, 2, 3).unwrap();
        fill_layer(&mut board, 2, 3);
        board.erase_layer(2);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_erase_filled_layers_counts_adjacent() {
        let mut board = Board3D::new(3, 3, 5).unwrap();
        fill_layer(&mut board, 0, 1);
        fill_layer(&mut board, 1, 2);
        board.fill(IVec3::new(0, 2, 0), 3);

        assert_eq!(board.erase_filled_layers(), 2);
        assert_eq!(board.get(IVec3::new(0, 0, 0)), Some(3));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.erase_filled_layers(), 0);
    }

    #[test]
    fn test_column_height() {
        let mut board = Board3D::new(3, 3, 5).unwrap();
        assert_eq!(board.column_height(1, 1), 0);
        board.fill(IVec3::new(1, 3, 1), 1);
        assert_eq!(board.column_height(1, 1), 4);
        assert_eq!(board.column_height(7, 7), 0);
    }
}
