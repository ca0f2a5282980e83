//! Scoring module - points for cleared layers
//!
//! Classic table scaled by level:
//! - 1 layer: 40 × (level + 1)
//! - 2 layers: 100 × (level + 1)
//! - 3 layers: 300 × (level + 1)
//! - 4 layers: 1200 × (level + 1)
//!
//! Any other count scores nothing.

use crate::types::LINE_SCORES;

/// Calculate points for layers cleared in one go
pub fn calculate_game_score(layers: u32, level: u32) -> u32 {
    match layers {
        1..=4 => LINE_SCORES[layers as usize].saturating_mul(level.saturating_add(1)),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_table() {
        assert_eq!(calculate_game_score(1, 0), 40);
        assert_eq!(calculate_game_score(2, 0), 100);
        assert_eq!(calculate_game_score(3, 0), 300);
        assert_eq!(calculate_game_score(4, 0), 1200);
    }

    #[test]
    fn test_level_multiplier() {
        assert_eq!(calculate_game_score(1, 1), 80);
        assert_eq!(calculate_game_score(4, 2), 3600);
    }

    #[test]
    fn test_out_of_table_counts_score_nothing() {
        assert_eq!(calculate_game_score(0, 5), 0);
        assert_eq!(calculate_game_score(5, 0), 0);
        assert_eq!(calculate_game_score(u32::MAX, 0), 0);
    }
}
