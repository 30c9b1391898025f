//! Composite positional evaluator.
//!
//! Scores a board from the max player's perspective by combining four
//! sub-metrics, each normalized to [-100, 100] before weighting so that no
//! single factor dominates by raw magnitude:
//! 1. mobility — relative count of legal moves,
//! 2. material parity — relative stone count,
//! 3. stability — relative count of stones that are hard to flip,
//! 4. corner occupancy — relative count of captured corners.
//!
//! The same function scores depth-0 leaves and terminal boards; there is no
//! special game-over score beyond what material and corners already express.
//!
//! Stability is a deliberate approximation, kept for reproducibility against
//! the heuristic this engine was tuned with: a stone is "stable" if it sits
//! in a corner, on an edge line fully owned by its color, or (interior) if
//! every in-bounds neighbor shares its color. True combinatorial stability
//! is stricter.

use reversi_core::{Board, Cell, Player, DIRECTIONS};

/// Weights for the four evaluator sub-metrics.
///
/// These are a configuration surface, not hard-coded law: the defaults
/// reflect that corners and stability dominate late-game value while
/// mobility matters early.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalWeights {
    pub mobility: f64,
    pub material: f64,
    pub stability: f64,
    pub corners: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            mobility: 5.0,
            material: 25.0,
            stability: 25.0,
            corners: 30.0,
        }
    }
}

/// 100·(max − min)/(max + min), or 0 when there is nothing to compare.
#[inline]
fn normalized(max: f64, min: f64) -> f64 {
    let total = max + min;
    if total == 0.0 {
        0.0
    } else {
        100.0 * (max - min) / total
    }
}

/// Relative mobility: legal-move counts for both colors.
pub fn mobility(board: &Board, max_color: Player, min_color: Player) -> f64 {
    let max_moves = board.legal_moves(max_color).len() as f64;
    let min_moves = board.legal_moves(min_color).len() as f64;
    normalized(max_moves, min_moves)
}

/// Relative material: stone counts for both colors.
pub fn material(board: &Board, max_color: Player, min_color: Player) -> f64 {
    let max_stones = board.score_material(max_color) as f64;
    let min_stones = board.score_material(min_color) as f64;
    normalized(max_stones, min_stones)
}

/// Relative corner occupancy. Once captured, a corner can never be flanked.
pub fn corner_occupancy(board: &Board, max_color: Player, min_color: Player) -> f64 {
    let mut max_corners = 0.0;
    let mut min_corners = 0.0;
    for corner in board.corners() {
        let cell = board.get(corner.row, corner.col);
        if cell == max_color.cell() {
            max_corners += 1.0;
        } else if cell == min_color.cell() {
            min_corners += 1.0;
        }
    }
    normalized(max_corners, min_corners)
}

/// Relative stability: per color, stable stones minus unstable stones,
/// normalized over the sum of both nets.
pub fn stability(board: &Board, max_color: Player, min_color: Player) -> f64 {
    let mut max_net = 0.0;
    let mut min_net = 0.0;
    for row in 0..board.size() {
        for col in 0..board.size() {
            let owner = match board.get(row, col).player() {
                Some(owner) => owner,
                None => continue,
            };
            let delta = if is_stable(board, row, col) { 1.0 } else { -1.0 };
            if owner == max_color {
                max_net += delta;
            } else if owner == min_color {
                min_net += delta;
            }
        }
    }
    normalized(max_net, min_net)
}

/// Approximate stability of the stone at (row, col). The cell must be
/// occupied; empty cells are never stable.
fn is_stable(board: &Board, row: usize, col: usize) -> bool {
    let cell = board.get(row, col);
    if cell == Cell::Empty {
        return false;
    }
    let last = board.size() - 1;
    let on_row_edge = row == 0 || row == last;
    let on_col_edge = col == 0 || col == last;

    if on_row_edge && on_col_edge {
        // Corners can never be flipped.
        return true;
    }
    if on_row_edge || on_col_edge {
        // Edge stone: stable iff the whole edge line it sits on is owned
        // by its color.
        let mut stable = false;
        if on_row_edge {
            stable |= (0..=last).all(|c| board.get(row, c) == cell);
        }
        if on_col_edge {
            stable |= (0..=last).all(|r| board.get(r, col) == cell);
        }
        return stable;
    }
    // Interior stone: stable iff completely surrounded by its own color.
    DIRECTIONS.iter().all(|&(dr, dc)| {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        board.get(r as usize, c as usize) == cell
    })
}

/// Weighted composite score from `max_color`'s perspective.
pub fn evaluate(board: &Board, max_color: Player, min_color: Player, weights: &EvalWeights) -> f64 {
    mobility(board, max_color, min_color) * weights.mobility
        + material(board, max_color, min_color) * weights.material
        + stability(board, max_color, min_color) * weights.stability
        + corner_occupancy(board, max_color, min_color) * weights.corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_core::Move;

    fn empty_rows(size: usize) -> Vec<Vec<Cell>> {
        vec![vec![Cell::Empty; size]; size]
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::standard();
        let (black, white) = (Player::Black, Player::White);

        assert_eq!(mobility(&board, black, white), 0.0);
        assert_eq!(material(&board, black, white), 0.0);
        assert_eq!(stability(&board, black, white), 0.0);
        assert_eq!(corner_occupancy(&board, black, white), 0.0);
        assert_eq!(
            evaluate(&board, black, white, &EvalWeights::default()),
            0.0
        );
    }

    #[test]
    fn test_evaluation_is_zero_sum() {
        let mut board = Board::standard();
        board.apply(Move::new(2, 3), Player::Black).unwrap();
        let weights = EvalWeights::default();

        let from_black = evaluate(&board, Player::Black, Player::White, &weights);
        let from_white = evaluate(&board, Player::White, Player::Black, &weights);
        assert_eq!(from_black, -from_white);
    }

    #[test]
    fn test_material_parity() {
        let mut rows = empty_rows(4);
        rows[0][0] = Cell::Black;
        rows[0][1] = Cell::Black;
        rows[0][2] = Cell::Black;
        rows[1][0] = Cell::White;
        let board = Board::from_rows(rows).unwrap();

        // 100 * (3 - 1) / (3 + 1)
        assert_eq!(material(&board, Player::Black, Player::White), 50.0);
        assert_eq!(material(&board, Player::White, Player::Black), -50.0);
    }

    #[test]
    fn test_material_empty_board_is_zero() {
        let board = Board::from_rows(empty_rows(4)).unwrap();
        assert_eq!(material(&board, Player::Black, Player::White), 0.0);
        assert_eq!(mobility(&board, Player::Black, Player::White), 0.0);
    }

    #[test]
    fn test_corner_occupancy() {
        let mut rows = empty_rows(8);
        rows[0][0] = Cell::Black;
        rows[7][7] = Cell::Black;
        rows[0][7] = Cell::White;
        let board = Board::from_rows(rows).unwrap();

        // 100 * (2 - 1) / (2 + 1)
        let score = corner_occupancy(&board, Player::Black, Player::White);
        assert!((score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_corner_stones_are_stable() {
        let mut rows = empty_rows(8);
        rows[0][0] = Cell::Black;
        rows[7][7] = Cell::White;
        let board = Board::from_rows(rows).unwrap();

        assert!(is_stable(&board, 0, 0));
        assert!(is_stable(&board, 7, 7));
    }

    #[test]
    fn test_fully_owned_edge_is_stable() {
        let mut rows = empty_rows(4);
        for col in 0..4 {
            rows[0][col] = Cell::Black;
        }
        rows[2][0] = Cell::White;
        let board = Board::from_rows(rows).unwrap();

        // Every stone on the owned top edge is stable.
        for col in 0..4 {
            assert!(is_stable(&board, 0, col));
        }
        // A lone stone on the left edge is not: column 0 is not fully owned.
        assert!(!is_stable(&board, 2, 0));
    }

    #[test]
    fn test_mixed_edge_is_not_stable() {
        let mut rows = empty_rows(4);
        rows[0][0] = Cell::Black;
        rows[0][1] = Cell::Black;
        rows[0][2] = Cell::White;
        rows[0][3] = Cell::Black;
        let board = Board::from_rows(rows).unwrap();

        // Corners stay stable, but the mid-edge stones sit on a mixed line.
        assert!(is_stable(&board, 0, 0));
        assert!(!is_stable(&board, 0, 1));
        assert!(!is_stable(&board, 0, 2));
    }

    #[test]
    fn test_surrounded_interior_stone_is_stable() {
        let mut rows = empty_rows(6);
        for row in 1..4 {
            for col in 1..4 {
                rows[row][col] = Cell::Black;
            }
        }
        let board = Board::from_rows(rows).unwrap();

        assert!(is_stable(&board, 2, 2));
        // Ring stones touch empty cells.
        assert!(!is_stable(&board, 1, 1));
        assert!(!is_stable(&board, 1, 2));
    }

    #[test]
    fn test_weights_scale_the_composite() {
        let mut rows = empty_rows(8);
        rows[0][0] = Cell::Black;
        let board = Board::from_rows(rows).unwrap();

        let corners_only = EvalWeights {
            mobility: 0.0,
            material: 0.0,
            stability: 0.0,
            corners: 1.0,
        };
        // Black owns the only claimed corner: metric saturates at 100.
        assert_eq!(
            evaluate(&board, Player::Black, Player::White, &corners_only),
            100.0
        );

        let doubled = EvalWeights {
            corners: 2.0,
            ..corners_only
        };
        assert_eq!(
            evaluate(&board, Player::Black, Player::White, &doubled),
            200.0
        );
    }
}
