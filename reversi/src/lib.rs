//! Board state machine for Reversi (the 8×8 two-color capture-flip family).
//!
//! The board knows nothing about searching or scoring positions; it only
//! answers the rules questions:
//! - is a move legal for a color (flanking scan over 8 directions),
//! - what happens when a move is applied (place + flip every flanked run),
//! - which moves are available (row-major, deterministic order),
//! - is the position terminal (board full, or neither color can move).
//!
//! There is no side-to-move stored here. Every query takes the acting color
//! explicitly, so a search engine can drive both colors over one board.
//!
//! Moves are applied in place and reverted through the [`Undo`] log returned
//! by [`Board::apply`], so a recursive search never copies the whole board
//! per node.

use thiserror::Error;

/// The 8 scan directions as (row, col) deltas.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Errors raised by the board state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Board sizes must be even (for the center pattern) and at least 4.
    #[error("board size must be even and at least 4, got {0}")]
    InvalidSize(usize),

    /// A snapshot row does not match the board dimension.
    #[error("snapshot row {row} has {got} cells, expected {expected}")]
    MalformedSnapshot {
        row: usize,
        got: usize,
        expected: usize,
    },

    /// [`Board::apply`] was called with a move that fails [`Board::is_legal`].
    /// This is a caller-contract violation, not a game outcome.
    #[error("illegal move at ({row}, {col}) for {color:?}")]
    IllegalMove {
        row: usize,
        col: usize,
        color: Player,
    },
}

/// One of the two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The other color.
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// The cell value this color occupies.
    #[inline]
    pub const fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// Contents of one board cell.
///
/// The `u8` codes (0 = empty, 1 = black, 2 = white) are the snapshot
/// encoding used at the harness boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Black = 1,
    White = 2,
}

impl Cell {
    /// Snapshot code for this cell.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a snapshot code.
    #[inline]
    pub const fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }

    /// The color occupying this cell, if any.
    #[inline]
    pub const fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }
}

/// A destination coordinate. Transient: produced by move enumeration,
/// consumed by [`Board::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Move {
        Move { row, col }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Undo log for one applied move: the played cell plus every cell that was
/// flipped. [`Board::undo`] reverts exactly these cells and nothing else.
#[derive(Debug, Clone)]
pub struct Undo {
    mv: Move,
    color: Player,
    flipped: Vec<Move>,
}

impl Undo {
    /// The move this log belongs to.
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// The color that played the move.
    pub fn color(&self) -> Player {
        self.color
    }

    /// The opponent cells that were flipped, in scan order.
    pub fn flipped(&self) -> &[Move] {
        &self.flipped
    }
}

/// The playing surface: a square grid of [`Cell`]s, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Standard tournament dimension.
    pub const STANDARD_SIZE: usize = 8;

    /// Create a board of the given dimension with the 4-stone center
    /// pattern (white on the main diagonal, black on the anti-diagonal).
    pub fn new(size: usize) -> Result<Board, BoardError> {
        if size < 4 || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        let mut board = Board {
            size,
            cells: vec![Cell::Empty; size * size],
        };
        let mid = size / 2;
        board.set(mid - 1, mid - 1, Cell::White);
        board.set(mid, mid, Cell::White);
        board.set(mid - 1, mid, Cell::Black);
        board.set(mid, mid - 1, Cell::Black);
        Ok(board)
    }

    /// The standard 8×8 starting position.
    pub fn standard() -> Board {
        // STANDARD_SIZE always satisfies the size check.
        match Board::new(Self::STANDARD_SIZE) {
            Ok(board) => board,
            Err(_) => unreachable!(),
        }
    }

    /// Build a board from a full harness snapshot. The outer vector length
    /// defines the dimension; every row must match it.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Board, BoardError> {
        let size = rows.len();
        if size < 4 || size % 2 != 0 {
            return Err(BoardError::InvalidSize(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != size {
                return Err(BoardError::MalformedSnapshot {
                    row,
                    got: cols.len(),
                    expected: size,
                });
            }
            cells.extend(cols);
        }
        Ok(Board { size, cells })
    }

    /// Board dimension.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell contents at (row, col). Panics if the coordinate is off-board.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    /// The four corner coordinates.
    pub fn corners(&self) -> [Move; 4] {
        let last = self.size - 1;
        [
            Move::new(0, 0),
            Move::new(0, last),
            Move::new(last, 0),
            Move::new(last, last),
        ]
    }

    /// True iff placing `color` at `mv` is legal: the cell is empty and at
    /// least one direction holds a flanked run of opponent stones.
    pub fn is_legal(&self, mv: Move, color: Player) -> bool {
        if mv.row >= self.size || mv.col >= self.size {
            return false;
        }
        if self.get(mv.row, mv.col) != Cell::Empty {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.flanks_in_direction(mv, color, dr, dc))
    }

    /// Scan from `mv` along (dr, dc): true iff the run starts with at least
    /// one opponent stone and ends on a `color` stone before the edge or an
    /// empty cell.
    fn flanks_in_direction(&self, mv: Move, color: Player, dr: i32, dc: i32) -> bool {
        let own = color.cell();
        let opp = color.opponent().cell();
        let mut r = mv.row as i32 + dr;
        let mut c = mv.col as i32 + dc;
        let mut seen_opponent = false;
        while r >= 0 && r < self.size as i32 && c >= 0 && c < self.size as i32 {
            let cell = self.get(r as usize, c as usize);
            if cell == opp {
                seen_opponent = true;
                r += dr;
                c += dc;
            } else if cell == own {
                return seen_opponent;
            } else {
                return false;
            }
        }
        false
    }

    /// Place `color` at `mv` and flip every flanked run.
    ///
    /// Returns the [`Undo`] log for the mutation. Calling this with an
    /// illegal move is a programming error on the caller's side and fails
    /// fast with [`BoardError::IllegalMove`], leaving the board untouched.
    pub fn apply(&mut self, mv: Move, color: Player) -> Result<Undo, BoardError> {
        if !self.is_legal(mv, color) {
            return Err(BoardError::IllegalMove {
                row: mv.row,
                col: mv.col,
                color,
            });
        }
        let mut flipped = Vec::new();
        // The flanking predicate only looks outward from mv, so placing the
        // stone first cannot change any direction's verdict.
        self.set(mv.row, mv.col, color.cell());
        for (dr, dc) in DIRECTIONS {
            if self.flanks_in_direction(mv, color, dr, dc) {
                self.flip_run(mv, color, dr, dc, &mut flipped);
            }
        }
        Ok(Undo { mv, color, flipped })
    }

    /// Flip one confirmed run, recording every flipped cell.
    fn flip_run(&mut self, mv: Move, color: Player, dr: i32, dc: i32, flipped: &mut Vec<Move>) {
        let own = color.cell();
        let mut r = mv.row as i32 + dr;
        let mut c = mv.col as i32 + dc;
        while self.get(r as usize, c as usize) != own {
            self.set(r as usize, c as usize, own);
            flipped.push(Move::new(r as usize, c as usize));
            r += dr;
            c += dc;
        }
    }

    /// Revert one applied move: clears the played cell and returns every
    /// flipped cell to the opponent color.
    pub fn undo(&mut self, undo: Undo) {
        let opp = undo.color.opponent().cell();
        self.set(undo.mv.row, undo.mv.col, Cell::Empty);
        for mv in undo.flipped {
            self.set(mv.row, mv.col, opp);
        }
    }

    /// All legal destinations for `color`, in row-major order.
    ///
    /// The order is part of the contract: downstream move ordering and
    /// tie-breaking depend on it being deterministic.
    pub fn legal_moves(&self, color: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let mv = Move::new(row, col);
                if self.is_legal(mv, color) {
                    moves.push(mv);
                }
            }
        }
        moves
    }

    /// True iff `color` has at least one legal move. Early-exits, so this is
    /// the cheap way to detect a forced pass.
    pub fn has_any_move(&self, color: Player) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_legal(Move::new(row, col), color) {
                    return true;
                }
            }
        }
        false
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// True iff the game is over: the board is full, or neither color has a
    /// legal move (regardless of fill).
    pub fn is_terminal(&self) -> bool {
        self.is_full() || (!self.has_any_move(Player::Black) && !self.has_any_move(Player::White))
    }

    /// Number of stones of `color` on the board.
    pub fn score_material(&self, color: Player) -> usize {
        let own = color.cell();
        self.cells.iter().filter(|&&cell| cell == own).count()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let glyph = match self.get(row, col) {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    /// Drive a playout from a seed of cell indices, alternating colors with
    /// the pass rule, and hand every reached (board, color, move) to the
    /// check. The check is responsible for applying the move.
    fn playout(
        seed: &[usize],
        mut check: impl FnMut(&mut Board, Player, Move) -> Result<(), TestCaseError>,
    ) -> Result<(), TestCaseError> {
        let mut board = Board::standard();
        let mut color = Player::Black;
        for &pick in seed {
            if board.is_terminal() {
                break;
            }
            if !board.has_any_move(color) {
                color = color.opponent();
            }
            let moves = board.legal_moves(color);
            let mv = moves[pick % moves.len()];
            check(&mut board, color, mv)?;
            color = color.opponent();
        }
        Ok(())
    }

    proptest! {
        /// Applying a legal move changes exactly the played cell plus the
        /// recorded flips; everything else is untouched.
        #[test]
        fn prop_apply_touches_only_scan_lines(seed in prop::collection::vec(0usize..64, 1..40)) {
            playout(&seed, |board, color, mv| {
                let before = board.clone();
                let undo = board.apply(mv, color).unwrap();

                for row in 0..board.size() {
                    for col in 0..board.size() {
                        let here = Move::new(row, col);
                        let old = before.get(row, col);
                        let new = board.get(row, col);
                        if here == mv {
                            prop_assert_eq!(old, Cell::Empty);
                            prop_assert_eq!(new, color.cell());
                        } else if undo.flipped().contains(&here) {
                            prop_assert_eq!(old, color.opponent().cell());
                            prop_assert_eq!(new, color.cell());
                        } else {
                            prop_assert_eq!(old, new);
                        }
                    }
                }
                Ok(())
            })?;
        }

        /// Occupancy grows by exactly one per move; flips change owner, not
        /// occupancy.
        #[test]
        fn prop_move_count_conservation(seed in prop::collection::vec(0usize..64, 1..40)) {
            playout(&seed, |board, color, mv| {
                let occupied = board.score_material(Player::Black)
                    + board.score_material(Player::White);
                board.apply(mv, color).unwrap();
                let occupied_after = board.score_material(Player::Black)
                    + board.score_material(Player::White);
                prop_assert_eq!(occupied_after, occupied + 1);
                Ok(())
            })?;
        }

        /// Apply followed by undo is the identity on the board.
        #[test]
        fn prop_apply_undo_roundtrip(seed in prop::collection::vec(0usize..64, 1..40)) {
            playout(&seed, |board, color, mv| {
                let before = board.clone();
                let undo = board.apply(mv, color).unwrap();
                let mut replay = board.clone();
                replay.undo(undo);
                prop_assert_eq!(&replay, &before);
                Ok(())
            })?;
        }

        /// `legal_moves` agrees with `is_legal` on every cell, and stays in
        /// row-major order.
        #[test]
        fn prop_legal_moves_consistency(seed in prop::collection::vec(0usize..64, 1..40)) {
            playout(&seed, |board, color, mv| {
                let moves = board.legal_moves(color);
                for row in 0..board.size() {
                    for col in 0..board.size() {
                        let here = Move::new(row, col);
                        prop_assert_eq!(moves.contains(&here), board.is_legal(here, color));
                    }
                }
                let mut sorted = moves.clone();
                sorted.sort_by_key(|m| (m.row, m.col));
                prop_assert_eq!(&sorted, &moves);
                board.apply(mv, color).unwrap();
                Ok(())
            })?;
        }

        /// A position is terminal iff the board is full or both colors are
        /// stuck.
        #[test]
        fn prop_terminal_definition(seed in prop::collection::vec(0usize..64, 1..60)) {
            playout(&seed, |board, color, mv| {
                let stuck = !board.has_any_move(Player::Black)
                    && !board.has_any_move(Player::White);
                prop_assert_eq!(board.is_terminal(), board.is_full() || stuck);
                board.apply(mv, color).unwrap();
                Ok(())
            })?;
        }
    }
}
