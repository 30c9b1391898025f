//! Decision engines for Reversi.
//!
//! This crate contains everything that chooses moves on top of the
//! `reversi_core` board:
//! - [`eval`]: the composite positional evaluator (mobility, material
//!   parity, stability, corner occupancy),
//! - [`ranker`]: a stable max-priority queue used for move ordering,
//! - [`search`]: the time-bounded iterative-deepening alpha-beta engine,
//! - [`greedy`], [`random`]: one-ply baseline opponents.
//!
//! All engines implement the single [`Engine`] capability trait and never
//! mutate the caller's board: each call works on a private copy.

pub mod eval;
pub mod greedy;
pub mod random;
pub mod ranker;
pub mod search;

pub use eval::{evaluate, EvalWeights};
pub use greedy::GreedyEngine;
pub use random::RandomEngine;
pub use ranker::MoveRanker;
pub use search::{AlphaBetaEngine, SearchConfig, SearchError};

use std::time::Duration;

use reversi_core::{Board, Move, Player};

/// A move provider.
///
/// Given a board snapshot, the engine's own color and a wall-clock budget,
/// an engine returns either a legal move or `None` when the color has no
/// legal move (the caller must then treat the turn as a pass).
///
/// Engines that can fail internally must still honor this contract: when
/// legal moves exist, they return one, degrading move quality rather than
/// surfacing the failure.
pub trait Engine {
    fn propose_move(&mut self, board: &Board, color: Player, budget: Duration) -> Option<Move>;
}
