//! One-ply material-greedy baseline.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use reversi_core::{Board, Move, Player};

use crate::Engine;

/// Picks the move that maximizes own stone count after one ply, choosing
/// uniformly at random among ties. Ignores the time budget; a single ply
/// over at most `size²` moves is effectively instant.
pub struct GreedyEngine {
    rng: StdRng,
}

impl GreedyEngine {
    pub fn new() -> GreedyEngine {
        GreedyEngine {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic tie-breaking for tests and reproducible matches.
    pub fn with_seed(seed: u64) -> GreedyEngine {
        GreedyEngine {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        GreedyEngine::new()
    }
}

impl Engine for GreedyEngine {
    fn propose_move(&mut self, board: &Board, color: Player, _budget: Duration) -> Option<Move> {
        let mut scratch = board.clone();
        let mut best_score = i64::MIN;
        let mut best_moves: Vec<Move> = Vec::new();

        for mv in scratch.legal_moves(color) {
            let undo = match scratch.apply(mv, color) {
                Ok(undo) => undo,
                // legal_moves and apply agree on legality; nothing to do
                // but skip.
                Err(_) => continue,
            };
            let score = scratch.score_material(color) as i64;
            scratch.undo(undo);

            if score > best_score {
                best_score = score;
                best_moves.clear();
            }
            if score == best_score {
                best_moves.push(mv);
            }
        }

        best_moves.choose(&mut self.rng).copied()
    }
}
