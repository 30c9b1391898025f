//! Uniform-random baseline.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use reversi_core::{Board, Move, Player};

use crate::Engine;

/// Plays a uniformly random legal move. The weakest opponent and the
/// fallback policy other engines degrade to.
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> RandomEngine {
        RandomEngine {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> RandomEngine {
        RandomEngine {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        RandomEngine::new()
    }
}

impl Engine for RandomEngine {
    fn propose_move(&mut self, board: &Board, color: Player, _budget: Duration) -> Option<Move> {
        board.legal_moves(color).choose(&mut self.rng).copied()
    }
}
