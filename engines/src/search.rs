//! Time-bounded iterative-deepening alpha-beta search.
//!
//! The engine deepens one ply at a time up to a configured cap. Before
//! starting a depth it projects whether that depth can finish inside the
//! wall-clock budget: past rounds roughly double in cost, so the next round
//! is assumed to cost at least as much as everything spent so far, and a
//! round is only started while `elapsed * 2 < budget`. Only fully completed
//! rounds may publish a best move, so the answer never comes from a search
//! that was cut off mid-tree.
//!
//! At the root, moves are ordered through [`MoveRanker`] by one-ply
//! evaluation so the most promising lines are searched first and tighten
//! the alpha-beta window early. Each root move is still searched with the
//! full window; pruning happens below the root. Within a round the best
//! move only changes on a strictly better score, so among equal scores the
//! first-ordered move wins and the result is deterministic.
//!
//! A color with no legal move passes: the search recurses for the opponent
//! at the same depth without touching the board. Terminal positions are
//! detected before the pass rule, so two consecutive passes cannot recurse
//! forever.

use std::time::{Duration, Instant};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use reversi_core::{Board, BoardError, Move, Player};
use thiserror::Error;

use crate::eval::{evaluate, EvalWeights};
use crate::ranker::MoveRanker;
use crate::Engine;

/// Errors raised by the search itself.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The budget expired before even the shallowest round completed.
    #[error("time budget exhausted before any search depth completed")]
    BudgetExhausted,

    /// The board rejected a move the search believed to be legal.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Tunable parameters for [`AlphaBetaEngine`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum search depth in plies.
    pub max_depth: u32,
    /// Default wall-clock budget, used by [`AlphaBetaEngine::search`].
    /// [`Engine::propose_move`] takes the budget per call instead.
    pub time_budget: Duration,
    /// Evaluator weights.
    pub weights: EvalWeights,
    /// RNG seed for the fallback move. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 3,
            time_budget: Duration::from_millis(4800),
            weights: EvalWeights::default(),
            seed: None,
        }
    }
}

/// Iterative-deepening alpha-beta engine.
pub struct AlphaBetaEngine {
    config: SearchConfig,
    ranker: MoveRanker<Move>,
    rng: StdRng,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> AlphaBetaEngine {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        AlphaBetaEngine {
            config,
            ranker: MoveRanker::new(),
            rng,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search with the configured default budget.
    pub fn search(&mut self, board: &Board, color: Player) -> Result<Move, SearchError> {
        self.search_with_budget(board, color, self.config.time_budget)
    }

    /// Run iterative deepening on a private copy of `board` and return the
    /// best move found by the deepest completed round.
    ///
    /// Errors with [`SearchError::BudgetExhausted`] when the budget is too
    /// small for even a depth-1 round, and propagates board errors (which
    /// indicate a bug, not a game situation). The caller must ensure
    /// `color` has at least one legal move.
    pub fn search_with_budget(
        &mut self,
        board: &Board,
        color: Player,
        budget: Duration,
    ) -> Result<Move, SearchError> {
        let start = Instant::now();
        let mut scratch = board.clone();
        let mut best: Option<(Move, f64)> = None;

        for depth in 1..=self.config.max_depth {
            // Projection: the next round costs at least as much as all
            // rounds so far combined.
            if start.elapsed() * 2 >= budget {
                debug!(
                    "stopping before depth {depth}: {:?} of {budget:?} spent",
                    start.elapsed()
                );
                break;
            }
            let round_best = self.search_round(&mut scratch, color, depth)?;
            debug!(
                "depth {depth} complete: best {} scoring {:.2}",
                round_best.0, round_best.1
            );
            best = Some(round_best);
        }

        best.map(|(mv, _)| mv).ok_or(SearchError::BudgetExhausted)
    }

    /// One full fixed-depth round. Returns the best root move and its score.
    fn search_round(
        &mut self,
        board: &mut Board,
        color: Player,
        depth: u32,
    ) -> Result<(Move, f64), SearchError> {
        let moves = board.legal_moves(color);
        debug_assert!(!moves.is_empty());

        // Order root moves by one-ply evaluation, best first.
        self.ranker.clear();
        for mv in moves {
            let undo = board.apply(mv, color)?;
            let priority = evaluate(board, color, color.opponent(), &self.config.weights);
            board.undo(undo);
            self.ranker.push(priority, mv);
        }

        let mut round_best: Option<(Move, f64)> = None;
        while let Some(mv) = self.ranker.pop() {
            let undo = board.apply(mv, color)?;
            let score = self.alpha_beta(
                board,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                color,
                color.opponent(),
            )?;
            board.undo(undo);

            // Strict improvement only: equal scores keep the earlier move.
            match round_best {
                Some((_, best_score)) if score <= best_score => {}
                _ => round_best = Some((mv, score)),
            }
        }

        match round_best {
            Some(found) => Ok(found),
            // legal_moves was non-empty, so the loop ran at least once.
            None => unreachable!(),
        }
    }

    fn alpha_beta(
        &self,
        board: &mut Board,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        max_color: Player,
        to_move: Player,
    ) -> Result<f64, SearchError> {
        if depth == 0 || board.is_terminal() {
            return Ok(evaluate(
                board,
                max_color,
                max_color.opponent(),
                &self.config.weights,
            ));
        }

        let moves = board.legal_moves(to_move);
        if moves.is_empty() {
            // Pass: the opponent moves again at the same depth. The board is
            // not terminal here, so the opponent has at least one move and
            // this cannot recurse a second time.
            return self.alpha_beta(board, depth, alpha, beta, max_color, to_move.opponent());
        }

        let maximizing = to_move == max_color;
        let mut value = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let undo = board.apply(mv, to_move)?;
            let score =
                self.alpha_beta(board, depth - 1, alpha, beta, max_color, to_move.opponent())?;
            board.undo(undo);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(value)
    }
}

impl Engine for AlphaBetaEngine {
    /// Search for a move, falling back to a uniformly random legal move if
    /// the search fails for any reason (budget too small, internal error).
    fn propose_move(&mut self, board: &Board, color: Player, budget: Duration) -> Option<Move> {
        let legal = board.legal_moves(color);
        if legal.is_empty() {
            return None;
        }
        match self.search_with_budget(board, color, budget) {
            Ok(mv) => Some(mv),
            Err(err) => {
                warn!("search failed ({err}), playing a random legal move");
                legal.choose(&mut self.rng).copied()
            }
        }
    }
}

/// Plain fixed-depth minimax without pruning. Test oracle for the
/// alpha-beta implementation; exercised only under `cfg(test)`.
#[cfg(test)]
fn reference_minimax(
    board: &mut Board,
    depth: u32,
    max_color: Player,
    to_move: Player,
    weights: &EvalWeights,
) -> f64 {
    if depth == 0 || board.is_terminal() {
        return evaluate(board, max_color, max_color.opponent(), weights);
    }
    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        return reference_minimax(board, depth, max_color, to_move.opponent(), weights);
    }
    let maximizing = to_move == max_color;
    let mut value = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for mv in moves {
        let undo = board.apply(mv, to_move).unwrap();
        let score = reference_minimax(board, depth - 1, max_color, to_move.opponent(), weights);
        board.undo(undo);
        value = if maximizing {
            value.max(score)
        } else {
            value.min(score)
        };
    }
    value
}
