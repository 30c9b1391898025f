//! Plays one full game, alpha-beta search as Black against the greedy
//! baseline as White, printing the board after every turn.
//!
//! Run with `RUST_LOG=debug` to see the per-depth search progress.

use std::time::Duration;

use reversi_core::{Board, Player};
use reversi_engines::{AlphaBetaEngine, Engine, GreedyEngine, SearchConfig};

fn main() {
    env_logger::init();

    let mut board = Board::standard();
    let mut black = AlphaBetaEngine::new(SearchConfig::default());
    let mut white = GreedyEngine::new();
    let budget = Duration::from_millis(300);

    let mut color = Player::Black;
    let mut turn = 0u32;
    while !board.is_terminal() {
        turn += 1;
        let engine: &mut dyn Engine = match color {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        match engine.propose_move(&board, color, budget) {
            Some(mv) => {
                println!("turn {turn}: {color:?} plays {mv}");
                if let Err(err) = board.apply(mv, color) {
                    eprintln!("engine proposed an illegal move: {err}");
                    return;
                }
                println!("{board}");
            }
            None => println!("turn {turn}: {color:?} passes"),
        }
        color = color.opponent();
    }

    let black_stones = board.score_material(Player::Black);
    let white_stones = board.score_material(Player::White);
    println!("final score: Black {black_stones} - White {white_stones}");
    match black_stones.cmp(&white_stones) {
        std::cmp::Ordering::Greater => println!("Black wins"),
        std::cmp::Ordering::Less => println!("White wins"),
        std::cmp::Ordering::Equal => println!("draw"),
    }
}
