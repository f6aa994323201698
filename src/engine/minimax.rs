//! Exhaustive minimax search over the tic-tac-toe game tree.
//!
//! O is the maximizer and X the minimizer (see `evaluator`). Children are
//! generated in ascending cell order and the first child with the strictly
//! best score is kept, so the chosen move is fully determined by the board.
//! Each branch works on its own copy of the board; nothing is undone.

use serde::Deserialize;

use crate::engine::evaluator::{terminal_score, DRAW_SCORE};
use crate::engine::models::Mark;
use crate::games::tictactoe::board::Board;
use crate::games::tictactoe::rules::empty_cells;

/// Minimax search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    /// Prune with alpha-beta. Visits fewer nodes and selects the same move.
    #[serde(default)]
    pub alpha_beta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen cell, `None` when the board is already terminal.
    pub index: Option<usize>,
    /// Game-theoretic value of the position under optimal play.
    pub score: i32,
    /// Positions evaluated, root included.
    pub nodes: u64,
}

/// Find the best move for `to_move` on `board`.
pub fn minimax_search(board: &Board, to_move: Mark, params: &SearchParams) -> SearchResult {
    let mut nodes = 0u64;
    let (index, score) = if params.alpha_beta {
        alpha_beta_root(board, to_move, &mut nodes)
    } else {
        minimax(board, to_move, &mut nodes)
    };
    SearchResult { index, score, nodes }
}

fn improves(to_move: Mark, candidate: i32, best: i32) -> bool {
    match to_move {
        Mark::O => candidate > best,
        Mark::X => candidate < best,
    }
}

fn minimax(board: &Board, to_move: Mark, nodes: &mut u64) -> (Option<usize>, i32) {
    *nodes += 1;
    if let Some(score) = terminal_score(board) {
        return (None, score);
    }

    let mut best: Option<(usize, i32)> = None;
    for index in empty_cells(board) {
        let child = board.with_mark(index, to_move);
        let (_, score) = minimax(&child, to_move.opponent(), nodes);
        let better = match best {
            None => true,
            Some((_, best_score)) => improves(to_move, score, best_score),
        };
        if better {
            best = Some((index, score));
        }
    }

    match best {
        Some((index, score)) => (Some(index), score),
        None => (None, DRAW_SCORE),
    }
}

// The root never cuts off, and a child whose true value does not beat the
// current bound returns a value no better than that bound, so the strict
// comparison picks the same first-best child as the plain search.
fn alpha_beta_root(board: &Board, to_move: Mark, nodes: &mut u64) -> (Option<usize>, i32) {
    *nodes += 1;
    if let Some(score) = terminal_score(board) {
        return (None, score);
    }

    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best: Option<(usize, i32)> = None;
    for index in empty_cells(board) {
        let child = board.with_mark(index, to_move);
        let score = alpha_beta(&child, to_move.opponent(), alpha, beta, nodes);
        let better = match best {
            None => true,
            Some((_, best_score)) => improves(to_move, score, best_score),
        };
        if better {
            best = Some((index, score));
        }
        match to_move {
            Mark::O => alpha = alpha.max(score),
            Mark::X => beta = beta.min(score),
        }
    }

    match best {
        Some((index, score)) => (Some(index), score),
        None => (None, DRAW_SCORE),
    }
}

fn alpha_beta(board: &Board, to_move: Mark, mut alpha: i32, mut beta: i32, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if let Some(score) = terminal_score(board) {
        return score;
    }

    match to_move {
        Mark::O => {
            let mut value = i32::MIN;
            for index in empty_cells(board) {
                let child = board.with_mark(index, Mark::O);
                value = value.max(alpha_beta(&child, Mark::X, alpha, beta, nodes));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
        Mark::X => {
            let mut value = i32::MAX;
            for index in empty_cells(board) {
                let child = board.with_mark(index, Mark::X);
                value = value.min(alpha_beta(&child, Mark::O, alpha, beta, nodes));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}
