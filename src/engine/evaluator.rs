//! Leaf evaluation for the minimax search.
//!
//! Scores are from O's point of view: O maximizes, X minimizes. They do not
//! depend on search depth, so a quick win and a slow win score the same.

use crate::engine::models::Mark;
use crate::games::tictactoe::board::Board;
use crate::games::tictactoe::rules::{is_full, winner};

pub const O_WIN_SCORE: i32 = 10;
pub const X_WIN_SCORE: i32 = -10;
pub const DRAW_SCORE: i32 = 0;

/// Score of a terminal board, or `None` while the game is still open.
pub fn terminal_score(board: &Board) -> Option<i32> {
    match winner(board) {
        Some(Mark::O) => Some(O_WIN_SCORE),
        Some(Mark::X) => Some(X_WIN_SCORE),
        None if is_full(board) => Some(DRAW_SCORE),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_scores() {
        assert_eq!(terminal_score(&"OOOXX.X..".parse().unwrap()), Some(O_WIN_SCORE));
        assert_eq!(terminal_score(&"XXXOO.O..".parse().unwrap()), Some(X_WIN_SCORE));
        assert_eq!(terminal_score(&"XOXXOOOXX".parse().unwrap()), Some(DRAW_SCORE));
        assert_eq!(terminal_score(&Board::new()), None);
    }
}
