//! Win and draw detection. All functions are pure over the board.

use crate::engine::models::{Mark, Outcome, WinningLine};
use crate::games::tictactoe::board::Board;

pub const WIN_LINES: [WinningLine; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // cols
    [0, 4, 8], [2, 4, 6],             // diagonals
];

/// First line in `WIN_LINES` order held entirely by one mark.
pub fn winning_line(board: &Board) -> Option<(Mark, WinningLine)> {
    for line in &WIN_LINES {
        let a = board.get(line[0]);
        if let Some(mark) = a {
            if a == board.get(line[1]) && a == board.get(line[2]) {
                return Some((mark, *line));
            }
        }
    }
    None
}

pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| c.is_some())
}

pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

/// A win takes precedence over a full board.
pub fn outcome(board: &Board) -> Outcome {
    if let Some((player, line)) = winning_line(board) {
        return Outcome::Win { player, line };
    }
    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Empty cell indices in ascending order.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .map(|(i, _)| i)
        .collect()
}

/// The empty cell that would complete a line for `mark`: the first line in
/// `WIN_LINES` order where `mark` holds two cells and the third is empty.
pub fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    WIN_LINES.iter().find_map(|line| {
        let owned = line.iter().filter(|&&i| board.get(i) == Some(mark)).count();
        let mut empty = line.iter().filter(|&&i| board.is_empty_at(i));
        match (owned, empty.next(), empty.next()) {
            (2, Some(&i), None) => Some(i),
            _ => None,
        }
    })
}
