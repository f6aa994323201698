//! Tic-tac-toe board and rules.
//!
//! The board is a plain value type; everything in `rules` is a pure function
//! over it, so strategies can simulate positions by copying.

pub mod board;
pub mod rules;
