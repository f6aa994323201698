//! Core engine data types shared by the rules, strategies and controller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::games::tictactoe::board::Board;

/// One of the 8 index-triples that make up a row, column or diagonal.
pub type WinningLine = [usize; 3];

/// A mark placed in a cell. X is the human side, O the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// Which strategy the computer plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (expected easy, medium or hard)", other)),
        }
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Win { player: Mark, line: WinningLine },
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => f.write_str("in progress"),
            Outcome::Win { player, .. } => write!(f, "{} wins!", player),
            Outcome::Draw => f.write_str("It's a tie!"),
        }
    }
}

/// Events emitted by the controller for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BoardChanged { board: Board, index: usize, mark: Mark },
    GameOver { outcome: Outcome },
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert!("impossible".parse::<Difficulty>().is_err());
        for d in Difficulty::ALL {
            assert_eq!(d.as_str().parse::<Difficulty>(), Ok(d));
        }
    }

    #[test]
    fn test_outcome_json() {
        let outcome = Outcome::Win { player: Mark::O, line: [2, 4, 6] };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json, serde_json::json!({"result": "win", "player": "O", "line": [2, 4, 6]}));
        assert_eq!(serde_json::to_value(Outcome::Draw).unwrap(), serde_json::json!({"result": "draw"}));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(Outcome::Win { player: Mark::X, line: [0, 1, 2] }.to_string(), "X wins!");
        assert_eq!(Outcome::Draw.to_string(), "It's a tie!");
        assert!(!Outcome::InProgress.is_terminal());
    }
}
