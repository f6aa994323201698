//! The 3x3 grid. Index `i` is row `i / 3`, column `i % 3`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::models::Mark;

pub const NUM_CELLS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; NUM_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; NUM_CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; NUM_CELLS] {
        &self.cells
    }

    /// Mark at `index`, or `None` for an empty or out-of-range cell.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// Places `mark` on an empty cell. Occupied or out-of-range cells are left
    /// untouched and `false` is returned.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_empty_at(index) {
            return false;
        }
        self.cells[index] = Some(mark);
        true
    }

    /// A copy of this board with `mark` placed at `index`.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        next.place(index, mark);
        next
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Whose turn it is, assuming X moved first and turns alternated.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }
}

impl FromStr for Board {
    type Err = String;

    /// Parses 9 cell characters in index order: `X`/`O` for marks, `.`, `-`,
    /// `_` or space for empty. `|` and newlines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; NUM_CELLS];
        let mut i = 0;
        for ch in s.chars().filter(|c| *c != '|' && *c != '\n' && *c != '\r') {
            if i >= NUM_CELLS {
                return Err(format!("board '{}' has more than {} cells", s, NUM_CELLS));
            }
            cells[i] = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '-' | '_' | ' ' => None,
                other => return Err(format!("invalid cell character '{}'", other)),
            };
            i += 1;
        }
        if i != NUM_CELLS {
            return Err(format!("board '{}' has {} cells, expected {}", s, i, NUM_CELLS));
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: Vec<String> = row
                .iter()
                .map(|c| c.map_or_else(|| ".".to_string(), |m| m.to_string()))
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::new();
        assert!(board.place(4, Mark::X));
        assert!(!board.place(4, Mark::O));
        assert_eq!(board.get(4), Some(Mark::X));
        assert!(!board.place(9, Mark::O));
        assert_eq!(board.empty_count(), 8);
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::new();
        let next = board.with_mark(0, Mark::O);
        assert_eq!(board.get(0), None);
        assert_eq!(next.get(0), Some(Mark::O));
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "XX.OO....".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(3), Some(Mark::O));
        assert!(board.is_empty_at(2));
        assert_eq!(board.to_string(), "X|X|.\nO|O|.\n.|.|.\n");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);

        assert!("XX".parse::<Board>().is_err());
        assert!("XXXXXXXXXX".parse::<Board>().is_err());
        assert!("XX.OO...Z".parse::<Board>().is_err());
    }

    #[test]
    fn test_to_move_alternates() {
        let mut board = Board::new();
        assert_eq!(board.to_move(), Mark::X);
        board.place(4, Mark::X);
        assert_eq!(board.to_move(), Mark::O);
        board.place(0, Mark::O);
        assert_eq!(board.to_move(), Mark::X);
    }
}
