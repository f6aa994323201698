//! Bot strategy trait and the three computer opponents.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::engine::minimax::{minimax_search, SearchParams};
use crate::engine::models::{Difficulty, Mark};
use crate::games::tictactoe::board::Board;
use crate::games::tictactoe::rules::{completing_cell, empty_cells};

/// A bot strategy picks a cell for `mark` on the given board.
///
/// Strategies only read the board. They return `None` when no cell is empty;
/// callers are expected not to ask on a terminal board.
pub trait BotStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn choose_move(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<usize>;
}

/// Picks a uniformly random empty cell.
pub struct RandomStrategy;

impl BotStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&self, board: &Board, _mark: Mark, rng: &mut dyn RngCore) -> Option<usize> {
        empty_cells(board).choose(rng).copied()
    }
}

/// Completes its own line if it can, otherwise blocks the opponent's,
/// otherwise plays randomly.
pub struct HeuristicStrategy;

impl BotStrategy for HeuristicStrategy {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_move(&self, board: &Board, mark: Mark, rng: &mut dyn RngCore) -> Option<usize> {
        if let Some(index) = completing_cell(board, mark) {
            return Some(index);
        }
        if let Some(index) = completing_cell(board, mark.opponent()) {
            return Some(index);
        }
        RandomStrategy.choose_move(board, mark, rng)
    }
}

/// Wraps the minimax search as a BotStrategy.
#[derive(Default)]
pub struct MinimaxStrategy {
    pub params: SearchParams,
}

impl MinimaxStrategy {
    pub fn new(params: SearchParams) -> Self {
        Self { params }
    }
}

impl BotStrategy for MinimaxStrategy {
    fn name(&self) -> &str {
        if self.params.alpha_beta {
            "minimax_pruned"
        } else {
            "minimax"
        }
    }

    fn choose_move(&self, board: &Board, mark: Mark, _rng: &mut dyn RngCore) -> Option<usize> {
        let result = minimax_search(board, mark, &self.params);
        tracing::debug!(
            index = ?result.index,
            score = result.score,
            nodes = result.nodes,
            alpha_beta = self.params.alpha_beta,
            "minimax search finished"
        );
        result.index
    }
}

/// The built-in strategy for a difficulty tier.
pub fn default_strategy(difficulty: Difficulty) -> Box<dyn BotStrategy> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomStrategy),
        Difficulty::Medium => Box::new(HeuristicStrategy),
        Difficulty::Hard => Box::new(MinimaxStrategy::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_random_picks_empty_cells_only() {
        let b = board("XOXOX.O.X");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let index = RandomStrategy.choose_move(&b, Mark::O, &mut rng).unwrap();
            assert!(index == 5 || index == 7, "picked occupied cell {}", index);
        }
    }

    #[test]
    fn test_random_covers_all_empty_cells() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 9];
        for _ in 0..500 {
            let index = RandomStrategy.choose_move(&Board::new(), Mark::O, &mut rng).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_random_on_full_board() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(RandomStrategy.choose_move(&board("XOXXOOOXX"), Mark::O, &mut rng), None);
    }

    #[test]
    fn test_heuristic_completes_middle_row() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(HeuristicStrategy.choose_move(&board("...OO...."), Mark::O, &mut rng), Some(5));
    }

    #[test]
    fn test_heuristic_prefers_win_over_block() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(HeuristicStrategy.choose_move(&board("XX.OO...."), Mark::O, &mut rng), Some(5));
    }

    #[test]
    fn test_heuristic_blocks_threat() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(HeuristicStrategy.choose_move(&board("X..X.O..."), Mark::O, &mut rng), Some(6));
        assert_eq!(HeuristicStrategy.choose_move(&board("XO..X...."), Mark::O, &mut rng), Some(8));
    }

    #[test]
    fn test_heuristic_plays_for_x() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(HeuristicStrategy.choose_move(&board("XX.OO...."), Mark::X, &mut rng), Some(2));
    }

    #[test]
    fn test_heuristic_falls_back_to_random() {
        let b = board("X........");
        let mut rng = StdRng::seed_from_u64(3);
        let index = HeuristicStrategy.choose_move(&b, Mark::O, &mut rng).unwrap();
        assert!(b.is_empty_at(index));
    }

    #[test]
    fn test_minimax_strategy_is_deterministic() {
        let b = board("....X....");
        let strategy = MinimaxStrategy::default();
        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(2);
        assert_eq!(strategy.choose_move(&b, Mark::O, &mut rng_a), Some(0));
        assert_eq!(strategy.choose_move(&b, Mark::O, &mut rng_b), Some(0));
    }

    #[test]
    fn test_default_strategy_per_difficulty() {
        assert_eq!(default_strategy(Difficulty::Easy).name(), "random");
        assert_eq!(default_strategy(Difficulty::Medium).name(), "heuristic");
        assert_eq!(default_strategy(Difficulty::Hard).name(), "minimax");
    }
}
