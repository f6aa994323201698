//! Bot-vs-bot arena runner and exhaustive game-tree verification.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::bot_strategy::BotStrategy;
use crate::engine::models::{Mark, Outcome};
use crate::games::tictactoe::board::Board;
use crate::games::tictactoe::rules::{empty_cells, outcome};

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub num_games: usize,
    pub wins: HashMap<String, usize>,
    pub draws: usize,
    pub total_scores: HashMap<String, Vec<f64>>,
    pub game_durations_ms: Vec<f64>,
}

impl ArenaResult {
    pub fn win_rate(&self, name: &str) -> f64 {
        *self.wins.get(name).unwrap_or(&0) as f64 / self.num_games.max(1) as f64
    }

    pub fn avg_score(&self, name: &str) -> f64 {
        let scores = self.total_scores.get(name);
        match scores {
            Some(s) if !s.is_empty() => s.iter().sum::<f64>() / s.len() as f64,
            _ => 0.0,
        }
    }

    /// Wilson score interval for the win rate.
    pub fn confidence_interval_95(&self, name: &str) -> (f64, f64) {
        let n = self.num_games;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate(name);
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Arena Results ({} games)", self.num_games)];
        lines.push("=".repeat(60));
        let mut names: Vec<&String> = self.wins.keys().collect();
        names.sort();
        for name in names {
            let wr = self.win_rate(name);
            let (ci_lo, ci_hi) = self.confidence_interval_95(name);
            lines.push(format!(
                "  {:>14}: {:3} wins ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]  avg={:.2}",
                name,
                self.wins[name],
                wr * 100.0,
                ci_lo * 100.0,
                ci_hi * 100.0,
                self.avg_score(name),
            ));
        }
        lines.push(format!("  {:>14}: {}", "Draws", self.draws));
        if !self.game_durations_ms.is_empty() {
            let avg_ms = self.game_durations_ms.iter().sum::<f64>() / self.game_durations_ms.len() as f64;
            let total_s = self.game_durations_ms.iter().sum::<f64>() / 1000.0;
            lines.push(format!("  Avg game: {:.2}ms  |  Total: {:.2}s", avg_ms, total_s));
        }
        lines.join("\n")
    }
}

struct GameRecord {
    x_name: String,
    o_name: String,
    outcome: Outcome,
    elapsed_ms: f64,
}

/// Play `num_games` between exactly two strategies and return aggregated stats.
///
/// Game `i` is seeded with `base_seed + i`. With `alternate_seats` the
/// strategies swap X and O every game; otherwise the first name in sorted
/// order always plays X. Games run in parallel.
pub fn run_arena(
    strategies: &HashMap<String, Box<dyn BotStrategy>>,
    num_games: usize,
    base_seed: u64,
    alternate_seats: bool,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let mut strategy_names: Vec<String> = strategies.keys().cloned().collect();
    strategy_names.sort();
    assert_eq!(strategy_names.len(), 2, "arena needs exactly two strategies");

    let completed = AtomicUsize::new(0);
    let records: Vec<GameRecord> = (0..num_games)
        .into_par_iter()
        .map(|game_idx| {
            let (x_name, o_name) = if alternate_seats && game_idx % 2 == 1 {
                (&strategy_names[1], &strategy_names[0])
            } else {
                (&strategy_names[0], &strategy_names[1])
            };
            let mut rng = StdRng::seed_from_u64(base_seed + game_idx as u64);

            let t0 = Instant::now();
            let outcome = play_one_game(strategies[x_name].as_ref(), strategies[o_name].as_ref(), &mut rng);
            let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

            if let Some(cb) = progress_callback {
                cb(completed.fetch_add(1, Ordering::Relaxed) + 1, num_games);
            }
            GameRecord { x_name: x_name.clone(), o_name: o_name.clone(), outcome, elapsed_ms }
        })
        .collect();

    let mut result = ArenaResult {
        num_games,
        wins: strategy_names.iter().map(|n| (n.clone(), 0)).collect(),
        draws: 0,
        total_scores: strategy_names.iter().map(|n| (n.clone(), Vec::new())).collect(),
        game_durations_ms: Vec::with_capacity(num_games),
    };

    for record in records {
        result.game_durations_ms.push(record.elapsed_ms);
        let (x_score, o_score) = match record.outcome.winner() {
            Some(Mark::X) => {
                *result.wins.entry(record.x_name.clone()).or_default() += 1;
                (1.0, 0.0)
            }
            Some(Mark::O) => {
                *result.wins.entry(record.o_name.clone()).or_default() += 1;
                (0.0, 1.0)
            }
            None => {
                result.draws += 1;
                (0.5, 0.5)
            }
        };
        result.total_scores.entry(record.x_name).or_default().push(x_score);
        result.total_scores.entry(record.o_name).or_default().push(o_score);
    }

    result
}

/// Play a single game from the empty board, X moving first.
pub fn play_one_game(x: &dyn BotStrategy, o: &dyn BotStrategy, rng: &mut StdRng) -> Outcome {
    let mut board = Board::new();
    let mut to_move = Mark::X;
    loop {
        let current = outcome(&board);
        if current.is_terminal() {
            return current;
        }
        let strategy = match to_move {
            Mark::X => x,
            Mark::O => o,
        };
        let chosen = match strategy.choose_move(&board, to_move, rng) {
            Some(index) if board.is_empty_at(index) => index,
            _ => {
                tracing::warn!(strategy = strategy.name(), "strategy produced no legal move");
                return Outcome::Draw;
            }
        };
        board.place(chosen, to_move);
        to_move = to_move.opponent();
    }
}

/// Tally of every game reachable when the opponent tries all replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub games: u64,
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
}

impl VerificationReport {
    fn merge(mut self, other: VerificationReport) -> VerificationReport {
        self.games += other.games;
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self
    }
}

/// Play `strategy` as `mark` against every possible sequence of opponent moves,
/// starting from the empty board with X to move.
///
/// The strategy must be deterministic for the tally to be meaningful; `seed`
/// only feeds strategies that consult the rng. The opponent's first-level
/// replies are explored in parallel.
pub fn verify_never_loses(strategy: &dyn BotStrategy, mark: Mark, seed: u64) -> VerificationReport {
    let board = Board::new();
    if mark == Mark::X {
        let mut rng = StdRng::seed_from_u64(seed);
        return explore(strategy, mark, board, Mark::X, &mut rng);
    }

    empty_cells(&board)
        .into_par_iter()
        .map(|index| {
            let mut rng = StdRng::seed_from_u64(seed);
            explore(strategy, mark, board.with_mark(index, Mark::X), Mark::O, &mut rng)
        })
        .reduce(VerificationReport::default, VerificationReport::merge)
}

fn explore(
    strategy: &dyn BotStrategy,
    mark: Mark,
    board: Board,
    to_move: Mark,
    rng: &mut StdRng,
) -> VerificationReport {
    match outcome(&board) {
        Outcome::InProgress => {}
        Outcome::Draw => return VerificationReport { games: 1, draws: 1, ..Default::default() },
        Outcome::Win { player, .. } if player == mark => {
            return VerificationReport { games: 1, wins: 1, ..Default::default() };
        }
        Outcome::Win { .. } => return VerificationReport { games: 1, losses: 1, ..Default::default() },
    }

    if to_move == mark {
        match strategy.choose_move(&board, mark, rng) {
            Some(index) if board.is_empty_at(index) => {
                explore(strategy, mark, board.with_mark(index, mark), mark.opponent(), rng)
            }
            _ => VerificationReport { games: 1, losses: 1, ..Default::default() },
        }
    } else {
        empty_cells(&board)
            .into_iter()
            .map(|index| explore(strategy, mark, board.with_mark(index, to_move), mark, rng))
            .fold(VerificationReport::default(), VerificationReport::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bot_strategy::{HeuristicStrategy, MinimaxStrategy, RandomStrategy};
    use crate::engine::minimax::SearchParams;

    #[test]
    fn test_arena_random_vs_random() {
        let mut strategies: HashMap<String, Box<dyn BotStrategy>> = HashMap::new();
        strategies.insert("random_a".into(), Box::new(RandomStrategy));
        strategies.insert("random_b".into(), Box::new(RandomStrategy));

        let result = run_arena(&strategies, 10, 42, true, None);

        assert_eq!(result.num_games, 10);
        let total_outcomes = result.wins.values().sum::<usize>() + result.draws;
        assert_eq!(total_outcomes, 10);
        assert_eq!(result.total_scores["random_a"].len(), 10);
        assert!(result.summary().contains("Arena Results (10 games)"));
    }

    #[test]
    fn test_arena_is_reproducible() {
        let mut strategies: HashMap<String, Box<dyn BotStrategy>> = HashMap::new();
        strategies.insert("easy".into(), Box::new(RandomStrategy));
        strategies.insert("medium".into(), Box::new(HeuristicStrategy));

        let a = run_arena(&strategies, 20, 7, true, None);
        let b = run_arena(&strategies, 20, 7, true, None);
        assert_eq!(a.wins, b.wins);
        assert_eq!(a.draws, b.draws);
    }

    #[test]
    fn test_minimax_never_loses_to_random() {
        let mut strategies: HashMap<String, Box<dyn BotStrategy>> = HashMap::new();
        strategies.insert("hard".into(), Box::new(MinimaxStrategy::new(SearchParams { alpha_beta: true })));
        strategies.insert("easy".into(), Box::new(RandomStrategy));

        let result = run_arena(&strategies, 20, 42, true, None);
        assert_eq!(result.wins["easy"], 0);
        assert!(result.win_rate("hard") >= 0.5, "{}", result.summary());
    }

    #[test]
    fn test_minimax_self_play_draws() {
        let strategy = MinimaxStrategy::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(play_one_game(&strategy, &strategy, &mut rng), Outcome::Draw);
    }

    #[test]
    fn test_heuristic_can_lose() {
        // Blocking one threat is not enough against a fork.
        let report = verify_never_loses(&HeuristicStrategy, Mark::O, 1);
        assert!(report.losses > 0);
        assert_eq!(report.games, report.wins + report.draws + report.losses);
    }

    #[test]
    fn test_confidence_interval_bounds() {
        let result = ArenaResult {
            num_games: 10,
            wins: [("a".to_string(), 10), ("b".to_string(), 0)].into_iter().collect(),
            draws: 0,
            total_scores: HashMap::new(),
            game_durations_ms: Vec::new(),
        };
        let (lo, hi) = result.confidence_interval_95("a");
        assert!(lo > 0.6 && hi > 0.99);
        let (lo, hi) = result.confidence_interval_95("b");
        assert!(lo < 0.01 && hi < 0.4);
    }
}
