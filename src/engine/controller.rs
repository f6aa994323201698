//! Turn-by-turn game controller: the only owner and mutator of the board.
//!
//! The human always plays X and moves first; the computer plays O with the
//! strategy selected by the current difficulty. The computer's move is a
//! separate call so a host can pace it with a delay. Every accepted request
//! returns the events the presentation layer should render.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engine::bot_profiles::{BotProfilesFile, GameSettings};
use crate::engine::models::{Difficulty, GameEvent, Mark, Outcome};
use crate::games::tictactoe::board::{Board, NUM_CELLS};
use crate::games::tictactoe::rules;

pub const HUMAN_MARK: Mark = Mark::X;
pub const COMPUTER_MARK: Mark = Mark::O;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    AwaitingHuman,
    ComputerThinking,
    GameOver(Outcome),
}

/// Why a request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    OutOfRange(usize),
    Occupied(usize),
    NotHumansTurn,
    NotComputersTurn,
    GameOver,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::OutOfRange(i) => write!(f, "cell {} is out of range (0-8)", i),
            MoveRejection::Occupied(i) => write!(f, "cell {} is already occupied", i),
            MoveRejection::NotHumansTurn => f.write_str("it is not the human's turn"),
            MoveRejection::NotComputersTurn => f.write_str("it is not the computer's turn"),
            MoveRejection::GameOver => f.write_str("the game is over"),
        }
    }
}

impl std::error::Error for MoveRejection {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Applied(Vec<GameEvent>),
    /// Nothing changed.
    Ignored(MoveRejection),
}

impl MoveResult {
    pub fn events(&self) -> &[GameEvent] {
        match self {
            MoveResult::Applied(events) => events,
            MoveResult::Ignored(_) => &[],
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied(_))
    }
}

pub struct GameController {
    board: Board,
    state: ControllerState,
    difficulty: Difficulty,
    profiles: BotProfilesFile,
    rng: StdRng,
}

impl GameController {
    pub fn new(profiles: BotProfilesFile) -> Self {
        let rng = match profiles.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            board: Board::new(),
            state: ControllerState::AwaitingHuman,
            difficulty: profiles.game.difficulty,
            profiles,
            rng,
        }
    }

    /// Built-in strategies with a fixed seed.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        let mut profiles = BotProfilesFile::default();
        profiles.game.difficulty = difficulty;
        profiles.game.seed = Some(seed);
        Self::new(profiles)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn settings(&self) -> &GameSettings {
        &self.profiles.game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect from the next computer move.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        tracing::debug!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        self.difficulty = difficulty;
    }

    /// Place X at `index`. Afterwards the controller is either game over or
    /// waiting for `play_computer_move`.
    pub fn submit_human_move(&mut self, index: usize) -> MoveResult {
        match self.state {
            ControllerState::AwaitingHuman => {}
            ControllerState::ComputerThinking => return self.ignore(MoveRejection::NotHumansTurn),
            ControllerState::GameOver(_) => return self.ignore(MoveRejection::GameOver),
        }
        if index >= NUM_CELLS {
            return self.ignore(MoveRejection::OutOfRange(index));
        }
        if !self.board.is_empty_at(index) {
            return self.ignore(MoveRejection::Occupied(index));
        }

        MoveResult::Applied(self.apply(index, HUMAN_MARK))
    }

    /// Ask the current difficulty's strategy for O's move and apply it.
    pub fn play_computer_move(&mut self) -> MoveResult {
        match self.state {
            ControllerState::ComputerThinking => {}
            ControllerState::AwaitingHuman => return self.ignore(MoveRejection::NotComputersTurn),
            ControllerState::GameOver(_) => return self.ignore(MoveRejection::GameOver),
        }

        let strategy = self.profiles.strategy_for(self.difficulty);
        // The state machine only gets here on a non-terminal board.
        let Some(index) = strategy.choose_move(&self.board, COMPUTER_MARK, &mut self.rng) else {
            return self.ignore(MoveRejection::GameOver);
        };
        tracing::debug!(index, strategy = strategy.name(), difficulty = %self.difficulty, "computer move");
        if !self.board.is_empty_at(index) {
            return self.ignore(MoveRejection::Occupied(index));
        }

        MoveResult::Applied(self.apply(index, COMPUTER_MARK))
    }

    /// Human move immediately followed by the computer's reply, without pacing.
    pub fn play_turn(&mut self, index: usize) -> MoveResult {
        let mut events = match self.submit_human_move(index) {
            MoveResult::Applied(events) => events,
            ignored => return ignored,
        };
        if let MoveResult::Applied(more) = self.play_computer_move() {
            events.extend(more);
        }
        MoveResult::Applied(events)
    }

    /// Start a new game with a cleared board. Accepted in any state.
    pub fn reset(&mut self) -> Vec<GameEvent> {
        self.board = Board::new();
        self.state = ControllerState::AwaitingHuman;
        tracing::debug!("game reset");
        vec![GameEvent::Reset]
    }

    fn apply(&mut self, index: usize, mark: Mark) -> Vec<GameEvent> {
        self.board.place(index, mark);
        let mut events = vec![GameEvent::BoardChanged { board: self.board, index, mark }];

        let outcome = rules::outcome(&self.board);
        self.state = if outcome.is_terminal() {
            tracing::debug!(?outcome, "game over");
            events.push(GameEvent::GameOver { outcome });
            ControllerState::GameOver(outcome)
        } else {
            match mark {
                Mark::X => ControllerState::ComputerThinking,
                Mark::O => ControllerState::AwaitingHuman,
            }
        };
        events
    }

    fn ignore(&self, reason: MoveRejection) -> MoveResult {
        tracing::debug!(state = ?self.state, %reason, "ignoring move request");
        MoveResult::Ignored(reason)
    }
}
