use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::bot_profiles::{load_default_profiles, load_profiles};
use tictactoe_engine::engine::controller::{ControllerState, GameController, MoveResult};
use tictactoe_engine::engine::models::{Difficulty, GameEvent, Outcome};

#[derive(Parser)]
#[command(name = "tictactoe-engine", about = "Play tic-tac-toe against the computer")]
struct Cli {
    /// Computer difficulty: easy, medium or hard
    #[arg(short, long, env = "TICTACTOE_DIFFICULTY")]
    difficulty: Option<Difficulty>,

    /// Path to bot_profiles.toml (default: auto-discover)
    #[arg(long, env = "TICTACTOE_PROFILES")]
    profiles: Option<PathBuf>,

    /// Seed for the random strategy
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the pacing delays before computer moves and resets
    #[arg(long)]
    no_delay: bool,

    /// Print game events as JSON lines instead of a text board
    #[arg(long)]
    json: bool,
}

enum Command {
    Move(usize),
    Difficulty(Difficulty),
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("quit") | Some("exit") | Some("q") => Ok(Command::Quit),
        Some("reset") | Some("new") => Ok(Command::Reset),
        Some("difficulty") | Some("d") => {
            let value = words.next().ok_or("usage: difficulty <easy|medium|hard>")?;
            Ok(Command::Difficulty(value.parse()?))
        }
        Some(word) => word
            .parse::<usize>()
            .map(Command::Move)
            .map_err(|_| format!("unknown command '{}'", word)),
        None => Err("enter a cell 0-8, 'difficulty <level>', 'reset' or 'quit'".into()),
    }
}

struct Renderer {
    json: bool,
}

impl Renderer {
    fn render(&self, events: &[GameEvent]) -> Result<(), serde_json::Error> {
        for event in events {
            if self.json {
                println!("{}", serde_json::to_string(event)?);
                continue;
            }
            match event {
                GameEvent::BoardChanged { board, index, mark } => {
                    println!("{} -> {}\n{}", mark, index, board);
                }
                GameEvent::GameOver { outcome } => match outcome {
                    Outcome::Win { line, .. } => println!("{} (line {:?})", outcome, line),
                    _ => println!("{}", outcome),
                },
                GameEvent::Reset => println!("New game. You are X; enter a cell 0-8."),
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut profiles = match cli.profiles {
        Some(ref path) => load_profiles(path).map_err(|e| format!("Failed to load profiles: {}", e))?,
        None => load_default_profiles(),
    };
    if let Some(difficulty) = cli.difficulty {
        profiles.game.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        profiles.game.seed = cli.seed;
    }
    if cli.no_delay {
        profiles.game.computer_delay_ms = 0;
        profiles.game.reset_delay_ms = 0;
    }

    let computer_delay = Duration::from_millis(profiles.game.computer_delay_ms);
    let reset_delay = Duration::from_millis(profiles.game.reset_delay_ms);
    let mut game = GameController::new(profiles);
    tracing::info!(difficulty = %game.difficulty(), "starting game");

    let renderer = Renderer { json: cli.json };
    renderer.render(&game.reset())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Reset => renderer.render(&game.reset())?,
            Command::Difficulty(d) => {
                game.set_difficulty(d);
                eprintln!("difficulty set to {}", d);
            }
            Command::Move(index) => {
                match game.submit_human_move(index) {
                    MoveResult::Applied(events) => renderer.render(&events)?,
                    MoveResult::Ignored(reason) => {
                        eprintln!("move ignored: {}", reason);
                        continue;
                    }
                }

                if game.state() == ControllerState::ComputerThinking {
                    tokio::time::sleep(computer_delay).await;
                    renderer.render(game.play_computer_move().events())?;
                }

                if let ControllerState::GameOver(outcome) = game.state() {
                    tracing::info!(?outcome, "game finished");
                    tokio::time::sleep(reset_delay).await;
                    renderer.render(&game.reset())?;
                }
            }
        }
    }

    Ok(())
}
