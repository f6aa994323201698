//! Arena CLI — run strategy-vs-strategy experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 100 --p1 hard --p2 easy
//!   cargo run --release --bin arena -- --p1 medium --verify

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tictactoe_engine::engine::arena::{run_arena, verify_never_loses};
use tictactoe_engine::engine::bot_profiles::{load_default_profiles, load_profiles, BotProfilesFile};
use tictactoe_engine::engine::bot_strategy::BotStrategy;
use tictactoe_engine::engine::models::Mark;

#[derive(Parser)]
#[command(name = "arena", about = "Run bot-vs-bot arena experiments for tic-tac-toe")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value = "true")]
    alternate_seats: bool,

    /// Path to bot_profiles.toml
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// P1 strategy: a difficulty (easy, medium, hard) or a profile name
    #[arg(long, default_value = "hard")]
    p1: String,

    /// P2 strategy: a difficulty (easy, medium, hard) or a profile name
    #[arg(long, default_value = "easy")]
    p2: String,

    /// Instead of playing, check P1 against every possible opponent line
    #[arg(long)]
    verify: bool,
}

fn build_strategy(profiles: &BotProfilesFile, name: &str) -> Result<Box<dyn BotStrategy>, String> {
    profiles.strategy_by_name(name).ok_or_else(|| {
        let mut known: Vec<&String> = profiles.profiles.keys().collect();
        known.sort();
        format!("unknown strategy '{}' (difficulties: easy, medium, hard; profiles: {:?})", name, known)
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let p1 = build_strategy(&profiles, &cli.p1)?;

    if cli.verify {
        for mark in [Mark::X, Mark::O] {
            let report = verify_never_loses(p1.as_ref(), mark, cli.seed);
            println!(
                "{} as {}: {} games, {} wins, {} draws, {} losses",
                cli.p1, mark, report.games, report.wins, report.draws, report.losses
            );
        }
        return Ok(());
    }

    let p2 = build_strategy(&profiles, &cli.p2)?;
    if cli.p1 == cli.p2 {
        return Err("p1 and p2 must differ".into());
    }

    eprintln!("Arena: {} games, seed={}, alternate_seats={}", cli.games, cli.seed, cli.alternate_seats);
    eprintln!("  {}: {}", cli.p1, p1.name());
    eprintln!("  {}: {}", cli.p2, p2.name());
    eprintln!();

    let mut strategies: HashMap<String, Box<dyn BotStrategy>> = HashMap::new();
    strategies.insert(cli.p1.clone(), p1);
    strategies.insert(cli.p2.clone(), p2);

    let total = cli.games;
    let progress_cb = move |done: usize, _total: usize| {
        eprint!("\r  [{}/{}] games completed", done, total);
    };

    let result = run_arena(&strategies, cli.games, cli.seed, cli.alternate_seats, Some(&progress_cb));

    eprintln!("\r                                    "); // clear progress line
    println!("{}", result.summary());
    Ok(())
}
