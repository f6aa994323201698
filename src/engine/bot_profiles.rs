//! Named bot profiles and game settings.
//! Loaded from TOML at runtime for the interactive host and the arena CLI.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::bot_strategy::{
    default_strategy, BotStrategy, HeuristicStrategy, MinimaxStrategy, RandomStrategy,
};
use crate::engine::minimax::SearchParams;
use crate::engine::models::Difficulty;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    Random,
    Heuristic,
    Minimax,
}

/// A named bot profile: which strategy to play and how.
#[derive(Debug, Deserialize, Clone)]
pub struct BotProfile {
    pub description: Option<String>,
    pub strategy_type: StrategyType,
    /// Minimax only; ignored by the other strategies.
    pub alpha_beta: Option<bool>,
}

impl BotProfile {
    pub fn to_search_params(&self) -> SearchParams {
        let d = SearchParams::default();
        SearchParams {
            alpha_beta: self.alpha_beta.unwrap_or(d.alpha_beta),
        }
    }

    pub fn build_strategy(&self) -> Box<dyn BotStrategy> {
        match self.strategy_type {
            StrategyType::Random => Box::new(RandomStrategy),
            StrategyType::Heuristic => Box::new(HeuristicStrategy),
            StrategyType::Minimax => Box::new(MinimaxStrategy::new(self.to_search_params())),
        }
    }
}

/// Maps difficulty tiers to profile names.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ProductionConfig {
    pub easy: Option<String>,
    pub medium: Option<String>,
    pub hard: Option<String>,
}

impl ProductionConfig {
    pub fn resolve(&self, difficulty: Difficulty) -> Option<&str> {
        match difficulty {
            Difficulty::Easy => self.easy.as_deref(),
            Difficulty::Medium => self.medium.as_deref(),
            Difficulty::Hard => self.hard.as_deref(),
        }
    }
}

/// Host-level game settings.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    pub difficulty: Difficulty,
    /// Pause before the computer answers, for pacing only.
    pub computer_delay_ms: u64,
    /// Pause between game over and the automatic reset.
    pub reset_delay_ms: u64,
    /// Seeds the random strategy; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            computer_delay_ms: 100,
            reset_delay_ms: 2000,
            seed: None,
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BotProfilesFile {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub profiles: HashMap<String, BotProfile>,
    #[serde(default)]
    pub production: ProductionConfig,
}

impl BotProfilesFile {
    /// Strategy for a difficulty tier. Falls back to the built-in tier strategy
    /// when the tier is unmapped or names a missing profile.
    pub fn strategy_for(&self, difficulty: Difficulty) -> Box<dyn BotStrategy> {
        if let Some(name) = self.production.resolve(difficulty) {
            match self.profiles.get(name) {
                Some(profile) => return profile.build_strategy(),
                None => {
                    tracing::warn!(profile = name, %difficulty, "unknown bot profile, using built-in strategy");
                }
            }
        }
        default_strategy(difficulty)
    }

    /// Strategy for a CLI selector: a difficulty tier name or a profile name.
    pub fn strategy_by_name(&self, name: &str) -> Option<Box<dyn BotStrategy>> {
        if let Some(profile) = self.profiles.get(name) {
            return Some(profile.build_strategy());
        }
        name.parse::<Difficulty>().ok().map(|d| self.strategy_for(d))
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<BotProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Try to load profiles from well-known paths, returning a default if none found.
pub fn load_default_profiles() -> BotProfilesFile {
    let candidates = [
        "bot_profiles.toml",
        "../bot_profiles.toml",
        "/etc/tictactoe/bot_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded bot profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load bot profiles");
                }
            }
        }
    }
    tracing::info!("no bot_profiles.toml found, using built-in defaults");
    BotProfilesFile::default()
}
