//! Board defaults and strategy configuration.

use core::fmt;
use core::str::FromStr;
use core::time::Duration;

use crate::learner::PatternWeights;

pub const DEFAULT_BOARD_SIZE: usize = 10;
pub const DEFAULT_FLEET: [usize; 5] = [5, 4, 3, 3, 2];
/// Largest board the column-letter notation can address.
pub const MAX_BOARD_SIZE: usize = 26;

/// Default smoothing factor for the pattern learner.
pub const DEFAULT_LEARNING_RATE: f64 = 0.2;

/// Which decision unit picks the next cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum StrategyVariant {
    /// Hunt/target state machine over the plain heat map.
    #[default]
    Hunting,
    /// Hunt/target over a heat map biased by learned placement weights.
    Adaptive,
    /// Hunt/target with a Monte-Carlo overlay once the board is busy enough.
    SimulationSearch,
}

/// Candidate filter applied while hunting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum HuntPattern {
    /// Only cells with `(x + y) % 2 == 0`.
    #[default]
    Checkerboard,
    /// Every undetermined cell.
    None,
    /// The lowest anti-diagonal that still has undetermined cells.
    Diagonal,
    /// Every undetermined cell, ties broken towards the centre.
    Spiral,
}

/// Iteration and wall-clock limits for the simulation search. Whichever
/// limit is reached first ends the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct SimulationBudget {
    pub max_simulations: u32,
    /// `None` disables the wall-clock limit.
    pub max_duration_ms: Option<u64>,
}

impl SimulationBudget {
    pub fn max_duration(&self) -> Option<Duration> {
        self.max_duration_ms.map(Duration::from_millis)
    }

    /// A purely count-based budget, for reproducible runs.
    pub fn iterations(max_simulations: u32) -> Self {
        Self {
            max_simulations,
            max_duration_ms: None,
        }
    }
}

impl Default for SimulationBudget {
    fn default() -> Self {
        Self {
            max_simulations: 100,
            max_duration_ms: Some(2_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct SimulationConfig {
    pub budget: SimulationBudget,
    /// Search only engages with at least this many undetermined cells.
    pub min_remaining_cells: usize,
    /// Search only engages after this many shots.
    pub min_shots_fired: usize,
    /// Maximum simulated shots per playout.
    pub shot_cap: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            budget: SimulationBudget::default(),
            min_remaining_cells: 10,
            min_shots_fired: 5,
            shot_cap: 50,
        }
    }
}

/// Everything `choose_cell` needs to know besides the board.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct StrategyConfig {
    pub variant: StrategyVariant,
    pub hunt_pattern: HuntPattern,
    pub simulation: SimulationConfig,
    pub weights: PatternWeights,
    /// Probability of an exploratory top-five pick while hunting (Adaptive only).
    pub exploration_rate: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            variant: StrategyVariant::Hunting,
            hunt_pattern: HuntPattern::Checkerboard,
            simulation: SimulationConfig::default(),
            weights: PatternWeights::default(),
            exploration_rate: 0.0,
        }
    }
}

impl StrategyConfig {
    pub fn with_variant(mut self, variant: StrategyVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_hunt_pattern(mut self, pattern: HuntPattern) -> Self {
        self.hunt_pattern = pattern;
        self
    }

    pub fn with_budget(mut self, budget: SimulationBudget) -> Self {
        self.simulation.budget = budget;
        self
    }

    pub fn with_weights(mut self, weights: PatternWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Reject values outside their documented ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("exploration_rate", self.exploration_rate)?;
        self.weights.validate()
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Named presets mirroring the classic difficulty ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
    Nightmare,
}

impl Difficulty {
    pub fn config(self) -> StrategyConfig {
        let base = StrategyConfig::default();
        match self {
            Difficulty::Easy => base.with_hunt_pattern(HuntPattern::None),
            Difficulty::Medium => base,
            Difficulty::Hard => StrategyConfig {
                exploration_rate: 0.15,
                ..base.with_variant(StrategyVariant::Adaptive)
            },
            Difficulty::Expert => base
                .with_variant(StrategyVariant::SimulationSearch)
                .with_budget(SimulationBudget {
                    max_simulations: 200,
                    max_duration_ms: Some(3_000),
                }),
            Difficulty::Nightmare => base
                .with_variant(StrategyVariant::SimulationSearch)
                .with_budget(SimulationBudget {
                    max_simulations: 500,
                    max_duration_ms: Some(5_000),
                }),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            "nightmare" => Ok(Difficulty::Nightmare),
            _ => Err(ConfigError::UnknownDifficulty),
        }
    }
}

/// Errors raised while building boards or strategy configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A weight or rate fell outside its allowed range.
    OutOfRange { field: &'static str, value: f64 },
    /// Board size is zero or larger than [`MAX_BOARD_SIZE`].
    InvalidBoardSize(usize),
    /// Fleet is empty, or a ship has length zero or does not fit the board.
    InvalidFleet,
    UnknownDifficulty,
    /// Configuration text could not be parsed.
    #[cfg(feature = "std")]
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange { field, value } => {
                write!(f, "Configuration value {} = {} is out of range", field, value)
            }
            ConfigError::InvalidBoardSize(size) => write!(
                f,
                "Board size {} is invalid (must be 1..={})",
                size, MAX_BOARD_SIZE
            ),
            ConfigError::InvalidFleet => write!(f, "Fleet does not fit the board"),
            ConfigError::UnknownDifficulty => write!(f, "Unknown difficulty name"),
            #[cfg(feature = "std")]
            ConfigError::Parse(msg) => write!(f, "Failed to parse configuration: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
