//! Hunt/target decision making.
//!
//! The board is either being *hunted* (no live hit) or *targeted* (some hit
//! still belongs to an afloat ship). Targeting proposes the cells that would
//! extend each group of live hits; hunting scans the undetermined cells,
//! optionally thinned by a pattern. Either way the hottest candidate wins,
//! ties going to the earliest cell in row-major order.

use alloc::vec::Vec;

use rand::Rng;

use crate::board::BoardState;
use crate::common::{Cell, TargetingError};
use crate::config::{HuntPattern, SimulationConfig, StrategyConfig, StrategyVariant};
use crate::field::ProbabilityField;
use crate::learner::PatternWeights;
use crate::simulation::{self, Clock};

/// Size of the pool an exploratory adaptive pick draws from.
const EXPLORATION_POOL: usize = 5;

/// Current phase of the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingMode {
    /// No unsunk hit to pursue.
    Hunting,
    /// At least one hit belongs to a ship that is still afloat.
    Targeting,
}

impl TargetingMode {
    pub fn of(board: &BoardState) -> Self {
        if board.unsunk_hits().is_empty() {
            TargetingMode::Hunting
        } else {
            TargetingMode::Targeting
        }
    }
}

/// The decision unit selected by configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetingStrategy {
    Hunting {
        pattern: HuntPattern,
    },
    Adaptive {
        pattern: HuntPattern,
        weights: PatternWeights,
        exploration_rate: f64,
    },
    SimulationSearch {
        pattern: HuntPattern,
        simulation: SimulationConfig,
    },
}

impl From<&StrategyConfig> for TargetingStrategy {
    fn from(config: &StrategyConfig) -> Self {
        let pattern = config.hunt_pattern;
        match config.variant {
            StrategyVariant::Hunting => TargetingStrategy::Hunting { pattern },
            StrategyVariant::Adaptive => TargetingStrategy::Adaptive {
                pattern,
                weights: config.weights,
                exploration_rate: config.exploration_rate,
            },
            StrategyVariant::SimulationSearch => TargetingStrategy::SimulationSearch {
                pattern,
                simulation: config.simulation,
            },
        }
    }
}

impl TargetingStrategy {
    fn pattern(&self) -> HuntPattern {
        match self {
            TargetingStrategy::Hunting { pattern }
            | TargetingStrategy::Adaptive { pattern, .. }
            | TargetingStrategy::SimulationSearch { pattern, .. } => *pattern,
        }
    }

    /// The heat map this strategy ranks candidates by.
    pub fn field(&self, board: &BoardState) -> ProbabilityField {
        match self {
            TargetingStrategy::Adaptive { weights, .. } => {
                ProbabilityField::weighted(board, weights)
            }
            _ => ProbabilityField::compute(board),
        }
    }

    /// Pick the next cell to fire at.
    ///
    /// Never fails while an undetermined cell remains.
    pub fn choose_cell<R, C>(
        &self,
        board: &BoardState,
        rng: &mut R,
        clock: &C,
    ) -> Result<Cell, TargetingError>
    where
        R: Rng + ?Sized,
        C: Clock + ?Sized,
    {
        if board.undetermined().is_empty() {
            log::warn!("asked for a target on a fully resolved board");
            return Err(TargetingError::NoTargetsRemaining);
        }

        let field = self.field(board);
        let mut mode = TargetingMode::of(board);
        let mut candidates = match mode {
            TargetingMode::Targeting => targeting_candidates(board),
            TargetingMode::Hunting => Vec::new(),
        };
        if candidates.is_empty() {
            if mode == TargetingMode::Targeting {
                log::debug!("every live hit group is blocked, hunting instead");
            }
            mode = TargetingMode::Hunting;
            candidates = hunting_candidates(board, self.pattern());
        }

        if let TargetingStrategy::SimulationSearch { simulation, .. } = self {
            if simulation::engages(board, simulation) {
                let outcome =
                    simulation::search(board, &field, &candidates, simulation, rng, clock)
                        .ok_or(TargetingError::NoTargetsRemaining)?;
                log::debug!(
                    "simulation search chose {} after {} runs (avg reward {:.3})",
                    outcome.cell,
                    outcome.simulations,
                    outcome.average_reward
                );
                return Ok(outcome.cell);
            }
        }

        if field.is_zero() {
            let cell = candidates[rng.random_range(0..candidates.len())];
            log::debug!("{:?}: flat heat map, picked {} at random", mode, cell);
            return Ok(cell);
        }

        if let TargetingStrategy::Adaptive {
            exploration_rate, ..
        } = self
        {
            if mode == TargetingMode::Hunting && rng.random::<f64>() < *exploration_rate {
                let cell = explore(&field, &candidates, rng);
                log::debug!("adaptive exploration picked {}", cell);
                return Ok(cell);
            }
        }

        let rank = spiral_rank(board.size(), self.pattern(), mode);
        let (cell, score) = field
            .best_by(candidates.iter().copied(), rank)
            .ok_or(TargetingError::NoTargetsRemaining)?;
        log::debug!("{:?}: chose {} with score {:.2}", mode, cell, score);
        Ok(cell)
    }
}

/// Cells extending any group of live hits, row-major and without repeats.
pub fn targeting_candidates(board: &BoardState) -> Vec<Cell> {
    let mut cells: Vec<Cell> = board
        .hit_groups()
        .iter()
        .flat_map(|g| g.extensions(board.size(), board.undetermined()))
        .collect();
    cells.sort();
    cells.dedup();
    cells
}

/// Undetermined cells allowed by `pattern`, row-major. Falls back to every
/// undetermined cell when the pattern leaves nothing.
pub fn hunting_candidates(board: &BoardState, pattern: HuntPattern) -> Vec<Cell> {
    let open: Vec<Cell> = board.undetermined().iter_set_bits().collect();
    let filtered: Vec<Cell> = match pattern {
        HuntPattern::Checkerboard => open
            .iter()
            .copied()
            .filter(|c| (c.x + c.y) % 2 == 0)
            .collect(),
        HuntPattern::Diagonal => match open.iter().map(|c| c.x + c.y).min() {
            Some(d) => open.iter().copied().filter(|c| c.x + c.y == d).collect(),
            None => Vec::new(),
        },
        HuntPattern::None | HuntPattern::Spiral => return open,
    };
    if filtered.is_empty() {
        open
    } else {
        filtered
    }
}

// Spiral hunting prefers cells nearer the centre among equal scores.
fn spiral_rank(size: usize, pattern: HuntPattern, mode: TargetingMode) -> impl Fn(Cell) -> usize {
    let center = Cell::new(size / 2, size / 2);
    let active = pattern == HuntPattern::Spiral && mode == TargetingMode::Hunting;
    move |cell| if active { cell.manhattan(center) } else { 0 }
}

// Draw from the hottest few candidates with weights 1, 1/2, 1/3, ...
fn explore<R: Rng + ?Sized>(field: &ProbabilityField, candidates: &[Cell], rng: &mut R) -> Cell {
    let mut ranked: Vec<Cell> = candidates.to_vec();
    ranked.sort_by(|a, b| field.score(*b).total_cmp(&field.score(*a)).then(a.cmp(b)));
    ranked.truncate(EXPLORATION_POOL);

    let total: f64 = (0..ranked.len()).map(|i| 1.0 / (i + 1) as f64).sum();
    let mut threshold = rng.random_range(0.0..total);
    for (i, &cell) in ranked.iter().enumerate() {
        let weight = 1.0 / (i + 1) as f64;
        if threshold < weight {
            return cell;
        }
        threshold -= weight;
    }
    ranked[ranked.len() - 1]
}
