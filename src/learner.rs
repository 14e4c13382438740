//! Long-run learning of where an opponent likes to put its ships.

use crate::common::Cell;
use crate::config::{check_unit, ConfigError, DEFAULT_BOARD_SIZE, DEFAULT_LEARNING_RATE};

/// Ships closer than this (Chebyshev) count as clustered.
const CLUSTER_DISTANCE: usize = 2;

/// Placement biases in `[0, 1]`. Centre and spread are always the
/// complements of edge and cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternWeights {
    pub edge_preference: f64,
    pub center_preference: f64,
    pub cluster_preference: f64,
    pub spread_preference: f64,
}

impl Default for PatternWeights {
    fn default() -> Self {
        Self {
            edge_preference: 0.5,
            center_preference: 0.5,
            cluster_preference: 0.5,
            spread_preference: 0.5,
        }
    }
}

impl PatternWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("weights.edge_preference", self.edge_preference)?;
        check_unit("weights.center_preference", self.center_preference)?;
        check_unit("weights.cluster_preference", self.cluster_preference)?;
        check_unit("weights.spread_preference", self.spread_preference)
    }
}

/// Exponential moving average over completed games.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternLearner {
    board_size: usize,
    alpha: f64,
    weights: PatternWeights,
    games_observed: u32,
}

impl Default for PatternLearner {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl PatternLearner {
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            alpha: DEFAULT_LEARNING_RATE,
            weights: PatternWeights::default(),
            games_observed: 0,
        }
    }

    /// Use a different smoothing factor; must lie in `(0, 1]`.
    pub fn with_learning_rate(mut self, alpha: f64) -> Result<Self, ConfigError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "learning_rate",
                value: alpha,
            });
        }
        self.alpha = alpha;
        Ok(self)
    }

    /// Start from previously learned weights.
    pub fn with_weights(mut self, weights: PatternWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> PatternWeights {
        self.weights
    }

    pub fn learning_rate(&self) -> f64 {
        self.alpha
    }

    pub fn games_observed(&self) -> u32 {
        self.games_observed
    }

    /// Fold one revealed fleet into the weights and return the new weights.
    /// An empty fleet carries no evidence and leaves the weights unchanged.
    pub fn observe<S: AsRef<[Cell]>>(&mut self, ships: &[S]) -> PatternWeights {
        if ships.is_empty() {
            log::debug!("ignoring empty fleet layout");
            return self.weights;
        }
        self.games_observed += 1;

        let edge = edge_ratio(ships, self.board_size);
        let cluster = cluster_ratio(ships);

        let w = &mut self.weights;
        w.edge_preference = ema(w.edge_preference, edge, self.alpha);
        w.center_preference = 1.0 - w.edge_preference;
        w.cluster_preference = ema(w.cluster_preference, cluster, self.alpha);
        w.spread_preference = 1.0 - w.cluster_preference;

        log::info!(
            "pattern weights after game {}: edge={:.3} center={:.3} cluster={:.3} spread={:.3}",
            self.games_observed,
            w.edge_preference,
            w.center_preference,
            w.cluster_preference,
            w.spread_preference
        );
        *w
    }
}

// Written as `old + alpha * (observed - old)`, equal to
// `alpha * observed + (1 - alpha) * old`.
fn ema(old: f64, observed: f64, alpha: f64) -> f64 {
    (old + alpha * (observed - old)).clamp(0.0, 1.0)
}

/// Fraction of ships with at least one cell on the board edge.
pub fn edge_ratio<S: AsRef<[Cell]>>(ships: &[S], board_size: usize) -> f64 {
    if ships.is_empty() {
        return 0.0;
    }
    let on_edge = ships
        .iter()
        .filter(|s| s.as_ref().iter().any(|c| c.is_edge(board_size)))
        .count();
    on_edge as f64 / ships.len() as f64
}

/// Fraction of ship pairs that come within Chebyshev distance 2.
pub fn cluster_ratio<S: AsRef<[Cell]>>(ships: &[S]) -> f64 {
    let n = ships.len();
    if n < 2 {
        return 0.0;
    }
    let mut close = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if ships_are_close(ships[i].as_ref(), ships[j].as_ref()) {
                close += 1;
            }
        }
    }
    close as f64 / (n * (n - 1) / 2) as f64
}

fn ships_are_close(a: &[Cell], b: &[Cell]) -> bool {
    a.iter()
        .any(|ca| b.iter().any(|&cb| ca.chebyshev(cb) <= CLUSTER_DISTANCE))
}
