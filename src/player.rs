use core::fmt;

use rand::rngs::SmallRng;

use crate::board::BoardState;
use crate::common::{Cell, ShotError, ShotOutcome, TargetingError};
use crate::config::{Difficulty, StrategyConfig, StrategyVariant};
use crate::field::ProbabilityField;
use crate::fleet::{FleetError, FleetLayout};
use crate::learner::PatternLearner;
use crate::strategy::TargetingStrategy;

/// Interface implemented by anything that can take the shooting side of an
/// engagement.
pub trait Player {
    /// Lay out this player's own fleet.
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        size: usize,
        lengths: &[usize],
    ) -> Result<FleetLayout, FleetError>;

    /// Choose the next cell to fire at.
    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Cell, TargetingError>;

    /// Inform the player of the outcome of its last shot.
    fn handle_shot_result(&mut self, cell: Cell, outcome: ShotOutcome) -> Result<(), ShotError>;

    /// Reveal the opponent's layout once the engagement is over.
    fn handle_game_over(&mut self, _revealed: &FleetLayout) {}
}

/// Engine-backed player: one board record, one strategy, and a learner that
/// persists across engagements.
pub struct AiPlayer {
    board: BoardState,
    config: StrategyConfig,
    learner: PatternLearner,
}

impl AiPlayer {
    pub fn new(size: usize, fleet: &[usize], config: StrategyConfig) -> Self {
        Self {
            board: BoardState::new(size, fleet),
            learner: PatternLearner::new(size).with_weights(config.weights),
            config,
        }
    }

    pub fn with_difficulty(size: usize, fleet: &[usize], difficulty: Difficulty) -> Self {
        Self::new(size, fleet, difficulty.config())
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn learner(&self) -> &PatternLearner {
        &self.learner
    }

    /// Heat map the current strategy is ranking cells by.
    pub fn field(&self) -> ProbabilityField {
        TargetingStrategy::from(&self.config).field(&self.board)
    }

    /// Begin a new engagement; learned weights carry over.
    pub fn reset(&mut self) {
        self.board = BoardState::new(self.board.size(), self.board.fleet());
    }
}

impl Player for AiPlayer {
    fn place_fleet(
        &mut self,
        rng: &mut SmallRng,
        size: usize,
        lengths: &[usize],
    ) -> Result<FleetLayout, FleetError> {
        FleetLayout::random(rng, size, lengths)
    }

    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Cell, TargetingError> {
        crate::choose_cell(&self.board, &self.config, rng)
    }

    fn handle_shot_result(&mut self, cell: Cell, outcome: ShotOutcome) -> Result<(), ShotError> {
        self.board.record_shot_result(cell, outcome)
    }

    fn handle_game_over(&mut self, revealed: &FleetLayout) {
        let weights = crate::update_pattern_weights(&mut self.learner, revealed);
        if self.config.variant == StrategyVariant::Adaptive {
            self.config.weights = weights;
        }
    }
}

/// Failure while driving a player through an engagement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementError {
    Targeting(TargetingError),
    Shot(ShotError),
    Fleet(FleetError),
    /// The fleet was still afloat after the shot limit.
    ShotLimitReached(usize),
}

impl From<TargetingError> for EngagementError {
    fn from(err: TargetingError) -> Self {
        EngagementError::Targeting(err)
    }
}

impl From<ShotError> for EngagementError {
    fn from(err: ShotError) -> Self {
        EngagementError::Shot(err)
    }
}

impl From<FleetError> for EngagementError {
    fn from(err: FleetError) -> Self {
        EngagementError::Fleet(err)
    }
}

impl fmt::Display for EngagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngagementError::Targeting(e) => write!(f, "Targeting error: {}", e),
            EngagementError::Shot(e) => write!(f, "Shot error: {}", e),
            EngagementError::Fleet(e) => write!(f, "Fleet error: {}", e),
            EngagementError::ShotLimitReached(n) => {
                write!(f, "Fleet still afloat after {} shots", n)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngagementError {}

/// Let `player` fire at `layout` until the fleet is destroyed, then reveal
/// the layout to it. Returns the number of shots taken.
pub fn run_engagement<P: Player + ?Sized>(
    player: &mut P,
    layout: &mut FleetLayout,
    rng: &mut SmallRng,
    max_shots: usize,
) -> Result<usize, EngagementError> {
    let mut shots = 0;
    while !layout.all_sunk() {
        if shots >= max_shots {
            return Err(EngagementError::ShotLimitReached(shots));
        }
        let cell = player.select_target(rng)?;
        let outcome = layout.fire(cell)?;
        player.handle_shot_result(cell, outcome)?;
        shots += 1;
    }
    player.handle_game_over(layout);
    Ok(shots)
}
