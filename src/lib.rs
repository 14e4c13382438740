//! Targeting engine for grid naval combat.
//!
//! Given a partial observation of an unknown fleet (hits, misses and the
//! sizes of sunk ships) the engine picks the next cell to fire at. The host
//! drives it through four calls:
//!
//! 1. [`new_board`] when an engagement starts,
//! 2. [`record_shot_result`] for every confirmed outcome,
//! 3. [`choose_cell`] whenever it is the engine's turn,
//! 4. [`update_pattern_weights`] with the revealed layout once it is over.
//!
//! Everything is synchronous and owned by the caller: one [`BoardState`]
//! per engagement, randomness only from the RNG passed in.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod analysis;
mod bitboard;
mod board;
mod common;
mod config;
mod field;
mod fleet;
mod learner;
#[cfg(feature = "std")]
mod logging;
mod player;
mod reconstruct;
pub mod simulation;
mod strategy;

pub use analysis::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use field::ProbabilityField;
pub use fleet::*;
pub use learner::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::*;
pub use reconstruct::{group_hits, reconstruct_sunk_ship, Axis, ShipCandidateGroup};
pub use simulation::{Clock, FrozenClock, SearchOutcome};
#[cfg(feature = "std")]
pub use simulation::Stopwatch;
pub use strategy::*;

use rand::Rng;

/// Start tracking a fresh opponent board.
pub fn new_board(board_size: usize, fleet_lengths: &[usize]) -> BoardState {
    BoardState::new(board_size, fleet_lengths)
}

/// Record a confirmed shot outcome.
pub fn record_shot_result(
    state: &mut BoardState,
    cell: Cell,
    outcome: ShotOutcome,
) -> Result<(), ShotError> {
    state.record_shot_result(cell, outcome)
}

/// Choose the next cell to fire at under `config`.
///
/// The wall-clock part of the simulation budget runs from this call; without
/// the `std` feature only the iteration budget applies.
pub fn choose_cell<R: Rng + ?Sized>(
    state: &BoardState,
    config: &StrategyConfig,
    rng: &mut R,
) -> Result<Cell, TargetingError> {
    #[cfg(feature = "std")]
    let clock = Stopwatch::start();
    #[cfg(not(feature = "std"))]
    let clock = FrozenClock;
    choose_cell_with_clock(state, config, rng, &clock)
}

/// [`choose_cell`] with an explicit time source for the simulation budget.
pub fn choose_cell_with_clock<R, C>(
    state: &BoardState,
    config: &StrategyConfig,
    rng: &mut R,
    clock: &C,
) -> Result<Cell, TargetingError>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    TargetingStrategy::from(config).choose_cell(state, rng, clock)
}

/// Learn from a finished engagement's revealed layout.
pub fn update_pattern_weights(
    learner: &mut PatternLearner,
    revealed_fleet_layout: &FleetLayout,
) -> PatternWeights {
    learner.observe(revealed_fleet_layout.ships())
}
