//! Observation record for one opponent board: shots, hits, misses and the
//! enemy ships still afloat.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{Cell, InvalidShotReason, ShotError, ShotOutcome};
use crate::config::{ConfigError, MAX_BOARD_SIZE};
use crate::reconstruct::{group_hits, reconstruct_sunk_ship, ShipCandidateGroup};

/// A ship whose sinking has been confirmed and reconstructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunkShip {
    pub length: usize,
    pub cells: Vec<Cell>,
}

/// Everything known about the opponent board during one engagement.
///
/// Mutated only through [`record_shot_result`](Self::record_shot_result);
/// every other method is a pure query.
#[derive(Clone, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    fleet: Vec<usize>,
    shots: Vec<(Cell, ShotOutcome)>,
    hits: BitBoard,
    misses: BitBoard,
    unsunk_hits: BitBoard,
    undetermined: BitBoard,
    remaining_lengths: Vec<usize>,
    sunk_ships: Vec<SunkShip>,
}

impl BoardState {
    /// Start tracking a fresh `size×size` board against `fleet`.
    pub fn new(size: usize, fleet: &[usize]) -> Self {
        BoardState {
            size,
            fleet: fleet.to_vec(),
            shots: Vec::new(),
            hits: BitBoard::new(size),
            misses: BitBoard::new(size),
            unsunk_hits: BitBoard::new(size),
            undetermined: BitBoard::full(size),
            remaining_lengths: fleet.to_vec(),
            sunk_ships: Vec::new(),
        }
    }

    /// Fallible constructor rejecting boards and fleets that cannot be played.
    pub fn try_new(size: usize, fleet: &[usize]) -> Result<Self, ConfigError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(ConfigError::InvalidBoardSize(size));
        }
        if fleet.is_empty() || fleet.iter().any(|&len| len == 0 || len > size) {
            return Err(ConfigError::InvalidFleet);
        }
        Ok(Self::new(size, fleet))
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Full fleet inventory this board started with.
    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    /// Every fired cell with its outcome, in firing order.
    pub fn shots(&self) -> &[(Cell, ShotOutcome)] {
        &self.shots
    }

    pub fn shots_fired(&self) -> usize {
        self.shots.len()
    }

    pub fn hits(&self) -> &BitBoard {
        &self.hits
    }

    pub fn misses(&self) -> &BitBoard {
        &self.misses
    }

    /// Hits not yet absorbed into a sunk ship.
    pub fn unsunk_hits(&self) -> &BitBoard {
        &self.unsunk_hits
    }

    /// Cells that are neither fired at nor ruled out by a sinking.
    pub fn undetermined(&self) -> &BitBoard {
        &self.undetermined
    }

    pub fn is_undetermined(&self, cell: Cell) -> bool {
        self.undetermined.contains(cell)
    }

    pub fn is_fired(&self, cell: Cell) -> bool {
        self.hits.contains(cell) || self.misses.contains(cell)
    }

    /// Lengths of enemy ships not yet sunk.
    pub fn remaining_lengths(&self) -> &[usize] {
        &self.remaining_lengths
    }

    pub fn sunk_ships(&self) -> &[SunkShip] {
        &self.sunk_ships
    }

    /// True once every ship in the fleet has been sunk.
    pub fn fleet_destroyed(&self) -> bool {
        self.remaining_lengths.is_empty()
    }

    /// Unsunk hits split into 4-connected groups.
    pub fn hit_groups(&self) -> Vec<ShipCandidateGroup> {
        group_hits(&self.unsunk_hits)
    }

    /// Record the outcome of a shot at `cell`.
    ///
    /// On a sinking the ship is reconstructed from the new hit and the
    /// unresolved hits connected to it, its length is struck from the
    /// inventory and every cell touching it is ruled out. On error the
    /// board is left untouched.
    pub fn record_shot_result(&mut self, cell: Cell, outcome: ShotOutcome) -> Result<(), ShotError> {
        if !cell.in_bounds(self.size) {
            return Err(ShotError::InvalidShot {
                cell,
                reason: InvalidShotReason::OutOfBounds,
            });
        }
        if self.is_fired(cell) {
            return Err(ShotError::InvalidShot {
                cell,
                reason: InvalidShotReason::AlreadyFired,
            });
        }

        match outcome {
            ShotOutcome::Miss => {
                let _ = self.misses.set(cell);
            }
            ShotOutcome::Hit => {
                let _ = self.hits.set(cell);
                let _ = self.unsunk_hits.set(cell);
            }
            ShotOutcome::HitAndSunk(length) => {
                let slot = self
                    .remaining_lengths
                    .iter()
                    .position(|&l| l == length)
                    .ok_or(ShotError::UnknownShipLength(length))?;
                let mut live = self.unsunk_hits.clone();
                let _ = live.set(cell);
                let cells = reconstruct_sunk_ship(&live, cell, length)?;

                let _ = self.hits.set(cell);
                self.unsunk_hits = live;
                self.remaining_lengths.remove(slot);
                for &c in &cells {
                    let _ = self.unsunk_hits.clear(c);
                    for n in c.surrounding(self.size) {
                        let _ = self.undetermined.clear(n);
                    }
                }
                log::debug!("sunk ship of length {} at {:?}", length, cells);
                self.sunk_ships.push(SunkShip { length, cells });
            }
        }
        let _ = self.undetermined.clear(cell);
        self.shots.push((cell, outcome));
        Ok(())
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "BoardState {{\n  size: {},\n  remaining: {:?},\n  hits: {:?},\n  misses: {:?},\n  undetermined: {:?}\n}}",
            self.size, self.remaining_lengths, self.hits, self.misses, self.undetermined
        )
    }
}
