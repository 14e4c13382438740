//! Concrete fleet layouts: placement under the no-touch rule, and a referee
//! that answers shots against a hidden layout.
//!
//! The targeting engine never sees a layout until an engagement is over;
//! hosts and tests use this module to stand in for the opponent.

use alloc::vec::Vec;
use core::fmt;

use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{Cell, ShotOutcome};

const PLACEMENT_ATTEMPTS: usize = 100;
const LAYOUT_ATTEMPTS: usize = 50;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Errors returned by layout operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    /// Ship would extend past the board.
    ShipOutOfBounds,
    /// Ship would overlap or touch an already placed ship.
    ShipTouches,
    /// Random placement gave up.
    UnableToPlaceShip,
    /// Shot outside the board.
    OutOfBounds,
    /// Cell was already fired at.
    AlreadyFired,
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            FleetError::ShipTouches => write!(f, "Ship placement touches another ship"),
            FleetError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            FleetError::OutOfBounds => write!(f, "Shot is outside the board"),
            FleetError::AlreadyFired => write!(f, "Cell was already fired at"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FleetError {}

/// One ship: its origin (top-left cell), orientation and covered cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipPlacement {
    origin: Cell,
    orientation: Orientation,
    cells: Vec<Cell>,
}

impl ShipPlacement {
    /// Place a ship of `length` at `origin` on a `size×size` board.
    pub fn new(
        length: usize,
        origin: Cell,
        orientation: Orientation,
        size: usize,
    ) -> Result<Self, FleetError> {
        let fits = match orientation {
            Orientation::Horizontal => origin.x + length <= size && origin.y < size,
            Orientation::Vertical => origin.y + length <= size && origin.x < size,
        };
        if length == 0 || !fits {
            return Err(FleetError::ShipOutOfBounds);
        }
        let cells = (0..length)
            .map(|i| match orientation {
                Orientation::Horizontal => Cell::new(origin.x + i, origin.y),
                Orientation::Vertical => Cell::new(origin.x, origin.y + i),
            })
            .collect();
        Ok(ShipPlacement {
            origin,
            orientation,
            cells,
        })
    }

    pub fn length(&self) -> usize {
        self.cells.len()
    }

    pub fn origin(&self) -> Cell {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }
}

impl AsRef<[Cell]> for ShipPlacement {
    fn as_ref(&self) -> &[Cell] {
        &self.cells
    }
}

/// A full hidden fleet plus the shots taken against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetLayout {
    size: usize,
    ships: Vec<ShipPlacement>,
    ship_map: BitBoard,
    // Ship cells and their surroundings; nothing else may be placed here.
    halo: BitBoard,
    fired: BitBoard,
}

impl FleetLayout {
    /// Empty `size×size` layout.
    pub fn new(size: usize) -> Self {
        FleetLayout {
            size,
            ships: Vec::new(),
            ship_map: BitBoard::new(size),
            halo: BitBoard::new(size),
            fired: BitBoard::new(size),
        }
    }

    /// Random layout of `lengths`, no two ships touching, not even diagonally.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        size: usize,
        lengths: &[usize],
    ) -> Result<Self, FleetError> {
        'layout: for _ in 0..LAYOUT_ATTEMPTS {
            let mut layout = Self::new(size);
            for &len in lengths {
                if layout.place_random(rng, len).is_err() {
                    continue 'layout;
                }
            }
            return Ok(layout);
        }
        Err(FleetError::UnableToPlaceShip)
    }

    /// Place a ship, refusing overlaps and contact with existing ships.
    pub fn place(
        &mut self,
        length: usize,
        origin: Cell,
        orientation: Orientation,
    ) -> Result<(), FleetError> {
        let ship = ShipPlacement::new(length, origin, orientation, self.size)?;
        if ship.cells.iter().any(|&c| self.halo.contains(c)) {
            return Err(FleetError::ShipTouches);
        }
        for &c in &ship.cells {
            let _ = self.ship_map.set(c);
            let _ = self.halo.set(c);
            for n in c.surrounding(self.size) {
                let _ = self.halo.set(n);
            }
        }
        self.ships.push(ship);
        Ok(())
    }

    fn place_random<R: Rng + ?Sized>(&mut self, rng: &mut R, length: usize) -> Result<(), FleetError> {
        if length == 0 || length > self.size {
            return Err(FleetError::ShipOutOfBounds);
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (self.size - length, self.size - 1),
                Orientation::Vertical => (self.size - 1, self.size - length),
            };
            let origin = Cell::new(rng.random_range(0..=max_x), rng.random_range(0..=max_y));
            if self.place(length, origin, orientation).is_ok() {
                return Ok(());
            }
        }
        Err(FleetError::UnableToPlaceShip)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[ShipPlacement] {
        &self.ships
    }

    /// Occupancy mask of all ships.
    pub fn ship_map(&self) -> &BitBoard {
        &self.ship_map
    }

    /// Answer a shot the way the rules engine would.
    pub fn fire(&mut self, cell: Cell) -> Result<ShotOutcome, FleetError> {
        if !cell.in_bounds(self.size) {
            return Err(FleetError::OutOfBounds);
        }
        if self.fired.contains(cell) {
            return Err(FleetError::AlreadyFired);
        }
        let _ = self.fired.set(cell);
        let Some(ship) = self.ships.iter().find(|s| s.contains(cell)) else {
            return Ok(ShotOutcome::Miss);
        };
        if ship.cells.iter().all(|&c| self.fired.contains(c)) {
            Ok(ShotOutcome::HitAndSunk(ship.length()))
        } else {
            Ok(ShotOutcome::Hit)
        }
    }

    /// True once every ship cell has been fired at.
    pub fn all_sunk(&self) -> bool {
        (&self.ship_map - &self.fired).is_empty()
    }
}
