//! Common types: cells, shot outcomes and the engine's error taxonomy.

use core::cmp::Ordering;
use core::fmt;

/// One coordinate on the board grid, `x` is the column and `y` the row.
///
/// Cells order row-major (lowest row first, then lowest column). Every
/// deterministic tie-break in the engine uses this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// Chebyshev (king-move) distance.
    pub fn chebyshev(&self, other: Cell) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn manhattan(&self, other: Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True when the cell lies on the outer ring of a `size×size` board.
    pub fn is_edge(&self, size: usize) -> bool {
        self.x == 0 || self.y == 0 || self.x + 1 == size || self.y + 1 == size
    }

    pub fn is_corner(&self, size: usize) -> bool {
        (self.x == 0 || self.x + 1 == size) && (self.y == 0 || self.y + 1 == size)
    }

    /// Offset the cell, returning `None` when the result leaves the board.
    pub fn offset(&self, dx: isize, dy: isize, size: usize) -> Option<Cell> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let cell = Cell::new(x, y);
        cell.in_bounds(size).then_some(cell)
    }

    /// The up-to-four orthogonal neighbours inside the board.
    pub fn orthogonal_neighbors(self, size: usize) -> impl Iterator<Item = Cell> {
        const STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
        STEPS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }

    /// The up-to-eight cells at Chebyshev distance 1 inside the board.
    pub fn surrounding(self, size: usize) -> impl Iterator<Item = Cell> {
        (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Cell::new(x, y)
    }
}

impl fmt::Display for Cell {
    /// Board notation, column letter then 1-based row (e.g. `C5`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x < 26 {
            write!(f, "{}{}", (b'A' + self.x as u8) as char, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Result of a shot, reported by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank a ship of the given length.
    HitAndSunk(usize),
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Why a shot was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidShotReason {
    OutOfBounds,
    AlreadyFired,
}

/// Errors returned by `BoardState::record_shot_result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShotError {
    /// Duplicate or out-of-bounds cell.
    InvalidShot {
        cell: Cell,
        reason: InvalidShotReason,
    },
    /// A sinking was reported for a length not in the remaining inventory.
    UnknownShipLength(usize),
    /// Fewer connected unsunk hits than the claimed ship length.
    ReconstructionAmbiguous {
        anchor: Cell,
        length: usize,
        found: usize,
    },
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::InvalidShot {
                cell,
                reason: InvalidShotReason::OutOfBounds,
            } => write!(f, "Invalid shot at {}: outside the board", cell),
            ShotError::InvalidShot {
                cell,
                reason: InvalidShotReason::AlreadyFired,
            } => write!(f, "Invalid shot at {}: cell was already fired at", cell),
            ShotError::UnknownShipLength(len) => {
                write!(f, "No ship of length {} remains to be sunk", len)
            }
            ShotError::ReconstructionAmbiguous {
                anchor,
                length,
                found,
            } => write!(
                f,
                "Cannot reconstruct ship of length {} at {}: only {} connected hits",
                length, anchor, found
            ),
        }
    }
}

/// Errors returned when asking the engine for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetingError {
    /// Every cell has been resolved; the engagement should already be over.
    NoTargetsRemaining,
}

impl fmt::Display for TargetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetingError::NoTargetsRemaining => write!(f, "No undetermined cells remain"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
#[cfg(feature = "std")]
impl std::error::Error for TargetingError {}
#[cfg(feature = "std")]
impl std::error::Error for crate::bitboard::BitBoardError {}
