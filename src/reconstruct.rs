//! Recovering ship shapes from hit cells.
//!
//! A confirmed sinking is resolved into exactly the cells of the sunk ship,
//! and the hits that are still unresolved are grouped into runs the
//! targeting mode can extend.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::bitboard::BitBoard;
use crate::common::{Cell, ShotError};

/// Which way a group of hits runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// All cells share one row.
    Row,
    /// All cells share one column.
    Column,
    Singleton,
    /// Connected but not collinear.
    Irregular,
}

/// A 4-connected run of unsunk hits believed to belong to one ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipCandidateGroup {
    cells: Vec<Cell>,
    axis: Axis,
}

impl ShipCandidateGroup {
    fn new(mut cells: Vec<Cell>) -> Self {
        cells.sort();
        let axis = match cells.as_slice() {
            [] | [_] => Axis::Singleton,
            [first, rest @ ..] if rest.iter().all(|c| c.y == first.y) => Axis::Row,
            [first, rest @ ..] if rest.iter().all(|c| c.x == first.x) => Axis::Column,
            _ => Axis::Irregular,
        };
        Self { cells, axis }
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells that would extend this group, restricted to `open` cells.
    ///
    /// A line yields the two cells just beyond its ends, a singleton its four
    /// orthogonal neighbours. An irregular group yields every open neighbour
    /// of its members.
    pub fn extensions(&self, size: usize, open: &BitBoard) -> Vec<Cell> {
        let (first, last) = match (self.cells.first(), self.cells.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Vec::new(),
        };
        let proposed: Vec<Cell> = match self.axis {
            Axis::Row => [first.offset(-1, 0, size), last.offset(1, 0, size)]
                .into_iter()
                .flatten()
                .collect(),
            Axis::Column => [first.offset(0, -1, size), last.offset(0, 1, size)]
                .into_iter()
                .flatten()
                .collect(),
            Axis::Singleton => first.orthogonal_neighbors(size).collect(),
            Axis::Irregular => {
                let mut around: Vec<Cell> = self
                    .cells
                    .iter()
                    .flat_map(|c| c.orthogonal_neighbors(size))
                    .collect();
                around.sort();
                around.dedup();
                around
            }
        };
        proposed.into_iter().filter(|&c| open.contains(c)).collect()
    }
}

/// Recover the `length` cells of a ship sunk at `anchor`.
///
/// Breadth-first over 4-connected cells of `hits`, starting at `anchor`
/// (which must itself be in `hits`), stopping once `length` cells are
/// collected.
pub fn reconstruct_sunk_ship(
    hits: &BitBoard,
    anchor: Cell,
    length: usize,
) -> Result<Vec<Cell>, ShotError> {
    let size = hits.size();
    let mut visited: BitBoard = BitBoard::new(size);
    let mut queue = VecDeque::from(vec![anchor]);
    let mut ship = Vec::with_capacity(length);

    while ship.len() < length {
        let Some(cell) = queue.pop_front() else {
            break;
        };
        if visited.contains(cell) || !hits.contains(cell) {
            continue;
        }
        let _ = visited.set(cell);
        ship.push(cell);
        queue.extend(
            cell.orthogonal_neighbors(size)
                .filter(|&n| hits.contains(n) && !visited.contains(n)),
        );
    }

    if ship.len() == length {
        Ok(ship)
    } else {
        Err(ShotError::ReconstructionAmbiguous {
            anchor,
            length,
            found: ship.len(),
        })
    }
}

/// Split `hits` into 4-connected groups, ordered by their first cell.
pub fn group_hits(hits: &BitBoard) -> Vec<ShipCandidateGroup> {
    let size = hits.size();
    let mut seen: BitBoard = BitBoard::new(size);
    let mut groups = Vec::new();

    for start in hits.iter_set_bits() {
        if seen.contains(start) {
            continue;
        }
        let _ = seen.set(start);
        let mut members = Vec::new();
        let mut queue = VecDeque::from(vec![start]);
        while let Some(cell) = queue.pop_front() {
            members.push(cell);
            for n in cell.orthogonal_neighbors(size) {
                if hits.contains(n) && !seen.contains(n) {
                    let _ = seen.set(n);
                    queue.push_back(n);
                }
            }
        }
        groups.push(ShipCandidateGroup::new(members));
    }
    groups
}
