//! Placement-count heat map over the opponent board.
//!
//! For every ship length still afloat, every horizontal and vertical window
//! of that length is tested against what is known; each surviving window adds
//! one to every undetermined cell it covers. Scores are relative: consumers
//! compare them, never treat them as probabilities.

use alloc::vec;
use alloc::vec::Vec;

use crate::bitboard::BitBoard;
use crate::board::BoardState;
use crate::common::Cell;
use crate::learner::PatternWeights;

/// Extra multiplier for corners once the opponent clearly favours edges.
const CORNER_BOOST: f64 = 1.2;
const CORNER_BOOST_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Dense `size×size` grid of non-negative scores, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityField {
    size: usize,
    scores: Vec<f64>,
}

impl ProbabilityField {
    /// All-zero field for a `size×size` board.
    pub fn empty(size: usize) -> Self {
        ProbabilityField {
            size,
            scores: vec![0.0; size * size],
        }
    }

    /// Field for the current state of `board`.
    pub fn compute(board: &BoardState) -> Self {
        let mut field = Self::empty(board.size());
        field.recompute(board);
        field
    }

    /// Field biased by learned placement weights, as used by adaptive play.
    pub fn weighted(board: &BoardState, weights: &PatternWeights) -> Self {
        let mut field = Self::compute(board);
        field.apply_weights(weights);
        field
    }

    /// Rebuild every score from scratch.
    pub fn recompute(&mut self, board: &BoardState) {
        let size = board.size();
        self.size = size;
        self.scores.clear();
        self.scores.resize(size * size, 0.0);

        // Misses, sunk ships and the water around them can hold no ship.
        let open = board.undetermined() | board.unsunk_hits();
        let hits = board.unsunk_hits();

        for &len in board.remaining_lengths() {
            if len == 0 || len > size {
                continue;
            }
            for orient in [Orientation::Horizontal, Orientation::Vertical] {
                let (max_x, max_y) = match orient {
                    Orientation::Horizontal => (size - len + 1, size),
                    Orientation::Vertical => (size, size - len + 1),
                };
                for y in 0..max_y {
                    for x in 0..max_x {
                        if window_fits(&open, hits, x, y, len, orient) {
                            for k in 0..len {
                                let cell = window_cell(x, y, k, orient);
                                if board.is_undetermined(cell) {
                                    self.scores[cell.y * size + cell.x] += 1.0;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// Scale edge cells by the edge preference and interior cells by the
    /// centre preference; corners get a further boost once edges dominate.
    pub fn apply_weights(&mut self, weights: &PatternWeights) {
        let size = self.size;
        for (idx, score) in self.scores.iter_mut().enumerate() {
            let cell = Cell::new(idx % size, idx / size);
            if cell.is_edge(size) {
                *score *= weights.edge_preference;
                if cell.is_corner(size) && weights.edge_preference > CORNER_BOOST_THRESHOLD {
                    *score *= CORNER_BOOST;
                }
            } else {
                *score *= weights.center_preference;
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Score at `cell`; out-of-bounds cells score zero.
    pub fn score(&self, cell: Cell) -> f64 {
        if cell.in_bounds(self.size) {
            self.scores[cell.y * self.size + cell.x]
        } else {
            0.0
        }
    }

    pub fn max_score(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }

    /// True when no placement covers any cell.
    pub fn is_zero(&self) -> bool {
        self.scores.iter().all(|&s| s == 0.0)
    }

    /// Row-major scores.
    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    /// Highest-scoring cell of `candidates`, ties going to the earliest cell
    /// in row-major order.
    pub fn best_of<I>(&self, candidates: I) -> Option<(Cell, f64)>
    where
        I: IntoIterator<Item = Cell>,
    {
        self.best_by(candidates, |_| 0)
    }

    /// Like [`best_of`](Self::best_of) with an extra secondary key: among
    /// equal scores the smallest `rank` wins before row-major order.
    pub fn best_by<I, F>(&self, candidates: I, rank: F) -> Option<(Cell, f64)>
    where
        I: IntoIterator<Item = Cell>,
        F: Fn(Cell) -> usize,
    {
        let mut best: Option<(Cell, f64)> = None;
        for cell in candidates {
            let score = self.score(cell);
            best = match best {
                None => Some((cell, score)),
                Some((b, bs)) => {
                    let better = score > bs
                        || (score == bs && (rank(cell), cell) < (rank(b), b));
                    if better {
                        Some((cell, score))
                    } else {
                        Some((b, bs))
                    }
                }
            };
        }
        best
    }
}

#[inline]
fn window_cell(x: usize, y: usize, k: usize, orient: Orientation) -> Cell {
    match orient {
        Orientation::Horizontal => Cell::new(x + k, y),
        Orientation::Vertical => Cell::new(x, y + k),
    }
}

// A window survives when every cell is still open and any hits it covers form
// one unbroken run along the window.
fn window_fits(
    open: &BitBoard,
    hits: &BitBoard,
    x: usize,
    y: usize,
    len: usize,
    orient: Orientation,
) -> bool {
    let mut first_hit = None;
    let mut last_hit = 0;
    let mut n_hits = 0;
    for k in 0..len {
        let cell = window_cell(x, y, k, orient);
        if !open.contains(cell) {
            return false;
        }
        if hits.contains(cell) {
            first_hit.get_or_insert(k);
            last_hit = k;
            n_hits += 1;
        }
    }
    match first_hit {
        Some(first) => last_hit - first + 1 == n_hits,
        None => true,
    }
}
