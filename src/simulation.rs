//! Monte-Carlo scoring of candidate cells.
//!
//! Each iteration picks a candidate with UCB1, plays a cheap randomized
//! continuation of the engagement from a copy of the known state, and
//! credits the candidate with a reward that favours short games with many
//! sinkings. The live board is never touched.

use alloc::vec;
use alloc::vec::Vec;
use core::time::Duration;

use rand::Rng;

use crate::bitboard::BitBoard;
use crate::board::BoardState;
use crate::common::Cell;
use crate::config::SimulationConfig;
use crate::field::ProbabilityField;

/// Chance a simulated follow-up shot hits.
const SIM_HIT_RATE: f64 = 0.3;
/// Chance a simulated hit also sinks a ship.
const SIM_SINK_RATE: f64 = 0.2;
const MAX_HIT_PROBABILITY: f64 = 0.9;
const ADJACENT_HIT_BONUS: f64 = 0.3;
const NEAR_HIT_BONUS: f64 = 0.1;
/// Keeps the normalisation finite on an all-zero field.
const FIELD_EPSILON: f64 = 0.1;

/// Source of elapsed time for the wall-clock budget.
pub trait Clock {
    /// Time since the search started.
    fn elapsed(&self) -> Duration;
}

/// A clock that never advances, so only the iteration budget applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn elapsed(&self) -> Duration {
        Duration::ZERO
    }
}

/// Wall clock started when the value is created.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch(std::time::Instant);

#[cfg(feature = "std")]
impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch(std::time::Instant::now())
    }
}

#[cfg(feature = "std")]
impl Clock for Stopwatch {
    fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Result of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    pub cell: Cell,
    /// Completed playouts; zero means the budget allowed none and `cell` is
    /// a uniform random fallback.
    pub simulations: u32,
    pub average_reward: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Stats {
    visits: u32,
    reward: f64,
}

impl Stats {
    fn mean(&self) -> f64 {
        self.reward / self.visits as f64
    }
}

/// Whether the board is busy enough for the search to be worth running.
pub fn engages(board: &BoardState, config: &SimulationConfig) -> bool {
    board.undetermined().count_ones() >= config.min_remaining_cells
        && board.shots_fired() >= config.min_shots_fired
}

/// Score `candidates` by simulation and return the best average reward.
///
/// `candidates` must be undetermined cells of `board`; their order decides
/// ties between equal averages. Returns `None` only when `board` has no
/// undetermined cell left.
pub fn search<R, C>(
    board: &BoardState,
    field: &ProbabilityField,
    candidates: &[Cell],
    config: &SimulationConfig,
    rng: &mut R,
    clock: &C,
) -> Option<SearchOutcome>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    let deadline = config.budget.max_duration();
    let mut stats = vec![Stats::default(); candidates.len()];
    let mut total: u32 = 0;

    while !candidates.is_empty() && total < config.budget.max_simulations {
        if deadline.is_some_and(|d| clock.elapsed() >= d) {
            log::debug!("simulation budget: wall clock exhausted after {} runs", total);
            break;
        }
        let idx = select(&stats, total, rng);
        let reward = playout(board, field, candidates[idx], config.shot_cap, rng);
        stats[idx].visits += 1;
        stats[idx].reward += reward;
        total += 1;
    }

    let mut best: Option<(usize, f64)> = None;
    for (idx, s) in stats.iter().enumerate() {
        if s.visits == 0 {
            continue;
        }
        let mean = s.mean();
        match best {
            Some((_, b)) if mean <= b => {}
            _ => best = Some((idx, mean)),
        }
    }

    match best {
        Some((idx, average_reward)) => Some(SearchOutcome {
            cell: candidates[idx],
            simulations: total,
            average_reward,
        }),
        None => {
            let open: Vec<Cell> = board.undetermined().iter_set_bits().collect();
            if open.is_empty() {
                return None;
            }
            log::debug!("no simulation completed, choosing uniformly at random");
            Some(SearchOutcome {
                cell: open[rng.random_range(0..open.len())],
                simulations: 0,
                average_reward: 0.0,
            })
        }
    }
}

// UCB1: unvisited candidates first, then the best mean reward plus
// `sqrt(2 ln(total) / visits)`. Exact ties are broken at random.
fn select<R: Rng + ?Sized>(stats: &[Stats], total: u32, rng: &mut R) -> usize {
    let unvisited: Vec<usize> = (0..stats.len()).filter(|&i| stats[i].visits == 0).collect();
    if !unvisited.is_empty() {
        return unvisited[rng.random_range(0..unvisited.len())];
    }

    let ln_total = libm::log(total as f64);
    let mut best_score = f64::NEG_INFINITY;
    let mut best = Vec::new();
    for (i, s) in stats.iter().enumerate() {
        let score = s.mean() + libm::sqrt(2.0 * ln_total / s.visits as f64);
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(i);
        } else if score == best_score {
            best.push(i);
        }
    }
    best[rng.random_range(0..best.len())]
}

/// Estimated chance that `cell` holds a ship: its heat relative to the
/// hottest cell, plus a bonus for each known hit one or two steps away.
pub fn hit_probability(board: &BoardState, field: &ProbabilityField, cell: Cell) -> f64 {
    let base = field.score(cell) / (field.max_score() + FIELD_EPSILON);
    let bonus: f64 = board
        .hits()
        .iter_set_bits()
        .map(|h| match h.manhattan(cell) {
            1 => ADJACENT_HIT_BONUS,
            2 => NEAR_HIT_BONUS,
            _ => 0.0,
        })
        .sum();
    (base + bonus).min(MAX_HIT_PROBABILITY)
}

/// One randomized continuation starting with a shot at `first`.
fn playout<R: Rng + ?Sized>(
    board: &BoardState,
    field: &ProbabilityField,
    first: Cell,
    shot_cap: usize,
    rng: &mut R,
) -> f64 {
    let size = board.size();
    let mut open: BitBoard = board.undetermined().clone();
    let _ = open.clear(first);
    let mut targets: Vec<Cell> = open.iter_set_bits().collect();
    let mut sim_hits: Vec<Cell> = board.hits().iter_set_bits().collect();
    let mut ships_left = board.remaining_lengths().len();

    if rng.random::<f64>() < hit_probability(board, field, first) {
        sim_hits.push(first);
    }

    let mut shots_taken = 1usize;
    let mut ships_sunk = 0usize;

    while !targets.is_empty() && ships_left > 0 && shots_taken < shot_cap {
        let chased = sim_hits.iter().find_map(|hit| {
            let around: Vec<Cell> = hit
                .orthogonal_neighbors(size)
                .filter(|&n| open.contains(n))
                .collect();
            (!around.is_empty()).then(|| around[rng.random_range(0..around.len())])
        });
        let target = match chased {
            Some(cell) => {
                if let Some(pos) = targets.iter().position(|&c| c == cell) {
                    targets.swap_remove(pos);
                }
                cell
            }
            None => targets.swap_remove(rng.random_range(0..targets.len())),
        };
        let _ = open.clear(target);
        shots_taken += 1;

        if rng.random::<f64>() < SIM_HIT_RATE {
            sim_hits.push(target);
            if rng.random::<f64>() < SIM_SINK_RATE {
                ships_sunk += 1;
                ships_left -= 1;
            }
        }
    }

    if ships_left == 0 {
        100.0 / shots_taken as f64
    } else {
        (ships_sunk * 10) as f64 / shots_taken as f64
    }
}
