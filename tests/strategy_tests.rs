use broadside::{
    choose_cell, choose_cell_with_clock, hunting_candidates, new_board, record_shot_result,
    targeting_candidates, BoardState, Cell, Difficulty, FrozenClock, HuntPattern,
    ProbabilityField, ShotOutcome, SimulationBudget, SimulationConfig, StrategyConfig,
    StrategyVariant, TargetingError, TargetingMode, DEFAULT_FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(x: usize, y: usize) -> Cell {
    Cell::new(x, y)
}

fn shoot(board: &mut BoardState, shots: &[(usize, usize, ShotOutcome)]) {
    for &(x, y, outcome) in shots {
        record_shot_result(board, c(x, y), outcome).unwrap();
    }
}

#[test]
fn test_fresh_board_hunts_on_parity() {
    let board = new_board(10, &DEFAULT_FLEET);
    let config = StrategyConfig::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let cell = choose_cell(&board, &config, &mut rng).unwrap();
    assert_eq!((cell.x + cell.y) % 2, 0);
    assert!(board.is_undetermined(cell));
    assert_eq!(TargetingMode::of(&board), TargetingMode::Hunting);
}

#[test]
fn test_targets_the_ends_of_a_run() {
    let mut board = new_board(10, &DEFAULT_FLEET);
    shoot(
        &mut board,
        &[(3, 4, ShotOutcome::Hit), (4, 4, ShotOutcome::Hit)],
    );
    assert_eq!(TargetingMode::of(&board), TargetingMode::Targeting);
    assert_eq!(targeting_candidates(&board), vec![c(2, 4), c(5, 4)]);

    for seed in 0..8 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cell = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
        assert!(cell == c(2, 4) || cell == c(5, 4), "chose {}", cell);
    }
}

#[test]
fn test_singleton_proposes_open_neighbours() {
    let mut board = new_board(10, &DEFAULT_FLEET);
    shoot(
        &mut board,
        &[(0, 0, ShotOutcome::Hit), (1, 0, ShotOutcome::Miss)],
    );
    assert_eq!(targeting_candidates(&board), vec![c(0, 1)]);
    let mut rng = SmallRng::seed_from_u64(3);
    let cell = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
    assert_eq!(cell, c(0, 1));
}

#[test]
fn test_blocked_hits_fall_back_to_hunting() {
    let mut board = new_board(5, &[3, 2]);
    shoot(
        &mut board,
        &[
            (2, 2, ShotOutcome::Hit),
            (2, 1, ShotOutcome::Miss),
            (1, 2, ShotOutcome::Miss),
            (3, 2, ShotOutcome::Miss),
            (2, 3, ShotOutcome::Miss),
        ],
    );
    assert!(targeting_candidates(&board).is_empty());
    let mut rng = SmallRng::seed_from_u64(9);
    let cell = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
    assert!(board.is_undetermined(cell));
}

#[test]
fn test_no_targets_remaining() {
    let mut board = new_board(1, &[1]);
    shoot(&mut board, &[(0, 0, ShotOutcome::HitAndSunk(1))]);
    let mut rng = SmallRng::seed_from_u64(0);
    let err = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap_err();
    assert_eq!(err, TargetingError::NoTargetsRemaining);
}

#[test]
fn test_flat_field_picks_any_open_cell() {
    // Every ship is sunk but cells remain undetermined: the field is flat.
    let mut board = new_board(6, &[2]);
    shoot(
        &mut board,
        &[(0, 0, ShotOutcome::Hit), (1, 0, ShotOutcome::HitAndSunk(2))],
    );
    assert!(ProbabilityField::compute(&board).is_zero());
    let mut rng = SmallRng::seed_from_u64(5);
    let cell = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
    assert!(board.is_undetermined(cell));
}

#[test]
fn test_checkerboard_falls_back_when_parity_exhausted() {
    let mut board = new_board(2, &[1]);
    shoot(
        &mut board,
        &[(0, 0, ShotOutcome::Miss), (1, 1, ShotOutcome::Miss)],
    );
    assert_eq!(
        hunting_candidates(&board, HuntPattern::Checkerboard),
        vec![c(1, 0), c(0, 1)]
    );
}

#[test]
fn test_diagonal_sweeps_from_the_corner() {
    let mut board = new_board(10, &DEFAULT_FLEET);
    assert_eq!(hunting_candidates(&board, HuntPattern::Diagonal), vec![c(0, 0)]);
    shoot(&mut board, &[(0, 0, ShotOutcome::Miss)]);
    assert_eq!(
        hunting_candidates(&board, HuntPattern::Diagonal),
        vec![c(1, 0), c(0, 1)]
    );
}

#[test]
fn test_spiral_prefers_the_centre_on_ties() {
    let board = new_board(10, &[2]);
    let config = StrategyConfig::default().with_hunt_pattern(HuntPattern::Spiral);
    let mut rng = SmallRng::seed_from_u64(11);
    assert_eq!(choose_cell(&board, &config, &mut rng).unwrap(), c(5, 5));
}

#[test]
fn test_no_pattern_uses_every_cell() {
    let board = new_board(4, &[2]);
    assert_eq!(hunting_candidates(&board, HuntPattern::None).len(), 16);
    let config = Difficulty::Easy.config();
    let mut rng = SmallRng::seed_from_u64(2);
    // Interior cells of a 4x4 board tie; the first in row-major order wins.
    assert_eq!(choose_cell(&board, &config, &mut rng).unwrap(), c(1, 1));
}

#[test]
fn test_adaptive_exploration_stays_in_the_hot_pool() {
    let board = new_board(10, &[2]);
    let config = StrategyConfig {
        exploration_rate: 1.0,
        ..StrategyConfig::default().with_variant(StrategyVariant::Adaptive)
    };
    let field = ProbabilityField::weighted(&board, &config.weights);
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cell = choose_cell(&board, &config, &mut rng).unwrap();
        assert_eq!(field.score(cell), field.max_score());
        assert_eq!((cell.x + cell.y) % 2, 0);
    }
}

#[test]
fn test_simulation_search_returns_a_candidate() {
    let mut board = new_board(10, &DEFAULT_FLEET);
    shoot(
        &mut board,
        &[
            (0, 0, ShotOutcome::Miss),
            (2, 2, ShotOutcome::Miss),
            (4, 4, ShotOutcome::Miss),
            (6, 6, ShotOutcome::Miss),
            (8, 8, ShotOutcome::Miss),
        ],
    );
    let config = Difficulty::Expert
        .config()
        .with_budget(SimulationBudget::iterations(40));
    let candidates = hunting_candidates(&board, HuntPattern::Checkerboard);

    let mut rng = SmallRng::seed_from_u64(17);
    let first = choose_cell_with_clock(&board, &config, &mut rng, &FrozenClock).unwrap();
    assert!(candidates.contains(&first));

    let mut rng = SmallRng::seed_from_u64(17);
    let again = choose_cell_with_clock(&board, &config, &mut rng, &FrozenClock).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_simulation_below_threshold_uses_heat_map() {
    let board = new_board(10, &DEFAULT_FLEET);
    let config = StrategyConfig {
        variant: StrategyVariant::SimulationSearch,
        simulation: SimulationConfig {
            budget: SimulationBudget::iterations(0),
            ..SimulationConfig::default()
        },
        ..StrategyConfig::default()
    };
    // No shots yet, so the search does not engage and the hottest parity cell wins.
    let mut rng = SmallRng::seed_from_u64(4);
    let cell = choose_cell_with_clock(&board, &config, &mut rng, &FrozenClock).unwrap();
    let hunt = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
    assert_eq!(cell, hunt);
}

#[test]
fn test_simulation_with_no_budget_still_answers() {
    let mut board = new_board(10, &DEFAULT_FLEET);
    shoot(
        &mut board,
        &[
            (1, 1, ShotOutcome::Miss),
            (3, 3, ShotOutcome::Miss),
            (5, 5, ShotOutcome::Miss),
            (7, 7, ShotOutcome::Miss),
            (9, 9, ShotOutcome::Miss),
        ],
    );
    let config = Difficulty::Nightmare
        .config()
        .with_budget(SimulationBudget::iterations(0));
    for seed in 0..5 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cell = choose_cell(&board, &config, &mut rng).unwrap();
        assert!(board.is_undetermined(cell));
    }
}

#[test]
fn test_zero_scoring_targets_break_ties_in_fixed_order() {
    let mut board = new_board(10, &[3]);
    shoot(
        &mut board,
        &[
            (0, 0, ShotOutcome::Hit),
            (2, 0, ShotOutcome::Miss),
            (1, 1, ShotOutcome::Miss),
            (0, 2, ShotOutcome::Miss),
        ],
    );
    let field = ProbabilityField::compute(&board);
    assert!(!field.is_zero());
    assert_eq!(targeting_candidates(&board), vec![c(1, 0), c(0, 1)]);
    assert_eq!(field.score(c(1, 0)), 0.0);
    assert_eq!(field.score(c(0, 1)), 0.0);

    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let cell = choose_cell(&board, &StrategyConfig::default(), &mut rng).unwrap();
        assert_eq!(cell, c(1, 0), "seed {}", seed);
    }
}
