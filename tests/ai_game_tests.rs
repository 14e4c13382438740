use broadside::{
    run_engagement, AiPlayer, Difficulty, EngagementError, EngagementStats, FleetLayout, Player,
    SimulationBudget, StrategyVariant, DEFAULT_BOARD_SIZE, DEFAULT_FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const MAX_SHOTS: usize = DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE;

fn play(difficulty: Difficulty, seed: u64) -> (usize, AiPlayer) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut config = difficulty.config();
    if config.variant == StrategyVariant::SimulationSearch {
        config = config.with_budget(SimulationBudget::iterations(20));
    }
    let mut player = AiPlayer::new(DEFAULT_BOARD_SIZE, &DEFAULT_FLEET, config);
    let mut layout = player
        .place_fleet(&mut rng, DEFAULT_BOARD_SIZE, &DEFAULT_FLEET)
        .unwrap();
    let shots = run_engagement(&mut player, &mut layout, &mut rng, MAX_SHOTS).unwrap();
    (shots, player)
}

#[test]
fn test_every_difficulty_finishes_a_game() {
    for difficulty in [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
        Difficulty::Nightmare,
    ] {
        let (shots, player) = play(difficulty, 123);
        assert!(shots >= 17 && shots <= MAX_SHOTS, "{:?}: {} shots", difficulty, shots);
        assert!(player.board().fleet_destroyed());
        assert_eq!(player.board().sunk_ships().len(), DEFAULT_FLEET.len());
    }
}

#[test]
fn test_hunt_target_beats_blind_fire() {
    // Random fire averages about 96 shots on a standard board.
    let total: usize = (0..10).map(|seed| play(Difficulty::Medium, seed).0).sum();
    assert!(total / 10 < 80, "average {} shots", total / 10);
}

#[test]
fn test_games_are_reproducible() {
    assert_eq!(play(Difficulty::Hard, 77).0, play(Difficulty::Hard, 77).0);
    assert_eq!(play(Difficulty::Expert, 5).0, play(Difficulty::Expert, 5).0);
}

#[test]
fn test_adaptive_player_learns_between_games() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut player = AiPlayer::with_difficulty(DEFAULT_BOARD_SIZE, &DEFAULT_FLEET, Difficulty::Hard);
    for _ in 0..3 {
        player.reset();
        assert_eq!(player.board().shots_fired(), 0);
        let mut layout = FleetLayout::random(&mut rng, DEFAULT_BOARD_SIZE, &DEFAULT_FLEET).unwrap();
        run_engagement(&mut player, &mut layout, &mut rng, MAX_SHOTS).unwrap();
    }
    assert_eq!(player.learner().games_observed(), 3);
    assert_eq!(player.config().weights, player.learner().weights());
}

#[test]
fn test_shot_limit_is_reported() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut player = AiPlayer::with_difficulty(DEFAULT_BOARD_SIZE, &DEFAULT_FLEET, Difficulty::Medium);
    let mut layout = FleetLayout::random(&mut rng, DEFAULT_BOARD_SIZE, &DEFAULT_FLEET).unwrap();
    let err = run_engagement(&mut player, &mut layout, &mut rng, 5).unwrap_err();
    assert_eq!(err, EngagementError::ShotLimitReached(5));
}

#[test]
fn test_stats_after_a_game() {
    let (shots, player) = play(Difficulty::Medium, 2024);
    let stats = EngagementStats::from_board(player.board());
    assert_eq!(stats.total_shots, shots);
    assert_eq!(stats.hits, 17);
    assert_eq!(stats.hits + stats.misses, shots);
    assert_eq!(stats.ships_sunk, 5);
    assert!(stats.remaining_ships.is_empty());
    assert!(stats.accuracy > 0.0 && stats.accuracy <= 1.0);
}
