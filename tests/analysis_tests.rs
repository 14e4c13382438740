use broadside::{
    new_board, record_shot_result, render_heat_map, Cell, EngagementStats, ProbabilityField,
    ShotOutcome,
};

#[test]
fn test_heat_map_marks_shots_and_ruled_out_cells() {
    let mut board = new_board(5, &[2, 3]);
    record_shot_result(&mut board, Cell::new(0, 0), ShotOutcome::Hit).unwrap();
    record_shot_result(&mut board, Cell::new(1, 0), ShotOutcome::HitAndSunk(2)).unwrap();
    record_shot_result(&mut board, Cell::new(4, 4), ShotOutcome::Miss).unwrap();
    let field = ProbabilityField::compute(&board);
    let map = render_heat_map(&board, &field);

    let lines: Vec<&str> = map.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "    A B C D E");
    assert!(lines[1].starts_with(" 1  X X ."));
    assert!(lines[5].ends_with('-'));
    // Row 2 begins with the ruled-out halo under the sunk ship.
    assert!(lines[2].starts_with(" 2  . . ."));
}

#[test]
fn test_stats_on_fresh_board() {
    let board = new_board(10, &[5, 4]);
    let stats = EngagementStats::from_board(&board);
    assert_eq!(stats.total_shots, 0);
    assert_eq!(stats.accuracy, 0.0);
    assert_eq!(stats.remaining_targets, 100);
    assert_eq!(stats.remaining_ships, vec![5, 4]);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["remaining_targets"], 100);
}
