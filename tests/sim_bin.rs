use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "3"])
        .env("BROADSIDE_LOG", "warn")
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["games"], 3);
    assert_eq!(v["shots"].as_array().map(|a| a.len()), Some(3));
    assert!(v["average_shots"].as_f64().unwrap() >= 17.0);
}

#[test]
fn sim_binary_rejects_missing_args() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}

#[test]
fn cli_play_is_reproducible() {
    let run = || {
        Command::new(env!("CARGO_BIN_EXE_broadside"))
            .args(["play", "--seed", "7", "--difficulty", "hard"])
            .env("BROADSIDE_LOG", "warn")
            .output()
            .expect("failed to run broadside")
    };
    let a = run();
    let b = run();
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    let text = String::from_utf8(a.stdout).unwrap();
    assert!(text.contains("Fleet destroyed in"));
}

#[test]
fn cli_train_reports_each_game() {
    let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
        .args(["train", "--games", "2", "--seed", "3"])
        .env("BROADSIDE_LOG", "warn")
        .output()
        .expect("failed to run broadside");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Game   1:"));
    assert!(text.contains("Game   2:"));
}
