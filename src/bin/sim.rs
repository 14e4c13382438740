use broadside::{
    init_logging, run_engagement, AiPlayer, Difficulty, FleetLayout, DEFAULT_BOARD_SIZE,
    DEFAULT_FLEET,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn play_one(seed: u64, difficulty: Difficulty) -> anyhow::Result<usize> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut layout = FleetLayout::random(&mut rng, DEFAULT_BOARD_SIZE, &DEFAULT_FLEET)
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut player = AiPlayer::with_difficulty(DEFAULT_BOARD_SIZE, &DEFAULT_FLEET, difficulty);
    run_engagement(
        &mut player,
        &mut layout,
        &mut rng,
        DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE,
    )
    .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed> <games>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: u64 = args[2].parse()?;

    let handles: Vec<_> = (0..games)
        .map(|g| tokio::task::spawn_blocking(move || play_one(seed.wrapping_add(g), Difficulty::Medium)))
        .collect();

    let mut shots = Vec::with_capacity(handles.len());
    for handle in handles {
        shots.push(handle.await??);
    }

    let total: usize = shots.iter().sum();
    let average = if shots.is_empty() {
        0.0
    } else {
        total as f64 / shots.len() as f64
    };

    let result = json!({
        "seed": seed,
        "games": shots.len(),
        "shots": shots,
        "min_shots": shots.iter().min(),
        "max_shots": shots.iter().max(),
        "average_shots": average,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
