#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use broadside::{
    init_logging, render_heat_map, run_engagement, AiPlayer, BoardState, Difficulty,
    EngagementStats, FleetLayout, Player, ShotOutcome, StrategyConfig,
    DEFAULT_BOARD_SIZE, DEFAULT_FLEET,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Watch the engine sink a randomly placed fleet, one shot at a time.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "JSON strategy configuration; overrides --difficulty")]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        board_size: usize,
    },
    /// Play consecutive adaptive games and report what the learner picks up.
    Train {
        #[arg(long, default_value_t = 10)]
        games: u32,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
        board_size: usize,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            difficulty,
            config,
            board_size,
        } => {
            BoardState::try_new(board_size, &DEFAULT_FLEET).map_err(|e| anyhow::anyhow!(e))?;
            let config = match config {
                Some(path) => {
                    let text = std::fs::read_to_string(&path)?;
                    StrategyConfig::from_json_str(&text).map_err(|e| anyhow::anyhow!(e))?
                }
                None => difficulty.config(),
            };
            let mut rng = make_rng(seed);
            play(&mut rng, board_size, config)
        }
        Commands::Train {
            games,
            seed,
            board_size,
        } => {
            BoardState::try_new(board_size, &DEFAULT_FLEET).map_err(|e| anyhow::anyhow!(e))?;
            let mut rng = make_rng(seed);
            train(&mut rng, board_size, games)
        }
    }
}

#[cfg(feature = "std")]
fn play(rng: &mut SmallRng, board_size: usize, config: StrategyConfig) -> anyhow::Result<()> {
    let mut layout = FleetLayout::random(rng, board_size, &DEFAULT_FLEET)
        .map_err(|e| anyhow::anyhow!(e))?;
    let mut player = AiPlayer::new(board_size, &DEFAULT_FLEET, config);
    println!("Strategy: {:?} / hunt pattern {:?}", config.variant, config.hunt_pattern);

    while !layout.all_sunk() {
        println!("\n{}", render_heat_map(player.board(), &player.field()));
        let cell = player.select_target(rng).map_err(|e| anyhow::anyhow!(e))?;
        let outcome = layout.fire(cell).map_err(|e| anyhow::anyhow!(e))?;
        player
            .handle_shot_result(cell, outcome)
            .map_err(|e| anyhow::anyhow!(e))?;
        match outcome {
            ShotOutcome::Miss => println!("Shot {}: {} - miss", player.board().shots_fired(), cell),
            ShotOutcome::Hit => println!("Shot {}: {} - HIT", player.board().shots_fired(), cell),
            ShotOutcome::HitAndSunk(len) => println!(
                "Shot {}: {} - HIT, sunk a ship of length {}",
                player.board().shots_fired(),
                cell,
                len
            ),
        }
    }

    let stats = EngagementStats::from_board(player.board());
    player.handle_game_over(&layout);
    println!("\nFleet destroyed in {} shots.", stats.total_shots);
    println!(
        "Hits: {}  Misses: {}  Accuracy: {:.1}%",
        stats.hits,
        stats.misses,
        stats.accuracy * 100.0
    );
    Ok(())
}

#[cfg(feature = "std")]
fn train(rng: &mut SmallRng, board_size: usize, games: u32) -> anyhow::Result<()> {
    let config = Difficulty::Hard.config();
    let mut player = AiPlayer::new(board_size, &DEFAULT_FLEET, config);
    let max_shots = board_size * board_size;

    for game in 1..=games {
        player.reset();
        let mut layout = FleetLayout::random(rng, board_size, &DEFAULT_FLEET)
            .map_err(|e| anyhow::anyhow!(e))?;
        let shots = run_engagement(&mut player, &mut layout, rng, max_shots)
            .map_err(|e| anyhow::anyhow!(e))?;
        let w = player.learner().weights();
        println!(
            "Game {:3}: {:3} shots | edge {:.3} center {:.3} cluster {:.3} spread {:.3}",
            game,
            shots,
            w.edge_preference,
            w.center_preference,
            w.cluster_preference,
            w.spread_preference
        );
    }
    Ok(())
}
