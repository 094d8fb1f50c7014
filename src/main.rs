//! Hex Colony - Replay Driver
//!
//! Feeds recorded turn snapshots through one orchestrator and prints the
//! command batch of every turn as a JSON line. Time is replayed from each
//! snapshot's `nextTurnIn`, so runs with the same seed are reproducible.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hex_colony::colony::UnitClass;
use hex_colony::core::config::ColonyConfig;
use hex_colony::core::error::Result;
use hex_colony::memory::clock::ManualClock;
use hex_colony::protocol::snapshot::Snapshot;
use hex_colony::turn::TurnOrchestrator;

#[derive(Parser, Debug)]
#[command(name = "hex-colony")]
#[command(about = "Replay recorded snapshots through the colony bot")]
struct Args {
    /// Configuration file (defaults to built-in values)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Declare an attack right before this turn number is played
    #[arg(long)]
    attack_turn: Option<u64>,

    /// Send every unit of this class home (worker, soldier, scout); repeatable
    #[arg(long, value_name = "CLASS")]
    recall: Vec<UnitClass>,

    /// First turn the recall applies to (defaults to the first snapshot)
    #[arg(long, requires = "recall")]
    recall_turn: Option<u64>,

    /// Snapshot JSON files, played in the given order
    #[arg(required = true)]
    snapshots: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hex_colony=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ColonyConfig::load(path)?,
        None => ColonyConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    tracing::info!("Replaying {} snapshots with seed {}", args.snapshots.len(), config.seed);

    let mut orchestrator = TurnOrchestrator::new(config, ManualClock::new())?;

    for path in &args.snapshots {
        let snapshot = match load_snapshot(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if args.attack_turn == Some(snapshot.turn) && orchestrator.declare_attack() {
            tracing::info!("Attack declared before turn {}", snapshot.turn);
        }

        if args.recall_turn.map_or(true, |turn| snapshot.turn >= turn) {
            for class in &args.recall {
                orchestrator.recall(*class);
            }
        }

        let batch = orchestrator.play_turn(&snapshot);
        println!("{}", batch.to_json()?);

        let wait = Duration::try_from_secs_f64(snapshot.next_turn_in).unwrap_or_default();
        orchestrator.clock().advance(wait);
    }

    Ok(())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let contents = fs::read_to_string(path)?;
    Snapshot::from_json(&contents)
}
