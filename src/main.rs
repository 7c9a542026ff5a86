//! Plinko Engine headless driver
//!
//! Drops a batch of balls on one board and drives ticks the way a render
//! loop would: one tick per frame, only while balls are in flight.
//!
//! Example:
//!   cargo run -- --balls 100 --wager 10 --seed 42 --json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use plinko_engine::error::EngineError;
use plinko_engine::{BoardConfig, SessionTally, SimulationEngine};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a peg-drop board headless", long_about = None)]
struct Args {
    /// Board config JSON (defaults to the classic 20 x 12 board)
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Total balls to drop
    #[arg(long, default_value_t = 20)]
    balls: u32,
    /// Wager per ball
    #[arg(long, default_value_t = 10.0)]
    wager: f64,
    /// Frames to wait between drops
    #[arg(long, default_value_t = 10)]
    drop_interval: u32,
    /// Give up after this many frames
    #[arg(long, default_value_t = 1_000_000)]
    max_frames: u64,
    /// Print each settlement as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BoardConfig::load(path).with_context(|| format!("load {}", path.display()))?,
        None => BoardConfig::default(),
    };
    let multipliers = config.multipliers.clone();

    let mut engine = match args.seed {
        Some(seed) => SimulationEngine::with_seed(config, seed),
        None => SimulationEngine::new(config),
    }
    .context("build board")?;
    log::info!("Dropping {} balls at {} each", args.balls, args.wager);

    let mut tally = SessionTally::new(multipliers.len());
    let mut remaining = args.balls;
    let mut frame: u64 = 0;

    while remaining > 0 || engine.has_live_balls() {
        if frame >= args.max_frames {
            anyhow::bail!("gave up after {frame} frames with {} balls in flight", engine.live_count());
        }

        if remaining > 0 && frame % args.drop_interval.max(1) as u64 == 0 {
            match engine.spawn_ball(args.wager) {
                Ok(_) => remaining -= 1,
                // Board full: try again on a later frame
                Err(EngineError::Capacity { .. }) => {}
                Err(e) => return Err(e).context("drop ball"),
            }
        }

        for settled in engine.tick() {
            if args.json {
                println!("{}", serde_json::to_string(&settled)?);
            }
            tally.record(&settled);
        }
        frame += 1;
    }

    log::info!("Finished after {frame} frames ({} simulated ticks)", engine.time_ticks());
    println!("balls settled : {}", tally.balls_settled);
    println!("total wagered : {:.2}", tally.total_wagered);
    println!("total paid    : {:.2}", tally.total_paid);
    println!("net           : {:+.2}", tally.net());
    if let Some(rtp) = tally.return_to_player() {
        println!("return        : {:.1}%", rtp * 100.0);
    }
    for (i, (hits, multiplier)) in tally.bucket_hits.iter().zip(&multipliers).enumerate() {
        println!("bucket {i:>2} ({multiplier:>5}x): {hits}");
    }

    Ok(())
}
