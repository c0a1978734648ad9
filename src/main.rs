#![warn(clippy::all)]

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gol_parallel::{init_logging, run, Event, Params, RunOptions};
use std::{io::BufRead, path::PathBuf, time::Duration};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parallel Game of Life on a torus", long_about = None)]
struct Args {
    /// Number of generations to compute
    #[arg(short, long, default_value_t = 10_000_000)]
    turns: usize,

    /// Worker threads per generation
    #[arg(short = 'j', long, default_value_t = 8)]
    threads: usize,

    #[arg(long, default_value_t = 512)]
    width: usize,

    #[arg(long, default_value_t = 512)]
    height: usize,

    /// Directory with `<W>x<H>.pgm` input images
    #[arg(long, default_value = RunOptions::IMAGES_DIR)]
    images: PathBuf,

    /// Directory for saved boards
    #[arg(long, default_value = RunOptions::OUT_DIR)]
    out: PathBuf,

    /// Interval between alive-cell reports
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Report flipped cells every turn
    #[arg(long)]
    flips: bool,

    /// Do not read commands from stdin
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let params = Params {
        turns: args.turns,
        threads: args.threads,
        image_width: args.width,
        image_height: args.height,
    };
    let options = RunOptions {
        images_dir: args.images,
        out_dir: Some(args.out),
        tick: Duration::from_millis(args.tick_ms),
        report_flips: args.flips,
    };

    let (events_tx, events_rx) = flume::unbounded();
    let (keys_tx, keys_rx) = flume::unbounded();

    if !args.headless {
        // `s` save, `q` save and quit, `p` pause/resume; one command per line
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                for key in line.chars().filter(|c| !c.is_whitespace()) {
                    if keys_tx.send(key).is_err() {
                        return;
                    }
                }
            }
        });
    } else {
        drop(keys_tx);
    }

    let driver = std::thread::spawn(move || run(params, &options, events_tx, keys_rx));

    for event in events_rx.iter() {
        match &event {
            Event::TurnComplete { .. } | Event::CellsFlipped { .. } => {}
            Event::FinalTurnComplete { .. } => println!("{}", event),
            _ => info!("{}", event),
        }
    }

    let outcome = driver
        .join()
        .map_err(|_| anyhow!("simulation worker panicked"))?
        .with_context(|| format!("running {}x{}", params.image_width, params.image_height))?;
    if outcome.completed_turns < params.turns {
        warn!(
            completed = outcome.completed_turns,
            requested = params.turns,
            "stopped early"
        );
    }
    Ok(())
}
