use crate::{
    error::{GolError, Result},
    grid::{Dimensions, Grid},
    pgm,
    simulation::process_turns,
};
use std::{fs::OpenOptions, io::Write, path::Path, time::Instant};
use tracing::{info, warn};

pub const TURNS: [usize; 6] = [0, 1, 10, 100, 1000, 10000];
pub const SIZES: [usize; 2] = [256, 512];
pub const MAX_THREADS: usize = 16;

const SEED: u64 = 42;
const FILL_RATE: f64 = 0.3;

/// One measured `(turns, size, threads)` combination.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub turns: usize,
    pub size: usize,
    pub threads: usize,
    pub seconds: f64,
}

impl Sample {
    pub fn csv_line(&self) -> String {
        format!(
            "{}, {}, {}, {:.6}",
            self.turns, self.size, self.threads, self.seconds
        )
    }
}

/// Initial board for a square benchmark: the stored image if present, otherwise random.
pub fn initial_board(images_dir: &Path, size: usize) -> Result<Grid> {
    let dims = Dimensions::new(size, size);
    match pgm::load_grid(images_dir, dims) {
        Err(GolError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            warn!(dims = %dims, "no stored image, using a random board");
            Ok(Grid::random(dims, Some(SEED), FILL_RATE))
        }
        other => other,
    }
}

/// Times a single event-free run.
pub fn measure(initial: &Grid, turns: usize, threads: usize) -> Sample {
    let board = initial.clone();
    let timer = Instant::now();
    let board = process_turns(board, turns, threads);
    let seconds = timer.elapsed().as_secs_f64();
    std::hint::black_box(board);
    Sample {
        turns,
        size: initial.width(),
        threads,
        seconds,
    }
}

/// Runs every `(turns, size, threads)` combination and appends one CSV line per run to `output`.
pub fn bench_everything(output: &Path, images_dir: &Path) -> Result<Vec<Sample>> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(output)
        .map_err(|e| GolError::io(output, e))?;

    let mut samples = vec![];
    for turns in TURNS {
        for size in SIZES {
            let initial = initial_board(images_dir, size)?;
            for threads in 1..=MAX_THREADS {
                let sample = measure(&initial, turns, threads);
                info!(turns, size, threads, seconds = sample.seconds, "bench");
                writeln!(file, "{}", sample.csv_line()).map_err(|e| GolError::io(output, e))?;
                samples.push(sample);
            }
        }
    }
    Ok(samples)
}
