use anyhow::{Context, Result};
use gol_parallel::{bench_everything, init_logging, RunOptions};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

fn main() -> Result<()> {
    init_logging();
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bench.csv"));

    let timer = Instant::now();
    let samples = bench_everything(&output, Path::new(RunOptions::IMAGES_DIR))
        .with_context(|| format!("benchmarking into {}", output.display()))?;
    println!(
        "{} runs written to {} in {:?}",
        samples.len(),
        output.display(),
        timer.elapsed()
    );
    Ok(())
}
