#![warn(clippy::all)]

mod bench;
mod config;
mod engine;
mod error;
mod events;
mod grid;
mod logging;
mod partition;
mod pgm;
mod simulation;

pub use bench::{bench_everything, initial_board, measure, Sample};
pub use config::{Params, RunOptions};
pub use engine::step_turn;
pub use error::{GolError, Result};
pub use events::{Cell, Event, State};
pub use grid::{next_state, Dimensions, Grid, ALIVE, DEAD};
pub use logging::init_logging;
pub use partition::{row_ranges, RowRange};
pub use pgm::{input_path, load_grid, output_path, read_pgm, write_pgm};
pub use simulation::{process_turns, run, run_from, Outcome};
