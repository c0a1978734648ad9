use crate::{
    config::{Params, RunOptions},
    engine::step_turn,
    error::{GolError, Result},
    events::{Cell, Event, State},
    grid::Grid,
    pgm,
};
use flume::{Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Board and live cells after the last computed generation.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub completed_turns: usize,
    pub grid: Grid,
    pub alive: Vec<Cell>,
}

/// Loads `<images_dir>/<W>x<H>.pgm` and runs it for `params.turns` generations.
///
/// See [`run_from`].
pub fn run(
    params: Params,
    options: &RunOptions,
    events: Sender<Event>,
    key_presses: Receiver<char>,
) -> Result<Outcome> {
    params.validate()?;
    let initial = pgm::load_grid(&options.images_dir, params.dimensions())?;
    run_from(params, options, initial, events, key_presses)
}

/// Runs the simulation from an already loaded board.
///
/// Keys are handled between generations: `s` saves, `q` saves and stops,
/// `p` toggles pause. The stream always ends with [`Event::FinalTurnComplete`]
/// and `events` is dropped right after it.
pub fn run_from(
    params: Params,
    options: &RunOptions,
    initial: Grid,
    events: Sender<Event>,
    key_presses: Receiver<char>,
) -> Result<Outcome> {
    params.validate()?;
    options.validate()?;
    if initial.dimensions() != params.dimensions() {
        return Err(GolError::InvalidParams(format!(
            "initial board is {}, params ask for {}",
            initial.dimensions(),
            params.dimensions()
        )));
    }
    info!(
        turns = params.turns,
        threads = params.threads,
        dims = %params.dimensions(),
        "starting simulation"
    );

    let mut sim = Simulation {
        params,
        options,
        other: Grid::blank(initial.dimensions()),
        active: initial,
        turn: 0,
        events,
        key_presses,
        last_tick: Instant::now(),
    };
    let outcome = sim.run()?;
    info!(
        completed_turns = outcome.completed_turns,
        alive = outcome.alive.len(),
        "simulation finished"
    );
    Ok(outcome)
}

/// Event-free loop used for benchmarking.
pub fn process_turns(initial: Grid, turns: usize, threads: usize) -> Grid {
    let mut active = initial;
    let mut other = Grid::blank(active.dimensions());
    for _ in 0..turns {
        step_turn(&active, &mut other, threads);
        std::mem::swap(&mut active, &mut other);
    }
    active
}

enum Control {
    Continue,
    Quit,
}

struct Simulation<'a> {
    params: Params,
    options: &'a RunOptions,
    active: Grid,
    other: Grid,
    turn: usize,
    events: Sender<Event>,
    key_presses: Receiver<char>,
    last_tick: Instant,
}

impl Simulation<'_> {
    fn run(&mut self) -> Result<Outcome> {
        if self.options.report_flips {
            let cells = self.active.alive_cells();
            if !cells.is_empty() {
                self.send(Event::CellsFlipped {
                    completed_turns: 0,
                    cells,
                })?;
            }
        }

        while self.turn < self.params.turns {
            if let Control::Quit = self.poll_keys()? {
                self.save()?;
                self.send(Event::StateChange {
                    completed_turns: self.turn,
                    new_state: State::Quitting,
                })?;
                return self.finish();
            }

            step_turn(&self.active, &mut self.other, self.params.threads);
            let flipped = self
                .options
                .report_flips
                .then(|| self.active.flipped_cells(&self.other));
            std::mem::swap(&mut self.active, &mut self.other);
            self.turn += 1;
            trace!(turn = self.turn, "turn complete");

            if let Some(cells) = flipped.filter(|c| !c.is_empty()) {
                self.send(Event::CellsFlipped {
                    completed_turns: self.turn,
                    cells,
                })?;
            }
            self.send(Event::TurnComplete {
                completed_turns: self.turn,
            })?;
            self.report_if_due()?;
        }

        self.save()?;
        self.finish()
    }

    /// Drains pending keys without blocking; blocks only while paused.
    fn poll_keys(&mut self) -> Result<Control> {
        loop {
            let key = match self.key_presses.try_recv() {
                Ok(key) => key,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
                    return Ok(Control::Continue)
                }
            };
            match key {
                's' => self.save()?,
                'q' => return Ok(Control::Quit),
                'p' => {
                    if let Control::Quit = self.pause()? {
                        return Ok(Control::Quit);
                    }
                }
                other => debug!(key = %other, "ignoring key"),
            }
        }
    }

    /// Holds generation advancement until `p` again; `s` and `q` still apply.
    fn pause(&mut self) -> Result<Control> {
        info!(turn = self.turn, "paused");
        self.send(Event::StateChange {
            completed_turns: self.turn,
            new_state: State::Paused,
        })?;
        loop {
            let wait = self.options.tick.saturating_sub(self.last_tick.elapsed());
            match self.key_presses.recv_timeout(wait) {
                Ok('p') => break,
                Ok('s') => self.save()?,
                Ok('q') => return Ok(Control::Quit),
                Ok(other) => debug!(key = %other, "ignoring key while paused"),
                Err(RecvTimeoutError::Timeout) => self.report_if_due()?,
                Err(RecvTimeoutError::Disconnected) => {
                    warn!("key channel closed while paused, resuming");
                    break;
                }
            }
        }
        info!(turn = self.turn, "resumed");
        self.send(Event::StateChange {
            completed_turns: self.turn,
            new_state: State::Executing,
        })?;
        Ok(Control::Continue)
    }

    /// Alive-cell count on a wall-clock cadence, checked without waiting.
    fn report_if_due(&mut self) -> Result<()> {
        if self.last_tick.elapsed() < self.options.tick {
            return Ok(());
        }
        self.last_tick = Instant::now();
        self.send(Event::AliveCellsCount {
            completed_turns: self.turn,
            cells_count: self.active.alive_count(),
        })
    }

    fn save(&mut self) -> Result<()> {
        let Some(dir) = &self.options.out_dir else {
            return Ok(());
        };
        let path = pgm::output_path(dir, self.active.dimensions(), self.turn);
        pgm::write_pgm(&self.active, &path)?;
        info!(turn = self.turn, path = %path.display(), "board saved");
        self.send(Event::ImageOutputComplete {
            completed_turns: self.turn,
            filename: path.display().to_string(),
        })
    }

    fn finish(&mut self) -> Result<Outcome> {
        let alive = self.active.alive_cells();
        self.send(Event::FinalTurnComplete {
            completed_turns: self.turn,
            alive: alive.clone(),
        })?;
        Ok(Outcome {
            completed_turns: self.turn,
            grid: self.active.clone(),
            alive,
        })
    }

    fn send(&self, event: Event) -> Result<()> {
        self.events.send(event).map_err(|_| GolError::EventsClosed)
    }
}
