use std::fmt;

/// Coordinates of a single cell: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Execution state reported through [`Event::StateChange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Paused,
    Executing,
    Quitting,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Paused => "Paused",
            State::Executing => "Executing",
            State::Quitting => "Quitting",
        };
        f.write_str(name)
    }
}

/// Progress report produced by the simulation driver.
///
/// The stream ends with exactly one [`Event::FinalTurnComplete`], after which
/// the channel is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Periodic snapshot of how many cells are alive.
    AliveCellsCount {
        completed_turns: usize,
        cells_count: usize,
    },
    /// Cells whose state changed during the last turn (or that are initially alive).
    CellsFlipped {
        completed_turns: usize,
        cells: Vec<Cell>,
    },
    /// One more generation has been computed.
    TurnComplete { completed_turns: usize },
    /// The board has been written to `filename`.
    ImageOutputComplete {
        completed_turns: usize,
        filename: String,
    },
    StateChange {
        completed_turns: usize,
        new_state: State,
    },
    /// Terminal event carrying every live cell of the final board.
    FinalTurnComplete {
        completed_turns: usize,
        alive: Vec<Cell>,
    },
}

impl Event {
    pub fn completed_turns(&self) -> usize {
        match self {
            Event::AliveCellsCount {
                completed_turns, ..
            }
            | Event::CellsFlipped {
                completed_turns, ..
            }
            | Event::TurnComplete { completed_turns }
            | Event::ImageOutputComplete {
                completed_turns, ..
            }
            | Event::StateChange {
                completed_turns, ..
            }
            | Event::FinalTurnComplete {
                completed_turns, ..
            } => *completed_turns,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Event::FinalTurnComplete { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::AliveCellsCount {
                completed_turns,
                cells_count,
            } => write!(f, "Alive Cells {} (turn {})", cells_count, completed_turns),
            Event::CellsFlipped {
                completed_turns,
                cells,
            } => write!(f, "{} cells flipped (turn {})", cells.len(), completed_turns),
            Event::TurnComplete { completed_turns } => write!(f, "Turn {}", completed_turns),
            Event::ImageOutputComplete {
                completed_turns,
                filename,
            } => write!(f, "File {} Output Done (turn {})", filename, completed_turns),
            Event::StateChange {
                completed_turns,
                new_state,
            } => write!(f, "{} (turn {})", new_state, completed_turns),
            Event::FinalTurnComplete {
                completed_turns,
                alive,
            } => write!(
                f,
                "Final Turn Complete: {} alive (turn {})",
                alive.len(),
                completed_turns
            ),
        }
    }
}
