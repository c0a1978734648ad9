use crate::events::Cell;

/// State byte of a live cell.
pub const ALIVE: u8 = 255;
/// State byte of a dead cell.
pub const DEAD: u8 = 0;

/// Size of the field; fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Field of cells with edges stitched together (torus).
///
/// Cells are stored row-major, one byte per cell: `cells[x + y * width]`.
/// Any nonzero byte reads as alive, but only [`ALIVE`] and [`DEAD`] are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<u8>,
    dims: Dimensions,
}

impl Grid {
    /// Creates a field filled with dead cells.
    pub fn blank(dims: Dimensions) -> Self {
        assert!(dims.width >= 1 && dims.height >= 1);
        Self {
            cells: vec![DEAD; dims.cells()],
            dims,
        }
    }

    /// Wraps a row-major byte buffer; nonzero bytes are normalized to [`ALIVE`].
    pub fn from_bytes(dims: Dimensions, bytes: &[u8]) -> Self {
        assert_eq!(bytes.len(), dims.cells());
        Self {
            cells: bytes
                .iter()
                .map(|&b| if b != DEAD { ALIVE } else { DEAD })
                .collect(),
            dims,
        }
    }

    /// Creates a field where exactly the listed cells are alive.
    ///
    /// Coordinates outside the field are wrapped onto it.
    pub fn from_alive(dims: Dimensions, alive: &[Cell]) -> Self {
        let mut grid = Self::blank(dims);
        for cell in alive {
            grid.set(cell.x % dims.width, cell.y % dims.height, true);
        }
        grid
    }

    /// Fills a field with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(dims: Dimensions, seed: Option<u64>, fill_rate: f64) -> Self {
        use rand::{Rng, SeedableRng};

        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_entropy()
        };
        let cells = (0..dims.cells())
            .map(|_| if rng.gen_bool(fill_rate) { ALIVE } else { DEAD })
            .collect();
        Self { cells, dims }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Raw row-major cell bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable row-major cell bytes, `width` bytes per row.
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[x + y * self.dims.width] != DEAD
    }

    pub fn set(&mut self, x: usize, y: usize, state: bool) {
        self.cells[x + y * self.dims.width] = if state { ALIVE } else { DEAD };
    }

    /// Number of live cells among the 8 neighbours of `(x, y)`, wrapping at the edges.
    pub fn neighbour_count(&self, x: usize, y: usize) -> u8 {
        let (w, h) = (self.dims.width, self.dims.height);
        let x1 = if x == 0 { w - 1 } else { x - 1 };
        let x2 = if x == w - 1 { 0 } else { x + 1 };
        let y1 = if y == 0 { h - 1 } else { y - 1 };
        let y2 = if y == h - 1 { 0 } else { y + 1 };
        self.get(x1, y1) as u8
            + self.get(x, y1) as u8
            + self.get(x2, y1) as u8
            + self.get(x1, y) as u8
            + self.get(x2, y) as u8
            + self.get(x1, y2) as u8
            + self.get(x, y2) as u8
            + self.get(x2, y2) as u8
    }

    /// State byte of `(x, y)` in the next generation.
    pub fn next_cell(&self, x: usize, y: usize) -> u8 {
        next_state(self.cells[x + y * self.dims.width], self.neighbour_count(x, y))
    }

    /// Coordinates of all live cells, in row-major order.
    pub fn alive_cells(&self) -> Vec<Cell> {
        let w = self.dims.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != DEAD)
            .map(|(i, _)| Cell::new(i % w, i / w))
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != DEAD).count()
    }

    /// Cells whose state differs between `self` and `other`.
    pub fn flipped_cells(&self, other: &Grid) -> Vec<Cell> {
        assert_eq!(self.dims, other.dims);
        let w = self.dims.width;
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (&a, &b))| (a != DEAD) != (b != DEAD))
            .map(|(i, _)| Cell::new(i % w, i / w))
            .collect()
    }
}

/// Standard Life rule: birth on 3, survival on 2 or 3.
pub fn next_state(current: u8, live_neighbours: u8) -> u8 {
    match (current != DEAD, live_neighbours) {
        (true, 2) | (true, 3) | (false, 3) => ALIVE,
        _ => DEAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            let expected_alive = if n == 2 || n == 3 { ALIVE } else { DEAD };
            assert_eq!(next_state(ALIVE, n), expected_alive, "alive with {}", n);
            let expected_dead = if n == 3 { ALIVE } else { DEAD };
            assert_eq!(next_state(DEAD, n), expected_dead, "dead with {}", n);
        }
        // any nonzero byte counts as alive
        assert_eq!(next_state(1, 2), ALIVE);
    }

    #[test]
    fn test_corner_wraps_diagonally() {
        let mut grid = Grid::blank(Dimensions::new(4, 4));
        grid.set(0, 0, true);
        assert_eq!(grid.neighbour_count(3, 3), 1);
        assert_eq!(grid.neighbour_count(3, 0), 1);
        assert_eq!(grid.neighbour_count(0, 3), 1);
        assert_eq!(grid.neighbour_count(2, 2), 0);
        assert_eq!(grid.neighbour_count(0, 0), 0);
    }

    #[test]
    fn test_full_grid_counts_eight() {
        let dims = Dimensions::new(5, 3);
        let grid = Grid::from_bytes(dims, &vec![ALIVE; dims.cells()]);
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(grid.neighbour_count(x, y), 8);
            }
        }
    }

    #[test]
    fn test_alive_cells_are_row_major() {
        let dims = Dimensions::new(3, 2);
        let grid = Grid::from_bytes(dims, &[0, 7, 0, 255, 0, 0]);
        assert_eq!(grid.alive_cells(), vec![Cell::new(1, 0), Cell::new(0, 1)]);
        assert_eq!(grid.alive_count(), 2);
        assert_eq!(grid.as_bytes()[1], ALIVE);
    }

    #[test]
    fn test_random_is_seeded() {
        let dims = Dimensions::new(32, 16);
        let a = Grid::random(dims, Some(42), 0.3);
        let b = Grid::random(dims, Some(42), 0.3);
        assert_eq!(a, b);
        assert!(a.as_bytes().iter().all(|&c| c == ALIVE || c == DEAD));
    }
}
