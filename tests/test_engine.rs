use gol_parallel::{
    process_turns, row_ranges, step_turn, Cell, Dimensions, Grid, RowRange, ALIVE, DEAD,
};

const SEED: u64 = 42;
const FILL_RATE: f64 = 0.3;

fn glider(dims: Dimensions, dx: usize, dy: usize) -> Grid {
    let cells = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]
        .iter()
        .map(|&(x, y)| Cell::new(x + dx, y + dy))
        .collect::<Vec<_>>();
    Grid::from_alive(dims, &cells)
}

#[test]
fn test_worker_count_does_not_change_result() {
    for (w, h) in [(64, 64), (50, 17), (16, 100)] {
        let initial = Grid::random(Dimensions::new(w, h), Some(SEED), FILL_RATE);
        let reference = process_turns(initial.clone(), 20, 1);
        for threads in [2, 3, 4, 7, 16, 32] {
            let result = process_turns(initial.clone(), 20, threads);
            assert_eq!(result, reference, "{}x{} threads={}", w, h, threads);
            assert_eq!(result.alive_cells(), reference.alive_cells());
        }
    }
}

#[test]
fn test_glider_translates_after_four_turns() {
    let dims = Dimensions::new(8, 8);
    let start = glider(dims, 0, 0);
    for threads in [1, 3, 8] {
        let after = process_turns(start.clone(), 4, threads);
        assert_eq!(after, glider(dims, 1, 1), "threads={}", threads);
    }
}

#[test]
fn test_glider_wraps_around_torus() {
    let dims = Dimensions::new(8, 8);
    let start = glider(dims, 0, 0);
    // 8 diagonal steps bring it back to where it started
    let after = process_turns(start.clone(), 32, 4);
    assert_eq!(after, start);
}

#[test]
fn test_zero_turns_is_identity() {
    let initial = Grid::random(Dimensions::new(33, 21), Some(SEED), FILL_RATE);
    assert_eq!(process_turns(initial.clone(), 0, 4), initial);
}

#[test]
fn test_exactly_three_neighbours_means_alive() {
    let dims = Dimensions::new(6, 6);
    for centre_alive in [false, true] {
        let mut grid = Grid::from_alive(dims, &[Cell::new(1, 1), Cell::new(3, 1), Cell::new(2, 3)]);
        grid.set(2, 2, centre_alive);
        assert_eq!(grid.neighbour_count(2, 2), 3);
        let mut next = Grid::blank(dims);
        step_turn(&grid, &mut next, 2);
        assert!(next.get(2, 2), "centre_alive={}", centre_alive);
    }
}

#[test]
fn test_lonely_and_crowded_cells_die() {
    let dims = Dimensions::new(7, 7);
    let mut lonely = Grid::blank(dims);
    lonely.set(3, 3, true);
    lonely.set(4, 4, true);
    let mut next = Grid::blank(dims);
    step_turn(&lonely, &mut next, 3);
    assert_eq!(next.alive_count(), 0);

    let mut crowded = Grid::blank(dims);
    for (x, y) in [(3, 3), (2, 2), (4, 2), (2, 4), (4, 4)] {
        crowded.set(x, y, true);
    }
    assert_eq!(crowded.neighbour_count(3, 3), 4);
    step_turn(&crowded, &mut next, 3);
    assert!(!next.get(3, 3));
}

#[test]
fn test_only_canonical_bytes_are_written() {
    let initial = Grid::random(Dimensions::new(40, 40), Some(SEED), 0.5);
    let result = process_turns(initial, 5, 6);
    assert!(result.as_bytes().iter().all(|&c| c == ALIVE || c == DEAD));
}

#[test]
fn test_ranges_cover_every_row_once() {
    for height in [1, 2, 3, 255, 256, 512] {
        for workers in 1..=16 {
            let ranges = row_ranges(workers, height);
            let mut seen = vec![0; height];
            for RowRange { start, end } in ranges {
                for row in &mut seen[start..end] {
                    *row += 1;
                }
            }
            assert!(seen.iter().all(|&n| n == 1), "h={} w={}", height, workers);
        }
    }
}
