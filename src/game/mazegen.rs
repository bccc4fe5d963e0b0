//! Procedural maze generation.
//!
//! Every maze carries a monotone corridor of `Open` tiles from the top-left
//! corner to the bottom-right exit, so it is always solvable regardless of
//! what the random fill produces elsewhere.

use std::collections::VecDeque;

use rand::Rng;

use crate::error::ConfigError;
use crate::game::{Coord, Grid, TileType};

/// Generate a maze of `rows × cols` tiles.
///
/// 1. Every cell starts as a wall.
/// 2. A corridor is carved from `(0, 0)` to `(rows-1, cols-1)` by stepping
///    down or right with equal probability; once one axis is exhausted the
///    walk continues along the other.
/// 3. Every cell off the corridor becomes a uniform choice of wall, vines or
///    tunnel. `Open` never appears off the corridor.
///
/// # Errors
///
/// Returns an error if either dimension is zero.
pub fn generate<R: Rng + ?Sized>(rows: u16, cols: u16, rng: &mut R) -> Result<Grid, ConfigError> {
    let mut grid =
        Grid::filled(rows, cols, TileType::Wall).ok_or(ConfigError::EmptyGrid { rows, cols })?;

    let corridor = carve_corridor(rows, cols, rng);
    for &coord in &corridor {
        grid.set(coord, TileType::Open);
    }

    fill_terrain(&mut grid, rng);

    Ok(grid)
}

/// Walk from the top-left to the bottom-right corner with down/right steps.
///
/// The returned corridor always has `rows + cols - 1` cells.
fn carve_corridor<R: Rng + ?Sized>(rows: u16, cols: u16, rng: &mut R) -> Vec<Coord> {
    let end = Coord::new(rows - 1, cols - 1);
    let mut current = Coord::new(0, 0);
    let mut corridor = Vec::with_capacity(usize::from(rows) + usize::from(cols) - 1);
    corridor.push(current);

    while current != end {
        let can_down = current.row < end.row;
        let can_right = current.col < end.col;

        let go_down = match (can_down, can_right) {
            (true, true) => rng.random_bool(0.5),
            (down, _) => down,
        };

        if go_down {
            current.row += 1;
        } else {
            current.col += 1;
        }
        corridor.push(current);
    }

    corridor
}

/// Assign random non-open terrain to every cell that is still a wall.
///
/// Corridor cells are the only `Open` tiles at this point, so anything else
/// is fair game.
fn fill_terrain<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let targets: Vec<Coord> = grid
        .iter()
        .filter(|&(_, tile)| tile != TileType::Open)
        .map(|(coord, _)| coord)
        .collect();

    for coord in targets {
        let tile = TileType::FILL[rng.random_range(0..TileType::FILL.len())];
        grid.set(coord, tile);
    }
}

/// Breadth-first search between two cells through tiles accepted by
/// `passable`, using single cardinal steps.
///
/// Both endpoints must themselves be passable.
#[must_use]
pub fn is_reachable<F>(grid: &Grid, from: Coord, to: Coord, passable: F) -> bool
where
    F: Fn(TileType) -> bool,
{
    let walkable = |coord: Coord| grid.get(coord).is_some_and(&passable);
    if !walkable(from) || !walkable(to) {
        return false;
    }

    let width = usize::from(grid.cols());
    let index = |c: Coord| usize::from(c.row) * width + usize::from(c.col);

    let mut seen = vec![false; grid.tiles().len()];
    let mut queue = VecDeque::new();
    seen[index(from)] = true;
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        if current == to {
            return true;
        }
        let (adjacent, count) = current.adjacent(grid.rows(), grid.cols());
        for &next in &adjacent[..count as usize] {
            if !seen[index(next)] && walkable(next) {
                seen[index(next)] = true;
                queue.push_back(next);
            }
        }
    }

    false
}

/// Check for a path of `Open` tiles from the top-left corner to the exit.
#[must_use]
pub fn has_open_path(grid: &Grid) -> bool {
    is_reachable(grid, Coord::new(0, 0), grid.last_cell(), |tile| {
        tile == TileType::Open
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_dimensions() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate(15, 15, &mut rng).unwrap();
        assert_eq!(grid.rows(), 15);
        assert_eq!(grid.cols(), 15);
        assert_eq!(grid.tiles().len(), 225);
    }

    #[test]
    fn test_generate_zero_size() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            generate(0, 4, &mut rng),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 4 })
        );
    }

    #[test]
    fn test_corridor_is_monotone() {
        let mut rng = StdRng::seed_from_u64(99);
        let corridor = carve_corridor(8, 5, &mut rng);
        assert_eq!(corridor.len(), 8 + 5 - 1);
        assert_eq!(corridor.first(), Some(&Coord::new(0, 0)));
        assert_eq!(corridor.last(), Some(&Coord::new(7, 4)));
        for pair in corridor.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
            assert!(pair[1].row >= pair[0].row && pair[1].col >= pair[0].col);
        }
    }

    #[test]
    fn test_open_only_on_corridor() {
        // Open tiles are never scattered by the fill step, so the only open
        // cells are the rows + cols - 1 cells of the corridor.
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(15, 15, &mut rng).unwrap();
            assert_eq!(grid.count(TileType::Open), 29, "seed {seed}");
            assert!(has_open_path(&grid), "seed {seed}");
        }
    }

    #[test]
    fn test_non_square_and_corridor_grids() {
        let mut rng = StdRng::seed_from_u64(3);
        for (rows, cols) in [(1, 10), (10, 1), (4, 11), (1, 1)] {
            let grid = generate(rows, cols, &mut rng).unwrap();
            assert!(has_open_path(&grid), "{rows}x{cols}");
            assert_eq!(
                grid.count(TileType::Open),
                usize::from(rows) + usize::from(cols) - 1
            );
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(15, 15, &mut StdRng::seed_from_u64(1234)).unwrap();
        let b = generate(15, 15, &mut StdRng::seed_from_u64(1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_reachable_blocked() {
        use TileType::{Open, Wall};

        let grid = Grid::from_rows(&[
            vec![Open, Wall, Open],
            vec![Open, Wall, Open],
            vec![Open, Wall, Open],
        ])
        .unwrap();
        assert!(!has_open_path(&grid));
        assert!(is_reachable(&grid, Coord::new(0, 0), Coord::new(2, 0), |t| {
            t == Open
        }));
        assert!(is_reachable(&grid, Coord::new(0, 0), Coord::new(2, 2), |_| true));
    }
}
