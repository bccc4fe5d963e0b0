//! Grid coordinates and the tile matrix.

use serde::{Deserialize, Serialize};

use crate::game::TileType;

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Row (0 = top).
    pub row: u16,
    /// Column (0 = left).
    pub col: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }

    /// Apply a signed step, returning `None` if the result leaves a
    /// `rows × cols` grid.
    #[must_use]
    pub fn offset(self, d_row: i32, d_col: i32, rows: u16, cols: u16) -> Option<Coord> {
        let row = i32::from(self.row) + d_row;
        let col = i32::from(self.col) + d_col;
        if row < 0 || col < 0 || row >= i32::from(rows) || col >= i32::from(cols) {
            return None;
        }
        // Both values are within [0, u16::MAX) after the bounds check.
        let row = u16::try_from(row).ok()?;
        let col = u16::try_from(col).ok()?;
        Some(Coord::new(row, col))
    }

    /// Get adjacent coordinates in the fixed order up, down, left, right.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, rows: u16, cols: u16) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.row > 0 {
            result[count as usize] = Coord::new(self.row - 1, self.col); // up
            count += 1;
        }
        if self.row + 1 < rows {
            result[count as usize] = Coord::new(self.row + 1, self.col); // down
            count += 1;
        }
        if self.col > 0 {
            result[count as usize] = Coord::new(self.row, self.col - 1); // left
            count += 1;
        }
        if self.col + 1 < cols {
            result[count as usize] = Coord::new(self.row, self.col + 1); // right
            count += 1;
        }

        (result, count)
    }
}

/// A cardinal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Direction {
    /// Every direction, in candidate enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)` for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// The maze: a row-major matrix of tiles.
///
/// Immutable once generated; the exit is session metadata, not a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    /// Number of rows.
    rows: u16,
    /// Number of columns.
    cols: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<TileType>,
}

impl Grid {
    /// Create a grid filled with a single tile type.
    ///
    /// Returns `None` if either dimension is zero.
    #[must_use]
    pub fn filled(rows: u16, cols: u16, tile: TileType) -> Option<Self> {
        if rows == 0 || cols == 0 {
            return None;
        }

        let size = usize::from(rows) * usize::from(cols);
        Some(Self {
            rows,
            cols,
            tiles: vec![tile; size],
        })
    }

    /// Build a grid from rows of tiles.
    ///
    /// Returns `None` if there are no rows, a row is empty, the rows have
    /// different lengths, or a dimension exceeds `u16::MAX`.
    #[must_use]
    pub fn from_rows(rows: &[Vec<TileType>]) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|r| r.len() != width) {
            return None;
        }
        let row_count = u16::try_from(rows.len()).ok()?;
        let col_count = u16::try_from(width).ok()?;

        Some(Self {
            rows: row_count,
            cols: col_count,
            tiles: rows.iter().flatten().copied().collect(),
        })
    }

    /// Get the number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Get the number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Bottom-right corner, where the exit sits.
    #[must_use]
    pub const fn last_cell(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    /// Get the raw tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[TileType] {
        &self.tiles
    }

    /// Check if a coordinate is within the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Convert a coordinate to an index into the tiles array.
    #[must_use]
    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.row) * usize::from(self.cols) + usize::from(coord.col))
        } else {
            None
        }
    }

    /// Get the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<TileType> {
        self.coord_to_index(coord).map(|idx| self.tiles[idx])
    }

    /// Set the tile at the given coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, tile: TileType) -> bool {
        if let Some(idx) = self.coord_to_index(coord) {
            self.tiles[idx] = tile;
            true
        } else {
            false
        }
    }

    /// Check whether the player may stand on `coord`.
    ///
    /// Out-of-bounds coordinates are never walkable.
    #[must_use]
    pub fn player_can_enter(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(TileType::permits_player)
    }

    /// Check whether an enemy may stand on `coord`.
    #[must_use]
    pub fn enemy_can_enter(&self, coord: Coord) -> bool {
        self.get(coord).is_some_and(TileType::permits_enemy)
    }

    /// Iterate over all coordinates and tiles.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, TileType)> + '_ {
        let cols = usize::from(self.cols);
        self.tiles.iter().enumerate().map(move |(idx, &tile)| {
            // idx / cols < rows and idx % cols < cols, both fit in u16.
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx / cols) as u16, (idx % cols) as u16);
            (coord, tile)
        })
    }

    /// Count tiles of a given type.
    #[must_use]
    pub fn count(&self, tile: TileType) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }
}
