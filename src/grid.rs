//! Cell states, coordinates, and the dense cell buffer.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Enum for [`Grid`] cell values.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum CellValue {
    /// Dead cell; free (passable) space in the generated map
    Empty = 0,
    /// Live cell; a wall in the generated map
    Alive = 1,
}

impl CellValue {
    /// Returns whether this [`CellValue`] is free (passable) space.
    pub fn free(self) -> bool {
        self == CellValue::Empty
    }
}

/// A grid coordinate pair.
///
/// Coordinates are signed so that neighbor arithmetic can step past the grid
/// edge; [`Grid::at`] treats any such point as out of bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column, `0..width` when inside the grid
    pub x: i32,
    /// Row, `0..height` when inside the grid
    pub y: i32,
}

impl Point {
    /// Create a new [`Point`].
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn dist_squared(&self, other: &Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// The four orthogonally adjacent points.
    pub fn orthogonal_neighbors(&self) -> [Point; 4] {
        [
            Point::new(self.x + 1, self.y),
            Point::new(self.x - 1, self.y),
            Point::new(self.x, self.y + 1),
            Point::new(self.x, self.y - 1),
        ]
    }
}

/// A dense 2D buffer of [`CellValue`]s with dimensions fixed at construction.
///
/// # Examples
///
/// ```
/// use cellular_mapgen::grid::{CellValue, Grid, Point};
///
/// let mut grid = Grid::new(4, 3);
/// assert_eq!(grid.at(&Point::new(0, 0)), Some(CellValue::Empty));
///
/// grid.set(2, 1, CellValue::Alive);
/// assert_eq!(grid.at(&Point::new(2, 1)), Some(CellValue::Alive));
/// assert_eq!(grid.at(&Point::new(4, 0)), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellValue>,
}

impl Grid {
    /// Creates a new all-[`Empty`](CellValue::Empty) grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellValue::Empty; width * height],
        }
    }

    /// Returns the width of the grid.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the grid.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the [`CellValue`] at the given position, or `None` if the
    /// position is out of bounds.
    pub fn at(&self, p: &Point) -> Option<CellValue> {
        if p.x < 0 || p.x >= self.width as i32 || p.y < 0 || p.y >= self.height as i32 {
            return None;
        }
        Some(self.cells[p.y as usize * self.width + p.x as usize])
    }

    /// Returns whether the given position is inside the grid and free.
    pub fn free(&self, p: &Point) -> bool {
        self.at(p).is_some_and(CellValue::free)
    }

    /// Writes a cell directly.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds. A bad coordinate is rejected
    /// loudly rather than wrapped into a neighboring row.
    pub fn set(&mut self, x: usize, y: usize, value: CellValue) {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        self.cells[y * self.width + x] = value;
    }

    /// Sets every cell to [`Alive`](CellValue::Alive) with independent
    /// probability `probability`.
    ///
    /// A probability of 0 yields an all-empty grid, 1 an all-alive grid.
    pub fn randomize(&mut self, rng: &mut impl Rng, probability: f64) {
        for cell in &mut self.cells {
            *cell = if rng.gen::<f64>() < probability {
                CellValue::Alive
            } else {
                CellValue::Empty
            };
        }
    }

    /// Returns the positions of all free cells in the grid.
    pub fn free_cells(&self) -> Vec<Point> {
        let mut free = vec![];
        for y in 0..self.height {
            for x in 0..self.width {
                if self.cells[y * self.width + x].free() {
                    free.push(Point::new(x as i32, y as i32));
                }
            }
        }
        free
    }

    /// Counts the live cells in the grid.
    pub fn population(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == CellValue::Alive)
            .count()
    }
}
