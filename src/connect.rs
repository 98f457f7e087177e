//! Post-generation connectivity repair.
//!
//! An automaton step can leave the free space split into several regions.
//! [`repair`] merges them by repeatedly bridging the partition of proven
//! reachable cells (`connected`) and the rest (`not_connected`) with L-shaped
//! carved corridors, until every free cell is 4-connected to the seed.

use crate::grid::{CellValue, Grid, Point};
use rand::Rng;
use std::collections::{HashMap, HashSet, VecDeque};

/// Squared-distance bound under which a bridge candidate is accepted
/// immediately; longer corridors are only carved when no short pair turns up.
const BRIDGE_DIST_SQ_LIMIT: i64 = 64;

/// Candidate pairs drawn before settling for the best one seen.
const BRIDGE_ATTEMPTS: usize = 5;

/// A point set with O(1) membership and uniform random draw.
///
/// Pairs a hash map with a side vector of members so random selection never
/// has to materialize the key set; removal swaps the last member into the
/// vacated slot.
struct PointSet {
    index: HashMap<Point, usize>,
    points: Vec<Point>,
}

impl PointSet {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            points: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }

    fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn contains(&self, p: &Point) -> bool {
        self.index.contains_key(p)
    }

    fn insert(&mut self, p: Point) -> bool {
        if self.index.contains_key(&p) {
            return false;
        }
        self.index.insert(p, self.points.len());
        self.points.push(p);
        true
    }

    fn remove(&mut self, p: &Point) -> bool {
        let Some(slot) = self.index.remove(p) else {
            return false;
        };
        let last = self.points.pop().expect("index and points stay in sync");
        if slot < self.points.len() {
            self.points[slot] = last;
            self.index.insert(last, slot);
        }
        true
    }

    fn random(&self, rng: &mut impl Rng) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[rng.gen_range(0..self.points.len())])
    }

    /// Member nearest to `to` by squared Euclidean distance, via a full
    /// linear scan.
    fn nearest(&self, to: &Point) -> Option<Point> {
        self.points
            .iter()
            .min_by_key(|p| p.dist_squared(to))
            .copied()
    }
}

/// Ensures every free cell of `grid` is 4-connected to every other free
/// cell, carving walls into corridors where regions are disconnected.
///
/// Returns the randomly chosen seed point the repaired map is anchored on,
/// or `None` when the grid has no free cells at all (an all-wall grid is a
/// no-op, not an error).
///
/// # Examples
///
/// ```
/// use cellular_mapgen::connect::repair;
/// use cellular_mapgen::grid::{CellValue, Grid};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let mut grid = Grid::new(9, 3);
/// for y in 0..3 {
///     for x in 0..9 {
///         grid.set(x, y, CellValue::Alive);
///     }
/// }
/// grid.set(1, 1, CellValue::Empty);
/// grid.set(7, 1, CellValue::Empty);
///
/// let start = repair(&mut grid, &mut rng).unwrap();
/// assert!(grid.free(&start));
/// ```
pub fn repair(grid: &mut Grid, rng: &mut impl Rng) -> Option<Point> {
    let free = grid.free_cells();
    if free.is_empty() {
        return None;
    }

    let start = free[rng.gen_range(0..free.len())];
    let mut connected = PointSet::new();
    let mut not_connected = PointSet::new();
    connected.insert(start);
    for p in free {
        if p != start {
            not_connected.insert(p);
        }
    }

    flood(grid, start, &mut connected, &mut not_connected);

    while !not_connected.is_empty() {
        let (from, to) = select_pair(rng, &connected, &not_connected);
        let region = local_region(grid, from);
        carve(grid, &to, &from, &mut connected, &mut not_connected);
        for p in region {
            free_cell(grid, &p, &mut connected, &mut not_connected);
        }
    }

    Some(start)
}

/// Grows `connected` by 4-connected BFS from `start` over free cells.
fn flood(grid: &Grid, start: Point, connected: &mut PointSet, not_connected: &mut PointSet) {
    let mut frontier = VecDeque::from([start]);
    while let Some(p) = frontier.pop_front() {
        for neighbor in p.orthogonal_neighbors() {
            if grid.free(&neighbor) && not_connected.remove(&neighbor) {
                connected.insert(neighbor);
                frontier.push_back(neighbor);
            }
        }
    }
}

/// Picks a disconnected point `from` and a connected point `to` to bridge.
///
/// The smaller partition is the one scanned exhaustively: a random point is
/// drawn from the larger side's counterpart and paired with its nearest
/// member of the scanned side. A pair closer than [`BRIDGE_DIST_SQ_LIMIT`]
/// is taken immediately; after [`BRIDGE_ATTEMPTS`] draws the best pair seen
/// is taken regardless, bounding the search cost on awkward maps.
fn select_pair(
    rng: &mut impl Rng,
    connected: &PointSet,
    not_connected: &PointSet,
) -> (Point, Point) {
    // both partitions are non-empty inside the repair loop
    let mut best: Option<(Point, Point, i64)> = None;
    for _ in 0..BRIDGE_ATTEMPTS {
        let (from, to) = if connected.len() < not_connected.len() {
            let to = connected.random(rng).expect("connected holds the seed");
            let from = not_connected
                .nearest(&to)
                .expect("not_connected is non-empty");
            (from, to)
        } else {
            let from = not_connected
                .random(rng)
                .expect("not_connected is non-empty");
            let to = connected.nearest(&from).expect("connected holds the seed");
            (from, to)
        };
        let dist = from.dist_squared(&to);
        if dist < BRIDGE_DIST_SQ_LIMIT {
            return (from, to);
        }
        if best.map_or(true, |(_, _, best_dist)| dist < best_dist) {
            best = Some((from, to, dist));
        }
    }
    let (from, to, _) = best.expect("at least one attempt ran");
    (from, to)
}

/// Collects the full free region containing `from` without touching the
/// partition; the region may be larger than the single candidate point.
fn local_region(grid: &Grid, from: Point) -> Vec<Point> {
    let mut seen = HashSet::from([from]);
    let mut region = vec![from];
    let mut frontier = VecDeque::from([from]);
    while let Some(p) = frontier.pop_front() {
        for neighbor in p.orthogonal_neighbors() {
            if grid.free(&neighbor) && seen.insert(neighbor) {
                region.push(neighbor);
                frontier.push_back(neighbor);
            }
        }
    }
    region
}

/// Carves an L-shaped corridor between `from` and `to`: the horizontal run
/// at `from.y` between the two columns (inclusive), then the vertical run at
/// `to.x` between the two rows (exclusive of the larger, which is already
/// free on one end).
fn carve(
    grid: &mut Grid,
    to: &Point,
    from: &Point,
    connected: &mut PointSet,
    not_connected: &mut PointSet,
) {
    let y = from.y;
    for x in from.x.min(to.x)..=from.x.max(to.x) {
        free_cell(grid, &Point::new(x, y), connected, not_connected);
    }
    let x = to.x;
    for y in from.y.min(to.y)..from.y.max(to.y) {
        free_cell(grid, &Point::new(x, y), connected, not_connected);
    }
}

/// Forces a cell free and into the `connected` partition.
fn free_cell(grid: &mut Grid, p: &Point, connected: &mut PointSet, not_connected: &mut PointSet) {
    grid.set(p.x as usize, p.y as usize, CellValue::Empty);
    not_connected.remove(p);
    connected.insert(*p);
}
