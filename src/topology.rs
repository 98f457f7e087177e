//! Neighbor adjacency schemes for the automaton.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Relative offsets counted as neighbors under 4-connectivity.
const OFFSETS_4: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Relative offsets for the hexagonal scheme, expressed on a square array.
/// Only meaningful on the parity-strided scan (see [`Topology::column_start`]).
const OFFSETS_6: [(i32, i32); 6] = [(-1, -1), (1, -1), (-2, 0), (2, 0), (-1, 1), (1, 1)];

/// Relative offsets counted as neighbors under 8-connectivity.
const OFFSETS_8: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Enum for the supported neighbor topologies.
///
/// The discriminants are the neighbor counts, so raw integer configuration
/// values convert via [`TryFrom`]; anything outside `{4, 6, 8}` is rejected.
///
/// # Examples
///
/// ```
/// use cellular_mapgen::topology::Topology;
///
/// assert_eq!(Topology::try_from(6).unwrap(), Topology::Six);
/// assert!(Topology::try_from(5).is_err());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u8)]
pub enum Topology {
    /// Orthogonal neighbors only
    Four = 4,
    /// Hexagonal adjacency on a square array; the stepper visits only cells
    /// whose column parity matches the row parity
    Six = 6,
    /// Orthogonal and diagonal neighbors
    #[default]
    Eight = 8,
}

impl Topology {
    /// The fixed set of relative offsets counted as neighbors.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Topology::Four => &OFFSETS_4,
            Topology::Six => &OFFSETS_6,
            Topology::Eight => &OFFSETS_8,
        }
    }

    /// First column visited when scanning row `y`.
    pub fn column_start(self, y: usize) -> usize {
        match self {
            Topology::Six => y % 2,
            _ => 0,
        }
    }

    /// Column stride when scanning a row.
    pub fn column_step(self) -> usize {
        match self {
            Topology::Six => 2,
            _ => 1,
        }
    }
}
