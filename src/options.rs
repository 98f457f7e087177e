//! Generator configuration.

use crate::topology::Topology;
use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

/// Common birth/survival rule presets, as `(born, survive)` pairs.
pub mod rules {
    /// Default cave rule (B5678/S45678); produces dense cave systems.
    pub const CAVES: (&[u8], &[u8]) = (&[5, 6, 7, 8], &[4, 5, 6, 7, 8]);

    /// Smoother, more open caverns (B678/S345678).
    pub const OPEN_CAVES: (&[u8], &[u8]) = (&[6, 7, 8], &[3, 4, 5, 6, 7, 8]);

    /// Maze-like corridor growth (B3/S12345).
    pub const MAZE: (&[u8], &[u8]) = (&[3], &[1, 2, 3, 4, 5]);
}

/// Configuration for a [`CellularGenerator`](crate::generator::CellularGenerator).
///
/// Immutable after the generator is constructed. Unspecified fields take the
/// documented defaults via [`Default`].
///
/// # Examples
///
/// ```
/// use cellular_mapgen::options::CellularOptions;
/// use cellular_mapgen::topology::Topology;
///
/// let options = CellularOptions {
///     topology: Topology::Four,
///     ..Default::default()
/// };
/// assert_eq!(options.born, vec![5, 6, 7, 8]);
/// assert!(!options.connected);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellularOptions {
    /// Neighbor counts that cause an empty cell to become alive
    pub born: Vec<u8>,
    /// Neighbor counts that let a live cell remain alive
    pub survive: Vec<u8>,
    /// Neighbor adjacency scheme
    pub topology: Topology,
    /// Run the connectivity repairer after each generation
    pub connected: bool,
}

impl Default for CellularOptions {
    fn default() -> Self {
        let (born, survive) = rules::CAVES;
        Self {
            born: born.to_vec(),
            survive: survive.to_vec(),
            topology: Topology::default(),
            connected: false,
        }
    }
}

impl CellularOptions {
    /// Creates options with the given birth/survival rule and defaults for
    /// everything else.
    ///
    /// ```
    /// use cellular_mapgen::options::{rules, CellularOptions};
    ///
    /// let (born, survive) = rules::MAZE;
    /// let options = CellularOptions::from_rule(born, survive);
    /// assert_eq!(options.born, vec![3]);
    /// ```
    pub fn from_rule(born: &[u8], survive: &[u8]) -> Self {
        Self {
            born: born.to_vec(),
            survive: survive.to_vec(),
            ..Default::default()
        }
    }

    /// Checks the options for degenerate values.
    ///
    /// Called at generator construction so that configuration errors surface
    /// before any generation step runs.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.born.is_empty() {
            return Err(anyhow!("Born rule is empty"));
        }
        if self.survive.is_empty() {
            return Err(anyhow!("Survive rule is empty"));
        }
        if let Some(count) = self.born.iter().find(|count| **count > 8) {
            return Err(anyhow!(
                "Born count {} exceeds the maximum of 8 neighbors",
                count
            ));
        }
        if let Some(count) = self.survive.iter().find(|count| **count > 8) {
            return Err(anyhow!(
                "Survive count {} exceeds the maximum of 8 neighbors",
                count
            ));
        }
        Ok(())
    }
}
