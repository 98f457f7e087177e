#![warn(missing_docs)]
//! Cellular-automaton map generation for grid-based games
//!
//! A [`generator::CellularGenerator`] owns a dense grid of binary cells and
//! advances it one birth/survival generation at a time. With the `connected`
//! option enabled, every generation ends with a repair pass that carves
//! corridors until all open cells are mutually reachable.
//!
//! ```
//! use cellular_mapgen::generator::CellularGenerator;
//! use cellular_mapgen::options::CellularOptions;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let options = CellularOptions {
//!     connected: true,
//!     ..Default::default()
//! };
//! let mut generator = CellularGenerator::new(40, 25, options).unwrap();
//! generator.randomize(&mut rng, 0.5);
//! for _ in 0..3 {
//!     generator.create(&mut rng, None);
//! }
//! assert_eq!(generator.grid().width(), 40);
//! ```

pub mod connect;
pub mod generator;
pub mod grid;
pub mod options;
pub mod topology;
