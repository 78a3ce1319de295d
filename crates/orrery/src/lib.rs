//! 2D gravity sandbox with Barnes-Hut force approximation.
//!
//! Bodies are point masses with a mass-derived disc radius. Each simulation
//! tick rebuilds a quadrant tree over the live bodies, approximates
//! gravitational forces through it in O(N log N), integrates motion, and
//! resolves absorption collisions reported by the tree.

pub mod body;
pub mod collisions;
pub mod config;
pub mod math;
pub mod names;
pub mod quadtree;
pub mod universe;

#[cfg(test)]
mod quadtree_test;

pub use body::{Body, BodyId};
pub use config::SimulationConfig;
pub use quadtree::{GravityTrace, QuadTree};
pub use universe::Universe;
