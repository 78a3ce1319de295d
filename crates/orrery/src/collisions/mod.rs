//! Collision registration and absorption resolution.
//!
//! Collisions are not detected geometrically: the quadrant tree reports a
//! pair whenever two bodies land in a quadrant too small to subdivide.
//! The registry collects those pairs for one tick; resolution merges each
//! pair by letting the heavier body absorb the lighter one.

pub mod registry;
pub mod resolution;

#[cfg(test)]
mod registry_test;
#[cfg(test)]
mod resolution_test;

pub use registry::{CollisionPair, CollisionRegistry};
pub use resolution::resolve_collisions;
