//! Named numeric constants supplied at simulation construction time.

use serde::{Deserialize, Serialize};

/// Tunable constants for one simulation instance.
///
/// The defaults reproduce a "heavy anchor, light satellites" setup: most
/// bodies fall into rough orbits around the central anchor rather than
/// clustering with each other.
///
/// # Examples
///
/// ```
/// use orrery::SimulationConfig;
///
/// let config = SimulationConfig {
///     world_width: 2000.0,
///     world_height: 2000.0,
///     ..SimulationConfig::default()
/// };
/// assert!(config.theta > 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravitational constant used by both the tree traversal and direct
    /// anchor gravitation
    pub gravity_constant: f64,

    /// Barnes-Hut accuracy threshold: a node is treated as a single point
    /// mass when `size / distance` falls below this value.
    ///
    /// Higher values accept a rougher approximation (faster, less accurate).
    pub theta: f64,

    /// Minimum side length of a quadrant. A quadrant at or below this size
    /// in either axis refuses to subdivide and reports a collision instead.
    pub min_quad_size: f64,

    /// Lower bound on distances used in force computation, preventing
    /// singular magnitudes for near-coincident centers
    pub softening: f64,

    /// Disc radius per unit mass (radius = mass * mass_to_radius)
    pub mass_to_radius: f64,

    /// Mass assigned to newly spawned bodies
    pub initial_mass: f64,

    /// Delta applied by a single increase/decrease mass operation
    pub mass_change_rate: f64,

    /// Initial speed of spawned bodies
    pub default_speed: f64,

    /// Mass of the fixed central anchor body
    pub anchor_mass: f64,

    /// World extent; bodies leaving `[0, width] x [0, height]` are destroyed
    pub world_width: f64,
    pub world_height: f64,

    /// Cap on the number of live bodies accepted by random spawning
    pub max_bodies: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // A heavier anchor generally needs to be offset by lower gravity,
            // or new bodies dive straight into it.
            gravity_constant: 0.07,
            theta: 1.0,
            min_quad_size: 20.0,
            softening: 1.0,
            mass_to_radius: 0.01,
            initial_mass: 200.0,
            mass_change_rate: 0.5,
            default_speed: 4.2,
            anchor_mass: 50_000.0,
            world_width: 1280.0,
            world_height: 900.0,
            max_bodies: 100,
        }
    }
}
