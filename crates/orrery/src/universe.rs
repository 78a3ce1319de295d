//! Simulation orchestration: one discrete tick at a time.

use nalgebra::Point2;
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::body::{Body, BodyId};
use crate::collisions::{resolve_collisions, CollisionRegistry};
use crate::config::SimulationConfig;
use crate::names::NameDeck;
use crate::quadtree::{GravityTrace, QuadTree};

/// Id reserved for the fixed central anchor body.
const ANCHOR_ID: BodyId = BodyId(0);

/// A world of bodies orbiting a fixed central anchor.
///
/// Each call to [`step`](Self::step) advances one tick:
///
/// 1. Build a fresh [`QuadTree`] from the live bodies plus the anchor.
/// 2. Per body: destroy it if it left the world bounds, otherwise apply the
///    tree's approximate gravity, direct gravitation toward the anchor, and
///    integrate motion.
/// 3. Drain the collision registry, letting heavier bodies absorb lighter
///    ones.
/// 4. Sweep destroyed bodies from the live set.
///
/// The tree and the per-tick gravity trace are retained between steps as a
/// read-only view for rendering; the next step replaces both.
///
/// # Examples
///
/// ```
/// use orrery::{SimulationConfig, Universe};
///
/// let mut universe = Universe::new(SimulationConfig::default());
/// let id = universe.spawn_body(400.0, 300.0, 4.2, 0.0, 200.0);
///
/// universe.step();
/// assert!(universe.get_body(id).is_some());
/// ```
#[derive(Debug)]
pub struct Universe {
    config: SimulationConfig,
    bodies: Vec<Body>,
    anchor: Body,
    next_id: u32,
    names: NameDeck,
    tree: Option<QuadTree>,
    trace: GravityTrace,
}

impl Universe {
    /// Creates an empty universe with the anchor at the world center.
    pub fn new(config: SimulationConfig) -> Self {
        let anchor = Body::new(
            ANCHOR_ID,
            "Sol",
            Point2::new(config.world_width / 2.0, config.world_height / 2.0),
            0.0,
            0.0,
            config.anchor_mass,
            config.mass_to_radius,
        );
        Self {
            anchor,
            bodies: Vec::new(),
            next_id: 1,
            names: NameDeck::new(0),
            tree: None,
            trace: GravityTrace::new(),
            config,
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) {
        let mut registry = CollisionRegistry::new();
        let tree = QuadTree::build(
            self.bodies.iter().chain(std::iter::once(&self.anchor)),
            &self.config,
            &mut registry,
        );

        self.trace.clear();
        let gravity = self.config.gravity_constant;
        let softening = self.config.softening;
        for body in &mut self.bodies {
            if !in_world(&self.config, body.position) {
                log::debug!("body {:?} ({}) left the universe", body.id, body.name);
                body.mark_destroyed();
                continue;
            }
            tree.update_gravity_traced(body, &mut self.trace);
            body.gravitate_toward(&self.anchor, gravity, softening);
            body.integrate();
        }

        // The anchor is fixed and outside the live set, so pairs involving
        // it resolve in its favor regardless of mass.
        let pairs = registry.drain();
        let (anchored, between_bodies): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .partition(|pair| pair.first == ANCHOR_ID || pair.second == ANCHOR_ID);
        for pair in anchored {
            let other = if pair.first == ANCHOR_ID {
                pair.second
            } else {
                pair.first
            };
            if let Some(body) = self.bodies.iter_mut().find(|b| b.id == other) {
                if !body.is_destroyed() {
                    self.anchor.absorb(body);
                }
            }
        }
        resolve_collisions(&mut self.bodies, &between_bodies);

        self.bodies.retain(|body| !body.is_destroyed());
        self.tree = Some(tree);
    }

    /// Adds a body moving at `speed` along `heading` (radians) and returns
    /// its id.
    pub fn spawn_body(&mut self, x: f64, y: f64, speed: f64, heading: f64, mass: f64) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        let name = self.names.next_name();
        self.bodies.push(Body::new(
            id,
            name,
            Point2::new(x, y),
            speed,
            heading,
            mass,
            self.config.mass_to_radius,
        ));
        id
    }

    /// Adds a body at `(x, y)` with the configured default speed and mass
    /// and a random heading.
    pub fn spawn_at(&mut self, x: f64, y: f64, rng: &mut ChaChaRng) -> BodyId {
        let heading = rng.random_range(0.0..std::f64::consts::TAU);
        self.spawn_body(
            x,
            y,
            self.config.default_speed,
            heading,
            self.config.initial_mass,
        )
    }

    /// Adds a body at a random position with randomized extra mass, unless
    /// the universe is already at its body cap.
    pub fn spawn_random(&mut self, rng: &mut ChaChaRng) -> Option<BodyId> {
        if self.bodies.len() >= self.config.max_bodies {
            return None;
        }
        // The world boundary counts as outside, so sample strictly inside it
        // or a body spawned at 0.0 is destroyed before its first force pass.
        let x = rng.random_range(1.0..self.config.world_width - 1.0);
        let y = rng.random_range(1.0..self.config.world_height - 1.0);
        let id = self.spawn_at(x, y, rng);

        let growth_steps = rng.random_range(0..400);
        let delta = growth_steps as f64 * self.config.mass_change_rate;
        if let Some(body) = self.get_body_mut(id) {
            body.change_mass(delta);
        }
        Some(id)
    }

    /// Read-only view of the live bodies, excluding the anchor.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn anchor(&self) -> &Body {
        &self.anchor
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Hit-test for UI selection: the anchor first, then bodies in spawn
    /// order.
    pub fn body_at(&self, x: f64, y: f64) -> Option<&Body> {
        if self.anchor.contains_point(x, y) {
            return Some(&self.anchor);
        }
        self.bodies.iter().find(|body| body.contains_point(x, y))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id == id)
    }

    /// Grows a body's mass by the configured rate.
    pub fn increase_mass(&mut self, id: BodyId) {
        let rate = self.config.mass_change_rate;
        if let Some(body) = self.get_body_mut(id) {
            body.change_mass(rate);
        }
    }

    /// Shrinks a body's mass by the configured rate (floored above zero).
    pub fn decrease_mass(&mut self, id: BodyId) {
        let rate = self.config.mass_change_rate;
        if let Some(body) = self.get_body_mut(id) {
            body.change_mass(-rate);
        }
    }

    /// Removes a body from the live set, returning it if found.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        self.bodies
            .iter()
            .position(|body| body.id == id)
            .map(|index| self.bodies.remove(index))
    }

    /// Removes all bodies. The anchor stays.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The tree built by the most recent step, for rendering.
    pub fn last_tree(&self) -> Option<&QuadTree> {
        self.tree.as_ref()
    }

    /// Force applications recorded during the most recent step.
    pub fn trace(&self) -> &GravityTrace {
        &self.trace
    }
}

/// World-bounds check; the boundary itself counts as outside.
fn in_world(config: &SimulationConfig, position: Point2<f64>) -> bool {
    position.x > 0.0
        && position.x < config.world_width
        && position.y > 0.0
        && position.y < config.world_height
}
