//! Barnes-Hut quadrant tree for approximate 2D gravity.
//!
//! Space is recursively divided into four quadrants. Each node is in one of
//! three mutually exclusive states (empty, leaf with one body, internal with
//! four children) and carries the aggregate mass and mass-weighted centroid
//! of everything beneath it. Force computation walks the tree and treats a
//! distant region as a single point mass at its center of mass, giving
//! O(N log N) instead of the O(N²) all-pairs sum.
//!
//! The tree is rebuilt from scratch every simulation tick and is append-only
//! during its lifetime. Aggregates are maintained incrementally on insert
//! and never re-derived afterward; [`QuadTree::total_mass`] exists to check
//! that invariant from tests.
//!
//! Two bodies that land in a quadrant too small to subdivide cannot be
//! spatially separated, so insertion reports them to a
//! [`CollisionRegistry`](crate::collisions::CollisionRegistry) instead of
//! recursing forever.

use nalgebra::{Point2, Vector2};

use crate::body::{Body, BodyId};
use crate::collisions::CollisionRegistry;
use crate::config::SimulationConfig;
use crate::math;

/// Copy of the body fields the tree needs. The tree owns its snapshots, so
/// it stays valid while the live bodies are mutated during the tick.
#[derive(Debug, Clone, Copy)]
struct BodySnapshot {
    id: BodyId,
    position: Point2<f64>,
    mass: f64,
}

impl BodySnapshot {
    fn of(body: &Body) -> Self {
        Self {
            id: body.id,
            position: body.position,
            mass: body.mass(),
        }
    }
}

/// Axis-aligned rectangular extent of one quadrant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Half-open containment test (`min` inclusive, `max` exclusive),
    /// consistent with the quadrant routing below: a point exactly on a
    /// split line belongs to the east/south side only.
    fn contains(&self, point: Point2<f64>) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Which quadrant (0-3) a point belongs to. Screen coordinates, y grows
    /// downward:
    ///
    /// ```text
    /// +-------+-------+
    /// |   0   |   1   |  (north-west, north-east)
    /// +-------+-------+
    /// |   2   |   3   |  (south-west, south-east)
    /// +-------+-------+
    /// ```
    ///
    /// Ties route to a fixed side: `x >= center.x` goes east, `y >= center.y`
    /// goes south, so a boundary body is neither dropped nor double-counted.
    fn quadrant(&self, point: Point2<f64>) -> usize {
        let center = self.center();
        let east = (point.x >= center.x) as usize;
        let south = (point.y >= center.y) as usize;
        east | (south << 1)
    }

    /// Bounds of the given child quadrant (0-3).
    fn child(&self, quadrant: usize) -> Self {
        let center = self.center();
        let min = Point2::new(
            if quadrant & 1 != 0 { center.x } else { self.min.x },
            if quadrant & 2 != 0 { center.y } else { self.min.y },
        );
        let max = Point2::new(
            if quadrant & 1 != 0 { self.max.x } else { center.x },
            if quadrant & 2 != 0 { self.max.y } else { center.y },
        );
        Self { min, max }
    }
}

/// Recoverable insertion failures. Neither is fatal: the offending body is
/// simply left out of this tick's tree.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InsertError {
    /// Two bodies at exactly the same coordinates cannot be separated by
    /// subdivision at any depth.
    #[error("body at identical coordinates ({x}, {y}) as an already inserted body")]
    Coincident { x: f64, y: f64 },

    /// The body's coordinates fall outside the tree's extent; the caller
    /// treats this as "body has left the simulated universe".
    #[error("body outside the tree bounds")]
    OutOfBounds,
}

/// Successful insertion outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    /// The body was stored in a quadrant.
    Stored,
    /// The target quadrant could not subdivide further; the pair was
    /// reported to the collision registry and the body was not stored.
    Collision,
}

/// One of the three mutually exclusive node states.
#[derive(Debug)]
enum QuadState {
    Empty,
    Leaf(BodySnapshot),
    Internal(Box<[Quadrant; 4]>),
}

/// A single node of the tree: a region of space plus the aggregate mass and
/// mass-weighted centroid of the bodies it contains.
#[derive(Debug)]
struct Quadrant {
    bounds: Bounds,
    /// Aggregate mass of everything in this subtree
    mass: f64,
    /// Mass-weighted position sum; actual centroid is `weighted / mass`
    weighted: Vector2<f64>,
    state: QuadState,
}

impl Quadrant {
    fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            mass: 0.0,
            weighted: Vector2::zeros(),
            state: QuadState::Empty,
        }
    }

    fn insert(
        &mut self,
        snapshot: BodySnapshot,
        min_quad_size: f64,
        registry: &mut CollisionRegistry,
    ) -> Result<Inserted, InsertError> {
        match &mut self.state {
            QuadState::Empty => {
                // As a leaf, the aggregate is exactly the contained body.
                self.mass = snapshot.mass;
                self.weighted = snapshot.position.coords * snapshot.mass;
                self.state = QuadState::Leaf(snapshot);
                Ok(Inserted::Stored)
            }
            QuadState::Leaf(resident) => {
                if resident.position == snapshot.position {
                    return Err(InsertError::Coincident {
                        x: snapshot.position.x,
                        y: snapshot.position.y,
                    });
                }
                if self.bounds.width() <= min_quad_size || self.bounds.height() <= min_quad_size {
                    // Escape valve: the quadrant refuses to subdivide and the
                    // pair becomes a collision instead.
                    registry.notify(resident.id, snapshot.id);
                    return Ok(Inserted::Collision);
                }

                let resident = *resident;
                self.split();
                // Both bodies re-enter through the internal path below, so
                // each contributes exactly once to the zeroed aggregates.
                self.insert(resident, min_quad_size, registry)?;
                self.insert(snapshot, min_quad_size, registry)
            }
            QuadState::Internal(children) => {
                if !self.bounds.contains(snapshot.position) {
                    return Err(InsertError::OutOfBounds);
                }
                self.mass += snapshot.mass;
                self.weighted += snapshot.position.coords * snapshot.mass;
                let quadrant = self.bounds.quadrant(snapshot.position);
                children[quadrant].insert(snapshot, min_quad_size, registry)
            }
        }
    }

    /// Becomes an internal node with four empty children and zeroed
    /// aggregates.
    fn split(&mut self) {
        let children = std::array::from_fn(|q| Quadrant::new(self.bounds.child(q)));
        self.state = QuadState::Internal(Box::new(children));
        self.mass = 0.0;
        self.weighted = Vector2::zeros();
    }

    fn apply_gravity(
        &self,
        body: &mut Body,
        gravity_constant: f64,
        theta: f64,
        softening: f64,
        mut trace: Option<&mut GravityTrace>,
    ) {
        if self.mass == 0.0 {
            return;
        }
        match &self.state {
            QuadState::Empty => {}
            QuadState::Leaf(resident) => {
                if resident.id == body.id {
                    return;
                }
                // Leaf uses the exact contained-body position.
                point_mass_impulse(
                    body,
                    resident.position,
                    self.mass,
                    gravity_constant,
                    softening,
                    trace,
                );
            }
            QuadState::Internal(children) => {
                // Internal nodes always use the aggregate centroid.
                let center = Point2::from(self.weighted / self.mass);
                let distance = math::distance(body.position, center).max(softening);
                let size = (self.bounds.width() + self.bounds.height()) / 2.0;

                if size / distance < theta {
                    point_mass_impulse(body, center, self.mass, gravity_constant, softening, trace);
                } else {
                    for child in children.iter() {
                        child.apply_gravity(
                            body,
                            gravity_constant,
                            theta,
                            softening,
                            trace.as_mut().map(|t| &mut **t),
                        );
                    }
                }
            }
        }
    }

    /// Recomputes subtree mass by summing leaves, ignoring the incremental
    /// aggregates. Exists to validate them.
    fn leaf_mass(&self) -> f64 {
        match &self.state {
            QuadState::Empty => 0.0,
            QuadState::Leaf(resident) => resident.mass,
            QuadState::Internal(children) => children.iter().map(Quadrant::leaf_mass).sum(),
        }
    }

    fn visit<F: FnMut(&Bounds, f64)>(&self, visit: &mut F) {
        visit(&self.bounds, self.mass);
        if let QuadState::Internal(children) = &self.state {
            for child in children.iter() {
                child.visit(visit);
            }
        }
    }
}

/// Applies one inverse-square impulse from a point mass at `center`.
fn point_mass_impulse(
    body: &mut Body,
    center: Point2<f64>,
    mass: f64,
    gravity_constant: f64,
    softening: f64,
    trace: Option<&mut GravityTrace>,
) {
    let distance = math::distance(body.position, center).max(softening);
    let magnitude = (gravity_constant * mass) / (distance * distance);
    if !magnitude.is_finite() {
        debug_assert!(false, "non-finite gravity magnitude for body {:?}", body.id);
        log::warn!("skipping non-finite gravity impulse on body {:?}", body.id);
        return;
    }
    let angle = math::angle_to(body.position, center);
    body.apply_impulse(magnitude, angle);

    if let Some(trace) = trace {
        trace.record(body.id, center, magnitude);
    }
}

/// One recorded force application, kept only for diagnostic replay (e.g.
/// rendering force lines). Never read back by the force algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySample {
    /// Body the impulse was applied to
    pub target: BodyId,
    /// Effective mass center the impulse pointed toward
    pub source: Point2<f64>,
    /// Impulse magnitude
    pub magnitude: f64,
}

/// Side-channel collecting per-traversal force applications.
///
/// Populated by [`QuadTree::update_gravity_traced`]; cleared by the caller
/// between ticks.
#[derive(Debug, Default)]
pub struct GravityTrace {
    samples: Vec<GravitySample>,
}

impl GravityTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[GravitySample] {
        &self.samples
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    fn record(&mut self, target: BodyId, source: Point2<f64>, magnitude: f64) {
        self.samples.push(GravitySample {
            target,
            source,
            magnitude,
        });
    }
}

/// Barnes-Hut quadrant tree over one tick's bodies.
///
/// Built once per tick, owned by that tick, and discarded after it; the
/// tree stores position/mass snapshots so it stays valid while the live
/// bodies are mutated by force application.
///
/// # Examples
///
/// ```
/// use nalgebra::Point2;
/// use orrery::body::{Body, BodyId};
/// use orrery::collisions::CollisionRegistry;
/// use orrery::{QuadTree, SimulationConfig};
///
/// let config = SimulationConfig::default();
/// let bodies = vec![
///     Body::new(BodyId(1), "Io", Point2::new(100.0, 100.0), 0.0, 0.0, 200.0, 0.01),
///     Body::new(BodyId(2), "Europa", Point2::new(900.0, 700.0), 0.0, 0.0, 200.0, 0.01),
/// ];
///
/// let mut registry = CollisionRegistry::new();
/// let tree = QuadTree::build(&bodies, &config, &mut registry);
/// assert!((tree.root_mass() - 400.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct QuadTree {
    root: Quadrant,
    gravity_constant: f64,
    theta: f64,
    min_quad_size: f64,
    softening: f64,
}

impl QuadTree {
    /// Creates an empty tree covering `[0, world_width] x [0, world_height]`.
    pub fn empty(config: &SimulationConfig) -> Self {
        Self {
            root: Quadrant::new(Bounds::new(
                0.0,
                0.0,
                config.world_width,
                config.world_height,
            )),
            gravity_constant: config.gravity_constant,
            theta: config.theta,
            min_quad_size: config.min_quad_size,
            softening: config.softening,
        }
    }

    /// Builds a tree covering the full world and inserts each body in input
    /// order. Deterministic given deterministic input order; later
    /// insertions observe earlier aggregate state.
    ///
    /// Insertion failures are recovered locally: the body is left out of
    /// this tick's tree and the failure is logged as a defect signal.
    pub fn build<'a, I>(
        bodies: I,
        config: &SimulationConfig,
        registry: &mut CollisionRegistry,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Body>,
    {
        let mut tree = Self::empty(config);
        for body in bodies {
            match tree.insert(body, registry) {
                Ok(_) => {}
                Err(error @ InsertError::Coincident { .. }) => {
                    log::warn!("dropping body {:?} from tree: {error}", body.id);
                }
                Err(InsertError::OutOfBounds) => {
                    log::debug!("body {:?} is outside the tree bounds", body.id);
                }
            }
        }
        tree
    }

    /// Inserts a snapshot of `body`, reporting unsubdividable pairs to the
    /// registry.
    pub fn insert(
        &mut self,
        body: &Body,
        registry: &mut CollisionRegistry,
    ) -> Result<Inserted, InsertError> {
        // Checked here, before any node is touched: a stray body must never
        // become a leaf, or its later re-insertion during a split would fail
        // and take the split's valid bodies down with it. Below the root,
        // routed positions are in bounds by construction.
        if !self.root.bounds.contains(body.position) {
            return Err(InsertError::OutOfBounds);
        }
        self.root
            .insert(BodySnapshot::of(body), self.min_quad_size, registry)
    }

    /// Applies the Barnes-Hut approximate gravitational force of the whole
    /// tree to `body` as a velocity increment.
    ///
    /// At each node, `size / distance < theta` (size: mean of width and
    /// height; distance: body to aggregate centroid) decides between using
    /// the aggregate and recursing. Leaves apply directly from the exact
    /// body position. A node with zero mass, or the leaf holding the query
    /// body itself, contributes nothing.
    pub fn update_gravity(&self, body: &mut Body) {
        self.root
            .apply_gravity(body, self.gravity_constant, self.theta, self.softening, None);
    }

    /// Like [`Self::update_gravity`], additionally recording every applied
    /// impulse into `trace` for diagnostic replay.
    pub fn update_gravity_traced(&self, body: &mut Body, trace: &mut GravityTrace) {
        self.root.apply_gravity(
            body,
            self.gravity_constant,
            self.theta,
            self.softening,
            Some(trace),
        );
    }

    /// The root's incrementally maintained aggregate mass.
    pub fn root_mass(&self) -> f64 {
        self.root.mass
    }

    /// Total mass recomputed by summing all leaves. Matches
    /// [`Self::root_mass`] to within floating-point tolerance at all times;
    /// force traversal never mutates aggregates.
    pub fn total_mass(&self) -> f64 {
        self.root.leaf_mass()
    }

    /// Effective mass center of the root: the exact contained-body position
    /// for a leaf root, the aggregate centroid for an internal one, `None`
    /// when the tree is empty.
    pub fn root_centroid(&self) -> Option<Point2<f64>> {
        match &self.root.state {
            QuadState::Empty => None,
            QuadState::Leaf(resident) => Some(resident.position),
            QuadState::Internal(_) => {
                (self.root.mass > 0.0).then(|| Point2::from(self.root.weighted / self.root.mass))
            }
        }
    }

    /// Extent of the root quadrant.
    pub fn bounds(&self) -> Bounds {
        self.root.bounds
    }

    /// Walks every node top-down, yielding its bounds and aggregate mass.
    /// Intended for renderers drawing the quadrant structure.
    pub fn visit_regions<F: FnMut(&Bounds, f64)>(&self, mut visit: F) {
        self.root.visit(&mut visit);
    }
}
