//! Point-mass bodies with disc radii and their kinematic operations.

use nalgebra::{Point2, Vector2};

use crate::math;

/// Stable identifier for a body, unique within one `Universe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u32);

/// A point mass with a mass-derived disc radius.
///
/// The radius is always `mass * radius_scale`, so it grows monotonically
/// with mass; mass is only mutated through the operations below and never
/// becomes negative.
///
/// # Examples
///
/// ```
/// use nalgebra::Point2;
/// use orrery::body::{Body, BodyId};
///
/// let body = Body::new(
///     BodyId(0),
///     "Ceres",
///     Point2::new(100.0, 100.0),
///     4.2,
///     0.0,
///     200.0,
///     0.01,
/// );
/// assert!((body.radius() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Display name, used only for diagnostics and UI
    pub name: String,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    /// Ticks survived (in hundredths, matching the integration step)
    pub age: f64,
    mass: f64,
    radius_scale: f64,
    destroyed: bool,
}

/// Smallest mass a body can be reduced to; keeps the radius positive.
const MIN_MASS: f64 = 1e-6;

/// Age increment applied per integration step.
const AGE_RATE: f64 = 0.01;

impl Body {
    /// Creates a body moving at `speed` along `heading` (radians).
    pub fn new(
        id: BodyId,
        name: impl Into<String>,
        position: Point2<f64>,
        speed: f64,
        heading: f64,
        mass: f64,
        radius_scale: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            velocity: math::polar(speed, heading),
            age: 0.0,
            mass: mass.max(MIN_MASS),
            radius_scale,
            destroyed: false,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Disc radius, derived from the current mass.
    pub fn radius(&self) -> f64 {
        self.mass * self.radius_scale
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Marks the body for removal at the end of the current tick.
    pub(crate) fn mark_destroyed(&mut self) {
        self.destroyed = true;
    }

    /// Advances position by one unit-step of the current velocity.
    ///
    /// A non-finite position or velocity at this boundary is a defect
    /// signal: the body is marked destroyed so corrupted state cannot
    /// spread into the next tick's tree.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
        self.age += AGE_RATE;

        if !math::point_is_finite(self.position) || !math::vector_is_finite(self.velocity) {
            debug_assert!(false, "non-finite state for body {:?}", self.id);
            log::warn!(
                "body {:?} ({}) reached non-finite state, destroying",
                self.id,
                self.name
            );
            self.destroyed = true;
        }
    }

    /// Adds a (magnitude, angle) impulse to the velocity.
    ///
    /// Non-finite impulses are dropped rather than propagated.
    pub fn apply_impulse(&mut self, magnitude: f64, angle: f64) {
        let delta = math::polar(magnitude, angle);
        if !math::vector_is_finite(delta) {
            debug_assert!(false, "non-finite impulse for body {:?}", self.id);
            log::warn!("dropping non-finite impulse on body {:?}", self.id);
            return;
        }
        self.velocity += delta;
    }

    /// Applies one step of direct two-body gravitation toward `other`.
    pub fn gravitate_toward(&mut self, other: &Body, gravity_constant: f64, softening: f64) {
        let magnitude = self.gravity_magnitude_toward(other, gravity_constant, softening);
        let angle = math::angle_to(self.position, other.position);
        self.apply_impulse(magnitude, angle);
    }

    /// Inverse-square gravity magnitude toward `other`, with the distance
    /// bounded below by `softening`.
    pub fn gravity_magnitude_toward(
        &self,
        other: &Body,
        gravity_constant: f64,
        softening: f64,
    ) -> f64 {
        let distance = self.distance_to(other).max(softening);
        (other.mass * gravity_constant) / (distance * distance)
    }

    /// Absorbs `other`: this body gains its mass (and therefore radius),
    /// and `other` is marked destroyed.
    ///
    /// The caller decides which body absorbs which; see the collision
    /// resolution policy in [`crate::collisions`].
    pub fn absorb(&mut self, other: &mut Body) {
        self.mass += other.mass;
        other.mark_destroyed();
    }

    /// Point-in-disc test against the current radius.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::Point2;
    /// use orrery::body::{Body, BodyId};
    ///
    /// let body = Body::new(BodyId(0), "Vesta", Point2::new(0.0, 0.0), 0.0, 0.0, 200.0, 0.01);
    /// assert!(body.contains_point(1.0, 1.0));
    /// assert!(!body.contains_point(3.0, 0.0));
    /// ```
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        math::distance(self.position, Point2::new(x, y)) <= self.radius()
    }

    /// Adds `delta` to the mass, flooring at the minimum so the radius
    /// invariant holds. Used for the fixed-rate grow/shrink operations.
    pub fn change_mass(&mut self, delta: f64) {
        self.mass = (self.mass + delta).max(MIN_MASS);
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        math::distance(self.position, other.position)
    }
}
