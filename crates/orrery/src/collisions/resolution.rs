//! Absorption resolution for registered collision pairs.

use crate::body::{Body, BodyId};
use crate::collisions::CollisionPair;

/// Resolves each pair by mass-driven absorption.
///
/// The strictly heavier body absorbs the lighter one; on an exact mass tie
/// the pair's first-encountered body wins. A body already destroyed earlier
/// in the same drain (absorbed by a previous pair, or removed for leaving
/// the world) is skipped, so nothing is absorbed twice.
///
/// Destroyed bodies are only marked here; the simulation sweeps them from
/// the live set at the end of the tick.
///
/// # Examples
///
/// ```
/// use nalgebra::Point2;
/// use orrery::body::{Body, BodyId};
/// use orrery::collisions::{resolve_collisions, CollisionPair};
///
/// let mut bodies = vec![
///     Body::new(BodyId(1), "Pallas", Point2::new(10.0, 10.0), 0.0, 0.0, 10.0, 0.01),
///     Body::new(BodyId(2), "Juno", Point2::new(10.5, 10.0), 0.0, 0.0, 3.0, 0.01),
/// ];
/// resolve_collisions(&mut bodies, &[CollisionPair { first: BodyId(1), second: BodyId(2) }]);
///
/// assert!((bodies[0].mass() - 13.0).abs() < 1e-12);
/// assert!(bodies[1].is_destroyed());
/// ```
pub fn resolve_collisions(bodies: &mut [Body], pairs: &[CollisionPair]) {
    for pair in pairs {
        let Some(first) = index_of(bodies, pair.first) else {
            continue;
        };
        let Some(second) = index_of(bodies, pair.second) else {
            continue;
        };
        if first == second {
            continue;
        }

        let (a, b) = two_mut(bodies, first, second);
        if a.is_destroyed() || b.is_destroyed() {
            continue;
        }

        if b.mass() > a.mass() {
            b.absorb(a);
        } else {
            a.absorb(b);
        }
    }
}

fn index_of(bodies: &[Body], id: BodyId) -> Option<usize> {
    bodies.iter().position(|body| body.id == id)
}

/// Disjoint mutable references to two bodies of the slice (`i != j`).
fn two_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        let (a, b) = (&mut right[0], &mut left[j]);
        (a, b)
    }
}
