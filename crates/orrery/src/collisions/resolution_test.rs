use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::body::{Body, BodyId};
use crate::collisions::registry::CollisionPair;
use crate::collisions::resolution::resolve_collisions;

fn body_with_mass(id: u32, mass: f64) -> Body {
    Body::new(
        BodyId(id),
        "test",
        Point2::new(id as f64, 0.0),
        0.0,
        0.0,
        mass,
        0.01,
    )
}

fn pair(first: u32, second: u32) -> CollisionPair {
    CollisionPair {
        first: BodyId(first),
        second: BodyId(second),
    }
}

#[test]
fn test_heavier_first_body_absorbs() {
    let mut bodies = vec![body_with_mass(1, 10.0), body_with_mass(2, 3.0)];
    resolve_collisions(&mut bodies, &[pair(1, 2)]);

    assert_relative_eq!(bodies[0].mass(), 13.0);
    assert!(!bodies[0].is_destroyed());
    assert!(bodies[1].is_destroyed());
}

#[test]
fn test_heavier_second_body_absorbs() {
    let mut bodies = vec![body_with_mass(1, 3.0), body_with_mass(2, 10.0)];
    resolve_collisions(&mut bodies, &[pair(1, 2)]);

    assert!(bodies[0].is_destroyed());
    assert_relative_eq!(bodies[1].mass(), 13.0);
}

#[test]
fn test_equal_masses_favor_the_first() {
    let mut bodies = vec![body_with_mass(1, 5.0), body_with_mass(2, 5.0)];
    resolve_collisions(&mut bodies, &[pair(1, 2)]);

    assert_relative_eq!(bodies[0].mass(), 10.0);
    assert!(bodies[1].is_destroyed());
}

#[test]
fn test_destroyed_bodies_are_not_absorbed_twice() {
    // B loses to A in the first pair, so the second pair is a no-op
    let mut bodies = vec![
        body_with_mass(1, 10.0),
        body_with_mass(2, 3.0),
        body_with_mass(3, 100.0),
    ];
    resolve_collisions(&mut bodies, &[pair(1, 2), pair(2, 3)]);

    assert_relative_eq!(bodies[0].mass(), 13.0);
    assert!(bodies[1].is_destroyed());
    assert_relative_eq!(bodies[2].mass(), 100.0);
}

#[test]
fn test_chained_absorption_accumulates() {
    let mut bodies = vec![
        body_with_mass(1, 10.0),
        body_with_mass(2, 3.0),
        body_with_mass(3, 100.0),
    ];
    resolve_collisions(&mut bodies, &[pair(1, 2), pair(1, 3)]);

    // A takes B, then the heavier C takes the combined A
    assert!(bodies[0].is_destroyed());
    assert!(bodies[1].is_destroyed());
    assert_relative_eq!(bodies[2].mass(), 113.0);
}

#[test]
fn test_unknown_ids_are_skipped() {
    let mut bodies = vec![body_with_mass(1, 10.0)];
    resolve_collisions(&mut bodies, &[pair(1, 42), pair(42, 1), pair(1, 1)]);

    assert_relative_eq!(bodies[0].mass(), 10.0);
    assert!(!bodies[0].is_destroyed());
}
