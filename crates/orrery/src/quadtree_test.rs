use approx::assert_relative_eq;
use nalgebra::Point2;

use crate::body::{Body, BodyId};
use crate::collisions::CollisionRegistry;
use crate::config::SimulationConfig;
use crate::quadtree::{InsertError, Inserted, QuadTree};

fn body_at(id: u32, x: f64, y: f64, mass: f64) -> Body {
    Body::new(BodyId(id), "test", Point2::new(x, y), 0.0, 0.0, mass, 0.01)
}

fn small_world() -> SimulationConfig {
    SimulationConfig {
        world_width: 100.0,
        world_height: 100.0,
        min_quad_size: 1.0,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_empty_tree() {
    let config = small_world();
    let tree = QuadTree::empty(&config);

    assert_relative_eq!(tree.root_mass(), 0.0);
    assert_relative_eq!(tree.total_mass(), 0.0);
    assert!(tree.root_centroid().is_none());

    // Traversal over an empty tree leaves the body untouched
    let mut body = body_at(1, 50.0, 50.0, 200.0);
    tree.update_gravity(&mut body);
    assert_relative_eq!(body.velocity.magnitude(), 0.0);
}

#[test]
fn test_single_body_leaf_is_exact() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let body = body_at(1, 30.0, 40.0, 200.0);

    let mut tree = QuadTree::empty(&config);
    assert_eq!(tree.insert(&body, &mut registry), Ok(Inserted::Stored));

    // Leaf aggregates equal the body's own mass and position, exactly
    assert_eq!(tree.root_mass(), 200.0);
    assert_eq!(tree.root_centroid(), Some(Point2::new(30.0, 40.0)));
    assert!(registry.is_empty());
}

#[test]
fn test_aggregate_mass_matches_leaf_sum() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![
        body_at(1, 10.0, 10.0, 100.0),
        body_at(2, 90.0, 10.0, 250.0),
        body_at(3, 10.0, 90.0, 50.0),
        body_at(4, 75.0, 80.0, 300.0),
        body_at(5, 60.0, 60.0, 25.0),
    ];

    let tree = QuadTree::build(&bodies, &config, &mut registry);

    assert_relative_eq!(tree.root_mass(), 725.0, epsilon = 1e-9);
    assert_relative_eq!(tree.total_mass(), tree.root_mass(), epsilon = 1e-9);
}

#[test]
fn test_gravity_pass_does_not_mutate_aggregates() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![
        body_at(1, 10.0, 10.0, 100.0),
        body_at(2, 90.0, 10.0, 250.0),
        body_at(3, 10.0, 90.0, 50.0),
    ];

    let tree = QuadTree::build(&bodies, &config, &mut registry);
    let mass_before = tree.root_mass();

    let mut query = body_at(4, 50.0, 50.0, 10.0);
    tree.update_gravity(&mut query);

    assert_relative_eq!(tree.root_mass(), mass_before);
    assert_relative_eq!(tree.total_mass(), mass_before, epsilon = 1e-9);
}

#[test]
fn test_coincident_insertion_fails() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let first = body_at(1, 25.0, 25.0, 100.0);
    let second = body_at(2, 25.0, 25.0, 300.0);

    let mut tree = QuadTree::empty(&config);
    assert_eq!(tree.insert(&first, &mut registry), Ok(Inserted::Stored));
    assert_eq!(
        tree.insert(&second, &mut registry),
        Err(InsertError::Coincident { x: 25.0, y: 25.0 })
    );

    // The second body is dropped: no collision, only the first body's mass
    assert!(registry.is_empty());
    assert_relative_eq!(tree.total_mass(), 100.0);
}

#[test]
fn test_indivisible_quadrant_raises_one_collision() {
    // Root can never subdivide, so the second body becomes a collision
    let config = SimulationConfig {
        world_width: 100.0,
        world_height: 100.0,
        min_quad_size: 200.0,
        ..SimulationConfig::default()
    };
    let mut registry = CollisionRegistry::new();
    let first = body_at(1, 25.0, 25.0, 100.0);
    let second = body_at(2, 75.0, 75.0, 300.0);

    let mut tree = QuadTree::empty(&config);
    assert_eq!(tree.insert(&first, &mut registry), Ok(Inserted::Stored));
    assert_eq!(tree.insert(&second, &mut registry), Ok(Inserted::Collision));

    assert_eq!(registry.len(), 1);
    let pair = registry.pairs()[0];
    assert_eq!(pair.first, BodyId(1));
    assert_eq!(pair.second, BodyId(2));

    // The colliding body was not stored
    assert_relative_eq!(tree.total_mass(), 100.0);

    // A third body raises no additional pair for the same resident
    let third = body_at(3, 10.0, 90.0, 50.0);
    assert_eq!(tree.insert(&third, &mut registry), Ok(Inserted::Collision));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_close_bodies_collide_at_minimum_size() {
    // Distinct coordinates within the same pixel: subdivision bottoms out at
    // the minimum quadrant size instead of recursing forever
    let config = SimulationConfig::default();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![
        body_at(1, 400.0, 300.0, 100.0),
        body_at(2, 400.3, 300.2, 50.0),
    ];

    let tree = QuadTree::build(&bodies, &config, &mut registry);

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.pairs()[0].first, BodyId(1));
    assert_eq!(registry.pairs()[0].second, BodyId(2));
    assert_relative_eq!(tree.total_mass(), 100.0);
}

#[test]
fn test_out_of_bounds_insertion_rejected() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![body_at(1, 10.0, 10.0, 100.0), body_at(2, 90.0, 90.0, 50.0)];

    let mut tree = QuadTree::build(&bodies, &config, &mut registry);
    let mass_before = tree.root_mass();

    let stray = body_at(3, -5.0, 120.0, 500.0);
    assert_eq!(
        tree.insert(&stray, &mut registry),
        Err(InsertError::OutOfBounds)
    );
    assert_relative_eq!(tree.root_mass(), mass_before);
}

#[test]
fn test_stray_body_never_becomes_the_root_leaf() {
    // A stray stored as the root leaf would poison the first split: its
    // re-insertion fails and rejects the valid incoming body with it.
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let stray = body_at(1, 250.0, 50.0, 500.0);
    let valid = body_at(2, 10.0, 10.0, 100.0);

    let mut tree = QuadTree::empty(&config);
    assert_eq!(
        tree.insert(&stray, &mut registry),
        Err(InsertError::OutOfBounds)
    );
    assert_eq!(tree.insert(&valid, &mut registry), Ok(Inserted::Stored));

    assert_relative_eq!(tree.root_mass(), 100.0);
    assert_relative_eq!(tree.total_mass(), 100.0);
    assert_eq!(tree.root_centroid(), Some(Point2::new(10.0, 10.0)));
}

#[test]
fn test_body_on_split_line_routes_consistently() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    // (50, 50) sits exactly on both split lines of the root
    let bodies = vec![body_at(1, 50.0, 50.0, 100.0), body_at(2, 10.0, 10.0, 50.0)];

    let tree = QuadTree::build(&bodies, &config, &mut registry);

    // Neither dropped nor double-counted
    assert_relative_eq!(tree.root_mass(), 150.0);
    assert_relative_eq!(tree.total_mass(), 150.0);
    assert!(registry.is_empty());
}

#[test]
fn test_gravity_pulls_toward_mass() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let attractor = body_at(1, 10.0, 50.0, 500.0);
    let tree = QuadTree::build([&attractor], &config, &mut registry);

    let mut query = body_at(2, 90.0, 50.0, 10.0);
    tree.update_gravity(&mut query);

    // Attractor is due west at distance 80
    let expected = config.gravity_constant * 500.0 / (80.0 * 80.0);
    assert_relative_eq!(query.velocity.x, -expected, epsilon = 1e-12);
    assert_relative_eq!(query.velocity.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_gravity_skips_query_body_itself() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let mut body = body_at(1, 40.0, 40.0, 500.0);
    let tree = QuadTree::build([&body.clone()], &config, &mut registry);

    tree.update_gravity(&mut body);
    assert_relative_eq!(body.velocity.magnitude(), 0.0);
}

#[test]
fn test_always_approximate_stays_finite() {
    // theta = infinity accepts the aggregate at every internal node
    let config = SimulationConfig {
        theta: f64::INFINITY,
        ..small_world()
    };
    let mut registry = CollisionRegistry::new();
    let bodies = vec![
        body_at(1, 10.0, 10.0, 100.0),
        body_at(2, 90.0, 10.0, 250.0),
        body_at(3, 10.0, 90.0, 50.0),
        body_at(4, 90.0, 90.0, 300.0),
    ];
    let tree = QuadTree::build(&bodies, &config, &mut registry);

    let mut query = body_at(5, 55.0, 45.0, 10.0);
    tree.update_gravity(&mut query);

    assert!(query.velocity.x.is_finite());
    assert!(query.velocity.y.is_finite());
    assert!(query.velocity.magnitude() > 0.0);
}

#[test]
fn test_trace_records_applied_impulses() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![body_at(1, 10.0, 10.0, 100.0), body_at(2, 90.0, 90.0, 250.0)];
    let tree = QuadTree::build(&bodies, &config, &mut registry);

    let mut query = body_at(3, 50.0, 20.0, 10.0);
    let mut trace = crate::quadtree::GravityTrace::new();
    tree.update_gravity_traced(&mut query, &mut trace);

    assert!(!trace.samples().is_empty());
    for sample in trace.samples() {
        assert_eq!(sample.target, BodyId(3));
        assert!(sample.magnitude.is_finite());
        assert!(sample.magnitude > 0.0);
    }

    trace.clear();
    assert!(trace.samples().is_empty());
}

#[test]
fn test_visit_regions_walks_subdivided_tree() {
    let config = small_world();
    let mut registry = CollisionRegistry::new();
    let bodies = vec![body_at(1, 10.0, 10.0, 100.0), body_at(2, 90.0, 90.0, 250.0)];
    let tree = QuadTree::build(&bodies, &config, &mut registry);

    let mut nodes = 0;
    let mut massive_nodes = 0;
    tree.visit_regions(|_, mass| {
        nodes += 1;
        if mass > 0.0 {
            massive_nodes += 1;
        }
    });

    // Root plus at least one level of four children
    assert!(nodes >= 5);
    // Root and the two occupied leaves carry mass
    assert!(massive_nodes >= 3);
}
