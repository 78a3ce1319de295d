use crate::body::BodyId;
use crate::collisions::registry::{CollisionPair, CollisionRegistry};

#[test]
fn test_notify_records_pairs_in_order() {
    let mut registry = CollisionRegistry::new();
    registry.notify(BodyId(1), BodyId(2));
    registry.notify(BodyId(3), BodyId(4));

    assert_eq!(
        registry.pairs(),
        &[
            CollisionPair {
                first: BodyId(1),
                second: BodyId(2),
            },
            CollisionPair {
                first: BodyId(3),
                second: BodyId(4),
            },
        ]
    );
}

#[test]
fn test_notify_keeps_first_pair_per_resident() {
    let mut registry = CollisionRegistry::new();
    registry.notify(BodyId(1), BodyId(2));
    registry.notify(BodyId(1), BodyId(3));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.pairs()[0].second, BodyId(2));
}

#[test]
fn test_same_body_may_appear_as_second() {
    // Only the resident side is keyed; a body can be the incoming side of
    // several pairs in one pass.
    let mut registry = CollisionRegistry::new();
    registry.notify(BodyId(1), BodyId(9));
    registry.notify(BodyId(2), BodyId(9));

    assert_eq!(registry.len(), 2);
}

#[test]
fn test_drain_empties_the_registry() {
    let mut registry = CollisionRegistry::new();
    registry.notify(BodyId(1), BodyId(2));

    let pairs = registry.drain();
    assert_eq!(pairs.len(), 1);
    assert!(registry.is_empty());

    // A fresh pass starts from scratch, including the keyed resident
    registry.notify(BodyId(1), BodyId(5));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.pairs()[0].second, BodyId(5));
}

#[test]
fn test_clear() {
    let mut registry = CollisionRegistry::new();
    registry.notify(BodyId(1), BodyId(2));
    registry.clear();

    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}
