//! Per-tick set of unresolved close-proximity body pairs.

use crate::body::BodyId;

/// Two bodies that landed in the same indivisible quadrant.
///
/// `first` is the body that was already resident in the quadrant; `second`
/// is the one whose insertion triggered the report. The ordering matters
/// for the equal-mass resolution policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub first: BodyId,
    pub second: BodyId,
}

/// Collects collision pairs raised during one tree build.
///
/// Owned by a single simulation tick: created fresh before the tree is
/// built, drained after forces and integration, never shared across ticks.
/// Pairing is first-come: once a body is registered as the `first` of a
/// pair, later reports keyed by the same body are ignored, so drain order
/// is the deterministic registration order.
///
/// # Examples
///
/// ```
/// use orrery::body::BodyId;
/// use orrery::collisions::CollisionRegistry;
///
/// let mut registry = CollisionRegistry::new();
/// registry.notify(BodyId(1), BodyId(2));
/// registry.notify(BodyId(1), BodyId(3)); // ignored: 1 is already paired
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct CollisionRegistry {
    pairs: Vec<CollisionPair>,
}

impl CollisionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collision between the quadrant's resident body and the
    /// incoming one.
    pub fn notify(&mut self, first: BodyId, second: BodyId) {
        if self.pairs.iter().any(|pair| pair.first == first) {
            log::debug!("body {first:?} already has a pending collision partner");
            return;
        }
        self.pairs.push(CollisionPair { first, second });
    }

    pub fn pairs(&self) -> &[CollisionPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Takes all registered pairs, leaving the registry empty.
    pub fn drain(&mut self) -> Vec<CollisionPair> {
        std::mem::take(&mut self.pairs)
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}
