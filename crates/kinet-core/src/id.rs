//! Strongly-typed identifiers for particles and event subscribers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one particle within a particle system.
///
/// Opaque and stable: it carries no data and is independent of where the
/// particle's properties are stored. A [`ParticleSystem`](crate::ParticleSystem)
/// never hands out the same id twice, so ids are not reused while the
/// particle is alive (or afterwards).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u64);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticleId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Counter for unique [`SubscriberId`] allocation.
static SUBSCRIBER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of an object that subscribes handlers to integrator events.
///
/// Allocated from a monotonic atomic counter via [`SubscriberId::next`].
/// Every handler registered on an integrator is tagged with the id of its
/// owner so the owner can later remove all of its handlers at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Allocate a fresh, unique subscriber ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(SUBSCRIBER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_ids_are_unique() {
        let a = SubscriberId::next();
        let b = SubscriberId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn particle_id_display() {
        assert_eq!(ParticleId(17).to_string(), "17");
        assert_eq!(ParticleId::from(3), ParticleId(3));
    }
}
