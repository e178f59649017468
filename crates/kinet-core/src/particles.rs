//! Particle sets and the single-method visitor protocol.
//!
//! A [`ParticleSet`] is the collection of particle identities local to one
//! execution context. It is populated by whatever owns the particles and is
//! read-only while an integrator runs over it. Per-particle work is applied
//! with [`ParticleSet::for_each`] and a [`ParticleVisitor`].

use indexmap::IndexSet;

use crate::id::ParticleId;

/// Per-particle operation applied across a [`ParticleSet`].
///
/// # Contract
///
/// - [`prepare`](ParticleVisitor::prepare) runs exactly once before the
///   first [`visit`](ParticleVisitor::visit) of a traversal.
/// - `visit` returns `true` to continue and `false` to abort the traversal.
/// - Traversal order is not part of the contract. It is stable for the
///   duration of one call, nothing more.
///
/// Any `FnMut(ParticleId) -> bool` closure is a visitor:
///
/// ```
/// use kinet_core::{ParticleId, ParticleSet};
///
/// let set: ParticleSet = [ParticleId(1), ParticleId(2), ParticleId(3)].into_iter().collect();
/// let mut seen = Vec::new();
/// let completed = set.for_each(&mut |id: ParticleId| {
///     seen.push(id);
///     id != ParticleId(2)
/// });
/// assert!(!completed);
/// assert_eq!(seen.len(), 2);
/// ```
pub trait ParticleVisitor {
    /// Called once before traversal begins.
    ///
    /// Default: no-op.
    fn prepare(&mut self, _set: &ParticleSet) {}

    /// Visit one particle. Return `false` to stop the traversal early.
    fn visit(&mut self, particle: ParticleId) -> bool;
}

impl<F> ParticleVisitor for F
where
    F: FnMut(ParticleId) -> bool,
{
    fn visit(&mut self, particle: ParticleId) -> bool {
        self(particle)
    }
}

/// An insertion-ordered collection of particle identities.
///
/// Mutation (`insert`, `remove`, `repopulate`, `clear`) belongs to the
/// ownership collaborator. Integrators and thermostats only ever see a
/// shared borrow, so the set cannot change underneath a traversal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParticleSet {
    ids: IndexSet<ParticleId>,
}

impl ParticleSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle. Returns `false` if it was already present.
    pub fn insert(&mut self, particle: ParticleId) -> bool {
        self.ids.insert(particle)
    }

    /// Remove a particle. Returns `false` if it was not present.
    ///
    /// O(1); the last particle takes the removed particle's position in
    /// the traversal order.
    pub fn remove(&mut self, particle: ParticleId) -> bool {
        self.ids.swap_remove(&particle)
    }

    /// Replace the whole membership with `particles`.
    pub fn repopulate(&mut self, particles: impl IntoIterator<Item = ParticleId>) {
        self.ids.clear();
        self.ids.extend(particles);
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether `particle` is a member.
    pub fn contains(&self, particle: ParticleId) -> bool {
        self.ids.contains(&particle)
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the members in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = ParticleId> + '_ {
        self.ids.iter().copied()
    }

    /// Apply `visitor` to every particle.
    ///
    /// Calls [`ParticleVisitor::prepare`] once, then
    /// [`ParticleVisitor::visit`] per particle until the set is exhausted
    /// or the visitor returns `false`. Returns `true` iff the traversal
    /// ran to completion.
    pub fn for_each(&self, visitor: &mut dyn ParticleVisitor) -> bool {
        visitor.prepare(self);
        for &id in &self.ids {
            if !visitor.visit(id) {
                return false;
            }
        }
        true
    }

    /// Aggregate predicate: `true` iff `pred` holds for every particle.
    ///
    /// Stops at the first particle that fails.
    pub fn all(&self, mut pred: impl FnMut(ParticleId) -> bool) -> bool {
        self.for_each(&mut |id: ParticleId| pred(id))
    }
}

impl FromIterator<ParticleId> for ParticleSet {
    fn from_iter<I: IntoIterator<Item = ParticleId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = ParticleId;
    type IntoIter = std::iter::Copied<indexmap::set::Iter<'a, ParticleId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(n: u64) -> ParticleSet {
        (0..n).map(ParticleId).collect()
    }

    struct Counting {
        prepared: usize,
        visited: Vec<ParticleId>,
    }

    impl ParticleVisitor for Counting {
        fn prepare(&mut self, set: &ParticleSet) {
            self.prepared += 1;
            self.visited.reserve(set.len());
        }

        fn visit(&mut self, particle: ParticleId) -> bool {
            self.visited.push(particle);
            true
        }
    }

    #[test]
    fn for_each_visits_every_particle_once() {
        let set = set_of(5);
        let mut v = Counting {
            prepared: 0,
            visited: Vec::new(),
        };
        assert!(set.for_each(&mut v));
        assert_eq!(v.prepared, 1);
        assert_eq!(v.visited, (0..5).map(ParticleId).collect::<Vec<_>>());
    }

    #[test]
    fn prepare_runs_even_for_empty_set() {
        let set = ParticleSet::new();
        let mut v = Counting {
            prepared: 0,
            visited: Vec::new(),
        };
        assert!(set.for_each(&mut v));
        assert_eq!(v.prepared, 1);
        assert!(v.visited.is_empty());
    }

    #[test]
    fn early_abort_stops_traversal() {
        let set = set_of(10);
        let mut count = 0;
        let completed = set.for_each(&mut |_id: ParticleId| {
            count += 1;
            count < 3
        });
        assert!(!completed);
        assert_eq!(count, 3);
    }

    #[test]
    fn all_predicate() {
        let set = set_of(4);
        assert!(set.all(|id| id.0 < 4));
        assert!(!set.all(|id| id.0 != 2));
        assert!(ParticleSet::new().all(|_| false));
    }

    #[test]
    fn insert_remove_repopulate() {
        let mut set = set_of(3);
        assert!(!set.insert(ParticleId(1)));
        assert!(set.insert(ParticleId(7)));
        assert_eq!(set.len(), 4);

        assert!(set.remove(ParticleId(0)));
        assert!(!set.remove(ParticleId(0)));
        assert!(!set.contains(ParticleId(0)));
        assert_eq!(set.len(), 3);

        set.repopulate([ParticleId(40), ParticleId(41)]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![ParticleId(40), ParticleId(41)]);

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn traversal_order_is_stable_across_calls() {
        let set: ParticleSet = [5, 3, 9, 1].into_iter().map(ParticleId).collect();
        let first: Vec<_> = set.iter().collect();
        let second: Vec<_> = (&set).into_iter().collect();
        assert_eq!(first, second);
    }
}
