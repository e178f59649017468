//! Identity-keyed per-particle property storage.
//!
//! A [`PropertyStore<T>`] attaches one value of type `T` to each particle
//! without exposing how values are laid out. Algorithms reach values either
//! through the store's checked `get`/`set`, or through a short-lived
//! [`PropertyHandle`] / [`PropertyView`] bound to one [`ParticleSet`] for
//! the duration of a traversal.
//!
//! Handles borrow both the store and the set, so a set cannot be
//! repopulated (and a store cannot be restructured) while a handle is live.

use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::error::SimError;
use crate::id::ParticleId;
use crate::particles::ParticleSet;

/// A named mapping from particle identity to a value of type `T`.
///
/// Backed by a dense insertion-ordered hash map: O(1) lookup by identity,
/// contiguous iteration.
#[derive(Clone, Debug)]
pub struct PropertyStore<T> {
    name: String,
    values: IndexMap<ParticleId, T>,
}

impl<T> PropertyStore<T> {
    /// Create an empty store. `name` appears in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    /// The store's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of particles with an entry.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `particle` has an entry.
    pub fn contains(&self, particle: ParticleId) -> bool {
        self.values.contains_key(&particle)
    }

    /// Create or replace the entry for `particle`, returning the old value.
    pub fn insert(&mut self, particle: ParticleId, value: T) -> Option<T> {
        self.values.insert(particle, value)
    }

    /// Remove the entry for `particle`.
    pub fn remove(&mut self, particle: ParticleId) -> Option<T> {
        self.values.swap_remove(&particle)
    }

    /// Overwrite an existing entry.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] if `particle` has no entry. The store
    /// is left unchanged.
    pub fn set(&mut self, particle: ParticleId, value: T) -> Result<(), SimError> {
        match self.values.get_mut(&particle) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(self.unknown(particle)),
        }
    }

    /// Iterate over `(particle, value)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &T)> + '_ {
        self.values.iter().map(|(&id, v)| (id, v))
    }

    /// Check that every member of `set` has an entry.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] naming the first member without one.
    pub fn covers(&self, set: &ParticleSet) -> Result<(), SimError> {
        match set.iter().find(|id| !self.values.contains_key(id)) {
            Some(missing) => Err(self.unknown(missing)),
            None => Ok(()),
        }
    }

    /// Bind a read/write handle to `set`.
    ///
    /// Every member of `set` must have an entry (see [`covers`](Self::covers));
    /// indexing a member without one panics.
    pub fn bind<'a>(&'a mut self, set: &'a ParticleSet) -> PropertyHandle<'a, T> {
        PropertyHandle { store: self, set }
    }

    /// Bind a read-only view to `set`.
    pub fn view<'a>(&'a self, set: &'a ParticleSet) -> PropertyView<'a, T> {
        PropertyView { store: self, set }
    }

    fn unknown(&self, particle: ParticleId) -> SimError {
        SimError::UnknownParticle {
            particle,
            property: self.name.clone(),
        }
    }
}

impl<T: Clone> PropertyStore<T> {
    /// Read the value for `particle`.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] if `particle` has no entry.
    pub fn get(&self, particle: ParticleId) -> Result<T, SimError> {
        self.values
            .get(&particle)
            .cloned()
            .ok_or_else(|| self.unknown(particle))
    }

    /// Insert or overwrite `value` for every member of `set`.
    pub fn fill(&mut self, set: &ParticleSet, value: T) {
        for id in set {
            self.values.insert(id, value.clone());
        }
    }
}

/// Short-lived read/write accessor pairing a [`PropertyStore`] with a
/// [`ParticleSet`].
///
/// Obtained from [`PropertyStore::bind`]. Cheap to create; no allocation.
pub struct PropertyHandle<'a, T> {
    store: &'a mut PropertyStore<T>,
    set: &'a ParticleSet,
}

impl<T> PropertyHandle<'_, T> {
    /// The set this handle was bound to.
    pub fn particles(&self) -> &ParticleSet {
        self.set
    }

    /// Name of the underlying store.
    pub fn name(&self) -> &str {
        &self.store.name
    }

    /// Shared access to the value of `particle`, if present.
    pub fn get(&self, particle: ParticleId) -> Option<&T> {
        self.store.values.get(&particle)
    }

    /// Mutable access to the value of `particle`, if present.
    pub fn get_mut(&mut self, particle: ParticleId) -> Option<&mut T> {
        self.store.values.get_mut(&particle)
    }
}

impl<T> Index<ParticleId> for PropertyHandle<'_, T> {
    type Output = T;

    fn index(&self, particle: ParticleId) -> &T {
        match self.store.values.get(&particle) {
            Some(v) => v,
            None => panic!(
                "particle {particle} has no entry in property '{}'",
                self.store.name
            ),
        }
    }
}

impl<T> IndexMut<ParticleId> for PropertyHandle<'_, T> {
    fn index_mut(&mut self, particle: ParticleId) -> &mut T {
        let name = &self.store.name;
        match self.store.values.get_mut(&particle) {
            Some(v) => v,
            None => panic!("particle {particle} has no entry in property '{name}'"),
        }
    }
}

/// Short-lived read-only accessor pairing a [`PropertyStore`] with a
/// [`ParticleSet`].
///
/// Obtained from [`PropertyStore::view`].
pub struct PropertyView<'a, T> {
    store: &'a PropertyStore<T>,
    set: &'a ParticleSet,
}

impl<T> Clone for PropertyView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PropertyView<'_, T> {}

impl<'a, T> PropertyView<'a, T> {
    /// The set this view was bound to.
    pub fn particles(&self) -> &'a ParticleSet {
        self.set
    }

    /// The value of `particle`, if present.
    pub fn get(&self, particle: ParticleId) -> Option<&'a T> {
        self.store.values.get(&particle)
    }

    /// Iterate over `(particle, value)` for the bound set's members.
    ///
    /// Members without an entry are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (ParticleId, &'a T)> + 'a {
        let values = &self.store.values;
        self.set
            .iter()
            .filter_map(move |id| values.get(&id).map(|v| (id, v)))
    }
}

impl<T> Index<ParticleId> for PropertyView<'_, T> {
    type Output = T;

    fn index(&self, particle: ParticleId) -> &T {
        match self.store.values.get(&particle) {
            Some(v) => v,
            None => panic!(
                "particle {particle} has no entry in property '{}'",
                self.store.name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3::Vec3;

    fn set_of(n: u64) -> ParticleSet {
        (0..n).map(ParticleId).collect()
    }

    #[test]
    fn get_set_round_trip() {
        let mut store = PropertyStore::new("velocity");
        store.insert(ParticleId(1), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(store.get(ParticleId(1)).unwrap(), Vec3::new(1.0, 0.0, 0.0));

        store.set(ParticleId(1), Vec3::splat(2.0)).unwrap();
        assert_eq!(store.get(ParticleId(1)).unwrap(), Vec3::splat(2.0));
    }

    #[test]
    fn unknown_particle_on_get_and_set() {
        let mut store: PropertyStore<f64> = PropertyStore::new("mass");
        let err = store.get(ParticleId(4)).unwrap_err();
        assert_eq!(
            err,
            SimError::UnknownParticle {
                particle: ParticleId(4),
                property: "mass".into()
            }
        );

        assert!(store.set(ParticleId(4), 1.0).is_err());
        assert!(store.is_empty(), "failed set must not create an entry");
    }

    #[test]
    fn covers_reports_first_missing() {
        let set = set_of(3);
        let mut store = PropertyStore::new("force");
        store.fill(&set, Vec3::ZERO);
        assert!(store.covers(&set).is_ok());

        store.remove(ParticleId(1));
        match store.covers(&set) {
            Err(SimError::UnknownParticle { particle, property }) => {
                assert_eq!(particle, ParticleId(1));
                assert_eq!(property, "force");
            }
            other => panic!("expected UnknownParticle, got {other:?}"),
        }
    }

    #[test]
    fn handle_reads_and_writes_by_identity() {
        let set = set_of(4);
        let mut store = PropertyStore::new("position");
        store.fill(&set, Vec3::ZERO);

        {
            let mut h = store.bind(&set);
            assert_eq!(h.particles().len(), 4);
            for id in &set {
                h[id] += Vec3::new(id.0 as f64, 0.0, 0.0);
            }
            assert!(h.get(ParticleId(99)).is_none());
            assert!(h.get_mut(ParticleId(2)).is_some());
        }

        assert_eq!(store.get(ParticleId(3)).unwrap(), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "has no entry in property 'position'")]
    fn handle_index_missing_panics() {
        let set = set_of(1);
        let mut store: PropertyStore<Vec3> = PropertyStore::new("position");
        let h = store.bind(&set);
        let _ = h[ParticleId(0)];
    }

    #[test]
    fn view_iterates_bound_members_only() {
        let set = set_of(2);
        let mut store = PropertyStore::new("charge");
        store.fill(&set, 1.0);
        store.insert(ParticleId(50), -1.0);

        let view = store.view(&set);
        let total: f64 = view.iter().map(|(_, &q)| q).sum();
        assert_eq!(total, 2.0);
        assert_eq!(view[ParticleId(1)], 1.0);
        assert_eq!(view.particles().len(), 2);
    }
}
