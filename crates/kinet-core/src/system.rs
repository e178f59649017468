//! The particle assembly an integrator runs over.

use crate::error::SimError;
use crate::id::ParticleId;
use crate::particles::ParticleSet;
use crate::property::PropertyStore;
use crate::vec3::Vec3;

/// One particle set together with the position, velocity and force stores
/// every integrator depends on.
///
/// Owned by whoever assembles the simulation. Integrators borrow it for a
/// single `run` call and never keep a reference past it. All particles
/// have unit mass.
///
/// # Examples
///
/// ```
/// use kinet_core::{ParticleSystem, Vec3};
///
/// let mut system = ParticleSystem::new();
/// let p = system.add_particle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
/// assert_eq!(system.len(), 1);
/// assert_eq!(system.velocity.get(p).unwrap(), Vec3::new(1.0, 0.0, 0.0));
/// assert_eq!(system.force.get(p).unwrap(), Vec3::ZERO);
/// system.validate().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    /// Particles local to this execution context.
    pub particles: ParticleSet,
    /// Absolute positions.
    pub position: PropertyStore<Vec3>,
    /// Velocities.
    pub velocity: PropertyStore<Vec3>,
    /// Forces, written by the force collaborator before they are read.
    pub force: PropertyStore<Vec3>,
    next_id: u64,
}

impl ParticleSystem {
    /// Create an empty system.
    pub fn new() -> Self {
        Self {
            particles: ParticleSet::new(),
            position: PropertyStore::new("position"),
            velocity: PropertyStore::new("velocity"),
            force: PropertyStore::new("force"),
            next_id: 0,
        }
    }

    /// Add a particle with the given state and zero force.
    ///
    /// Returns a fresh identity that this system has never handed out before.
    pub fn add_particle(&mut self, position: Vec3, velocity: Vec3) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        self.particles.insert(id);
        self.position.insert(id, position);
        self.velocity.insert(id, velocity);
        self.force.insert(id, Vec3::ZERO);
        id
    }

    /// Remove a particle and all of its property entries.
    ///
    /// Returns `false` if the particle was not a member.
    pub fn remove_particle(&mut self, particle: ParticleId) -> bool {
        let present = self.particles.remove(particle);
        self.position.remove(particle);
        self.velocity.remove(particle);
        self.force.remove(particle);
        present
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the system holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Check that position, velocity and force each cover every particle.
    ///
    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] for the first missing entry.
    pub fn validate(&self) -> Result<(), SimError> {
        self.position.covers(&self.particles)?;
        self.velocity.covers(&self.particles)?;
        self.force.covers(&self.particles)
    }

    /// Total kinetic energy `sum(v·v) / 2` (unit mass).
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self
            .velocity
            .view(&self.particles)
            .iter()
            .map(|(_, v)| v.norm_squared())
            .sum::<f64>()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut system = ParticleSystem::new();
        let a = system.add_particle(Vec3::ZERO, Vec3::ZERO);
        assert!(system.remove_particle(a));
        let b = system.add_particle(Vec3::ZERO, Vec3::ZERO);
        assert_ne!(a, b);
        assert!(!system.remove_particle(a));
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn validate_detects_missing_entry() {
        let mut system = ParticleSystem::new();
        let p = system.add_particle(Vec3::ZERO, Vec3::ZERO);
        system.velocity.remove(p);
        assert!(matches!(
            system.validate(),
            Err(SimError::UnknownParticle { particle, .. }) if particle == p
        ));
    }

    #[test]
    fn kinetic_energy_unit_mass() {
        let mut system = ParticleSystem::new();
        system.add_particle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        system.add_particle(Vec3::ZERO, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(system.kinetic_energy(), 2.5);
        assert_eq!(ParticleSystem::default().kinetic_energy(), 0.0);
    }
}
