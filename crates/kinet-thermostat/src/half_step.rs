//! Per-particle velocity half-steps of the Langevin thermostat, expressed
//! as [`ParticleVisitor`]s over a bound velocity handle (unit masses).
//!
//! Usage: bind the velocity store, traverse the set with
//! [`ParticleSet::for_each`], then call `finish()` to surface a missing
//! velocity entry as an error.

use kinet_core::{ParticleId, ParticleSet, ParticleVisitor, PropertyHandle, SimError, Vec3};
use rand_chacha::ChaCha8Rng;

use crate::noise::NoiseModel;

fn unknown(particle: ParticleId, handle: &PropertyHandle<'_, Vec3>) -> SimError {
    SimError::UnknownParticle {
        particle,
        property: handle.name().to_string(),
    }
}

/// Damping half-step `v ← v - ½ γ v dt`.
pub struct DampingHalfStep<'a> {
    velocity: PropertyHandle<'a, Vec3>,
    factor: f64,
    missing: Option<ParticleId>,
}

impl<'a> DampingHalfStep<'a> {
    /// Damp the velocities reachable through `velocity`.
    pub fn new(velocity: PropertyHandle<'a, Vec3>, gamma: f64, dt: f64) -> Self {
        Self {
            velocity,
            factor: 0.5 * gamma * dt,
            missing: None,
        }
    }

    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] if traversal stopped at a particle
    /// without a velocity. Particles visited before it stay updated.
    pub fn finish(self) -> Result<(), SimError> {
        match self.missing {
            Some(particle) => Err(unknown(particle, &self.velocity)),
            None => Ok(()),
        }
    }
}

impl ParticleVisitor for DampingHalfStep<'_> {
    fn visit(&mut self, particle: ParticleId) -> bool {
        match self.velocity.get_mut(particle) {
            Some(v) => {
                *v -= self.factor * *v;
                true
            }
            None => {
                self.missing = Some(particle);
                false
            }
        }
    }
}

/// Fluctuation half-step `v ← v + ½ (c r - γ v) dt`.
///
/// `c` is computed once per traversal in [`prepare`](ParticleVisitor::prepare)
/// from the noise model. When `c` is zero the half-step is skipped entirely,
/// damping term included, and no random numbers are drawn.
pub struct FluctuationHalfStep<'a> {
    velocity: PropertyHandle<'a, Vec3>,
    rng: &'a mut ChaCha8Rng,
    model: NoiseModel,
    gamma: f64,
    temperature: f64,
    dt: f64,
    amplitude: f64,
    missing: Option<ParticleId>,
}

impl<'a> FluctuationHalfStep<'a> {
    /// Perturb the velocities reachable through `velocity`, drawing from `rng`.
    pub fn new(
        velocity: PropertyHandle<'a, Vec3>,
        rng: &'a mut ChaCha8Rng,
        model: NoiseModel,
        gamma: f64,
        temperature: f64,
        dt: f64,
    ) -> Self {
        Self {
            velocity,
            rng,
            model,
            gamma,
            temperature,
            dt,
            amplitude: 0.0,
            missing: None,
        }
    }

    /// Noise amplitude of the current traversal.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// # Errors
    ///
    /// [`SimError::UnknownParticle`] if traversal stopped at a particle
    /// without a velocity. Particles visited before it stay updated.
    pub fn finish(self) -> Result<(), SimError> {
        match self.missing {
            Some(particle) => Err(unknown(particle, &self.velocity)),
            None => Ok(()),
        }
    }
}

impl ParticleVisitor for FluctuationHalfStep<'_> {
    fn prepare(&mut self, _set: &ParticleSet) {
        self.amplitude = self.model.amplitude(self.gamma, self.temperature, self.dt);
    }

    fn visit(&mut self, particle: ParticleId) -> bool {
        if self.amplitude == 0.0 {
            return true;
        }
        match self.velocity.get_mut(particle) {
            Some(v) => {
                let r = self.model.sample(self.rng);
                *v += 0.5 * self.dt * (self.amplitude * r - self.gamma * *v);
                true
            }
            None => {
                self.missing = Some(particle);
                false
            }
        }
    }
}
