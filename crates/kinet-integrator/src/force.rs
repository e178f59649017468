//! The [`ForceProvider`] seam and simple reference providers.
//!
//! A force provider overwrites the `force` store for every particle in the
//! run's set. Production pair kernels live outside this crate; the
//! providers here cover tests, demos and external fields.

use kinet_core::{ParticleSystem, SimError, Vec3};
use kinet_space::Boundary;

use crate::context::StepContext;

/// Computes forces for the particles of a run.
///
/// # Contract
///
/// - `compute()` writes a force for every particle in `ctx.particles()`.
/// - Forces are read from the `force` store only after `compute()` returns.
pub trait ForceProvider: Send + 'static {
    /// Human-readable name for logging and error reporting.
    fn name(&self) -> &str;

    /// Overwrite the force store from the current positions.
    fn compute(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError>;
}

/// No forces: every particle moves ballistically.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroForce;

impl ForceProvider for ZeroForce {
    fn name(&self) -> &str {
        "zero"
    }

    fn compute(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        let system = ctx.system_mut();
        system.force.fill(&system.particles, Vec3::ZERO);
        Ok(())
    }
}

/// The same force on every particle, e.g. a uniform external field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantForce(pub Vec3);

impl ForceProvider for ConstantForce {
    fn name(&self) -> &str {
        "constant"
    }

    fn compute(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        let system = ctx.system_mut();
        system.force.fill(&system.particles, self.0);
        Ok(())
    }
}

/// Isotropic harmonic tether `f = -k d`, where `d` is the minimum-image
/// displacement of the particle from `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HarmonicTrap {
    /// Spring constant.
    pub stiffness: f64,
    /// Equilibrium point.
    pub center: Vec3,
}

impl HarmonicTrap {
    /// A trap of the given stiffness centred on `center`.
    pub fn new(stiffness: f64, center: Vec3) -> Self {
        Self { stiffness, center }
    }

    /// Potential energy `½ k |d|²` summed over the system.
    pub fn energy(&self, system: &ParticleSystem, boundary: &dyn Boundary) -> f64 {
        system
            .position
            .view(&system.particles)
            .iter()
            .map(|(_, &x)| {
                0.5 * self.stiffness
                    * boundary
                        .minimum_image_displacement(x, self.center)
                        .norm_squared()
            })
            .sum()
    }
}

impl ForceProvider for HarmonicTrap {
    fn name(&self) -> &str {
        "harmonic_trap"
    }

    fn compute(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        let boundary = ctx.boundary();
        let ParticleSystem {
            particles,
            position,
            force,
            ..
        } = ctx.system_mut();
        for id in particles.iter() {
            let d = boundary.minimum_image_displacement(position.get(id)?, self.center);
            force.set(id, -self.stiffness * d)?;
        }
        Ok(())
    }
}
