//! Execution context passed to step schemes, force providers and event
//! handlers during a run.

use kinet_core::{ParticleSet, ParticleSystem, PropertyHandle, Vec3};
use kinet_space::Boundary;

/// Execution context for one `run` call.
///
/// Borrows the particle system mutably and the boundary immutably for the
/// duration of the run. Handlers receive `&mut StepContext` and may read
/// the configured time step and the current step index, and read or write
/// particle properties.
pub struct StepContext<'a> {
    system: &'a mut ParticleSystem,
    boundary: &'a dyn Boundary,
    step: Option<u64>,
    dt: f64,
}

impl<'a> StepContext<'a> {
    /// Construct a new step context.
    ///
    /// Typically called by the integrator, not by schemes directly. For
    /// testing, construct around a fixture system.
    pub fn new(system: &'a mut ParticleSystem, boundary: &'a dyn Boundary, dt: f64) -> Self {
        Self {
            system,
            boundary,
            step: None,
            dt,
        }
    }

    /// Configured time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Index of the step being executed (0-based), `None` outside the step
    /// loop (during `BeforeRun`, `prepare` and `AfterRun`).
    pub fn step(&self) -> Option<u64> {
        self.step
    }

    pub(crate) fn set_step(&mut self, step: Option<u64>) {
        self.step = step;
    }

    /// Domain geometry.
    pub fn boundary(&self) -> &'a dyn Boundary {
        self.boundary
    }

    /// Particles local to this run.
    pub fn particles(&self) -> &ParticleSet {
        &self.system.particles
    }

    /// Shared access to the particle system.
    pub fn system(&self) -> &ParticleSystem {
        &*self.system
    }

    /// Mutable access to the particle system.
    ///
    /// Handlers must not change set membership during a run.
    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut *self.system
    }

    /// Read/write handle on the velocity store bound to the run's particles.
    pub fn velocities(&mut self) -> PropertyHandle<'_, Vec3> {
        let system = &mut *self.system;
        system.velocity.bind(&system.particles)
    }
}
