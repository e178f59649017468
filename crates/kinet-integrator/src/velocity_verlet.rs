//! Velocity-Verlet splitting with unit masses.

use kinet_core::{ParticleSystem, SimError};

use crate::context::StepContext;
use crate::event::{Event, EventBus, UPDATE_VELOCITY_1, UPDATE_VELOCITY_2};
use crate::force::{ForceProvider, ZeroForce};
use crate::scheme::{StepScheme, VelocitySplitting};

/// Velocity-Verlet integration of `dx/dt = v`, `dv/dt = f` (unit mass).
///
/// One step:
///
/// ```text
/// v += ½ f dt          -> fire UPDATE_VELOCITY_1
/// x += v dt, fold
/// f  = force(x)
/// v += ½ f dt          -> fire UPDATE_VELOCITY_2
/// ```
///
/// [`prepare`](StepScheme::prepare) evaluates the initial forces so that
/// the first half kick sees forces consistent with the starting positions.
pub struct VelocityVerlet {
    force: Box<dyn ForceProvider>,
}

impl VelocityVerlet {
    /// Force-free integration.
    pub fn new() -> Self {
        Self::with_force(ZeroForce)
    }

    /// Integration under `force`.
    pub fn with_force(force: impl ForceProvider) -> Self {
        Self {
            force: Box::new(force),
        }
    }

    /// The force provider.
    pub fn force_provider(&self) -> &dyn ForceProvider {
        self.force.as_ref()
    }

    /// Replace the force provider.
    pub fn set_force(&mut self, force: impl ForceProvider) {
        self.force = Box::new(force);
    }
}

impl Default for VelocityVerlet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VelocityVerlet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelocityVerlet")
            .field("force", &self.force.name())
            .finish()
    }
}

fn half_kick(system: &mut ParticleSystem, dt: f64) {
    let ParticleSystem {
        particles,
        velocity,
        force,
        ..
    } = system;
    let force = force.view(particles);
    let mut velocity = velocity.bind(particles);
    for id in particles.iter() {
        velocity[id] += 0.5 * dt * force[id];
    }
}

fn drift(ctx: &mut StepContext<'_>) {
    let dt = ctx.dt();
    let boundary = ctx.boundary();
    let ParticleSystem {
        particles,
        position,
        velocity,
        ..
    } = ctx.system_mut();
    let velocity = velocity.view(particles);
    let mut position = position.bind(particles);
    for id in particles.iter() {
        let x = &mut position[id];
        *x += dt * velocity[id];
        boundary.fold_in_place(x);
    }
}

impl StepScheme for VelocityVerlet {
    fn name(&self) -> &str {
        "velocity_verlet"
    }

    fn events(&self) -> &'static [Event] {
        &[UPDATE_VELOCITY_1, UPDATE_VELOCITY_2]
    }

    fn prepare(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        log::debug!("{}: initial forces from {}", self.name(), self.force.name());
        self.force.compute(ctx)
    }

    fn step(&mut self, ctx: &mut StepContext<'_>, events: &mut EventBus) -> Result<(), SimError> {
        let dt = ctx.dt();

        half_kick(ctx.system_mut(), dt);
        events.fire(self.first_velocity_event(), ctx)?;

        drift(ctx);
        self.force.compute(ctx)?;

        half_kick(ctx.system_mut(), dt);
        events.fire(self.second_velocity_event(), ctx)
    }
}

impl VelocitySplitting for VelocityVerlet {}
