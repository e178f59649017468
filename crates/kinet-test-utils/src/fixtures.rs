//! Reusable integrator test fixtures.
//!
//! - [`HalfStepScheme`]: fires the two velocity events and nothing else.
//! - [`FailingScheme`]: fails deterministically at a given step.
//! - [`EventRecorder`]: shared log of every event an integrator fires.

use std::sync::{Arc, Mutex};

use kinet_core::{ParticleId, ParticleSystem, SimError, SubscriberId, Vec3};
use kinet_integrator::{
    Event, EventBus, Integrator, StepContext, StepScheme, VelocitySplitting, UPDATE_VELOCITY_1,
    UPDATE_VELOCITY_2,
};

/// A velocity splitting without force or position updates.
///
/// Each step fires `UPDATE_VELOCITY_1` then `UPDATE_VELOCITY_2`, so a
/// thermostat attached to it acts alone on the velocities.
#[derive(Clone, Copy, Debug, Default)]
pub struct HalfStepScheme;

impl StepScheme for HalfStepScheme {
    fn name(&self) -> &str {
        "half_step"
    }

    fn events(&self) -> &'static [Event] {
        &[UPDATE_VELOCITY_1, UPDATE_VELOCITY_2]
    }

    fn step(&mut self, ctx: &mut StepContext<'_>, events: &mut EventBus) -> Result<(), SimError> {
        events.fire(self.first_velocity_event(), ctx)?;
        events.fire(self.second_velocity_event(), ctx)
    }
}

impl VelocitySplitting for HalfStepScheme {}

/// Fails at step `fail_at` (0-based), succeeding on every earlier step.
#[derive(Clone, Debug)]
pub struct FailingScheme {
    pub fail_at: u64,
    calls: u64,
}

impl FailingScheme {
    pub fn new(fail_at: u64) -> Self {
        Self { fail_at, calls: 0 }
    }

    /// How many times `step()` has been called.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl StepScheme for FailingScheme {
    fn name(&self) -> &str {
        "failing"
    }

    fn step(&mut self, ctx: &mut StepContext<'_>, _events: &mut EventBus) -> Result<(), SimError> {
        self.calls += 1;
        match ctx.step() {
            Some(step) if step == self.fail_at => Err(SimError::ExecutionFailed {
                reason: format!("deliberate failure at step {step}"),
            }),
            _ => Ok(()),
        }
    }
}

/// A handler that always fails with `reason`.
pub fn failing_hook(
    reason: &'static str,
) -> impl FnMut(&mut StepContext<'_>) -> Result<(), SimError> + Send + 'static {
    move |_ctx: &mut StepContext<'_>| {
        Err(SimError::ExecutionFailed {
            reason: reason.to_string(),
        })
    }
}

/// Shared, ordered log of fired events.
///
/// Attach to an integrator with [`attach`](Self::attach); every run,
/// step and scheme event is appended by name.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    subscriber: Option<SubscriberId>,
    log: Arc<Mutex<Vec<String>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the run events plus every event `integrator`'s scheme
    /// declares.
    pub fn attach<S: StepScheme>(&mut self, integrator: &mut Integrator<S>) {
        let subscriber = *self.subscriber.get_or_insert_with(SubscriberId::next);
        let mut events = vec![
            Event::BeforeRun,
            Event::BeforeStep,
            Event::AfterStep,
            Event::AfterRun,
        ];
        events.extend_from_slice(integrator.scheme().events());
        for event in events {
            let log = Arc::clone(&self.log);
            integrator.on(event, subscriber, move |_ctx| {
                if let Ok(mut log) = log.lock() {
                    log.push(event.to_string());
                }
                Ok(())
            });
        }
    }

    /// Remove this recorder's handlers from `integrator`.
    pub fn detach<S: StepScheme>(&self, integrator: &mut Integrator<S>) -> usize {
        self.subscriber.map_or(0, |s| integrator.off_all(s))
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<String> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

/// A system holding one particle at the origin with velocity `velocity`.
pub fn single_particle(velocity: Vec3) -> (ParticleSystem, ParticleId) {
    let mut system = ParticleSystem::new();
    let id = system.add_particle(Vec3::ZERO, velocity);
    (system, id)
}

/// `n³` particles at rest on a simple cubic lattice of the given spacing,
/// starting half a spacing from the origin.
pub fn cubic_lattice(n: usize, spacing: f64) -> ParticleSystem {
    let mut system = ParticleSystem::new();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let cell = Vec3::new(i as f64, j as f64, k as f64) + Vec3::splat(0.5);
                system.add_particle(cell * spacing, Vec3::ZERO);
            }
        }
    }
    system
}
