//! The [`Integrator`] run state machine.

use std::fmt;

use kinet_core::{ParticleSystem, SimError, SubscriberId};
use kinet_space::{Boundary, OpenBoundary};

use crate::config::{validate_time_step, IntegratorConfig};
use crate::context::StepContext;
use crate::event::{Event, EventBus};
use crate::scheme::StepScheme;

/// Whether a run is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// No run in progress.
    Idle,
    /// Inside [`Integrator::run`].
    Running,
}

/// Stepped integration engine.
///
/// Owns the step loop, the event bus and the boundary; the injected
/// [`StepScheme`] owns the physics of one step. The particle system is
/// borrowed for the duration of each [`run`](Self::run) call only.
///
/// # Examples
///
/// ```
/// use kinet_core::{ParticleSystem, Vec3};
/// use kinet_integrator::{Integrator, VelocityVerlet};
///
/// let mut system = ParticleSystem::new();
/// let p = system.add_particle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
///
/// let mut integrator = Integrator::new(VelocityVerlet::new());
/// integrator.set_time_step(0.5);
/// integrator.run(&mut system, 4).unwrap();
///
/// assert_eq!(system.position.get(p).unwrap(), Vec3::new(2.0, 0.0, 0.0));
/// ```
pub struct Integrator<S: StepScheme> {
    scheme: S,
    boundary: Box<dyn Boundary>,
    events: EventBus,
    time_step: f64,
    current_step: Option<u64>,
    state: RunState,
}

impl<S: StepScheme> Integrator<S> {
    /// An integrator over an open domain with time step 0.
    ///
    /// The time step must be set before the first non-trivial run.
    pub fn new(scheme: S) -> Self {
        log::info!("{} integrator created", scheme.name());
        Self {
            scheme,
            boundary: Box::new(OpenBoundary),
            events: EventBus::new(),
            time_step: 0.0,
            current_step: None,
            state: RunState::Idle,
        }
    }

    /// An integrator with the time step and boundary of `config`.
    ///
    /// # Errors
    ///
    /// Whatever [`IntegratorConfig::validate`] reports.
    pub fn from_config(scheme: S, config: &IntegratorConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut integrator = Self::new(scheme);
        integrator.time_step = config.time_step;
        integrator.boundary = config.boundary()?;
        Ok(integrator)
    }

    // ── Accessors ──────────────────────────────────────────────

    /// Configured time step.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Set the time step. Validated by the next [`run`](Self::run).
    pub fn set_time_step(&mut self, dt: f64) {
        self.time_step = dt;
    }

    /// Index of the step in progress, `None` when idle.
    pub fn current_step(&self) -> Option<u64> {
        self.current_step
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The step scheme.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// Mutable access to the step scheme.
    pub fn scheme_mut(&mut self) -> &mut S {
        &mut self.scheme
    }

    /// Domain geometry.
    pub fn boundary(&self) -> &dyn Boundary {
        self.boundary.as_ref()
    }

    /// Replace the domain geometry.
    pub fn set_boundary(&mut self, boundary: impl Boundary) {
        self.boundary = Box::new(boundary);
    }

    // ── Events ─────────────────────────────────────────────────

    /// Register `handler` on `event` under `subscriber`.
    ///
    /// Handlers fire in registration order. Registering twice fires twice.
    pub fn on<F>(&mut self, event: Event, subscriber: SubscriberId, handler: F)
    where
        F: FnMut(&mut StepContext<'_>) -> Result<(), SimError> + Send + 'static,
    {
        log::debug!("subscriber {subscriber} registered on {event}");
        self.events.subscribe(event, subscriber, Box::new(handler));
    }

    /// Remove `subscriber`'s handlers on `event`; returns how many.
    pub fn off(&mut self, event: Event, subscriber: SubscriberId) -> usize {
        self.events.unsubscribe(event, subscriber)
    }

    /// Remove all of `subscriber`'s handlers; returns how many.
    pub fn off_all(&mut self, subscriber: SubscriberId) -> usize {
        self.events.unsubscribe_all(subscriber)
    }

    /// Number of handlers on `event`.
    pub fn subscriber_count(&self, event: Event) -> usize {
        self.events.subscriber_count(event)
    }

    /// Whether `subscriber` has a handler on `event`.
    pub fn is_subscribed(&self, event: Event, subscriber: SubscriberId) -> bool {
        self.events.is_subscribed(event, subscriber)
    }

    // ── Run ────────────────────────────────────────────────────

    /// Advance `system` by `steps` time steps.
    ///
    /// Fires `BeforeRun`, then per step `BeforeStep`, the scheme's own
    /// events and `AfterStep`, then `AfterRun`. The scheme's
    /// [`prepare`](StepScheme::prepare) runs once before the first step;
    /// `run(0)` fires only `BeforeRun` and `AfterRun`.
    ///
    /// The integrator is back in [`RunState::Idle`] with no current step
    /// when this returns, whether or not it succeeded.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidConfiguration`] if the time step is not finite
    ///   and positive or `steps` is negative.
    /// - [`SimError::UnknownParticle`] if a particle lacks a position,
    ///   velocity or force entry.
    ///
    /// Nothing fires and nothing changes in these cases. Any error from
    /// the scheme or a handler aborts the run and is returned unmodified;
    /// `AfterRun` does not fire after a failure.
    pub fn run(&mut self, system: &mut ParticleSystem, steps: i64) -> Result<(), SimError> {
        validate_time_step(self.time_step)?;
        let steps = u64::try_from(steps).map_err(|_| {
            SimError::invalid_configuration("steps", steps as f64, "must be non-negative")
        })?;
        system.validate()?;

        log::info!(
            "{}: {steps} steps of dt = {} over {} particles",
            self.scheme.name(),
            self.time_step,
            system.len()
        );

        self.state = RunState::Running;
        let result = self.run_steps(system, steps);
        self.state = RunState::Idle;
        self.current_step = None;

        match &result {
            Ok(()) => log::info!("{}: run finished", self.scheme.name()),
            Err(e) => log::warn!("{}: run aborted: {e}", self.scheme.name()),
        }
        result
    }

    fn run_steps(&mut self, system: &mut ParticleSystem, steps: u64) -> Result<(), SimError> {
        let Self {
            scheme,
            boundary,
            events,
            time_step,
            current_step,
            ..
        } = self;
        let mut ctx = StepContext::new(system, &**boundary, *time_step);

        events.fire(Event::BeforeRun, &mut ctx)?;
        if steps > 0 {
            scheme.prepare(&mut ctx)?;
        }
        for step in 0..steps {
            *current_step = Some(step);
            ctx.set_step(Some(step));
            log::debug!("step {step}");

            events.fire(Event::BeforeStep, &mut ctx)?;
            scheme.step(&mut ctx, events)?;
            events.fire(Event::AfterStep, &mut ctx)?;
        }
        ctx.set_step(None);
        events.fire(Event::AfterRun, &mut ctx)
    }
}

impl<S: StepScheme> fmt::Debug for Integrator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integrator")
            .field("scheme", &self.scheme.name())
            .field("time_step", &self.time_step)
            .field("state", &self.state)
            .field("current_step", &self.current_step)
            .field("periodic", &self.boundary.is_periodic())
            .field("events", &self.events)
            .finish()
    }
}
