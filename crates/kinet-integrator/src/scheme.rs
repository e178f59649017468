//! The [`StepScheme`] strategy trait and the [`VelocitySplitting`] marker.
//!
//! The integrator owns the run loop; a scheme owns the physics of a single
//! step and fires its own mid-step events through the [`EventBus`] it is
//! handed.

use kinet_core::SimError;

use crate::context::StepContext;
use crate::event::{Event, EventBus, UPDATE_VELOCITY_1, UPDATE_VELOCITY_2};

/// The step body injected into an [`Integrator`](crate::Integrator).
///
/// # Contract
///
/// - `step()` advances the system by exactly one time step `ctx.dt()`.
/// - Mid-step events are fired through `events` in a fixed order per step.
/// - `step()` must not change particle set membership.
///
/// # Examples
///
/// A scheme that drifts positions at constant velocity:
///
/// ```
/// use kinet_core::SimError;
/// use kinet_integrator::{EventBus, StepContext, StepScheme};
///
/// struct Drift;
///
/// impl StepScheme for Drift {
///     fn name(&self) -> &str { "drift" }
///
///     fn step(&mut self, ctx: &mut StepContext<'_>, _events: &mut EventBus) -> Result<(), SimError> {
///         let dt = ctx.dt();
///         let system = ctx.system_mut();
///         for id in system.particles.iter() {
///             let v = system.velocity.get(id)?;
///             let x = system.position.get(id)?;
///             system.position.set(id, x + v * dt)?;
///         }
///         Ok(())
///     }
/// }
///
/// assert_eq!(Drift.name(), "drift");
/// ```
pub trait StepScheme: Send + 'static {
    /// Human-readable name for logging and error reporting.
    fn name(&self) -> &str;

    /// Mid-step events this scheme fires, in firing order.
    ///
    /// Default: none.
    fn events(&self) -> &'static [Event] {
        &[]
    }

    /// Called once per non-empty run, after `BeforeRun` and before the
    /// first step. Typically evaluates initial forces.
    ///
    /// Default: no-op.
    fn prepare(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        let _ = ctx;
        Ok(())
    }

    /// Advance the system by one time step.
    fn step(&mut self, ctx: &mut StepContext<'_>, events: &mut EventBus) -> Result<(), SimError>;
}

/// A scheme that splits each velocity update into two half kicks and
/// fires an event after each.
///
/// Thermostats attach their damping half-step to the first event and
/// their fluctuation half-step to the second.
pub trait VelocitySplitting: StepScheme {
    /// Event fired after the first velocity half-update.
    fn first_velocity_event(&self) -> Event {
        UPDATE_VELOCITY_1
    }

    /// Event fired after the second velocity half-update.
    fn second_velocity_event(&self) -> Event {
        UPDATE_VELOCITY_2
    }
}
