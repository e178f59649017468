//! Langevin thermostat for velocity-Verlet splittings.
//!
//! Attaches a damping half-step to the scheme's first velocity event and a
//! fluctuation half-step to its second:
//!
//! ```text
//! first velocity event:   v ← v - ½ γ v dt
//! second velocity event:  v ← v + ½ (c r - γ v) dt
//! ```
//!
//! with `c` from the configured [`NoiseModel`]. The default uniform model
//! uses `c = sqrt(96 γ T / dt)`.
//!
//! Respects the determinism contract: draws come from a ChaCha8 RNG seeded
//! at construction, so identical seeds and inputs give bit-identical
//! trajectories.
//!
//! Constructed via the builder pattern: [`Langevin::builder`].

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kinet_core::{ParticleSystem, SimError, SubscriberId};
use kinet_integrator::{Integrator, StepContext, VelocitySplitting};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::half_step::{DampingHalfStep, FluctuationHalfStep};
use crate::noise::NoiseModel;

#[derive(Debug)]
struct LangevinState {
    gamma: f64,
    temperature: f64,
    model: NoiseModel,
    seed: u64,
    rng: ChaCha8Rng,
}

type SharedState = Arc<Mutex<LangevinState>>;

/// Lock for a hook; a poisoned lock fails the event.
fn lock_for_hook(state: &SharedState) -> Result<MutexGuard<'_, LangevinState>, SimError> {
    state.lock().map_err(|_| SimError::ExecutionFailed {
        reason: "langevin state lock poisoned".into(),
    })
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<(), SimError> {
    // NaN fails the comparison too.
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid_configuration(
            parameter,
            value,
            "must be finite and non-negative",
        ))
    }
}

/// A Langevin thermostat.
///
/// Holds its parameters and RNG behind a shared lock so that the handlers
/// registered on an integrator see later parameter changes. Parameter
/// changes take effect on the next fired event.
///
/// # Examples
///
/// ```
/// use kinet_core::{ParticleSystem, Vec3};
/// use kinet_integrator::{Integrator, VelocityVerlet};
/// use kinet_thermostat::Langevin;
///
/// let mut system = ParticleSystem::new();
/// system.add_particle(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
///
/// let mut integrator = Integrator::new(VelocityVerlet::new());
/// integrator.set_time_step(0.01);
///
/// let thermostat = Langevin::builder().temperature(1.0).gamma(0.5).build().unwrap();
/// thermostat.connect(Some(&mut integrator)).unwrap();
/// integrator.run(&mut system, 10).unwrap();
/// thermostat.disconnect(&mut integrator);
/// ```
pub struct Langevin {
    id: SubscriberId,
    state: SharedState,
}

/// Builder for [`Langevin`].
///
/// Required fields: `temperature`, `gamma`.
#[derive(Clone, Debug)]
pub struct LangevinBuilder {
    temperature: Option<f64>,
    gamma: Option<f64>,
    seed: u64,
    noise_model: NoiseModel,
}

impl Langevin {
    /// Seed of the thermostat RNG unless [`LangevinBuilder::seed`] is used.
    pub const DEFAULT_SEED: u64 = 15154;

    /// Create a new builder for configuring a `Langevin` thermostat.
    pub fn builder() -> LangevinBuilder {
        LangevinBuilder {
            temperature: None,
            gamma: None,
            seed: Self::DEFAULT_SEED,
            noise_model: NoiseModel::Uniform,
        }
    }

    /// A thermostat with the default seed and noise model.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfiguration`] if either value is negative or
    /// not finite.
    pub fn new(temperature: f64, gamma: f64) -> Result<Self, SimError> {
        Self::builder().temperature(temperature).gamma(gamma).build()
    }

    fn state(&self) -> MutexGuard<'_, LangevinState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Identity under which this thermostat's handlers are registered.
    pub fn subscriber(&self) -> SubscriberId {
        self.id
    }

    /// Damping rate.
    pub fn gamma(&self) -> f64 {
        self.state().gamma
    }

    /// Change the damping rate.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfiguration`] if `gamma` is negative or not
    /// finite. The previous value is kept.
    pub fn set_gamma(&self, gamma: f64) -> Result<(), SimError> {
        check_non_negative("gamma", gamma)?;
        self.state().gamma = gamma;
        log::info!("langevin gamma = {gamma}");
        Ok(())
    }

    /// Target temperature.
    pub fn temperature(&self) -> f64 {
        self.state().temperature
    }

    /// Change the target temperature.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfiguration`] if `temperature` is negative or
    /// not finite. The previous value is kept.
    pub fn set_temperature(&self, temperature: f64) -> Result<(), SimError> {
        check_non_negative("temperature", temperature)?;
        self.state().temperature = temperature;
        log::info!("langevin temperature = {temperature}");
        Ok(())
    }

    /// Distribution of the random draws.
    pub fn noise_model(&self) -> NoiseModel {
        self.state().model
    }

    /// Seed the RNG was last seeded with.
    pub fn seed(&self) -> u64 {
        self.state().seed
    }

    /// Restart the RNG from `seed`.
    pub fn reseed(&self, seed: u64) {
        let mut state = self.state();
        state.seed = seed;
        state.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Noise amplitude `c` the fluctuation half-step would use at time step `dt`.
    pub fn noise_amplitude(&self, dt: f64) -> f64 {
        let state = self.state();
        state.model.amplitude(state.gamma, state.temperature, dt)
    }

    /// Register the damping half-step on the scheme's first velocity event
    /// and the fluctuation half-step on its second.
    ///
    /// Connecting twice without disconnecting registers both half-steps
    /// twice; this is not guarded.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] if `integrator` is `None`.
    pub fn connect<S: VelocitySplitting>(
        &self,
        integrator: Option<&mut Integrator<S>>,
    ) -> Result<(), SimError> {
        let integrator = integrator.ok_or_else(|| SimError::InvalidArgument {
            reason: "langevin: cannot connect to a missing integrator".into(),
        })?;
        let first = integrator.scheme().first_velocity_event();
        let second = integrator.scheme().second_velocity_event();
        log::info!(
            "langevin connects to {} integrator ({first}, {second})",
            integrator.scheme().name()
        );

        let state = Arc::clone(&self.state);
        integrator.on(first, self.id, move |ctx| damp(&state, ctx));
        let state = Arc::clone(&self.state);
        integrator.on(second, self.id, move |ctx| fluctuate(&state, ctx));
        Ok(())
    }

    /// Remove every handler this thermostat registered on `integrator`.
    ///
    /// Returns how many were removed; zero when not connected.
    pub fn disconnect<S: VelocitySplitting>(&self, integrator: &mut Integrator<S>) -> usize {
        let removed = integrator.off_all(self.id);
        log::info!("langevin disconnects from integrator ({removed} handlers)");
        removed
    }
}

fn damp(state: &SharedState, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
    let gamma = lock_for_hook(state)?.gamma;
    let dt = ctx.dt();
    log::debug!("langevin damping half-step at step {:?}", ctx.step());

    let ParticleSystem {
        particles,
        velocity,
        ..
    } = ctx.system_mut();
    let mut step = DampingHalfStep::new(velocity.bind(particles), gamma, dt);
    particles.for_each(&mut step);
    step.finish()
}

fn fluctuate(state: &SharedState, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
    let mut guard = lock_for_hook(state)?;
    let LangevinState {
        gamma,
        temperature,
        model,
        rng,
        ..
    } = &mut *guard;
    let dt = ctx.dt();
    log::debug!("langevin fluctuation half-step at step {:?}", ctx.step());

    let ParticleSystem {
        particles,
        velocity,
        ..
    } = ctx.system_mut();
    let mut step =
        FluctuationHalfStep::new(velocity.bind(particles), rng, *model, *gamma, *temperature, dt);
    particles.for_each(&mut step);
    step.finish()
}

impl fmt::Debug for Langevin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Langevin")
            .field("subscriber", &self.id)
            .field("gamma", &state.gamma)
            .field("temperature", &state.temperature)
            .field("noise_model", &state.model)
            .field("seed", &state.seed)
            .finish()
    }
}

impl LangevinBuilder {
    /// Set the target temperature. Must be >= 0.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the damping rate. Must be >= 0.
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }

    /// Set the RNG seed (default: [`Langevin::DEFAULT_SEED`]).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the noise model (default: [`NoiseModel::Uniform`]).
    pub fn noise_model(mut self, noise_model: NoiseModel) -> Self {
        self.noise_model = noise_model;
        self
    }

    /// Build the thermostat, validating all configuration.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidArgument`] if `temperature` or `gamma` is not set.
    /// - [`SimError::InvalidConfiguration`] if either is negative or not finite.
    pub fn build(self) -> Result<Langevin, SimError> {
        let temperature = self.temperature.ok_or_else(|| SimError::InvalidArgument {
            reason: "langevin: temperature is required".into(),
        })?;
        let gamma = self.gamma.ok_or_else(|| SimError::InvalidArgument {
            reason: "langevin: gamma is required".into(),
        })?;
        check_non_negative("temperature", temperature)?;
        check_non_negative("gamma", gamma)?;

        log::info!(
            "langevin, temperature = {temperature}, gamma = {gamma}, noise = {:?}",
            self.noise_model
        );
        Ok(Langevin {
            id: SubscriberId::next(),
            state: Arc::new(Mutex::new(LangevinState {
                gamma,
                temperature,
                model: self.noise_model,
                seed: self.seed,
                rng: ChaCha8Rng::seed_from_u64(self.seed),
            })),
        })
    }
}
