//! Random sources for the fluctuation half-step and their amplitudes.
//!
//! The canonical Langevin noise amplitude for a full step is
//! `sqrt(2 γ T / dt)` times a standard normal variate. Both models below
//! give the velocity its per-step noise variance `2 γ T dt`, injected by
//! the single fluctuation half-step with its `0.5 dt` prefactor.

use kinet_core::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Distribution of the per-axis random draw `r` in the fluctuation
/// half-step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoiseModel {
    /// `r ~ U[-0.5, 0.5)`, amplitude `sqrt(96 γ T / dt)`.
    ///
    /// 96 = 2 (fluctuation-dissipation) × 12 (variance of a unit normal
    /// over the variance of `U[-0.5, 0.5)`) × 4 (the half-step prefactor
    /// 0.5, squared and inverted).
    #[default]
    Uniform,
    /// `r ~ N(0, 1)` via Box-Muller, amplitude `sqrt(8 γ T / dt)`.
    ///
    /// Same per-step variance as [`Uniform`](Self::Uniform), drawn from a
    /// true normal source. Trajectories differ from the uniform model.
    Gaussian,
}

impl NoiseModel {
    /// Prefactor under the square root of the noise amplitude.
    pub const fn factor(self) -> f64 {
        match self {
            Self::Uniform => 96.0,
            Self::Gaussian => 8.0,
        }
    }

    /// Noise amplitude `c = sqrt(factor · γ · T / dt)`.
    pub fn amplitude(self, gamma: f64, temperature: f64, dt: f64) -> f64 {
        (self.factor() * gamma * temperature / dt).sqrt()
    }

    /// Three independent draws, in x, y, z order.
    pub fn sample(self, rng: &mut ChaCha8Rng) -> Vec3 {
        match self {
            Self::Uniform => Vec3::new(
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
                rng.random::<f64>() - 0.5,
            ),
            Self::Gaussian => Vec3::new(box_muller(rng), box_muller(rng), box_muller(rng)),
        }
    }
}

/// A standard normal sample. Avoids a `rand_distr` dependency.
fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
    let u1 = rng.random::<f64>().max(1e-300); // ln(0)
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
