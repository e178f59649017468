//! Reference workloads and utilities for benchmarking Kinet.
//!
//! - [`random_system`]: particles scattered uniformly in a periodic box
//! - [`LennardJones`]: brute-force all-pairs Lennard-Jones force provider,
//!   the illustrative client of the minimum-image convention
//! - [`reference_integrator`]: velocity Verlet + Lennard-Jones + Langevin

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kinet_core::{ParticleSystem, SimError, Vec3};
use kinet_integrator::{ForceProvider, Integrator, StepContext, VelocityVerlet};
use kinet_space::{Boundary, PeriodicBoundary};
use kinet_thermostat::Langevin;

/// `n` particles at rest, placed uniformly at random in `boundary`'s box.
///
/// Positions come from the boundary's own seeded RNG, so the same seed
/// gives the same system.
pub fn random_system(n: usize, boundary: &mut PeriodicBoundary) -> ParticleSystem {
    let mut system = ParticleSystem::new();
    for _ in 0..n {
        let x = boundary.random_point_in_box();
        system.add_particle(x, Vec3::ZERO);
    }
    system
}

/// Cubic box side holding `n` particles at number density `density`.
pub fn box_side(n: usize, density: f64) -> f64 {
    (n as f64 / density).cbrt()
}

/// Truncated 12-6 Lennard-Jones interaction evaluated over all pairs.
///
/// `O(N²)` per evaluation; intended for benchmarks and small demos.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LennardJones {
    /// Well depth.
    pub epsilon: f64,
    /// Zero-crossing distance.
    pub sigma: f64,
    /// Pairs farther apart than this do not interact.
    pub cutoff: f64,
}

impl Default for LennardJones {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            sigma: 1.0,
            cutoff: 2.5,
        }
    }
}

impl LennardJones {
    /// Pair energy and `f(r)/r` at squared separation `r2`, or `None`
    /// beyond the cutoff.
    fn pair(&self, r2: f64) -> Option<(f64, f64)> {
        if r2 >= self.cutoff * self.cutoff {
            return None;
        }
        let s2 = self.sigma * self.sigma / r2;
        let s6 = s2 * s2 * s2;
        let energy = 4.0 * self.epsilon * (s6 * s6 - s6);
        let force_over_r = 24.0 * self.epsilon * (2.0 * s6 * s6 - s6) / r2;
        Some((energy, force_over_r))
    }

    /// Total potential energy of `system` under minimum-image separations.
    pub fn energy(&self, system: &ParticleSystem, boundary: &dyn Boundary) -> f64 {
        let positions: Vec<Vec3> = system
            .position
            .view(&system.particles)
            .iter()
            .map(|(_, x)| *x)
            .collect();
        let mut total = 0.0;
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                let d = boundary.minimum_image_displacement(a, b);
                if let Some((e, _)) = self.pair(d.norm_squared()) {
                    total += e;
                }
            }
        }
        total
    }
}

impl ForceProvider for LennardJones {
    fn name(&self) -> &str {
        "lennard_jones"
    }

    fn compute(&mut self, ctx: &mut StepContext<'_>) -> Result<(), SimError> {
        let boundary = ctx.boundary();
        let ParticleSystem {
            particles,
            position,
            force,
            ..
        } = ctx.system_mut();

        let ids: Vec<_> = particles.iter().collect();
        let positions = ids
            .iter()
            .map(|&id| position.get(id))
            .collect::<Result<Vec<Vec3>, SimError>>()?;
        let mut forces = vec![Vec3::ZERO; ids.len()];

        for i in 0..positions.len() {
            for j in i + 1..positions.len() {
                let d = boundary.minimum_image_displacement(positions[i], positions[j]);
                if let Some((_, f)) = self.pair(d.norm_squared()) {
                    forces[i] += f * d;
                    forces[j] -= f * d;
                }
            }
        }
        for (id, f) in ids.into_iter().zip(forces) {
            force.set(id, f)?;
        }
        Ok(())
    }
}

/// Velocity Verlet under Lennard-Jones in a periodic box, thermostatted
/// by Langevin at `temperature`. Returns the integrator and the connected
/// thermostat.
///
/// # Errors
///
/// Any configuration error from the box, time step or thermostat.
pub fn reference_integrator(
    box_length: f64,
    temperature: f64,
    seed: u64,
) -> Result<(Integrator<VelocityVerlet>, Langevin), SimError> {
    let mut integrator = Integrator::new(VelocityVerlet::with_force(LennardJones::default()));
    integrator.set_time_step(0.005);
    integrator.set_boundary(PeriodicBoundary::with_seed(Vec3::splat(box_length), seed)?);

    let thermostat = Langevin::builder()
        .temperature(temperature)
        .gamma(1.0)
        .seed(seed)
        .build()?;
    thermostat.connect(Some(&mut integrator))?;
    Ok((integrator, thermostat))
}
