//! Stochastic thermostats for Kinet integrators.
//!
//! A thermostat attaches to the two velocity events of a
//! [`VelocitySplitting`](kinet_integrator::VelocitySplitting) scheme and
//! perturbs velocities there; the integrator itself knows nothing about it.
//!
//! Currently provides the [`Langevin`] thermostat.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod half_step;
pub mod langevin;
pub mod noise;

pub use half_step::{DampingHalfStep, FluctuationHalfStep};
pub use langevin::{Langevin, LangevinBuilder};
pub use noise::NoiseModel;
