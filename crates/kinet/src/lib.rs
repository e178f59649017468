//! Kinet: a particle integration engine.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Kinet sub-crates. For most users, adding `kinet` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use kinet::prelude::*;
//!
//! // Two particles in a periodic box, one of them straddling the boundary.
//! let mut system = ParticleSystem::new();
//! let a = system.add_particle(Vec3::new(0.5, 5.0, 5.0), Vec3::new(-1.0, 0.0, 0.0));
//! system.add_particle(Vec3::new(9.5, 5.0, 5.0), Vec3::ZERO);
//!
//! let mut integrator = Integrator::new(VelocityVerlet::with_force(HarmonicTrap::new(
//!     1.0,
//!     Vec3::splat(5.0),
//! )));
//! integrator.set_time_step(0.01);
//! integrator.set_boundary(PeriodicBoundary::new(Vec3::splat(10.0)).unwrap());
//!
//! // Couple the particles to a heat bath at T = 1.
//! let thermostat = Langevin::builder()
//!     .temperature(1.0)
//!     .gamma(0.5)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! thermostat.connect(Some(&mut integrator)).unwrap();
//!
//! integrator.run(&mut system, 100).unwrap();
//! let x = system.position.get(a).unwrap();
//! assert!((0..3).all(|k| x[k] >= 0.0 && x[k] < 10.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `kinet-core` | `Vec3`, IDs, particle sets, property stores, errors |
//! | [`space`] | `kinet-space` | Boundary conditions (open, periodic) |
//! | [`integrator`] | `kinet-integrator` | Stepped integrator, events, schemes, forces |
//! | [`thermostat`] | `kinet-thermostat` | Langevin thermostat and its noise models |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Vectors, IDs, particle sets and property storage (`kinet-core`).
///
/// Contains [`core::Vec3`], [`core::ParticleSet`], [`core::PropertyStore`]
/// and the shared error type [`core::SimError`].
pub use kinet_core as core;

/// Boundary conditions (`kinet-space`).
///
/// Provides the [`space::Boundary`] trait, [`space::OpenBoundary`] and
/// [`space::PeriodicBoundary`].
pub use kinet_space as space;

/// Stepped integration engine (`kinet-integrator`).
///
/// [`integrator::Integrator`] drives a [`integrator::StepScheme`] and
/// publishes its lifecycle on named [`integrator::Event`]s.
pub use kinet_integrator as integrator;

/// Thermostats (`kinet-thermostat`).
///
/// [`thermostat::Langevin`] hooks into any velocity-splitting scheme.
pub use kinet_thermostat as thermostat;

/// Common imports for typical Kinet usage.
///
/// ```rust
/// use kinet::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use kinet_core::{
        ParticleId, ParticleSet, ParticleSystem, ParticleVisitor, PropertyStore, SimError,
        SubscriberId, Vec3,
    };

    // Boundaries
    pub use kinet_space::{Boundary, OpenBoundary, PeriodicBoundary};

    // Integrator
    pub use kinet_integrator::{
        Event, ForceProvider, HarmonicTrap, Integrator, IntegratorConfig, StepContext,
        StepScheme, VelocitySplitting, VelocityVerlet, UPDATE_VELOCITY_1, UPDATE_VELOCITY_2,
    };

    // Thermostat
    pub use kinet_thermostat::{Langevin, NoiseModel};
}
