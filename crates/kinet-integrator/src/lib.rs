//! Stepped integration engine for Kinet simulations.
//!
//! An [`Integrator`] owns the run loop and the event bus; a [`StepScheme`]
//! owns the physics of one step. Between them sit named [`Event`]s at which
//! extensions (thermostats, barostats, constraint solvers) inject behaviour
//! without the integrator knowing about them.
//!
//! # Run lifecycle
//!
//! ```text
//! BeforeRun
//!   [scheme.prepare]                       (only when steps > 0)
//!   repeat steps times:
//!     BeforeStep
//!     scheme.step   (fires its own mid-step events)
//!     AfterStep
//! AfterRun
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod event;
pub mod force;
pub mod integrator;
pub mod scheme;
pub mod velocity_verlet;

pub use config::IntegratorConfig;
pub use context::StepContext;
pub use event::{Event, EventBus, HookFn, UPDATE_VELOCITY_1, UPDATE_VELOCITY_2};
pub use force::{ConstantForce, ForceProvider, HarmonicTrap, ZeroForce};
pub use integrator::{Integrator, RunState};
pub use scheme::{StepScheme, VelocitySplitting};
pub use velocity_verlet::VelocityVerlet;
