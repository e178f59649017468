//! Test utilities and fixtures for Kinet development.
//!
//! Provides step schemes with observable behaviour ([`HalfStepScheme`],
//! [`FailingScheme`]), an [`EventRecorder`] that logs every event an
//! integrator fires, and small particle system builders.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    cubic_lattice, failing_hook, single_particle, EventRecorder, FailingScheme, HalfStepScheme,
};
