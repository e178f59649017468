//! Boundary conditions for Kinet simulations.
//!
//! This crate defines the [`Boundary`] trait, through which step schemes
//! fold absolute positions back into the primary image and measure
//! inter-particle displacements, along with two backends.
//!
//! # Backends
//!
//! - [`PeriodicBoundary`]: orthorhombic periodic box with minimum-image
//!   displacements
//! - [`OpenBoundary`]: unbounded space (folding is the identity)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod open;
pub mod periodic;

#[cfg(test)]
pub(crate) mod compliance;

pub use boundary::Boundary;
pub use open::OpenBoundary;
pub use periodic::PeriodicBoundary;
