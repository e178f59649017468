//! Core types and traits for the Kinet particle integration engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Kinet workspace:
//! the [`Vec3`] value type, particle and subscriber identities, the
//! [`SimError`] taxonomy, particle sets with the visitor protocol, and
//! identity-keyed property storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod particles;
pub mod property;
pub mod system;
pub mod vec3;

pub use error::SimError;
pub use id::{ParticleId, SubscriberId};
pub use particles::{ParticleSet, ParticleVisitor};
pub use property::{PropertyHandle, PropertyStore, PropertyView};
pub use system::ParticleSystem;
pub use vec3::Vec3;
