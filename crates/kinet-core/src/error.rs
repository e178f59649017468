//! Error types for the Kinet integration engine.
//!
//! A single taxonomy shared by every crate: configuration errors detected
//! before any state mutates, invalid arguments, missing particle entries,
//! and failures raised from inside a step.

use std::error::Error;
use std::fmt;

use crate::id::ParticleId;

/// Errors raised by property access, boundary setup, integrator runs and
/// thermostat configuration.
///
/// All variants are detected synchronously at the violating call (or at
/// the top of `run`/`connect`) and are never retried internally.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A configuration value is outside its legal range: non-positive time
    /// step, negative step count, negative damping rate or temperature.
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the legal range.
        requirement: &'static str,
    },
    /// A box length component is zero, negative or not finite.
    ///
    /// Belongs to the configuration class; see [`SimError::is_configuration`].
    InvalidExtent {
        /// Axis index (0, 1 or 2) of the first bad component.
        axis: usize,
        /// The rejected length.
        value: f64,
    },
    /// An argument is unusable, e.g. connecting a thermostat to no integrator.
    InvalidArgument {
        /// What was wrong with the argument.
        reason: String,
    },
    /// A property store has no entry for the requested particle.
    UnknownParticle {
        /// The particle that was looked up.
        particle: ParticleId,
        /// Name of the property store.
        property: String,
    },
    /// A step algorithm, force provider or event handler failed for a
    /// reason of its own.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl SimError {
    /// Whether this error belongs to the configuration class
    /// (`InvalidConfiguration` or `InvalidExtent`).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration { .. } | Self::InvalidExtent { .. }
        )
    }

    /// Shorthand for an [`InvalidConfiguration`](SimError::InvalidConfiguration) error.
    pub fn invalid_configuration(
        parameter: &'static str,
        value: f64,
        requirement: &'static str,
    ) -> Self {
        Self::InvalidConfiguration {
            parameter,
            value,
            requirement,
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration {
                parameter,
                value,
                requirement,
            } => {
                write!(f, "invalid {parameter} = {value}: {requirement}")
            }
            Self::InvalidExtent { axis, value } => {
                write!(
                    f,
                    "invalid box length {value} on axis {axis}: must be finite and positive"
                )
            }
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::UnknownParticle { particle, property } => {
                write!(f, "particle {particle} has no entry in property '{property}'")
            }
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
        }
    }
}

impl Error for SimError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_class() {
        assert!(SimError::invalid_configuration("dt", 0.0, "must be positive").is_configuration());
        assert!(SimError::InvalidExtent { axis: 1, value: -2.0 }.is_configuration());
        assert!(!SimError::InvalidArgument {
            reason: "none".into()
        }
        .is_configuration());
    }

    #[test]
    fn display_carries_offending_value() {
        let e = SimError::invalid_configuration("time_step", -0.5, "must be finite and positive");
        assert_eq!(e.to_string(), "invalid time_step = -0.5: must be finite and positive");

        let e = SimError::UnknownParticle {
            particle: ParticleId(9),
            property: "velocity".into(),
        };
        assert_eq!(e.to_string(), "particle 9 has no entry in property 'velocity'");

        let e = SimError::InvalidExtent { axis: 2, value: 0.0 };
        assert!(e.to_string().contains("axis 2"));
    }
}
