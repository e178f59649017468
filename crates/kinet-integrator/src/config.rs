//! Integrator configuration and validation.

use kinet_core::{SimError, Vec3};
use kinet_space::{Boundary, OpenBoundary, PeriodicBoundary};

/// Builder-input for [`Integrator::from_config`](crate::Integrator::from_config).
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratorConfig {
    /// Time step. Must be finite and positive. Default: 0.005.
    pub time_step: f64,
    /// Periodic box length, or `None` for an open domain. Default: `None`.
    pub box_length: Option<Vec3>,
    /// Seed of the periodic boundary's scaffolding RNG. Default: 0.
    pub boundary_seed: u64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            time_step: 0.005,
            box_length: None,
            boundary_seed: PeriodicBoundary::DEFAULT_SEED,
        }
    }
}

impl IntegratorConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfiguration`] for a bad time step,
    /// [`SimError::InvalidExtent`] for a bad box length.
    pub fn validate(&self) -> Result<(), SimError> {
        validate_time_step(self.time_step)?;
        if let Some(length) = self.box_length {
            PeriodicBoundary::validate_extent(length)?;
        }
        Ok(())
    }

    /// Build the configured boundary.
    pub(crate) fn boundary(&self) -> Result<Box<dyn Boundary>, SimError> {
        Ok(match self.box_length {
            Some(length) => Box::new(PeriodicBoundary::with_seed(length, self.boundary_seed)?),
            None => Box::new(OpenBoundary),
        })
    }
}

pub(crate) fn validate_time_step(dt: f64) -> Result<(), SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid_configuration(
            "time_step",
            dt,
            "must be finite and positive",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = IntegratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.time_step, 0.005);
        assert!(!config.boundary().unwrap().is_periodic());
    }

    #[test]
    fn rejects_bad_time_step() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = IntegratorConfig {
                time_step: dt,
                ..Default::default()
            };
            match config.validate() {
                Err(SimError::InvalidConfiguration { parameter, .. }) => {
                    assert_eq!(parameter, "time_step")
                }
                other => panic!("expected InvalidConfiguration for dt = {dt}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_bad_box() {
        let config = IntegratorConfig {
            box_length: Some(Vec3::new(1.0, 1.0, -1.0)),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidExtent { axis: 2, .. })
        ));
    }

    #[test]
    fn periodic_box_is_built() {
        let config = IntegratorConfig {
            box_length: Some(Vec3::splat(4.0)),
            ..Default::default()
        };
        let boundary = config.boundary().unwrap();
        assert!(boundary.is_periodic());
        assert_eq!(boundary.box_length(), Some(Vec3::splat(4.0)));
    }
}
