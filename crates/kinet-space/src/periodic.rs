//! Orthorhombic periodic box (always-wrap boundary on all three axes).

use crate::boundary::Boundary;
use kinet_core::{SimError, Vec3};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// An orthorhombic periodic box.
///
/// Stores the box length together with its component-wise reciprocal;
/// both are replaced together by [`set_extent`](Self::set_extent), so the
/// fold hot path multiplies instead of dividing.
///
/// # Examples
///
/// ```
/// use kinet_core::Vec3;
/// use kinet_space::{Boundary, PeriodicBoundary};
///
/// let pbc = PeriodicBoundary::new(Vec3::splat(10.0)).unwrap();
///
/// // Folding maps into [0, 10) on each axis.
/// assert_eq!(pbc.fold(Vec3::new(12.5, -1.0, 30.0)), Vec3::new(2.5, 9.0, 0.0));
///
/// // Minimum image: 1 and 9 are 2 apart through the boundary, not 8.
/// let d = pbc.minimum_image_displacement(Vec3::new(1.0, 0.0, 0.0), Vec3::new(9.0, 0.0, 0.0));
/// assert_eq!(d, Vec3::new(2.0, 0.0, 0.0));
/// ```
#[derive(Clone, Debug)]
pub struct PeriodicBoundary {
    length: Vec3,
    inverse_length: Vec3,
    rng: ChaCha8Rng,
}

impl PeriodicBoundary {
    /// Seed of the scaffolding RNG unless [`with_seed`](Self::with_seed) is used.
    pub const DEFAULT_SEED: u64 = 0;

    /// Create a box with the given side lengths.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidExtent`] if any component is not finite and positive.
    pub fn new(length: Vec3) -> Result<Self, SimError> {
        Self::with_seed(length, Self::DEFAULT_SEED)
    }

    /// Create a box whose [`random_point_in_box`](Self::random_point_in_box)
    /// draws from an RNG seeded with `seed`.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidExtent`] if any component is not finite and positive.
    pub fn with_seed(length: Vec3, seed: u64) -> Result<Self, SimError> {
        Self::validate_extent(length)?;
        log::info!("periodic boundary, length = {length}");
        Ok(Self {
            length,
            inverse_length: length.map(f64::recip),
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Replace the box length and its cached reciprocal.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidExtent`] naming the first bad axis. The previous
    /// extent is kept.
    pub fn set_extent(&mut self, length: Vec3) -> Result<(), SimError> {
        Self::validate_extent(length)?;
        self.length = length;
        self.inverse_length = length.map(f64::recip);
        log::info!("set length = {length}");
        Ok(())
    }

    /// Current box length.
    pub fn length(&self) -> Vec3 {
        self.length
    }

    /// Cached component-wise reciprocal of the box length.
    pub fn inverse_length(&self) -> Vec3 {
        self.inverse_length
    }

    /// Box volume.
    pub fn volume(&self) -> f64 {
        self.length.x * self.length.y * self.length.z
    }

    /// Restart the scaffolding RNG from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// A point drawn uniformly from `[0, len)` on each axis.
    ///
    /// Intended for test and setup scaffolding; not cryptographically
    /// meaningful.
    pub fn random_point_in_box(&mut self) -> Vec3 {
        let u = Vec3::new(
            self.rng.random::<f64>(),
            self.rng.random::<f64>(),
            self.rng.random::<f64>(),
        );
        self.length.component_mul(u)
    }

    /// Check that every component of `length` is finite and positive.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidExtent`] naming the first bad axis.
    pub fn validate_extent(length: Vec3) -> Result<(), SimError> {
        for axis in 0..3 {
            let value = length[axis];
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::InvalidExtent { axis, value });
            }
        }
        Ok(())
    }
}

impl Boundary for PeriodicBoundary {
    fn fold(&self, position: Vec3) -> Vec3 {
        let mut p = position;
        self.fold_in_place(&mut p);
        p
    }

    fn fold_in_place(&self, position: &mut Vec3) {
        for k in 0..3 {
            let images = (position[k] * self.inverse_length[k]).floor();
            position[k] -= images * self.length[k];
        }
    }

    fn minimum_image_displacement(&self, a: Vec3, b: Vec3) -> Vec3 {
        // Symmetric remainder: rounds the image count half-to-even, so an
        // exact half-box separation keeps a deterministic sign.
        (a - b).zip_map(self.length, libm::remainder)
    }

    fn is_periodic(&self) -> bool {
        true
    }

    fn box_length(&self) -> Option<Vec3> {
        Some(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn unit_box() -> PeriodicBoundary {
        PeriodicBoundary::new(Vec3::splat(1.0)).unwrap()
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn rejects_non_positive_extent() {
        for (bad, axis) in [
            (Vec3::new(0.0, 1.0, 1.0), 0),
            (Vec3::new(1.0, -2.0, 1.0), 1),
            (Vec3::new(1.0, 1.0, f64::NAN), 2),
            (Vec3::new(1.0, 1.0, f64::INFINITY), 2),
        ] {
            match PeriodicBoundary::new(bad) {
                Err(SimError::InvalidExtent { axis: a, .. }) => assert_eq!(a, axis),
                other => panic!("expected InvalidExtent for {bad}, got {other:?}"),
            }
        }
    }

    #[test]
    fn failed_set_extent_keeps_previous_box() {
        let mut pbc = unit_box();
        let err = pbc.set_extent(Vec3::new(2.0, 0.0, 2.0)).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(pbc.length(), Vec3::splat(1.0));
        assert_eq!(pbc.inverse_length(), Vec3::splat(1.0));
    }

    #[test]
    fn set_extent_recomputes_reciprocal() {
        let mut pbc = unit_box();
        pbc.set_extent(Vec3::new(2.0, 4.0, 0.5)).unwrap();
        assert_eq!(pbc.length(), Vec3::new(2.0, 4.0, 0.5));
        assert_eq!(pbc.inverse_length(), Vec3::new(0.5, 0.25, 2.0));
        assert_eq!(pbc.volume(), 4.0);
    }

    // ── Folding ─────────────────────────────────────────────────

    #[test]
    fn fold_worked() {
        let pbc = PeriodicBoundary::new(Vec3::new(10.0, 4.0, 2.0)).unwrap();
        assert_eq!(
            pbc.fold(Vec3::new(-0.5, 9.0, 2.0)),
            Vec3::new(9.5, 1.0, 0.0)
        );
        assert_eq!(pbc.fold(Vec3::new(3.0, 3.0, 1.0)), Vec3::new(3.0, 3.0, 1.0));
    }

    // ── Minimum image ───────────────────────────────────────────

    #[test]
    fn minimum_image_worked() {
        let pbc = PeriodicBoundary::new(Vec3::splat(10.0)).unwrap();
        let d = pbc.minimum_image_displacement(Vec3::new(9.0, 1.0, 5.0), Vec3::new(1.0, 9.0, 5.0));
        assert_eq!(d, Vec3::new(-2.0, 2.0, 0.0));
        assert_eq!(pbc.distance(Vec3::new(9.0, 1.0, 5.0), Vec3::new(1.0, 9.0, 5.0)), 8f64.sqrt());
    }

    #[test]
    fn half_box_separation_rounds_to_even() {
        let pbc = PeriodicBoundary::new(Vec3::splat(10.0)).unwrap();
        // 5/10 = 0.5 rounds to 0 -> +5; 15/10 = 1.5 rounds to 2 -> -5.
        let d = pbc.minimum_image_displacement(Vec3::new(5.0, 15.0, -5.0), Vec3::ZERO);
        assert_eq!(d, Vec3::new(5.0, -5.0, -5.0));
    }

    // ── Random points ───────────────────────────────────────────

    #[test]
    fn random_points_inside_box_and_reproducible() {
        let len = Vec3::new(3.0, 5.0, 7.0);
        let mut a = PeriodicBoundary::with_seed(len, 11).unwrap();
        let mut b = PeriodicBoundary::with_seed(len, 11).unwrap();
        for _ in 0..200 {
            let p = a.random_point_in_box();
            assert_eq!(p, b.random_point_in_box());
            for k in 0..3 {
                assert!(p[k] >= 0.0 && p[k] < len[k], "{p} outside box {len}");
            }
        }

        b.reseed(12);
        a.reseed(11);
        assert_ne!(a.random_point_in_box(), b.random_point_in_box());
    }

    // ── Compliance ──────────────────────────────────────────────

    #[test]
    fn compliance_cubic() {
        compliance::run_full_compliance(&PeriodicBoundary::new(Vec3::splat(10.0)).unwrap());
    }

    #[test]
    fn compliance_orthorhombic() {
        compliance::run_full_compliance(&PeriodicBoundary::new(Vec3::new(10.0, 7.5, 3.0)).unwrap());
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_length() -> impl Strategy<Value = Vec3> {
        prop::array::uniform3(0.1f64..100.0).prop_map(Vec3::from)
    }

    fn arb_point() -> impl Strategy<Value = Vec3> {
        prop::array::uniform3(-1e4f64..1e4).prop_map(Vec3::from)
    }

    proptest! {
        #[test]
        fn fold_lands_in_primary_image(len in arb_length(), p in arb_point()) {
            let pbc = PeriodicBoundary::new(len).unwrap();
            let f = pbc.fold(p);
            for k in 0..3 {
                // Closed upper bound: a product that rounds up to an exact
                // multiple of the length may land on `len` itself.
                prop_assert!(f[k] >= 0.0 && f[k] <= len[k], "fold({}) = {} outside box {}", p, f, len);
            }
        }

        #[test]
        fn fold_is_idempotent_up_to_image(len in arb_length(), p in arb_point()) {
            let pbc = PeriodicBoundary::new(len).unwrap();
            let once = pbc.fold(p);
            let twice = pbc.fold(once);
            prop_assert!(pbc.distance(once, twice) <= 1e-9 * len.norm());
        }

        #[test]
        fn minimum_image_within_half_box(len in arb_length(), a in arb_point(), b in arb_point()) {
            let pbc = PeriodicBoundary::new(len).unwrap();
            let d = pbc.minimum_image_displacement(a, b);
            for k in 0..3 {
                prop_assert!(d[k].abs() <= 0.5 * len[k], "axis {}: |{}| > {}/2", k, d[k], len[k]);
            }
        }

        #[test]
        fn minimum_image_is_plain_difference_inside_half_box(
            len in arb_length(),
            a in arb_point(),
            frac in prop::array::uniform3(-0.49f64..0.49),
        ) {
            let pbc = PeriodicBoundary::new(len).unwrap();
            let offset = Vec3::from(frac).component_mul(len);
            let b = a - offset;
            let d = pbc.minimum_image_displacement(a, b);
            let plain = a - b;
            for k in 0..3 {
                prop_assert_eq!(d[k], plain[k]);
            }
        }
    }
}
