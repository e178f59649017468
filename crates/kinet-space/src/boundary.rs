//! The core `Boundary` trait.

use kinet_core::Vec3;

/// Geometry of the simulation domain as seen by a step scheme.
///
/// Step schemes fold every updated absolute position through
/// [`fold`](Boundary::fold) and compute inter-particle separations with
/// [`minimum_image_displacement`](Boundary::minimum_image_displacement).
/// Both are called for every particle every step.
///
/// # Thread Safety
///
/// `Send + Sync` so integrators holding a `Box<dyn Boundary>` stay `Send`.
pub trait Boundary: Send + Sync + 'static {
    /// Map an absolute position into the primary image.
    fn fold(&self, position: Vec3) -> Vec3;

    /// Fold `position` in place.
    fn fold_in_place(&self, position: &mut Vec3) {
        *position = self.fold(*position);
    }

    /// Displacement `a - b` under this boundary's image convention.
    fn minimum_image_displacement(&self, a: Vec3, b: Vec3) -> Vec3;

    /// Length of [`minimum_image_displacement`](Boundary::minimum_image_displacement).
    fn distance(&self, a: Vec3, b: Vec3) -> f64 {
        self.minimum_image_displacement(a, b).norm()
    }

    /// Whether positions wrap around.
    fn is_periodic(&self) -> bool;

    /// Box lengths, or `None` for an unbounded domain.
    fn box_length(&self) -> Option<Vec3>;
}
