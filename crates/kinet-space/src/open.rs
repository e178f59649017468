//! Unbounded domain.

use crate::boundary::Boundary;
use kinet_core::Vec3;

/// An unbounded domain: folding is the identity and displacements are
/// plain differences.
///
/// The default boundary of a freshly constructed integrator.
///
/// ```
/// use kinet_core::Vec3;
/// use kinet_space::{Boundary, OpenBoundary};
///
/// let open = OpenBoundary;
/// let p = Vec3::new(-1e6, 3.0, 1e6);
/// assert_eq!(open.fold(p), p);
/// assert_eq!(open.box_length(), None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenBoundary;

impl Boundary for OpenBoundary {
    fn fold(&self, position: Vec3) -> Vec3 {
        position
    }

    fn minimum_image_displacement(&self, a: Vec3, b: Vec3) -> Vec3 {
        a - b
    }

    fn is_periodic(&self) -> bool {
        false
    }

    fn box_length(&self) -> Option<Vec3> {
        None
    }
}
