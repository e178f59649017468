//! Boundary trait compliance test helpers.
//!
//! These functions verify that a Boundary implementation satisfies the
//! invariants required by the trait contract. Reused across all backend
//! test modules (PeriodicBoundary, OpenBoundary).

use crate::boundary::Boundary;
use kinet_core::Vec3;

/// Sample points spread over several periodic images in every octant.
fn sample_points() -> Vec<Vec3> {
    let coords = [-37.25, -5.5, -0.75, 0.0, 0.125, 2.5, 9.75, 41.0];
    let mut points = Vec::new();
    for &x in &coords {
        for &y in &coords {
            for &z in &[-13.5, 0.25, 7.0] {
                points.push(Vec3::new(x, y, z));
            }
        }
    }
    points
}

/// Assert that folding twice equals folding once.
pub fn assert_fold_idempotent(boundary: &dyn Boundary) {
    for p in sample_points() {
        let once = boundary.fold(p);
        let twice = boundary.fold(once);
        assert_eq!(once, twice, "fold not idempotent at {p}");
    }
}

/// Assert that folded points lie in `[0, len)` on every periodic axis.
pub fn assert_fold_in_primary_image(boundary: &dyn Boundary) {
    let Some(len) = boundary.box_length() else {
        return;
    };
    for p in sample_points() {
        let f = boundary.fold(p);
        for k in 0..3 {
            assert!(
                f[k] >= 0.0 && f[k] < len[k],
                "fold({p})[{k}] = {} outside [0, {})",
                f[k],
                len[k]
            );
        }
    }
}

/// Assert that `fold_in_place` agrees with `fold`.
pub fn assert_fold_in_place_matches(boundary: &dyn Boundary) {
    for p in sample_points() {
        let mut q = p;
        boundary.fold_in_place(&mut q);
        assert_eq!(q, boundary.fold(p), "fold_in_place disagrees at {p}");
    }
}

/// Assert `d(a, b) == -d(b, a)` and `d(a, a) == 0`.
pub fn assert_displacement_antisymmetric(boundary: &dyn Boundary) {
    let points = sample_points();
    for a in points.iter().step_by(7) {
        assert_eq!(boundary.minimum_image_displacement(*a, *a).norm(), 0.0);
        for b in points.iter().step_by(5) {
            let dab = boundary.minimum_image_displacement(*a, *b);
            let dba = boundary.minimum_image_displacement(*b, *a);
            assert_eq!(dab, -dba, "d({a},{b}) is not the negation of d({b},{a})");
        }
    }
}

/// Assert that displacements are invariant under folding either endpoint.
pub fn assert_displacement_fold_invariant(boundary: &dyn Boundary) {
    let points = sample_points();
    for a in points.iter().step_by(3) {
        for b in points.iter().step_by(11) {
            let raw = boundary.minimum_image_displacement(*a, *b);
            let folded = boundary.minimum_image_displacement(boundary.fold(*a), boundary.fold(*b));
            let delta = boundary.minimum_image_displacement(raw, folded);
            assert!(
                delta.norm() < 1e-9,
                "displacement changed under folding: {raw} vs {folded}"
            );
        }
    }
}

/// Run all compliance checks.
pub fn run_full_compliance(boundary: &dyn Boundary) {
    assert_fold_idempotent(boundary);
    assert_fold_in_primary_image(boundary);
    assert_fold_in_place_matches(boundary);
    assert_displacement_antisymmetric(boundary);
    assert_displacement_fold_invariant(boundary);
}
