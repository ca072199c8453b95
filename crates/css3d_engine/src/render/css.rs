//! CSS matrix serialization
//!
//! The scene graph is right-handed Y-up and column-major; the presentation
//! surface is Y-down with row-vector semantics. The two formatters bridge
//! the conventions by negating a fixed set of components: flat indices
//! 1, 5, 9, 13 (the second row) for the camera, flat indices 4, 5, 6, 7
//! (the second column) for objects. The asymmetry is contractual —
//! downstream consumers depend on the exact sign pattern — and must not be
//! "fixed".
//!
//! Every component passes through [`stabilize`] so floating-point noise
//! from the matrix math cannot produce a new string for an unchanged
//! transform, which would defeat the write caches.

use std::fmt::Write;

use crate::foundation::math::Mat4;

/// Values with magnitude below this serialize as exactly zero
pub const ZERO_TOLERANCE: f64 = 1e-10;

/// Snap near-zero values to exactly zero
///
/// Pure; values at or above the tolerance pass through unchanged.
pub fn stabilize(value: f64) -> f64 {
    if value.abs() < ZERO_TOLERANCE {
        0.0
    } else {
        value
    }
}

/// Serialize a camera world-inverse matrix as `matrix3d(...)`
///
/// Negates the second row (flat indices 1, 5, 9, 13) to flip from Y-up
/// world space to the surface's Y-down pixels. The negation is applied
/// before stabilization, so a negated noise term still snaps to `0`.
pub fn camera_css_matrix(matrix: &Mat4) -> String {
    format_matrix3d(matrix, &[1, 5, 9, 13])
}

/// Serialize an object world matrix as `translate(-50%,-50%)matrix3d(...)`
///
/// Negates the second column (flat indices 4, 5, 6, 7). The leading
/// `translate(-50%,-50%)` recenters the element's top-left anchored box on
/// its transform origin before the 3D transform applies.
pub fn object_css_matrix(matrix: &Mat4) -> String {
    let mut out = String::with_capacity(192);
    out.push_str("translate(-50%,-50%)");
    write_matrix3d(&mut out, matrix, &[4, 5, 6, 7]);
    out
}

fn format_matrix3d(matrix: &Mat4, negated: &[usize]) -> String {
    let mut out = String::with_capacity(160);
    write_matrix3d(&mut out, matrix, negated);
    out
}

/// Emit `matrix3d(...)` from the column-major component slice, negating
/// the given flat indices. No spaces, no validation: malformed matrices
/// serialize garbage-in/garbage-out.
fn write_matrix3d(out: &mut String, matrix: &Mat4, negated: &[usize]) {
    out.push_str("matrix3d(");
    for (index, component) in matrix.as_slice().iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        let value = if negated.contains(&index) {
            -component
        } else {
            *component
        };
        let _ = write!(out, "{}", stabilize(value));
    }
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};

    #[test]
    fn stabilize_snaps_below_tolerance() {
        assert_eq!(stabilize(1e-11), 0.0);
        assert_eq!(stabilize(-1e-11), 0.0);
        assert_eq!(stabilize(0.0), 0.0);
        assert_eq!(stabilize(-0.0), 0.0);
    }

    #[test]
    fn stabilize_passes_values_at_or_above_tolerance() {
        assert_eq!(stabilize(1e-10), 1e-10);
        assert_eq!(stabilize(-1e-10), -1e-10);
        assert_eq!(stabilize(2.5), 2.5);
        assert_eq!(stabilize(-2.5), -2.5);
    }

    #[test]
    fn camera_identity_flips_second_row() {
        assert_eq!(
            camera_css_matrix(&Mat4::identity()),
            "matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,0,0,0,1)"
        );
    }

    #[test]
    fn object_identity_flips_second_column_and_recenters() {
        assert_eq!(
            object_css_matrix(&Mat4::identity()),
            "translate(-50%,-50%)matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,0,0,0,1)"
        );
    }

    #[test]
    fn object_translation_components_are_not_negated() {
        let matrix = Mat4::new_translation(&Vec3::new(10.0, 20.0, 30.0));
        assert_eq!(
            object_css_matrix(&matrix),
            "translate(-50%,-50%)matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,10,20,30,1)"
        );
    }

    #[test]
    fn camera_negation_is_self_canceling() {
        let mut matrix = Mat4::new_translation(&Vec3::new(3.0, -7.0, 1.5));
        matrix[(1, 1)] = 0.25;

        // Pre-negate the components the formatter negates; the output must
        // then carry the original values verbatim.
        let mut pre_negated = matrix;
        let components = pre_negated.as_mut_slice();
        for index in [1, 5, 9, 13] {
            components[index] = -components[index];
        }

        let expected: Vec<String> = matrix
            .as_slice()
            .iter()
            .map(|component| stabilize(*component).to_string())
            .collect();
        assert_eq!(
            camera_css_matrix(&pre_negated),
            format!("matrix3d({})", expected.join(","))
        );
    }

    #[test]
    fn noise_does_not_change_the_string() {
        let mut noisy = Mat4::identity();
        noisy[(2, 0)] = 3e-16;
        noisy[(0, 2)] = -9e-12;
        assert_eq!(
            object_css_matrix(&noisy),
            object_css_matrix(&Mat4::identity())
        );
    }
}
