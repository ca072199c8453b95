//! Billboard orientation matrix calculation
//!
//! A billboard must face the camera regardless of its own rotation, while
//! still sitting at its own position and honoring its own scale. Starting
//! from the transposed camera world-inverse gives the camera-aligned basis
//! directly, so no general look-at solve is needed.

use crate::foundation::math::{Mat4, Vec3};

/// Compute the effective transform for a camera-facing node
///
/// * `world_inverse` - the camera's world-inverse matrix
/// * `world` - the node's world matrix; only its position and scale
///   survive, any rotation or skew is discarded
/// * `rotation` - in-plane rotation in radians, applied after
///   camera-facing alignment
///
/// The steps, in order:
/// 1. transpose the camera world-inverse (aligns the node's axes with the
///    camera's orientation, ignoring camera position)
/// 2. right-multiply by a rotation about the view axis when `rotation` is
///    non-zero
/// 3. overwrite the translation column with the node's world position
/// 4. scale the basis columns by the node's world scale
/// 5. force the bottom row to `(0, 0, 0, 1)`, discarding the residual
///    projective terms the transpose moved there
pub fn billboard_matrix(world_inverse: &Mat4, world: &Mat4, rotation: f64) -> Mat4 {
    let mut matrix = world_inverse.transpose();

    if rotation != 0.0 {
        matrix *= Mat4::new_rotation(Vec3::new(0.0, 0.0, rotation));
    }

    matrix[(0, 3)] = world[(0, 3)];
    matrix[(1, 3)] = world[(1, 3)];
    matrix[(2, 3)] = world[(2, 3)];

    let scale = world_scale(world);
    for row in 0..4 {
        matrix[(row, 0)] *= scale.x;
        matrix[(row, 1)] *= scale.y;
        matrix[(row, 2)] *= scale.z;
    }

    matrix[(3, 0)] = 0.0;
    matrix[(3, 1)] = 0.0;
    matrix[(3, 2)] = 0.0;
    matrix[(3, 3)] = 1.0;

    matrix
}

/// Extract the per-axis scale of a world matrix as its basis column norms
///
/// Sign information is lost; a negatively scaled billboard renders
/// mirrored-as-positive, which is accepted.
fn world_scale(world: &Mat4) -> Vec3 {
    Vec3::new(
        Vec3::new(world[(0, 0)], world[(1, 0)], world[(2, 0)]).norm(),
        Vec3::new(world[(0, 1)], world[(1, 1)], world[(2, 1)]).norm(),
        Vec3::new(world[(0, 2)], world[(1, 2)], world[(2, 2)]).norm(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat3, Point3, Transform, Quat, Vec3};
    use crate::scene::Camera;
    use approx::assert_relative_eq;

    fn rotation_block(matrix: &Mat4) -> Mat3 {
        matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    #[test]
    fn billboard_faces_the_camera() {
        let mut camera = Camera::default();
        camera.look_at(Point3::new(4.0, -2.0, 7.0), Point3::new(1.0, 0.5, -3.0), Vec3::y());

        let world = Mat4::new_translation(&Vec3::new(10.0, 20.0, 30.0));
        let matrix = billboard_matrix(camera.world_inverse(), &world, 0.0);

        // In camera space the billboard's basis is the identity rotation.
        let composed = rotation_block(camera.world_inverse()) * rotation_block(&matrix);
        assert_relative_eq!(composed, Mat3::identity(), epsilon = 1e-9);
    }

    #[test]
    fn billboard_keeps_world_position_and_scale() {
        let mut camera = Camera::default();
        camera.look_at(Point3::new(0.0, 3.0, 3.0), Point3::origin(), Vec3::y());

        let mut transform = Transform::from_position(Vec3::new(-5.0, 2.0, 9.0));
        transform.rotation = Quat::from_axis_angle(&Vec3::x_axis(), 1.1);
        transform.scale = Vec3::new(2.0, 3.0, 4.0);
        let world = transform.to_matrix();

        let matrix = billboard_matrix(camera.world_inverse(), &world, 0.0);
        assert_relative_eq!(matrix[(0, 3)], -5.0, epsilon = 1e-12);
        assert_relative_eq!(matrix[(1, 3)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(matrix[(2, 3)], 9.0, epsilon = 1e-12);

        let scale = world_scale(&matrix);
        assert_relative_eq!(scale, Vec3::new(2.0, 3.0, 4.0), epsilon = 1e-9);
    }

    #[test]
    fn bottom_row_is_homogeneous() {
        let mut camera = Camera::default();
        camera.look_at(Point3::new(1.0, 2.0, 3.0), Point3::origin(), Vec3::y());

        let matrix = billboard_matrix(camera.world_inverse(), &Mat4::identity(), 0.7);
        assert_eq!(matrix[(3, 0)], 0.0);
        assert_eq!(matrix[(3, 1)], 0.0);
        assert_eq!(matrix[(3, 2)], 0.0);
        assert_eq!(matrix[(3, 3)], 1.0);
    }

    #[test]
    fn in_plane_rotation_spins_about_the_view_axis() {
        let camera = Camera::default();

        // Identity camera: the billboard basis is the in-plane rotation
        // itself.
        let matrix = billboard_matrix(
            camera.world_inverse(),
            &Mat4::identity(),
            std::f64::consts::FRAC_PI_2,
        );
        let x_axis = Vec3::new(matrix[(0, 0)], matrix[(1, 0)], matrix[(2, 0)]);
        assert_relative_eq!(x_axis, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }
}
