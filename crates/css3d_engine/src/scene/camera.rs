//! Camera and projection parameters
//!
//! The renderer needs exactly three things from a camera: its
//! world-inverse matrix, its projection kind, and the projection matrix's
//! vertical focal element. The camera therefore stores the world-inverse
//! directly (set via [`Camera::look_at`] or [`Camera::set_world_inverse`])
//! instead of living in the scene graph; there is no lazy world-matrix
//! refresh to run.
//!
//! # Coordinate System
//! Right-handed Y-up world space. The CSS serializer performs the flip to
//! the presentation surface's Y-down pixel convention.

use crate::foundation::math::{Mat4, Point3, Vec3};

/// Projection parameters for a [`Camera`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Perspective frustum
    Perspective {
        /// Vertical field of view in radians
        fov_y: f64,
        /// Viewport aspect ratio (width / height)
        aspect: f64,
        /// Near clipping plane distance
        near: f64,
        /// Far clipping plane distance
        far: f64,
    },

    /// Orthographic box
    Orthographic {
        /// Left frustum extent
        left: f64,
        /// Right frustum extent
        right: f64,
        /// Top frustum extent
        top: f64,
        /// Bottom frustum extent
        bottom: f64,
        /// Near clipping plane distance
        near: f64,
        /// Far clipping plane distance
        far: f64,
    },
}

/// Camera projecting the scene onto the presentation surface
#[derive(Debug, Clone)]
pub struct Camera {
    world_inverse: Mat4,
    projection: Projection,
}

impl Camera {
    /// Create a perspective camera at the origin looking down -Z
    ///
    /// `fov_y_degrees` is converted to radians internally, following the
    /// convention that public APIs take degrees.
    pub fn perspective(fov_y_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            world_inverse: Mat4::identity(),
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
                aspect,
                near,
                far,
            },
        }
    }

    /// Create an orthographic camera at the origin looking down -Z
    pub fn orthographic(
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
        near: f64,
        far: f64,
    ) -> Self {
        Self {
            world_inverse: Mat4::identity(),
            projection: Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            },
        }
    }

    /// Place the camera at `eye` looking at `target`
    ///
    /// Recomputes the world-inverse matrix from the pose; `up` steadies
    /// the camera's roll and need not be perpendicular to the view
    /// direction.
    pub fn look_at(&mut self, eye: Point3, target: Point3, up: Vec3) {
        self.world_inverse = Mat4::look_at_rh(&eye, &target, &up);
        log::trace!("camera look_at - eye: {eye:?}, target: {target:?}");
    }

    /// Set the world-inverse matrix directly
    ///
    /// For callers that already maintain camera transforms elsewhere. No
    /// validation is performed; a non-invertible or non-rigid matrix
    /// flows through to the CSS output as-is.
    pub fn set_world_inverse(&mut self, world_inverse: Mat4) {
        self.world_inverse = world_inverse;
    }

    /// The world-inverse (view) matrix
    pub fn world_inverse(&self) -> &Mat4 {
        &self.world_inverse
    }

    /// The projection parameters
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replace the projection parameters
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    /// Whether this is a perspective camera
    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, Projection::Perspective { .. })
    }

    /// Update the aspect ratio for viewport changes
    ///
    /// No-op for orthographic cameras. Only logs significant changes
    /// (> 0.01) to reduce noise during window resize events.
    pub fn set_aspect_ratio(&mut self, aspect: f64) {
        if let Projection::Perspective {
            aspect: current, ..
        } = &mut self.projection
        {
            if (*current - aspect).abs() > 0.01 {
                log::info!("camera aspect ratio changed: {:.3} -> {:.3}", current, aspect);
            }
            *current = aspect;
        }
    }

    /// Build the projection matrix
    ///
    /// The `(1, 1)` element is the vertical focal scale the renderer
    /// multiplies by the half-viewport height to derive the CSS
    /// perspective length.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::new_perspective(aspect, fov_y, near, far),
            Projection::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            } => Mat4::new_orthographic(left, right, bottom, top, near, far),
        }
    }
}

impl Default for Camera {
    /// A 45-degree perspective camera with a widescreen aspect ratio
    fn default() -> Self {
        Self::perspective(45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_focal_element_matches_fov() {
        let camera = Camera::perspective(45.0, 4.0 / 3.0, 0.1, 100.0);
        let expected = 1.0 / (45.0_f64.to_radians() / 2.0).tan();
        assert_relative_eq!(
            camera.projection_matrix()[(1, 1)],
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn orthographic_focal_element_matches_extents() {
        let camera = Camera::orthographic(-400.0, 400.0, 300.0, -300.0, 0.1, 100.0);
        assert_relative_eq!(
            camera.projection_matrix()[(1, 1)],
            2.0 / 600.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn look_at_inverts_eye_translation() {
        let mut camera = Camera::default();
        camera.look_at(Point3::new(0.0, 0.0, 5.0), Point3::origin(), Vec3::y());

        // A point at the eye maps to the view-space origin.
        let eye = camera.world_inverse().transform_point(&Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(eye.coords.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn identity_pose_looks_down_negative_z() {
        let camera = Camera::default();
        assert_eq!(*camera.world_inverse(), Mat4::identity());
        assert!(camera.is_perspective());
    }
}
