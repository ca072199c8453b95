//! Math utilities and types
//!
//! Provides fundamental math types for the projection engine. All scalars
//! are `f64`: the CSS serializer snaps values below 1e-10 to zero, which
//! only makes sense when the matrix math itself is carried out well below
//! that tolerance.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f64>;

/// 3D vector type
pub type Vec3 = Vector3<f64>;

/// 4D vector type
pub type Vec4 = Vector4<f64>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f64>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f64>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f64>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f64>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}
