//! Math utilities and types
//!
//! Provides the fundamental math types shared by the collider, placement and
//! resolver code. The world is Y-up; the walkable plane is XZ.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3};

/// 2D vector type, used for XZ ground-plane coordinates
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

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

    /// Create a transform from position, Euler rotation (radians) and scale
    pub fn from_parts(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: quat_from_euler(euler),
            scale,
        }
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }
}

/// Build a rotation from Euler angles in radians, applied X then Y then Z.
pub fn quat_from_euler(euler: Vec3) -> Quat {
    Quat::from_euler_angles(euler.x, euler.y, euler.z)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Round to one decimal place (used for direction keys and normal classes)
    pub fn round_to_tenth(value: f32) -> f32 {
        (value * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_point_applies_scale_then_rotation_then_translation() {
        let transform = Transform {
            position: Vec3::new(1.0, 0.0, 0.0),
            rotation: quat_from_euler(Vec3::new(0.0, constants::PI * 0.5, 0.0)),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };

        let point = transform.transform_point(Vec3::new(1.0, 0.0, 0.0));
        // (2,0,0) rotated 90 degrees about Y is (0,0,-2)
        assert_relative_eq!(point, Vec3::new(1.0, 0.0, -2.0), epsilon = 1e-5);

        let via_matrix = transform.to_matrix().transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(via_matrix.coords, point, epsilon = 1e-5);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_relative_eq!(utils::round_to_tenth(0.707), 0.7);
        assert_relative_eq!(utils::round_to_tenth(-0.96), -1.0);
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI);
    }
}
