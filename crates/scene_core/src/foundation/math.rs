//! Math utilities and types
//!
//! Provides the nalgebra aliases and the spatial transform used by every
//! entity in the scene.

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Transform representing position, rotation, and scale
///
/// Rotation is stored as Euler angles in radians and applied in XYZ order,
/// so the composed matrix is `T * Rx * Ry * Rz * S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Euler rotation (radians, XYZ order)
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
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

    /// Builder pattern: Set Euler rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation part of the transform as a homogeneous matrix
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_matrix()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_translation_moves_point() {
        let transform = Transform::from_position(Vec3::new(-1.5, 2.0, 0.0));
        let moved = transform.transform_point(Point3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(-1.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_about_y() {
        // X rotated a quarter turn about Y lands on -Z in a right-handed frame
        let transform = Transform::identity().with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let rotated = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Point3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_order_is_xyz() {
        let rotation = Vec3::new(0.3, 0.7, -0.2);
        let transform = Transform::identity().with_rotation(rotation);
        let expected = Mat4::rotation_x(0.3) * Mat4::rotation_y(0.7) * Mat4::rotation_z(-0.2);
        assert_relative_eq!(transform.rotation_matrix(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_scale_applied_before_translation() {
        let transform = Transform::from_position(Vec3::new(1.0, 0.0, 0.0))
            .with_scale(Vec3::new(2.0, 2.0, 2.0));
        let moved = transform.transform_point(Point3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(moved, Point3::new(3.0, 2.0, 0.0), epsilon = EPSILON);
    }
}
