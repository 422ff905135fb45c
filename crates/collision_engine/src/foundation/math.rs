//! Math utilities and types
//!
//! Provides fundamental math types for 3D collision geometry.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (RGBA colors, homogeneous points)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid transform: rotation followed by translation, no scale
///
/// Bounding volume half-widths are only meaningful under rigid transforms,
/// so this type deliberately has no scale component.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Transform {
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Shortest-arc rotation taking direction `from` onto direction `to`
    ///
    /// Anti-parallel inputs rotate by pi about an axis orthogonal to `from`.
    /// Zero-length inputs yield the identity.
    fn rotation_between(from: &Vec3, to: &Vec3) -> Mat4;

    /// Upper-left 3x3 block, translation discarded
    fn rotation_part(&self) -> Mat3;

    /// The `index`-th basis column (local axis expressed in world space)
    fn axis(&self, index: usize) -> Vec3;

    /// Translation column
    fn translation_part(&self) -> Vec3;
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

    fn rotation_between(from: &Vec3, to: &Vec3) -> Mat4 {
        if let Some(rotation) = Quat::rotation_between(from, to) {
            return rotation.to_homogeneous();
        }

        // Either an input is zero or the two directions are opposite
        let Some(from_dir) = Unit::try_new(*from, f32::EPSILON) else {
            return Mat4::identity();
        };
        if to.norm_squared() <= f32::EPSILON {
            return Mat4::identity();
        }

        let mut orthogonal = from_dir.cross(&Vec3::x());
        if orthogonal.norm_squared() <= f32::EPSILON {
            orthogonal = from_dir.cross(&Vec3::y());
        }
        Mat4::from_axis_angle(&Unit::new_normalize(orthogonal), constants::PI)
    }

    fn rotation_part(&self) -> Mat3 {
        self.fixed_view::<3, 3>(0, 0).into_owned()
    }

    fn axis(&self, index: usize) -> Vec3 {
        self.fixed_view::<3, 1>(0, index).into_owned()
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self.m14, self.m24, self.m34)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_axis_reads_rotated_columns() {
        let m = Mat4::new_translation(&Vec3::new(4.0, 5.0, 6.0)) * Mat4::rotation_z(constants::HALF_PI);

        assert_relative_eq!(m.axis(0), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(m.axis(1), Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(m.axis(2), Vec3::new(0.0, 0.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(m.translation_part(), Vec3::new(4.0, 5.0, 6.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_part_drops_translation() {
        let m = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_x(0.3);
        let expected = Mat4::rotation_x(0.3).fixed_view::<3, 3>(0, 0).into_owned();

        assert_relative_eq!(m.rotation_part(), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_between_maps_direction() {
        let to = Vec3::new(1.0, 1.0, 0.0).normalize();
        let rotation = Mat4::rotation_between(&Vec3::z(), &to);

        assert_relative_eq!(rotation.transform_vector(&Vec3::z()), to, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_between_opposite_directions() {
        let rotation = Mat4::rotation_between(&Vec3::z(), &-Vec3::z());

        assert_relative_eq!(rotation.transform_vector(&Vec3::z()), -Vec3::z(), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_to_matrix_has_no_scale() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), 0.7);
        let transform = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), rotation);
        let matrix = transform.to_matrix();

        for i in 0..3 {
            assert_relative_eq!(matrix.axis(i).norm(), 1.0, epsilon = EPSILON);
        }
        assert_relative_eq!(matrix.translation_part(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
