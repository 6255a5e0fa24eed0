//! Model transforms for single draw calls.
//!
//! A [`Transform`] is the scale / euler rotation / translation triple every
//! object in the scene is placed with. The composed matrix is always
//! `T * Rx * Ry * Rz * S`: scale first, then Z, Y and X rotations about the
//! world axes, translation last. The order is not commutative and changing it
//! moves every object in the scene.

use cgmath::{Deg, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};

/// Scale, rotation in degrees per axis and translation of one draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    /// Rotation around the X, Y and Z axes in degrees.
    pub rotation_deg: Vector3<f32>,
    pub translation: Vector3<f32>,
}

impl Transform {
    /// Identity transform: unit scale, no rotation, placed at the origin.
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_deg: Vector3::new(0.0, 0.0, 0.0),
            translation: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn from_parts(
        scale: Vector3<f32>,
        x_rotation_deg: f32,
        y_rotation_deg: f32,
        z_rotation_deg: f32,
        translation: Vector3<f32>,
    ) -> Self {
        Self {
            scale,
            rotation_deg: Vector3::new(x_rotation_deg, y_rotation_deg, z_rotation_deg),
            translation,
        }
    }

    pub fn normal_matrix(&self) -> Matrix3<f32> {
        normal_matrix(&self.to_matrix())
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_x(Deg(self.rotation_deg.x))
            * Matrix4::from_angle_y(Deg(self.rotation_deg.y))
            * Matrix4::from_angle_z(Deg(self.rotation_deg.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}

/// Matrix that carries object-space normals into world space: the inverse
/// transpose of the upper 3x3 of `model`.
///
/// Under a non-uniform scale the model matrix itself would tilt normals
/// towards the stretched axis. A singular `model` (zero scale on some axis)
/// has no inverse; its plain 3x3 is returned instead.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear = Matrix3::from_cols(model.x.truncate(), model.y.truncate(), model.z.truncate());
    linear.invert().map_or(linear, |inverse| inverse.transpose())
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(translation: Vector3<f32>) -> Self {
        Transform {
            translation,
            ..Default::default()
        }
    }
}

impl From<Transform> for Matrix4<f32> {
    fn from(transform: Transform) -> Self {
        transform.to_matrix()
    }
}
