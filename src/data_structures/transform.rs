//! Model transforms built from scale, per-axis rotation and translation.
//!
//! Every object in a scene is placed independently in world space. There is no
//! parent/child composition: a [`Transform`] always maps straight from the local
//! frame of a primitive mesh into the world.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (in degrees around X, Y and Z) and position of one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    /// Identity transform: unit scale, no rotation, placed at the origin.
    pub fn new() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn rotated(mut self, x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        self.rotation = Vector3::new(x_deg, y_deg, z_deg);
        self
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vector3::new(x, y, z);
        self
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        compose(
            self.scale,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.position,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vector3<f32>> for Transform {
    fn from(position: Vector3<f32>) -> Self {
        Transform {
            position,
            ..Default::default()
        }
    }
}

/// Combine scale, rotation and translation into one model matrix.
///
/// The product is always `translation * rot_z * rot_y * rot_x * scale`: a vertex is
/// scaled first, then rotated around X, Y and Z in that order, then moved. Every
/// scene coordinate is authored against this order, so it must not change.
pub fn compose(
    scale: Vector3<f32>,
    x_rotation_deg: f32,
    y_rotation_deg: f32,
    z_rotation_deg: f32,
    translation: Vector3<f32>,
) -> Matrix4<f32> {
    let scale = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    let rotation_x = Matrix4::from_angle_x(Deg(x_rotation_deg));
    let rotation_y = Matrix4::from_angle_y(Deg(y_rotation_deg));
    let rotation_z = Matrix4::from_angle_z(Deg(z_rotation_deg));
    let translation = Matrix4::from_translation(translation);

    translation * rotation_z * rotation_y * rotation_x * scale
}
