//! View Camera
//!
//! Perspective camera with a free orientation. Window-system agnostic: the
//! host only reports viewport size, and the renderer reads the matrices.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

/// Perspective camera: position, orientation and projection.
#[derive(Debug, Clone)]
pub struct ViewCamera {
    pub position: Vec3,
    /// Orientation; the camera looks down its local -Z with +Y up
    pub rotation: Quat,
    pub projection: Projection,
    pub aspect: f32,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::new(Projection::default(), 16.0 / 9.0)
    }
}

impl ViewCamera {
    pub fn new(projection: Projection, aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection,
            aspect,
        }
    }

    /// Recompute the aspect ratio from a viewport size.
    ///
    /// Zero-sized viewports (minimized windows) keep the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Orient the camera toward `target` with world +Y as up.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() < 1e-12 {
            return;
        }
        let forward = to_target.normalize();
        // Looking straight up or down leaves +Y degenerate as an up hint
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(self.position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.rotation = rotation.normalize();
    }

    /// Move along the camera's own up axis.
    pub fn translate_local_y(&mut self, distance: f32) {
        self.position += self.up() * distance;
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.world_matrix().inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.projection.fov_deg.to_radians(),
            self.aspect,
            self.projection.near,
            self.projection.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
