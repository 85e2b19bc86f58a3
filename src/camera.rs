//! Pointer-following camera rig.
//!
//! The eye drifts toward a target derived from the pointer's offset from the
//! window center and always looks at the origin.

use glam::{Mat4, Vec2, Vec3};

use crate::params::{CameraFollow, RenderConfig};

/// Camera that eases toward the pointer each frame
pub struct CameraRig {
    params: CameraFollow,
    eye: Vec3,
    /// Pointer offset from window center, in world units (screen Y down)
    pointer: Vec2,
}

impl CameraRig {
    /// Create a rig at `start_distance` along +Z, pointer centered
    pub fn new(params: CameraFollow) -> Self {
        let eye = Vec3::new(0.0, 0.0, params.start_distance);
        Self {
            params,
            eye,
            pointer: Vec2::ZERO,
        }
    }

    /// Record a pointer position in window pixels
    pub fn set_pointer(&mut self, x: f64, y: f64, window_size: (u32, u32)) {
        let half = Vec2::new(window_size.0 as f32, window_size.1 as f32) / 2.0;
        self.pointer = (Vec2::new(x as f32, y as f32) - half) * self.params.pointer_gain;
    }

    /// Move the eye `smoothing` of the way toward the pointer target
    ///
    /// Call once per rendered frame.
    pub fn update(&mut self) -> Vec3 {
        let s = self.params.smoothing;
        self.eye.x += (self.pointer.x - self.eye.x) * s;
        self.eye.y += (-self.pointer.y - self.eye.y) * s;
        self.eye
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, render_config: &RenderConfig) -> (Mat4, Vec3) {
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane,
            render_config.far_plane,
        );

        (proj * view, self.eye)
    }
}
