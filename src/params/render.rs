//! Rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    /// Large enough to keep the far edge of a 50x100 grid in view
    pub far_plane: f32,

    /// Sprite size factor: pixels = scale * point_size / view depth
    pub point_size: f32,

    /// Sprite color (linear RGB)
    pub color: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 1.0,
            far_plane: 10000.0,
            point_size: 300.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}
