//! Camera follow configuration.

use crate::error::{Result, RippleError};

/// Pointer-driven camera follow parameters
#[derive(Debug, Clone)]
pub struct CameraFollow {
    /// Fraction of the remaining distance to the target covered per frame
    /// 0.05 = slow, floaty follow
    pub smoothing: f32,

    /// Initial eye distance from the origin along +Z (world units)
    pub start_distance: f32,

    /// World units of camera travel per pixel of pointer offset
    pub pointer_gain: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            smoothing: 0.05,
            start_distance: 2500.0, // Half the default grid depth (50 * 100 / 2)
            pointer_gain: 1.0,
        }
    }
}

impl CameraFollow {
    /// Validate configuration (smoothing must lie in (0, 1])
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(RippleError::InvalidConfig(format!(
                "camera smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}
