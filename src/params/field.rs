//! Point field layout and ripple mapping parameters.

use std::path::PathBuf;

use crate::error::{Result, RippleError};

/// Point field layout (built once at setup)
#[derive(Debug, Clone)]
pub struct FieldLayout {
    /// Grid points along X
    pub width: usize,

    /// Grid points along Z
    pub depth: usize,

    /// Distance between neighbouring grid points (world units)
    pub spacing: f32,

    /// Scale every point starts with before the first mapped frame
    pub initial_scale: f32,

    /// Optional `x,y,z` vertex list placed ahead of the generated grid
    pub vertex_file: Option<PathBuf>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            width: 50,
            depth: 50,
            spacing: 100.0,
            initial_scale: 1.0,
            vertex_file: None,
        }
    }
}

impl FieldLayout {
    /// Number of generated grid points (saturates; `validate` rejects overflow)
    pub fn grid_points(&self) -> usize {
        self.width.saturating_mul(self.depth)
    }

    /// Validate configuration (spacing must be finite and positive, grid size
    /// must fit in `usize`)
    pub fn validate(&self) -> Result<()> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(RippleError::InvalidConfig(format!(
                "grid spacing must be > 0, got {}",
                self.spacing
            )));
        }
        let Some(grid_points) = self.width.checked_mul(self.depth) else {
            return Err(RippleError::InvalidConfig(format!(
                "grid of {}x{} points is too large",
                self.width, self.depth
            )));
        };
        if grid_points == 0 && self.vertex_file.is_none() {
            return Err(RippleError::InvalidConfig(
                "point field is empty: grid is 0 points and no vertex list given".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reference origin for a point's radial coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadialOrigin {
    /// Distance in grid-index space from the grid center (width/2, depth/2).
    /// Imported points have no grid index and fall back to `RestPosition`.
    #[default]
    GridCenter,

    /// Euclidean length of the 3D rest position, in `distance_unit`s
    RestPosition,
}

/// Which per-point attributes the mapper overwrites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingTargets {
    Displacement,
    Scale,
    #[default]
    Both,
}

impl MappingTargets {
    pub fn displacement(self) -> bool {
        matches!(self, Self::Displacement | Self::Both)
    }

    pub fn scale(self) -> bool {
        matches!(self, Self::Scale | Self::Both)
    }
}

/// Mapping from loudness history to per-point attributes
#[derive(Debug, Clone)]
pub struct RippleMapping {
    /// Ripple history slots
    /// Must cover the largest offset the field requests, else far rings alias
    pub capacity: usize,

    /// History slots per unit of radial distance
    /// Formula: offset = -(offset_scale * round(distance))
    pub offset_scale: i64,

    /// World units per unit of radial distance (RestPosition origin only)
    pub distance_unit: f32,

    /// Reference origin for the radial coordinate
    pub origin: RadialOrigin,

    /// Attributes written each frame
    pub targets: MappingTargets,

    /// Displacement (world units) per unit loudness
    pub displacement_gain: f32,

    /// Sprite scale per unit loudness
    pub scale_gain: f32,
}

impl Default for RippleMapping {
    fn default() -> Self {
        Self {
            capacity: 200, // 4 * default grid depth
            offset_scale: 3,
            distance_unit: 1.0,
            origin: RadialOrigin::GridCenter,
            targets: MappingTargets::Both,
            displacement_gain: 100.0,
            scale_gain: 300.0,
        }
    }
}

impl RippleMapping {
    /// Validate configuration (capacity and distance unit must be positive,
    /// offset scale non-negative so every offset points into the past)
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RippleError::InvalidCapacity(self.capacity));
        }
        if self.offset_scale < 0 {
            return Err(RippleError::InvalidConfig(format!(
                "offset scale must be >= 0, got {}",
                self.offset_scale
            )));
        }
        if !(self.distance_unit.is_finite() && self.distance_unit > 0.0) {
            return Err(RippleError::InvalidConfig(format!(
                "distance unit must be > 0, got {}",
                self.distance_unit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_capacity_sizing() {
        let layout = FieldLayout::default();
        let mapping = RippleMapping::default();

        assert_eq!(layout.grid_points(), 2500);
        assert_eq!(mapping.capacity, 4 * layout.depth);
        assert!(layout.validate().is_ok());
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mapping = RippleMapping {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(
            mapping.validate(),
            Err(RippleError::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_negative_offset_scale_rejected() {
        for offset_scale in [-1, -(1_i64 << 62), i64::MIN] {
            let mapping = RippleMapping {
                offset_scale,
                ..Default::default()
            };
            assert!(matches!(
                mapping.validate(),
                Err(RippleError::InvalidConfig(_))
            ));
        }

        let mapping = RippleMapping {
            offset_scale: 0,
            ..Default::default()
        };
        assert!(mapping.validate().is_ok());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let layout = FieldLayout {
            width: usize::MAX,
            depth: 2,
            ..Default::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(RippleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_empty_field_rejected() {
        let layout = FieldLayout {
            width: 0,
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_mapping_targets() {
        assert!(MappingTargets::Both.displacement());
        assert!(MappingTargets::Both.scale());
        assert!(!MappingTargets::Scale.displacement());
        assert!(!MappingTargets::Displacement.scale());
    }
}
