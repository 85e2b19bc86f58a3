//! Spatial field mapper: turns loudness history into a traveling ripple.
//!
//! Each point reads the history at an offset proportional to its distance from
//! a reference origin. Farther points read further back, so advancing the read
//! pointer once per frame pushes every ring outward by one step.

use glam::{Vec2, Vec3};

use super::PointField;
use crate::error::{Result, RippleError};
use crate::params::{RadialOrigin, RippleMapping};
use crate::ripple::RippleHistory;

/// Radial coordinate of point `index` under `mapping`
///
/// Grid points measured from the grid center use grid-index distance;
/// everything else uses the length of the rest position in `distance_unit`s.
pub fn radial_distance(field: &PointField, index: usize, mapping: &RippleMapping) -> f32 {
    if mapping.origin == RadialOrigin::GridCenter {
        if let Some((ix, iy)) = field.grid_index(index) {
            let (width, depth) = field.grid_dimensions();
            let center = Vec2::new(width as f32 / 2.0, depth as f32 / 2.0);
            return Vec2::new(ix as f32, iy as f32).distance(center);
        }
    }
    Vec3::from_array(field.rest_positions()[index]).length() / mapping.distance_unit
}

/// Per-point ripple offsets plus the gains to apply to what they read
pub struct SpatialMapper {
    mapping: RippleMapping,
    offsets: Vec<i64>,
}

impl SpatialMapper {
    /// Precompute the history offset of every point in `field`
    ///
    /// Rest positions never change, so offsets are fixed for the field's lifetime.
    /// Offsets saturate at the `i64` range; a negative `offset_scale` (rejected by
    /// [`RippleMapping::validate`]) yields future offsets but never overflows.
    pub fn new(mapping: RippleMapping, field: &PointField) -> Self {
        let offsets = (0..field.len())
            .map(|index| {
                let steps = radial_distance(field, index, &mapping).round() as i64;
                mapping.offset_scale.saturating_mul(steps).saturating_neg()
            })
            .collect();

        Self { mapping, offsets }
    }

    pub fn mapping(&self) -> &RippleMapping {
        &self.mapping
    }

    /// History offsets in point order (all `<= 0` for non-negative offset scales)
    pub fn offsets(&self) -> &[i64] {
        &self.offsets
    }

    /// Largest offset magnitude requested
    ///
    /// A value above the buffer capacity means far rings alias onto stale or
    /// freshly overwritten history. This is a sizing defect, never a fault.
    pub fn max_offset(&self) -> u64 {
        self.offsets
            .iter()
            .map(|o| o.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Write this frame's values into `displacement` and `scale` without
    /// advancing the read pointer
    ///
    /// # Errors
    /// `RippleError::LengthMismatch` if either array does not match the field.
    pub fn map_into<H: RippleHistory + ?Sized>(
        &self,
        history: &H,
        displacement: &mut [f32],
        scale: &mut [f32],
    ) -> Result<()> {
        check_len("displacement", self.offsets.len(), displacement.len())?;
        check_len("scale", self.offsets.len(), scale.len())?;

        let targets = self.mapping.targets;
        for (i, &offset) in self.offsets.iter().enumerate() {
            let value = history.read(offset);
            if targets.displacement() {
                displacement[i] = value * self.mapping.displacement_gain;
            }
            if targets.scale() {
                scale[i] = value * self.mapping.scale_gain;
            }
        }
        Ok(())
    }

    /// Map every point of `field`, then advance the read pointer exactly once
    pub fn render_frame<H: RippleHistory + ?Sized>(
        &self,
        history: &mut H,
        field: &mut PointField,
    ) -> Result<()> {
        let (displacement, scale) = field.attributes_mut();
        self.map_into(&*history, displacement, scale)?;
        history.advance_read_pointer();
        Ok(())
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(RippleError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
