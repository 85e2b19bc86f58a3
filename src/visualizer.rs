//! Render-loop context: ripple history, point field, mapper and camera.
//!
//! Owned by the render loop and advanced once per rendered frame. The capture
//! side only ever sees the matching [`RippleWriter`].

use log::{info, warn};

use crate::camera::CameraRig;
use crate::error::{Result, RippleError};
use crate::field::{PointField, SpatialMapper};
use crate::params::{CameraFollow, RippleMapping};
use crate::ripple::{ripple_channel, RippleHistory, RippleReader, RippleWriter};

/// Everything the render loop mutates each frame
pub struct Visualizer<H: RippleHistory> {
    history: H,
    field: PointField,
    mapper: SpatialMapper,
    camera: CameraRig,
    frames_rendered: u64,
}

impl Visualizer<RippleReader> {
    /// Build a visualizer over a lock-free history, returning the writer half
    /// for the capture thread
    pub fn with_shared_history(
        field: PointField,
        mapping: RippleMapping,
        camera: CameraFollow,
    ) -> Result<(Self, RippleWriter)> {
        mapping.validate()?;
        let (writer, reader) = ripple_channel(mapping.capacity)?;
        let visualizer = Self::new(reader, field, mapping, camera)?;
        Ok((visualizer, writer))
    }
}

impl<H: RippleHistory> Visualizer<H> {
    /// Assemble a visualizer around an existing history
    ///
    /// # Errors
    /// Invalid mapping or camera parameters, or a history whose capacity differs
    /// from `mapping.capacity`.
    pub fn new(
        history: H,
        field: PointField,
        mapping: RippleMapping,
        camera: CameraFollow,
    ) -> Result<Self> {
        mapping.validate()?;
        camera.validate()?;
        if history.capacity() != mapping.capacity {
            return Err(RippleError::LengthMismatch {
                what: "ripple history capacity",
                expected: mapping.capacity,
                actual: history.capacity(),
            });
        }

        let mapper = SpatialMapper::new(mapping, &field);
        let max_offset = mapper.max_offset();
        if max_offset > history.capacity() as u64 {
            warn!(
                "Ripple offsets reach {} slots but the history holds {}: far rings will alias",
                max_offset,
                history.capacity()
            );
        }
        info!(
            "Ripple history: {} slots, max offset {}",
            history.capacity(),
            max_offset
        );

        Ok(Self {
            history,
            field,
            mapper,
            camera: CameraRig::new(camera),
            frames_rendered: 0,
        })
    }

    /// Advance one rendered frame: ease the camera, map every point from the
    /// ripple history, then advance the read pointer once
    pub fn render_frame(&mut self) -> Result<()> {
        self.camera.update();
        self.mapper.render_frame(&mut self.history, &mut self.field)?;
        self.frames_rendered += 1;
        Ok(())
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn mapper(&self) -> &SpatialMapper {
        &self.mapper
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
