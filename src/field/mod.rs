//! Point field: fixed rest positions plus per-frame displacement and scale.

mod grid;
mod import;
mod mapper;

// Re-export public types
pub use grid::{generate_grid, grid_coords};
pub use import::{load_vertex_list, parse_vertex_list};
pub use mapper::{radial_distance, SpatialMapper};

use log::info;

use crate::error::Result;
use crate::params::FieldLayout;

/// Renderable points with rest positions and derived per-frame attributes
///
/// Imported points (if any) come first, followed by the generated grid.
#[derive(Debug, Clone)]
pub struct PointField {
    rest_positions: Vec<[f32; 3]>,
    displacement: Vec<f32>,
    scale: Vec<f32>,
    imported: usize,
    grid_width: usize,
    grid_depth: usize,
}

impl PointField {
    /// Build the field described by `layout`, loading its vertex list if set
    pub fn build(layout: &FieldLayout) -> Result<Self> {
        layout.validate()?;

        let imported = match &layout.vertex_file {
            Some(path) => load_vertex_list(path)?,
            None => Vec::new(),
        };
        let field = Self::from_parts(imported, layout);

        info!(
            "Point field: {} points ({} imported, {}x{} grid)",
            field.len(),
            field.imported,
            layout.width,
            layout.depth
        );
        Ok(field)
    }

    /// Concatenate `imported` rest positions with the grid described by `layout`
    pub fn from_parts(imported: Vec<[f32; 3]>, layout: &FieldLayout) -> Self {
        let imported_count = imported.len();
        let mut rest_positions = imported;
        rest_positions.extend(generate_grid(layout));

        let count = rest_positions.len();
        Self {
            rest_positions,
            displacement: vec![0.0; count],
            scale: vec![layout.initial_scale; count],
            imported: imported_count,
            grid_width: layout.width,
            grid_depth: layout.depth,
        }
    }

    pub fn len(&self) -> usize {
        self.rest_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest_positions.is_empty()
    }

    /// Number of imported points at the front of the field
    pub fn imported_count(&self) -> usize {
        self.imported
    }

    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.grid_width, self.grid_depth)
    }

    /// Grid indices `(ix, iy)` of point `index`, or `None` for imported points
    pub fn grid_index(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.imported || index >= self.len() {
            return None;
        }
        Some(grid_coords(index - self.imported, self.grid_depth))
    }

    pub fn rest_positions(&self) -> &[[f32; 3]] {
        &self.rest_positions
    }

    pub fn displacement(&self) -> &[f32] {
        &self.displacement
    }

    pub fn scale(&self) -> &[f32] {
        &self.scale
    }

    /// Mutable displacement and scale arrays, in point order
    pub fn attributes_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.displacement, &mut self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_field_creation() {
        let layout = FieldLayout::default();
        let field = PointField::build(&layout).unwrap();

        assert_eq!(field.len(), layout.width * layout.depth);
        assert_eq!(field.displacement().len(), field.len());
        assert_eq!(field.scale().len(), field.len());
        assert!(field.scale().iter().all(|&s| s == layout.initial_scale));
        assert!(field.displacement().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_imported_points_precede_grid() {
        let layout = FieldLayout {
            width: 2,
            depth: 2,
            spacing: 1.0,
            initial_scale: 0.0,
            vertex_file: None,
        };
        let field = PointField::from_parts(vec![[9.0, 9.0, 9.0]], &layout);

        assert_eq!(field.len(), 5);
        assert_eq!(field.imported_count(), 1);
        assert_eq!(field.rest_positions()[0], [9.0, 9.0, 9.0]);
        assert_eq!(field.grid_index(0), None);
        assert_eq!(field.grid_index(1), Some((0, 0)));
        assert_eq!(field.grid_index(4), Some((1, 1)));
        assert_eq!(field.grid_index(5), None);
        assert!(field.scale().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_overflowing_grid_fails_build() {
        let layout = FieldLayout {
            width: usize::MAX / 2,
            depth: 3,
            ..Default::default()
        };
        assert!(matches!(
            PointField::build(&layout),
            Err(crate::error::RippleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_missing_vertex_file_fails_build() {
        let layout = FieldLayout {
            vertex_file: Some("/nonexistent/ripplefield/mesh.csv".into()),
            ..Default::default()
        };
        assert!(PointField::build(&layout).is_err());
    }
}
