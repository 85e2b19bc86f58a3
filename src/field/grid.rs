//! Regular grid generation.

use crate::params::FieldLayout;

/// Rest positions of a `width x depth` grid on the XZ plane, centered on the origin
///
/// Point `(ix, iy)` sits at index `ix * depth + iy` with
/// `x = width * spacing / 2 - ix * spacing` and `z = depth * spacing / 2 - iy * spacing`.
pub fn generate_grid(layout: &FieldLayout) -> Vec<[f32; 3]> {
    let half_x = (layout.width as f32 * layout.spacing) / 2.0;
    let half_z = (layout.depth as f32 * layout.spacing) / 2.0;

    let mut positions = Vec::with_capacity(layout.grid_points());
    for ix in 0..layout.width {
        for iy in 0..layout.depth {
            positions.push([
                half_x - ix as f32 * layout.spacing,
                0.0,
                half_z - iy as f32 * layout.spacing,
            ]);
        }
    }
    positions
}

/// Grid indices `(ix, iy)` of the point at `index`
#[inline]
pub fn grid_coords(index: usize, depth: usize) -> (usize, usize) {
    (index / depth, index % depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_point_count() {
        let layout = FieldLayout {
            width: 7,
            depth: 3,
            ..Default::default()
        };
        assert_eq!(generate_grid(&layout).len(), 21);
    }

    #[test]
    fn test_grid_layout_order() {
        let layout = FieldLayout {
            width: 2,
            depth: 3,
            spacing: 10.0,
            ..Default::default()
        };
        let grid = generate_grid(&layout);

        assert_eq!(grid[0], [10.0, 0.0, 15.0]);
        assert_eq!(grid[1], [10.0, 0.0, 5.0]);
        assert_eq!(grid[3], [0.0, 0.0, 15.0]);
        assert_eq!(grid[5], [0.0, 0.0, -5.0]);
        assert!(grid.iter().all(|p| p[1] == 0.0));
    }

    #[test]
    fn test_grid_coords_round_trip_index() {
        let depth = 50;
        assert_eq!(grid_coords(0, depth), (0, 0));
        assert_eq!(grid_coords(49, depth), (0, 49));
        assert_eq!(grid_coords(50, depth), (1, 0));
        assert_eq!(grid_coords(2499, depth), (49, 49));
    }
}
