//! # Grid Layout
//!
//! Deterministic placement of N images on a row-wrapped grid.
//!
//! The coordinate system is the drawing sheet's: X grows rightward, Y grows
//! *upward*, so successive rows step down by subtracting from Y.
//!
//! ```text
//! index:   0   1   2        columns = 3
//!          3   4   5
//!          6   ...
//!
//! x = start_x + (index % columns) * (width + spacing)
//! y = start_y - (index / columns) * (height + spacing)
//! ```
//!
//! Index 0 always lands exactly on `(start_x, start_y)`.

use serde::{Deserialize, Serialize};

/// Parameters for grid layout calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayoutParams {
    /// X coordinate of the first cell
    pub start_x: f64,
    /// Y coordinate of the first cell
    pub start_y: f64,
    /// Cell (image) width
    pub width: f64,
    /// Cell (image) height
    pub height: f64,
    /// Number of columns; values below 1 are treated as 1
    pub columns: i32,
    /// Gap between neighboring cells, both directions
    pub spacing: f64,
}

impl Default for GridLayoutParams {
    fn default() -> Self {
        Self {
            start_x: 0.0,
            start_y: 0.0,
            width: 50.0,
            height: 50.0,
            columns: 1,
            spacing: 10.0,
        }
    }
}

/// A computed cell position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridPosition {
    pub x: f64,
    pub y: f64,
}

/// Position of cell `index` in a row-wrapped grid.
///
/// `columns` is clamped to at least 1, so a zero or negative column count
/// degrades to a single column rather than dividing by zero.
pub fn grid_position(
    index: usize,
    columns: i32,
    spacing: f64,
    start_x: f64,
    start_y: f64,
    width: f64,
    height: f64,
) -> GridPosition {
    let columns = columns.max(1) as usize;

    let col = index % columns;
    let row = index / columns;

    GridPosition {
        x: start_x + col as f64 * (width + spacing),
        y: start_y - row as f64 * (height + spacing),
    }
}

impl GridLayoutParams {
    /// Position of cell `index` under these parameters.
    pub fn position(&self, index: usize) -> GridPosition {
        grid_position(
            index,
            self.columns,
            self.spacing,
            self.start_x,
            self.start_y,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_zero_is_origin() {
        for columns in [1, 3, 7] {
            let pos = grid_position(0, columns, 10.0, 12.5, -3.0, 50.0, 20.0);
            assert_eq!(pos.x, 12.5);
            assert_eq!(pos.y, -3.0);
        }
    }

    #[test]
    fn test_single_column_walks_down() {
        // columns = 1: x stays put, y drops by (height + spacing) per index
        for index in 0..6 {
            let pos = grid_position(index, 1, 10.0, 5.0, 100.0, 50.0, 20.0);
            assert_eq!(pos.x, 5.0);
            assert_eq!(pos.y, 100.0 - index as f64 * 30.0);
        }
    }

    #[test]
    fn test_wide_grid_walks_right() {
        // columns >= count: y stays put, x advances by (width + spacing)
        for index in 0..6 {
            let pos = grid_position(index, 10, 10.0, 0.0, 40.0, 50.0, 20.0);
            assert_eq!(pos.x, index as f64 * 60.0);
            assert_eq!(pos.y, 40.0);
        }
    }

    #[test]
    fn test_row_wrapping() {
        // index 5 with 3 columns: col 2, row 1
        let pos = grid_position(5, 3, 10.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(pos.x, 120.0);
        assert_eq!(pos.y, -60.0);

        // index 6 wraps to col 0, row 2
        let pos = grid_position(6, 3, 10.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(pos.x, 0.0);
        assert_eq!(pos.y, -120.0);
    }

    #[test]
    fn test_columns_clamped_to_one() {
        let zero = grid_position(4, 0, 10.0, 0.0, 0.0, 50.0, 50.0);
        let negative = grid_position(4, -5, 10.0, 0.0, 0.0, 50.0, 50.0);
        let one = grid_position(4, 1, 10.0, 0.0, 0.0, 50.0, 50.0);
        assert_eq!(zero, one);
        assert_eq!(negative, one);
    }

    #[test]
    fn test_params_position_matches_free_function() {
        let params = GridLayoutParams {
            start_x: 10.0,
            start_y: 200.0,
            width: 40.0,
            height: 25.0,
            columns: 4,
            spacing: 5.0,
        };
        for index in 0..12 {
            assert_eq!(
                params.position(index),
                grid_position(index, 4, 5.0, 10.0, 200.0, 40.0, 25.0)
            );
        }
    }

    #[test]
    fn test_default_params() {
        let params = GridLayoutParams::default();
        assert_eq!(params.width, 50.0);
        assert_eq!(params.height, 50.0);
        assert_eq!(params.columns, 1);
        assert_eq!(params.spacing, 10.0);
    }
}
