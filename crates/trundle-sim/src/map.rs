//! Occupancy map collaborator interface.
//!
//! The simulator never consults the map: it exists purely so a display
//! frontend can draw the robot against a background grid, and so a wandering
//! policy can take the grid's world bounds as its workspace. There is no
//! collision checking here.

#![warn(missing_docs)]

use crate::error::SimError;

/// Axis-aligned rectangular workspace in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workspace {
    /// Minimum x bound (m).
    pub x_min: f64,
    /// Maximum x bound (m).
    pub x_max: f64,
    /// Minimum y bound (m).
    pub y_min: f64,
    /// Maximum y bound (m).
    pub y_max: f64,
}

impl Workspace {
    /// Creates a workspace from its corner bounds.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` if either axis has zero or
    /// negative extent.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, SimError> {
        if x_max <= x_min || y_max <= y_min {
            return Err(SimError::InvalidParameter(
                "workspace bounds must have positive extent",
            ));
        }
        Ok(Workspace {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Width of the workspace along x (m).
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the workspace along y (m).
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Whether a world point lies within the bounds (inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }
}

/// Binary occupancy grid, row-major, one cell per unit of world distance.
///
/// Cell `(0, 0)` sits at world origin; `(width - 1, height - 1)` is the
/// far corner, matching a bitmap loaded with row 0 at the bottom.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    /// Row-major cell data; `true` marks an occupied cell.
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Creates an all-free grid of the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidParameter(
                "grid dimensions must be non-zero",
            ));
        }
        Ok(OccupancyGrid {
            width,
            height,
            cells: vec![false; width * height],
        })
    }

    /// Creates a grid from row-major cell data.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` if a dimension is zero or
    /// the data length does not equal `width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidParameter(
                "grid dimensions must be non-zero",
            ));
        }
        if cells.len() != width * height {
            return Err(SimError::InvalidParameter(
                "cell data length must equal width * height",
            ));
        }
        Ok(OccupancyGrid {
            width,
            height,
            cells,
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Marks a cell occupied or free.
    ///
    /// # Errors
    ///
    /// Returns `Err(SimError::InvalidParameter)` when the cell is outside
    /// the grid.
    pub fn set_occupied(&mut self, x: usize, y: usize, occupied: bool) -> Result<(), SimError> {
        if x >= self.width || y >= self.height {
            return Err(SimError::InvalidParameter("cell index out of bounds"));
        }
        self.cells[y * self.width + x] = occupied;
        Ok(())
    }

    /// Whether a cell is occupied. Out-of-range cells read as free.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x]
    }

    /// World bounds of the grid, usable as display bounds or as the
    /// workspace of a wandering policy.
    pub fn bounds(&self) -> Workspace {
        Workspace {
            x_min: 0.0,
            x_max: self.width as f64,
            y_min: 0.0,
            y_max: self.height as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_rejects_empty_extent() {
        assert!(matches!(
            Workspace::new(0.0, 0.0, 0.0, 1.0),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            Workspace::new(0.0, 1.0, 2.0, 1.0),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_workspace_contains() {
        let ws = Workspace::new(-1.0, 1.0, 0.0, 2.0).unwrap();
        assert!(ws.contains(0.0, 1.0));
        assert!(ws.contains(-1.0, 0.0)); // boundary is inclusive
        assert!(!ws.contains(1.5, 1.0));
        assert!((ws.width() - 2.0).abs() < 1e-12);
        assert!((ws.height() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_grid_construction_and_query() {
        let mut grid = OccupancyGrid::new(4, 3).unwrap();
        assert!(!grid.is_occupied(2, 1));
        grid.set_occupied(2, 1, true).unwrap();
        assert!(grid.is_occupied(2, 1));
        assert!(!grid.is_occupied(10, 10)); // out of range reads free
        assert!(grid.set_occupied(4, 0, true).is_err());
    }

    #[test]
    fn test_grid_rejects_bad_dimensions() {
        assert!(matches!(
            OccupancyGrid::new(0, 3),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            OccupancyGrid::from_cells(2, 2, vec![false; 3]),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_grid_bounds_match_dimensions() {
        let grid = OccupancyGrid::new(200, 100).unwrap();
        let ws = grid.bounds();
        assert_eq!(ws.x_max, 200.0);
        assert_eq!(ws.y_max, 100.0);
        assert_eq!(ws.x_min, 0.0);
        assert_eq!(ws.y_min, 0.0);
    }
}
