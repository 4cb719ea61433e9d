//! Row-major sampling grid with a concentration accumulator
//!
//! The grid covers the network's planar bounding box with `R` evenly spaced
//! sample coordinates per axis, inclusive of both bounds, and carries a
//! same-shaped accumulator initialized to zero. Cell `(i, j)` samples
//! `(xs[j], ys[i])` and lives at flat index `i·R + j`; all outputs preserve
//! this row-major order for reproducibility.
//!
//! One grid is owned exclusively by one simulation run. The per-cell update
//! is parallelized with rayon: every cell is independent, and each cell sums
//! its sources in a fixed order, so results are deterministic.

use crate::core_types::geometry::{BoundingBox, PlanarPoint};
use rayon::prelude::*;

/// `count` evenly spaced values from `start` to `stop`, inclusive of both.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// `R × R` mesh of planar sample points plus the concentration accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {
    resolution: usize,
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
}

impl SamplingGrid {
    /// Build a grid covering `bounds` at the given per-axis resolution.
    /// Deterministic for identical bounds and resolution.
    #[must_use]
    #[track_caller]
    pub fn from_bounds(bounds: &BoundingBox, resolution: usize) -> Self {
        assert!(resolution > 0, "SamplingGrid: resolution must be positive");
        SamplingGrid {
            resolution,
            xs: linspace(bounds.min_x, bounds.max_x, resolution),
            ys: linspace(bounds.min_y, bounds.max_y, resolution),
            values: vec![0.0; resolution * resolution],
        }
    }

    /// Per-axis resolution `R`
    #[inline]
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total cell count, `R × R`
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid has no cells
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample coordinate of the cell at flat index `i·R + j`
    #[inline]
    #[must_use]
    pub fn point_at(&self, index: usize) -> PlanarPoint {
        PlanarPoint::new(
            self.xs[index % self.resolution],
            self.ys[index / self.resolution],
        )
    }

    /// Accumulated value of the cell at a flat index
    #[inline]
    #[must_use]
    pub fn value_at(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// All accumulated values in row-major order
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Replace every cell's value with `f(point, value)`, in parallel.
    pub fn update_cells<F>(&mut self, f: F)
    where
        F: Fn(PlanarPoint, f64) -> f64 + Sync,
    {
        let resolution = self.resolution;
        let xs = &self.xs;
        let ys = &self.ys;
        self.values
            .par_iter_mut()
            .enumerate()
            .for_each(|(index, value)| {
                let point = PlanarPoint::new(xs[index % resolution], ys[index / resolution]);
                *value = f(point, *value);
            });
    }

    /// Largest accumulated value (0.0 for an all-zero grid).
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Rescale the grid to `[0, 1]` by its maximum, returning the
    /// pre-normalization maximum. A zero maximum leaves the grid untouched
    /// (divisor 1): an all-zero field stays all-zero.
    pub fn normalize(&mut self) -> f64 {
        let max = self.max_value();
        if max > 0.0 {
            for value in &mut self.values {
                *value /= max;
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_includes_both_bounds() {
        let values = linspace(0.0, 10.0, 5);
        assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(linspace(3.0, 7.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_grid_is_row_major() {
        let bounds = BoundingBox::new(0.0, 0.0, 2.0, 20.0);
        let grid = SamplingGrid::from_bounds(&bounds, 3);
        // Index i·R + j samples (xs[j], ys[i]): x varies fastest.
        assert_eq!(grid.point_at(0), PlanarPoint::new(0.0, 0.0));
        assert_eq!(grid.point_at(1), PlanarPoint::new(1.0, 0.0));
        assert_eq!(grid.point_at(3), PlanarPoint::new(0.0, 10.0));
        assert_eq!(grid.point_at(8), PlanarPoint::new(2.0, 20.0));
    }

    #[test]
    fn test_update_cells_sees_coordinates() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let mut grid = SamplingGrid::from_bounds(&bounds, 2);
        grid.update_cells(|point, value| value + point.x + 10.0 * point.y);
        assert_relative_eq!(grid.value_at(0), 0.0);
        assert_relative_eq!(grid.value_at(1), 1.0);
        assert_relative_eq!(grid.value_at(2), 10.0);
        assert_relative_eq!(grid.value_at(3), 11.0);
    }

    #[test]
    fn test_normalize_rescales_to_unit_interval() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let mut grid = SamplingGrid::from_bounds(&bounds, 2);
        grid.update_cells(|point, _| point.x + point.y);
        let max = grid.normalize();
        assert_relative_eq!(max, 2.0);
        assert_relative_eq!(grid.max_value(), 1.0);
        assert!(grid.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_normalize_of_zero_grid_is_noop() {
        let bounds = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let mut grid = SamplingGrid::from_bounds(&bounds, 4);
        let max = grid.normalize();
        assert_eq!(max, 0.0);
        assert!(grid.values().iter().all(|v| *v == 0.0));
    }
}
