use serde::{Deserialize, Serialize};

use crate::coords::LatLon;

/// A dense 2D array of f64, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Row-major values, `rows * cols` long.
    pub data: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    /// Create a new Grid filled with the given value.
    pub fn new(rows: usize, cols: usize, fill: f64) -> Self {
        Self { data: vec![fill; rows * cols], rows, cols }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: f64) {
        self.data[row * self.cols + col] = val;
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

/// Full cross product of two coordinate axes.
///
/// Rows follow latitude and columns follow longitude, so
/// `lon.get(i, j) == lons[j]` and `lat.get(i, j) == lats[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub lon: Grid,
    pub lat: Grid,
}

impl Mesh {
    pub fn shape(&self) -> (usize, usize) {
        self.lon.shape()
    }

    /// Coordinates of cell `(row, col)`.
    #[inline]
    pub fn point(&self, row: usize, col: usize) -> LatLon {
        LatLon::new(self.lat.get(row, col), self.lon.get(row, col))
    }
}

/// Expand two 1D axes into the lon/lat mesh.
pub fn build_mesh(lons: &[f64], lats: &[f64]) -> Mesh {
    let rows = lats.len();
    let cols = lons.len();
    Mesh {
        lon: Grid::from_fn(rows, cols, |_, c| lons[c]),
        lat: Grid::from_fn(rows, cols, |r, _| lats[r]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_rows_follow_latitude_and_columns_longitude() {
        let lons = [10.0, 20.0, 30.0];
        let lats = [-5.0, 5.0];
        let mesh = build_mesh(&lons, &lats);

        assert_eq!(mesh.shape(), (2, 3));
        assert_eq!(mesh.lat.shape(), (2, 3));
        for r in 0..2 {
            assert_eq!(mesh.lon.row(r), &lons);
            assert!(mesh.lat.row(r).iter().all(|&v| v == lats[r]));
        }
        assert_eq!(mesh.point(1, 0), LatLon::new(5.0, 10.0));
    }

    #[test]
    fn empty_axis_gives_empty_mesh() {
        let mesh = build_mesh(&[], &[1.0, 2.0]);
        assert_eq!(mesh.shape(), (2, 0));
        assert!(mesh.lon.data.is_empty());
    }

    #[test]
    fn set_then_get() {
        let mut g = Grid::new(2, 2, 0.0);
        g.set(1, 0, 4.5);
        assert_eq!(g.get(1, 0), 4.5);
        assert_eq!(g.data, vec![0.0, 0.0, 4.5, 0.0]);
    }
}
