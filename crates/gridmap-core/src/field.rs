//! The closed-form wave field and its gridded container.

use serde::{Deserialize, Serialize};

use crate::coords::Extent;
use crate::grid::{Grid, Mesh};

/// Angular frequency multiplier applied to both coordinates.
pub const WAVE_FREQUENCY: f64 = 4.0;

/// `cos(4 * lat_rad) + sin(4 * lon_rad)` with degrees converted by π/180.
#[inline]
pub fn field_value(lon: f64, lat: f64) -> f64 {
    (lat.to_radians() * WAVE_FREQUENCY).cos() + (lon.to_radians() * WAVE_FREQUENCY).sin()
}

/// Evaluate [`field_value`] at every mesh cell.
pub fn compute_field(mesh: &Mesh) -> Grid {
    let (rows, cols) = mesh.shape();
    let mut out = Grid::new(rows, cols, 0.0);

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        if cols > 0 {
            out.data
                .par_chunks_mut(cols)
                .enumerate()
                .for_each(|(r, row)| fill_row(mesh, r, row));
        }
    }
    #[cfg(not(feature = "threading"))]
    {
        for r in 0..rows {
            fill_row(mesh, r, &mut out.data[r * cols..(r + 1) * cols]);
        }
    }

    out
}

fn fill_row(mesh: &Mesh, r: usize, row: &mut [f64]) {
    for (c, v) in row.iter_mut().enumerate() {
        let p = mesh.point(r, c);
        *v = field_value(p.lon, p.lat);
    }
}

/// A scalar field sampled on a regular lon/lat grid.
/// Row `i` sits at `lats[i]`, column `j` at `lons[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub values: Grid,
}

impl ScalarField {
    pub fn new(lons: Vec<f64>, lats: Vec<f64>, values: Grid) -> Self {
        debug_assert_eq!(values.shape(), (lats.len(), lons.len()));
        Self { lons, lats, values }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values.get(row, col)
    }

    pub fn width(&self) -> usize {
        self.values.cols
    }

    pub fn height(&self) -> usize {
        self.values.rows
    }

    /// Bounding box spanned by the axes. Axes must be non-empty.
    pub fn extent(&self) -> Extent {
        Extent::new(
            self.lons[0],
            self.lons[self.lons.len() - 1],
            self.lats[0],
            self.lats[self.lats.len() - 1],
        )
    }

    /// Sample the field at (lon, lat) using bilinear interpolation.
    /// Returns None if (lon, lat) is outside the field bounds.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        if self.width() < 2 || self.height() < 2 {
            return None;
        }
        let ext = self.extent();
        if !ext.contains(lon, lat) {
            return None;
        }

        let fx = (lon - ext.min_lon) / ext.lon_span() * (self.width() - 1) as f64;
        let fy = (lat - ext.min_lat) / ext.lat_span() * (self.height() - 1) as f64;

        let x0 = (fx.floor() as usize).min(self.width() - 1);
        let y0 = (fy.floor() as usize).min(self.height() - 1);
        let x1 = (x0 + 1).min(self.width() - 1);
        let y1 = (y0 + 1).min(self.height() - 1);

        let tx = fx - x0 as f64;
        let ty = fy - y0 as f64;

        let v00 = self.get(y0, x0);
        let v10 = self.get(y0, x1);
        let v01 = self.get(y1, x0);
        let v11 = self.get(y1, x1);

        let v = v00 * (1.0 - tx) * (1.0 - ty)
            + v10 * tx * (1.0 - ty)
            + v01 * (1.0 - tx) * ty
            + v11 * tx * ty;

        Some(v)
    }

    pub fn min(&self) -> f64 {
        self.values.data.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
