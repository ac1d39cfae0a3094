//! Grid and field generation: axes → mesh → field.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::linspace;
use crate::error::GridError;
use crate::field::{compute_field, ScalarField};
use crate::grid::{build_mesh, Grid, Mesh};

// ── Fixed grid ────────────────────────────────────────────────────────────────

pub const LON_START: f64 = -80.0;
pub const LON_STOP: f64 = 80.0;
pub const LAT_START: f64 = 30.0;
pub const LAT_STOP: f64 = 70.0;
/// Points per axis.
pub const AXIS_POINTS: usize = 25;

// ── Specs ─────────────────────────────────────────────────────────────────────

/// One evenly spaced axis over the closed interval `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub start: f64,
    pub stop: f64,
    pub count: usize,
}

impl AxisSpec {
    pub fn new(start: f64, stop: f64, count: usize) -> Self {
        Self { start, stop, count }
    }

    pub fn values(&self) -> Vec<f64> {
        linspace(self.start, self.stop, self.count)
    }

    fn validate(&self, axis: &'static str, min: f64, max: f64) -> Result<(), GridError> {
        if self.count < 2 {
            return Err(GridError::TooFewPoints { axis, count: self.count });
        }
        if !self.start.is_finite() || !self.stop.is_finite() {
            return Err(GridError::NonFinite { axis, start: self.start, stop: self.stop });
        }
        if self.start >= self.stop {
            return Err(GridError::EmptyRange { axis, start: self.start, stop: self.stop });
        }
        if self.start < min || self.stop > max {
            return Err(GridError::OutOfRange {
                axis,
                start: self.start,
                stop: self.stop,
                min,
                max,
            });
        }
        Ok(())
    }
}

/// Longitude and latitude axes of the generated grid.
/// Defaults to the fixed 25×25 grid over lon [-80, 80], lat [30, 70].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub lon: AxisSpec,
    pub lat: AxisSpec,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            lon: AxisSpec::new(LON_START, LON_STOP, AXIS_POINTS),
            lat: AxisSpec::new(LAT_START, LAT_STOP, AXIS_POINTS),
        }
    }
}

impl GridSpec {
    /// Parse and validate a JSON grid spec.
    pub fn from_json_str(s: &str) -> Result<Self, GridError> {
        let spec: GridSpec = serde_json::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        self.lon.validate("longitude", -180.0, 180.0)?;
        self.lat.validate("latitude", -90.0, 90.0)
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Produces the coordinate axes, mesh and scalar field for a grid spec.
#[derive(Debug, Clone, Default)]
pub struct GridFieldGenerator {
    spec: GridSpec,
}

impl GridFieldGenerator {
    /// Generator for the fixed default grid.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spec(spec: GridSpec) -> Result<Self, GridError> {
        spec.validate()?;
        Ok(Self { spec })
    }

    pub fn generate_longitudes(&self) -> Vec<f64> {
        self.spec.lon.values()
    }

    pub fn generate_latitudes(&self) -> Vec<f64> {
        self.spec.lat.values()
    }

    pub fn build_mesh(&self, lons: &[f64], lats: &[f64]) -> Mesh {
        build_mesh(lons, lats)
    }

    pub fn compute_field(&self, mesh: &Mesh) -> Grid {
        compute_field(mesh)
    }

    /// Run the whole pipeline:
    ///   1. Longitude axis
    ///   2. Latitude axis
    ///   3. Mesh expansion
    ///   4. Field evaluation
    pub fn generate(&self) -> ScalarField {
        let lons = self.generate_longitudes();
        let lats = self.generate_latitudes();
        let mesh = self.build_mesh(&lons, &lats);
        let values = self.compute_field(&mesh);
        debug!(rows = values.rows, cols = values.cols, "computed scalar field");
        ScalarField::new(lons, lats, values)
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
