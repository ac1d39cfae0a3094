//! Coastline polylines loaded from GeoJSON.
//!
//! Accepts a FeatureCollection, a Feature or a bare geometry. LineString,
//! MultiLineString, Polygon and MultiPolygon contribute lines (polygon rings
//! are drawn as their outlines); other geometry types are ignored.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::Rgb;
use serde_json::Value;
use tracing::debug;

use crate::figure::Figure;
use crate::projection::GeoAxes;

/// Successive points further apart than this in longitude are assumed to
/// wrap around the antimeridian and are not joined.
const WRAP_THRESHOLD_DEG: f64 = 180.0;

/// A set of (lon, lat) polylines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coastlines {
    pub lines: Vec<Vec<(f64, f64)>>,
}

impl Coastlines {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_geojson_str(&text)
            .with_context(|| format!("invalid coastline GeoJSON in {}", path.display()))
    }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let mut out = Coastlines::default();
        collect(&root, &mut out.lines)?;
        debug!(lines = out.lines.len(), "parsed coastlines");
        Ok(out)
    }

    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    /// Draw every polyline onto the axes, clipped to the axes rectangle.
    pub fn draw(&self, fig: &mut Figure, ax: &GeoAxes, color: Rgb<u8>) {
        let clip = ax.rect();
        for line in &self.lines {
            for pair in line.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if (b.0 - a.0).abs() > WRAP_THRESHOLD_DEG {
                    continue;
                }
                fig.draw_line(ax.to_pixel(a.0, a.1), ax.to_pixel(b.0, b.1), color, clip);
            }
        }
    }
}

fn collect(node: &Value, lines: &mut Vec<Vec<(f64, f64)>>) -> Result<()> {
    let kind = node.get("type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "FeatureCollection" => {
            let features = node
                .get("features")
                .and_then(Value::as_array)
                .context("FeatureCollection without a features array")?;
            for f in features {
                collect(f, lines)?;
            }
        }
        "Feature" => match node.get("geometry") {
            Some(Value::Null) | None => {}
            Some(g) => collect(g, lines)?,
        },
        "GeometryCollection" => {
            if let Some(geoms) = node.get("geometries").and_then(Value::as_array) {
                for g in geoms {
                    collect(g, lines)?;
                }
            }
        }
        "LineString" => lines.push(positions(coordinates(node)?)?),
        "MultiLineString" | "Polygon" => {
            for ring in as_array(coordinates(node)?)? {
                lines.push(positions(ring)?);
            }
        }
        "MultiPolygon" => {
            for polygon in as_array(coordinates(node)?)? {
                for ring in as_array(polygon)? {
                    lines.push(positions(ring)?);
                }
            }
        }
        "Point" | "MultiPoint" => {}
        "" => bail!("GeoJSON object without a type"),
        other => bail!("unsupported GeoJSON type {other:?}"),
    }
    Ok(())
}

fn coordinates(node: &Value) -> Result<&Value> {
    node.get("coordinates").context("geometry without coordinates")
}

fn as_array(v: &Value) -> Result<&Vec<Value>> {
    v.as_array().context("expected a coordinate array")
}

fn positions(v: &Value) -> Result<Vec<(f64, f64)>> {
    as_array(v)?
        .iter()
        .map(|p| {
            let p = as_array(p)?;
            match (p.first().and_then(Value::as_f64), p.get(1).and_then(Value::as_f64)) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => bail!("position must hold two numbers"),
            }
        })
        .collect()
}
