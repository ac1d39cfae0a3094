//! Contour level selection and band classification.
//!
//! Automatic levels land on round multiples of 1, 2, 2.5 or 5 × 10^k and
//! cover the data range with at most `max_bins` bands.

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Default upper bound on the number of filled bands: 7 requested levels
/// plus one, as matplotlib's `contourf` asks its MaxNLocator for.
pub const DEFAULT_MAX_BINS: usize = 8;

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// How contour levels are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContourLevels {
    Auto { max_bins: usize },
    Explicit(Vec<f64>),
}

impl Default for ContourLevels {
    fn default() -> Self {
        ContourLevels::Auto { max_bins: DEFAULT_MAX_BINS }
    }
}

impl ContourLevels {
    /// Resolve to concrete ascending levels for data in `[min, max]`.
    pub fn resolve(&self, min: f64, max: f64) -> Result<Vec<f64>, GridError> {
        match self {
            ContourLevels::Auto { max_bins } => nice_levels(min, max, *max_bins),
            ContourLevels::Explicit(levels) => {
                if levels.len() < 2 {
                    return Err(GridError::InvalidLevels(format!(
                        "need at least 2 levels, got {}",
                        levels.len()
                    )));
                }
                if levels.iter().any(|l| !l.is_finite()) {
                    return Err(GridError::InvalidLevels("levels must be finite".into()));
                }
                if levels.windows(2).any(|w| w[1] <= w[0]) {
                    return Err(GridError::InvalidLevels("levels must be strictly increasing".into()));
                }
                Ok(levels.clone())
            }
        }
    }
}

/// Ascending, uniformly spaced "nice" levels bracketing `[min, max]`.
pub fn nice_levels(min: f64, max: f64, max_bins: usize) -> Result<Vec<f64>, GridError> {
    if max_bins == 0 {
        return Err(GridError::InvalidLevels("max_bins must be at least 1".into()));
    }
    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(GridError::InvalidLevels(format!("bad data range [{min}, {max}]")));
    }
    if min == max {
        // Flat data: one band around the value.
        let half = if min == 0.0 { 1.0 } else { min.abs() * 0.5 };
        return Ok(vec![min - half, min + half]);
    }

    let raw = (max - min) / max_bins as f64;
    let magnitude = 10f64.powf(raw.log10().floor());

    for mult in NICE_STEPS {
        let step = mult * magnitude;
        let lo = (min / step).floor();
        let hi = (max / step).ceil();
        let bins = (hi - lo).round() as usize;
        if bins <= max_bins {
            return Ok((0..=bins).map(|k| (lo + k as f64) * step).collect());
        }
    }

    // floor/ceil can add one bin past the 10x step.
    let step = 20.0 * magnitude;
    let lo = (min / step).floor();
    let hi = (max / step).ceil();
    let bins = (hi - lo).round() as usize;
    Ok((0..=bins).map(|k| (lo + k as f64) * step).collect())
}

/// Band `k` such that `levels[k] < value <= levels[k + 1]`; the lowest
/// band also includes `levels[0]`. None for NaN or values outside the levels.
pub fn band_index(value: f64, levels: &[f64]) -> Option<usize> {
    if levels.len() < 2 || value.is_nan() {
        return None;
    }
    let last = levels.len() - 1;
    if value < levels[0] || value > levels[last] {
        return None;
    }
    if value == levels[0] {
        return Some(0);
    }
    // partition_point gives the count of levels < value, at least 1 here.
    Some(levels.partition_point(|&l| l < value) - 1)
}
