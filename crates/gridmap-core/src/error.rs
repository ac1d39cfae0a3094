use thiserror::Error;

/// Errors raised while validating a custom grid description or contour levels.
/// The fixed default grid never produces one.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("{axis} axis needs at least 2 points, got {count}")]
    TooFewPoints { axis: &'static str, count: usize },

    #[error("{axis} axis endpoints must be finite (start={start}, stop={stop})")]
    NonFinite { axis: &'static str, start: f64, stop: f64 },

    #[error("{axis} axis must be increasing (start={start}, stop={stop})")]
    EmptyRange { axis: &'static str, start: f64, stop: f64 },

    #[error("{axis} axis [{start}, {stop}] leaves the valid range [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        start: f64,
        stop: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid contour levels: {0}")]
    InvalidLevels(String),

    #[error("failed to parse grid spec: {0}")]
    Parse(#[from] serde_json::Error),
}
