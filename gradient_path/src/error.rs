//! Error types for the sampling and outlining pipeline

use thiserror::Error;

/// Everything that can abort a sampling or render request.
#[derive(Error, Debug)]
pub enum GradientPathError {
    /// A count, width or precision outside its allowed range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A segment too small to take part in outlining or join averaging
    #[error("Segment {segment} has {points} points, need at least {required}")]
    DegenerateGeometry {
        segment: usize,
        points: usize,
        required: usize,
    },

    /// The curve reported a non-finite length or coordinate
    #[error("Curve produced a non-finite {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Failed to parse SVG path: {0}")]
    PathParse(#[from] kurbo::SvgParseError),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GradientPathError>;

pub(crate) fn ensure_finite(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GradientPathError::NonFinite { what, value })
    }
}
