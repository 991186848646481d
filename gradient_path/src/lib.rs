//! Cutting 2D curves into colorable segments for gradient strokes and
//! gradient-filled ribbons.
//!
//! A [`Curve`] is sampled at even arc-length steps into overlapping
//! [`Segment`]s. Each segment can be stroked as is, or outlined into a closed
//! polygon whose joins with its neighbours are averaged so the filled ribbon
//! has no seams.

pub mod config;
pub mod curve;
pub mod error;
pub mod joins;
pub mod outline;
pub mod render;
pub mod sample;
pub mod sampler;
pub mod svg;

pub use config::{DEFAULT_PRECISION, GradientPathConfig};
pub use curve::{BezPathCurve, Curve};
pub use error::{GradientPathError, Result};
pub use joins::average_joins;
pub use outline::{StrokeOutliner, outline_segments};
pub use render::{
    ElementKind, GradientPath, MarkerSample, RenderCycle, RenderData, RenderRequest, RenderSink,
    flatten_segments,
};
pub use sample::{MAX_PRECISION, Sample, Segment, round_to_precision};
pub use sampler::{CurveSampler, SingleSamplePolicy};
pub use svg::{SvgDocument, segment_to_d};

/// Sample `curve` into `segments` overlapping segments of
/// `samples_per_segment` samples each.
pub fn sample_curve<C: Curve + ?Sized>(
    curve: &C,
    segments: usize,
    samples_per_segment: usize,
    precision: Option<u32>,
) -> Result<Vec<Segment>> {
    CurveSampler::new(segments, samples_per_segment)
        .with_precision(precision)
        .sample(curve)
}

/// Turn stroked segments into fillable ones.
///
/// Every segment is outlined to `width`, then the edges where neighbouring
/// outlines meet are averaged. `path_closed` decides whether the last
/// segment also joins the first.
pub fn stroke_to_fill(
    segments: &[Segment],
    width: f64,
    precision: Option<u32>,
    path_closed: bool,
) -> Result<Vec<Segment>> {
    let outlined = outline_segments(segments, width, precision)?;
    average_joins(outlined, precision, path_closed)
}
