//! Turning sampled data into drawable elements through a [`RenderSink`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GradientPathConfig;
use crate::curve::Curve;
use crate::error::{GradientPathError, Result};
use crate::sample::{Sample, Segment};
use crate::stroke_to_fill;

/// What kind of elements a render call produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// One stroked sub-path per raw segment
    Stroke { stroke_width: f64 },
    /// One filled polygon per segment, outlined to `width`
    FillPolygon { width: f64 },
    /// One circle of diameter `width` per sample
    PointMarker { width: f64 },
}

impl ElementKind {
    pub fn class_name(&self) -> &'static str {
        match self {
            ElementKind::Stroke { .. } => "stroke",
            ElementKind::FillPolygon { .. } => "fill-polygon",
            ElementKind::PointMarker { .. } => "point-marker",
        }
    }

    fn validate(&self) -> Result<()> {
        let (name, value, allow_zero) = match *self {
            ElementKind::Stroke { stroke_width } => ("stroke width", stroke_width, true),
            ElementKind::FillPolygon { width } => ("fill width", width, false),
            ElementKind::PointMarker { width } => ("marker width", width, false),
        };
        let in_range = if allow_zero { value >= 0.0 } else { value > 0.0 };
        if value.is_finite() && in_range {
            Ok(())
        } else {
            Err(GradientPathError::InvalidArgument(format!(
                "{name} out of range: {value}"
            )))
        }
    }
}

/// A render call: the element kind plus a function from progress to color.
pub struct RenderRequest<F> {
    pub kind: ElementKind,
    pub color: F,
}

impl<F> RenderRequest<F> {
    pub fn new(kind: ElementKind, color: F) -> Self {
        Self { kind, color }
    }

    pub fn stroke(stroke_width: f64, color: F) -> Self {
        Self::new(ElementKind::Stroke { stroke_width }, color)
    }

    pub fn fill(width: f64, color: F) -> Self {
        Self::new(ElementKind::FillPolygon { width }, color)
    }

    pub fn markers(width: f64, color: F) -> Self {
        Self::new(ElementKind::PointMarker { width }, color)
    }
}

/// A sample tagged with the index of the segment it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSample {
    pub segment: usize,
    pub sample: Sample,
}

/// Flatten segments into their samples in order.
///
/// Samples shared between neighbouring segments appear once per segment.
pub fn flatten_segments(segments: &[Segment]) -> Vec<MarkerSample> {
    segments
        .iter()
        .enumerate()
        .flat_map(|(segment, s)| {
            s.samples
                .iter()
                .map(move |&sample| MarkerSample { segment, sample })
        })
        .collect()
}

/// The drawing surface a [`GradientPath`] hands its elements to.
pub trait RenderSink<C> {
    /// Called once before the elements of a render call.
    fn begin_group(&mut self, _kind: &ElementKind) {}

    fn draw_segment(&mut self, kind: &ElementKind, segment: &Segment, color: C);

    fn draw_marker(&mut self, marker: &MarkerSample, radius: f64, color: C);

    /// Called once after the elements of a render call.
    fn end_group(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderData {
    Segments(Vec<Segment>),
    Markers(Vec<MarkerSample>),
}

impl RenderData {
    pub fn len(&self) -> usize {
        match self {
            RenderData::Segments(segments) => segments.len(),
            RenderData::Markers(markers) => markers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What one render call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCycle {
    pub kind: ElementKind,
    pub data: RenderData,
}

/// A curve cut into colorable segments, ready to be rendered in several
/// styles.
#[derive(Debug)]
pub struct GradientPath<C: Curve> {
    curve: C,
    config: GradientPathConfig,
    data: Vec<Segment>,
    renders: Vec<RenderCycle>,
}

impl<C: Curve> GradientPath<C> {
    /// Validate `config` and sample `curve` once.
    pub fn new(curve: C, config: GradientPathConfig) -> Result<Self> {
        let data = config.sampler().sample(&curve)?;
        Ok(Self {
            curve,
            config,
            data,
            renders: Vec::new(),
        })
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn config(&self) -> &GradientPathConfig {
        &self.config
    }

    /// The raw segments from the last sampling pass.
    pub fn data(&self) -> &[Segment] {
        &self.data
    }

    /// Every render call made so far, oldest first.
    pub fn renders(&self) -> &[RenderCycle] {
        &self.renders
    }

    /// The configured override, otherwise whatever the curve reports.
    pub fn is_closed(&self) -> bool {
        self.config.closed.unwrap_or_else(|| self.curve.is_closed())
    }

    /// Sample the curve again from scratch.
    pub fn update(&mut self) -> Result<&mut Self> {
        self.data = self.config.sampler().sample(&self.curve)?;
        Ok(self)
    }

    /// Filled outlines of the current data at the given width.
    pub fn fill_data(&self, width: f64) -> Result<Vec<Segment>> {
        stroke_to_fill(&self.data, width, self.config.precision, self.is_closed())
    }

    /// Produce the elements for `request` and hand them to `sink`.
    pub fn render<Col, F, S>(
        &mut self,
        request: &RenderRequest<F>,
        sink: &mut S,
    ) -> Result<&mut Self>
    where
        F: Fn(f64) -> Col,
        S: RenderSink<Col> + ?Sized,
    {
        let kind = request.kind;
        kind.validate()?;

        let (data, radius) = match kind {
            ElementKind::Stroke { .. } => (RenderData::Segments(self.data.clone()), 0.0),
            ElementKind::FillPolygon { width } => {
                (RenderData::Segments(self.fill_data(width)?), 0.0)
            }
            ElementKind::PointMarker { width } => {
                (RenderData::Markers(flatten_segments(&self.data)), width / 2.0)
            }
        };

        sink.begin_group(&kind);
        match &data {
            RenderData::Segments(segments) => {
                for segment in segments {
                    sink.draw_segment(&kind, segment, (request.color)(segment.progress));
                }
            }
            RenderData::Markers(markers) => {
                for marker in markers {
                    sink.draw_marker(marker, radius, (request.color)(marker.sample.progress));
                }
            }
        }
        sink.end_group();

        debug!(
            kind = kind.class_name(),
            elements = data.len(),
            closed = self.is_closed(),
            "rendered gradient path"
        );

        self.renders.push(RenderCycle { kind, data });
        Ok(self)
    }
}
