//! Uniform arc-length sampling of a curve into overlapping segments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DEFAULT_PRECISION;
use crate::curve::Curve;
use crate::error::{GradientPathError, Result, ensure_finite};
use crate::sample::{MAX_PRECISION, Sample, Segment};

/// How segments are formed when only one sample per segment is requested.
///
/// With one sample per segment there is nothing to decrement, so every
/// segment would have to borrow its closing sample from the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleSamplePolicy {
    /// Refuse the request.
    #[default]
    Reject,
    /// Borrow the following sample, clamped to the last one generated.
    /// Each segment ends up with two samples.
    ReuseLast,
    /// Keep only the segment's own sample. The final sample (progress 1)
    /// belongs to no segment.
    DropBoundary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurveSampler {
    pub segments: usize,
    pub samples_per_segment: usize,
    pub precision: Option<u32>,
    pub single_sample: SingleSamplePolicy,
}

impl CurveSampler {
    pub fn new(segments: usize, samples_per_segment: usize) -> Self {
        Self {
            segments,
            samples_per_segment,
            precision: Some(DEFAULT_PRECISION),
            single_sample: SingleSamplePolicy::default(),
        }
    }

    /// Builder method for the number of decimal places kept on coordinates.
    pub fn with_precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method for the single-sample policy.
    pub fn with_single_sample(mut self, policy: SingleSamplePolicy) -> Self {
        self.single_sample = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(GradientPathError::InvalidArgument(
                "segment count must be positive".to_string(),
            ));
        }
        if self.samples_per_segment == 0 {
            return Err(GradientPathError::InvalidArgument(
                "samples per segment must be positive".to_string(),
            ));
        }
        if self.samples_per_segment == 1 && self.single_sample == SingleSamplePolicy::Reject {
            return Err(GradientPathError::InvalidArgument(
                "one sample per segment leaves no room for the shared boundary sample; \
                 use at least 2 or choose a single-sample policy"
                    .to_string(),
            ));
        }
        self.total_samples()?;
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(GradientPathError::InvalidArgument(format!(
                    "precision must be at most {MAX_PRECISION}, got {precision}"
                )));
            }
        }
        Ok(())
    }

    /// Flat indices separating one segment from the next.
    fn stride(&self) -> usize {
        if self.samples_per_segment > 1 {
            self.samples_per_segment - 1
        } else {
            self.samples_per_segment
        }
    }

    /// Flat sample count, including the final sample at progress 1.
    fn total_samples(&self) -> Result<usize> {
        self.segments
            .checked_mul(self.stride())
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| {
                GradientPathError::InvalidArgument(format!(
                    "{} segments of {} samples overflow the sample count",
                    self.segments, self.samples_per_segment
                ))
            })
    }

    /// Sample the whole curve at evenly spaced arc lengths.
    ///
    /// Produces `segments * stride + 1` samples with progress running from
    /// 0 to 1 inclusive.
    pub fn sample_points<C: Curve + ?Sized>(&self, curve: &C) -> Result<Vec<Sample>> {
        self.validate()?;

        let length = ensure_finite("curve length", curve.total_length())?;
        if length < 0.0 {
            return Err(GradientPathError::InvalidArgument(format!(
                "curve length must not be negative, got {length}"
            )));
        }

        let sample_count = self.total_samples()?;
        let intervals = sample_count - 1;
        let mut samples = Vec::with_capacity(sample_count);
        for k in 0..=intervals {
            let progress = k as f64 / intervals as f64;
            let pt = curve.point_at_length(progress * length);
            ensure_finite("x coordinate", pt.x)?;
            ensure_finite("y coordinate", pt.y)?;
            samples.push(Sample::new(pt.x, pt.y, progress).rounded(self.precision));
        }

        Ok(samples)
    }

    /// Sample the curve and group the samples into overlapping segments.
    ///
    /// Every segment ends on the sample that starts the next one, so the
    /// segments can be stroked one by one without gaps.
    pub fn sample<C: Curve + ?Sized>(&self, curve: &C) -> Result<Vec<Segment>> {
        let all_samples = self.sample_points(curve)?;
        let stride = self.stride();
        let drop_boundary = self.samples_per_segment == 1
            && self.single_sample == SingleSamplePolicy::DropBoundary;

        let mut segments = Vec::with_capacity(self.segments);
        for segment in 0..self.segments {
            let current_start = segment * stride;
            let next_start = current_start + stride;

            let mut segment_samples = Vec::with_capacity(stride + 1);
            segment_samples.extend_from_slice(&all_samples[current_start..next_start]);
            if !drop_boundary {
                if let Some(boundary) = all_samples.get(next_start).or(all_samples.last()) {
                    segment_samples.push(*boundary);
                }
            }

            segments.push(Segment::new(segment_samples));
        }

        debug!(
            segments = segments.len(),
            samples = all_samples.len(),
            length = curve.total_length(),
            "sampled curve"
        );

        Ok(segments)
    }
}
