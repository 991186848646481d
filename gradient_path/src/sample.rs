use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Largest number of decimal places accepted for coordinate rounding.
pub const MAX_PRECISION: u32 = 20;

/// A point on the curve together with its normalized arc-length position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    /// Fraction of the total curve length, in [0, 1]
    pub progress: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, progress: f64) -> Self {
        Self { x, y, progress }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same sample moved to `pt`, keeping its progress.
    pub fn with_point(self, pt: Point) -> Self {
        Self {
            x: pt.x,
            y: pt.y,
            ..self
        }
    }

    pub fn rounded(self, precision: Option<u32>) -> Self {
        Self {
            x: round_to_precision(self.x, precision),
            y: round_to_precision(self.y, precision),
            ..self
        }
    }
}

/// One colorable unit of the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub samples: Vec<Sample>,
    /// Progress of the median sample, used to pick the segment's color
    pub progress: f64,
}

impl Segment {
    /// Wrap `samples`, deriving the segment progress from its median sample.
    pub fn new(samples: Vec<Sample>) -> Self {
        let progress = median_sample(&samples).map_or(0.0, |s| s.progress);
        Self { samples, progress }
    }

    /// Wrap `samples` with an already known progress.
    pub fn with_progress(samples: Vec<Sample>, progress: f64) -> Self {
        Self { samples, progress }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Polyline through the samples, closed when `close` is set.
    pub fn to_bez_path(&self, close: bool) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.samples.iter().map(Sample::point);
        if let Some(start) = points.next() {
            path.move_to(start);
            for pt in points {
                path.line_to(pt);
            }
            if close {
                path.close_path();
            }
        }
        path
    }
}

/// The middle sample after ordering by progress.
///
/// Progress is already monotonic inside a segment, but the sort keeps the
/// choice well defined when several samples share a progress value.
pub fn median_sample(samples: &[Sample]) -> Option<&Sample> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted: Vec<&Sample> = samples.iter().collect();
    sorted.sort_by(|a, b| a.progress.total_cmp(&b.progress));
    Some(sorted[sorted.len() / 2])
}

/// Round `value` to `precision` decimal places.
///
/// `None` and `Some(0)` both leave the value untouched. Otherwise the result
/// is the double nearest to the decimal obtained by rounding the exact value
/// of `value`, with ties going away from zero. Rounding an already rounded
/// value returns it unchanged.
pub fn round_to_precision(value: f64, precision: Option<u32>) -> f64 {
    match precision {
        Some(digits) if digits > 0 => to_fixed(value, digits.min(MAX_PRECISION)),
        _ => value,
    }
}

fn to_fixed(value: f64, digits: u32) -> f64 {
    // Anything at or above 2^53 is already an integer.
    if !value.is_finite() || value.abs() >= 9_007_199_254_740_992.0 {
        return value;
    }

    let bits = value.to_bits();
    let exponent_bits = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if exponent_bits == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent_bits - 1075)
    };
    if exponent >= 0 {
        return value;
    }

    // |value| * 10^digits = scaled / 2^shift, computed without loss.
    let scaled = mantissa as u128 * 10u128.pow(digits);
    let shift = (-exponent) as u32;
    let units = if shift >= 128 {
        0
    } else {
        let half = 1u128 << (shift - 1);
        let remainder = scaled & ((1u128 << shift) - 1);
        (scaled >> shift) + u128::from(remainder >= half)
    };

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{units}e-{digits}")
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_matches_decimal_places() {
        assert_eq!(round_to_precision(1.23456, Some(2)), 1.23);
        assert_eq!(round_to_precision(-1.23756, Some(2)), -1.24);
        assert_eq!(round_to_precision(102.5, Some(2)), 102.5);
        assert_eq!(round_to_precision(99.999, Some(2)), 100.0);
        assert_eq!(round_to_precision(3.0e-16, Some(2)), 0.0);
    }

    #[test]
    fn test_rounding_ties_go_away_from_zero() {
        // 0.125 and 0.25 are exact in binary, so these are true ties
        assert_eq!(round_to_precision(0.125, Some(2)), 0.13);
        assert_eq!(round_to_precision(-0.125, Some(2)), -0.13);
        assert_eq!(round_to_precision(0.25, Some(1)), 0.3);
        // 1.005 is stored slightly below the tie
        assert_eq!(round_to_precision(1.005, Some(2)), 1.0);
    }

    #[test]
    fn test_rounding_disabled() {
        assert_eq!(round_to_precision(1.23456, None), 1.23456);
        assert_eq!(round_to_precision(1.23456, Some(0)), 1.23456);
        assert!(round_to_precision(f64::NAN, Some(2)).is_nan());
        assert_eq!(round_to_precision(1.0e17, Some(3)), 1.0e17);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        for &value in &[0.1, 1.0 / 3.0, -7.777_777, 123.456_789, 5e-7, 2.675] {
            for digits in 1..6 {
                let once = round_to_precision(value, Some(digits));
                let twice = round_to_precision(once, Some(digits));
                assert_eq!(once.to_bits(), twice.to_bits(), "{value} @ {digits}");
            }
        }
    }

    #[test]
    fn test_median_sample_sorts_by_progress() {
        let samples = vec![
            Sample::new(0.0, 0.0, 0.5),
            Sample::new(1.0, 0.0, 0.0),
            Sample::new(2.0, 0.0, 1.0),
            Sample::new(3.0, 0.0, 0.25),
        ];
        // sorted: 0.0, 0.25, 0.5, 1.0 -> index 2
        assert_eq!(median_sample(&samples).unwrap().progress, 0.5);
        assert!(median_sample(&[]).is_none());
    }

    #[test]
    fn test_segment_progress_from_median() {
        let segment = Segment::new(vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(1.0, 0.0, 0.1),
            Sample::new(2.0, 0.0, 0.2),
        ]);
        assert_eq!(segment.progress, 0.1);
        assert_eq!(Segment::new(Vec::new()).progress, 0.0);
    }

    #[test]
    fn test_sample_rounded_keeps_progress() {
        let sample = Sample::new(1.006, -2.004, 0.3).rounded(Some(2));
        assert_eq!(sample, Sample::new(1.01, -2.0, 0.3));
    }

    #[test]
    fn test_segment_to_bez_path() {
        let segment = Segment::new(vec![
            Sample::new(0.0, 0.0, 0.0),
            Sample::new(10.0, 0.0, 0.5),
            Sample::new(10.0, 10.0, 1.0),
        ]);
        assert_eq!(segment.to_bez_path(false).elements().len(), 3);
        assert_eq!(segment.to_bez_path(true).elements().len(), 4);
        assert!(Segment::new(Vec::new()).to_bez_path(true).elements().is_empty());
    }
}
