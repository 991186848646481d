//! The curve capability consumed by the sampler, plus adapters for kurbo
//! geometry.

use std::f64::consts::PI;

use kurbo::{BezPath, Circle, Line, ParamCurve, ParamCurveArclen, PathEl, PathSeg, Point};

use crate::error::{GradientPathError, Result, ensure_finite};

/// Arc-length parameterized access to a 2D curve.
pub trait Curve {
    /// Total arc length of the curve.
    fn total_length(&self) -> f64;

    /// Position reached after travelling `distance` along the curve.
    fn point_at_length(&self, distance: f64) -> Point;

    /// Whether the curve returns to its starting point.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn total_length(&self) -> f64 {
        (**self).total_length()
    }

    fn point_at_length(&self, distance: f64) -> Point {
        (**self).point_at_length(distance)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn total_length(&self) -> f64 {
        (**self).total_length()
    }

    fn point_at_length(&self, distance: f64) -> Point {
        (**self).point_at_length(distance)
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

impl Curve for Line {
    fn total_length(&self) -> f64 {
        self.length()
    }

    fn point_at_length(&self, distance: f64) -> Point {
        let length = self.length();
        if length <= 0.0 {
            return self.p0;
        }
        self.eval((distance / length).clamp(0.0, 1.0))
    }
}

/// Traversed like an SVG `<circle>`: starting at the rightmost point and
/// turning towards positive y.
impl Curve for Circle {
    fn total_length(&self) -> f64 {
        2.0 * PI * self.radius
    }

    fn point_at_length(&self, distance: f64) -> Point {
        if self.radius <= 0.0 {
            return self.center;
        }
        let angle = distance / self.radius;
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// A `BezPath` measured once so that arc-length queries are cheap.
#[derive(Debug, Clone)]
pub struct BezPathCurve {
    segments: Vec<PathSeg>,
    lengths: Vec<f64>,
    total: f64,
    start: Point,
    closed: bool,
    accuracy: f64,
}

impl BezPathCurve {
    pub const DEFAULT_ACCURACY: f64 = 1e-3;

    pub fn new(path: &BezPath) -> Result<Self> {
        Self::with_accuracy(path, Self::DEFAULT_ACCURACY)
    }

    /// Parse an SVG path description (`d` attribute).
    pub fn from_svg(d: &str) -> Result<Self> {
        let path = BezPath::from_svg(d)?;
        Self::new(&path)
    }

    /// Measure `path` with the given arc-length accuracy.
    pub fn with_accuracy(path: &BezPath, accuracy: f64) -> Result<Self> {
        if !(accuracy.is_finite() && accuracy > 0.0) {
            return Err(GradientPathError::InvalidArgument(format!(
                "arc length accuracy must be positive, got {accuracy}"
            )));
        }

        let mut start = None;
        for el in path.elements() {
            let points = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
                PathEl::QuadTo(p1, p2) => vec![p1, p2],
                PathEl::CurveTo(p1, p2, p3) => vec![p1, p2, p3],
                PathEl::ClosePath => Vec::new(),
            };
            for p in &points {
                ensure_finite("path coordinate", p.x)?;
                ensure_finite("path coordinate", p.y)?;
            }
            if start.is_none() {
                start = points.first().copied();
            }
        }

        let closed = path
            .elements()
            .iter()
            .any(|el| matches!(el, PathEl::ClosePath));

        let segments: Vec<PathSeg> = path.segments().collect();
        let lengths: Vec<f64> = segments.iter().map(|seg| seg.arclen(accuracy)).collect();
        let total = lengths.iter().sum();

        Ok(Self {
            segments,
            lengths,
            total,
            start: start.unwrap_or(Point::ORIGIN),
            closed,
            accuracy,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl Curve for BezPathCurve {
    fn total_length(&self) -> f64 {
        self.total
    }

    fn point_at_length(&self, distance: f64) -> Point {
        let mut remaining = distance.clamp(0.0, self.total);

        for (seg, &len) in self.segments.iter().zip(&self.lengths) {
            if remaining <= len {
                if len <= 0.0 {
                    return seg.eval(0.0);
                }
                let t = seg.inv_arclen(remaining, self.accuracy);
                return seg.eval(t.clamp(0.0, 1.0));
            }
            remaining -= len;
        }

        // Accumulated rounding can leave a sliver past the final segment.
        self.segments
            .last()
            .map_or(self.start, |seg| seg.eval(1.0))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_close(actual: Point, expected: Point, tolerance: f64) {
        assert!(
            actual.distance(expected) <= tolerance,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_polyline_square() {
        let curve = BezPathCurve::from_svg("M0,0 L100,0 L100,100 L0,100 Z").unwrap();
        assert!(curve.is_closed());
        assert_eq!(curve.segment_count(), 4);
        assert!((curve.total_length() - 400.0).abs() < 1e-9);

        assert_point_close(curve.point_at_length(0.0), Point::new(0.0, 0.0), 1e-9);
        assert_point_close(curve.point_at_length(50.0), Point::new(50.0, 0.0), 1e-6);
        assert_point_close(curve.point_at_length(150.0), Point::new(100.0, 50.0), 1e-6);
        assert_point_close(curve.point_at_length(400.0), Point::new(0.0, 0.0), 1e-9);
    }

    #[test]
    fn test_lengths_are_clamped() {
        let curve = BezPathCurve::from_svg("M10,10 L20,10").unwrap();
        assert!(!curve.is_closed());
        assert_point_close(curve.point_at_length(-5.0), Point::new(10.0, 10.0), 1e-9);
        assert_point_close(curve.point_at_length(500.0), Point::new(20.0, 10.0), 1e-9);
    }

    #[test]
    fn test_cubic_arc_length() {
        // Quarter circle of radius 100 approximated by a cubic
        let k = 55.228_474_983;
        let d = format!("M100,0 C100,{k} {k},100 0,100");
        let curve = BezPathCurve::from_svg(&d).unwrap();
        let quarter = PI * 100.0 / 2.0;
        assert!((curve.total_length() - quarter).abs() < 0.1);

        let mid = curve.point_at_length(curve.total_length() / 2.0);
        let diag = 100.0 / 2f64.sqrt();
        assert_point_close(mid, Point::new(diag, diag), 0.1);
    }

    #[test]
    fn test_empty_path() {
        let curve = BezPathCurve::new(&BezPath::new()).unwrap();
        assert_eq!(curve.total_length(), 0.0);
        assert_eq!(curve.point_at_length(10.0), Point::ORIGIN);

        let lone = BezPathCurve::from_svg("M5,7").unwrap();
        assert_eq!(lone.point_at_length(0.0), Point::new(5.0, 7.0));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            BezPathCurve::from_svg("M0,0 Lfoo"),
            Err(GradientPathError::PathParse(_))
        ));

        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((f64::NAN, 1.0));
        assert!(matches!(
            BezPathCurve::new(&path),
            Err(GradientPathError::NonFinite { .. })
        ));

        let path = BezPath::from_svg("M0,0 L1,1").unwrap();
        assert!(matches!(
            BezPathCurve::with_accuracy(&path, 0.0),
            Err(GradientPathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_circle_curve() {
        let circle = Circle::new((50.0, 50.0), 10.0);
        assert!(circle.is_closed());
        let quarter = circle.total_length() / 4.0;
        assert_point_close(circle.point_at_length(0.0), Point::new(60.0, 50.0), 1e-9);
        assert_point_close(circle.point_at_length(quarter), Point::new(50.0, 60.0), 1e-9);
    }

    #[test]
    fn test_line_curve_as_trait_object() {
        let line = Line::new((0.0, 0.0), (30.0, 40.0));
        let curve: &dyn Curve = &line;
        assert_eq!(curve.total_length(), 50.0);
        assert_point_close(curve.point_at_length(25.0), Point::new(15.0, 20.0), 1e-9);
        assert!(!curve.is_closed());
    }
}
