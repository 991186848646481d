//! Converting centerline segments into closed polygon outlines.

use tracing::warn;

use crate::error::{GradientPathError, Result};
use crate::sample::{Sample, Segment};

/// Offsets centerline segments by half a stroke width on either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeOutliner {
    pub width: f64,
    pub precision: Option<u32>,
}

impl StrokeOutliner {
    pub fn new(width: f64, precision: Option<u32>) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(GradientPathError::InvalidArgument(format!(
                "outline width must be positive, got {width}"
            )));
        }
        Ok(Self { width, precision })
    }

    /// Points at distance `width / 2` on either side of `pt`, perpendicular
    /// to the direction `angle`. Returned as (left, right).
    fn perpendicular_samples(&self, angle: f64, pt: &Sample) -> [Sample; 2] {
        let radius = self.width / 2.0;
        let (sin, cos) = angle.sin_cos();
        let left = Sample {
            x: sin * radius + pt.x,
            y: -cos * radius + pt.y,
            ..*pt
        };
        let right = Sample {
            x: -sin * radius + pt.x,
            y: cos * radius + pt.y,
            ..*pt
        };
        [left.rounded(self.precision), right.rounded(self.precision)]
    }

    /// Outline one segment.
    ///
    /// The result traces the left side forwards and the right side
    /// backwards, so for a centerline of `n` samples it holds `2 * n` points.
    /// Segments with fewer than two samples have no direction and produce an
    /// empty outline.
    pub fn outline_segment(&self, segment: &Segment) -> Segment {
        let samples = &segment.samples;
        let mut emitted: Vec<Sample> = Vec::with_capacity(samples.len() * 2);

        for (j, pair) in samples.windows(2).enumerate() {
            let (p0, p1) = (&pair[0], &pair[1]);
            let angle = (p1.y - p0.y).atan2(p1.x - p0.x);

            // p0's offsets were already emitted as the previous pair's p1
            if j == 0 {
                emitted.extend(self.perpendicular_samples(angle, p0));
            }
            emitted.extend(self.perpendicular_samples(angle, p1));
        }

        // emitted alternates left/right; for 8 points the polygon order is
        // 0, 2, 4, 6, 7, 5, 3, 1
        let left = emitted.iter().step_by(2);
        let right = emitted.iter().skip(1).step_by(2).rev();
        let polygon: Vec<Sample> = left.chain(right).copied().collect();

        Segment::with_progress(polygon, segment.progress)
    }

    /// Outline every segment, keeping each segment's progress.
    pub fn outline(&self, segments: &[Segment]) -> Vec<Segment> {
        segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                if segment.len() < 2 {
                    warn!(
                        segment = index,
                        samples = segment.len(),
                        "segment too short to outline"
                    );
                }
                self.outline_segment(segment)
            })
            .collect()
    }
}

/// Outline `segments` with a stroke of the given `width`.
pub fn outline_segments(
    segments: &[Segment],
    width: f64,
    precision: Option<u32>,
) -> Result<Vec<Segment>> {
    Ok(StrokeOutliner::new(width, precision)?.outline(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horizontal(count: usize) -> Segment {
        let samples = (0..count)
            .map(|i| Sample::new(i as f64 * 10.0, 0.0, i as f64 / 10.0))
            .collect();
        Segment::new(samples)
    }

    fn coords(segment: &Segment) -> Vec<(f64, f64)> {
        segment.samples.iter().map(|s| (s.x, s.y)).collect()
    }

    #[test]
    fn test_outline_point_count() {
        let outliner = StrokeOutliner::new(4.0, Some(2)).unwrap();
        for count in 2..7 {
            let outlined = outliner.outline_segment(&horizontal(count));
            // 2 * (pairs + 1) == 2 * samples
            assert_eq!(outlined.len(), 2 * count);
            assert_eq!(outlined.len() % 2, 0);
        }
    }

    #[test]
    fn test_outline_winding_order() {
        // Along +x, "left" is at -y and "right" at +y
        let outlined = StrokeOutliner::new(4.0, Some(2))
            .unwrap()
            .outline_segment(&horizontal(4));
        assert_eq!(
            coords(&outlined),
            vec![
                (0.0, -2.0),
                (10.0, -2.0),
                (20.0, -2.0),
                (30.0, -2.0),
                (30.0, 2.0),
                (20.0, 2.0),
                (10.0, 2.0),
                (0.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_outline_follows_direction() {
        let segment = Segment::new(vec![
            Sample::new(100.0, 0.0, 0.25),
            Sample::new(100.0, 100.0, 0.5),
        ]);
        let outlined = StrokeOutliner::new(10.0, Some(2))
            .unwrap()
            .outline_segment(&segment);
        assert_eq!(
            coords(&outlined),
            vec![(105.0, 0.0), (105.0, 100.0), (95.0, 100.0), (95.0, 0.0)]
        );
    }

    #[test]
    fn test_outline_keeps_progress() {
        let segment = horizontal(3);
        let outlined = StrokeOutliner::new(2.0, None)
            .unwrap()
            .outline_segment(&segment);
        assert_eq!(outlined.progress, segment.progress);
        let progress: Vec<f64> = outlined.samples.iter().map(|s| s.progress).collect();
        assert_eq!(progress, vec![0.0, 0.1, 0.2, 0.2, 0.1, 0.0]);
    }

    #[test]
    fn test_outline_rounds_offsets() {
        let segment = Segment::new(vec![Sample::new(0.0, 0.0, 0.0), Sample::new(3.0, 7.0, 1.0)]);
        let outlined = StrokeOutliner::new(1.0, Some(3))
            .unwrap()
            .outline_segment(&segment);
        for s in &outlined.samples {
            assert_eq!(s.x, (s.x * 1000.0).round() / 1000.0);
            assert_eq!(s.y, (s.y * 1000.0).round() / 1000.0);
        }
    }

    #[test]
    fn test_short_segments_give_empty_outline() {
        let outliner = StrokeOutliner::new(2.0, Some(2)).unwrap();
        let segments = vec![horizontal(1), Segment::new(Vec::new()), horizontal(2)];
        let outlined = outliner.outline(&segments);
        assert_eq!(outlined.len(), 3);
        assert!(outlined[0].is_empty());
        assert!(outlined[1].is_empty());
        assert_eq!(outlined[2].len(), 4);
    }

    #[test]
    fn test_rejects_bad_width() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                outline_segments(&[horizontal(2)], width, None),
                Err(GradientPathError::InvalidArgument(_))
            ));
        }
    }
}
