//! Blending the edges where adjacent outlined segments meet.
//!
//! Each outline is computed from its own samples only, so the edge one
//! polygon ends on rarely matches the edge the next polygon starts on.
//! Averaging the two edges makes neighbouring polygons share their boundary
//! vertices exactly, which is what makes the filled ribbon look seamless.

use kurbo::Point;
use tracing::trace;

use crate::error::{GradientPathError, Result};
use crate::sample::{Segment, round_to_precision};

fn midpoint(a: Point, b: Point, precision: Option<u32>) -> Point {
    let mid = a.midpoint(b);
    Point::new(
        round_to_precision(mid.x, precision),
        round_to_precision(mid.y, precision),
    )
}

/// Make every pair of neighbouring outlines share their joining edge.
///
/// For an outline of `2n` points, the edge facing the next segment is the
/// pair at `n - 1` and `n`; the edge facing the previous segment is the pair
/// at `0` and `2n - 1`. Joins are processed in order, each one writing the
/// averaged points into both segments. A closed path also joins the last
/// segment back onto the first. An open path never does: its first
/// segment's leading edge stays as outlined.
///
/// Every outline must hold an even number of at least two points.
pub fn average_joins(
    mut outlined: Vec<Segment>,
    precision: Option<u32>,
    path_closed: bool,
) -> Result<Vec<Segment>> {
    for (index, segment) in outlined.iter().enumerate() {
        if segment.len() < 2 || segment.len() % 2 != 0 {
            return Err(GradientPathError::DegenerateGeometry {
                segment: index,
                points: segment.len(),
                required: 2,
            });
        }
    }

    let count = outlined.len();
    let joins = if path_closed {
        count
    } else {
        count.saturating_sub(1)
    };

    for i in 0..joins {
        let next = (i + 1) % count;

        let (p0_average, p1_average, current_middle, next_end) = {
            let current_samples = &outlined[i].samples;
            let next_samples = &outlined[next].samples;
            let current_middle = current_samples.len() / 2;
            let next_end = next_samples.len() - 1;

            let p0_average = midpoint(
                current_samples[current_middle - 1].point(),
                next_samples[0].point(),
                precision,
            );
            let p1_average = midpoint(
                current_samples[current_middle].point(),
                next_samples[next_end].point(),
                precision,
            );
            (p0_average, p1_average, current_middle, next_end)
        };

        trace!(
            current = i,
            next,
            ?p0_average,
            ?p1_average,
            "averaged segment join"
        );

        let current_samples = &mut outlined[i].samples;
        current_samples[current_middle - 1] =
            current_samples[current_middle - 1].with_point(p0_average);
        current_samples[current_middle] = current_samples[current_middle].with_point(p1_average);

        let next_samples = &mut outlined[next].samples;
        next_samples[0] = next_samples[0].with_point(p0_average);
        next_samples[next_end] = next_samples[next_end].with_point(p1_average);
    }

    Ok(outlined)
}
