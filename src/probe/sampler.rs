//! Outline sampling: walk a horizontal span and record the blade-wide
//! profile height at each column.

use rayon::prelude::*;
use tracing::{debug, warn};

use super::vertical::VerticalProbe;
use crate::config::float_cmp::step_count;
use crate::config::{DEFAULT_PROBE_OFFSETS, MAX_STEP_COUNT};
use crate::model::Point2;

/// Sampling request for [`sample_outline`].
#[derive(Debug, Clone, Copy)]
pub struct SampleSpan {
    pub xmin: f64,
    pub xmax: f64,
    pub blade_width: f64,
    pub x_step: f64,
    /// Probe columns spread across the blade width.
    pub lateral_offsets: usize,
}

impl SampleSpan {
    pub fn new(xmin: f64, xmax: f64, blade_width: f64, x_step: f64) -> Self {
        Self {
            xmin,
            xmax,
            blade_width,
            x_step,
            lateral_offsets: DEFAULT_PROBE_OFFSETS,
        }
    }

    /// Number of columns in the span, or `None` when the step is so fine
    /// that the count overflows the column cap.
    ///
    /// Columns sit at `xmin + i * x_step` and the last one is the largest
    /// that does not pass `xmax`. A span that is an exact multiple of the
    /// step includes `xmax` despite rounding. An empty or invalid span has
    /// zero columns.
    pub fn columns(&self) -> Option<usize> {
        let valid = self.xmin.is_finite()
            && self.xmax.is_finite()
            && self.x_step.is_finite()
            && self.x_step > 0.0
            && self.xmin <= self.xmax;
        if !valid {
            return Some(0);
        }
        step_count(self.xmax - self.xmin, self.x_step)
    }

    /// Number of columns in the span; zero for an empty, invalid or
    /// oversized span.
    pub fn column_count(&self) -> usize {
        self.columns().unwrap_or_else(|| {
            warn!(
                "Step {} over [{}, {}] exceeds {} columns, nothing sampled",
                self.x_step, self.xmin, self.xmax, MAX_STEP_COUNT
            );
            0
        })
    }

    /// Lateral offsets from the column x: `w * i / (n - 1)` for i in 0..n.
    pub fn offsets(&self) -> Vec<f64> {
        match self.lateral_offsets {
            0 | 1 => vec![0.0],
            n => (0..n)
                .map(|i| self.blade_width * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

/// Sample the top profile across `span`.
///
/// Each column keeps the highest hit among its lateral probes and is
/// recorded at the nominal column x, not at the offset that produced the
/// hit. Columns without any hit are skipped, so the result may have gaps.
/// Columns are probed in parallel; the result is in ascending x.
pub fn sample_outline(probe: &VerticalProbe<'_>, span: &SampleSpan) -> Vec<Point2> {
    let columns = span.column_count();
    let offsets = span.offsets();

    let points: Vec<Point2> = (0..columns)
        .into_par_iter()
        .filter_map(|i| {
            let x = span.xmin + i as f64 * span.x_step;
            offsets
                .iter()
                .filter_map(|dx| probe.highest_y(x + dx))
                .reduce(f64::max)
                .map(|y| Point2::new(x, y))
        })
        .collect();

    debug!(
        "Sampled {} of {} columns over [{}, {}] step {}",
        points.len(),
        columns,
        span.xmin,
        span.xmax,
        span.x_step
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circle, Primitive, Segment};
    use approx::assert_relative_eq;

    #[test]
    fn test_column_count_inclusive() {
        assert_eq!(SampleSpan::new(0.0, 10.0, 1.0, 1.0).column_count(), 11);
        assert_eq!(SampleSpan::new(0.0, 1.0, 1.0, 0.1).column_count(), 11);
        assert_eq!(SampleSpan::new(0.0, 10.5, 1.0, 1.0).column_count(), 11);
        assert_eq!(SampleSpan::new(3.0, 3.0, 1.0, 1.0).column_count(), 1);
    }

    #[test]
    fn test_column_count_invalid_span() {
        assert_eq!(SampleSpan::new(5.0, 0.0, 1.0, 1.0).column_count(), 0);
        assert_eq!(SampleSpan::new(0.0, 5.0, 1.0, 0.0).column_count(), 0);
        assert_eq!(SampleSpan::new(0.0, 5.0, 1.0, -1.0).column_count(), 0);
        assert_eq!(SampleSpan::new(0.0, f64::NAN, 1.0, 1.0).column_count(), 0);
    }

    #[test]
    fn test_column_count_too_fine_step() {
        let span = SampleSpan::new(0.0, 500.0, 1.0, 1e-310);
        assert_eq!(span.columns(), None);
        assert_eq!(span.column_count(), 0);

        let flat = vec![Primitive::from(Segment::new(0.0, 1.0, 500.0, 1.0))];
        let probe = VerticalProbe::new(&flat);
        assert!(sample_outline(&probe, &SampleSpan::new(0.0, 500.0, 1.0, 1e-12)).is_empty());
    }

    #[test]
    fn test_offsets() {
        let span = SampleSpan::new(0.0, 1.0, 4.0, 1.0);
        assert_eq!(span.offsets(), vec![0.0, 2.0, 4.0]);

        let single = SampleSpan {
            lateral_offsets: 1,
            ..span
        };
        assert_eq!(single.offsets(), vec![0.0]);
    }

    #[test]
    fn test_records_nominal_x_with_blade_max() {
        // Rising ramp: the highest probe is always the far edge of the blade
        let p: Vec<Primitive> = vec![Segment::new(0.0, 0.0, 100.0, 100.0).into()];
        let probe = VerticalProbe::new(&p);
        let pts = sample_outline(&probe, &SampleSpan::new(0.0, 10.0, 2.0, 5.0));

        assert_eq!(pts.len(), 3);
        assert_eq!(pts[0].x, 0.0);
        assert_relative_eq!(pts[0].y, 2.0, epsilon = 1e-9);
        assert_eq!(pts[1].x, 5.0);
        assert_relative_eq!(pts[1].y, 7.0, epsilon = 1e-9);
        assert_eq!(pts[2].x, 10.0);
        assert_relative_eq!(pts[2].y, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_gaps_where_nothing_is_hit() {
        let p: Vec<Primitive> = vec![
            Segment::new(0.0, 1.0, 1.0, 1.0).into(),
            Segment::new(9.0, 2.0, 10.0, 2.0).into(),
        ];
        let probe = VerticalProbe::new(&p);
        let span = SampleSpan {
            lateral_offsets: 1,
            ..SampleSpan::new(0.0, 10.0, 0.0, 1.0)
        };
        let xs: Vec<f64> = sample_outline(&probe, &span).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 9.0, 10.0]);
    }

    #[test]
    fn test_blade_reaches_into_outline() {
        // Column at x=-2 with a 2mm blade touches the circle edge at x=0
        let p: Vec<Primitive> = vec![Circle::new(5.0, 0.0, 5.0).into()];
        let probe = VerticalProbe::new(&p);
        let pts = sample_outline(&probe, &SampleSpan::new(-2.0, -2.0, 2.0, 1.0));
        assert_eq!(pts.len(), 1);
        assert_eq!(pts[0].x, -2.0);
        assert_relative_eq!(pts[0].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_probe_yields_nothing() {
        let probe = VerticalProbe::default();
        assert!(sample_outline(&probe, &SampleSpan::new(0.0, 10.0, 1.0, 1.0)).is_empty());
    }
}
