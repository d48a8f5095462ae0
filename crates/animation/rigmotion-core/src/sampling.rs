//! Segment and curve evaluation.
//!
//! Model:
//! - A segment answers two questions for a time `t` (seconds from motion
//!   start): does `t` fall in its domain, and what value does it take there.
//! - Linear/Bezier use the fraction `k = max((t - start) / (end - start), 0)`.
//!   There is no upper clamp; callers gate on [`Segment::intersects`].
//! - Stepped and InverseStepped are constant over their domains.
//! - A curve evaluates its active segment: the last one whose domain holds `t`,
//!   so a shared boundary takes the later segment's value.

use crate::data::{Curve, Segment};
use crate::interp::functions::{de_casteljau, lerp_f64};

#[inline]
fn fraction(t: f64, start: f64, end: f64) -> f64 {
    // f64::max drops a NaN from a zero-length segment, yielding 0.
    ((t - start) / (end - start)).max(0.0)
}

impl Segment {
    /// Lower bound of the segment's time domain.
    pub fn start_time(&self) -> f64 {
        match self {
            Segment::Linear { start, .. }
            | Segment::Bezier { start, .. }
            | Segment::Stepped { start, .. } => start.time,
            Segment::InverseStepped { hold_from, .. } => *hold_from,
        }
    }

    /// Upper bound of the segment's time domain.
    pub fn end_time(&self) -> f64 {
        match self {
            Segment::Linear { end, .. } | Segment::Bezier { end, .. } => end.time,
            Segment::Stepped { hold_until, .. } => *hold_until,
            Segment::InverseStepped { point, .. } => point.time,
        }
    }

    /// True iff `t` lies in the closed time domain of this segment.
    #[inline]
    pub fn intersects(&self, t: f64) -> bool {
        self.start_time() <= t && t <= self.end_time()
    }

    /// Value of the segment at `t`.
    pub fn interpolate(&self, t: f64) -> f64 {
        match *self {
            Segment::Linear { start, end } => {
                let k = fraction(t, start.time, end.time);
                lerp_f64(start.value, end.value, k)
            }
            Segment::Bezier { start, c1, c2, end } => {
                let k = fraction(t, start.time, end.time);
                de_casteljau(start, c1, c2, end, k).value
            }
            Segment::Stepped { start, .. } => start.value,
            Segment::InverseStepped { point, .. } => point.value,
        }
    }
}

impl Curve {
    /// The segment driving the curve at `t`, if any.
    pub fn active_segment(&self, t: f64) -> Option<&Segment> {
        self.segments().iter().rev().find(|s| s.intersects(t))
    }

    /// Curve value at `t`, or `None` when `t` is outside every segment.
    pub fn evaluate(&self, t: f64) -> Option<f64> {
        self.active_segment(t).map(|s| s.interpolate(t))
    }

    /// Time of the last segment end (0 for a curve without segments).
    pub fn end_time(&self) -> f64 {
        self.segments().last().map_or(0.0, Segment::end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurveTarget, Point};

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn linear_boundaries_are_exact() {
        let seg = Segment::Linear {
            start: Point::new(0.25, 0.375),
            end: Point::new(0.75, -1.875),
        };
        assert_eq!(seg.interpolate(0.25), 0.375);
        assert_eq!(seg.interpolate(0.75), -1.875);
        approx(seg.interpolate(0.5), -0.75, 1e-12);
    }

    #[test]
    fn linear_clamps_below_but_not_above() {
        let seg = Segment::Linear {
            start: Point::new(1.0, 0.0),
            end: Point::new(2.0, 10.0),
        };
        assert_eq!(seg.interpolate(0.0), 0.0);
        approx(seg.interpolate(2.5), 15.0, 1e-12);
        assert!(!seg.intersects(0.99));
        assert!(!seg.intersects(2.01));
    }

    #[test]
    fn bezier_boundaries_are_exact() {
        let seg = Segment::Bezier {
            start: Point::new(0.25, 0.125),
            c1: Point::new(0.5, 0.875),
            c2: Point::new(0.625, -0.5),
            end: Point::new(1.25, 0.75),
        };
        assert_eq!(seg.interpolate(0.25), 0.125);
        assert_eq!(seg.interpolate(1.25), 0.75);
    }

    #[test]
    fn bezier_with_linear_handles_is_a_line() {
        let seg = Segment::Bezier {
            start: Point::new(0.0, 0.0),
            c1: Point::new(1.0 / 3.0, 1.0 / 3.0),
            c2: Point::new(2.0 / 3.0, 2.0 / 3.0),
            end: Point::new(1.0, 1.0),
        };
        approx(seg.interpolate(0.25), 0.25, 1e-12);
    }

    #[test]
    fn stepped_holds_start_value() {
        let seg = Segment::Stepped {
            start: Point::new(0.5, 2.0),
            hold_until: 1.5,
        };
        assert!(seg.intersects(0.5));
        assert!(seg.intersects(1.5));
        assert!(!seg.intersects(1.6));
        assert_eq!(seg.interpolate(1.4), 2.0);
    }

    #[test]
    fn inverse_stepped_domain_runs_back_to_previous_point() {
        let seg = Segment::InverseStepped {
            point: Point::new(2.0, 9.0),
            hold_from: 1.0,
        };
        assert!(seg.intersects(1.0));
        assert!(seg.intersects(2.0));
        assert!(!seg.intersects(0.99));
        assert_eq!(seg.interpolate(1.0), 9.0);
    }

    #[test]
    fn curve_boundary_takes_later_segment() {
        let curve = Curve::builder(CurveTarget::Parameter, "P", Point::new(0.0, 0.0))
            .linear(Point::new(1.0, 1.0))
            .inverse_stepped(Point::new(2.0, 5.0))
            .build()
            .unwrap();
        assert_eq!(curve.evaluate(0.5), Some(0.5));
        // t = 1.0 is in both domains; the step to 5 applies at its start.
        assert_eq!(curve.evaluate(1.0), Some(5.0));
        assert_eq!(curve.evaluate(2.0), Some(5.0));
        assert_eq!(curve.evaluate(2.5), None);
        assert_eq!(curve.end_time(), 2.0);
    }

    #[test]
    fn stepped_curve_changes_value_at_hold_end() {
        let curve = Curve::builder(CurveTarget::Parameter, "P", Point::new(0.0, 1.0))
            .stepped(Point::new(1.0, 3.0))
            .linear(Point::new(2.0, 4.0))
            .build()
            .unwrap();
        assert_eq!(curve.evaluate(0.99), Some(1.0));
        assert_eq!(curve.evaluate(1.0), Some(3.0));
        approx(curve.evaluate(1.5).unwrap(), 3.5, 1e-12);
    }
}
