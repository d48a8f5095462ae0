//! Motion data model: points, segments, curves and motions.
//!
//! Motions are immutable once built and are shared between playback entries.
//! Curves are assembled through [`CurveBuilder`], which starts every segment at
//! the previous segment's end point, so a built curve is always contiguous.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// A (time, value) control point. Time is in seconds from motion start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: f64,
    pub value: f64,
}

impl Point {
    #[inline]
    pub const fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }

    #[inline]
    fn is_finite(&self) -> bool {
        self.time.is_finite() && self.value.is_finite()
    }
}

/// One piece of a curve's trajectory.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Straight line between two points.
    Linear { start: Point, end: Point },
    /// Cubic bezier with two handles.
    Bezier {
        start: Point,
        c1: Point,
        c2: Point,
        end: Point,
    },
    /// Holds `start.value` over `[start.time, hold_until]`.
    Stepped { start: Point, hold_until: f64 },
    /// Holds `point.value` over `[hold_from, point.time]`; `hold_from` is the
    /// previous point's time.
    InverseStepped { point: Point, hold_from: f64 },
}

/// Numeric segment tags used by the flat motion encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Linear,
    Bezier,
    Stepped,
    InverseStepped,
}

impl SegmentKind {
    /// Map an encoded tag (0..=3) to its kind. Non-integral tags are rejected.
    pub fn from_tag(tag: f64) -> Option<Self> {
        match tag {
            t if t == 0.0 => Some(SegmentKind::Linear),
            t if t == 1.0 => Some(SegmentKind::Bezier),
            t if t == 2.0 => Some(SegmentKind::Stepped),
            t if t == 3.0 => Some(SegmentKind::InverseStepped),
            _ => None,
        }
    }

    /// Number of values following the tag in the flat encoding.
    pub fn arity(self) -> usize {
        match self {
            SegmentKind::Bezier => 6,
            SegmentKind::Linear | SegmentKind::Stepped | SegmentKind::InverseStepped => 2,
        }
    }
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Linear { .. } => SegmentKind::Linear,
            Segment::Bezier { .. } => SegmentKind::Bezier,
            Segment::Stepped { .. } => SegmentKind::Stepped,
            Segment::InverseStepped { .. } => SegmentKind::InverseStepped,
        }
    }
}

/// What a curve drives on the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveTarget {
    /// Model-level effects; reserved and currently ignored during playback.
    Model,
    /// Part opacity, written directly without fading.
    PartOpacity,
    /// Model parameter, blended against the restored baseline.
    Parameter,
}

impl FromStr for CurveTarget {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Model" => Ok(CurveTarget::Model),
            "PartOpacity" => Ok(CurveTarget::PartOpacity),
            "Parameter" => Ok(CurveTarget::Parameter),
            other => Err(MotionError::UnknownTarget {
                target: other.to_string(),
            }),
        }
    }
}

/// Fade window for one side of a curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum FadeOverride {
    /// Use the motion-level fade factor.
    #[default]
    Inherit,
    /// Use this window (seconds) instead; 0 means instant.
    Override(f64),
}

impl FadeOverride {
    /// Absent window inherits.
    pub fn from_optional(window: Option<f64>) -> Self {
        window.map_or(FadeOverride::Inherit, FadeOverride::Override)
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, FadeOverride::Inherit)
    }
}

/// Per-curve fade configuration for both sides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveFade {
    #[serde(default)]
    pub fade_in: FadeOverride,
    #[serde(default)]
    pub fade_out: FadeOverride,
}

impl CurveFade {
    pub const INHERIT: CurveFade = CurveFade {
        fade_in: FadeOverride::Inherit,
        fade_out: FadeOverride::Inherit,
    };

    /// True when neither side overrides the motion fade.
    pub fn is_inherited(&self) -> bool {
        self.fade_in.is_inherit() && self.fade_out.is_inherit()
    }
}

/// One target's value trajectory over a motion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Curve {
    pub target: CurveTarget,
    /// Parameter or part identifier.
    pub id: String,
    pub fade: CurveFade,
    segments: Vec<Segment>,
}

impl Curve {
    /// Begin a curve at `start`.
    pub fn builder(target: CurveTarget, id: impl Into<String>, start: Point) -> CurveBuilder {
        CurveBuilder::new(target, id, start)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Appends segments from the previous end point and validates as it goes.
///
/// The first problem encountered is kept and reported by [`CurveBuilder::build`].
#[derive(Clone, Debug)]
pub struct CurveBuilder {
    target: CurveTarget,
    id: String,
    fade: CurveFade,
    last: Point,
    segments: Vec<Segment>,
    error: Option<String>,
}

impl CurveBuilder {
    pub fn new(target: CurveTarget, id: impl Into<String>, start: Point) -> Self {
        let mut builder = Self {
            target,
            id: id.into(),
            fade: CurveFade::default(),
            last: start,
            segments: Vec::new(),
            error: None,
        };
        if !start.is_finite() {
            builder.fail(format!("initial point {start:?} is not finite"));
        }
        builder
    }

    pub fn fade(mut self, fade: CurveFade) -> Self {
        self.fade = fade;
        self
    }

    pub fn linear(mut self, end: Point) -> Self {
        if self.check_point(end) {
            self.segments.push(Segment::Linear {
                start: self.last,
                end,
            });
            self.last = end;
        }
        self
    }

    pub fn bezier(mut self, c1: Point, c2: Point, end: Point) -> Self {
        if !c1.is_finite() || !c2.is_finite() {
            self.fail(format!("bezier handles {c1:?}, {c2:?} are not finite"));
            return self;
        }
        if self.check_point(end) {
            self.segments.push(Segment::Bezier {
                start: self.last,
                c1,
                c2,
                end,
            });
            self.last = end;
        }
        self
    }

    /// Hold the current value until `next.time`, then continue from `next`.
    pub fn stepped(mut self, next: Point) -> Self {
        if self.check_point(next) {
            self.segments.push(Segment::Stepped {
                start: self.last,
                hold_until: next.time,
            });
            self.last = next;
        }
        self
    }

    /// Jump to `point.value` right after the current point and hold it through
    /// `point.time`.
    pub fn inverse_stepped(mut self, point: Point) -> Self {
        if self.check_point(point) {
            self.segments.push(Segment::InverseStepped {
                point,
                hold_from: self.last.time,
            });
            self.last = point;
        }
        self
    }

    pub fn build(self) -> Result<Curve> {
        if let Some(reason) = self.error {
            return Err(MotionError::MalformedCurve {
                curve: self.id,
                reason,
            });
        }
        for (side, fade) in [("in", self.fade.fade_in), ("out", self.fade.fade_out)] {
            if let FadeOverride::Override(window) = fade {
                if !window.is_finite() || window < 0.0 {
                    return Err(MotionError::MalformedCurve {
                        curve: self.id,
                        reason: format!("fade-{side} window must be >= 0, got {window}"),
                    });
                }
            }
        }
        Ok(Curve {
            target: self.target,
            id: self.id,
            fade: self.fade,
            segments: self.segments,
        })
    }

    fn check_point(&mut self, next: Point) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !next.is_finite() {
            self.fail(format!("point {next:?} is not finite"));
            return false;
        }
        if next.time < self.last.time {
            self.fail(format!(
                "segment {} runs backwards in time ({} -> {})",
                self.segments.len(),
                self.last.time,
                next.time
            ));
            return false;
        }
        true
    }

    fn fail(&mut self, reason: String) {
        if self.error.is_none() {
            self.error = Some(reason);
        }
    }
}

/// Timing metadata of a motion asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionMeta {
    /// Seconds; negative means indefinite (never fades out).
    pub duration: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Authoring flag carried through from the asset; evaluation ignores it.
    #[serde(default)]
    pub beziers_restricted: bool,
}

/// Motion-level fade windows in seconds (0 = instant).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionFade {
    pub fade_in_time: f64,
    pub fade_out_time: f64,
}

/// Immutable animation asset.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Motion {
    meta: MotionMeta,
    fade: MotionFade,
    sound: Option<String>,
    curves: Vec<Curve>,
}

impl Motion {
    pub fn new(
        meta: MotionMeta,
        fade: MotionFade,
        sound: Option<String>,
        curves: Vec<Curve>,
    ) -> Result<Self> {
        if meta.duration.is_nan() {
            return Err(MotionError::InvalidMotion {
                reason: "duration is NaN".into(),
            });
        }
        for (name, window) in [
            ("fade_in_time", fade.fade_in_time),
            ("fade_out_time", fade.fade_out_time),
        ] {
            if !window.is_finite() || window < 0.0 {
                return Err(MotionError::InvalidMotion {
                    reason: format!("{name} must be finite and >= 0, got {window}"),
                });
            }
        }
        let sound = sound.filter(|s| !s.is_empty());
        Ok(Self {
            meta,
            fade,
            sound,
            curves,
        })
    }

    pub fn meta(&self) -> &MotionMeta {
        &self.meta
    }

    /// Seconds; negative means indefinite.
    pub fn duration(&self) -> f64 {
        self.meta.duration
    }

    /// Negative duration. Such motions skip fade-out; playback still finishes
    /// them on their first tick, so hosts loop them with `reset`.
    pub fn is_indefinite(&self) -> bool {
        self.meta.duration < 0.0
    }

    pub fn is_looping(&self) -> bool {
        self.meta.looping
    }

    pub fn fade_in_time(&self) -> f64 {
        self.fade.fade_in_time
    }

    pub fn fade_out_time(&self) -> f64 {
        self.fade.fade_out_time
    }

    /// Audio cue reference, if the motion has one.
    pub fn sound(&self) -> Option<&str> {
        self.sound.as_deref()
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_chains_segments_from_previous_end() {
        let curve = Curve::builder(CurveTarget::Parameter, "ParamA", Point::new(0.0, 0.0))
            .linear(Point::new(1.0, 1.0))
            .stepped(Point::new(2.0, 5.0))
            .inverse_stepped(Point::new(3.0, 7.0))
            .build()
            .unwrap();
        let segs = curve.segments();
        assert_eq!(segs.len(), 3);
        assert_eq!(
            segs[1],
            Segment::Stepped {
                start: Point::new(1.0, 1.0),
                hold_until: 2.0
            }
        );
        assert_eq!(
            segs[2],
            Segment::InverseStepped {
                point: Point::new(3.0, 7.0),
                hold_from: 2.0
            }
        );
    }

    #[test]
    fn builder_rejects_backwards_time() {
        let err = Curve::builder(CurveTarget::Parameter, "ParamA", Point::new(1.0, 0.0))
            .linear(Point::new(0.5, 1.0))
            .linear(Point::new(2.0, 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, MotionError::MalformedCurve { ref curve, .. } if curve == "ParamA"));
    }

    #[test]
    fn builder_rejects_non_finite() {
        let err = Curve::builder(CurveTarget::Parameter, "ParamA", Point::new(0.0, 0.0))
            .bezier(
                Point::new(0.1, f64::NAN),
                Point::new(0.2, 0.0),
                Point::new(0.3, 0.0),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, MotionError::MalformedCurve { .. }));
    }

    #[test]
    fn segment_tags_map_to_kinds() {
        assert_eq!(SegmentKind::from_tag(0.0), Some(SegmentKind::Linear));
        assert_eq!(SegmentKind::from_tag(3.0), Some(SegmentKind::InverseStepped));
        assert_eq!(SegmentKind::from_tag(1.5), None);
        assert_eq!(SegmentKind::from_tag(4.0), None);
        assert_eq!(SegmentKind::Bezier.arity(), 6);
    }

    #[test]
    fn target_parsing() {
        assert_eq!("PartOpacity".parse::<CurveTarget>().unwrap(), CurveTarget::PartOpacity);
        assert!("Opacity".parse::<CurveTarget>().is_err());
    }

    #[test]
    fn motion_rejects_negative_fade() {
        let err = Motion::new(
            MotionMeta {
                duration: 1.0,
                ..MotionMeta::default()
            },
            MotionFade {
                fade_in_time: -1.0,
                fade_out_time: 0.0,
            },
            None,
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, MotionError::InvalidMotion { .. }));
    }

    #[test]
    fn empty_sound_is_no_sound() {
        let m = Motion::new(
            MotionMeta {
                duration: -1.0,
                ..MotionMeta::default()
            },
            MotionFade::default(),
            Some(String::new()),
            Vec::new(),
        )
        .unwrap();
        assert!(m.sound().is_none());
        assert!(m.is_indefinite());
    }
}
