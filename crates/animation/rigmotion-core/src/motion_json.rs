use serde::Deserialize;

use crate::data::{
    Curve, CurveBuilder, CurveFade, CurveTarget, FadeOverride, Motion, MotionFade, MotionMeta,
    Point, SegmentKind,
};
use crate::error::{MotionError, Result};

/// Per-motion settings that live in the model manifest rather than the motion file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionSettings {
    /// Overrides `Meta.FadeInTime` when set.
    pub fade_in_time: Option<f64>,
    /// Overrides `Meta.FadeOutTime` when set.
    pub fade_out_time: Option<f64>,
    pub sound: Option<String>,
}

/// Parse motion JSON (`{ Version, Meta, Curves }` with flat segment arrays)
/// into a validated [`Motion`].
///
/// Notes:
/// - Segment arrays start with the initial point `(time, value)`, followed by
///   `tag, payload..` groups (0 linear, 1 bezier, 2 stepped, 3 inverse stepped).
/// - Curve fade windows missing from the file inherit the motion fade.
/// - Motion fade windows come from `settings`, then `Meta`, then default to 0.
/// - Extra fields (counts, fps, user data) are ignored.
pub fn parse_motion_json(s: &str, settings: MotionSettings) -> Result<Motion> {
    let raw: RawMotion = serde_json::from_str(s)?;

    let mut curves: Vec<Curve> = Vec::with_capacity(raw.curves.len());
    for rc in raw.curves {
        curves.push(to_curve(rc)?);
    }

    let meta = MotionMeta {
        duration: raw.meta.duration,
        looping: raw.meta.looping,
        beziers_restricted: raw.meta.are_beziers_restricted,
    };
    let fade = MotionFade {
        fade_in_time: settings
            .fade_in_time
            .or(raw.meta.fade_in_time)
            .unwrap_or(0.0),
        fade_out_time: settings
            .fade_out_time
            .or(raw.meta.fade_out_time)
            .unwrap_or(0.0),
    };
    Motion::new(meta, fade, settings.sound, curves)
}

fn to_curve(rc: RawCurve) -> Result<Curve> {
    let target: CurveTarget = rc.target.parse()?;
    let malformed = |reason: String| MotionError::MalformedCurve {
        curve: rc.id.clone(),
        reason,
    };

    let (start, mut rest) = match rc.segments.as_slice() {
        [t, v, rest @ ..] => (Point::new(*t, *v), rest),
        _ => return Err(malformed("missing initial point".into())),
    };

    let mut builder = CurveBuilder::new(target, rc.id.clone(), start).fade(CurveFade {
        fade_in: FadeOverride::from_optional(rc.fade_in_time),
        fade_out: FadeOverride::from_optional(rc.fade_out_time),
    });

    while let [tag, tail @ ..] = rest {
        let kind = SegmentKind::from_tag(*tag).ok_or_else(|| MotionError::UnknownSegmentTag {
            curve: rc.id.clone(),
            tag: *tag,
        })?;
        if tail.len() < kind.arity() {
            return Err(malformed(format!(
                "{kind:?} segment needs {} values, found {}",
                kind.arity(),
                tail.len()
            )));
        }
        let (payload, next) = tail.split_at(kind.arity());
        builder = match (kind, payload) {
            (SegmentKind::Linear, [t, v]) => builder.linear(Point::new(*t, *v)),
            (SegmentKind::Stepped, [t, v]) => builder.stepped(Point::new(*t, *v)),
            (SegmentKind::InverseStepped, [t, v]) => builder.inverse_stepped(Point::new(*t, *v)),
            (SegmentKind::Bezier, [t1, v1, t2, v2, t, v]) => builder.bezier(
                Point::new(*t1, *v1),
                Point::new(*t2, *v2),
                Point::new(*t, *v),
            ),
            _ => return Err(malformed(format!("bad payload for {kind:?} segment"))),
        };
        rest = next;
    }

    builder.build()
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMotion {
    #[allow(dead_code)]
    #[serde(default)]
    version: u32,
    meta: RawMeta,
    #[serde(default)]
    curves: Vec<RawCurve>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMeta {
    duration: f64,
    #[serde(rename = "Loop", default)]
    looping: bool,
    #[serde(default)]
    are_beziers_restricted: bool,
    fade_in_time: Option<f64>,
    fade_out_time: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCurve {
    target: String,
    id: String,
    fade_in_time: Option<f64>,
    fade_out_time: Option<f64>,
    segments: Vec<f64>,
}
