//! Fade weights for a motion and its curves.
//!
//! `fade_in` eases up over the fade-in window from the motion start;
//! `fade_out` eases down over the fade-out window before the motion end.
//! A zero window is instant (factor 1). Indefinite motions (negative duration)
//! never fade out.

use crate::data::{Curve, FadeOverride, Motion};
use crate::interp::functions::ease_sine;

/// Mix weight of the playing motion. Single-motion playback keeps it at 1.
pub const BASE_WEIGHT: f64 = 1.0;

/// Fade factors for one motion at one elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub fade_in: f64,
    pub fade_out: f64,
    /// `BASE_WEIGHT * fade_in * fade_out`
    pub weight: f64,
}

#[inline]
fn fade_in_factor(window: f64, elapsed: f64) -> f64 {
    if window == 0.0 {
        1.0
    } else {
        ease_sine(elapsed / window)
    }
}

#[inline]
fn fade_out_factor(window: f64, duration: f64, elapsed: f64) -> f64 {
    if window == 0.0 || duration < 0.0 {
        1.0
    } else {
        ease_sine((duration - elapsed) / window)
    }
}

impl Fade {
    /// Motion-level fade at `elapsed` seconds.
    pub fn compute(motion: &Motion, elapsed: f64) -> Self {
        let fade_in = fade_in_factor(motion.fade_in_time(), elapsed);
        let fade_out = fade_out_factor(motion.fade_out_time(), motion.duration(), elapsed);
        Self {
            fade_in,
            fade_out,
            weight: BASE_WEIGHT * fade_in * fade_out,
        }
    }

    /// Weight for one curve. Overridden sides are recomputed against the
    /// curve's window and replace the inherited factor for that side only.
    pub fn curve_weight(&self, curve: &Curve, motion: &Motion, elapsed: f64) -> f64 {
        if curve.fade.is_inherited() {
            return self.weight;
        }
        let fin = match curve.fade.fade_in {
            FadeOverride::Inherit => self.fade_in,
            FadeOverride::Override(window) => fade_in_factor(window, elapsed),
        };
        let fout = match curve.fade.fade_out {
            FadeOverride::Inherit => self.fade_out,
            FadeOverride::Override(window) => {
                fade_out_factor(window, motion.duration(), elapsed)
            }
        };
        BASE_WEIGHT * fin * fout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurveFade, CurveTarget, MotionFade, MotionMeta, Point};

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    fn motion(duration: f64, fade_in: f64, fade_out: f64) -> Motion {
        Motion::new(
            MotionMeta {
                duration,
                ..MotionMeta::default()
            },
            MotionFade {
                fade_in_time: fade_in,
                fade_out_time: fade_out,
            },
            None,
            Vec::new(),
        )
        .unwrap()
    }

    fn curve(fade: CurveFade) -> Curve {
        Curve::builder(CurveTarget::Parameter, "P", Point::new(0.0, 0.0))
            .linear(Point::new(2.0, 1.0))
            .fade(fade)
            .build()
            .unwrap()
    }

    #[test]
    fn zero_fade_in_is_instant() {
        let f = Fade::compute(&motion(2.0, 0.0, 0.0), 0.0);
        assert_eq!(f.fade_in, 1.0);
        assert_eq!(f.fade_out, 1.0);
        assert_eq!(f.weight, 1.0);
    }

    #[test]
    fn fade_in_eases_over_window() {
        let f = Fade::compute(&motion(2.0, 0.5, 0.0), 0.25);
        approx(f.fade_in, 0.5, 1e-12);
        approx(f.weight, 0.5, 1e-12);
    }

    #[test]
    fn fade_out_reaches_zero_at_end() {
        let m = motion(2.0, 0.0, 0.5);
        approx(Fade::compute(&m, 1.75).fade_out, 0.5, 1e-12);
        assert_eq!(Fade::compute(&m, 2.0).fade_out, 0.0);
        assert_eq!(Fade::compute(&m, 1.0).fade_out, 1.0);
    }

    #[test]
    fn indefinite_motion_never_fades_out() {
        let f = Fade::compute(&motion(-1.0, 0.0, 0.5), 100.0);
        assert_eq!(f.fade_out, 1.0);
    }

    #[test]
    fn inherited_curve_uses_motion_weight() {
        let m = motion(2.0, 0.5, 0.5);
        let f = Fade::compute(&m, 0.25);
        assert_eq!(f.curve_weight(&curve(CurveFade::INHERIT), &m, 0.25), f.weight);
    }

    #[test]
    fn override_replaces_only_its_side() {
        let m = motion(2.0, 0.5, 0.5);
        let f = Fade::compute(&m, 1.75);
        // Instant fade-in override; fade-out still inherited from the motion.
        let c = curve(CurveFade {
            fade_in: FadeOverride::Override(0.0),
            fade_out: FadeOverride::Inherit,
        });
        approx(f.curve_weight(&c, &m, 1.75), f.fade_out, 1e-12);

        // Fade-out window of 1s: (2.0 - 1.75) / 1.0 = 0.25.
        let c = curve(CurveFade {
            fade_in: FadeOverride::Inherit,
            fade_out: FadeOverride::Override(1.0),
        });
        approx(
            f.curve_weight(&c, &m, 1.75),
            f.fade_in * ease_sine(0.25),
            1e-12,
        );
    }
}
