//! Interpolation helpers:
//! - lerp_f64 / lerp_point (component-wise linear blend)
//! - de_casteljau (cubic bezier by repeated lerp over both components)
//! - ease_sine (clamped sine ease used for fade factors)

use std::f64::consts::PI;

use crate::data::Point;

/// Linear interpolation of scalars: `a + (b - a) * t`. Exact at `t == 0`.
#[inline]
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linear interpolation of both time and value.
#[inline]
pub fn lerp_point(a: Point, b: Point, t: f64) -> Point {
    Point {
        time: lerp_f64(a.time, b.time, t),
        value: lerp_f64(a.value, b.value, t),
    }
}

/// Cubic bezier point at parameter `k` via De Casteljau's construction.
#[inline]
pub fn de_casteljau(p0: Point, p1: Point, p2: Point, p3: Point, k: f64) -> Point {
    let p01 = lerp_point(p0, p1, k);
    let p12 = lerp_point(p1, p2, k);
    let p23 = lerp_point(p2, p3, k);
    let p012 = lerp_point(p01, p12, k);
    let p123 = lerp_point(p12, p23, k);
    lerp_point(p012, p123, k)
}

/// Sine ease over [0,1]: `0.5 - 0.5*cos(x*pi)`, clamped outside the range.
#[inline]
pub fn ease_sine(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    0.5 - 0.5 * (x * PI).cos()
}
