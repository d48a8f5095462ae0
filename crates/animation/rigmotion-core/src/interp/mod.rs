//! Interpolation helpers shared by segment evaluation and fading.

pub mod functions;

pub use functions::{de_casteljau, ease_sine, lerp_f64, lerp_point};
