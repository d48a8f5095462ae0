//! rigmotion core (runtime-agnostic)
//!
//! Keyframe motion playback for rigged 2D characters: curve evaluation, fade
//! blending, the playback queue, and the idle eye-blink timer. The model
//! runtime that owns the parameter table is reached through [`ParameterTable`];
//! audio output through [`AudioSystem`].

pub mod audio;
pub mod blink;
pub mod character;
pub mod config;
pub mod data;
pub mod error;
pub mod fade;
pub mod ids;
pub mod interp;
pub mod motion_json;
pub mod motion_manager;
pub mod params;
pub mod queue;
pub mod random;
pub mod sampling;

// Re-exports for hosts
pub use audio::{AudioCue, AudioFormat, AudioSystem, SilentAudio};
pub use blink::{BlinkManager, BlinkState};
pub use character::Character;
pub use config::{BlinkConfig, Config, DEFAULT_BLINK_GROUP};
pub use data::{
    Curve, CurveBuilder, CurveFade, CurveTarget, FadeOverride, Motion, MotionFade, MotionMeta,
    Point, Segment, SegmentKind,
};
pub use error::{MotionError, Result};
pub use fade::Fade;
pub use ids::EntryId;
pub use motion_json::{parse_motion_json, MotionSettings};
pub use motion_manager::{apply_motion, FinishHandler, LoopRegistry, MotionManager};
pub use params::{Parameter, ParameterSnapshot, ParameterStore, ParameterTable};
pub use queue::{Entry, MotionQueue};
pub use random::{RandomSource, SeededRandom, ThreadRandom};
