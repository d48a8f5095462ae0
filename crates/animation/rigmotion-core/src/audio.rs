//! Audio cue contracts.
//!
//! Decoding and output live outside this crate. The engine only needs a
//! lifecycle-scoped [`AudioSystem`] that turns a motion's cue reference into an
//! [`AudioCue`] handle it can start and stop. Hosts inject the system when
//! building the motion manager; nothing here keeps process-wide state.

use std::fmt;
use std::path::Path;

use log::trace;

use crate::error::{MotionError, Result};

/// Container formats accepted for motion cues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
}

impl AudioFormat {
    /// Detect the format from the file extension (`.wav`, `.wave`, `.mp3`).
    pub fn detect(path: &str) -> Result<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if ext.eq_ignore_ascii_case("wav") || ext.eq_ignore_ascii_case("wave") {
            Ok(AudioFormat::Wav)
        } else if ext.eq_ignore_ascii_case("mp3") {
            Ok(AudioFormat::Mp3)
        } else {
            Err(MotionError::UnsupportedAudioFormat {
                path: path.to_string(),
            })
        }
    }
}

/// A playable cue owned by one playback entry.
///
/// Both calls may be repeated. `close` after `play` must stop output before
/// returning.
pub trait AudioCue: fmt::Debug {
    /// Start from the beginning. Returns without waiting for playback to end.
    fn play(&mut self) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

/// Factory for cues, scoped to the host's audio device lifetime.
pub trait AudioSystem: fmt::Debug {
    fn load_cue(&mut self, path: &str) -> Result<Box<dyn AudioCue>>;
}

/// Audio backend for hosts with sound disabled. Cues validate their format
/// and track play state without producing output.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio;

impl AudioSystem for SilentAudio {
    fn load_cue(&mut self, path: &str) -> Result<Box<dyn AudioCue>> {
        let format = AudioFormat::detect(path)?;
        Ok(Box::new(SilentCue {
            path: path.to_string(),
            format,
            playing: false,
        }))
    }
}

#[derive(Clone, Debug)]
struct SilentCue {
    path: String,
    format: AudioFormat,
    playing: bool,
}

impl AudioCue for SilentCue {
    fn play(&mut self) -> Result<()> {
        trace!("silent {:?} cue '{}': play", self.format, self.path);
        self.playing = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.playing {
            trace!("silent {:?} cue '{}': stop", self.format, self.path);
        }
        self.playing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_supported_extensions() {
        assert_eq!(AudioFormat::detect("voice/a.wav").unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::detect("a.wave").unwrap(), AudioFormat::Wav);
        assert_eq!(AudioFormat::detect("a.mp3").unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect("A.MP3").unwrap(), AudioFormat::Mp3);
    }

    #[test]
    fn rejects_other_extensions() {
        for path in ["a.aac", "a", "wav", "a.wav.bak"] {
            assert!(
                matches!(
                    AudioFormat::detect(path),
                    Err(MotionError::UnsupportedAudioFormat { .. })
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn silent_cue_tracks_play_state() {
        let mut cue = SilentCue {
            path: "a.wav".into(),
            format: AudioFormat::Wav,
            playing: false,
        };
        cue.play().unwrap();
        assert!(cue.playing);
        cue.close().unwrap();
        cue.close().unwrap();
        assert!(!cue.playing);
    }

    #[test]
    fn silent_system_rejects_unknown_format() {
        let mut audio = SilentAudio;
        assert!(audio.load_cue("voice.ogg").is_err());
        assert!(audio.load_cue("voice.wav").is_ok());
    }
}
