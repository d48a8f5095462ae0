//! Core configuration for rigmotion-core.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

/// Name of the parameter group whose members receive the eyelid value.
pub const DEFAULT_BLINK_GROUP: &str = "EyeBlink";

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Timing of the idle eye-blink cycle.
    pub blink: BlinkConfig,
    /// Parameter group that auto-blink drives.
    pub blink_group: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blink: BlinkConfig::default(),
            blink_group: DEFAULT_BLINK_GROUP.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.blink.validate()
    }
}

/// Durations (seconds) for the blink state machine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Mean spacing between blinks. Next onset is `clock + r * (2 * interval - 1)`.
    pub interval: f64,
    /// Time to close the eyelid; the closed hold reuses it.
    pub closing: f64,
    /// Time to reopen the eyelid.
    pub opening: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            interval: 4.0,
            closing: 0.1,
            opening: 0.15,
        }
    }
}

impl BlinkConfig {
    /// Closing/opening divide the state clock, so both must be positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("interval", self.interval),
            ("closing", self.closing),
            ("opening", self.opening),
        ] {
            if !value.is_finite() {
                return Err(MotionError::InvalidConfig {
                    reason: format!("blink.{name} must be finite, got {value}"),
                });
            }
        }
        if self.closing <= 0.0 || self.opening <= 0.0 {
            return Err(MotionError::InvalidConfig {
                reason: format!(
                    "blink closing/opening must be > 0 (closing={}, opening={})",
                    self.closing, self.opening
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = Config::default();
        assert_eq!(cfg.blink_group, "EyeBlink");
        assert_eq!(cfg.blink.interval, 4.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_closing() {
        let cfg = BlinkConfig {
            closing: 0.0,
            ..BlinkConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(MotionError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "blink": { "interval": 2.5 } }"#).unwrap();
        assert_eq!(cfg.blink.interval, 2.5);
        assert_eq!(cfg.blink.closing, 0.1);
        assert_eq!(cfg.blink_group, "EyeBlink");
    }
}
