//! Idle eye-blink timer.
//!
//! A five-state machine advanced once per tick. It produces a single eyelid
//! openness value (1 open, 0 closed) and writes it to every configured
//! parameter id.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::BlinkConfig;
use crate::error::Result;
use crate::params::ParameterTable;
use crate::random::{RandomSource, ThreadRandom};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlinkState {
    #[default]
    Initial,
    Interval,
    Closing,
    Closed,
    Opening,
}

pub struct BlinkManager {
    ids: Vec<String>,
    state: BlinkState,
    config: BlinkConfig,
    clock: f64,
    state_start: f64,
    next_blink: f64,
    random: Box<dyn RandomSource>,
}

impl fmt::Debug for BlinkManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlinkManager")
            .field("ids", &self.ids)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("state_start", &self.state_start)
            .field("next_blink", &self.next_blink)
            .finish_non_exhaustive()
    }
}

impl BlinkManager {
    pub fn new(
        ids: Vec<String>,
        config: BlinkConfig,
        random: Box<dyn RandomSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ids,
            state: BlinkState::Initial,
            config,
            clock: 0.0,
            state_start: 0.0,
            next_blink: 0.0,
            random,
        })
    }

    /// Default timings and the thread RNG.
    pub fn with_defaults(ids: Vec<String>) -> Self {
        Self {
            ids,
            state: BlinkState::Initial,
            config: BlinkConfig::default(),
            clock: 0.0,
            state_start: 0.0,
            next_blink: 0.0,
            random: Box::new(ThreadRandom),
        }
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    pub fn config(&self) -> &BlinkConfig {
        &self.config
    }

    pub fn parameter_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn next_blink(&self) -> f64 {
        self.next_blink
    }

    /// `clock + r * (2 * interval - 1)`. A small draw can land in the past,
    /// in which case the blink starts on the next tick.
    pub fn determine_next_blink_time(&mut self) -> f64 {
        let r = self.random.next_unit();
        self.clock + r * (2.0 * self.config.interval - 1.0)
    }

    /// Advance the clock by `dt`, step the state machine and write the eyelid
    /// value. Returns the value written.
    pub fn update(&mut self, dt: f64, table: &mut dyn ParameterTable) -> f32 {
        self.clock += dt;
        let value = self.step();
        for id in &self.ids {
            table.set_parameter_value(id, value as f32);
        }
        value as f32
    }

    fn step(&mut self) -> f64 {
        match self.state {
            BlinkState::Initial => {
                self.next_blink = self.determine_next_blink_time();
                self.enter(BlinkState::Interval);
                1.0
            }
            BlinkState::Interval => {
                if self.clock >= self.next_blink {
                    self.enter(BlinkState::Closing);
                }
                1.0
            }
            BlinkState::Closing => {
                let t = self.progress(self.config.closing);
                if t >= 1.0 {
                    self.enter(BlinkState::Closed);
                }
                1.0 - t
            }
            BlinkState::Closed => {
                if self.progress(self.config.closing) >= 1.0 {
                    self.enter(BlinkState::Opening);
                }
                0.0
            }
            BlinkState::Opening => {
                let t = self.progress(self.config.opening);
                if t >= 1.0 {
                    self.next_blink = self.determine_next_blink_time();
                    self.enter(BlinkState::Interval);
                }
                t.min(1.0)
            }
        }
    }

    fn progress(&self, duration: f64) -> f64 {
        (self.clock - self.state_start) / duration
    }

    fn enter(&mut self, state: BlinkState) {
        debug!(
            "blink: {:?} -> {:?} at {:.3}s",
            self.state, state, self.clock
        );
        self.state = state;
        self.state_start = self.clock;
    }
}
