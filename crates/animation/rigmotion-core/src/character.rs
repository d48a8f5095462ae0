//! Character facade: the owning model that ties motions, the parameter table
//! and both managers together.
//!
//! Motions are registered under group names (e.g. `"Idle"`, `"TapBody"`) and
//! played by `(group, index)`. Looping is a per-playback choice recorded in the
//! manager's [`LoopRegistry`].

use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, warn};

use crate::audio::AudioSystem;
use crate::blink::BlinkManager;
use crate::config::Config;
use crate::data::Motion;
use crate::error::{MotionError, Result};
use crate::ids::EntryId;
use crate::motion_manager::{LoopRegistry, MotionManager};
use crate::params::ParameterTable;
use crate::random::RandomSource;

#[derive(Debug)]
pub struct Character<T: ParameterTable> {
    table: T,
    config: Config,
    motions: HashMap<String, Vec<Arc<Motion>>>,
    parameter_groups: HashMap<String, Vec<String>>,
    motion_manager: MotionManager<LoopRegistry>,
    blink: Option<BlinkManager>,
}

impl<T: ParameterTable> Character<T> {
    pub fn new(table: T, config: Config, audio: Box<dyn AudioSystem>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table,
            config,
            motions: HashMap::new(),
            parameter_groups: HashMap::new(),
            motion_manager: MotionManager::new(LoopRegistry::new(), audio),
            blink: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Append a motion to `group`; returns its index within the group.
    pub fn add_motion(&mut self, group: &str, motion: impl Into<Arc<Motion>>) -> usize {
        let list = self.motions.entry(group.to_string()).or_default();
        list.push(motion.into());
        list.len() - 1
    }

    pub fn motion_group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.motions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Motions registered under `group` (empty for unknown groups).
    pub fn motions(&self, group: &str) -> &[Arc<Motion>] {
        self.motions.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_parameter_group(&mut self, name: &str, ids: Vec<String>) {
        self.parameter_groups.insert(name.to_string(), ids);
    }

    pub fn parameter_group(&self, name: &str) -> Option<&[String]> {
        self.parameter_groups.get(name).map(Vec::as_slice)
    }

    /// Start `motions(group)[index]` as the active motion.
    pub fn play_motion(&mut self, group: &str, index: usize, looping: bool) -> Result<EntryId> {
        let list = self
            .motions
            .get(group)
            .ok_or_else(|| MotionError::GroupNotFound {
                group: group.to_string(),
            })?;
        let motion = list
            .get(index)
            .cloned()
            .ok_or_else(|| MotionError::MotionIndexOutOfRange {
                group: group.to_string(),
                index,
                len: list.len(),
            })?;
        let id = self.motion_manager.start(motion);
        if looping {
            self.motion_manager.handler_mut().register(id);
        }
        debug!("{id}: playing {group}[{index}] (looping: {looping})");
        Ok(id)
    }

    pub fn stop_motion(&mut self, id: EntryId) -> Result<()> {
        self.motion_manager.handler_mut().unregister(id);
        self.motion_manager.close(id)
    }

    pub fn is_looping(&self, id: EntryId) -> bool {
        self.motion_manager.handler().is_looping(id)
    }

    pub fn motion_manager(&self) -> &MotionManager<LoopRegistry> {
        &self.motion_manager
    }

    /// Drive the configured blink group. Returns false when that group has not
    /// been set.
    pub fn enable_auto_blink(&mut self, random: Box<dyn RandomSource>) -> bool {
        let Some(ids) = self.parameter_groups.get(&self.config.blink_group) else {
            warn!(
                "auto-blink requested without a '{}' parameter group",
                self.config.blink_group
            );
            return false;
        };
        match BlinkManager::new(ids.clone(), self.config.blink, random) {
            Ok(blink) => {
                self.blink = Some(blink);
                true
            }
            Err(err) => {
                warn!("auto-blink disabled: {err}");
                false
            }
        }
    }

    pub fn disable_auto_blink(&mut self) {
        self.blink = None;
    }

    pub fn blink(&self) -> Option<&BlinkManager> {
        self.blink.as_ref()
    }

    /// One animation tick: motions first, then the blink overlay.
    ///
    /// The blink still runs when the motion manager reports an audio error;
    /// that error is returned afterwards.
    pub fn update(&mut self, dt: f64) -> Result<()> {
        let motion_result = self.motion_manager.update(dt, &mut self.table);
        if let Some(blink) = &mut self.blink {
            blink.update(dt, &mut self.table);
        }
        motion_result
    }

    pub fn parameter_value(&self, id: &str) -> f32 {
        self.table.parameter_value(id)
    }

    pub fn set_parameter_value(&mut self, id: &str, value: f32) {
        self.table.set_parameter_value(id, value);
    }

    pub fn parameters(&self) -> Vec<(String, f32)> {
        self.table.parameter_values()
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }
}
