//! Playback entries and the queue that owns them.
//!
//! Entries are appended at the tail by `start` and removed anywhere by
//! `close`. Only the tail entry advances; earlier entries stay frozen until
//! closed.

use std::sync::Arc;

use log::debug;

use crate::audio::{AudioCue, AudioSystem};
use crate::data::Motion;
use crate::error::Result;
use crate::ids::{EntryId, IdAllocator};

/// One playback instance of a motion.
#[derive(Debug)]
pub struct Entry {
    id: EntryId,
    motion: Arc<Motion>,
    elapsed: f64,
    /// Set at start and on reset; cleared by the next advance.
    fresh: bool,
    cue: Option<Box<dyn AudioCue>>,
}

impl Entry {
    fn new(id: EntryId, motion: Arc<Motion>) -> Self {
        Self {
            id,
            motion,
            elapsed: 0.0,
            fresh: true,
            cue: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn motion(&self) -> &Arc<Motion> {
        &self.motion
    }

    /// Seconds since start (or since the last reset).
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// True once elapsed time reaches the duration. A negative duration is
    /// reached by the first advance.
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.motion.duration()
    }

    /// True if the entry has loaded its audio cue.
    pub fn has_cue(&self) -> bool {
        self.cue.is_some()
    }

    /// Advance by `dt`; returns whether this was the first advance since start/reset.
    pub(crate) fn advance(&mut self, dt: f64) -> bool {
        let first = std::mem::take(&mut self.fresh);
        self.elapsed += dt;
        first
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fresh = true;
    }

    /// Load the motion's cue on first use and start it. No-op without a cue.
    pub(crate) fn trigger_cue(&mut self, audio: &mut dyn AudioSystem) -> Result<()> {
        let Some(path) = self.motion.sound() else {
            return Ok(());
        };
        if self.cue.is_none() {
            self.cue = Some(audio.load_cue(path)?);
        }
        debug!("{}: playing cue '{path}'", self.id);
        match self.cue.as_mut() {
            Some(cue) => cue.play(),
            None => Ok(()),
        }
    }

    fn release(&mut self) -> Result<()> {
        match self.cue.take() {
            Some(mut cue) => cue.close(),
            None => Ok(()),
        }
    }
}

/// Ordered entries; the last one is the active entry.
#[derive(Debug, Default)]
pub struct MotionQueue {
    ids: IdAllocator,
    entries: Vec<Entry>,
}

impl MotionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry with elapsed time 0 and return its id.
    pub fn start(&mut self, motion: impl Into<Arc<Motion>>) -> EntryId {
        let id = self.ids.alloc_entry();
        self.entries.push(Entry::new(id, motion.into()));
        debug!("{id}: started (queue length {})", self.entries.len());
        id
    }

    /// Remove the entry and close its audio cue. Unknown ids are ignored.
    ///
    /// The entry is removed even when closing its cue fails; the error is returned.
    pub fn close(&mut self, id: EntryId) -> Result<()> {
        let Some(pos) = self.position(id) else {
            return Ok(());
        };
        let mut entry = self.entries.remove(pos);
        debug!("{id}: closed at {:.3}s", entry.elapsed);
        entry.release()
    }

    /// Rewind the entry to 0 without moving it. Unknown ids are ignored.
    pub fn reset(&mut self, id: EntryId) {
        if let Some(entry) = self.get_mut(id) {
            entry.reset();
            debug!("{id}: reset");
        }
    }

    /// Close every entry, returning the first cue error encountered.
    pub fn clear(&mut self) -> Result<()> {
        let mut first_err = None;
        for mut entry in self.entries.drain(..) {
            if let Err(err) = entry.release() {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position(id).is_some()
    }

    /// The active entry.
    pub fn tail(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub(crate) fn tail_mut(&mut self) -> Option<&mut Entry> {
        self.entries.last_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
