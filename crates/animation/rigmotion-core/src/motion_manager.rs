//! Motion manager: advances the active entry and applies its curves.
//!
//! Each `update(dt)`:
//! 1. advance the tail entry; if it finished, hand its id to the finish handler
//! 2. stop if the queue is now empty
//! 3. restore the parameter snapshot from the previous tick
//! 4. on the entry's first tick, start its audio cue
//! 5. compute fade weights at the entry's elapsed time
//! 6. apply every curve with a segment at that time
//! 7. snapshot the parameter table for the next tick
//!
//! Audio failures do not interrupt the tick; the first one is returned after
//! the snapshot is taken.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use log::{debug, trace, warn};

use crate::audio::{AudioSystem, SilentAudio};
use crate::data::{CurveTarget, Motion};
use crate::error::Result;
use crate::fade::Fade;
use crate::ids::EntryId;
use crate::params::{ParameterSnapshot, ParameterTable};
use crate::queue::MotionQueue;

/// Decides what happens to an entry whose elapsed time reached its duration.
///
/// The engine has no notion of looping; handlers typically `reset` looping
/// ids and `close` everything else.
pub trait FinishHandler {
    fn on_finished(&mut self, id: EntryId, queue: &mut MotionQueue) -> Result<()>;
}

impl<F> FinishHandler for F
where
    F: FnMut(EntryId, &mut MotionQueue) -> Result<()>,
{
    fn on_finished(&mut self, id: EntryId, queue: &mut MotionQueue) -> Result<()> {
        self(id, queue)
    }
}

/// Finish policy keyed by entry id: registered ids restart, others close.
#[derive(Clone, Debug, Default)]
pub struct LoopRegistry {
    looping: HashSet<EntryId>,
}

impl LoopRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: EntryId) {
        self.looping.insert(id);
    }

    /// Returns whether the id was registered.
    pub fn unregister(&mut self, id: EntryId) -> bool {
        self.looping.remove(&id)
    }

    pub fn is_looping(&self, id: EntryId) -> bool {
        self.looping.contains(&id)
    }
}

impl FinishHandler for LoopRegistry {
    fn on_finished(&mut self, id: EntryId, queue: &mut MotionQueue) -> Result<()> {
        if self.is_looping(id) {
            queue.reset(id);
            Ok(())
        } else {
            queue.close(id)
        }
    }
}

/// Owns the playback queue and the parameter snapshot.
pub struct MotionManager<H: FinishHandler = LoopRegistry> {
    queue: MotionQueue,
    handler: H,
    audio: Box<dyn AudioSystem>,
    snapshot: Option<ParameterSnapshot>,
}

impl<H: FinishHandler> fmt::Debug for MotionManager<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionManager")
            .field("queue", &self.queue)
            .field("audio", &self.audio)
            .field("snapshot", &self.snapshot.as_ref().map(ParameterSnapshot::len))
            .finish_non_exhaustive()
    }
}

impl Default for MotionManager<LoopRegistry> {
    fn default() -> Self {
        Self::new(LoopRegistry::new(), Box::new(SilentAudio))
    }
}

impl<H: FinishHandler> MotionManager<H> {
    pub fn new(handler: H, audio: Box<dyn AudioSystem>) -> Self {
        Self {
            queue: MotionQueue::new(),
            handler,
            audio,
            snapshot: None,
        }
    }

    /// Append a motion at the tail; it becomes the active entry.
    pub fn start(&mut self, motion: impl Into<Arc<Motion>>) -> EntryId {
        self.queue.start(motion)
    }

    /// Remove an entry and release its audio cue. Unknown ids are ignored.
    pub fn close(&mut self, id: EntryId) -> Result<()> {
        self.queue.close(id)
    }

    /// Rewind an entry to 0 without reordering. Unknown ids are ignored.
    pub fn reset(&mut self, id: EntryId) {
        self.queue.reset(id);
    }

    pub fn queue(&self) -> &MotionQueue {
        &self.queue
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Snapshot taken at the end of the last applied tick.
    pub fn snapshot(&self) -> Option<&ParameterSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Advance the active entry by `dt` seconds and write its curves into `table`.
    pub fn update(&mut self, dt: f64, table: &mut dyn ParameterTable) -> Result<()> {
        let (advanced, first_tick, finished) = match self.queue.tail_mut() {
            Some(entry) => {
                let first = entry.advance(dt);
                (entry.id(), first, entry.is_finished())
            }
            None => return Ok(()),
        };

        let mut deferred = None;
        if finished {
            debug!("{advanced}: finished");
            if let Err(err) = self.handler.on_finished(advanced, &mut self.queue) {
                warn!("{advanced}: finish handler failed: {err}");
                deferred = Some(err);
            }
        }

        let Some(entry) = self.queue.tail_mut() else {
            return deferred.map_or(Ok(()), Err);
        };

        if let Some(snapshot) = &self.snapshot {
            snapshot.restore(table);
        }

        if first_tick && entry.id() == advanced {
            if let Err(err) = entry.trigger_cue(self.audio.as_mut()) {
                warn!("{advanced}: audio cue failed: {err}");
                deferred.get_or_insert(err);
            }
        }

        let motion = Arc::clone(entry.motion());
        let elapsed = entry.elapsed();
        trace!("{}: applying at {elapsed:.4}s", entry.id());
        apply_motion(&motion, elapsed, table);

        self.snapshot = Some(ParameterSnapshot::capture(table));
        deferred.map_or(Ok(()), Err)
    }

    /// Close every entry and forget the snapshot.
    pub fn stop_all(&mut self) -> Result<()> {
        self.snapshot = None;
        self.queue.clear()
    }
}

/// Evaluate every curve of `motion` at `elapsed` and write the results.
pub fn apply_motion(motion: &Motion, elapsed: f64, table: &mut dyn ParameterTable) {
    let fade = Fade::compute(motion, elapsed);
    for curve in motion.curves() {
        let Some(value) = curve.evaluate(elapsed) else {
            continue;
        };
        match curve.target {
            CurveTarget::Model => trace!("skipping model curve '{}'", curve.id),
            CurveTarget::PartOpacity => table.set_part_opacity(&curve.id, value as f32),
            CurveTarget::Parameter => {
                let weight = fade.curve_weight(curve, motion, elapsed);
                let src = f64::from(table.parameter_value(&curve.id));
                let v = src + (value - src) * weight;
                table.set_parameter_value(&curve.id, v as f32);
            }
        }
    }
}
