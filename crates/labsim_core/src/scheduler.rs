//! Frame scheduling
//!
//! The clock never sleeps or polls on its own. It asks a [`FrameScheduler`]
//! for the next frame and is handed the frame key back when it is due. Each
//! request yields a fresh generational [`FrameKey`], so a handle that was
//! cancelled can never be confused with a later one.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a requested frame
    pub struct FrameKey;
}

/// Source of frame callbacks
pub trait FrameScheduler {
    /// Ask for a frame `delay` seconds from now
    fn request_frame(&mut self, delay: f64) -> FrameKey;

    /// Cancel a pending frame; returns false if it was not pending
    fn cancel_frame(&mut self, frame: FrameKey) -> bool;
}

/// Scheduler driven by explicit calls to [`advance`](Self::advance)
///
/// Used by the headless runner (fed from wall-clock deltas) and by tests
/// (fed fixed deltas).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: f64,
    pending: SlotMap<FrameKey, f64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds advanced so far
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move time forward and return the frames that became due, earliest first
    ///
    /// Due frames are removed. Frames requested while the caller handles the
    /// returned ones are not due until a later call.
    pub fn advance(&mut self, elapsed: f64) -> Vec<FrameKey> {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.now += elapsed;
        }
        let now = self.now;
        let mut due: Vec<(FrameKey, f64)> = self
            .pending
            .iter()
            .filter(|(_, &at)| at <= now)
            .map(|(key, &at)| (key, at))
            .collect();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        for (key, _) in &due {
            self.pending.remove(*key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self, delay: f64) -> FrameKey {
        self.pending.insert(self.now + delay.max(0.0))
    }

    fn cancel_frame(&mut self, frame: FrameKey) -> bool {
        self.pending.remove(frame).is_some()
    }
}
