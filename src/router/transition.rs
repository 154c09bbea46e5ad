//! Deferred low-priority work slot.

/// A single-slot, low-priority work lane.
///
/// Work started here is not run by the caller; the event loop drains it when
/// no urgent input is waiting. While the slot is occupied the lane reports
/// pending, and further `start` calls are rejected rather than queued.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    /// Queued work
    slot: Option<T>,
}

impl<T> Default for Transition<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Transition<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self { slot: None }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    /// Enqueues `work`. Returns `false`, dropping `work`, if already pending.
    pub fn start(&mut self, work: T) -> bool {
        if self.slot.is_some() {
            return false;
        }
        self.slot = Some(work);
        true
    }

    /// Takes the pending work out of the lane, clearing the pending flag.
    pub const fn take(&mut self) -> Option<T> {
        self.slot.take()
    }
}
