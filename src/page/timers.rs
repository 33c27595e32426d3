use std::collections::BTreeMap;

use crate::foundation::core::TimeMs;
use crate::page::host::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TimerId(pub(crate) u64);

/// One-shot timers ordered by deadline, then by creation order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: BTreeMap<(TimeMs, TimerId), ()>,
}

impl TimerQueue {
    pub fn set_timeout(&mut self, now: TimeMs, delay_ms: u64) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.insert((now.saturating_add(delay_ms), id), ());
        id
    }

    /// Returns whether the timer was still pending.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, t)| *t == id).copied();
        match key {
            Some(k) => self.pending.remove(&k).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<TimeMs> {
        self.pending.keys().next().map(|(t, _)| *t)
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: TimeMs) -> Option<TimerId> {
        let (deadline, id) = *self.pending.keys().next()?;
        if deadline > now {
            return None;
        }
        self.pending.remove(&(deadline, id));
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Cancellable delayed task: scheduling again replaces the pending run.
#[derive(Debug)]
pub struct Debouncer {
    wait_ms: u64,
    pending: Option<TimerId>,
}

impl Debouncer {
    pub fn new(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn schedule(&mut self, page: &mut Page) {
        if let Some(prev) = self.pending.take() {
            page.clear_timeout(prev);
        }
        self.pending = Some(page.set_timeout(self.wait_ms));
    }

    /// True (and clears the pending slot) when `fired` is the surviving scheduled run.
    pub fn take_fired(&mut self, fired: TimerId) -> bool {
        if self.pending == Some(fired) {
            self.pending = None;
            return true;
        }
        false
    }

    pub fn cancel(&mut self, page: &mut Page) {
        if let Some(prev) = self.pending.take() {
            page.clear_timeout(prev);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/timers.rs"]
mod tests;
