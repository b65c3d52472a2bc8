//! Debounce policy for mask synchronization.
//!
//! Edits arrive in bursts (every move of a drag mutates the list); the
//! backend only needs the settled state. [`SyncDebouncer`] is the pure
//! one-slot policy: scheduling replaces any pending deadline, and a
//! firing is due exactly once after a quiet period. The IO layer owns
//! the actual wakeup timer and asks this policy whether to send.
//!
//! Time is an explicit millisecond parameter so the burst-collapsing
//! behavior is testable on a simulated clock.

/// Quiet period before a scheduled mask push fires.
pub const MASK_SYNC_DEBOUNCE_MS: f64 = 120.0;

/// One-slot deferred-send holder.
///
/// At most one push is ever pending: [`schedule`](Self::schedule)
/// cancels-and-replaces rather than queueing.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncDebouncer {
    window_ms: f64,
    deadline: Option<f64>,
}

impl SyncDebouncer {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    /// Schedule (or postpone) the pending push to `now + window`.
    pub const fn schedule(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.window_ms);
    }

    /// Whether a push is scheduled but has not fired yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the pending deadline if it has elapsed.
    ///
    /// Returns `true` at most once per scheduled burst: the slot is
    /// cleared on firing, so a stale wakeup after the send finds
    /// nothing to do.
    pub fn fire_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending push without sending.
    pub const fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for SyncDebouncer {
    fn default() -> Self {
        Self::new(MASK_SYNC_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending_initially() {
        let mut d = SyncDebouncer::default();
        assert!(!d.is_pending());
        assert!(!d.fire_due(1_000_000.0));
    }

    #[test]
    fn fires_once_after_quiet_window() {
        let mut d = SyncDebouncer::new(120.0);
        d.schedule(0.0);
        assert!(d.is_pending());
        assert!(!d.fire_due(119.0));
        assert!(d.fire_due(120.0));
        assert!(!d.is_pending());
        assert!(!d.fire_due(500.0), "slot is consumed by the firing");
    }

    #[test]
    fn burst_of_edits_collapses_to_one_firing() {
        // Ten drag-move events inside 50 ms: the deadline keeps moving,
        // and exactly one firing is due once the burst goes quiet.
        let mut d = SyncDebouncer::new(120.0);
        let mut fired = 0;
        for i in 0..10 {
            let now = f64::from(i) * 5.0;
            d.schedule(now);
            if d.fire_due(now) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0, "nothing may fire inside the burst");
        // Poll past the last deadline (45 + 120).
        for step in 0..40 {
            if d.fire_due(50.0 + f64::from(step) * 5.0) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn reschedule_postpones_the_deadline() {
        let mut d = SyncDebouncer::new(120.0);
        d.schedule(0.0);
        d.schedule(100.0);
        assert!(!d.fire_due(120.0), "first deadline was replaced");
        assert!(d.fire_due(220.0));
    }

    #[test]
    fn cancel_discards_pending_push() {
        let mut d = SyncDebouncer::new(120.0);
        d.schedule(0.0);
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.fire_due(1_000.0));
    }

    #[test]
    fn schedule_after_firing_starts_a_new_cycle() {
        let mut d = SyncDebouncer::new(120.0);
        d.schedule(0.0);
        assert!(d.fire_due(120.0));
        d.schedule(200.0);
        assert!(!d.fire_due(319.0));
        assert!(d.fire_due(320.0));
    }
}
