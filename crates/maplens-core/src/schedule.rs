//! Timers driven by the host event loop
//!
//! Nothing here owns a clock or spawns a task. The host passes the current
//! instant on every call and polls when its own timer fires.

use std::time::{Duration, Instant};

use crate::geometry::Size;

/// Debounces full decoration passes after content edits.
#[derive(Debug, Clone)]
pub struct DecorationScheduler {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DecorationScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record an edit; pushes the pending pass back by the full delay.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending pass becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` exactly once per burst of edits, when the quiet period
    /// has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop a pending pass (a full pass ran for another reason).
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Tracks the overlay canvas size.
///
/// Measurements taken right after mount often see a zero-sized parent, so
/// they are held back until the settle delay has passed.
#[derive(Debug, Clone)]
pub struct CanvasSizeTracker {
    settle: Duration,
    mounted_at: Option<Instant>,
    size: Size,
    pending: Option<Size>,
}

impl CanvasSizeTracker {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            mounted_at: None,
            size: Size::default(),
            pending: None,
        }
    }

    pub fn mount(&mut self, now: Instant) {
        self.mounted_at = Some(now);
        self.size = Size::default();
        self.pending = None;
    }

    pub fn unmount(&mut self) {
        self.mounted_at = None;
        self.pending = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted_at.is_some()
    }

    /// Last accepted size.
    pub fn size(&self) -> Size {
        self.size
    }

    fn settled(&self, now: Instant) -> bool {
        self.mounted_at
            .is_some_and(|mounted| now >= mounted + self.settle)
    }

    /// Feed a resize observation. Returns `true` if the accepted size
    /// changed and the overlay should be redrawn.
    pub fn observe(&mut self, now: Instant, size: Size) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if !self.settled(now) {
            self.pending = Some(size);
            return false;
        }
        self.pending = None;
        self.accept(size)
    }

    /// Apply a measurement held back during the settle delay.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.settled(now) {
            return false;
        }
        match self.pending.take() {
            Some(size) => self.accept(size),
            None => false,
        }
    }

    fn accept(&mut self, size: Size) -> bool {
        if size == self.size {
            return false;
        }
        tracing::trace!(width = size.width, height = size.height, "Overlay canvas resized");
        self.size = size;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn debounce_restarts_on_each_edit() {
        let t0 = Instant::now();
        let mut scheduler = DecorationScheduler::new(300 * MS);
        assert!(!scheduler.poll(t0));

        scheduler.note_edit(t0);
        scheduler.note_edit(t0 + 200 * MS);
        assert!(!scheduler.poll(t0 + 400 * MS));
        assert_eq!(scheduler.deadline(), Some(t0 + 500 * MS));
        assert!(scheduler.poll(t0 + 500 * MS));
        assert!(!scheduler.poll(t0 + 900 * MS));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn cancel_drops_pending_pass() {
        let t0 = Instant::now();
        let mut scheduler = DecorationScheduler::new(300 * MS);
        scheduler.note_edit(t0);
        scheduler.cancel();
        assert!(!scheduler.poll(t0 + 1000 * MS));
    }

    #[test]
    fn measurements_wait_for_settle() {
        let t0 = Instant::now();
        let mut tracker = CanvasSizeTracker::new(100 * MS);
        assert!(!tracker.observe(t0, Size::new(10.0, 10.0)));

        tracker.mount(t0);
        assert!(!tracker.observe(t0 + 10 * MS, Size::new(0.0, 0.0)));
        assert!(!tracker.observe(t0 + 20 * MS, Size::new(800.0, 600.0)));
        assert_eq!(tracker.size(), Size::default());

        assert!(!tracker.poll(t0 + 50 * MS));
        assert!(tracker.poll(t0 + 100 * MS));
        assert_eq!(tracker.size(), Size::new(800.0, 600.0));
        assert!(!tracker.poll(t0 + 150 * MS));
    }

    #[test]
    fn unchanged_size_is_not_a_redraw() {
        let t0 = Instant::now();
        let mut tracker = CanvasSizeTracker::new(100 * MS);
        tracker.mount(t0);
        let later = t0 + 200 * MS;
        assert!(tracker.observe(later, Size::new(800.0, 600.0)));
        assert!(!tracker.observe(later, Size::new(800.0, 600.0)));
        assert!(tracker.observe(later, Size::new(820.0, 600.0)));

        tracker.unmount();
        assert!(!tracker.observe(later, Size::new(1.0, 1.0)));
    }
}
