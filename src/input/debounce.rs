use std::time::{Duration, Instant};

/// Trailing-edge debounce timer.
///
/// Each `schedule` pushes the deadline to `delay` after the latest call, so a
/// burst of triggers collapses into one firing `delay` after the burst ends.
/// The owner polls [`Debouncer::fire_if_due`] from its tick loop.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Arm (or re-arm) the timer at `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop any armed deadline without firing.
    pub fn cancel_pending(&mut self) {
        self.deadline = None;
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the deadline has passed; disarms the timer.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
