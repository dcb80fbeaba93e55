//! Keystroke and composition handling for the input field.
//!
//! [`InputController`] owns the current input text, the composition flag for
//! multi-keystroke input methods, and the debounce timer that gates
//! suggestion refreshes:
//!
//! - text changes during composition are ignored (intermediate states must
//!   not trigger fetches)
//! - composition end always schedules one synthetic trigger, since the text
//!   just became final
//! - qualifying triggers collapse through a 200 ms trailing-edge debounce

pub mod debounce;

use std::time::{Duration, Instant};

pub use debounce::Debouncer;

/// Debounce window for suggestion refresh triggers.
pub const SUGGEST_DEBOUNCE: Duration = Duration::from_millis(200);

/// Input-field state: current text, composition flag, refresh debouncing.
#[derive(Debug)]
pub struct InputController {
    text: String,
    composing: bool,
    debouncer: Debouncer,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self { text: String::new(), composing: false, debouncer: Debouncer::new(SUGGEST_DEBOUNCE) }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Overwrite the text without scheduling a refresh (selection fill-in,
    /// history-row deletion).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn composing(&self) -> bool {
        self.composing
    }

    /// Raw input change. Ignored while composing; otherwise schedules a
    /// debounced refresh.
    pub fn text_changed(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        if !self.composing {
            self.debouncer.schedule(now);
        }
    }

    pub fn composition_start(&mut self) {
        self.composing = true;
    }

    /// Composition finished: the text is final, so force one trigger.
    pub fn composition_end(&mut self, now: Instant) {
        self.composing = false;
        self.debouncer.schedule(now);
    }

    /// True once the debounce window after the last trigger has elapsed; the
    /// caller then runs the suggestion refresh.
    pub fn take_due_refresh(&mut self, now: Instant) -> bool {
        self.debouncer.fire_if_due(now)
    }

    pub fn refresh_pending(&self) -> bool {
        self.debouncer.pending()
    }
}
