//! The search box engine.
//!
//! [`SearchBox`] wires the controllers together: input events come in as
//! explicit [`InputEvent`] values, the debounced suggestion refresh runs from
//! [`SearchBox::tick`], and anything the host UI must perform (navigation)
//! comes back as an [`Effect`]. Rendering stays outside; the host registers a
//! render callback on the shared [`StateHandle`].
//!
//! Submission rules:
//!
//! - empty text opens the recommended target when one was fetched, otherwise
//!   the blank search page
//! - identifier text is copied to the clipboard with a confirmation tip that
//!   auto-hides after two seconds (re-showing resets the timer)
//! - plain text is recorded in history, then the form navigates to the
//!   search results page

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::warn;

use crate::clipboard::ClipboardSink;
use crate::history::{HistoryStore, LegacyHistoryProvider};
use crate::idjump;
use crate::input::InputController;
use crate::navlist::{Focus, NavList};
use crate::remote::{SEARCH_HOME, SuggestApi, search_url};
use crate::storage::StringStore;
use crate::suggest::{StateHandle, SuggestFetcher};

/// How long the copy confirmation stays visible.
pub const COPY_TIP_DURATION: Duration = Duration::from_secs(2);

/// Explicit input events delivered by the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    TextChanged(String),
    CompositionStart,
    CompositionEnd,
    KeySubmit,
    KeyNext,
    KeyPrev,
    KeyDelete,
}

/// What the host must do after an event. The engine never navigates itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Open a URL in a new context (id jump target, recommended target).
    OpenUrl(String),
    /// Submit the search form: navigate to the search results page.
    SubmitForm { url: String },
    /// An identifier was copied; the confirmation tip is showing.
    Copied,
}

/// Placeholder label and shortcut target from the recommendation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub placeholder: String,
    pub target: String,
}

/// The suggestion/history engine behind a site search box.
pub struct SearchBox<A: SuggestApi, S: StringStore> {
    history: HistoryStore<S>,
    fetcher: SuggestFetcher<A>,
    input: InputController,
    nav: NavList,
    clipboard: Box<dyn ClipboardSink>,
    recommended: Option<Recommendation>,
    copy_tip_until: Option<Instant>,
}

impl<A: SuggestApi, S: StringStore> SearchBox<A, S> {
    pub fn new(api: A, store: S, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self {
            history: HistoryStore::new(store),
            fetcher: SuggestFetcher::new(api, StateHandle::new()),
            input: InputController::new(),
            nav: NavList::new(),
            clipboard,
            recommended: None,
            copy_tip_until: None,
        }
    }

    pub fn state(&self) -> &StateHandle {
        self.fetcher.state()
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn focus(&self) -> Focus {
        self.nav.focus()
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommended.as_ref()
    }

    /// One-time legacy history migration; see [`HistoryStore::migrate_legacy`].
    pub fn migrate_legacy(&mut self, provider: &mut dyn LegacyHistoryProvider) {
        self.history.migrate_legacy(provider);
    }

    /// Fetch the default-search recommendation. On failure the feature
    /// degrades to no placeholder and no shortcut.
    pub async fn load_recommendation(&mut self) {
        match self.fetcher.api().default_search().await {
            Ok(resp) if resp.code == 0 => {
                if let Some(data) = resp.data {
                    let target = if !data.url.is_empty() {
                        data.url
                    } else if data.name.starts_with("av") {
                        format!("https://www.bilibili.com/{}", data.name)
                    } else {
                        search_url(&data.name)
                    };
                    self.recommended = Some(Recommendation { placeholder: data.show_name, target });
                } else {
                    warn!("search recommendation response carried no data");
                }
            }
            Ok(resp) => warn!("search recommendation lookup returned code {}", resp.code),
            Err(e) => warn!("search recommendation lookup failed: {e}"),
        }
    }

    /// Deliver one input event. Navigation and clipboard work comes back as
    /// an [`Effect`]; suggestion refreshes are only scheduled here and run
    /// from [`SearchBox::tick`].
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) -> Effect {
        match event {
            InputEvent::TextChanged(text) => {
                self.input.text_changed(text, now);
                Effect::None
            }
            InputEvent::CompositionStart => {
                self.input.composition_start();
                Effect::None
            }
            InputEvent::CompositionEnd => {
                self.input.composition_end(now);
                Effect::None
            }
            InputEvent::KeyNext => {
                let total = self.row_count();
                match self.nav.focus() {
                    Focus::Input => {
                        self.nav.enter_list(total);
                    }
                    Focus::Item(_) => self.nav.move_next(total),
                }
                Effect::None
            }
            InputEvent::KeyPrev => {
                self.nav.move_prev();
                Effect::None
            }
            InputEvent::KeyDelete => match self.nav.focus() {
                Focus::Item(index) => {
                    self.delete_row(index);
                    Effect::None
                }
                Focus::Input => Effect::None,
            },
            InputEvent::KeySubmit => match self.nav.focus() {
                Focus::Input => self.submit_input(now),
                Focus::Item(index) => self.activate_row(index, now),
            },
        }
    }

    /// Drive the timers: hide an expired copy tip and run the suggestion
    /// refresh once the debounce window has elapsed.
    pub async fn tick(&mut self, now: Instant) {
        if let Some(until) = self.copy_tip_until
            && now >= until
        {
            self.copy_tip_until = None;
            self.state().update(|s| s.show_copy_tip = false);
        }
        if self.input.take_due_refresh(now) {
            self.refresh_now().await;
        }
    }

    /// Refresh suggestions for the current text immediately, bypassing the
    /// debounce (initial render, host-forced updates).
    pub async fn refresh_now(&mut self) {
        let text = self.input.text().to_string();
        self.fetcher.refresh(&text, self.history.list()).await;
        self.nav.clamp(self.row_count());
    }

    fn submit_input(&mut self, now: Instant) -> Effect {
        let text = self.input.text().to_string();
        if text.is_empty() {
            let url = self
                .recommended
                .as_ref()
                .map(|r| r.target.clone())
                .unwrap_or_else(|| SEARCH_HOME.to_string());
            return Effect::OpenUrl(url);
        }
        if idjump::classify(&text).is_id() {
            return self.copy_identifier(&text, now);
        }
        self.record_and_submit(&text)
    }

    fn activate_row(&mut self, index: usize, now: Instant) -> Effect {
        let (value, is_clear_row) = {
            let state = self.state().borrow();
            let clear_row = state.is_history && !state.items.is_empty();
            if index < state.items.len() {
                (Some(state.items[index].value.clone()), false)
            } else {
                (None, clear_row && index == state.items.len())
            }
        };

        if is_clear_row {
            if let Err(e) = self.history.clear() {
                warn!("failed to clear search history: {e:#}");
            }
            self.state().update(|s| s.items.clear());
            self.nav.focus_input();
            return Effect::None;
        }

        let Some(value) = value else {
            return Effect::None;
        };
        if idjump::classify(&value).is_id() {
            return self.copy_identifier(&value, now);
        }
        self.input.set_text(value.clone());
        self.record_and_submit(&value)
    }

    fn delete_row(&mut self, index: usize) {
        let value = {
            let state = self.state().borrow();
            if !state.is_history || index >= state.items.len() {
                return;
            }
            state.items[index].value.clone()
        };

        if !self.input.text().is_empty() {
            self.input.set_text("");
        }
        if let Err(e) = self.history.remove(&value) {
            warn!("failed to remove history entry: {e:#}");
        }
        self.state().update(|s| {
            s.items.remove(index);
        });
        self.nav.clamp(self.row_count());
    }

    /// Copy an identifier and show the confirmation tip. Best-effort: a
    /// clipboard failure is logged and the tip stays hidden.
    fn copy_identifier(&mut self, value: &str, now: Instant) -> Effect {
        if let Err(e) = self.clipboard.set_text(value) {
            warn!("clipboard copy failed: {e:#}");
            return Effect::None;
        }
        // Re-showing resets the timer rather than stacking a second one
        self.copy_tip_until = Some(now + COPY_TIP_DURATION);
        self.state().update(|s| s.show_copy_tip = true);
        Effect::Copied
    }

    fn record_and_submit(&mut self, text: &str) -> Effect {
        if let Err(e) = self.history.add(text, Utc::now().timestamp_millis()) {
            warn!("failed to record search history: {e:#}");
        }
        Effect::SubmitForm { url: search_url(text) }
    }

    /// Focusable rows: the visible items plus the trailing clear-history row
    /// in history mode.
    fn row_count(&self) -> usize {
        let state = self.state().borrow();
        let clear_row = state.is_history && !state.items.is_empty();
        state.items.len() + usize::from(clear_row)
    }
}
