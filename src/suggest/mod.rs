//! Suggestion refresh pipeline.
//!
//! [`SuggestFetcher`] owns the visible result list and decides, per trigger,
//! which of three branches applies to the current input text:
//!
//! - empty input: history mode, results come straight from the history store
//! - identifier input: clear results, cross-reference the other id form and
//!   offer to copy it
//! - plain query: remote suggestion lookup with the server highlight token
//!   rewritten to the UI class name
//!
//! Rapid typing leaves several lookups in flight at once. Ordering is enforced
//! by a pending-request key: every trigger records the key of the request it
//! issues (or clears it for the history branch), and a response is applied
//! only if its key is still the pending one when it completes. A superseded
//! response is silently discarded; in-flight requests are never aborted.
//!
//! All state lives behind `Rc<RefCell<_>>` on a single thread; no borrow is
//! held across an await.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::history::MAX_HISTORY_ITEMS;
use crate::idjump::{self, InputKind};
use crate::models::{HistoryEntry, SuggestItem};
use crate::remote::SuggestApi;

/// Highlight marker token the suggestion server embeds in display markup.
pub const HIGHLIGHT_SERVER_TOKEN: &str = "suggest_high_light";
/// Class name the UI expects instead.
pub const HIGHLIGHT_CLASS: &str = "suggest-highlight";

/// Observable search-box state. A render callback registered on the
/// [`StateHandle`] runs after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxState {
    /// Visible suggestion/history rows, fully replaced on each update.
    pub items: Vec<SuggestItem>,
    /// Whether the rows are history entries (empty input) or remote results.
    pub is_history: bool,
    /// Whether the transient copy confirmation is showing.
    pub show_copy_tip: bool,
}

impl Default for SearchBoxState {
    fn default() -> Self {
        // The box starts with empty input, which is history mode
        Self { items: Vec::new(), is_history: true, show_copy_tip: false }
    }
}

type RenderCallback = Box<dyn FnMut(&SearchBoxState)>;

/// Shared handle to the search-box state. Cloning is cheap; all clones point
/// at the same state and render callback.
#[derive(Clone, Default)]
pub struct StateHandle {
    inner: Rc<RefCell<SearchBoxState>>,
    on_change: Rc<RefCell<Option<RenderCallback>>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the render callback invoked after every state change.
    pub fn set_render(&self, callback: RenderCallback) {
        *self.on_change.borrow_mut() = Some(callback);
    }

    pub fn borrow(&self) -> Ref<'_, SearchBoxState> {
        self.inner.borrow()
    }

    /// Mutate the state and notify the render callback.
    pub fn update(&self, mutate: impl FnOnce(&mut SearchBoxState)) {
        mutate(&mut self.inner.borrow_mut());
        if let Some(callback) = self.on_change.borrow_mut().as_mut() {
            callback(&self.inner.borrow());
        }
    }
}

/// Issues suggestion/cross-reference lookups and applies the freshest result
/// to the shared state.
pub struct SuggestFetcher<A: SuggestApi> {
    api: A,
    state: StateHandle,
    pending: RefCell<Option<String>>,
}

impl<A: SuggestApi> SuggestFetcher<A> {
    pub fn new(api: A, state: StateHandle) -> Self {
        Self { api, state, pending: RefCell::new(None) }
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Re-evaluate the input text and refresh the visible results. Branch
    /// selection happens anew on every call.
    pub async fn refresh(&self, text: &str, history: Vec<HistoryEntry>) {
        match idjump::classify(text) {
            InputKind::Query(term) if term.is_empty() => self.show_history(history),
            InputKind::Av { aid } => self.lookup_bvid(&aid).await,
            InputKind::Bv { bvid } => self.lookup_aid(&bvid).await,
            InputKind::Query(term) => self.fetch_suggestions(&term).await,
        }
    }

    /// Empty input: results are the stored history, newest first. Clears the
    /// pending key so any lookup still in flight is discarded on completion.
    fn show_history(&self, history: Vec<HistoryEntry>) {
        *self.pending.borrow_mut() = None;
        self.state.update(|s| {
            s.is_history = true;
            s.items = history.iter().take(MAX_HISTORY_ITEMS).map(SuggestItem::from).collect();
        });
    }

    /// Numeric id: clear results and offer the alphanumeric form for copying.
    async fn lookup_bvid(&self, aid: &str) {
        let key = self.begin_id_lookup(format!("view:aid:{aid}"));
        match self.api.view_by_aid(aid).await {
            Ok(resp) => {
                if resp.code != 0 || !self.is_current(&key) {
                    return;
                }
                if let Some(bvid) = resp.data.and_then(|d| d.bvid) {
                    self.state.update(|s| {
                        s.items =
                            vec![SuggestItem::new(bvid.clone(), format!("Copy BV id: {bvid}"))];
                    });
                }
            }
            Err(e) => debug!("id cross-reference lookup failed: {e}"),
        }
    }

    /// Alphanumeric id: clear results and offer the numeric form for copying.
    async fn lookup_aid(&self, bvid: &str) {
        let key = self.begin_id_lookup(format!("view:bvid:{bvid}"));
        match self.api.view_by_bvid(bvid).await {
            Ok(resp) => {
                if resp.code != 0 || !self.is_current(&key) {
                    return;
                }
                if let Some(aid) = resp.data.and_then(|d| d.aid) {
                    self.state.update(|s| {
                        s.items = vec![SuggestItem::new(
                            format!("av{aid}"),
                            format!("Copy av id: av{aid}"),
                        )];
                    });
                }
            }
            Err(e) => debug!("id cross-reference lookup failed: {e}"),
        }
    }

    /// Plain query: remote suggestion lookup guarded by the pending key.
    async fn fetch_suggestions(&self, term: &str) {
        let key = format!("suggest:{term}");
        *self.pending.borrow_mut() = Some(key.clone());
        self.state.update(|s| s.is_history = false);

        let resp = match self.api.suggest(term).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("suggestion lookup failed: {e}");
                return;
            }
        };
        if resp.code != 0 || !self.is_current(&key) {
            return;
        }

        match resp.result.and_then(|r| r.tag) {
            None => self.state.update(|s| s.items.clear()),
            Some(tags) => self.state.update(|s| {
                s.items = tags
                    .into_iter()
                    .map(|tag| {
                        SuggestItem::new(
                            tag.value,
                            tag.name.replace(HIGHLIGHT_SERVER_TOKEN, HIGHLIGHT_CLASS),
                        )
                    })
                    .collect();
            }),
        }
    }

    fn begin_id_lookup(&self, key: String) -> String {
        *self.pending.borrow_mut() = Some(key.clone());
        self.state.update(|s| {
            s.is_history = false;
            s.items.clear();
        });
        key
    }

    fn is_current(&self, key: &str) -> bool {
        self.pending.borrow().as_deref() == Some(key)
    }
}
