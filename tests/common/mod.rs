//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use bili_suggest::clipboard::ClipboardSink;
use bili_suggest::models::LegacyHistoryRecord;
use bili_suggest::remote::{
    ApiError, DefaultSearchData, DefaultSearchResponse, SuggestApi, SuggestResponse,
    SuggestResult, SuggestTag, ViewData, ViewResponse,
};
use bili_suggest::LegacyHistoryProvider;

/// Mock remote API: canned tag lists per term, optional artificial latency,
/// canned identifier cross-references and recommendation data.
#[derive(Default)]
pub struct MockApi {
    tags: HashMap<String, Vec<(String, String)>>,
    delays_ms: HashMap<String, u64>,
    code: i64,
    bvid_for_aid: HashMap<String, String>,
    aid_for_bvid: HashMap<String, u64>,
    recommendation: Option<DefaultSearchData>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned suggestion rows for a term, as (value, display markup) pairs.
    pub fn with_tags(mut self, term: &str, tags: &[(&str, &str)]) -> Self {
        self.tags.insert(
            term.to_string(),
            tags.iter().map(|(v, n)| (v.to_string(), n.to_string())).collect(),
        );
        self
    }

    /// Delay responses for a term by the given milliseconds.
    pub fn with_delay(mut self, term: &str, millis: u64) -> Self {
        self.delays_ms.insert(term.to_string(), millis);
        self
    }

    /// Error code returned by every suggestion response.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    pub fn with_bvid_for_aid(mut self, aid: &str, bvid: &str) -> Self {
        self.bvid_for_aid.insert(aid.to_string(), bvid.to_string());
        self
    }

    pub fn with_aid_for_bvid(mut self, bvid: &str, aid: u64) -> Self {
        self.aid_for_bvid.insert(bvid.to_string(), aid);
        self
    }

    pub fn with_recommendation(mut self, show_name: &str, url: &str, name: &str) -> Self {
        self.recommendation = Some(DefaultSearchData {
            show_name: show_name.to_string(),
            url: url.to_string(),
            name: name.to_string(),
        });
        self
    }
}

impl SuggestApi for MockApi {
    async fn suggest(&self, term: &str) -> Result<SuggestResponse, ApiError> {
        if let Some(delay) = self.delays_ms.get(term) {
            tokio::time::sleep(Duration::from_millis(*delay)).await;
        }
        let tag = self.tags.get(term).map(|tags| {
            tags.iter()
                .map(|(value, name)| SuggestTag { value: value.clone(), name: name.clone() })
                .collect()
        });
        Ok(SuggestResponse { code: self.code, result: Some(SuggestResult { tag }) })
    }

    async fn view_by_aid(&self, aid: &str) -> Result<ViewResponse, ApiError> {
        let data =
            self.bvid_for_aid.get(aid).map(|bvid| ViewData { aid: None, bvid: Some(bvid.clone()) });
        Ok(ViewResponse { code: 0, data })
    }

    async fn view_by_bvid(&self, bvid: &str) -> Result<ViewResponse, ApiError> {
        let data = self.aid_for_bvid.get(bvid).map(|aid| ViewData { aid: Some(*aid), bvid: None });
        Ok(ViewResponse { code: 0, data })
    }

    async fn default_search(&self) -> Result<DefaultSearchResponse, ApiError> {
        match &self.recommendation {
            Some(data) => Ok(DefaultSearchResponse { code: 0, data: Some(data.clone()) }),
            None => Ok(DefaultSearchResponse { code: -1, data: None }),
        }
    }
}

/// Clipboard sink that records every copy through a shared handle.
pub struct RecordingClipboard {
    copies: Rc<RefCell<Vec<String>>>,
}

impl ClipboardSink for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.copies.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// A recording clipboard plus the handle to inspect what was copied.
pub fn recording_clipboard() -> (Box<RecordingClipboard>, Rc<RefCell<Vec<String>>>) {
    let copies = Rc::new(RefCell::new(Vec::new()));
    (Box::new(RecordingClipboard { copies: Rc::clone(&copies) }), copies)
}

/// Legacy history source backed by a plain Vec.
pub struct VecLegacyHistory {
    pub records: Vec<LegacyHistoryRecord>,
}

impl VecLegacyHistory {
    pub fn new(records: &[(&str, &str)]) -> Self {
        Self {
            records: records
                .iter()
                .map(|(keyword, date)| LegacyHistoryRecord {
                    keyword: keyword.to_string(),
                    date: date.to_string(),
                })
                .collect(),
        }
    }
}

impl LegacyHistoryProvider for VecLegacyHistory {
    fn read(&self) -> Vec<LegacyHistoryRecord> {
        self.records.clone()
    }

    fn clear(&mut self) -> Result<()> {
        self.records.clear();
        Ok(())
    }
}
