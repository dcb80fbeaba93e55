//! Remote endpoints for suggestions and identifier cross-references.
//!
//! Uses reqwest to call the bilibili web interface:
//!
//! - suggestion lookup for a search term (tag list with highlight markup)
//! - video lookup by numeric or alphanumeric id (the cross-reference that
//!   yields the other id form)
//! - default-search recommendation (placeholder label + shortcut target)
//!
//! Every response carries an error code; non-zero codes are data, not
//! transport errors, and the callers treat them as "no result".

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use thiserror::Error;

const SUGGEST_BASE: &str = "https://s.search.bilibili.com";
const API_BASE: &str = "https://api.bilibili.com";

/// Search landing page used when submitting with no keyword at all.
pub const SEARCH_HOME: &str = "https://search.bilibili.com";

/// Remote lookup errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Suggestion lookup response: `result.tag` holds the suggestion rows.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResponse {
    pub code: i64,
    #[serde(default)]
    pub result: Option<SuggestResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResult {
    #[serde(default)]
    pub tag: Option<Vec<SuggestTag>>,
}

/// One remote suggestion: literal value plus display markup. `name` may embed
/// the server's highlight marker token.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestTag {
    pub value: String,
    pub name: String,
}

/// Video lookup response carrying the other identifier form.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewResponse {
    pub code: i64,
    #[serde(default)]
    pub data: Option<ViewData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewData {
    #[serde(default)]
    pub aid: Option<u64>,
    #[serde(default)]
    pub bvid: Option<String>,
}

/// Default-search recommendation response.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSearchResponse {
    pub code: i64,
    #[serde(default)]
    pub data: Option<DefaultSearchData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultSearchData {
    pub show_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
}

/// Asynchronous lookups the suggestion pipeline depends on. Implemented by
/// [`SuggestClient`] for the real endpoints and by mocks in tests.
#[allow(async_fn_in_trait)]
pub trait SuggestApi {
    async fn suggest(&self, term: &str) -> Result<SuggestResponse, ApiError>;
    async fn view_by_aid(&self, aid: &str) -> Result<ViewResponse, ApiError>;
    async fn view_by_bvid(&self, bvid: &str) -> Result<ViewResponse, ApiError>;
    async fn default_search(&self) -> Result<DefaultSearchResponse, ApiError>;
}

/// Configuration for the remote client. Base URLs are overridable so tests
/// never reach the real endpoints.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub suggest_base: String,
    pub api_base: String,
    /// User id sent with suggestion lookups; empty for anonymous sessions.
    pub userid: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            suggest_base: SUGGEST_BASE.to_string(),
            api_base: API_BASE.to_string(),
            userid: String::new(),
        }
    }
}

/// reqwest-backed client for the bilibili web interface.
#[derive(Debug, Clone)]
pub struct SuggestClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl SuggestClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Suggestion lookup URL with the original tuning parameters.
    pub fn suggest_url(&self, term: &str) -> String {
        let term = utf8_percent_encode(term, NON_ALPHANUMERIC);
        format!(
            "{}/main/suggest?func=suggest&suggest_type=accurate&sub_type=tag&main_ver=v1\
             &highlight=&userid={}&bangumi_acc_num=1&special_acc_num=1&topic_acc_num=1\
             &upuser_acc_num=3&tag_num=10&special_num=10&bangumi_num=10&upuser_num=3&term={}",
            self.config.suggest_base, self.config.userid, term
        )
    }

    pub fn view_aid_url(&self, aid: &str) -> String {
        format!("{}/x/web-interface/view?aid={aid}", self.config.api_base)
    }

    pub fn view_bvid_url(&self, bvid: &str) -> String {
        format!("{}/x/web-interface/view?bvid={bvid}", self.config.api_base)
    }

    pub fn default_search_url(&self) -> String {
        format!("{}/x/web-interface/search/default", self.config.api_base)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ApiError> {
        let resp = self.http.get(url).send().await?;
        Ok(resp.json().await?)
    }
}

impl SuggestApi for SuggestClient {
    async fn suggest(&self, term: &str) -> Result<SuggestResponse, ApiError> {
        self.get_json(&self.suggest_url(term)).await
    }

    async fn view_by_aid(&self, aid: &str) -> Result<ViewResponse, ApiError> {
        self.get_json(&self.view_aid_url(aid)).await
    }

    async fn view_by_bvid(&self, bvid: &str) -> Result<ViewResponse, ApiError> {
        self.get_json(&self.view_bvid_url(bvid)).await
    }

    async fn default_search(&self) -> Result<DefaultSearchResponse, ApiError> {
        self.get_json(&self.default_search_url()).await
    }
}

/// Search results page for a keyword, tagged with the suggestion source
/// marker the original form submitted with.
pub fn search_url(keyword: &str) -> String {
    let keyword = utf8_percent_encode(keyword, NON_ALPHANUMERIC);
    format!("{SEARCH_HOME}/all?keyword={keyword}&from_source=nav_suggest_new")
}
