//! Identifier classification for search-box input.
//!
//! Input that is a full `av`-prefixed numeric id or `BV`-prefixed
//! alphanumeric id is a direct content reference, not a search term: it
//! carries a jump link and bypasses the suggestion fetch entirely. Matching
//! is case-insensitive and must cover the whole string; partial matches stay
//! ordinary queries.

use std::sync::LazyLock;

use regex::Regex;

static AV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^av(\d+)$").expect("valid pattern"));
static BV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^bv[0-9a-zA-Z]+$").expect("valid pattern"));

/// What a piece of search-box input turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Numeric id reference; `aid` holds the captured digits without the prefix.
    Av { aid: String },
    /// Alphanumeric id reference with the `bv` prefix normalized to `BV`.
    Bv { bvid: String },
    /// Ordinary search term.
    Query(String),
}

impl InputKind {
    /// Direct link target for an identifier; `None` for ordinary queries.
    pub fn link(&self) -> Option<String> {
        match self {
            InputKind::Av { aid } => Some(format!("https://www.bilibili.com/av{aid}")),
            InputKind::Bv { bvid } => Some(format!("https://www.bilibili.com/{bvid}")),
            InputKind::Query(_) => None,
        }
    }

    pub fn is_id(&self) -> bool {
        !matches!(self, InputKind::Query(_))
    }
}

/// Classify input text. Pure function of the text; no stored state.
pub fn classify(text: &str) -> InputKind {
    if let Some(captures) = AV_PATTERN.captures(text) {
        return InputKind::Av { aid: captures[1].to_string() };
    }
    if BV_PATTERN.is_match(text) {
        return InputKind::Bv { bvid: format!("BV{}", &text[2..]) };
    }
    InputKind::Query(text.to_string())
}
