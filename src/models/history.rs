use serde::{Deserialize, Serialize};

/// A past query kept for quick re-selection.
///
/// Stored as a JSON array under a single storage key; at most ten entries
/// persist at any time, unique by `value` and ordered by descending
/// `timestamp` (milliseconds since the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub value: String,
    #[serde(rename = "isHistory")]
    pub is_history: u8,
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(value: impl Into<String>, timestamp: i64) -> Self {
        Self { value: value.into(), is_history: 1, timestamp }
    }
}

/// One record of the legacy history representation: a keyword plus the date
/// string it was recorded at. Read once through the legacy provider and
/// converted into [`HistoryEntry`] values during migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyHistoryRecord {
    pub keyword: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_entry_storage_format() {
        let entry = HistoryEntry::new("rust", 1700000000000);
        let json = serde_json::to_string(&entry).unwrap();

        // The storage format keeps the original camelCase flag name
        assert!(json.contains(r#""isHistory":1"#));
        assert!(json.contains(r#""value":"rust""#));
        assert!(json.contains(r#""timestamp":1700000000000"#));
    }

    #[test]
    fn test_history_entry_roundtrip() {
        let entry = HistoryEntry::new("hello world", 42);
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, entry);
    }
}
