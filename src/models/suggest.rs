use crate::models::HistoryEntry;

/// One row of the visible suggestion/history list.
///
/// `value` is the literal text used on submission or copy; `markup` is the
/// display form and may carry highlight markup distinct from `value`. Rows
/// are ephemeral: the whole list is replaced on every suggestion update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestItem {
    pub value: String,
    pub markup: String,
}

impl SuggestItem {
    pub fn new(value: impl Into<String>, markup: impl Into<String>) -> Self {
        Self { value: value.into(), markup: markup.into() }
    }

    /// A plain row whose display form is the value itself.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self { markup: value.clone(), value }
    }
}

impl From<&HistoryEntry> for SuggestItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self::plain(entry.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_row_mirrors_value() {
        let item = SuggestItem::plain("rust tutorial");
        assert_eq!(item.value, "rust tutorial");
        assert_eq!(item.markup, "rust tutorial");
    }

    #[test]
    fn test_from_history_entry() {
        let entry = HistoryEntry::new("cats", 1);
        let item = SuggestItem::from(&entry);
        assert_eq!(item.value, "cats");
        assert_eq!(item.markup, "cats");
    }
}
