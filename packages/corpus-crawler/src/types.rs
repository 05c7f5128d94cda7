use serde::{Deserialize, Serialize};

/// Identifier of an immutable, timestamped snapshot of a page's content.
///
/// Resolved once per page and never re-resolved; a crawl only ever fetches
/// content by revision, never by live title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionId(pub u64);

impl std::fmt::Display for RevisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The persisted unit of crawl output. Immutable once written; the output
/// file is append-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub page: String,
    pub text: String,
    pub label: String,
}

impl CorpusRecord {
    /// Label carried by every record this crawler emits.
    pub const HUMAN_LABEL: &'static str = "human";

    /// Create a human-labeled record for a paragraph sampled from `page`.
    pub fn human(page: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            text: text.into(),
            label: Self::HUMAN_LABEL.to_string(),
        }
    }
}

/// Totals reported when a crawl reaches its terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Paragraphs persisted to the sink.
    pub collected: usize,
    /// Pages popped from the frontier and processed.
    pub pages_visited: usize,
    /// Pages abandoned mid-tick by a sink failure.
    pub pages_failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_record_label() {
        let record = CorpusRecord::human("Ada Lovelace", "Some paragraph text.");
        assert_eq!(record.page, "Ada Lovelace");
        assert_eq!(record.label, "human");
    }

    #[test]
    fn test_record_serializes_expected_fields() {
        let record = CorpusRecord::human("Pluto", "A dwarf planet.");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": "Pluto", "text": "A dwarf planet.", "label": "human"})
        );
    }
}
