//! Results reported back by a highlight sink.

use serde::{Deserialize, Serialize};

/// Byte span of one match inside the highlighted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

/// Matches found for a single keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatches {
    /// Keyword as supplied to the sink.
    pub keyword: String,
    /// Number of non-overlapping matches.
    pub count: usize,
    /// Location of every match.
    #[serde(default)]
    pub spans: Vec<HighlightSpan>,
}

/// Per-keyword match counts for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighlightSummary {
    /// Results in keyword order.
    #[serde(default)]
    pub keywords: Vec<KeywordMatches>,
}

impl HighlightSummary {
    /// Sum of matches across all keywords.
    #[must_use]
    pub fn total_matches(&self) -> usize {
        self.keywords.iter().map(|entry| entry.count).sum()
    }

    /// Keywords the sink could not locate.
    pub fn unmatched(&self) -> impl Iterator<Item = &str> + '_ {
        self.keywords
            .iter()
            .filter(|entry| entry.count == 0)
            .map(|entry| entry.keyword.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_unmatched() {
        let summary = HighlightSummary {
            keywords: vec![
                KeywordMatches {
                    keyword: "quick".into(),
                    count: 2,
                    spans: vec![
                        HighlightSpan { start: 4, end: 9 },
                        HighlightSpan { start: 20, end: 25 },
                    ],
                },
                KeywordMatches {
                    keyword: "jumps".into(),
                    count: 0,
                    spans: Vec::new(),
                },
            ],
        };

        assert_eq!(summary.total_matches(), 2);
        assert_eq!(summary.unmatched().collect::<Vec<_>>(), vec!["jumps"]);
    }
}
