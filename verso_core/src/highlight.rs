//! Highlight sinks receive the extracted phrases and report where they matched.
//!
//! Match feedback is informational only; it never flows back into extraction.

use verso_api::{HighlightSpan, HighlightSummary, KeywordMatches};

use crate::tokenize::normalize_whitespace;

/// Capability that marks keywords in a rendered document.
pub trait HighlightSink {
    /// Highlight every keyword and report per-keyword match counts.
    fn highlight(&self, keywords: &[String]) -> HighlightSummary;
}

/// In-memory sink over a document's extracted text.
///
/// Whitespace in both the document and each keyword is collapsed to single
/// spaces before matching, so spans refer to offsets in [`Self::text`].
/// Matching is case-sensitive and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHighlighter {
    text: String,
}

impl TextHighlighter {
    /// Build a highlighter for `document`.
    #[must_use]
    pub fn new(document: &str) -> Self {
        Self {
            text: normalize_whitespace(document),
        }
    }

    /// Whitespace-normalized document text that spans index into.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn find(&self, keyword: &str) -> KeywordMatches {
        let needle = normalize_whitespace(keyword);
        let spans: Vec<HighlightSpan> = if needle.is_empty() {
            Vec::new()
        } else {
            self.text
                .match_indices(needle.as_str())
                .map(|(start, matched)| HighlightSpan {
                    start,
                    end: start + matched.len(),
                })
                .collect()
        };

        KeywordMatches {
            keyword: keyword.to_string(),
            count: spans.len(),
            spans,
        }
    }
}

impl HighlightSink for TextHighlighter {
    fn highlight(&self, keywords: &[String]) -> HighlightSummary {
        let summary = HighlightSummary {
            keywords: keywords.iter().map(|keyword| self.find(keyword)).collect(),
        };
        tracing::debug!(
            keywords = keywords.len(),
            matches = summary.total_matches(),
            "highlighted document"
        );
        summary
    }
}
