//! Aligned segments produced by comparing a reference and a candidate text.

use serde::{Deserialize, Serialize};

/// Role a segment plays in the alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Tokens present in both texts.
    Equal,
    /// Tokens only present in the candidate text.
    Inserted,
    /// Tokens only present in the reference text.
    Removed,
}

impl SegmentKind {
    /// Whether the segment contributes to the reference text.
    #[must_use]
    pub const fn in_reference(self) -> bool {
        matches!(self, Self::Equal | Self::Removed)
    }

    /// Whether the segment contributes to the candidate text.
    #[must_use]
    pub const fn in_candidate(self) -> bool {
        matches!(self, Self::Equal | Self::Inserted)
    }
}

/// A run of same-kind tokens rejoined by single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Alignment role of the run.
    pub kind: SegmentKind,
    /// Tokens of the run joined by a single space.
    pub text: String,
    /// Zero-based position in the segment sequence.
    pub ordinal: usize,
}

impl Segment {
    /// Convenience constructor.
    pub fn new(kind: SegmentKind, text: impl Into<String>, ordinal: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            ordinal,
        }
    }

    /// Returns `true` for removed segments.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self.kind, SegmentKind::Removed)
    }

    /// Returns `true` for inserted segments.
    #[must_use]
    pub const fn is_inserted(&self) -> bool {
        matches!(self.kind, SegmentKind::Inserted)
    }
}
