//! Shared Verso data models consumed by the mismatch core and strategy crates.
//!
//! The structures in this crate are designed to be:
//! - serializable via `serde` for the JSON response contract
//! - free of behavior beyond small constructors and accessors

pub mod highlight;
pub mod report;
pub mod segment;

pub use highlight::{HighlightSpan, HighlightSummary, KeywordMatches};
pub use report::{Correction, MismatchKind, MismatchReport, MismatchRequest, MismatchResponse};
pub use segment::{Segment, SegmentKind};
