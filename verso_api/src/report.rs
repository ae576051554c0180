//! Mismatch reports and the request/response shapes built around them.

use serde::{Deserialize, Serialize};

use super::segment::{Segment, SegmentKind};

/// Classification of a mismatched reference phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// The candidate renders the phrase differently.
    #[default]
    Mistranslation,
    /// The candidate drops the phrase without a replacement.
    Omission,
}

/// Correction suggested for a single highlighted phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// The highlighted reference phrase.
    pub original_phrase: String,
    /// Proposed replacement text.
    pub correction: String,
    /// Why the phrase was flagged.
    pub reason: String,
    /// Whether the phrase was replaced or dropped in the candidate.
    #[serde(default)]
    pub kind: MismatchKind,
}

impl Correction {
    /// Create a correction for the given phrase.
    pub fn new(
        original_phrase: impl Into<String>,
        correction: impl Into<String>,
        reason: impl Into<String>,
        kind: MismatchKind,
    ) -> Self {
        Self {
            original_phrase: original_phrase.into(),
            correction: correction.into(),
            reason: reason.into(),
            kind,
        }
    }
}

/// Full output of a mismatch extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MismatchReport {
    /// Ordered alignment of the two texts.
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Trimmed removed phrases in segment order.
    #[serde(default)]
    pub phrases_to_highlight: Vec<String>,
    /// One correction per highlighted phrase.
    #[serde(default)]
    pub suggestions: Vec<Correction>,
}

impl MismatchReport {
    /// Segments of the given kind, in order.
    pub fn segments_of(&self, kind: SegmentKind) -> impl Iterator<Item = &Segment> + '_ {
        self.segments
            .iter()
            .filter(move |segment| segment.kind == kind)
    }

    /// Returns `true` when the two texts aligned without any difference.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| segment.kind == SegmentKind::Equal)
    }

    /// Convert into the response payload, optionally keeping the segments.
    #[must_use]
    pub fn into_response(self, include_segments: bool) -> MismatchResponse {
        MismatchResponse {
            phrases_to_highlight: self.phrases_to_highlight,
            suggestions: self.suggestions,
            segments: include_segments.then_some(self.segments),
        }
    }
}

/// Response payload handed to the serialization layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MismatchResponse {
    /// Phrases the highlight sink should mark.
    #[serde(default)]
    pub phrases_to_highlight: Vec<String>,
    /// Corrections paired with each phrase.
    #[serde(default)]
    pub suggestions: Vec<Correction>,
    /// Full alignment detail, only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

/// Inbound pair of texts as delivered by the extraction collaborator.
///
/// Both fields are optional on the wire so that a `null` or missing text can
/// be rejected explicitly instead of being coerced to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MismatchRequest {
    /// Ground-truth text.
    #[serde(default)]
    pub reference: Option<String>,
    /// Machine-produced text compared against the reference.
    #[serde(default)]
    pub candidate: Option<String>,
}

impl MismatchRequest {
    /// Build a request with both texts present.
    pub fn new(reference: impl Into<String>, candidate: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            candidate: Some(candidate.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> MismatchReport {
        MismatchReport {
            segments: vec![
                Segment::new(SegmentKind::Equal, "The", 0),
                Segment::new(SegmentKind::Removed, "quick", 1),
                Segment::new(SegmentKind::Inserted, "fast", 2),
            ],
            phrases_to_highlight: vec!["quick".into()],
            suggestions: vec![Correction::new(
                "quick",
                "Suggested fix here",
                "Differs from ground truth",
                MismatchKind::Mistranslation,
            )],
        }
    }

    #[test]
    fn response_uses_camel_case_keys() {
        let response = sample_report().into_response(false);
        let json = serde_json::to_value(&response).expect("serialize response");

        assert_eq!(json["phrasesToHighlight"][0], "quick");
        assert_eq!(json["suggestions"][0]["originalPhrase"], "quick");
        assert_eq!(json["suggestions"][0]["reason"], "Differs from ground truth");
        assert_eq!(json["suggestions"][0]["kind"], "mistranslation");
        assert!(json.get("segments").is_none());
    }

    #[test]
    fn response_keeps_segments_on_request() {
        let response = sample_report().into_response(true);
        let segments = response.segments.expect("segments kept");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "quick");
    }

    #[test]
    fn correction_kind_defaults_when_missing() {
        let json = r#"{
            "originalPhrase": "jumps",
            "correction": "leaps",
            "reason": "Synonym"
        }"#;
        let correction: Correction = serde_json::from_str(json).expect("deserialize correction");
        assert_eq!(correction.kind, MismatchKind::Mistranslation);
        assert_eq!(correction.original_phrase, "jumps");
    }

    #[test]
    fn request_accepts_null_fields() {
        let request: MismatchRequest =
            serde_json::from_str(r#"{"reference": null}"#).expect("deserialize request");
        assert!(request.reference.is_none());
        assert!(request.candidate.is_none());
    }

    #[test]
    fn report_helpers() {
        let report = sample_report();
        assert!(!report.is_identical());
        assert_eq!(report.segments_of(SegmentKind::Removed).count(), 1);
        assert!(MismatchReport::default().is_identical());
    }
}
