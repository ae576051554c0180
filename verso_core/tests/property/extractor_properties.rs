use proptest::prelude::*;
use verso_core::diff::DiffEngine;
use verso_core::tokenize::normalize_whitespace;
use verso_core::{compute_mismatches, SegmentKind};

fn words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec!["the", "cat", "sat", "on", "mat", "a", "dog"]),
        0..16,
    )
}

fn ragged(tokens: &[&str]) -> String {
    let separators = [" ", "  ", "\n", "\t ", " \r\n"];
    let mut text = String::from(" ");
    for (index, token) in tokens.iter().enumerate() {
        text.push_str(token);
        text.push_str(separators[index % separators.len()]);
    }
    text
}

fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    let mut row = vec![0_usize; b.len() + 1];
    for token in a {
        let mut diagonal = 0;
        for (j, other) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if token == other {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

fn joined(segments: &[verso_core::Segment], skip: SegmentKind) -> String {
    segments
        .iter()
        .filter(|segment| segment.kind != skip)
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    #[test]
    fn segments_reconstruct_both_texts(reference in words(), candidate in words()) {
        let reference_text = ragged(&reference);
        let candidate_text = ragged(&candidate);
        let segments = DiffEngine::new().diff(&reference_text, &candidate_text);

        prop_assert_eq!(
            joined(&segments, SegmentKind::Inserted),
            normalize_whitespace(&reference_text)
        );
        prop_assert_eq!(
            joined(&segments, SegmentKind::Removed),
            normalize_whitespace(&candidate_text)
        );
    }

    #[test]
    fn alignment_is_maximal(reference in words(), candidate in words()) {
        let segments = DiffEngine::new().align(&reference, &candidate);
        let equal_tokens: usize = segments
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Equal)
            .map(|segment| segment.text.split(' ').count())
            .sum();
        prop_assert_eq!(equal_tokens, lcs_len(&reference, &candidate));
    }

    #[test]
    fn adjacent_segments_differ_in_kind(reference in words(), candidate in words()) {
        let segments = DiffEngine::new().align(&reference, &candidate);
        for pair in segments.windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
        for (index, segment) in segments.iter().enumerate() {
            prop_assert_eq!(segment.ordinal, index);
            prop_assert!(!segment.text.is_empty());
        }
    }

    #[test]
    fn identical_texts_have_no_highlights(tokens in words()) {
        let text = ragged(&tokens);
        let report = compute_mismatches(&text, &normalize_whitespace(&text)).expect("report");
        prop_assert!(report.phrases_to_highlight.is_empty());
        prop_assert!(report.suggestions.is_empty());
        prop_assert!(report.is_identical());
    }

    #[test]
    fn highlights_follow_removed_segments(reference in words(), candidate in words()) {
        let report = compute_mismatches(&ragged(&reference), &ragged(&candidate))
            .expect("report");
        let removed: Vec<&str> = report
            .segments_of(SegmentKind::Removed)
            .map(|segment| segment.text.trim())
            .collect();
        prop_assert_eq!(&report.phrases_to_highlight, &removed);
        prop_assert_eq!(report.suggestions.len(), removed.len());
    }

    #[test]
    fn extraction_is_deterministic(reference in words(), candidate in words()) {
        let reference_text = ragged(&reference);
        let candidate_text = ragged(&candidate);
        let first = compute_mismatches(&reference_text, &candidate_text).expect("first");
        let second = compute_mismatches(&reference_text, &candidate_text).expect("second");
        prop_assert_eq!(first, second);
    }
}
