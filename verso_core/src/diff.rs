//! Word-level alignment of a reference and a candidate token sequence.
//!
//! The engine computes a longest common subsequence over whole tokens and
//! walks it from the front. When several maximal alignments exist, the walk
//! takes a match as soon as the two current tokens are equal, so repeated
//! words pair with their earliest occurrence on both sides. When the current
//! tokens differ and skipping either one keeps the alignment maximal, the
//! reference token is emitted as removed before the candidate token is
//! emitted as inserted.
//!
//! Time and memory are O(n·m) in the token counts that remain after the
//! shared prefix is stripped. Callers bound input size before reaching here.

use verso_api::{Segment, SegmentKind};

use crate::tokenize::tokenize;

/// Entry point for word-level alignment.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

impl DiffEngine {
    /// Construct a new diff engine instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenize both texts and align them.
    #[must_use]
    pub fn diff(&self, reference: &str, candidate: &str) -> Vec<Segment> {
        self.align(&tokenize(reference), &tokenize(candidate))
    }

    /// Align two token sequences into coalesced segments.
    #[must_use]
    pub fn align(&self, reference: &[&str], candidate: &[&str]) -> Vec<Segment> {
        let mut builder = SegmentBuilder::default();

        let prefix = reference
            .iter()
            .zip(candidate)
            .take_while(|(left, right)| left == right)
            .count();
        for &token in &reference[..prefix] {
            builder.push(SegmentKind::Equal, token);
        }

        let rest_reference = &reference[prefix..];
        let rest_candidate = &candidate[prefix..];
        let table = LcsTable::build(rest_reference, rest_candidate);
        tracing::trace!(
            prefix,
            rows = rest_reference.len(),
            columns = rest_candidate.len(),
            "built lcs table"
        );

        let (mut i, mut j) = (0, 0);
        while i < rest_reference.len() && j < rest_candidate.len() {
            if rest_reference[i] == rest_candidate[j] {
                builder.push(SegmentKind::Equal, rest_reference[i]);
                i += 1;
                j += 1;
            } else if table.get(i + 1, j) >= table.get(i, j + 1) {
                builder.push(SegmentKind::Removed, rest_reference[i]);
                i += 1;
            } else {
                builder.push(SegmentKind::Inserted, rest_candidate[j]);
                j += 1;
            }
        }
        for &token in &rest_reference[i..] {
            builder.push(SegmentKind::Removed, token);
        }
        for &token in &rest_candidate[j..] {
            builder.push(SegmentKind::Inserted, token);
        }

        builder.finish()
    }
}

/// Suffix LCS lengths: `get(i, j)` is the LCS length of `a[i..]` and `b[j..]`.
struct LcsTable {
    columns: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    fn build(a: &[&str], b: &[&str]) -> Self {
        let columns = b.len() + 1;
        let mut cells = vec![0_u32; (a.len() + 1) * columns];

        for i in (0..a.len()).rev() {
            for j in (0..b.len()).rev() {
                let value = if a[i] == b[j] {
                    cells[(i + 1) * columns + j + 1] + 1
                } else {
                    cells[(i + 1) * columns + j].max(cells[i * columns + j + 1])
                };
                cells[i * columns + j] = value;
            }
        }

        Self { columns, cells }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.columns + j]
    }
}

#[derive(Default)]
struct SegmentBuilder<'a> {
    segments: Vec<Segment>,
    current: Option<SegmentKind>,
    tokens: Vec<&'a str>,
}

impl<'a> SegmentBuilder<'a> {
    fn push(&mut self, kind: SegmentKind, token: &'a str) {
        if self.current != Some(kind) {
            self.flush();
            self.current = Some(kind);
        }
        self.tokens.push(token);
    }

    fn flush(&mut self) {
        if let Some(kind) = self.current.take() {
            let text = self.tokens.join(" ");
            self.tokens.clear();
            let ordinal = self.segments.len();
            self.segments.push(Segment::new(kind, text, ordinal));
        }
    }

    fn finish(mut self) -> Vec<Segment> {
        self.flush();
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(segments: &[Segment]) -> Vec<(SegmentKind, &str)> {
        segments
            .iter()
            .map(|segment| (segment.kind, segment.text.as_str()))
            .collect()
    }

    #[test]
    fn substitutions_emit_removed_before_inserted() {
        let segments =
            DiffEngine::new().diff("The quick brown fox jumps", "The fast brown fox leaps");
        assert_eq!(
            shape(&segments),
            vec![
                (SegmentKind::Equal, "The"),
                (SegmentKind::Removed, "quick"),
                (SegmentKind::Inserted, "fast"),
                (SegmentKind::Equal, "brown fox"),
                (SegmentKind::Removed, "jumps"),
                (SegmentKind::Inserted, "leaps"),
            ]
        );
    }

    #[test]
    fn ordinals_are_sequential() {
        let segments = DiffEngine::new().diff("a b c d", "a x c y");
        for (index, segment) in segments.iter().enumerate() {
            assert_eq!(segment.ordinal, index);
        }
    }

    #[test]
    fn repeated_token_pairs_with_earliest_occurrence() {
        let segments = DiffEngine::new().diff("A B A", "A");
        assert_eq!(
            shape(&segments),
            vec![(SegmentKind::Equal, "A"), (SegmentKind::Removed, "B A")]
        );

        let segments = DiffEngine::new().diff("x A y A", "A");
        assert_eq!(
            shape(&segments),
            vec![
                (SegmentKind::Removed, "x"),
                (SegmentKind::Equal, "A"),
                (SegmentKind::Removed, "y A"),
            ]
        );
    }

    #[test]
    fn disjoint_texts_remove_then_insert() {
        let segments = DiffEngine::new().diff("one two", "three four");
        assert_eq!(
            shape(&segments),
            vec![
                (SegmentKind::Removed, "one two"),
                (SegmentKind::Inserted, "three four"),
            ]
        );
    }

    #[test]
    fn insertion_shift_does_not_misalign() {
        let segments = DiffEngine::new().diff("alpha beta gamma", "new alpha beta gamma");
        assert_eq!(
            shape(&segments),
            vec![
                (SegmentKind::Inserted, "new"),
                (SegmentKind::Equal, "alpha beta gamma"),
            ]
        );
    }

    #[test]
    fn empty_sides() {
        assert!(DiffEngine::new().diff("", "").is_empty());
        assert_eq!(
            shape(&DiffEngine::new().diff("Hello world", "")),
            vec![(SegmentKind::Removed, "Hello world")]
        );
        assert_eq!(
            shape(&DiffEngine::new().diff("", "Hallo Welt")),
            vec![(SegmentKind::Inserted, "Hallo Welt")]
        );
    }

    #[test]
    fn ragged_whitespace_is_ignored() {
        let segments = DiffEngine::new().diff("A  B\nC", " A B   C ");
        assert_eq!(shape(&segments), vec![(SegmentKind::Equal, "A B C")]);
    }

    #[test]
    fn lcs_table_lengths() {
        let a = ["a", "b", "c", "b"];
        let b = ["b", "c", "b", "a"];
        let table = LcsTable::build(&a, &b);
        assert_eq!(table.get(0, 0), 3);
        assert_eq!(table.get(4, 0), 0);
        assert_eq!(table.get(0, 4), 0);
    }
}
