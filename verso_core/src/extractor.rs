//! Mismatch extraction: alignment, highlight derivation and suggestions.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use verso_api::{Correction, MismatchKind, MismatchReport, MismatchRequest, Segment, SegmentKind};
use verso_strategies::PlaceholderStrategy;
use verso_strategy_api::{SuggestionContext, SuggestionStrategy};

use crate::diff::DiffEngine;
use crate::tokenize::tokenize;
use crate::{Error, Result, TextSide};

/// How repeated mismatched phrases are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HighlightPolicy {
    /// One entry per removed segment, duplicates included.
    #[default]
    PerOccurrence,
    /// Only the first occurrence of each distinct phrase.
    Unique,
}

/// Computes segments, highlight phrases and suggestions for a pair of texts.
#[derive(Clone)]
pub struct MismatchExtractor {
    engine: DiffEngine,
    policy: HighlightPolicy,
    strategy: Arc<dyn SuggestionStrategy>,
}

impl MismatchExtractor {
    /// Extractor with per-occurrence highlights and placeholder suggestions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: DiffEngine::new(),
            policy: HighlightPolicy::default(),
            strategy: Arc::new(PlaceholderStrategy),
        }
    }

    /// Replace the suggestion strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Arc<dyn SuggestionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the highlight policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: HighlightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active highlight policy.
    #[must_use]
    pub const fn policy(&self) -> HighlightPolicy {
        self.policy
    }

    /// Identifier of the active suggestion strategy.
    #[must_use]
    pub fn strategy_id(&self) -> &'static str {
        self.strategy.id()
    }

    /// Compare `reference` against `candidate`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Strategy`] when the suggestion strategy fails for any
    /// highlighted phrase. No partial report is produced in that case.
    pub fn extract(&self, reference: &str, candidate: &str) -> Result<MismatchReport> {
        let reference_tokens = tokenize(reference);
        let candidate_tokens = tokenize(candidate);
        let segments = self.engine.align(&reference_tokens, &candidate_tokens);

        let mismatches = self.collect_mismatches(&segments);
        let mut phrases_to_highlight = Vec::with_capacity(mismatches.len());
        let mut suggestions = Vec::with_capacity(mismatches.len());

        for (ordinal, mismatch) in mismatches.into_iter().enumerate() {
            let context = SuggestionContext {
                phrase: mismatch.phrase.to_string(),
                counterpart: mismatch.counterpart.map(str::to_string),
                kind: mismatch.kind,
                ordinal,
            };
            let proposed = self.strategy.suggest(&context).map_err(|source| {
                tracing::warn!(
                    strategy = self.strategy.id(),
                    phrase = mismatch.phrase,
                    error = %source,
                    "suggestion strategy failed"
                );
                Error::Strategy {
                    strategy: self.strategy.id().to_string(),
                    source,
                }
            })?;

            suggestions.push(Correction {
                original_phrase: context.phrase.clone(),
                correction: proposed.correction,
                reason: proposed.reason,
                kind: context.kind,
            });
            phrases_to_highlight.push(context.phrase);
        }

        tracing::debug!(
            reference_tokens = reference_tokens.len(),
            candidate_tokens = candidate_tokens.len(),
            segments = segments.len(),
            highlights = phrases_to_highlight.len(),
            strategy = self.strategy.id(),
            "extracted mismatches"
        );

        Ok(MismatchReport {
            segments,
            phrases_to_highlight,
            suggestions,
        })
    }

    /// Compare two byte buffers that must hold UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when either buffer is not valid UTF-8,
    /// otherwise behaves like [`MismatchExtractor::extract`].
    pub fn extract_bytes(&self, reference: &[u8], candidate: &[u8]) -> Result<MismatchReport> {
        let reference = decode_text(TextSide::Reference, reference)?;
        let candidate = decode_text(TextSide::Candidate, candidate)?;
        self.extract(reference, candidate)
    }

    /// Compare the texts carried by a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when either text is absent, otherwise
    /// behaves like [`MismatchExtractor::extract`].
    pub fn extract_request(&self, request: &MismatchRequest) -> Result<MismatchReport> {
        let (reference, candidate) = request_texts(request)?;
        self.extract(reference, candidate)
    }

    fn collect_mismatches<'s>(&self, segments: &'s [Segment]) -> Vec<Mismatch<'s>> {
        let mut mismatches = Vec::new();
        let mut seen = HashSet::new();
        let mut claimed: Option<usize> = None;

        for (index, segment) in segments.iter().enumerate() {
            if segment.kind != SegmentKind::Removed {
                continue;
            }

            let following = segments
                .get(index + 1)
                .filter(|next| next.kind == SegmentKind::Inserted);
            let preceding = index
                .checked_sub(1)
                .and_then(|prev| segments.get(prev))
                .filter(|prev| prev.kind == SegmentKind::Inserted)
                .filter(|prev| claimed != Some(prev.ordinal));
            let counterpart = following.or(preceding);
            if let Some(paired) = following {
                claimed = Some(paired.ordinal);
            }

            let phrase = segment.text.trim();
            if phrase.is_empty() {
                continue;
            }
            if self.policy == HighlightPolicy::Unique && !seen.insert(phrase) {
                continue;
            }

            mismatches.push(Mismatch {
                phrase,
                counterpart: counterpart.map(|paired| paired.text.as_str()),
                kind: if counterpart.is_some() {
                    MismatchKind::Mistranslation
                } else {
                    MismatchKind::Omission
                },
            });
        }

        mismatches
    }
}

impl Default for MismatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MismatchExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MismatchExtractor")
            .field("policy", &self.policy)
            .field("strategy", &self.strategy.id())
            .finish()
    }
}

struct Mismatch<'s> {
    phrase: &'s str,
    counterpart: Option<&'s str>,
    kind: MismatchKind,
}

pub(crate) fn decode_text(side: TextSide, bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|err| Error::InvalidInput {
        reason: format!("{side} text is not valid UTF-8: {err}"),
    })
}

pub(crate) fn request_texts(request: &MismatchRequest) -> Result<(&str, &str)> {
    let reference = request
        .reference
        .as_deref()
        .ok_or_else(|| missing(TextSide::Reference))?;
    let candidate = request
        .candidate
        .as_deref()
        .ok_or_else(|| missing(TextSide::Candidate))?;
    Ok((reference, candidate))
}

fn missing(side: TextSide) -> Error {
    Error::InvalidInput {
        reason: format!("{side} text is missing"),
    }
}
