use serde::{Deserialize, Serialize};

use verso_api::MismatchKind;

/// Everything a strategy knows about one mismatched phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionContext {
    /// Trimmed reference phrase that was flagged.
    pub phrase: String,
    /// Candidate text aligned against the phrase, if any.
    #[serde(default)]
    pub counterpart: Option<String>,
    /// Replacement or drop.
    pub kind: MismatchKind,
    /// Position of the phrase among all highlighted phrases.
    pub ordinal: usize,
}

impl SuggestionContext {
    /// Context for a phrase the candidate replaced with `counterpart`.
    #[must_use]
    pub fn mistranslation(
        phrase: impl Into<String>,
        counterpart: impl Into<String>,
        ordinal: usize,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            counterpart: Some(counterpart.into()),
            kind: MismatchKind::Mistranslation,
            ordinal,
        }
    }

    /// Context for a phrase the candidate dropped.
    #[must_use]
    pub fn omission(phrase: impl Into<String>, ordinal: usize) -> Self {
        Self {
            phrase: phrase.into(),
            counterpart: None,
            kind: MismatchKind::Omission,
            ordinal,
        }
    }
}

/// Correction text and justification returned by a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedCorrection {
    /// Replacement text.
    pub correction: String,
    /// Short human-readable reason.
    pub reason: String,
}

impl ProposedCorrection {
    /// Construct a proposal.
    #[must_use]
    pub fn new(correction: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            correction: correction.into(),
            reason: reason.into(),
        }
    }
}

/// Summary information about a registered strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategySummary {
    /// Stable identifier.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// Errors surfaced by suggestion strategies.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    /// The backend did not answer within its time budget.
    #[error("suggestion backend timed out after {seconds}s")]
    Timeout {
        /// Configured limit.
        seconds: u64,
    },
    /// The backend answered with something that is not a proposal.
    #[error("suggestion backend returned malformed output: {message}")]
    MalformedOutput {
        /// Parser diagnostics.
        message: String,
    },
    /// Generic failure surfaced by the strategy.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl StrategyError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for strategy operations.
pub type StrategyResult<T> = std::result::Result<T, StrategyError>;
