//! Core library for Verso's translation mismatch review.
//!
//! The crate is layered around three primary responsibilities:
//! - word-level alignment of a reference and a candidate text
//! - deriving highlight phrases and correction suggestions from the alignment
//! - the service layer that guards input size and wires in configuration

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Configuration loading and defaults.
pub mod config;
/// Word-level alignment primitives.
pub mod diff;
/// Mismatch extraction over aligned segments.
pub mod extractor;
/// Highlight sinks that locate phrases in a document.
pub mod highlight;
/// Tracing subscriber setup.
pub mod logging;
/// Review service façade.
pub mod service;
/// Whitespace tokenization.
pub mod tokenize;

pub use config::{CommandConfig, ExtractorConfig, OutputConfig, SuggestionConfig, VersoConfig};
pub use extractor::{HighlightPolicy, MismatchExtractor};
pub use highlight::{HighlightSink, TextHighlighter};
pub use service::ReviewService;
pub use verso_api::{
    Correction, HighlightSpan, HighlightSummary, KeywordMatches, MismatchKind, MismatchReport,
    MismatchRequest, MismatchResponse, Segment, SegmentKind,
};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Compare two texts with the default extractor.
///
/// # Errors
///
/// The default placeholder strategy never fails, so this only errors if the
/// extractor itself reports a failure.
pub fn compute_mismatches(reference: &str, candidate: &str) -> Result<MismatchReport> {
    MismatchExtractor::new().extract(reference, candidate)
}

/// Which of the two compared texts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSide {
    /// Ground-truth text.
    Reference,
    /// Text being checked against the reference.
    Candidate,
}

impl std::fmt::Display for TextSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input text was absent or not valid UTF-8.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },
    /// Input exceeded the configured token ceiling.
    #[error("{side} text has {tokens} tokens, exceeding the limit of {limit}")]
    InputTooLarge {
        /// Offending side.
        side: TextSide,
        /// Token count of that side.
        tokens: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// Configured suggestion strategy is unknown.
    #[error("suggestion strategy is not registered: {strategy}")]
    StrategyNotRegistered {
        /// Requested strategy id.
        strategy: String,
    },
    /// Suggestion strategy failed to produce a correction.
    #[error("suggestion strategy {strategy} failed: {source}")]
    Strategy {
        /// Strategy id.
        strategy: String,
        /// Error reported by the strategy.
        #[source]
        source: verso_strategy_api::StrategyError,
    },
    /// Configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// Path of the configuration file.
        path: String,
        /// TOML parse error.
        #[source]
        source: toml::de::Error,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
}
