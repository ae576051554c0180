use std::sync::Arc;
use std::time::Duration;

use verso_api::{MismatchReport, MismatchRequest, MismatchResponse};
use verso_strategies::{default_registry, CommandStrategy};
use verso_strategy_api::{StrategyRegistry, StrategySummary};

use crate::config::VersoConfig;
use crate::extractor::{decode_text, request_texts, MismatchExtractor};
use crate::tokenize::token_count;
use crate::{Error, Result, TextSide};

/// High-level façade that guards input size and runs the configured extractor.
#[derive(Clone)]
pub struct ReviewService {
    config: VersoConfig,
    registry: Arc<StrategyRegistry>,
    extractor: MismatchExtractor,
}

impl ReviewService {
    /// Create a service that resolves its strategy from `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyNotRegistered`] when the configured strategy id
    /// is not present in the registry.
    pub fn new(config: VersoConfig, registry: StrategyRegistry) -> Result<Self> {
        let strategy_id = config.suggestions.strategy.as_str();
        let strategy = registry
            .get(strategy_id)
            .ok_or_else(|| Error::StrategyNotRegistered {
                strategy: strategy_id.to_string(),
            })?;
        let extractor = MismatchExtractor::new()
            .with_strategy(strategy)
            .with_policy(config.extractor.highlight_policy);

        Ok(Self {
            config,
            registry: Arc::new(registry),
            extractor,
        })
    }

    /// Create a service over the built-in strategies plus any configured command.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StrategyNotRegistered`] when the configured strategy id
    /// is unknown, for example `command` without a configured program.
    pub fn from_config(config: VersoConfig) -> Result<Self> {
        let registry = registry_from_config(&config);
        Self::new(config, registry)
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &VersoConfig {
        &self.config
    }

    /// Access the underlying registry.
    #[must_use]
    pub fn registry(&self) -> Arc<StrategyRegistry> {
        Arc::clone(&self.registry)
    }

    /// Summaries of every available strategy.
    #[must_use]
    pub fn strategies(&self) -> Vec<StrategySummary> {
        self.registry.summaries()
    }

    /// Compare two texts and shape the result per the output configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] when either side exceeds the token
    /// ceiling, or propagates strategy failures.
    pub fn review(&self, reference: &str, candidate: &str) -> Result<MismatchResponse> {
        let report = self.review_report(reference, candidate)?;
        Ok(report.into_response(self.config.output.include_segments))
    }

    /// Compare two texts and return the full report including segments.
    ///
    /// # Errors
    ///
    /// See [`ReviewService::review`].
    pub fn review_report(&self, reference: &str, candidate: &str) -> Result<MismatchReport> {
        self.check_size(TextSide::Reference, reference)?;
        self.check_size(TextSide::Candidate, candidate)?;
        self.extractor.extract(reference, candidate)
    }

    /// Compare two byte buffers that must hold UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for invalid UTF-8, otherwise behaves
    /// like [`ReviewService::review`].
    pub fn review_bytes(&self, reference: &[u8], candidate: &[u8]) -> Result<MismatchResponse> {
        let reference = decode_text(TextSide::Reference, reference)?;
        let candidate = decode_text(TextSide::Candidate, candidate)?;
        self.review(reference, candidate)
    }

    /// Compare the texts carried by a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when either text is absent, otherwise
    /// behaves like [`ReviewService::review`].
    pub fn review_request(&self, request: &MismatchRequest) -> Result<MismatchResponse> {
        let (reference, candidate) = request_texts(request)?;
        self.review(reference, candidate)
    }

    fn check_size(&self, side: TextSide, text: &str) -> Result<()> {
        let limit = self.config.extractor.max_tokens;
        let tokens = token_count(text);
        if tokens > limit {
            tracing::warn!(%side, tokens, limit, "rejecting oversized input");
            return Err(Error::InputTooLarge {
                side,
                tokens,
                limit,
            });
        }
        Ok(())
    }
}

/// Built-in strategies plus the command strategy described by `config`.
///
/// The selected strategy id is not resolved here, so listing works even when
/// the configuration names an unknown strategy.
#[must_use]
pub fn registry_from_config(config: &VersoConfig) -> StrategyRegistry {
    let mut registry = default_registry();
    if let Some(command) = &config.suggestions.command {
        registry.register(
            CommandStrategy::new(command.program.as_str(), command.args.iter())
                .with_timeout(Duration::from_secs(command.timeout_secs)),
        );
    }
    registry
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let strategy_ids: Vec<&str> = self.registry.ids().collect();
        f.debug_struct("ReviewService")
            .field("extractor", &self.extractor)
            .field("max_tokens", &self.config.extractor.max_tokens)
            .field("strategies", &strategy_ids)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CommandConfig;

    #[test]
    fn unknown_strategy_is_rejected() {
        let mut config = VersoConfig::default();
        config.suggestions.strategy = "oracle".into();
        let err = ReviewService::new(config, default_registry()).expect_err("unknown strategy");
        assert!(matches!(err, Error::StrategyNotRegistered { ref strategy } if strategy == "oracle"));
    }

    #[test]
    fn configured_command_is_registered() {
        let mut config = VersoConfig::default();
        config.suggestions.strategy = "command".into();
        config.suggestions.command = Some(CommandConfig {
            program: "true".into(),
            args: Vec::new(),
            timeout_secs: 1,
        });
        let service = ReviewService::from_config(config).expect("service");
        assert!(service.registry().contains("command"));
    }

    #[test]
    fn registry_lists_strategies_despite_unknown_selection() {
        let mut config = VersoConfig::default();
        config.suggestions.strategy = "command".into();
        assert!(ReviewService::from_config(config.clone()).is_err());

        let registry = registry_from_config(&config);
        assert!(registry.contains("placeholder"));
        assert!(registry.contains("counterpart"));

        config.suggestions.command = Some(CommandConfig {
            program: "suggest-fix".into(),
            args: Vec::new(),
            timeout_secs: 3,
        });
        assert!(registry_from_config(&config).contains("command"));
    }

    #[test]
    fn limit_is_inclusive() {
        let mut config = VersoConfig::default();
        config.extractor.max_tokens = 2;
        let service = ReviewService::from_config(config).expect("service");

        assert!(service.review("a b", "a c").is_ok());
        let err = service.review("a b", "a b c").expect_err("too large");
        assert!(matches!(
            err,
            Error::InputTooLarge {
                side: TextSide::Candidate,
                tokens: 3,
                limit: 2
            }
        ));
    }
}
