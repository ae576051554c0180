use verso_strategy_api::{
    ProposedCorrection, StrategyResult, SuggestionContext, SuggestionStrategy,
};

/// Correction text emitted when no real suggestion engine is configured.
pub const PLACEHOLDER_CORRECTION: &str = "Suggested fix here";
/// Reason attached to every placeholder suggestion.
pub const PLACEHOLDER_REASON: &str = "Differs from ground truth";

/// Default strategy that performs no analysis and returns a fixed template.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderStrategy;

impl SuggestionStrategy for PlaceholderStrategy {
    fn id(&self) -> &'static str {
        "placeholder"
    }

    fn label(&self) -> &'static str {
        "Fixed placeholder"
    }

    fn suggest(&self, _context: &SuggestionContext) -> StrategyResult<ProposedCorrection> {
        Ok(ProposedCorrection::new(
            PLACEHOLDER_CORRECTION,
            PLACEHOLDER_REASON,
        ))
    }
}
