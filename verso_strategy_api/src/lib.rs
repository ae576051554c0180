mod registry;
mod types;

pub use registry::StrategyRegistry;
pub use types::{
    ProposedCorrection, StrategyError, StrategyResult, StrategySummary, SuggestionContext,
};

/// Trait implemented by correction suggestion engines.
///
/// Strategies only see the mismatched phrase and its aligned context; they
/// never influence how the two texts are aligned.
pub trait SuggestionStrategy: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label for listings.
    fn label(&self) -> &'static str;

    /// Propose a correction for one highlighted phrase.
    ///
    /// # Errors
    ///
    /// Implementors should surface backend or transport failures.
    fn suggest(&self, context: &SuggestionContext) -> StrategyResult<ProposedCorrection>;
}
