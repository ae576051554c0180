use verso_api::MismatchKind;
use verso_strategy_api::{
    ProposedCorrection, StrategyResult, SuggestionContext, SuggestionStrategy,
};

/// Restores the reference wording and explains what the candidate says instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct CounterpartStrategy;

impl SuggestionStrategy for CounterpartStrategy {
    fn id(&self) -> &'static str {
        "counterpart"
    }

    fn label(&self) -> &'static str {
        "Aligned counterpart"
    }

    fn suggest(&self, context: &SuggestionContext) -> StrategyResult<ProposedCorrection> {
        let reason = match (context.kind, context.counterpart.as_deref()) {
            (MismatchKind::Mistranslation, Some(counterpart)) => {
                format!("Candidate reads \"{counterpart}\"")
            }
            _ => "Missing from candidate".to_string(),
        };
        Ok(ProposedCorrection::new(context.phrase.clone(), reason))
    }
}
