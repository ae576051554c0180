mod command;
mod counterpart;
mod placeholder;

pub use command::{CommandStrategy, COMMAND_ENV};
pub use counterpart::CounterpartStrategy;
pub use placeholder::{PlaceholderStrategy, PLACEHOLDER_CORRECTION, PLACEHOLDER_REASON};

use verso_strategy_api::StrategyRegistry;

/// Build a strategy registry populated with Verso's built-in strategies.
///
/// The `command` strategy is only registered when `VERSO_SUGGEST_CMD` names a
/// program; callers with explicit configuration register their own.
#[must_use]
pub fn default_registry() -> StrategyRegistry {
    let mut registry = StrategyRegistry::new();
    registry.register(PlaceholderStrategy);
    registry.register(CounterpartStrategy);

    if let Some(command) = CommandStrategy::from_env() {
        registry.register(command);
    }

    registry
}
