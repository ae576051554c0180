//! Registry keeps track of available suggestion strategies.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{StrategySummary, SuggestionStrategy};

/// In-memory registry for suggestion strategies, ordered by id.
#[derive(Default, Clone)]
pub struct StrategyRegistry {
    strategies: BTreeMap<&'static str, Arc<dyn SuggestionStrategy>>,
}

impl StrategyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy keyed by its `SuggestionStrategy::id`.
    ///
    /// A later registration with the same id replaces the earlier one.
    pub fn register<S>(&mut self, strategy: S)
    where
        S: SuggestionStrategy + 'static,
    {
        self.register_arc(Arc::new(strategy));
    }

    /// Register an already shared strategy.
    pub fn register_arc(&mut self, strategy: Arc<dyn SuggestionStrategy>) {
        self.strategies.insert(strategy.id(), strategy);
    }

    /// Retrieve a strategy by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn SuggestionStrategy>> {
        self.strategies.get(id).cloned()
    }

    /// Returns `true` when a strategy with the id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.strategies.contains_key(id)
    }

    /// Registered strategy identifiers in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.keys().copied()
    }

    /// Summaries for every registered strategy.
    #[must_use]
    pub fn summaries(&self) -> Vec<StrategySummary> {
        self.strategies
            .values()
            .map(|strategy| StrategySummary {
                id: strategy.id().to_string(),
                label: strategy.label().to_string(),
            })
            .collect()
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}
