use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use tracing::{debug, warn};

use super::ChartStrategy;

type StrategyMap = IndexMap<String, Arc<dyn ChartStrategy>>;

/// Chart type identifier → loaded strategy.
///
/// Owned by the host (usually behind an `Arc`) and shared by every component.
/// Entries are never removed; registering an existing id overwrites it.
#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: RwLock<StrategyMap>,
}

impl StrategyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn ChartStrategy>> {
        self.read().get(id).cloned()
    }

    /// Stores `strategy` under `id`, warning when an existing entry is replaced.
    pub fn register(&self, id: impl Into<String>, strategy: Arc<dyn ChartStrategy>) {
        let id = id.into();
        if self.write().insert(id.clone(), strategy).is_some() {
            warn!(
                id = %id,
                "chart type is already registered; the new strategy overwrites the existing one"
            );
        } else {
            debug!(id = %id, "registered chart type strategy");
        }
    }

    /// Registers `strategy` under its own name.
    pub fn register_strategy(&self, strategy: Arc<dyn ChartStrategy>) {
        let id = strategy.name().to_owned();
        self.register(id, strategy);
    }

    /// Stores `strategy` unless `id` was registered meanwhile; returns the entry in effect.
    pub(crate) fn insert_if_absent(
        &self,
        id: &str,
        strategy: Arc<dyn ChartStrategy>,
    ) -> Arc<dyn ChartStrategy> {
        let mut strategies = self.write();
        if let Some(existing) = strategies.get(id) {
            debug!(id = %id, "chart type was registered while loading; keeping registered strategy");
            return Arc::clone(existing);
        }
        strategies.insert(id.to_owned(), Arc::clone(&strategy));
        strategy
    }

    /// Registered ids in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, StrategyMap> {
        self.strategies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StrategyMap> {
        self.strategies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
