use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::builtin::{self, StrategyFactory};
use super::{ChartStrategy, StrategyRegistry};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type LoadError = Box<dyn Error + Send + Sync>;

/// Late acquisition hook for chart types that are not compiled in.
pub trait ExternalStrategyLoader: Send + Sync {
    fn load<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Arc<dyn ChartStrategy>, LoadError>>;
}

/// Resolves chart type ids to strategies, loading and caching on first use.
///
/// Lookup order: registry, compiled-in built-ins, external loader.
#[derive(Clone)]
pub struct StrategyLoader {
    registry: Arc<StrategyRegistry>,
    builtins: &'static [(&'static str, StrategyFactory)],
    external: Option<Arc<dyn ExternalStrategyLoader>>,
}

impl StrategyLoader {
    #[must_use]
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self {
            registry,
            builtins: builtin::BUILTIN_STRATEGIES,
            external: None,
        }
    }

    #[must_use]
    pub fn with_external_loader(mut self, loader: Arc<dyn ExternalStrategyLoader>) -> Self {
        self.external = Some(loader);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// Ids listed to users when a chart type cannot be resolved.
    #[must_use]
    pub fn supported_ids(&self) -> Vec<String> {
        self.builtins
            .iter()
            .map(|(id, _)| (*id).to_owned())
            .collect()
    }

    /// Returns the strategy for `id`.
    ///
    /// A registry hit completes without suspending. Otherwise the strategy is
    /// acquired and cached in the registry; if another caller registered `id`
    /// while this load was in flight, that registration is kept.
    pub async fn resolve(&self, id: &str) -> ChartResult<Arc<dyn ChartStrategy>> {
        if let Some(strategy) = self.registry.get(id) {
            return Ok(strategy);
        }

        let loaded = self.acquire(id).await?;
        Ok(self.registry.insert_if_absent(id, loaded))
    }

    async fn acquire(&self, id: &str) -> ChartResult<Arc<dyn ChartStrategy>> {
        if let Some((_, factory)) = self.builtins.iter().find(|(name, _)| *name == id) {
            debug!(id = %id, "loading built-in chart type strategy");
            return Ok(factory());
        }

        let reason = match &self.external {
            Some(loader) => {
                debug!(id = %id, "loading chart type strategy through external loader");
                match loader.load(id).await {
                    Ok(strategy) => return Ok(strategy),
                    Err(err) => err.to_string(),
                }
            }
            None => "no strategy module matches this id".to_owned(),
        };

        Err(ChartError::StrategyNotFound {
            id: id.to_owned(),
            supported: self.supported_ids(),
            reason,
        })
    }
}
