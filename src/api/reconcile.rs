use std::cell::Cell;

use tracing::{debug, warn};

use crate::core::{Column, RenderConfig, Row};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{StrategyContext, StrategyLoader};
use crate::interaction::SurfaceObserver;
use crate::render::{BackendError, RenderBackend};

use super::{ChartProps, LifecycleManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoBackend,
    NoChartType,
    /// The strategy produced no option.
    NoOption,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// `retried` is set when a stale instance was replaced on the way.
    Applied { retried: bool },
    Skipped(SkipReason),
}

/// Recomputes the render config and applies it to the live backend instance.
#[derive(Clone)]
pub struct Reconciler {
    loader: StrategyLoader,
}

impl Reconciler {
    #[must_use]
    pub fn new(loader: StrategyLoader) -> Self {
        Self { loader }
    }

    #[must_use]
    pub fn loader(&self) -> &StrategyLoader {
        &self.loader
    }

    /// One reconciliation pass.
    ///
    /// Every applied config fully replaces the previous one. A failure caused
    /// by a stale instance is recovered by one dispose + recreate + retry;
    /// any other backend failure is returned unchanged.
    pub async fn reconcile<B: RenderBackend, O: SurfaceObserver>(
        &self,
        lifecycle: &mut LifecycleManager<B, O>,
        columns: &[Column],
        rows: &[Row],
        props: &ChartProps,
    ) -> ChartResult<ReconcileOutcome> {
        if !lifecycle.is_ready() {
            debug!(state = ?lifecycle.state(), "skipping reconcile: no live backend instance");
            return Ok(ReconcileOutcome::Skipped(SkipReason::NoBackend));
        }
        if props.type_id.is_empty() {
            return Ok(ReconcileOutcome::Skipped(SkipReason::NoChartType));
        }

        let strategy = self.loader.resolve(&props.type_id).await?;

        // Liveness may have changed while the strategy was loading.
        if !lifecycle.is_ready() {
            debug!("skipping reconcile: backend instance went away while loading strategy");
            return Ok(ReconcileOutcome::Skipped(SkipReason::NoBackend));
        }

        let mut retried = false;
        apply_with_recovery(lifecycle, &RenderConfig::empty(), false, &mut retried)?;

        let reinit_requested = Cell::new(false);
        let option = {
            let Some(chart) = lifecycle.live_instance() else {
                return Ok(ReconcileOutcome::Skipped(SkipReason::NoBackend));
            };
            let ctx = StrategyContext::new(props, chart, &reinit_requested);
            strategy.reset_option(columns, rows, &ctx)
        };

        if reinit_requested.get() {
            debug!(type_id = %props.type_id, "strategy requested backend re-init");
            lifecycle.recreate()?;
            apply_with_recovery(lifecycle, &RenderConfig::empty(), false, &mut retried)?;
        }

        let Some(option) = option else {
            return Ok(ReconcileOutcome::Skipped(SkipReason::NoOption));
        };
        apply_with_recovery(lifecycle, &option, true, &mut retried)?;
        Ok(ReconcileOutcome::Applied { retried })
    }
}

fn apply_with_recovery<B: RenderBackend, O: SurfaceObserver>(
    lifecycle: &mut LifecycleManager<B, O>,
    config: &RenderConfig,
    not_merge: bool,
    retried: &mut bool,
) -> ChartResult<()> {
    let error = match lifecycle.live_instance_mut() {
        Some(instance) => match instance.set_option(config, not_merge) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        },
        None => BackendError::Disposed,
    };

    if !error.is_transient() && !lifecycle.instance_is_stale() {
        return Err(ChartError::ConfigurationApply(error));
    }
    if *retried {
        return Err(ChartError::BackendTransientState(error));
    }
    *retried = true;

    warn!(
        error = %error,
        generation = lifecycle.generation(),
        "backend instance is stale; recreating and retrying once"
    );
    lifecycle.recreate()?;

    let Some(instance) = lifecycle.live_instance_mut() else {
        return Err(ChartError::BackendTransientState(error));
    };
    instance.set_option(config, not_merge).map_err(|err| {
        if err.is_transient() {
            ChartError::BackendTransientState(err)
        } else {
            ChartError::ConfigurationApply(err)
        }
    })
}
