use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use crate::api::ChartProps;
use crate::core::{Column, Row, RenderConfig};
use crate::render::BackendInstance;

/// Everything a strategy may read while building its option.
///
/// The backend handle is borrowed for the duration of one `reset_option`
/// call only.
pub struct StrategyContext<'a> {
    props: &'a ChartProps,
    chart: &'a dyn BackendInstance,
    reinit_requested: &'a Cell<bool>,
}

impl<'a> StrategyContext<'a> {
    #[must_use]
    pub fn new(
        props: &'a ChartProps,
        chart: &'a dyn BackendInstance,
        reinit_requested: &'a Cell<bool>,
    ) -> Self {
        Self {
            props,
            chart,
            reinit_requested,
        }
    }

    #[must_use]
    pub fn props(&self) -> &ChartProps {
        self.props
    }

    /// The live backend instance the option will be applied to.
    #[must_use]
    pub fn chart(&self) -> &dyn BackendInstance {
        self.chart
    }

    #[must_use]
    pub fn chart_width(&self) -> f64 {
        self.chart.width()
    }

    /// Asks for the backend instance to be recreated before the option is applied.
    pub fn request_reinit(&self) {
        self.reinit_requested.set(true);
    }
}

/// A named transform from tabular input to a backend option.
///
/// Strategies are stateless; one instance serves every reconciliation of its
/// chart type.
pub trait ChartStrategy: Send + Sync {
    fn name(&self) -> &str;

    /// Builds the option for `columns`/`rows`. `None` leaves the backend untouched.
    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig>;
}

impl fmt::Debug for dyn ChartStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartStrategy")
            .field("name", &self.name())
            .finish()
    }
}

/// Closure-backed strategy built by [`define_strategy`].
pub struct FnStrategy<F> {
    name: String,
    reset: F,
}

impl<F> ChartStrategy for FnStrategy<F>
where
    F: Fn(&[Column], &[Row], &StrategyContext<'_>) -> Option<RenderConfig> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn reset_option(
        &self,
        columns: &[Column],
        rows: &[Row],
        ctx: &StrategyContext<'_>,
    ) -> Option<RenderConfig> {
        (self.reset)(columns, rows, ctx)
    }
}

/// Wraps a closure as a shareable strategy.
pub fn define_strategy<F>(name: impl Into<String>, reset: F) -> Arc<dyn ChartStrategy>
where
    F: Fn(&[Column], &[Row], &StrategyContext<'_>) -> Option<RenderConfig>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnStrategy {
        name: name.into(),
        reset,
    })
}
