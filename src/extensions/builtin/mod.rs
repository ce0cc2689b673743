//! Chart types compiled into the crate.

pub mod common;

mod bar;
mod dybar;
mod line;
mod map;
mod multi_line_bar_x;
mod pie;
mod treemap;

use std::sync::Arc;

use super::ChartStrategy;

pub use bar::BarStrategy;
pub use dybar::DynamicBarStrategy;
pub use line::LineStrategy;
pub use map::MapStrategy;
pub use multi_line_bar_x::MultiLineBarStrategy;
pub use pie::PieStrategy;
pub use treemap::TreemapStrategy;

pub type StrategyFactory = fn() -> Arc<dyn ChartStrategy>;

/// Built-in chart types, looked up lazily by id on first use.
pub const BUILTIN_STRATEGIES: &[(&str, StrategyFactory)] = &[
    ("pie", pie_strategy),
    ("line", line_strategy),
    ("bar", bar_strategy),
    ("dybar", dybar_strategy),
    ("multi-line-bar-x", multi_line_bar_x_strategy),
    ("treemap", treemap_strategy),
    ("map", map_strategy),
];

fn pie_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(PieStrategy)
}

fn line_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(LineStrategy)
}

fn bar_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(BarStrategy)
}

fn dybar_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(DynamicBarStrategy)
}

fn multi_line_bar_x_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(MultiLineBarStrategy)
}

fn treemap_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(TreemapStrategy)
}

fn map_strategy() -> Arc<dyn ChartStrategy> {
    Arc::new(MapStrategy)
}
