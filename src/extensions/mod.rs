//! Chart type strategies and how they are found.
//!
//! A strategy turns columns and rows into a backend option. Strategies live in
//! a shared [`StrategyRegistry`]; the [`StrategyLoader`] fills it lazily from
//! the built-in table or an external loader hook.

pub mod builtin;
mod loader;
mod registry;
mod strategy;

pub use loader::{BoxFuture, ExternalStrategyLoader, LoadError, StrategyLoader};
pub use registry::StrategyRegistry;
pub use strategy::{ChartStrategy, FnStrategy, StrategyContext, define_strategy};
