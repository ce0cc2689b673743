//! chart-kit: declarative chart component core.
//!
//! Tabular input (columns + rows) is turned into a backend option by a named
//! chart type strategy and applied to a single, lifecycle-managed rendering
//! backend instance.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartComponent, ChartProps};
pub use error::{ChartError, ChartResult};
