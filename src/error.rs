use thiserror::Error;

use crate::render::BackendError;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// No registered, built-in or externally loadable strategy matches `id`.
    #[error(
        "chart type `{id}` was not found; built-in types are: {known}. \
         Additional types can be provided by registering a custom strategy with \
         `StrategyRegistry::register_strategy`: {reason}",
        known = .supported.join(", ")
    )]
    StrategyNotFound {
        id: String,
        supported: Vec<String>,
        reason: String,
    },

    /// The backend was still mid-transition after one dispose + recreate + retry.
    #[error("backend instance remained in a transient state after retry: {0}")]
    BackendTransientState(#[source] BackendError),

    #[error("failed to apply render configuration: {0}")]
    ConfigurationApply(#[source] BackendError),

    #[error("failed to initialize backend instance: {0}")]
    BackendInit(#[source] BackendError),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid lifecycle state: {0}")]
    InvalidState(String),
}

impl ChartError {
    #[must_use]
    pub fn is_strategy_not_found(&self) -> bool {
        matches!(self, Self::StrategyNotFound { .. })
    }
}
