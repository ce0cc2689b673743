mod recording_backend;

pub use recording_backend::{
    AppliedOption, RecordingBackend, RecordingInstance, RecordingJournal,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::RenderConfig;

/// Opaque handle of the display surface a backend instance draws into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceHandle(String);

impl SurfaceHandle {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Theme passed to backend init: a registered theme name or an inline theme object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Theme {
    Named(String),
    Custom(Value),
}

impl Theme {
    pub const FALLBACK: &'static str = "light";

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Theme handed to the backend; an empty name or `null` falls back to `light`.
    #[must_use]
    pub fn resolved(&self) -> Self {
        match self {
            Self::Named(name) if name.is_empty() => Self::named(Self::FALLBACK),
            Self::Custom(Value::Null) => Self::named(Self::FALLBACK),
            other => other.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::named("dark")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Raster output.
    #[default]
    Canvas,
    /// Vector output.
    Svg,
}

/// Init-time options that cannot be changed on a live instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitOptions {
    pub locale: String,
    pub renderer: RendererKind,
    pub device_pixel_ratio: f64,
    pub use_dirty_rect: bool,
}

/// Failure reported by a rendering backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The instance is mid-transition (for example it was torn down and
    /// recreated while a call was in flight).
    #[error("backend instance is mid-transition: {0}")]
    Transient(String),

    #[error("backend instance is disposed")]
    Disposed,

    #[error("{0}")]
    Failed(String),
}

impl BackendError {
    /// Whether the failure is caused by a stale instance rather than by the call itself.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Disposed)
    }
}

/// Handler attached through [`BackendInstance::on`]; receives the native event payload.
pub type BackendEventHandler = Box<dyn FnMut(&Value) + 'static>;

/// Factory side of a rendering backend.
pub trait RenderBackend {
    fn init(
        &mut self,
        surface: &SurfaceHandle,
        theme: &Theme,
        options: &InitOptions,
    ) -> Result<Box<dyn BackendInstance>, BackendError>;
}

/// One live engine handle bound to a surface.
///
/// `set_option` with `not_merge = true` replaces the whole prior option;
/// with `false` the config is merged into it.
pub trait BackendInstance {
    fn set_option(&mut self, config: &RenderConfig, not_merge: bool) -> Result<(), BackendError>;
    fn on(&mut self, event: &str, selector: &str, handler: BackendEventHandler);
    fn resize(&mut self) -> Result<(), BackendError>;
    fn dispose(&mut self);
    fn width(&self) -> f64;
    fn is_disposed(&self) -> bool;
}
