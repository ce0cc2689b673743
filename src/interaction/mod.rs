//! Event plumbing between the host, the backend and the component.
//!
//! Everything that can change a chart arrives as a [`ChartEvent`] on one
//! queue. Backend clicks travel the other way, re-emitted as [`ClickEvent`].

mod observer;

pub use observer::{RecordingObserver, ResizeNotifier, SurfaceObserver};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError};

use crate::api::ChartProps;
use crate::core::{Column, Row};
use crate::render::{SurfaceHandle, Theme};

/// Input processed by [`crate::api::ChartComponent::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    /// The display surface became available after a deferred mount.
    SurfaceReady(SurfaceHandle),
    Mount,
    DataChanged { columns: Vec<Column>, rows: Vec<Row> },
    PropsChanged(Box<ChartProps>),
    ThemeChanged(Theme),
    Resized,
    Unmount,
}

/// The backend's native click payload, forwarded unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickParams(pub Value);

#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub params: ClickParams,
}

/// Host-side end of a component's channels.
pub struct ChartHandle {
    events: UnboundedSender<ChartEvent>,
    clicks: UnboundedReceiver<ClickEvent>,
}

impl ChartHandle {
    pub(crate) fn new(
        events: UnboundedSender<ChartEvent>,
        clicks: UnboundedReceiver<ClickEvent>,
    ) -> Self {
        Self { events, clicks }
    }

    /// Queues `event`. Returns `false` once the component has been dropped.
    pub fn dispatch(&self, event: ChartEvent) -> bool {
        self.events.send(event).is_ok()
    }

    #[must_use]
    pub fn dispatcher(&self) -> UnboundedSender<ChartEvent> {
        self.events.clone()
    }

    pub async fn next_click(&mut self) -> Option<ClickEvent> {
        self.clicks.recv().await
    }

    pub fn try_next_click(&mut self) -> Option<ClickEvent> {
        match self.clicks.try_recv() {
            Ok(click) => Some(click),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
