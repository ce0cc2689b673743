use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, error::TryRecvError};
use tracing::{debug, warn};

use crate::core::{Column, Row};
use crate::error::ChartResult;
use crate::extensions::{StrategyLoader, StrategyRegistry};
use crate::interaction::{ChartEvent, ChartHandle, SurfaceObserver};
use crate::render::{RenderBackend, SurfaceHandle, Theme};

use super::{
    BackendState, ChartProps, LifecycleManager, MountOutcome, ReconcileOutcome, Reconciler,
};

/// Declarative chart bound to one display surface.
///
/// The host pushes [`ChartEvent`]s through the [`ChartHandle`] (or calls the
/// matching methods directly); each event is handled to completion before the
/// next one starts.
pub struct ChartComponent<B: RenderBackend, O: SurfaceObserver> {
    lifecycle: LifecycleManager<B, O>,
    reconciler: Reconciler,
    props: ChartProps,
    columns: Vec<Column>,
    rows: Vec<Row>,
    events: UnboundedReceiver<ChartEvent>,
}

impl<B: RenderBackend, O: SurfaceObserver> ChartComponent<B, O> {
    pub fn new(
        backend: B,
        observer: O,
        loader: StrategyLoader,
        props: ChartProps,
    ) -> ChartResult<(Self, ChartHandle)> {
        props.validate()?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (click_tx, click_rx) = mpsc::unbounded_channel();

        let lifecycle = LifecycleManager::new(
            backend,
            observer,
            props.theme.clone(),
            props.init_options(),
            event_tx.clone(),
            click_tx,
        );
        let component = Self {
            lifecycle,
            reconciler: Reconciler::new(loader),
            props,
            columns: Vec::new(),
            rows: Vec::new(),
            events: event_rx,
        };
        Ok((component, ChartHandle::new(event_tx, click_rx)))
    }

    /// Builds a component that resolves chart types through `registry` and the built-ins.
    pub fn with_registry(
        backend: B,
        observer: O,
        registry: Arc<StrategyRegistry>,
        props: ChartProps,
    ) -> ChartResult<(Self, ChartHandle)> {
        Self::new(backend, observer, StrategyLoader::new(registry), props)
    }

    #[must_use]
    pub fn props(&self) -> &ChartProps {
        &self.props
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn state(&self) -> BackendState {
        self.lifecycle.state()
    }

    #[must_use]
    pub fn lifecycle(&self) -> &LifecycleManager<B, O> {
        &self.lifecycle
    }

    /// Binds the display surface; a live chart moved to a new surface is redrawn there.
    pub async fn attach_surface(&mut self, surface: SurfaceHandle) -> ChartResult<()> {
        let generation = self.lifecycle.generation();
        self.lifecycle.attach_surface(surface)?;
        if self.lifecycle.generation() != generation {
            self.reconcile().await?;
        }
        Ok(())
    }

    /// Creates the backend instance and draws the current data.
    pub async fn mount(&mut self) -> ChartResult<MountOutcome> {
        let outcome = self.lifecycle.mount()?;
        if outcome == MountOutcome::Ready {
            self.reconcile().await?;
        }
        Ok(outcome)
    }

    pub async fn set_data(
        &mut self,
        columns: Vec<Column>,
        rows: Vec<Row>,
    ) -> ChartResult<ReconcileOutcome> {
        self.columns = columns;
        self.rows = rows;
        self.reconcile().await
    }

    /// Replaces the props; theme or init-option changes recreate the instance first.
    pub async fn set_props(&mut self, props: ChartProps) -> ChartResult<ReconcileOutcome> {
        props.validate()?;
        let previous = std::mem::replace(&mut self.props, props);
        if previous.requires_reinit(&self.props) {
            self.lifecycle
                .reconfigure(self.props.theme.clone(), self.props.init_options())?;
        }
        self.reconcile().await
    }

    pub async fn set_theme(&mut self, theme: Theme) -> ChartResult<ReconcileOutcome> {
        self.props.theme = theme.clone();
        self.lifecycle.set_theme(theme)?;
        self.reconcile().await
    }

    /// Size-dependent options are recomputed before the backend resizes.
    pub async fn resize(&mut self) -> ChartResult<()> {
        if !self.lifecycle.is_ready() {
            debug!("ignoring resize: no live backend instance");
            return Ok(());
        }
        self.reconcile().await?;
        self.lifecycle.resize()
    }

    pub fn unmount(&mut self) {
        self.lifecycle.unmount();
    }

    pub async fn reconcile(&mut self) -> ChartResult<ReconcileOutcome> {
        self.reconciler
            .reconcile(&mut self.lifecycle, &self.columns, &self.rows, &self.props)
            .await
    }

    pub async fn handle(&mut self, event: ChartEvent) -> ChartResult<()> {
        if self.lifecycle.is_unmounted() {
            debug!(?event, "ignoring event after unmount");
            return Ok(());
        }
        match event {
            ChartEvent::SurfaceReady(surface) => {
                self.attach_surface(surface).await?;
                self.mount().await?;
            }
            ChartEvent::Mount => {
                self.mount().await?;
            }
            ChartEvent::DataChanged { columns, rows } => {
                self.set_data(columns, rows).await?;
            }
            ChartEvent::PropsChanged(props) => {
                self.set_props(*props).await?;
            }
            ChartEvent::ThemeChanged(theme) => {
                self.set_theme(theme).await?;
            }
            ChartEvent::Resized => self.resize().await?,
            ChartEvent::Unmount => self.unmount(),
        }
        Ok(())
    }

    /// Handles every event already queued, returning how many were processed.
    pub async fn process_pending(&mut self) -> ChartResult<usize> {
        let mut processed = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.handle(event).await?;
                    processed += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Ok(processed),
            }
        }
    }

    /// Drains the event queue until the component is unmounted.
    ///
    /// A failing event is logged and the loop moves on to the next one; use
    /// [`Self::handle`] or [`Self::process_pending`] to observe errors.
    pub async fn run(&mut self) {
        while !self.lifecycle.is_unmounted() {
            let Some(event) = self.events.recv().await else {
                break;
            };
            if let Err(err) = self.handle(event).await {
                warn!(error = %err, "chart event failed; continuing with the next event");
            }
        }
    }
}
