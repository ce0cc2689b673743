use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, ClickEvent, ClickParams, ResizeNotifier, SurfaceObserver};
use crate::render::{BackendInstance, InitOptions, RenderBackend, SurfaceHandle, Theme};

/// Lifecycle of the component's backend instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendState {
    Absent,
    Initializing,
    Ready,
    Disposed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Ready,
    /// No surface yet; mount again once [`ChartEvent::SurfaceReady`] arrives.
    Deferred,
    AlreadyMounted,
}

/// Exclusive owner of the single live backend instance.
///
/// Reconciliation and observers borrow the instance for one call at a time via
/// [`LifecycleManager::live_instance_mut`], which refuses disposed instances.
pub struct LifecycleManager<B: RenderBackend, O: SurfaceObserver> {
    backend: B,
    observer: O,
    surface: Option<SurfaceHandle>,
    instance: Option<Box<dyn BackendInstance>>,
    state: BackendState,
    generation: u64,
    observing: bool,
    unmounted: bool,
    theme: Theme,
    options: InitOptions,
    events: UnboundedSender<ChartEvent>,
    clicks: UnboundedSender<ClickEvent>,
}

impl<B: RenderBackend, O: SurfaceObserver> LifecycleManager<B, O> {
    #[must_use]
    pub fn new(
        backend: B,
        observer: O,
        theme: Theme,
        options: InitOptions,
        events: UnboundedSender<ChartEvent>,
        clicks: UnboundedSender<ClickEvent>,
    ) -> Self {
        Self {
            backend,
            observer,
            surface: None,
            instance: None,
            state: BackendState::Absent,
            generation: 0,
            observing: false,
            unmounted: false,
            theme,
            options,
            events,
            clicks,
        }
    }

    #[must_use]
    pub fn state(&self) -> BackendState {
        self.state
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == BackendState::Ready
    }

    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Number of instances created so far; changes on every re-init.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn surface(&self) -> Option<&SurfaceHandle> {
        self.surface.as_ref()
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether the held instance was torn down underneath its owner.
    #[must_use]
    pub fn instance_is_stale(&self) -> bool {
        self.instance
            .as_ref()
            .is_some_and(|instance| instance.is_disposed())
    }

    #[must_use]
    pub fn live_instance(&self) -> Option<&dyn BackendInstance> {
        if !self.is_ready() {
            return None;
        }
        self.instance
            .as_deref()
            .filter(|instance| !instance.is_disposed())
    }

    pub fn live_instance_mut(&mut self) -> Option<&mut (dyn BackendInstance + 'static)> {
        if !self.is_ready() {
            return None;
        }
        match self.instance.as_deref_mut() {
            Some(instance) if !instance.is_disposed() => Some(instance),
            _ => None,
        }
    }

    /// Binds the display surface.
    ///
    /// Swapping the surface of a live chart moves the resize observer to the
    /// new surface and recreates the instance on it.
    pub fn attach_surface(&mut self, surface: SurfaceHandle) -> ChartResult<()> {
        if self.surface.as_ref() == Some(&surface) {
            return Ok(());
        }
        if self.unmounted {
            return Err(ChartError::InvalidState(
                "cannot attach a display surface after unmount".to_owned(),
            ));
        }
        if self.observing {
            if let Some(previous) = &self.surface {
                self.observer.unobserve(previous);
                debug!(
                    from = %previous.id(),
                    to = %surface.id(),
                    "moving resize observer to new surface"
                );
            }
            self.observing = false;
        }
        self.surface = Some(surface);
        self.recreate_if_live()
    }

    /// `Absent → Initializing → Ready`, or [`MountOutcome::Deferred`] without a surface.
    pub fn mount(&mut self) -> ChartResult<MountOutcome> {
        if self.unmounted {
            return Err(ChartError::InvalidState(
                "cannot mount a chart after unmount".to_owned(),
            ));
        }
        if self.is_ready() {
            return Ok(MountOutcome::AlreadyMounted);
        }
        if self.surface.is_none() {
            debug!("display surface not available yet; deferring backend init");
            return Ok(MountOutcome::Deferred);
        }
        self.init_instance()?;
        Ok(MountOutcome::Ready)
    }

    /// Theme change: `Ready → Disposed → Initializing → Ready`.
    ///
    /// Before the first successful mount only the stored theme changes.
    pub fn set_theme(&mut self, theme: Theme) -> ChartResult<()> {
        self.theme = theme;
        self.recreate_if_live()
    }

    /// Replaces theme and init options together; recreates a live instance once.
    pub fn reconfigure(&mut self, theme: Theme, options: InitOptions) -> ChartResult<()> {
        self.theme = theme;
        self.options = options;
        self.recreate_if_live()
    }

    /// Disposes the current instance and creates a fresh one on the same surface.
    pub fn recreate(&mut self) -> ChartResult<()> {
        if self.unmounted {
            return Err(ChartError::InvalidState(
                "cannot recreate a backend instance after unmount".to_owned(),
            ));
        }
        self.dispose_instance();
        self.init_instance()
    }

    /// `Ready → Disposed`, terminal. Detaches the resize observer first.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        if self.observing {
            if let Some(surface) = &self.surface {
                self.observer.unobserve(surface);
            }
            self.observing = false;
        }
        self.dispose_instance();
        self.state = BackendState::Disposed;
        self.unmounted = true;
        debug!("chart unmounted");
    }

    /// Asks the live instance to resize. No-op without one.
    pub fn resize(&mut self) -> ChartResult<()> {
        match self.live_instance_mut() {
            Some(instance) => instance.resize().map_err(ChartError::ConfigurationApply),
            None => Ok(()),
        }
    }

    fn recreate_if_live(&mut self) -> ChartResult<()> {
        match self.state {
            BackendState::Ready => self.recreate(),
            BackendState::Absent | BackendState::Initializing | BackendState::Disposed => Ok(()),
        }
    }

    fn dispose_instance(&mut self) {
        if let Some(mut instance) = self.instance.take() {
            instance.dispose();
            self.state = BackendState::Disposed;
            debug!(generation = self.generation, "backend instance disposed");
        }
    }

    fn init_instance(&mut self) -> ChartResult<()> {
        let Some(surface) = self.surface.clone() else {
            return Err(ChartError::InvalidState(
                "backend init requires a display surface".to_owned(),
            ));
        };

        self.state = BackendState::Initializing;
        let theme = self.theme.resolved();
        let mut instance = match self.backend.init(&surface, &theme, &self.options) {
            Ok(instance) => instance,
            Err(err) => {
                warn!(error = %err, "backend init failed");
                self.state = BackendState::Absent;
                return Err(ChartError::BackendInit(err));
            }
        };

        let clicks = self.clicks.clone();
        instance.on(
            "click",
            "series",
            Box::new(move |params: &Value| {
                let click = ClickEvent {
                    params: ClickParams(params.clone()),
                };
                if clicks.send(click).is_err() {
                    debug!("dropping backend click: chart handle is gone");
                }
            }),
        );

        if !self.observing {
            self.observer
                .observe(&surface, ResizeNotifier::new(self.events.clone()));
            self.observing = true;
        }

        self.instance = Some(instance);
        self.generation += 1;
        self.state = BackendState::Ready;
        debug!(generation = self.generation, "backend instance ready");
        Ok(())
    }
}
