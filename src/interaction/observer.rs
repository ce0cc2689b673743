use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tokio::sync::mpsc::UnboundedSender;

use crate::render::SurfaceHandle;

use super::ChartEvent;

/// Posts [`ChartEvent::Resized`] onto the owning component's queue.
#[derive(Debug, Clone)]
pub struct ResizeNotifier {
    events: UnboundedSender<ChartEvent>,
}

impl ResizeNotifier {
    pub(crate) fn new(events: UnboundedSender<ChartEvent>) -> Self {
        Self { events }
    }

    /// Returns `false` when the component is gone.
    pub fn notify(&self) -> bool {
        self.events.send(ChartEvent::Resized).is_ok()
    }
}

/// Size observation of a display surface.
///
/// After `unobserve` the observer must drop the notifier it was given, so a
/// detached surface can never report again.
pub trait SurfaceObserver {
    fn observe(&mut self, surface: &SurfaceHandle, notifier: ResizeNotifier);
    fn unobserve(&mut self, surface: &SurfaceHandle);
}

#[derive(Default)]
struct ObserverState {
    watched: HashMap<SurfaceHandle, ResizeNotifier>,
    observe_calls: usize,
    unobserve_calls: usize,
}

/// In-memory observer that lets hosts and tests trigger resizes by hand.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    state: Rc<RefCell<ObserverState>>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a size change of `surface`. Returns whether a notifier fired.
    pub fn trigger(&self, surface: &SurfaceHandle) -> bool {
        let notifier = self.state.borrow().watched.get(surface).cloned();
        notifier.is_some_and(|notifier| notifier.notify())
    }

    #[must_use]
    pub fn is_observing(&self, surface: &SurfaceHandle) -> bool {
        self.state.borrow().watched.contains_key(surface)
    }

    #[must_use]
    pub fn observe_calls(&self) -> usize {
        self.state.borrow().observe_calls
    }

    #[must_use]
    pub fn unobserve_calls(&self) -> usize {
        self.state.borrow().unobserve_calls
    }
}

impl SurfaceObserver for RecordingObserver {
    fn observe(&mut self, surface: &SurfaceHandle, notifier: ResizeNotifier) {
        let mut state = self.state.borrow_mut();
        state.observe_calls += 1;
        state.watched.insert(surface.clone(), notifier);
    }

    fn unobserve(&mut self, surface: &SurfaceHandle) {
        let mut state = self.state.borrow_mut();
        state.unobserve_calls += 1;
        state.watched.remove(surface);
    }
}
