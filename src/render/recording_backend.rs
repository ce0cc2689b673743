use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use serde_json::Value;

use crate::core::RenderConfig;
use crate::render::{
    BackendError, BackendEventHandler, BackendInstance, InitOptions, RenderBackend, SurfaceHandle,
    Theme,
};

/// One recorded `set_option` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOption {
    pub generation: u64,
    pub config: RenderConfig,
    pub not_merge: bool,
}

struct Listener {
    generation: u64,
    event: String,
    selector: String,
    handler: BackendEventHandler,
}

#[derive(Default)]
struct JournalState {
    width: f64,
    next_generation: u64,
    inits: Vec<(u64, Theme, InitOptions)>,
    init_surfaces: Vec<SurfaceHandle>,
    applies: Vec<AppliedOption>,
    disposes: Vec<u64>,
    resizes: Vec<u64>,
    options: HashMap<u64, Value>,
    externally_disposed: HashSet<u64>,
    listeners: Vec<Listener>,
    scripted_apply_failures: VecDeque<BackendError>,
    scripted_init_failure: Option<BackendError>,
}

/// Shared view over everything a [`RecordingBackend`] and its instances did.
///
/// Cloning the journal shares the same underlying record.
#[derive(Clone, Default)]
pub struct RecordingJournal {
    state: Rc<RefCell<JournalState>>,
}

impl RecordingJournal {
    #[must_use]
    pub fn init_count(&self) -> usize {
        self.state.borrow().inits.len()
    }

    #[must_use]
    pub fn dispose_count(&self) -> usize {
        self.state.borrow().disposes.len()
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.state.borrow().resizes.len()
    }

    #[must_use]
    pub fn applies(&self) -> Vec<AppliedOption> {
        self.state.borrow().applies.clone()
    }

    /// The last applied config that replaced the whole option (`not_merge = true`).
    #[must_use]
    pub fn last_full_apply(&self) -> Option<AppliedOption> {
        self.state
            .borrow()
            .applies
            .iter()
            .rev()
            .find(|applied| applied.not_merge)
            .cloned()
    }

    #[must_use]
    pub fn init_themes(&self) -> Vec<Theme> {
        self.state
            .borrow()
            .inits
            .iter()
            .map(|(_, theme, _)| theme.clone())
            .collect()
    }

    /// Surfaces handed to `init`, in call order.
    #[must_use]
    pub fn init_surfaces(&self) -> Vec<SurfaceHandle> {
        self.state.borrow().init_surfaces.clone()
    }

    #[must_use]
    pub fn last_init_options(&self) -> Option<InitOptions> {
        self.state
            .borrow()
            .inits
            .last()
            .map(|(_, _, options)| options.clone())
    }

    /// Generation of the most recently created instance, if any was created.
    #[must_use]
    pub fn latest_generation(&self) -> Option<u64> {
        self.state.borrow().inits.last().map(|(generation, _, _)| *generation)
    }

    /// Effective option held by the instance of `generation` after all merges.
    #[must_use]
    pub fn option_of(&self, generation: u64) -> Option<Value> {
        self.state.borrow().options.get(&generation).cloned()
    }

    /// Effective option of the most recently created instance.
    #[must_use]
    pub fn current_option(&self) -> Option<Value> {
        self.latest_generation()
            .and_then(|generation| self.option_of(generation))
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Selectors of the live listeners registered for `event`.
    #[must_use]
    pub fn listener_selectors(&self, event: &str) -> Vec<String> {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.event == event)
            .map(|listener| listener.selector.clone())
            .collect()
    }

    /// Makes the next full-replace `set_option` call fail with `error`.
    pub fn fail_next_apply(&self, error: BackendError) {
        self.state
            .borrow_mut()
            .scripted_apply_failures
            .push_back(error);
    }

    pub fn fail_next_init(&self, error: BackendError) {
        self.state.borrow_mut().scripted_init_failure = Some(error);
    }

    /// Tears the latest instance down behind its owner's back.
    pub fn dispose_externally(&self) {
        if let Some(generation) = self.latest_generation() {
            self.state
                .borrow_mut()
                .externally_disposed
                .insert(generation);
        }
    }

    /// Delivers a native event to every live listener registered for `event`.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &str, params: &Value) -> usize {
        let mut listeners = std::mem::take(&mut self.state.borrow_mut().listeners);
        let mut invoked = 0;
        for listener in listeners.iter_mut().filter(|listener| listener.event == event) {
            (listener.handler)(params);
            invoked += 1;
        }
        let mut state = self.state.borrow_mut();
        listeners.append(&mut state.listeners);
        state.listeners = listeners;
        invoked
    }

    fn is_externally_disposed(&self, generation: u64) -> bool {
        self.state
            .borrow()
            .externally_disposed
            .contains(&generation)
    }
}

/// Headless backend used by tests and non-visual hosts.
///
/// Instances emulate merge vs. full-replace option semantics and record every
/// lifecycle call into a shared [`RecordingJournal`].
#[derive(Default)]
pub struct RecordingBackend {
    journal: RecordingJournal,
}

impl RecordingBackend {
    #[must_use]
    pub fn new(width: f64) -> Self {
        let backend = Self::default();
        backend.journal.state.borrow_mut().width = width;
        backend
    }

    #[must_use]
    pub fn journal(&self) -> RecordingJournal {
        self.journal.clone()
    }
}

impl RenderBackend for RecordingBackend {
    fn init(
        &mut self,
        surface: &SurfaceHandle,
        theme: &Theme,
        options: &InitOptions,
    ) -> Result<Box<dyn BackendInstance>, BackendError> {
        let mut state = self.journal.state.borrow_mut();
        if let Some(error) = state.scripted_init_failure.take() {
            return Err(error);
        }
        state.next_generation += 1;
        let generation = state.next_generation;
        state
            .inits
            .push((generation, theme.clone(), options.clone()));
        state.init_surfaces.push(surface.clone());
        state
            .options
            .insert(generation, Value::Object(serde_json::Map::new()));
        drop(state);

        Ok(Box::new(RecordingInstance {
            generation,
            disposed: false,
            journal: self.journal.clone(),
        }))
    }
}

pub struct RecordingInstance {
    generation: u64,
    disposed: bool,
    journal: RecordingJournal,
}

impl RecordingInstance {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl BackendInstance for RecordingInstance {
    fn set_option(&mut self, config: &RenderConfig, not_merge: bool) -> Result<(), BackendError> {
        if self.is_disposed() {
            return Err(BackendError::Disposed);
        }
        let mut state = self.journal.state.borrow_mut();
        if not_merge {
            if let Some(error) = state.scripted_apply_failures.pop_front() {
                return Err(error);
            }
        }

        state.applies.push(AppliedOption {
            generation: self.generation,
            config: config.clone(),
            not_merge,
        });
        let current = state
            .options
            .entry(self.generation)
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if not_merge {
            *current = config.as_value().clone();
        } else {
            merge_value(current, config.as_value());
        }
        Ok(())
    }

    fn on(&mut self, event: &str, selector: &str, handler: BackendEventHandler) {
        if self.is_disposed() {
            return;
        }
        self.journal.state.borrow_mut().listeners.push(Listener {
            generation: self.generation,
            event: event.to_owned(),
            selector: selector.to_owned(),
            handler,
        });
    }

    fn resize(&mut self) -> Result<(), BackendError> {
        if self.is_disposed() {
            return Err(BackendError::Disposed);
        }
        self.journal
            .state
            .borrow_mut()
            .resizes
            .push(self.generation);
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        let mut state = self.journal.state.borrow_mut();
        state.disposes.push(self.generation);
        let generation = self.generation;
        state
            .listeners
            .retain(|listener| listener.generation != generation);
    }

    fn width(&self) -> f64 {
        self.journal.state.borrow().width
    }

    fn is_disposed(&self) -> bool {
        self.disposed || self.journal.is_externally_disposed(self.generation)
    }
}

fn merge_value(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (target, patch) => *target = patch.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::render::RendererKind;

    fn options() -> InitOptions {
        InitOptions {
            locale: "en".to_owned(),
            renderer: RendererKind::Canvas,
            device_pixel_ratio: 1.0,
            use_dirty_rect: false,
        }
    }

    #[test]
    fn merge_apply_keeps_prior_fields_and_full_apply_drops_them() {
        let mut backend = RecordingBackend::new(640.0);
        let journal = backend.journal();
        let mut instance = backend
            .init(&SurfaceHandle::new("s"), &Theme::default(), &options())
            .expect("init");

        instance
            .set_option(&RenderConfig::from_value(json!({"a": 1})), false)
            .expect("merge a");
        instance
            .set_option(&RenderConfig::from_value(json!({"b": 2})), false)
            .expect("merge b");
        assert_eq!(journal.current_option(), Some(json!({"a": 1, "b": 2})));

        instance
            .set_option(&RenderConfig::from_value(json!({"c": 3})), true)
            .expect("replace");
        assert_eq!(journal.current_option(), Some(json!({"c": 3})));
    }

    #[test]
    fn dispose_is_recorded_once_and_detaches_listeners() {
        let mut backend = RecordingBackend::new(640.0);
        let journal = backend.journal();
        let mut instance = backend
            .init(&SurfaceHandle::new("s"), &Theme::default(), &options())
            .expect("init");
        instance.on("click", "series", Box::new(|_| {}));
        assert_eq!(journal.listener_count(), 1);

        instance.dispose();
        instance.dispose();
        assert_eq!(journal.dispose_count(), 1);
        assert_eq!(journal.listener_count(), 0);
        assert_eq!(journal.emit("click", &json!({})), 0);
        assert_eq!(
            instance.set_option(&RenderConfig::empty(), true),
            Err(BackendError::Disposed)
        );
    }
}
