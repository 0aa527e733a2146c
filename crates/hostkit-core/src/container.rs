//! Component container: ordered lifecycle fan-out

use std::rc::Rc;

use tracing::{debug, warn};

use crate::component::{Component, SharedComponent};
use crate::lifecycle::Lifecycle;

/// Ownership and membership surface of a component container.
///
/// Extends [`Lifecycle`] so a container can stand in wherever a lifecycle
/// delegate is expected, with each phase fanning out to its components.
pub trait Container: Lifecycle {
    /// The components currently owned by this container, in fan-out order.
    fn components(&self) -> &[SharedComponent];

    /// Add a component and deliver its `on_create` hook.
    fn add_component(&mut self, component: SharedComponent);

    /// Remove a component without delivering any hook.
    fn remove_component(&mut self, component: &SharedComponent);
}

/// Owns an ordered collection of components and fans every lifecycle phase
/// out to them.
///
/// Fan-out order is deterministic and equals insertion order, for every
/// phase. Hooks run synchronously on the calling thread; a hook that
/// re-enters the same container mid-fan-out is a caller bug (with the
/// `RefCell`-based sharing used here it panics on the second borrow rather
/// than corrupting the ordering).
#[derive(Default)]
pub struct ComponentContainer {
    components: Vec<SharedComponent>,
}

impl ComponentContainer {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of components currently attached
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if the container has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Deliver the soft-refresh hook to every component, in order.
    ///
    /// Independent of the create/destroy cycle; components that did not
    /// override [`Component::reload`] ignore it.
    pub fn reload(&mut self) {
        self.fan_out("reload", |component| component.reload());
    }

    fn fan_out<F>(&self, phase: &str, mut hook: F)
    where
        F: FnMut(&mut dyn Component),
    {
        for component in &self.components {
            let mut component = component.borrow_mut();
            debug!("{} -> {}", phase, component.name());
            hook(&mut *component);
        }
    }
}

impl Lifecycle for ComponentContainer {
    fn on_create(&mut self) {
        self.fan_out("on_create", |component| component.on_create());
    }

    fn on_start(&mut self) {
        self.fan_out("on_start", |component| component.on_start());
    }

    fn on_resume(&mut self) {
        self.fan_out("on_resume", |component| component.on_resume());
    }

    fn on_pause(&mut self) {
        self.fan_out("on_pause", |component| component.on_pause());
    }

    fn on_stop(&mut self) {
        self.fan_out("on_stop", |component| component.on_stop());
    }

    /// Fans out `on_destroy` then clears the list, so a second call finds
    /// nothing to notify and is a no-op by construction.
    fn on_destroy(&mut self) {
        self.fan_out("on_destroy", |component| component.on_destroy());
        self.components.clear();
    }
}

impl Container for ComponentContainer {
    fn components(&self) -> &[SharedComponent] {
        &self.components
    }

    /// Appends `component` and immediately delivers only its `on_create`.
    ///
    /// Phases the container already passed through are NOT replayed: a
    /// component added while the container is resumed sees `on_create` now
    /// and `on_start`/`on_resume` only when the container naturally reaches
    /// those phases again. Late joiners that need the current state must
    /// catch up on their own.
    ///
    /// A component already present (same allocation) is left where it is
    /// and receives no second `on_create`.
    fn add_component(&mut self, component: SharedComponent) {
        if self.components.iter().any(|existing| Rc::ptr_eq(existing, &component)) {
            warn!("component {} already attached, ignoring", component.borrow().name());
            return;
        }
        self.components.push(component.clone());
        component.borrow_mut().on_create();
    }

    /// Removes `component` by identity without delivering any hook.
    /// Whatever cleanup the component needs is the caller's responsibility
    /// before removal.
    fn remove_component(&mut self, component: &SharedComponent) {
        self.components
            .retain(|existing| !Rc::ptr_eq(existing, component));
    }
}
