//! Container owner: glues a factory and a container to the host lifecycle

use tracing::debug;

use crate::container::{ComponentContainer, Container};
use crate::factory::ComponentFactory;
use crate::lifecycle::Lifecycle;

/// Owns a container and a factory and drives both from the host lifecycle.
///
/// On create it asks the factory for the component set and adopts it into
/// the container; on destroy it runs both teardown paths, the container's
/// per-component hooks and the factory's registry release. Wrap it in
/// `Rc<RefCell<_>>` and hand it to a [`LifecycleBridge`] to connect it to
/// the host.
///
/// [`LifecycleBridge`]: crate::bridge::LifecycleBridge
pub struct HostDelegate {
    container: ComponentContainer,
    factory: Box<dyn ComponentFactory>,
}

impl HostDelegate {
    /// Create a delegate around `factory` with an empty container
    pub fn new(factory: Box<dyn ComponentFactory>) -> Self {
        Self {
            container: ComponentContainer::new(),
            factory,
        }
    }

    /// The owned container
    pub fn container(&self) -> &ComponentContainer {
        &self.container
    }

    /// Mutable access to the owned container, for membership changes after
    /// creation
    pub fn container_mut(&mut self) -> &mut ComponentContainer {
        &mut self.container
    }

    /// Soft-refresh every component
    pub fn reload(&mut self) {
        self.container.reload();
    }
}

impl Lifecycle for HostDelegate {
    fn on_create(&mut self) {
        self.container.on_create();
        self.factory.new_components();
        for component in self.factory.components() {
            self.container.add_component(component.clone());
        }
        debug!("adopted {} component(s)", self.container.len());
    }

    fn on_start(&mut self) {
        self.container.on_start();
    }

    fn on_resume(&mut self) {
        self.container.on_resume();
    }

    fn on_pause(&mut self) {
        self.container.on_pause();
    }

    fn on_stop(&mut self) {
        self.container.on_stop();
    }

    fn on_destroy(&mut self) {
        self.container.on_destroy();
        self.factory.release();
    }
}
