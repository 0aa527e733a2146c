//! Service capability and the holder-scoped service registry
//!
//! A component becomes discoverable by also implementing [`Service`].
//! Sibling components then locate it through a [`ServiceRegistry`] keyed by
//! the owning holder's identity and the service's concrete type, without
//! holding direct references to one another.

mod registry;

pub use registry::{ServiceRegistry, SharedRegistry};

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::component::Component;

/// Marker capability a component may additionally satisfy to become
/// discoverable through the registry.
///
/// `as_any` is the downcast hook: it lets a caller holding a
/// [`SharedService`] recover the concrete type, and lets the registry key
/// entries by the implementor's runtime type.
pub trait Service: Component {
    /// Cast to `Any` for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a type-erased service
pub type SharedService = Rc<RefCell<dyn Service>>;

/// Type token identifying a service's concrete registered type.
///
/// Captured from the type parameter at registration. Identity is the
/// `TypeId`; the type name rides along for logs only. Callers must build
/// the key from the concrete registered type: the key of an abstraction the
/// service also satisfies is a different key and will not match.
#[derive(Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// The key under which `S` registers
    pub fn of<S: Service + 'static>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: std::any::type_name::<S>(),
        }
    }

    /// Human-readable name of the keyed type
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ServiceKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl Hash for ServiceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceKey({})", self.name)
    }
}

/// Simple service implementation for testing
#[cfg(test)]
pub(crate) struct ProbeService {
    pub(crate) value: u32,
}

#[cfg(test)]
impl ProbeService {
    pub(crate) fn shared(value: u32) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { value }))
    }
}

#[cfg(test)]
impl crate::lifecycle::Lifecycle for ProbeService {}

#[cfg(test)]
impl Component for ProbeService {
    fn name(&self) -> &str {
        "probe-service"
    }
}

#[cfg(test)]
impl Service for ProbeService {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
