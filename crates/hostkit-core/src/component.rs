//! Component abstraction, holder identity, and the opaque hosting context

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{HostkitError, HostkitResult};
use crate::lifecycle::Lifecycle;

/// A lifecycle-aware unit composed into a container.
///
/// Components receive the six [`Lifecycle`] hooks from their container, in
/// the order they were added. The association to the hosting context is
/// one-directional: a component may hold a [`HostContext`] handle, but the
/// host never owns a component back; ownership lives in the container (and
/// in the service registry for service-capable components).
pub trait Component: Lifecycle {
    /// Short stable name used in logs.
    fn name(&self) -> &str;

    /// Optional soft-refresh hook, independent of the create/destroy cycle.
    ///
    /// Defaults to a no-op. Delivered by [`ComponentContainer::reload`],
    /// never by the phase fan-out.
    ///
    /// [`ComponentContainer::reload`]: crate::container::ComponentContainer::reload
    fn reload(&mut self) {}
}

/// Shared handle to a component.
///
/// The container and the service registry share ownership of the same
/// instances, and hooks take `&mut self`, so components live behind
/// `Rc<RefCell<_>>`.
pub type SharedComponent = Rc<RefCell<dyn Component>>;

/// Identity of one live host instance.
///
/// Supplied by the host, never generated here. Two concurrently alive
/// holders must never share an identity; the service registry partitions on
/// this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(String);

impl HolderId {
    /// Create a holder identity from a host-supplied string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HolderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for HolderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque handle to the hosting environment.
///
/// Carries the host's [`HolderId`] plus whatever capabilities the host
/// chose to expose, keyed by type. The core never inspects the
/// capabilities; components fetch them by type when they need them.
///
/// Cloning is cheap and every clone refers to the same capability set.
#[derive(Clone)]
pub struct HostContext {
    holder_id: HolderId,
    capabilities: HashMap<TypeId, Rc<dyn Any>>,
}

impl HostContext {
    /// Create a context for one host instance
    pub fn new(holder_id: impl Into<HolderId>) -> Self {
        Self {
            holder_id: holder_id.into(),
            capabilities: HashMap::new(),
        }
    }

    /// Expose a capability on this context
    pub fn with<T: Any>(mut self, capability: T) -> Self {
        self.capabilities.insert(TypeId::of::<T>(), Rc::new(capability));
        self
    }

    /// Expose an already-shared capability on this context
    pub fn with_shared<T: Any>(mut self, capability: Rc<T>) -> Self {
        self.capabilities.insert(TypeId::of::<T>(), capability);
        self
    }

    /// The identity of the host instance this context belongs to
    pub fn holder_id(&self) -> &HolderId {
        &self.holder_id
    }

    /// Fetch a capability the host is required to provide.
    ///
    /// A missing capability is a contract violation, not an expected
    /// condition, and surfaces immediately as
    /// [`HostkitError::MissingCapability`].
    pub fn capability<T: Any>(&self) -> HostkitResult<Rc<T>> {
        self.try_capability::<T>()
            .ok_or_else(|| HostkitError::missing_capability(std::any::type_name::<T>()))
    }

    /// Probe for an optional capability
    pub fn try_capability<T: Any>(&self) -> Option<Rc<T>> {
        self.capabilities
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|capability| capability.downcast::<T>().ok())
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("holder_id", &self.holder_id)
            .field("capabilities", &self.capabilities.len())
            .finish()
    }
}

/// Simple recording component implementation for testing
#[cfg(test)]
pub(crate) struct ProbeComponent {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

#[cfg(test)]
impl ProbeComponent {
    pub(crate) fn new(name: &'static str, log: Rc<RefCell<Vec<String>>>) -> Self {
        Self { name, log }
    }

    pub(crate) fn shared(name: &'static str, log: Rc<RefCell<Vec<String>>>) -> SharedComponent {
        Rc::new(RefCell::new(Self::new(name, log)))
    }

    fn record(&self, phase: &str) {
        self.log.borrow_mut().push(format!("{}:{}", self.name, phase));
    }
}

#[cfg(test)]
impl Lifecycle for ProbeComponent {
    fn on_create(&mut self) {
        self.record("create");
    }

    fn on_start(&mut self) {
        self.record("start");
    }

    fn on_resume(&mut self) {
        self.record("resume");
    }

    fn on_pause(&mut self) {
        self.record("pause");
    }

    fn on_stop(&mut self) {
        self.record("stop");
    }

    fn on_destroy(&mut self) {
        self.record("destroy");
    }
}

#[cfg(test)]
impl Component for ProbeComponent {
    fn name(&self) -> &str {
        self.name
    }

    fn reload(&mut self) {
        self.record("reload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Clipboard {
        contents: String,
    }

    #[test]
    fn test_holder_id_round_trip() {
        let id = HolderId::from("main-1");
        assert_eq!(id.as_str(), "main-1");
        assert_eq!(id.to_string(), "main-1");
        assert_eq!(id, HolderId::new(String::from("main-1")));
        assert_ne!(id, HolderId::from("main-2"));
    }

    #[test]
    fn test_context_capability_present() {
        let ctx = HostContext::new("main-1").with(Clipboard {
            contents: "hello".to_string(),
        });

        let clipboard = ctx.capability::<Clipboard>().unwrap();
        assert_eq!(clipboard.contents, "hello");
        assert_eq!(ctx.holder_id().as_str(), "main-1");
    }

    #[test]
    fn test_context_capability_missing_is_contract_violation() {
        let ctx = HostContext::new("main-1");

        assert!(ctx.try_capability::<Clipboard>().is_none());
        let err = ctx.capability::<Clipboard>().unwrap_err();
        assert!(matches!(err, HostkitError::MissingCapability(_)));
        assert!(err.to_string().contains("Clipboard"));
    }

    #[test]
    fn test_context_clones_share_capabilities() {
        let ctx = HostContext::new("main-1").with_shared(Rc::new(Clipboard {
            contents: "shared".to_string(),
        }));
        let cloned = ctx.clone();

        let a = ctx.capability::<Clipboard>().unwrap();
        let b = cloned.capability::<Clipboard>().unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }
}
