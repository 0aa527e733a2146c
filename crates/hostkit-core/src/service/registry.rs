//! Holder-scoped service registry

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use super::{Service, ServiceKey, SharedService};
use crate::component::HolderId;

/// One registered service: the type-erased handle plus the concrete cell
/// kept as `Any` so the typed lookup can downcast without unsafe code.
struct ServiceEntry {
    service: SharedService,
    concrete: Rc<dyn Any>,
}

/// Registry mapping (holder identity, service type) to service instances.
///
/// The outer key partitions the registry into disjoint, independently
/// releasable scopes, one per live host instance. Partitions are created
/// lazily on first registration and removed in one step by
/// [`release_holder`]; a service is reachable here only between its
/// registration and its explicit removal.
///
/// This is an explicitly constructed, explicitly scoped value, not an
/// ambient singleton: each host (and each test) builds its own and hands a
/// [`SharedRegistry`] to the factory and to lookup call sites. Access is
/// single-threaded by convention; using one registry from several threads
/// needs discipline this type does not provide.
///
/// [`release_holder`]: ServiceRegistry::release_holder
#[derive(Default)]
pub struct ServiceRegistry {
    holders: HashMap<HolderId, HashMap<ServiceKey, ServiceEntry>>,
}

/// Shared handle to a registry, as passed to factories and lookup sites
pub type SharedRegistry = Rc<RefCell<ServiceRegistry>>;

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap this registry in the shared handle factories expect
    pub fn into_shared(self) -> SharedRegistry {
        Rc::new(RefCell::new(self))
    }

    /// Register `service` for `holder_id` under its concrete type.
    ///
    /// Creates the holder partition if absent. Re-registering the same type
    /// under the same holder silently replaces the prior instance (last
    /// write wins); the replaced instance is returned so the caller may
    /// dispose of it.
    pub fn register<S>(&mut self, holder_id: &HolderId, service: Rc<RefCell<S>>) -> Option<SharedService>
    where
        S: Service + 'static,
    {
        let key = ServiceKey::of::<S>();
        debug!("registering {:?} for holder {}", key, holder_id);

        let type_erased: SharedService = service.clone();
        let concrete: Rc<dyn Any> = service;
        let entry = ServiceEntry {
            service: type_erased,
            concrete,
        };
        self.holders
            .entry(holder_id.clone())
            .or_default()
            .insert(key, entry)
            .map(|replaced| replaced.service)
    }

    /// Remove the entry registered for `holder_id` under type `S`.
    ///
    /// Returns the removed instance, or `None` if nothing was registered
    /// under that key. Unregistering something never registered is not an
    /// error.
    pub fn unregister<S>(&mut self, holder_id: &HolderId) -> Option<Rc<RefCell<S>>>
    where
        S: Service + 'static,
    {
        let key = ServiceKey::of::<S>();
        let entry = self.holders.get_mut(holder_id)?.remove(&key)?;
        debug!("unregistered {:?} for holder {}", key, holder_id);
        entry.concrete.downcast::<RefCell<S>>().ok()
    }

    /// Look up the service registered for `holder_id` under `key`.
    ///
    /// Absence is an expected result, never an error.
    pub fn lookup_key(&self, holder_id: &HolderId, key: ServiceKey) -> Option<SharedService> {
        self.holders
            .get(holder_id)?
            .get(&key)
            .map(|entry| entry.service.clone())
    }

    /// Typed lookup, resolving by `S`'s own type.
    ///
    /// `S` must be the concrete registered type. Requesting an abstraction
    /// the instance also satisfies resolves a different key and returns
    /// `None` even though a satisfying instance exists.
    pub fn lookup<S>(&self, holder_id: &HolderId) -> Option<Rc<RefCell<S>>>
    where
        S: Service + 'static,
    {
        let entry = self.holders.get(holder_id)?.get(&ServiceKey::of::<S>())?;
        entry.concrete.clone().downcast::<RefCell<S>>().ok()
    }

    /// Drop the whole partition for `holder_id` in one step.
    ///
    /// Intended to run exactly once per holder teardown, so the registry
    /// never retains instances belonging to a destroyed holder. Returns how
    /// many entries were released.
    pub fn release_holder(&mut self, holder_id: &HolderId) -> usize {
        match self.holders.remove(holder_id) {
            Some(services) => {
                debug!("released {} service(s) for holder {}", services.len(), holder_id);
                services.len()
            }
            None => 0,
        }
    }

    /// Clear every partition for every holder.
    ///
    /// A blunt instrument that ignores holder boundaries. Do not use it for
    /// per-holder teardown; that is what [`release_holder`] is for.
    ///
    /// [`release_holder`]: ServiceRegistry::release_holder
    pub fn release_all(&mut self) {
        warn!("releasing services for all holders");
        self.holders.clear();
    }

    /// Number of services registered for `holder_id`
    pub fn holder_len(&self, holder_id: &HolderId) -> usize {
        self.holders.get(holder_id).map_or(0, HashMap::len)
    }

    /// Total number of registered services across all holders
    pub fn len(&self) -> usize {
        self.holders.values().map(HashMap::len).sum()
    }

    /// Check if no services are registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::lifecycle::Lifecycle;
    use crate::service::ProbeService;

    struct OtherService;

    impl Lifecycle for OtherService {}

    impl Component for OtherService {
        fn name(&self) -> &str {
            "other-service"
        }
    }

    impl Service for OtherService {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn holder(id: &str) -> HolderId {
        HolderId::from(id)
    }

    #[test]
    fn test_register_and_typed_lookup() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");

        registry.register(&h1, ProbeService::shared(1));

        let found = registry.lookup::<ProbeService>(&h1).unwrap();
        assert_eq!(found.borrow().value, 1);
        assert_eq!(registry.holder_len(&h1), 1);
    }

    #[test]
    fn test_lookup_by_key() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");
        registry.register(&h1, ProbeService::shared(3));

        let found = registry
            .lookup_key(&h1, ServiceKey::of::<ProbeService>())
            .unwrap();
        let found = found.borrow();
        let concrete = found.as_any().downcast_ref::<ProbeService>().unwrap();
        assert_eq!(concrete.value, 3);

        assert!(registry
            .lookup_key(&h1, ServiceKey::of::<OtherService>())
            .is_none());
    }

    #[test]
    fn test_holders_are_isolated() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");
        let h2 = holder("h2");

        registry.register(&h1, ProbeService::shared(1));

        assert!(registry.lookup::<ProbeService>(&h2).is_none());
        assert_eq!(registry.holder_len(&h2), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");

        assert!(registry.register(&h1, ProbeService::shared(1)).is_none());

        let replaced = registry.register(&h1, ProbeService::shared(2)).unwrap();
        let replaced = replaced.borrow();
        let replaced = replaced.as_any().downcast_ref::<ProbeService>().unwrap();
        assert_eq!(replaced.value, 1);

        let found = registry.lookup::<ProbeService>(&h1).unwrap();
        assert_eq!(found.borrow().value, 2);
        assert_eq!(registry.holder_len(&h1), 1);
    }

    #[test]
    fn test_unregister_returns_removed_or_none() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");
        registry.register(&h1, ProbeService::shared(5));

        let removed = registry.unregister::<ProbeService>(&h1).unwrap();
        assert_eq!(removed.borrow().value, 5);

        assert!(registry.unregister::<ProbeService>(&h1).is_none());
        assert!(registry.lookup::<ProbeService>(&h1).is_none());
    }

    #[test]
    fn test_release_holder_leaves_other_holders_untouched() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");
        let h2 = holder("h2");
        registry.register(&h1, ProbeService::shared(1));
        registry.register(&h1, Rc::new(RefCell::new(OtherService)));
        registry.register(&h2, ProbeService::shared(2));

        assert_eq!(registry.release_holder(&h1), 2);
        assert!(registry.lookup::<ProbeService>(&h1).is_none());
        assert!(registry.lookup::<OtherService>(&h1).is_none());

        let survivor = registry.lookup::<ProbeService>(&h2).unwrap();
        assert_eq!(survivor.borrow().value, 2);

        // Releasing an unknown holder is harmless.
        assert_eq!(registry.release_holder(&holder("h3")), 0);
    }

    #[test]
    fn test_release_all_ignores_holder_boundaries() {
        let mut registry = ServiceRegistry::new();
        registry.register(&holder("h1"), ProbeService::shared(1));
        registry.register(&holder("h2"), ProbeService::shared(2));
        assert_eq!(registry.len(), 2);

        registry.release_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_concrete_type_is_the_key() {
        let mut registry = ServiceRegistry::new();
        let h1 = holder("h1");
        registry.register(&h1, ProbeService::shared(1));

        // A different concrete type resolves a different key, even though
        // both types satisfy Service.
        assert!(registry.lookup::<OtherService>(&h1).is_none());
    }
}
