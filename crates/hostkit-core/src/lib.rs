//! Hostkit Core Library
//!
//! This crate provides the core functionality for composing decoupled
//! components inside a host with a create/start/resume/pause/stop/destroy
//! lifecycle: the component abstraction, the fan-out container, the
//! holder-scoped service registry, and the leak-safe bridge that forwards
//! host lifecycle events into the system.
//!
//! Everything here is single-threaded and callback-driven: components are
//! shared through `Rc<RefCell<_>>`, transitions run synchronously on the
//! thread that drives the bridge, and no background work is spawned.

pub mod bridge;
pub mod component;
pub mod container;
pub mod delegate;
pub mod error;
pub mod factory;
pub mod lifecycle;
pub mod service;
pub mod state;

// Re-export commonly used types
pub use bridge::LifecycleBridge;
pub use component::{Component, HolderId, HostContext, SharedComponent};
pub use container::{ComponentContainer, Container};
pub use delegate::HostDelegate;
pub use error::{HostkitError, HostkitResult};
pub use factory::ComponentFactory;
pub use lifecycle::{HostEvent, Lifecycle};
pub use service::{Service, ServiceKey, ServiceRegistry, SharedRegistry, SharedService};
pub use state::{StateBag, StateHandle};
