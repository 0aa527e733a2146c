//! The six-phase lifecycle contract and the host event set

use serde::{Deserialize, Serialize};

/// The six-phase lifecycle contract shared by components, containers, and
/// container owners.
///
/// Every hook defaults to a no-op so implementors only override the phases
/// they care about. Hooks are notifications, not fallible operations: they
/// return nothing, and the caller guarantees the ordering (`on_create`
/// exactly once before anything else, `on_destroy` exactly once after which
/// no further hooks are delivered).
pub trait Lifecycle {
    /// Called once when the host is first created.
    fn on_create(&mut self) {}

    /// Called when the host is about to become active.
    fn on_start(&mut self) {}

    /// Called when the host has become active and is in the foreground.
    fn on_resume(&mut self) {}

    /// Called when the host is leaving the foreground.
    fn on_pause(&mut self) {}

    /// Called when the host is no longer active.
    fn on_stop(&mut self) {}

    /// Called once before the host goes away for good.
    fn on_destroy(&mut self) {}
}

/// A lifecycle event emitted by the external host.
///
/// The six named variants map one-to-one onto the [`Lifecycle`] hooks.
/// Hosts may emit event names outside that set; they travel as
/// [`HostEvent::Other`] and the bridge ignores them without error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    /// Host reached its create phase
    Created,

    /// Host reached its start phase
    Started,

    /// Host reached its resume phase
    Resumed,

    /// Host reached its pause phase
    Paused,

    /// Host reached its stop phase
    Stopped,

    /// Host reached its destroy phase
    Destroyed,

    /// Any other event name the host emits; ignored by this subsystem
    Other(String),
}
