//! Bridge from an external lifecycle event source to a delegate
//!
//! The event source frequently outlives the thing it notifies. Holding the
//! delegate strongly from the bridge would keep the delegate reachable for
//! as long as the source is, so the bridge holds a [`Weak`] reference
//! instead and drops events once the delegate is gone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::lifecycle::{HostEvent, Lifecycle};

/// Adapts host lifecycle events into calls on a non-owned delegate.
///
/// Installed once at construction. There is no uninstall API: once every
/// strong reference to the delegate is dropped, further events resolve to
/// nothing and are discarded silently. Callers that need guaranteed
/// delivery after teardown cannot use this bridge; it is pure fan-out
/// notification.
pub struct LifecycleBridge {
    delegate: Weak<RefCell<dyn Lifecycle>>,
}

impl LifecycleBridge {
    /// Create a bridge targeting `delegate` without taking ownership of it
    pub fn new(delegate: Rc<RefCell<dyn Lifecycle>>) -> Self {
        Self {
            delegate: Rc::downgrade(&delegate),
        }
    }

    /// Whether the delegate is still alive.
    ///
    /// Deterministic: this flips to `false` the moment the last strong
    /// reference is dropped, not at some collector's convenience.
    pub fn is_attached(&self) -> bool {
        self.delegate.strong_count() > 0
    }

    /// Translate one host event into exactly one delegate hook call.
    ///
    /// Unrecognized events are ignored. Events arriving after the delegate
    /// has been reclaimed are dropped without error.
    pub fn dispatch(&self, event: &HostEvent) {
        let Some(delegate) = self.delegate.upgrade() else {
            trace!("delegate gone, dropping {:?}", event);
            return;
        };

        let mut delegate = delegate.borrow_mut();
        match event {
            HostEvent::Created => delegate.on_create(),
            HostEvent::Started => delegate.on_start(),
            HostEvent::Resumed => delegate.on_resume(),
            HostEvent::Paused => delegate.on_pause(),
            HostEvent::Stopped => delegate.on_stop(),
            HostEvent::Destroyed => delegate.on_destroy(),
            HostEvent::Other(name) => trace!("ignoring host event {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDelegate {
        calls: Vec<&'static str>,
    }

    impl Lifecycle for RecordingDelegate {
        fn on_create(&mut self) {
            self.calls.push("create");
        }

        fn on_start(&mut self) {
            self.calls.push("start");
        }

        fn on_resume(&mut self) {
            self.calls.push("resume");
        }

        fn on_pause(&mut self) {
            self.calls.push("pause");
        }

        fn on_stop(&mut self) {
            self.calls.push("stop");
        }

        fn on_destroy(&mut self) {
            self.calls.push("destroy");
        }
    }

    #[test]
    fn test_each_event_maps_to_one_hook() {
        let delegate = Rc::new(RefCell::new(RecordingDelegate::default()));
        let bridge = LifecycleBridge::new(delegate.clone());

        for event in [
            HostEvent::Created,
            HostEvent::Started,
            HostEvent::Resumed,
            HostEvent::Paused,
            HostEvent::Stopped,
            HostEvent::Destroyed,
        ] {
            bridge.dispatch(&event);
        }

        assert_eq!(
            delegate.borrow().calls,
            vec!["create", "start", "resume", "pause", "stop", "destroy"]
        );
    }

    #[test]
    fn test_unrecognized_event_is_ignored() {
        let delegate = Rc::new(RefCell::new(RecordingDelegate::default()));
        let bridge = LifecycleBridge::new(delegate.clone());

        bridge.dispatch(&HostEvent::Other("trim-memory".to_string()));
        assert!(delegate.borrow().calls.is_empty());
    }

    #[test]
    fn test_events_after_delegate_dropped_are_silent() {
        let delegate = Rc::new(RefCell::new(RecordingDelegate::default()));
        let bridge = LifecycleBridge::new(delegate.clone());
        assert!(bridge.is_attached());

        drop(delegate);
        assert!(!bridge.is_attached());

        // No call, no panic.
        bridge.dispatch(&HostEvent::Started);
        bridge.dispatch(&HostEvent::Destroyed);
    }

    #[test]
    fn test_bridge_does_not_keep_delegate_alive() {
        let delegate = Rc::new(RefCell::new(RecordingDelegate::default()));
        let _bridge = LifecycleBridge::new(delegate.clone());

        assert_eq!(Rc::strong_count(&delegate), 1);
    }
}
