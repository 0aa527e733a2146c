//! Instance-state save/restore
//!
//! Hosts that can be torn down and recreated (the recreate happening in the
//! same process) may carry a [`StateBag`] across the gap. The bag is a
//! plain value; nothing here persists across process restarts.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{HostkitError, HostkitResult};

/// String-keyed bag of serializable values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateBag {
    values: HashMap<String, serde_json::Value>,
}

impl StateBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, replacing any prior value.
    ///
    /// Fails only if the value cannot be serialized, which is a programmer
    /// error in the stored type.
    pub fn put<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> HostkitResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| HostkitError::state(e.to_string()))?;
        self.values.insert(key.into(), value);
        Ok(())
    }

    /// Fetch the value stored under `key`, if any deserializes as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
    }

    /// Drop the value stored under `key`
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Check whether `key` holds a value
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the bag holds nothing
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Save/restore hooks for anything that wants its state carried across a
/// destroy/recreate cycle.
///
/// Opt-in and orthogonal to [`Lifecycle`]: the container does not fan these
/// out. The host (or its delegate) decides who participates and when the
/// hooks run relative to the phase transitions.
///
/// [`Lifecycle`]: crate::lifecycle::Lifecycle
pub trait StateHandle {
    /// Write whatever should survive recreation into `out`
    fn on_save_state(&mut self, out: &mut StateBag);

    /// Recover previously saved state; `None` on a fresh start
    fn on_restore_state(&mut self, saved: Option<&StateBag>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_replaces_and_types() {
        let mut bag = StateBag::new();
        bag.put("count", &3u32).unwrap();
        bag.put("label", &"draft".to_string()).unwrap();
        bag.put("count", &7u32).unwrap();

        assert_eq!(bag.get::<u32>("count"), Some(7));
        assert_eq!(bag.get::<String>("label").as_deref(), Some("draft"));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn test_missing_or_mismatched_is_absent() {
        let mut bag = StateBag::new();
        bag.put("label", &"draft".to_string()).unwrap();

        assert_eq!(bag.get::<u32>("missing"), None);
        assert_eq!(bag.get::<u32>("label"), None);
        assert!(!bag.contains("missing"));
    }

    #[test]
    fn test_handle_round_trip() {
        struct Counter {
            count: u32,
        }

        impl StateHandle for Counter {
            fn on_save_state(&mut self, out: &mut StateBag) {
                let _ = out.put("count", &self.count);
            }

            fn on_restore_state(&mut self, saved: Option<&StateBag>) {
                if let Some(saved) = saved {
                    self.count = saved.get("count").unwrap_or(0);
                }
            }
        }

        let mut bag = StateBag::new();
        let mut first = Counter { count: 5 };
        first.on_save_state(&mut bag);

        let mut second = Counter { count: 0 };
        second.on_restore_state(Some(&bag));
        assert_eq!(second.count, 5);

        let mut fresh = Counter { count: 1 };
        fresh.on_restore_state(None);
        assert_eq!(fresh.count, 1);
    }
}
