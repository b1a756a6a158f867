//! Re-entrancy guard for report saves.
//!
//! A save in progress cannot be cancelled, so a double-click would
//! submit the same report twice. The guard keeps an in-flight marker
//! per save key (report id, or a client token for unsaved drafts) and
//! rejects a second save until the first releases it.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared set of in-flight save keys.
#[derive(Clone, Default)]
pub struct SaveGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl SaveGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim a save key. Returns `None` when a save for the same
    /// key is already in flight. The claim is released when the
    /// returned ticket drops.
    pub fn begin(&self, key: &str) -> Option<SaveTicket> {
        let mut in_flight = self.in_flight.lock().expect("save guard mutex poisoned");

        if !in_flight.insert(key.to_string()) {
            return None;
        }

        Some(SaveTicket {
            in_flight: Arc::clone(&self.in_flight),
            key: key.to_string(),
        })
    }
}

/// RAII claim on a save key.
pub struct SaveTicket {
    in_flight: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for SaveTicket {
    fn drop(&mut self) {
        if let Ok(mut in_flight) = self.in_flight.lock() {
            in_flight.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_save_for_same_key_rejected() {
        let guard = SaveGuard::new();

        let ticket = guard.begin("report-1");
        assert!(ticket.is_some());
        assert!(guard.begin("report-1").is_none());

        // A different key is unaffected
        assert!(guard.begin("report-2").is_some());
    }

    #[test]
    fn test_key_released_on_drop() {
        let guard = SaveGuard::new();

        {
            let _ticket = guard.begin("report-1").unwrap();
            assert!(guard.begin("report-1").is_none());
        }

        assert!(guard.begin("report-1").is_some());
    }

    #[test]
    fn test_guard_shared_across_clones() {
        let guard = SaveGuard::new();
        let other = guard.clone();

        let _ticket = guard.begin("report-1").unwrap();
        assert!(other.begin("report-1").is_none());
    }
}
