//! Shared connectivity flag.
//!
//! A single bit of truth about the backend, updated by whichever fetch
//! ran last. UI surfaces read it to decide whether to show the offline
//! badge; it carries no history and no retry policy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the last-known server reachability.
///
/// Starts online; the first failed network attempt flips it off, the
/// first successful one flips it back on.
#[derive(Debug, Clone)]
pub struct ServerStatus {
    online: Arc<AtomicBool>,
}

impl ServerStatus {
    pub fn new() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn mark_online(&self) {
        self.online.store(true, Ordering::Relaxed);
    }

    pub fn mark_offline(&self) {
        self.online.store(false, Ordering::Relaxed);
    }
}

impl Default for ServerStatus {
    fn default() -> Self {
        Self::new()
    }
}
