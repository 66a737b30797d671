//! Externally owned pause flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared pause switch. The host sets it; the engine reads it once per tick.
#[derive(Debug, Clone, Default)]
pub struct PauseFlag(Arc<AtomicBool>);

impl PauseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.0.store(paused, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let host = PauseFlag::new();
        let engine_side = host.clone();
        assert!(!engine_side.is_paused());
        host.set_paused(true);
        assert!(engine_side.is_paused());
        host.set_paused(false);
        assert!(!engine_side.is_paused());
    }
}
