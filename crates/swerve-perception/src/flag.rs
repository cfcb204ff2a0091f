//! The shared obstacle flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Boolean obstacle state shared between the perception sampler and the
/// motion-policy ticker.
///
/// Ownership contract: the sampler is the only writer ([`set`][Self::set]);
/// the ticker only reads ([`get`][Self::get]).  The two run on independent
/// tasks triggered by independent event sources, so the cell uses
/// Release/Acquire ordering instead of assuming single-threaded dispatch.
///
/// Clones share the same underlying cell.  Initialized clear (`false`);
/// overwritten on every valid sweep; lives until the process exits.
#[derive(Clone, Debug, Default)]
pub struct ObstacleFlag {
    blocked: Arc<AtomicBool>,
}

impl ObstacleFlag {
    /// Create a flag initialized to clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the flag.  Sampler-side only.
    pub fn set(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::Release);
    }

    /// Read the flag at this instant.  Ticker-side only.
    pub fn get(&self) -> bool {
        self.blocked.load(Ordering::Acquire)
    }
}
