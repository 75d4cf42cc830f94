//! Loading-indicator tracking with guaranteed release.
//!
//! A [`LoadGuard`] is held for the full duration of a tracked asynchronous
//! operation; its `Drop` impl decrements the pending counter on every exit
//! path, so the indicator can never be left showing after an operation
//! settles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts pending tracked operations
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    pending: Arc<AtomicUsize>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a tracked operation; the returned guard releases on drop
    pub fn start(&self) -> LoadGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        LoadGuard { pending: Arc::clone(&self.pending) }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}

/// Scoped handle for one pending operation
#[derive(Debug)]
pub struct LoadGuard {
    pending: Arc<AtomicUsize>,
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}
