//! Cooperative cancellation.
//!
//! Long-running phases (spanning tree edge scan, blossom stages, GA
//! generations) poll a [`CancelFlag`] between discrete steps. A step that has
//! started always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{TspError, TspResult};

/// A shared flag that asks a running engine to stop.
///
/// Clones share the same underlying flag, so one clone can be handed to the
/// engine and another kept by the caller (or another thread).
///
/// # Examples
///
/// ```
/// use u_tsp::cancel::CancelFlag;
///
/// let flag = CancelFlag::new();
/// let handle = flag.clone();
/// assert!(!flag.is_cancelled());
/// handle.cancel();
/// assert!(flag.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a flag in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(TspError::Cancelled(phase))` if cancellation was requested.
    pub fn check(&self, phase: &'static str) -> TspResult<()> {
        if self.is_cancelled() {
            return Err(TspError::Cancelled(phase));
        }
        Ok(())
    }
}
