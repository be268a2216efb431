//! Cooperative shutdown coordination.
//! The ctrlc handler sets the flag; copy workers check it before starting a file
//! so queued work is dropped while in-flight copies finish.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - The flag is a cloneable handle owned by the entry point, not a global, so
//!   tests can drive interruption without touching other tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cooperative shutdown (idempotent, safe from a signal handler thread).
    #[inline]
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
