//! Ctrl-C handling for a running capture

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Flag raised when the user interrupts a recording.
///
/// The capture loop polls it between frames so the file is finalized
/// instead of left with an unpatched header.
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the shutdown flag
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Start listening for Ctrl-C. Must be called inside a tokio runtime.
    pub fn setup(&self) {
        let shutdown = Arc::clone(&self.shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt received, stopping capture");
                shutdown.store(true, Ordering::SeqCst);
            }
        });
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_is_shared() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
        signal.flag().store(true, Ordering::SeqCst);
        assert!(signal.is_shutdown());
    }

    #[tokio::test]
    async fn setup_does_not_trip_the_flag() {
        let signal = ShutdownSignal::new();
        signal.setup();
        tokio::task::yield_now().await;
        assert!(!signal.is_shutdown());
    }
}
