//! Signal handling.
//!
//! Handlers only flip atomic flags. The frame loop polls them at the top of
//! every iteration and does the actual teardown or resize work itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shutdown and resize flags shared with the signal handlers.
#[derive(Debug, Clone, Default)]
pub struct SignalFlags {
    shutdown: Arc<AtomicBool>,
    resized: Arc<AtomicBool>,
}

impl SignalFlags {
    /// Flags with no handlers attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach SIGINT/SIGTERM (shutdown) and, on unix, SIGWINCH (resize).
    ///
    /// May only be called once per process.
    pub fn install() -> Result<Self, crate::error::AppError> {
        let flags = Self::new();

        let shutdown = Arc::clone(&flags.shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::SeqCst);
        })?;

        #[cfg(unix)]
        {
            signal_hook::flag::register(signal_hook::consts::SIGWINCH, Arc::clone(&flags.resized))?;
        }

        Ok(flags)
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Returns whether a resize happened since the last call, clearing the flag.
    pub fn take_resize(&self) -> bool {
        self.resized.swap(false, Ordering::SeqCst)
    }

    pub fn notify_resize(&self) {
        self.resized.store(true, Ordering::SeqCst);
    }
}
