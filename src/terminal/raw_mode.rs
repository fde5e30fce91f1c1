//! Raw terminal mode management with panic-safe cleanup.

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use super::presenter::{HOME, RESET, SHOW_CURSOR};

/// Static flag to track if raw mode is active (for panic handler)
pub(crate) static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Guard that ensures terminal is restored to normal mode on drop.
/// This handles both normal exits and panics.
pub struct RawModeGuard {
    /// Whether this guard is responsible for cleanup
    active: bool,
}

impl RawModeGuard {
    /// Enter raw mode and return a guard that will restore it on drop.
    ///
    /// # Errors
    /// Returns an error if stdin is not a terminal or enabling raw mode fails
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        RAW_MODE_ACTIVE.store(true, Ordering::SeqCst);
        log::debug!("Entered raw mode");

        Ok(Self { active: true })
    }

    /// Manually exit raw mode without dropping the guard.
    /// Safe to call more than once; later calls are no-ops.
    pub fn exit(&mut self) -> io::Result<()> {
        if self.active {
            self.active = false;
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            disable_raw_mode()?;
            log::debug!("Left raw mode");
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            // Best-effort cleanup - ignore errors during drop
            let _ = disable_raw_mode();
        }
    }
}

/// Install a panic hook that restores terminal state before panicking.
pub(crate) fn install_panic_hook() {
    static HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

    if HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        if RAW_MODE_ACTIVE.swap(false, Ordering::SeqCst) {
            let _ = disable_raw_mode();
            let mut stdout = io::stdout();
            let _ = write!(stdout, "{}{}{}", RESET, HOME, SHOW_CURSOR);
            let _ = stdout.flush();
        }

        original_hook(panic_info);
    }));
}
