//! Terminal management module - raw mode, ANSI presenter, signal flags.

mod frame;
mod presenter;
mod raw_mode;
mod signals;

// Re-export public types from submodules
pub use frame::{CellColor, ColorGrid};
pub use presenter::{query_terminal_size, Presenter, FALLBACK_SIZE, HIDE_CURSOR, HOME, RESET, SHOW_CURSOR};
pub use raw_mode::RawModeGuard;
pub use signals::SignalFlags;
