//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

use super::enums::LogLevel;
use crate::error::AppError;
use crate::mode::Mode;

/// Terminal image viewer with a mode-7 perspective view
#[derive(Parser, Debug)]
#[command(name = "affine")]
#[command(version, about = "An image viewer for the terminal", long_about = None)]
#[command(after_help = "KEYS:
    q              Quit
    arrow keys     Pan
    + / -          Zoom in / out (view mode)
    w / s          Accelerate / decelerate (affine mode)
    a / d          Turn left / right
    c / e          Tilt up / down
    r / v          Raise / lower the camera")]
pub struct Args {
    /// Image file to display
    pub image: Option<PathBuf>,

    /// Display mode: view (default) or affine, matched by first letter
    pub mode: Option<String>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// First row painted by the perspective projection (overrides config)
    #[arg(long)]
    pub horizon: Option<u32>,

    /// Write log records to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Minimum level written to the log file
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// The selected display mode. Defaults to view mode.
    pub fn mode(&self) -> Result<Mode, AppError> {
        match self.mode.as_deref() {
            None => Ok(Mode::View),
            Some(arg) => Mode::from_arg(arg).ok_or_else(|| AppError::UnknownMode(arg.to_string())),
        }
    }
}
