//! affine-view library crate.
//!
//! A terminal image viewer with a flat pan/zoom view and a mode-7 style
//! perspective projection. The modules are exposed for integration testing.

pub mod camera;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod image_source;
pub mod input;
pub mod logging;
pub mod mode;
pub mod projection;
pub mod session;
pub mod terminal;
pub mod view;
