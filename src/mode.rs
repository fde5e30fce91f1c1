//! Display mode selection.

use std::fmt;

/// How the image is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Pannable, zoomable direct view of the image.
    #[default]
    View,
    /// Perspective ground-plane projection driven by a moving camera.
    Affine,
}

impl Mode {
    /// Parse a mode argument by its first character (`v...` or `a...`).
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.chars().next()? {
            'v' => Some(Mode::View),
            'a' => Some(Mode::Affine),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::View => write!(f, "view"),
            Mode::Affine => write!(f, "affine"),
        }
    }
}
