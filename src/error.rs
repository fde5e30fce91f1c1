//! Error types for the viewer.
//!
//! Only startup can fail. Numeric degeneracies inside the projection and
//! out-of-range samples are handled in place and never surface here.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors raised while loading the source image.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Invalid image file \"{}\": {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image file \"{}\" has no pixels", path.display())]
    Empty { path: PathBuf },
}

/// Top-level error returned by [`crate::session::run`] and the binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unrecognized mode \"{0},\" available modes are \"view\" and \"affine.\"")]
    UnknownMode(String),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

impl AppError {
    /// Process exit status for this error. Every failure maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
