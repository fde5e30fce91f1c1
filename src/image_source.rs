//! Source image loading and raw pixel access.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::ImageError;

/// Read access shared by the source image and the projected framebuffer.
///
/// Both are flat row-major byte buffers indexed as
/// `(y * width + x) * channels + c`.
pub trait Raster {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn channels(&self) -> usize;
    fn data(&self) -> &[u8];

    /// Flat offset of the first channel of pixel `(x, y)`.
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width() as usize + x) * self.channels()
    }

    /// Channel `c` of pixel `(x, y)`, or `None` when out of range.
    fn texel(&self, x: u32, y: u32, c: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() || c >= self.channels() {
            return None;
        }
        self.data().get(self.offset(x as usize, y as usize) + c).copied()
    }
}

/// A decoded, immutable source image.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl Image {
    /// Decode an image file.
    ///
    /// 8-bit grey, grey+alpha, RGB and RGBA images keep their native
    /// channel count. Every other pixel format is converted to RGBA8.
    pub fn open(path: &Path) -> Result<Self, ImageError> {
        let img = image::open(path).map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Empty {
                path: path.to_path_buf(),
            });
        }

        let (channels, data) = match img {
            DynamicImage::ImageLuma8(buf) => (1, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (2, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (3, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (4, buf.into_raw()),
            other => (4, other.to_rgba8().into_raw()),
        };

        log::info!(
            "Loaded {} ({}x{}, {} channel(s))",
            path.display(),
            width,
            height,
            channels
        );

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap an existing pixel buffer.
    ///
    /// Returns `None` if `data` does not hold exactly
    /// `width * height * channels` bytes or `channels` is zero.
    pub fn from_raw(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Option<Self> {
        if channels == 0 || data.len() != width as usize * height as usize * channels {
            return None;
        }
        Some(Self {
            width,
            height,
            channels,
            data,
        })
    }
}

impl Raster for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn data(&self) -> &[u8] {
        &self.data
    }
}
