//! Mode-7 style perspective projection of the source image onto a ground
//! plane.
//!
//! The projection is an inverse mapping: every framebuffer cell at or below
//! the horizon asks which source texel belongs there, given the camera's
//! position, heading, tilt and height. Cells whose sample falls outside the
//! source, behind the camera or outside the frustum are left untouched, so
//! they keep whatever the previous frame wrote. Rows above the horizon are
//! never written.

use crate::camera::CameraState;
use crate::image_source::Raster;

/// Off-screen buffer holding the projected scene.
///
/// Same layout as the source image. Allocated once and reused across frames.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Zero-filled framebuffer.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels],
        }
    }

    /// Framebuffer with the same dimensions and channel count as `source`.
    pub fn matching(source: &impl Raster) -> Self {
        Self::new(source.width(), source.height(), source.channels())
    }

    /// Set every byte to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Raster for Framebuffer {
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

/// Per-frame counts of committed and rejected cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionStats {
    pub written: usize,
    pub rejected: usize,
}

/// Inverse perspective mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Projector {
    horizon: u32,
}

impl Projector {
    /// Projector that only paints rows at or below `horizon`.
    pub fn new(horizon: u32) -> Self {
        Self { horizon }
    }

    /// Project `source` through `camera` into `out`.
    ///
    /// `out` is expected to match the dimensions of `source`; the formulas
    /// are evaluated in source units and cells are addressed in `out`.
    pub fn project(
        &self,
        camera: &CameraState,
        source: &impl Raster,
        out: &mut Framebuffer,
    ) -> ProjectionStats {
        let mut stats = ProjectionStats::default();

        let w = source.width() as f64;
        let h = source.height() as f64;
        let src_channels = source.channels();
        let dst_channels = out.channels;
        let copy_len = src_channels.min(dst_channels);
        let src_data = source.data();
        let (sin, cos) = (camera.theta.sin(), camera.theta.cos());

        for row in self.horizon..out.height {
            for col in 0..out.width {
                let Some((xprime, yprime)) = source_coord(camera, col, row, w, h, sin, cos) else {
                    stats.rejected += 1;
                    continue;
                };

                // xprime may equal the width, which lands on the next row's
                // first texel; the flat range check below still applies.
                let src = ((yprime * w + xprime) as usize) * src_channels;
                if src + copy_len > src_data.len() {
                    stats.rejected += 1;
                    continue;
                }

                let dst = (row as usize * out.width as usize + col as usize) * dst_channels;
                out.data[dst..dst + copy_len].copy_from_slice(&src_data[src..src + copy_len]);
                stats.written += 1;
            }
        }

        stats
    }
}

/// Source texel coordinates for destination cell `(col, row)`, or `None`
/// when the sample is rejected.
fn source_coord(
    camera: &CameraState,
    col: u32,
    row: u32,
    w: f64,
    h: f64,
    sin: f64,
    cos: f64,
) -> Option<(f64, f64)> {
    let x = col as f64 - w / 2.0;
    let y = row as f64;

    let z = y / camera.height;
    let mut view_angle = y - h / 2.0 + camera.tilt;
    if view_angle == 0.0 {
        view_angle = 1.0;
    }

    let xtemp = (x / (z * view_angle)) * (w / 2.0);
    let ytemp = (camera.height / view_angle) * (h / 2.0);

    let xprime = (xtemp * cos - ytemp * sin - camera.x0).floor();
    let yprime = (xtemp * sin + ytemp * cos + camera.y0).floor();

    let finite = xtemp.is_finite() && ytemp.is_finite() && xprime.is_finite() && yprime.is_finite();
    let visible = (0.0..=w).contains(&xprime)
        && (0.0..=h).contains(&yprime)
        && xtemp >= -w / 2.0
        && ytemp >= 0.0;

    (finite && visible).then_some((xprime, yprime))
}
