//! Sampling images onto the terminal cell grid.
//!
//! Both display modes are nearest-sample only. The flat view reads the
//! source image through the camera's pan and zoom; the perspective view
//! stretches the projected framebuffer over the whole terminal.

use crate::camera::CameraState;
use crate::image_source::Raster;
use crate::terminal::{CellColor, ColorGrid};

/// Colour of the pixel starting at flat byte offset `offset`.
///
/// Offsets that are negative, non-finite or past the end of the buffer
/// fall back to the first pixel of the buffer. Images with fewer than three
/// channels are shown as grey from channel 0.
pub fn pixel_at(raster: &impl Raster, offset: f64) -> CellColor {
    let data = raster.data();
    let channels = raster.channels();
    let span = channels.min(3);

    let base = if offset.is_finite() && offset >= 0.0 && offset + span as f64 <= data.len() as f64 {
        offset as usize
    } else {
        0
    };

    match data.get(base..base + span) {
        Some([r, g, b]) => CellColor::new(*r, *g, *b),
        Some([v, ..]) => CellColor::grey(*v),
        _ => CellColor::default(),
    }
}

/// Fill `grid` with the flat view of `image` for a `cols` x `rows` terminal.
///
/// Cell `(col, row)` samples
/// `((col / cols) * width + x0) / zoom`, `((row / rows) * height + y0) / zoom`,
/// floored. A zoom of zero or below is not guarded against and simply
/// produces fallback or mirrored samples.
pub fn sample_view_into(image: &impl Raster, camera: &CameraState, cols: u16, rows: u16, grid: &mut ColorGrid) {
    grid.resize(cols, rows);
    if cols == 0 || rows == 0 {
        return;
    }

    let w = image.width() as f64;
    let h = image.height() as f64;
    let n = image.channels() as f64;

    for row in 0..rows {
        let sy = (((row as f64 * h) / rows as f64 + camera.y0) / camera.zoom).floor();
        for col in 0..cols {
            let sx = (((col as f64 * w) / cols as f64 + camera.x0) / camera.zoom).floor();
            let offset = (sy * w + sx) * n;
            grid.cells[row as usize * cols as usize + col as usize] = pixel_at(image, offset);
        }
    }
}

/// Fill `grid` with `raster` scaled to a `cols` x `rows` terminal.
pub fn scale_into(raster: &impl Raster, cols: u16, rows: u16, grid: &mut ColorGrid) {
    grid.resize(cols, rows);
    if cols == 0 || rows == 0 {
        return;
    }

    let w = raster.width() as f64;
    let h = raster.height() as f64;
    let n = raster.channels() as f64;

    for row in 0..rows {
        let sy = ((row as f64 * h) / rows as f64).floor();
        for col in 0..cols {
            let sx = ((col as f64 * w) / cols as f64).floor();
            grid.cells[row as usize * cols as usize + col as usize] = pixel_at(raster, (sy * w + sx) * n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Tuning;
    use crate::image_source::Image;
    use crate::mode::Mode;

    fn rgb_ramp(width: u32, height: u32) -> Image {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8]);
            }
        }
        Image::from_raw(width, height, 3, data).unwrap()
    }

    #[test]
    fn test_pixel_at_rgb() {
        let img = rgb_ramp(4, 4);
        assert_eq!(pixel_at(&img, 3.0 * 5.0), CellColor::new(1, 1, 2));
    }

    #[test]
    fn test_pixel_at_falls_back_to_first_pixel() {
        let img = Image::from_raw(2, 1, 3, vec![5, 6, 7, 8, 9, 10]).unwrap();
        let first = CellColor::new(5, 6, 7);
        assert_eq!(pixel_at(&img, -3.0), first);
        assert_eq!(pixel_at(&img, 6.0), first);
        assert_eq!(pixel_at(&img, f64::NAN), first);
        assert_eq!(pixel_at(&img, f64::INFINITY), first);
    }

    #[test]
    fn test_pixel_at_grey_and_alpha() {
        let grey = Image::from_raw(2, 1, 1, vec![40, 80]).unwrap();
        assert_eq!(pixel_at(&grey, 1.0), CellColor::grey(80));

        let grey_alpha = Image::from_raw(1, 1, 2, vec![33, 255]).unwrap();
        assert_eq!(pixel_at(&grey_alpha, 0.0), CellColor::grey(33));

        let rgba = Image::from_raw(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(pixel_at(&rgba, 0.0), CellColor::new(1, 2, 3));
    }

    #[test]
    fn test_pan_shifts_samples() {
        let img = rgb_ramp(8, 8);
        let mut cam = CameraState::new(Mode::View, 8, 8, Tuning::default());
        cam.x0 = 2.0;
        cam.y0 = 1.0;
        let mut grid = ColorGrid::default();
        sample_view_into(&img, &cam, 8, 8, &mut grid);
        assert_eq!(grid.get(0, 0), Some(CellColor::new(2, 1, 3)));
    }

    #[test]
    fn test_zoom_in_magnifies() {
        let img = rgb_ramp(8, 8);
        let mut cam = CameraState::new(Mode::View, 8, 8, Tuning::default());
        cam.zoom = 2.0;
        let mut grid = ColorGrid::default();
        sample_view_into(&img, &cam, 8, 8, &mut grid);
        assert_eq!(grid.get(5, 3), Some(CellColor::new(2, 1, 3)));
    }

    #[test]
    fn test_zero_zoom_uses_fallback() {
        let img = rgb_ramp(4, 4);
        let mut cam = CameraState::new(Mode::View, 4, 4, Tuning::default());
        cam.zoom = 0.0;
        let mut grid = ColorGrid::default();
        sample_view_into(&img, &cam, 4, 4, &mut grid);
        assert_eq!(grid.cells.len(), 16);
        assert_eq!(grid.get(0, 0), Some(CellColor::new(0, 0, 0)));
    }

    #[test]
    fn test_scale_into_downsamples() {
        let img = rgb_ramp(8, 4);
        let mut grid = ColorGrid::default();
        scale_into(&img, 4, 2, &mut grid);
        assert_eq!(grid.get(1, 1), Some(CellColor::new(2, 2, 4)));
        assert_eq!(grid.get(3, 0), Some(CellColor::new(6, 0, 6)));
    }

    #[test]
    fn test_empty_grid() {
        let img = rgb_ramp(4, 4);
        let mut grid = ColorGrid::default();
        scale_into(&img, 0, 10, &mut grid);
        assert!(grid.cells.is_empty());
    }
}
