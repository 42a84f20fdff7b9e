use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::Result;
use crate::render::{Canvas, ScaleTransform};

/// Software canvas backed by an RGBA image, nearest-neighbour sampling.
pub struct RasterCanvas {
    target: RgbaImage,
    background: Rgba<u8>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgba([0, 0, 0, 255]))
    }

    pub fn with_background(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            target: RgbaImage::from_pixel(width, height, background),
            background,
        }
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    pub fn into_image(self) -> RgbaImage {
        self.target
    }

    pub fn clear(&mut self) {
        let bg = self.background;
        self.target.pixels_mut().for_each(|p| *p = bg);
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.target.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> (u32, u32) {
        self.target.dimensions()
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer, transform: ScaleTransform) {
        let width = self.target.width() as usize;
        let height = self.target.height() as usize;
        if width == 0 || height == 0 {
            return;
        }
        let row_bytes = width * 4;
        let bg = self.background.0;

        let paint = |(dy, row): (usize, &mut [u8])| paint_row(row, dy, buffer, transform, bg);
        if width * height >= PARALLEL_PIXEL_THRESHOLD {
            self.target.par_chunks_mut(row_bytes).enumerate().for_each(paint);
        } else {
            self.target.chunks_mut(row_bytes).enumerate().for_each(paint);
        }
    }
}

/// Fill one canvas row by sampling the buffer at the centre of each
/// destination pixel. Pixels that map outside the buffer get the background.
fn paint_row(row: &mut [u8], dy: usize, buffer: &PixelBuffer, transform: ScaleTransform, bg: [u8; 4]) {
    let (_, sy) = transform.invert(0.0, dy as f32 + 0.5);
    let src_y = sy.floor();
    let row_inside = src_y >= 0.0 && (src_y as u32) < buffer.height();

    for (dx, out) in row.chunks_exact_mut(4).enumerate() {
        let (sx, _) = transform.invert(dx as f32 + 0.5, 0.0);
        let src_x = sx.floor();
        let rgba = if row_inside && src_x >= 0.0 && (src_x as u32) < buffer.width() {
            buffer.pixel_rgba(src_x as u32, src_y as u32)
        } else {
            bg
        };
        out.copy_from_slice(&rgba);
    }
}
