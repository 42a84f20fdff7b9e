#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

use image::{DynamicImage, ImageFormat, RgbaImage};

use longview_core::buffer::{write_pixel, PixelBuffer, PixelFormat};
use longview_core::config::ViewerConfig;
use longview_core::decoder::RegionDecoder;
use longview_core::error::{LongviewError, Result};
use longview_core::geometry::{ImageMetadata, SourceRect};

/// Build a binary PGM (`P5`) with each sample produced by `f(x, y)`.
pub fn pnm_gray(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> Vec<u8> {
    let mut buf = format!("P5\n{width} {height}\n255\n").into_bytes();
    for y in 0..height {
        for x in 0..width {
            buf.push(f(x, y));
        }
    }
    buf
}

/// Build a binary PPM (`P6`) with each pixel produced by `f(x, y)`.
pub fn pnm_rgb(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let mut buf = format!("P6\n# test pixmap\n{width} {height}\n255\n").into_bytes();
    for y in 0..height {
        for x in 0..width {
            buf.extend_from_slice(&f(x, y));
        }
    }
    buf
}

/// Tall grayscale strip whose sample value is the row index modulo 256.
pub fn row_gradient(width: u32, height: u32) -> Vec<u8> {
    pnm_gray(width, height, |_, y| (y % 256) as u8)
}

pub fn png_bytes(img: RgbaImage) -> Vec<u8> {
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .expect("encode PNG");
    out
}

/// Write bytes to a temporary file that lives as long as the handle.
pub fn write_temp(data: &[u8], suffix: &str) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write image data");
    f.flush().expect("flush");
    f
}

pub fn rgba_config() -> ViewerConfig {
    ViewerConfig {
        pixel_format: PixelFormat::Rgba8888,
        ..Default::default()
    }
}

/// Colour the mock decoder gives native row `y`: low byte in red, high byte in green.
pub fn row_color(y: i32) -> [u8; 4] {
    [(y & 0xff) as u8, ((y >> 8) & 0xff) as u8, 0, 255]
}

#[derive(Debug, Default)]
pub struct DecodeStats {
    pub calls: usize,
    pub reused: usize,
    pub rects: Vec<SourceRect>,
}

/// Synthetic decoder that paints every native row in [`row_color`].
pub struct MockDecoder {
    pub metadata: ImageMetadata,
    pub stats: Rc<RefCell<DecodeStats>>,
    pub fail: bool,
}

impl MockDecoder {
    pub fn new(width: u32, height: u32) -> (Self, Rc<RefCell<DecodeStats>>) {
        let stats = Rc::new(RefCell::new(DecodeStats::default()));
        let decoder = Self {
            metadata: ImageMetadata::new(width, height),
            stats: Rc::clone(&stats),
            fail: false,
        };
        (decoder, stats)
    }

    pub fn failing(width: u32, height: u32) -> (Self, Rc<RefCell<DecodeStats>>) {
        let (mut decoder, stats) = Self::new(width, height);
        decoder.fail = true;
        (decoder, stats)
    }
}

impl RegionDecoder for MockDecoder {
    fn metadata(&self) -> ImageMetadata {
        self.metadata
    }

    fn decode_region(
        &mut self,
        rect: &SourceRect,
        format: PixelFormat,
        reuse: Option<PixelBuffer>,
    ) -> Result<PixelBuffer> {
        let mut stats = self.stats.borrow_mut();
        stats.calls += 1;
        stats.rects.push(*rect);
        if self.fail {
            return Err(LongviewError::Io(std::io::Error::other("codec failure")));
        }

        let (mut buf, reused) = PixelBuffer::reuse_or_allocate(
            reuse,
            rect.width() as u32,
            rect.height() as u32,
            format,
        )?;
        if reused {
            stats.reused += 1;
        }
        let bpp = format.bytes_per_pixel();
        for i in 0..rect.height() {
            let color = row_color(rect.top + i);
            for px in buf.row_mut(i as u32).chunks_exact_mut(bpp) {
                write_pixel(format, px, color);
            }
        }
        Ok(buf)
    }
}

/// Wraps a reader and counts the bytes pulled through it.
pub struct CountingReader<R> {
    inner: R,
    pub bytes_read: Rc<Cell<u64>>,
}

impl<R> CountingReader<R> {
    pub fn new(inner: R) -> (Self, Rc<Cell<u64>>) {
        let counter = Rc::new(Cell::new(0));
        (
            Self {
                inner,
                bytes_read: Rc::clone(&counter),
            },
            counter,
        )
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read.set(self.bytes_read.get() + n as u64);
        Ok(n)
    }
}

impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}
