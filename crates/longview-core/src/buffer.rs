use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

use crate::error::{LongviewError, Result};

/// In-memory pixel layout of a decoded region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 5-6-5 packed RGB, little-endian, 2 bytes per pixel.
    #[default]
    Rgb565,
    /// 8-bit RGBA, 4 bytes per pixel.
    Rgba8888,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb565 => 2,
            PixelFormat::Rgba8888 => 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelFormat::Rgb565 => write!(f, "RGB565"),
            PixelFormat::Rgba8888 => write!(f, "RGBA8888"),
        }
    }
}

/// Reusable pixel storage for one decoded region, row-major with no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = byte_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0u8; len],
        })
    }

    /// Hand back `reuse` untouched if its geometry and format match exactly,
    /// otherwise allocate fresh storage. The flag reports whether storage was reused.
    pub fn reuse_or_allocate(
        reuse: Option<PixelBuffer>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<(Self, bool)> {
        match reuse {
            Some(buf) if buf.matches(width, height, format) => Ok((buf, true)),
            _ => Ok((Self::new(width, height, format)?, false)),
        }
    }

    pub fn matches(&self, width: u32, height: u32, format: PixelFormat) -> bool {
        self.width == width && self.height == height && self.format == format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn row_stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.row_stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Read one pixel as RGBA8888 regardless of the storage format.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let bpp = self.format.bytes_per_pixel();
        let offset = y as usize * self.row_stride() + x as usize * bpp;
        read_pixel(self.format, &self.data[offset..offset + bpp])
    }
}

fn byte_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
        .ok_or(LongviewError::InvalidDimensions { width, height })
}

/// Pack 8-bit RGB into 5-6-5.
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// Expand 5-6-5 to 8-bit RGB, replicating high bits into the low bits.
pub fn unpack_rgb565(value: u16) -> [u8; 3] {
    let r = ((value >> 11) & 0x1f) as u8;
    let g = ((value >> 5) & 0x3f) as u8;
    let b = (value & 0x1f) as u8;
    [(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)]
}

/// Store an RGBA pixel into `dst`, which must be exactly one pixel wide.
pub fn write_pixel(format: PixelFormat, dst: &mut [u8], rgba: [u8; 4]) {
    match format {
        PixelFormat::Rgb565 => LittleEndian::write_u16(dst, pack_rgb565(rgba[0], rgba[1], rgba[2])),
        PixelFormat::Rgba8888 => dst.copy_from_slice(&rgba),
    }
}

/// Load one pixel from `src` as RGBA.
pub fn read_pixel(format: PixelFormat, src: &[u8]) -> [u8; 4] {
    match format {
        PixelFormat::Rgb565 => {
            let [r, g, b] = unpack_rgb565(LittleEndian::read_u16(src));
            [r, g, b, 255]
        }
        PixelFormat::Rgba8888 => [src[0], src[1], src[2], src[3]],
    }
}
