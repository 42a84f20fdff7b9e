use std::io::{BufRead, Seek};

use image::{DynamicImage, RgbaImage};

use crate::buffer::{write_pixel, PixelBuffer, PixelFormat};
use crate::decoder::{validate_region, RegionDecoder};
use crate::error::{LongviewError, Result};
use crate::geometry::{ImageMetadata, SourceRect};

/// Fallback for compressed formats the `image` crate can read but cannot
/// decode partially: the image is decoded once and regions are cropped from it.
pub struct BufferedRegionDecoder {
    image: RgbaImage,
}

impl BufferedRegionDecoder {
    pub fn from_reader<R: BufRead + Seek>(reader: R) -> Result<Self> {
        let reader = image::ImageReader::new(reader).with_guessed_format()?;
        if reader.format().is_none() {
            return Err(LongviewError::UnsupportedFormat(
                "unrecognised image signature".into(),
            ));
        }
        Ok(Self::from_image(reader.decode()?))
    }

    pub fn from_image(image: DynamicImage) -> Self {
        let image = image.to_rgba8();
        tracing::info!(
            width = image.width(),
            height = image.height(),
            "Decoded full image for buffered region access"
        );
        Self { image }
    }
}

impl RegionDecoder for BufferedRegionDecoder {
    fn metadata(&self) -> ImageMetadata {
        ImageMetadata::new(self.image.width(), self.image.height())
    }

    fn decode_region(
        &mut self,
        rect: &SourceRect,
        format: PixelFormat,
        reuse: Option<PixelBuffer>,
    ) -> Result<PixelBuffer> {
        validate_region(rect, self.metadata())?;
        let width = rect.width() as u32;
        let height = rect.height() as u32;
        let (mut buf, _) = PixelBuffer::reuse_or_allocate(reuse, width, height, format)?;
        let bpp = format.bytes_per_pixel();

        for i in 0..height {
            let y = rect.top as u32 + i;
            let dst = buf.row_mut(i);
            if y >= self.image.height() {
                dst.fill(0);
                continue;
            }
            for (col, out) in dst.chunks_exact_mut(bpp).enumerate() {
                let x = rect.left as u32 + col as u32;
                write_pixel(format, out, self.image.get_pixel(x, y).0);
            }
        }

        Ok(buf)
    }
}
