pub mod buffered;
pub mod pnm;

use std::io::{BufRead, Read, Seek, SeekFrom};

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::error::{LongviewError, Result};
use crate::geometry::{ImageMetadata, SourceRect};

pub use buffered::BufferedRegionDecoder;
pub use pnm::PnmRegionDecoder;

/// A persistent handle that decodes arbitrary axis-aligned rectangles of one image.
pub trait RegionDecoder {
    fn metadata(&self) -> ImageMetadata;

    /// Decode `rect` into a buffer of `format`.
    ///
    /// `reuse` is filled in place when its width, height and format match the
    /// region exactly; otherwise fresh storage is allocated. Either way the
    /// returned buffer belongs to the caller.
    fn decode_region(
        &mut self,
        rect: &SourceRect,
        format: PixelFormat,
        reuse: Option<PixelBuffer>,
    ) -> Result<PixelBuffer>;
}

/// Read only the image header and report its pixel dimensions.
///
/// The stream is rewound to where it started, so the same reader can be handed
/// to [`open_region_decoder`] afterwards.
pub fn read_bounds<R: BufRead + Seek>(reader: &mut R) -> Result<ImageMetadata> {
    let start = reader.stream_position()?;
    let metadata = if is_pnm(reader)? {
        let header = pnm::PnmHeader::parse(&mut *reader)?;
        ImageMetadata::new(header.width, header.height)
    } else {
        let guessed = image::ImageReader::new(&mut *reader).with_guessed_format()?;
        let Some(format) = guessed.format() else {
            return Err(LongviewError::UnsupportedFormat(
                "unrecognised image signature".into(),
            ));
        };
        tracing::debug!(?format, "Reading image bounds");
        let (width, height) = guessed.into_dimensions()?;
        ImageMetadata::new(width, height)
    };
    reader.seek(SeekFrom::Start(start))?;

    if metadata.is_empty() {
        return Err(LongviewError::InvalidDimensions {
            width: metadata.native_width,
            height: metadata.native_height,
        });
    }
    Ok(metadata)
}

/// Open the region decoder that matches the stream's format.
pub fn open_region_decoder<R>(mut reader: R) -> Result<Box<dyn RegionDecoder>>
where
    R: BufRead + Seek + 'static,
{
    if is_pnm(&mut reader)? {
        Ok(Box::new(PnmRegionDecoder::new(reader)?))
    } else {
        Ok(Box::new(BufferedRegionDecoder::from_reader(reader)?))
    }
}

/// Peek at the magic bytes for binary PGM/PPM without consuming them.
fn is_pnm<R: Read + Seek>(reader: &mut R) -> Result<bool> {
    let start = reader.stream_position()?;
    let mut magic = [0u8; 2];
    let found = match reader.read_exact(&mut magic) {
        Ok(()) => matches!(&magic, b"P5" | b"P6"),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(e.into()),
    };
    reader.seek(SeekFrom::Start(start))?;
    Ok(found)
}

/// A region is decodable when it lies horizontally inside the image and starts
/// on an existing row. `bottom` may run past the last row; those rows are
/// zero-filled, which reads as transparent black in `Rgba8888` and opaque
/// black in `Rgb565`.
pub(crate) fn validate_region(rect: &SourceRect, metadata: ImageMetadata) -> Result<()> {
    let inside = rect.left >= 0
        && rect.left < rect.right
        && rect.right as i64 <= metadata.native_width as i64
        && rect.top >= 0
        && rect.top < rect.bottom
        && (rect.top as i64) < metadata.native_height as i64;
    if inside {
        Ok(())
    } else {
        Err(LongviewError::InvalidRegion {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
            width: metadata.native_width,
            height: metadata.native_height,
        })
    }
}
