use std::io::{BufRead, Read, Seek, SeekFrom};

use crate::buffer::{write_pixel, PixelBuffer, PixelFormat};
use crate::decoder::{validate_region, RegionDecoder};
use crate::error::{LongviewError, Result};
use crate::geometry::{ImageMetadata, SourceRect};

/// Binary PNM header (`P5` graymap or `P6` pixmap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PnmHeader {
    pub channels: usize,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
    /// Byte length of the header, i.e. where the raster starts.
    pub data_offset: u64,
}

impl PnmHeader {
    /// Parse the header from the reader's current position.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut consumed = 0u64;

        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;
        consumed += 2;
        let channels = match &magic {
            b"P5" => 1,
            b"P6" => 3,
            _ => return Err(LongviewError::InvalidPnm("expected P5 or P6 magic".into())),
        };

        let width = read_header_value(reader, &mut consumed)?;
        let height = read_header_value(reader, &mut consumed)?;
        let maxval = read_header_value(reader, &mut consumed)?;

        // Exactly one whitespace byte separates the header from the raster.
        let mut sep = [0u8; 1];
        reader.read_exact(&mut sep)?;
        consumed += 1;
        if !sep[0].is_ascii_whitespace() {
            return Err(LongviewError::InvalidPnm(
                "missing separator before raster".into(),
            ));
        }

        if width == 0 || height == 0 {
            return Err(LongviewError::InvalidDimensions { width, height });
        }
        if maxval == 0 || maxval > 255 {
            return Err(LongviewError::UnsupportedFormat(format!(
                "PNM maxval {maxval} (only 8-bit samples are supported)"
            )));
        }

        Ok(Self {
            channels,
            width,
            height,
            maxval,
            data_offset: consumed,
        })
    }

    pub fn row_stride(&self) -> u64 {
        self.width as u64 * self.channels as u64
    }
}

/// Skip whitespace and `#` comments, then read one decimal header field.
fn read_header_value<R: BufRead>(reader: &mut R, consumed: &mut u64) -> Result<u32> {
    let mut byte = [0u8; 1];
    loop {
        reader.read_exact(&mut byte)?;
        *consumed += 1;
        match byte[0] {
            b'#' => {
                let mut comment = Vec::new();
                *consumed += reader.read_until(b'\n', &mut comment)? as u64;
            }
            b if b.is_ascii_whitespace() => {}
            _ => break,
        }
    }

    let mut value: u32 = 0;
    loop {
        if !byte[0].is_ascii_digit() {
            return Err(LongviewError::InvalidPnm(format!(
                "unexpected byte 0x{:02x} in header",
                byte[0]
            )));
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add((byte[0] - b'0') as u32))
            .ok_or_else(|| LongviewError::InvalidPnm("header value overflow".into()))?;

        // The byte after a field is either a digit or whitespace; whitespace is
        // left in the stream so the separator check can see it.
        let next = reader.fill_buf()?.first().copied();
        match next {
            Some(b) if b.is_ascii_digit() => {
                reader.consume(1);
                *consumed += 1;
                byte[0] = b;
            }
            Some(b) if b.is_ascii_whitespace() => return Ok(value),
            Some(b) => {
                return Err(LongviewError::InvalidPnm(format!(
                    "unexpected byte 0x{b:02x} in header"
                )))
            }
            None => return Err(LongviewError::InvalidPnm("truncated header".into())),
        }
    }
}

/// Region decoder for uncompressed PNM rasters: only the requested rows are
/// ever read, by seeking straight to them.
pub struct PnmRegionDecoder<R> {
    reader: R,
    header: PnmHeader,
    /// Stream position of the first byte of the file.
    base: u64,
    row: Vec<u8>,
}

impl<R: BufRead + Seek> PnmRegionDecoder<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let base = reader.stream_position()?;
        let header = PnmHeader::parse(&mut reader)?;
        Ok(Self {
            reader,
            header,
            base,
            row: Vec::new(),
        })
    }

    pub fn header(&self) -> &PnmHeader {
        &self.header
    }
}

impl<R: Read + Seek> RegionDecoder for PnmRegionDecoder<R> {
    fn metadata(&self) -> ImageMetadata {
        ImageMetadata::new(self.header.width, self.header.height)
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

        let channels = self.header.channels;
        let maxval = self.header.maxval;
        let bpp = format.bytes_per_pixel();
        self.row.resize(width as usize * channels, 0);

        for i in 0..height {
            let y = rect.top as u32 + i;
            let dst = buf.row_mut(i);
            if y >= self.header.height {
                // Reads back as opaque black in Rgb565, which has no alpha.
                dst.fill(0);
                continue;
            }

            let offset = self.base
                + self.header.data_offset
                + y as u64 * self.header.row_stride()
                + rect.left as u64 * channels as u64;
            self.reader.seek(SeekFrom::Start(offset))?;
            self.reader.read_exact(&mut self.row)?;

            for (src, out) in self.row.chunks_exact(channels).zip(dst.chunks_exact_mut(bpp)) {
                let rgba = match channels {
                    1 => {
                        let v = scale_sample(src[0], maxval);
                        [v, v, v, 255]
                    }
                    _ => [
                        scale_sample(src[0], maxval),
                        scale_sample(src[1], maxval),
                        scale_sample(src[2], maxval),
                        255,
                    ],
                };
                write_pixel(format, out, rgba);
            }
        }

        Ok(buf)
    }
}

fn scale_sample(v: u8, maxval: u32) -> u8 {
    if maxval == 255 {
        v
    } else {
        ((v.min(maxval as u8) as u32 * 255 + maxval / 2) / maxval) as u8
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn header_with_comment() {
        let data = b"P5\n# scanned page\n4 3\n255\n".to_vec();
        let header = PnmHeader::parse(&mut Cursor::new(data.clone())).unwrap();
        assert_eq!(header.channels, 1);
        assert_eq!((header.width, header.height, header.maxval), (4, 3, 255));
        assert_eq!(header.data_offset, data.len() as u64);
    }

    #[test]
    fn sixteen_bit_is_unsupported() {
        let data = b"P6 2 2 65535\n".to_vec();
        assert!(matches!(
            PnmHeader::parse(&mut Cursor::new(data)),
            Err(LongviewError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn low_maxval_expands_to_full_range() {
        assert_eq!(scale_sample(15, 15), 255);
        assert_eq!(scale_sample(0, 15), 0);
    }
}
