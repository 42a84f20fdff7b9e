pub mod raster;

use crate::buffer::{PixelBuffer, PixelFormat};
use crate::decoder::RegionDecoder;
use crate::gesture::Invalidation;
use crate::physics::ScrollPhysics;
use crate::viewport::ViewportModel;

pub use raster::RasterCanvas;

/// Maps buffer pixels to canvas pixels: `canvas = buffer * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransform {
    pub sx: f32,
    pub sy: f32,
}

impl ScaleTransform {
    pub fn uniform(scale: f32) -> Self {
        Self {
            sx: scale,
            sy: scale,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.sx, y * self.sy)
    }

    pub fn invert(&self, x: f32, y: f32) -> (f32, f32) {
        (x / self.sx, y / self.sy)
    }
}

/// A paint target that can draw a decoded buffer through a scale transform.
pub trait Canvas {
    /// Paint target size in pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    fn draw_buffer(&mut self, buffer: &PixelBuffer, transform: ScaleTransform);
}

/// Result of one draw pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing to draw: no image attached or no layout yet.
    Idle,
    Painted,
    /// The region decode failed; the canvas was left untouched.
    Skipped,
}

/// Owns the reusable pixel buffer and performs draw passes.
#[derive(Clone, Debug, Default)]
pub struct FrameRenderer {
    format: PixelFormat,
    buffer: Option<PixelBuffer>,
    frames_painted: u64,
    frames_skipped: u64,
}

impl FrameRenderer {
    pub fn new(format: PixelFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The buffer from the last painted frame.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped
    }

    /// Drop the reusable buffer, e.g. when a different image is attached.
    pub fn reset(&mut self) {
        self.buffer = None;
    }

    /// Decode the current window into the reusable buffer and paint it scaled
    /// up to viewport size.
    ///
    /// A failed decode is logged and the frame is skipped; the buffer handed to
    /// the decoder is gone and the next frame allocates afresh.
    pub fn render_frame<D, C>(
        &mut self,
        decoder: Option<&mut D>,
        viewport: &ViewportModel,
        canvas: &mut C,
    ) -> FrameOutcome
    where
        D: RegionDecoder + ?Sized,
        C: Canvas + ?Sized,
    {
        let Some(decoder) = decoder else {
            return FrameOutcome::Idle;
        };
        let Some(scale) = viewport.current_scale() else {
            return FrameOutcome::Idle;
        };
        let rect = viewport.current_source_rect();
        if rect.is_empty() {
            return FrameOutcome::Idle;
        }

        let reuse = self.buffer.take();
        let previous = reuse.as_ref().map(|b| (b.width(), b.height(), b.format()));

        match decoder.decode_region(&rect, self.format, reuse) {
            Ok(buffer) => {
                if previous != Some((buffer.width(), buffer.height(), buffer.format())) {
                    tracing::debug!(
                        width = buffer.width(),
                        height = buffer.height(),
                        format = %buffer.format(),
                        "Pixel buffer allocated"
                    );
                }
                canvas.draw_buffer(&buffer, ScaleTransform::uniform(scale));
                self.buffer = Some(buffer);
                self.frames_painted += 1;
                FrameOutcome::Painted
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    top = rect.top,
                    bottom = rect.bottom,
                    "Region decode failed, frame skipped"
                );
                self.frames_skipped += 1;
                FrameOutcome::Skipped
            }
        }
    }

    /// Per-refresh animation driver: move the window to the next fling position.
    pub fn animate(&self, physics: &mut ScrollPhysics, viewport: &mut ViewportModel) -> Invalidation {
        if !physics.is_active() {
            return Invalidation::None;
        }
        match physics.tick() {
            Some(position) => {
                viewport.set_top(position);
                if physics.is_active() {
                    Invalidation::Animate
                } else {
                    Invalidation::Redraw
                }
            }
            None => Invalidation::None,
        }
    }
}
