//! Vertical scroll window over a full-width scaled image.
//!
//! The image always fills the viewport width exactly, so the horizontal range
//! of the [`SourceRect`] is fixed to the image width and only `top`/`bottom`
//! move. Every mutation path is one of the methods below.

use crate::geometry::{ImageMetadata, SourceRect, ViewportSize};

#[derive(Clone, Debug, Default)]
pub struct ViewportModel {
    metadata: Option<ImageMetadata>,
    size: Option<ViewportSize>,
    scale: Option<f32>,
    rect: SourceRect,
    window_height: i32,
}

impl ViewportModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the image dimensions. Scale and window are derived once a
    /// viewport size is known too.
    pub fn attach_image(&mut self, metadata: ImageMetadata) {
        self.metadata = Some(metadata);
        self.scale = None;
        self.rect = SourceRect::default();
        self.window_height = 0;
        if let Some(size) = self.size {
            self.set_viewport_size(size.width, size.height);
        }
    }

    /// Forget the attached image; the viewport size is kept.
    pub fn detach(&mut self) {
        self.metadata = None;
        self.scale = None;
        self.rect = SourceRect::default();
        self.window_height = 0;
    }

    /// Record the measured viewport and reset the window to the top of the
    /// image. Without an image (or with a zero width) only the size is kept.
    pub fn set_viewport_size(&mut self, width: u32, height: u32) {
        self.size = Some(ViewportSize::new(width, height));

        let Some(meta) = self.metadata else {
            return;
        };
        if meta.native_width == 0 || width == 0 {
            return;
        }

        let scale = width as f32 / meta.native_width as f32;
        self.scale = Some(scale);
        self.window_height = (height as f32 / scale).round() as i32;
        self.rect = SourceRect::new(0, 0, meta.native_width as i32, self.window_height);

        tracing::info!(
            width,
            height,
            scale,
            window_height = self.window_height,
            "Viewport resized"
        );
    }

    /// Move the window by `delta_y` native pixels and clamp it to the image.
    ///
    /// The bottom edge is clamped before the top edge. When the window is
    /// taller than the image both clamps apply and the window ends up at
    /// `0..window_height`, running past the last row.
    pub fn scroll_by(&mut self, delta_y: f32) {
        if self.scale.is_none() {
            return;
        }
        let native_height = self.native_height();

        self.rect.offset(0, delta_y.round() as i32);

        if self.rect.bottom > native_height {
            self.rect.top = native_height - self.window_height;
            self.rect.bottom = native_height;
        }
        if self.rect.top < 0 {
            self.rect.top = 0;
            self.rect.bottom = self.window_height;
        }
    }

    /// Place the window at an absolute `top`, keeping its height.
    pub fn set_top(&mut self, top: i32) {
        if self.scale.is_none() {
            return;
        }
        self.rect.top = top;
        self.rect.bottom = top.saturating_add(self.window_height);
    }

    pub fn current_source_rect(&self) -> SourceRect {
        self.rect
    }

    /// `None` until both an image and a non-zero viewport width are known.
    pub fn current_scale(&self) -> Option<f32> {
        self.scale
    }

    pub fn window_height(&self) -> i32 {
        self.window_height
    }

    /// Largest `top` that keeps the window inside the image.
    pub fn max_top(&self) -> i32 {
        (self.native_height() - self.window_height).max(0)
    }

    pub fn metadata(&self) -> Option<ImageMetadata> {
        self.metadata
    }

    pub fn viewport_size(&self) -> Option<ViewportSize> {
        self.size
    }

    /// Ready to draw: image attached and scale derived.
    pub fn is_ready(&self) -> bool {
        self.scale.is_some()
    }

    fn native_height(&self) -> i32 {
        self.metadata.map_or(0, |m| m.native_height as i32)
    }
}
