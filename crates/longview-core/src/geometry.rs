use serde::{Deserialize, Serialize};

/// Native pixel dimensions of the attached image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub native_width: u32,
    pub native_height: u32,
}

impl ImageMetadata {
    pub fn new(native_width: u32, native_height: u32) -> Self {
        Self {
            native_width,
            native_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.native_width == 0 || self.native_height == 0
    }
}

/// Visible window in native image pixels. `left..right` always spans the full
/// image width; `top..bottom` is the vertical scroll window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl SourceRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Translate the rectangle. Edges saturate at the `i32` range.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left = self.left.saturating_add(dx);
        self.right = self.right.saturating_add(dx);
        self.top = self.top.saturating_add(dy);
        self.bottom = self.bottom.saturating_add(dy);
    }
}

/// Measured size of the host viewport in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}
