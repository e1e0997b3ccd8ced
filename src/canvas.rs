//! Canvas sizing.

/// Canvas size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Largest `aspect` (width / height) rectangle that fits the viewport.
///
/// Width is tried first; if the matching height overflows, height is pinned
/// to the viewport and width follows from it.
pub fn fit_canvas(viewport_width: f64, viewport_height: f64, aspect: f64) -> CanvasSize {
    let mut width = viewport_width;
    let mut height = viewport_width / aspect;
    if height > viewport_height {
        height = viewport_height;
        width = viewport_height * aspect;
    }
    CanvasSize { width, height }
}
