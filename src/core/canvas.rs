//! The drawing surface a wheel paints onto.  Hosts implement [`Canvas`];
//! the wheel never touches host types directly.

use super::style::Rgb;

/// Axis-aligned clip region in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClipRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.left && x < self.right
    }

    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        ClipRect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }
}

/// How a piece of text is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Vertical extent of a line of text relative to its baseline.  `top` is
/// negative (above the baseline), `bottom` positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub top: f32,
    pub bottom: f32,
}

impl FontMetrics {
    /// Baseline that vertically centres the text on `center_y`.
    pub fn baseline_for(&self, center_y: f32) -> f32 {
        center_y - (self.bottom + self.top) / 2.0
    }
}

/// Host drawing primitives.  `save`/`restore` bracket clip changes the
/// same way a retained clip stack does.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    /// Narrow the current clip to its intersection with `rect`.
    fn clip_rect(&mut self, rect: ClipRect);
    /// Draw `text` horizontally centred on `x` with its baseline at `baseline`.
    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint);
    fn font_metrics(&self, size: f32) -> FontMetrics;
}
