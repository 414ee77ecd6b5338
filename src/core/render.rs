//! Paints one frame of a wheel: the centred item as a two-colour blend and
//! its fixed-size neighbours above and below.

use super::adapter::Adapter;
use super::canvas::{Canvas, ClipRect, Paint};
use super::geometry::Size;
use super::scroll::{Direction, ScrollState};
use super::style::PickerStyle;

/// Edge of the centred item from which the selected colour spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientEdge {
    Top,
    Bottom,
}

/// Per-frame appearance of the centred item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterLook {
    /// 0 = fully selected, 1 = fully unselected.
    pub scale: f32,
    pub size: f32,
    pub alpha: f32,
    pub edge: GradientEdge,
}

impl CenterLook {
    pub fn new(style: &PickerStyle, scroll: &ScrollState) -> Self {
        let scale = scroll.scale();
        Self {
            scale,
            size: style.size_at(scale),
            alpha: style.alpha_at(scale),
            edge: gradient_edge(scroll.direction, scroll.is_enlarging()),
        }
    }

    /// Height of the band painted in the selected colour.
    pub fn highlight_height(&self) -> f32 {
        (1.0 - self.scale) * self.size
    }
}

/// Growing while moving down, or shrinking while moving up, fills from the
/// bottom edge; the other two cases fill from the top.
pub fn gradient_edge(direction: Direction, enlarging: bool) -> GradientEdge {
    match (direction, enlarging) {
        (Direction::Down, true) | (Direction::Up, false) => GradientEdge::Bottom,
        (Direction::Down, false) | (Direction::Up, true) => GradientEdge::Top,
    }
}

/// Everything a frame depends on, borrowed from the wheel.
pub struct WheelScene<'a, T> {
    pub adapter: &'a Adapter<T>,
    pub style: &'a PickerStyle,
    pub scroll: &'a ScrollState,
    pub size: Size,
    pub max_text_width: f32,
}

impl<T> WheelScene<'_, T> {
    /// Draw the frame.  Returns the centred item's text, or `None` when
    /// there is nothing selected and nothing was drawn.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> Option<String> {
        let selected = self.adapter.selected_index()?;
        let text = self.adapter.text(selected)?;

        let x = self.size.width / 2.0;
        let y = self.size.height / 2.0 + self.scroll.offset();

        self.draw_center(canvas, &text, x, y);

        for count in 1..=self.style.neighbor_count {
            self.draw_neighbor(canvas, selected, count, Direction::Down, x, y);
            self.draw_neighbor(canvas, selected, count, Direction::Up, x, y);
        }
        Some(text)
    }

    fn draw_center(&self, canvas: &mut dyn Canvas, text: &str, x: f32, y: f32) {
        let look = CenterLook::new(self.style, self.scroll);
        let baseline = canvas.font_metrics(look.size).baseline_for(y);

        let left = x - self.max_text_width / 2.0;
        let right = x + self.max_text_width / 2.0;
        let bottom = y + look.size / 2.0;
        let top = bottom - look.size;
        let band = look.highlight_height();

        let (highlight, rest) = match look.edge {
            GradientEdge::Top => (
                ClipRect::new(left, top, right, top + band),
                ClipRect::new(left, top + band, right, bottom),
            ),
            GradientEdge::Bottom => (
                ClipRect::new(left, bottom - band, right, bottom),
                ClipRect::new(left, top, right, bottom - band),
            ),
        };

        let selected_paint = Paint {
            size: look.size,
            color: self.style.selected_text_color,
            alpha: look.alpha,
        };
        let unselected_paint = Paint {
            color: self.style.unselected_text_color,
            ..selected_paint
        };

        canvas.save();
        canvas.clip_rect(highlight);
        canvas.draw_text(text, x, baseline, &selected_paint);
        canvas.restore();

        canvas.save();
        canvas.clip_rect(rest);
        canvas.draw_text(text, x, baseline, &unselected_paint);
        canvas.restore();
    }

    fn draw_neighbor(
        &self,
        canvas: &mut dyn Canvas,
        selected: usize,
        count: usize,
        side: Direction,
        x: f32,
        center_y: f32,
    ) {
        let target = selected as i64 + side.index_step() * count as i64;
        let Some(position) = self.adapter.resolve_index(target, self.style.recycle) else {
            return;
        };
        let Some(text) = self.adapter.text(position) else {
            return;
        };

        let paint = Paint {
            size: self.style.unselected_text_size,
            color: self.style.unselected_text_color,
            alpha: self.style.unselected_text_alpha,
        };
        let y = center_y + side.sign() * self.style.item_distance() * count as f32;
        let baseline = canvas.font_metrics(paint.size).baseline_for(y);
        canvas.draw_text(&text, x, baseline, &paint);
    }
}
