//! [`Canvas`] over a Ratatui [`Buffer`] region.
//!
//! Horizontal units are terminal columns.  Vertical units are finer: one
//! row spans `cell_height` units, so offsets animate smoothly in the core
//! and only snap to rows here.  A glyph lands in the row containing its
//! vertical centre, and a clip keeps it only if that centre is inside.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::core::canvas::{Canvas, ClipRect, FontMetrics, Paint};
use crate::core::geometry::TextMeasure;
use crate::core::style::Rgb;

/// Terminal text measurement: display width in columns, independent of size.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermMeasure;

impl TextMeasure for TermMeasure {
    fn measure_text(&self, text: &str, _size: f32) -> f32 {
        Span::raw(text).width() as f32
    }
}

pub struct TermCanvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell_height: f32,
    background: Rgb,
    bold_from: f32,
    clip: ClipRect,
    stack: Vec<ClipRect>,
}

impl<'a> TermCanvas<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell_height: f32) -> Self {
        let area = area.intersection(buf.area);
        let cell_height = cell_height.max(1.0);
        Self {
            buf,
            area,
            cell_height,
            background: Rgb::BLACK,
            bold_from: f32::INFINITY,
            clip: ClipRect::new(
                0.0,
                0.0,
                area.width as f32,
                area.height as f32 * cell_height,
            ),
            stack: Vec::new(),
        }
    }

    /// Colour that alpha blends toward.
    pub fn background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Text at least this large is drawn bold.
    pub fn bold_from(mut self, size: f32) -> Self {
        self.bold_from = size;
        self
    }

    fn style_for(&self, paint: &Paint) -> Style {
        let c = paint.color.blend_over(self.background, paint.alpha);
        let style = Style::default().fg(Color::Rgb(c.r, c.g, c.b));
        if paint.size >= self.bold_from {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }
}

impl Canvas for TermCanvas<'_> {
    fn save(&mut self) {
        self.stack.push(self.clip);
    }

    fn restore(&mut self) {
        if let Some(clip) = self.stack.pop() {
            self.clip = clip;
        }
    }

    fn clip_rect(&mut self, rect: ClipRect) {
        self.clip = self.clip.intersect(&rect);
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint) {
        // Metrics are symmetric, so the baseline is the vertical centre.
        if !self.clip.contains_y(baseline) {
            return;
        }
        let row = (baseline / self.cell_height).floor();
        if row < 0.0 || row >= self.area.height as f32 {
            return;
        }
        let y = self.area.y + row as u16;

        let style = self.style_for(paint);
        let width = Span::raw(text).width() as f32;
        let mut col = (x - width / 2.0).floor();
        let mut tmp = [0u8; 4];
        for ch in text.chars() {
            let symbol: &str = ch.encode_utf8(&mut tmp);
            let w = Span::raw(symbol).width() as f32;
            if w == 0.0 {
                continue;
            }
            let visible = self.clip.contains_x(col + 0.5)
                && col >= 0.0
                && col + w <= self.area.width as f32;
            if visible {
                let x = self.area.x + col as u16;
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_style(style);
                }
            }
            col += w;
        }
    }

    fn font_metrics(&self, _size: f32) -> FontMetrics {
        FontMetrics {
            top: -self.cell_height / 2.0,
            bottom: self.cell_height / 2.0,
        }
    }
}

impl TextMeasure for TermCanvas<'_> {
    fn measure_text(&self, text: &str, size: f32) -> f32 {
        TermMeasure.measure_text(text, size)
    }
}
