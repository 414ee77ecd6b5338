//! Ratatui widget that paints one wheel inside an optional block.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Widget},
};

use crate::core::picker::Wheel;
use crate::core::style::Rgb;

use super::term_canvas::TermCanvas;

/// Borrowed view of a wheel for a single frame.  The wheel should already be
/// measured to the block's inner area.
pub struct PickerView<'a> {
    wheel: &'a dyn Wheel,
    block: Option<Block<'a>>,
    cell_height: f32,
    background: Rgb,
}

impl<'a> PickerView<'a> {
    pub fn new(wheel: &'a dyn Wheel, cell_height: f32) -> Self {
        Self {
            wheel,
            block: None,
            cell_height,
            background: Rgb::BLACK,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }
}

impl Widget for PickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let bg = self.background;
        buf.set_style(inner, Style::default().bg(Color::Rgb(bg.r, bg.g, bg.b)));

        // Anything at least half-way to the selected size reads as selected.
        let style = self.wheel.style();
        let bold_from = (style.selected_text_size + style.unselected_text_size) / 2.0;
        let mut canvas = TermCanvas::new(buf, inner, self.cell_height)
            .background(bg)
            .bold_from(bold_from);
        self.wheel.draw(&mut canvas);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Modifier;
    use ratatui::widgets::Borders;

    use super::*;
    use crate::core::adapter::{Adapter, TextDelegate};
    use crate::core::geometry::SizeConstraint;
    use crate::core::picker::PickerWheel;
    use crate::core::style::PickerStyle;
    use crate::ui::term_canvas::TermMeasure;

    fn wheel() -> PickerWheel<u32> {
        let style = PickerStyle {
            selected_text_size: 16.0,
            unselected_text_size: 13.0,
            selected_text_color: Rgb::WHITE,
            unselected_text_color: Rgb::GRAY,
            text_padding: 3.0,
            recycle: false,
            ..PickerStyle::default()
        };
        let adapter = Adapter::with_selection((1..=5).collect(), 2, TextDelegate);
        let mut wheel = PickerWheel::new(adapter, style);
        wheel.remeasure(&TermMeasure);
        // Inner area of a bordered 7x5 block: 5 columns by 3 rows of 16.
        wheel.measure(SizeConstraint::Exact(5.0), SizeConstraint::Exact(48.0));
        wheel
    }

    #[test]
    fn renders_selection_between_neighbours() {
        let wheel = wheel();
        let area = Rect::new(0, 0, 7, 5);
        let mut buf = Buffer::empty(area);
        PickerView::new(&wheel, 16.0)
            .block(Block::default().borders(Borders::ALL))
            .render(area, &mut buf);

        assert_eq!(buf[(3, 1)].symbol(), "2");
        assert_eq!(buf[(3, 2)].symbol(), "3");
        assert_eq!(buf[(3, 3)].symbol(), "4");

        assert!(buf[(3, 2)].modifier.contains(Modifier::BOLD));
        assert!(!buf[(3, 1)].modifier.contains(Modifier::BOLD));
        assert_eq!(buf[(3, 2)].fg, Color::Rgb(255, 255, 255));
        // Grey at half opacity over black.
        assert_eq!(buf[(3, 1)].fg, Color::Rgb(68, 68, 68));
    }

    #[test]
    fn fills_inner_area_with_background() {
        let wheel = wheel();
        let area = Rect::new(0, 0, 7, 5);
        let mut buf = Buffer::empty(area);
        PickerView::new(&wheel, 16.0)
            .block(Block::default().borders(Borders::ALL))
            .background(Rgb::new(0x10, 0x20, 0x30))
            .render(area, &mut buf);
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0x10, 0x20, 0x30));
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }
}
