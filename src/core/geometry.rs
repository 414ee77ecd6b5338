//! Measurement: how much room a wheel asks its host for.

use super::style::PickerStyle;

/// Host-provided constraint on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeConstraint {
    /// The host dictates the size.
    Exact(f32),
    /// Use the natural size, but never more than this.
    AtMost(f32),
    /// Use the natural size.
    Unspecified,
}

impl SizeConstraint {
    /// Resolve a natural (content) size against this constraint.
    pub fn resolve(self, natural: f32) -> f32 {
        match self {
            SizeConstraint::Exact(size) => size,
            SizeConstraint::AtMost(max) => natural.min(max),
            SizeConstraint::Unspecified => natural,
        }
    }
}

/// Width/height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Measures rendered text with the same metrics used for drawing.
pub trait TextMeasure {
    fn measure_text(&self, text: &str, size: f32) -> f32;
}

/// Widest of `texts` when drawn at `size`.
pub fn max_text_width<I, S>(measure: &dyn TextMeasure, texts: I, size: f32) -> f32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|t| measure.measure_text(t.as_ref(), size))
        .fold(0.0, f32::max)
}

/// Natural width: padding plus the widest text, rounded up to a whole unit.
pub fn natural_width(style: &PickerStyle, max_text_width: f32) -> f32 {
    style.padding.horizontal() + max_text_width.ceil()
}

/// Natural height: the selected row plus `neighbor_count` unselected rows
/// (and their spacing) on each side.
pub fn natural_height(style: &PickerStyle) -> f32 {
    style.padding.vertical()
        + style.selected_text_size
        + (style.unselected_text_size + style.text_padding) * style.neighbor_count as f32 * 2.0
}

pub fn measure(
    style: &PickerStyle,
    max_text_width: f32,
    width: SizeConstraint,
    height: SizeConstraint,
) -> Size {
    Size {
        width: width.resolve(natural_width(style, max_text_width)),
        height: height.resolve(natural_height(style)),
    }
}
