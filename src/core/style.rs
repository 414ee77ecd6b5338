//! Visual parameters shared by every wheel: sizes, colours, opacity, spacing.

use std::fmt;

/// An opaque RGB colour.  Opacity travels separately in [`PickerStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const DARK_GRAY: Rgb = Rgb::new(0x44, 0x44, 0x44);
    pub const GRAY: Rgb = Rgb::new(0x88, 0x88, 0x88);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Composite `self` at `alpha` over `background`.
    pub fn blend_over(self, background: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Space reserved around the rendered text, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// All tunables of a single wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerStyle {
    pub selected_text_size: f32,
    pub unselected_text_size: f32,
    pub selected_text_color: Rgb,
    pub unselected_text_color: Rgb,
    pub selected_text_alpha: f32,
    pub unselected_text_alpha: f32,
    /// Gap between the selected text and its neighbours.
    pub text_padding: f32,
    /// Neighbours drawn on *each* side of the selected item.
    pub neighbor_count: usize,
    /// Wrap around the ends of the list instead of stopping.
    pub recycle: bool,
    /// Offset units removed per rebound tick.
    pub speed: f32,
    pub padding: Padding,
}

impl Default for PickerStyle {
    fn default() -> Self {
        Self {
            selected_text_size: 16.0,
            unselected_text_size: 13.0,
            selected_text_color: Rgb::BLACK,
            unselected_text_color: Rgb::DARK_GRAY,
            selected_text_alpha: 1.0,
            unselected_text_alpha: 0.5,
            text_padding: 100.0,
            neighbor_count: 1,
            recycle: true,
            speed: 2.0,
            padding: Padding::default(),
        }
    }
}

impl PickerStyle {
    /// Distance between the centres of two adjacent items.
    pub fn item_distance(&self) -> f32 {
        self.text_padding + (self.selected_text_size + self.unselected_text_size) / 2.0
    }

    /// Text size at `scale` (0 = selected, 1 = unselected).
    pub fn size_at(&self, scale: f32) -> f32 {
        lerp(self.unselected_text_size, self.selected_text_size, 1.0 - scale)
    }

    /// Opacity at `scale` (0 = selected, 1 = unselected).
    pub fn alpha_at(&self, scale: f32) -> f32 {
        lerp(self.unselected_text_alpha, self.selected_text_alpha, 1.0 - scale)
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from) * t + from
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(Rgb::parse_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::parse_hex("00FF00"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(Rgb::parse_hex("#fff"), None);
        assert_eq!(Rgb::parse_hex("#gg0000"), None);
        assert_eq!(Rgb::new(1, 2, 255).to_string(), "#0102ff");
    }

    #[test]
    fn blend_is_linear_in_alpha() {
        let c = Rgb::WHITE.blend_over(Rgb::BLACK, 0.5);
        assert_eq!(c, Rgb::new(128, 128, 128));
        assert_eq!(Rgb::WHITE.blend_over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.blend_over(Rgb::BLACK, 2.0), Rgb::WHITE);
    }

    #[test]
    fn item_distance_uses_mean_text_size() {
        let style = PickerStyle {
            selected_text_size: 16.0,
            unselected_text_size: 12.0,
            text_padding: 30.0,
            ..PickerStyle::default()
        };
        assert_eq!(style.item_distance(), 44.0);
    }

    #[test]
    fn interpolation_endpoints() {
        let style = PickerStyle::default();
        assert_eq!(style.size_at(0.0), style.selected_text_size);
        assert_eq!(style.size_at(1.0), style.unselected_text_size);
        assert_eq!(style.alpha_at(0.0), 1.0);
        assert_eq!(style.alpha_at(1.0), 0.5);
        assert!((style.alpha_at(0.5) - 0.75).abs() < 1e-6);
    }
}
