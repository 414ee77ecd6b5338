//! Colour palette and text styles for the picker chrome.

use ratatui::style::{Color, Modifier, Style};

/// Central theme for everything around the wheels.  Wheel text itself is
/// coloured by the configured picker style.
pub struct Theme;

impl Theme {
    // ── columns ────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    // ── status bar ─────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn value_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
