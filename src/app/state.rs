//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling a mutation of `&mut AppState`.

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::date_picker::{DateTimePicker, PickerSlot};
use crate::core::geometry::SizeConstraint;
use crate::core::style::Rgb;
use crate::ui::layout::AppLayout;
use crate::ui::term_canvas::TermMeasure;

/// Top-level application state.
pub struct AppState {
    pub picker: DateTimePicker,
    /// Column that keyboard input goes to.
    pub focus: PickerSlot,
    /// Column that owns the mouse gesture in progress, if any.
    pub drag: Option<PickerSlot>,
    /// Layout of the last frame, used for mouse hit-testing.
    pub layout: AppLayout,
    /// Canvas units per terminal row.
    pub cell_height: f32,
    pub background: Rgb,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Set when the user accepted the current value.
    pub confirmed: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let picker = DateTimePicker::new(config.options.clone());
        let focus = picker
            .visible_slots()
            .first()
            .copied()
            .unwrap_or(PickerSlot::Year);
        Self {
            picker,
            focus,
            drag: None,
            layout: AppLayout::default(),
            cell_height: config.cell_height.max(1.0),
            background: config.background,
            config,
            should_quit: false,
            confirmed: false,
            status_message: None,
        }
    }

    /// Remeasure stale wheels, recompute the layout for `area`, and size each
    /// visible wheel to its column.
    pub fn relayout(&mut self, area: Rect) {
        for slot in self.picker.visible_slots() {
            let wheel = self.picker.wheel_mut(slot);
            if wheel.metrics_stale() {
                wheel.remeasure(&TermMeasure);
            }
        }

        self.layout = AppLayout::for_picker(area, &self.picker, self.cell_height);
        for column in &self.layout.columns {
            self.picker.wheel_mut(column.slot).measure(
                SizeConstraint::Exact(column.inner.width as f32),
                SizeConstraint::Exact(column.inner.height as f32 * self.cell_height),
            );
        }
    }

    /// Text for the status bar: the current value followed by key hints.
    pub fn status_line(&self) -> String {
        if let Some(message) = &self.status_message {
            return message.clone();
        }
        let hint = self.config.status_bar_hint();
        match self.picker.display_string() {
            Some(value) => format!("{value} | {hint}"),
            None => hint,
        }
    }
}
