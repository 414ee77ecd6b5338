//! Scroll-wheel pickers.
//!
//! [`core`] holds the host-agnostic widget: a single [`core::picker::PickerWheel`]
//! and the five-wheel [`core::date_picker::DateTimePicker`].  [`ui`] and
//! [`app`] host them in a Ratatui terminal; [`config`] loads user settings.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
