//! Core widget logic: adapter, scroll state machine, rebound, rendering,
//! and the date/time composite.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Hosts plug
//! in through [`canvas::Canvas`], [`geometry::TextMeasure`], and
//! [`rebound::TickScheduler`].

pub mod adapter;
pub mod calendar;
pub mod canvas;
pub mod date_picker;
pub mod geometry;
pub mod picker;
pub mod rebound;
pub mod render;
pub mod scroll;
pub mod style;
