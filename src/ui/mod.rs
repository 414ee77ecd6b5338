//! UI / rendering layer: everything that touches Ratatui.
//!
//! This layer hosts the core wheels on the terminal.  It supplies the
//! canvas and text metrics, lays out the columns, and wraps each wheel in a
//! widget.

pub mod layout;
pub mod picker_view;
pub mod term_canvas;
pub mod theme;
