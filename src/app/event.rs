//! Application event abstraction.
//!
//! Wraps crossterm events and rebound ticks into one enum.  A background
//! reader forwards terminal input over the channel so the main loop stays
//! non-blocking; rebound tasks post into the same channel.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

use crate::core::date_picker::PickerSlot;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One rebound step is due for this wheel.
    Rebound(PickerSlot),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Spawns a blocking reader that polls the terminal and sends events through
/// `tx`.  Ends once every receiver is gone, checked at least every
/// `poll_rate`.
pub fn spawn_event_reader(tx: EventSender, poll_rate: Duration) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            if !event::poll(poll_rate).unwrap_or(false) {
                continue;
            }
            let app_event = match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });
}
