//! Year, month, day, hour and minute wheels wired into one date/time
//! picker.  Settling the year or month wheel recomputes the day range.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use super::adapter::{Adapter, TextDelegate};
use super::calendar::days_in_month;
use super::picker::{PickerWheel, TouchEvent, Wheel};
use super::scroll::Direction;
use super::style::PickerStyle;

/// One column of the date/time picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerSlot {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl PickerSlot {
    pub const ALL: [PickerSlot; 5] = [
        PickerSlot::Year,
        PickerSlot::Month,
        PickerSlot::Day,
        PickerSlot::Hour,
        PickerSlot::Minute,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PickerSlot::Year => "Year",
            PickerSlot::Month => "Month",
            PickerSlot::Day => "Day",
            PickerSlot::Hour => "Hour",
            PickerSlot::Minute => "Minute",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, PickerSlot::Year | PickerSlot::Month | PickerSlot::Day)
    }
}

/// Construction options for [`DateTimePicker`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatePickerOptions {
    pub start_year: i32,
    pub end_year: i32,
    pub selected_year: i32,
    /// 1-based.
    pub selected_month: u32,
    /// Gap between adjacent wheels, in canvas units.
    pub margin_inner: f32,
    pub show_date: bool,
    pub show_time: bool,
    /// Applied to every wheel.
    pub style: PickerStyle,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            start_year: 1970,
            end_year: 2050,
            selected_year: 1970,
            selected_month: 1,
            margin_inner: 30.0,
            show_date: true,
            show_time: true,
            style: PickerStyle::default(),
        }
    }
}

pub struct DateTimePicker {
    year: PickerWheel<i32>,
    month: PickerWheel<u32>,
    day: PickerWheel<u32>,
    hour: PickerWheel<String>,
    minute: PickerWheel<String>,
    margin_inner: f32,
    show_date: bool,
    show_time: bool,
}

impl DateTimePicker {
    pub fn new(options: DatePickerOptions) -> Self {
        let style = options.style;

        let years: Vec<i32> = (options.start_year..=options.end_year).collect();
        let year_index = years
            .iter()
            .position(|&y| y == options.selected_year)
            .unwrap_or(0);
        let month_index = options.selected_month.clamp(1, 12) as usize - 1;

        let mut picker = Self {
            year: PickerWheel::new(
                Adapter::with_selection(years, year_index, TextDelegate),
                style.clone(),
            ),
            month: PickerWheel::new(
                Adapter::with_selection((1..=12).collect(), month_index, TextDelegate),
                style.clone(),
            ),
            day: PickerWheel::new(Adapter::new((1..=31).collect(), TextDelegate), style.clone()),
            hour: PickerWheel::new(Adapter::new(padded(0..24), TextDelegate), style.clone()),
            minute: PickerWheel::new(Adapter::new(padded(0..60), TextDelegate), style),
            margin_inner: options.margin_inner,
            show_date: options.show_date,
            show_time: options.show_time,
        };
        picker.update_days();
        picker
    }

    /// Slots currently shown, left to right.
    pub fn visible_slots(&self) -> Vec<PickerSlot> {
        PickerSlot::ALL
            .into_iter()
            .filter(|slot| if slot.is_date() { self.show_date } else { self.show_time })
            .collect()
    }

    pub fn margin_inner(&self) -> f32 {
        self.margin_inner
    }

    pub fn wheel(&self, slot: PickerSlot) -> &dyn Wheel {
        match slot {
            PickerSlot::Year => &self.year,
            PickerSlot::Month => &self.month,
            PickerSlot::Day => &self.day,
            PickerSlot::Hour => &self.hour,
            PickerSlot::Minute => &self.minute,
        }
    }

    pub fn wheel_mut(&mut self, slot: PickerSlot) -> &mut dyn Wheel {
        match slot {
            PickerSlot::Year => &mut self.year,
            PickerSlot::Month => &mut self.month,
            PickerSlot::Day => &mut self.day,
            PickerSlot::Hour => &mut self.hour,
            PickerSlot::Minute => &mut self.minute,
        }
    }

    pub fn set_style(&mut self, style: PickerStyle) {
        for slot in PickerSlot::ALL {
            self.wheel_mut(slot).set_style(style.clone());
        }
    }

    pub fn on_touch(&mut self, slot: PickerSlot, event: TouchEvent) -> bool {
        self.wheel_mut(slot).on_touch(event)
    }

    pub fn nudge(&mut self, slot: PickerSlot, direction: Direction) {
        self.wheel_mut(slot).nudge(direction);
    }

    /// Forward a rebound tick to `slot`.  Returns the settled position, if
    /// the wheel came to rest on this tick.
    pub fn on_rebound_tick(&mut self, slot: PickerSlot) -> Option<usize> {
        let settled = self.wheel_mut(slot).on_rebound_tick()?;
        if matches!(slot, PickerSlot::Year | PickerSlot::Month) {
            self.update_days();
        }
        Some(settled)
    }

    /// Resize the day list to the selected month, keeping the chosen day
    /// where it still exists.
    fn update_days(&mut self) {
        let (Some(year), Some(month)) = (self.year(), self.month()) else {
            return;
        };
        let count = days_in_month(year, month) as usize;
        if self.day.adapter().len() == count {
            return;
        }
        let keep = self.day.selected_index().unwrap_or(0).min(count - 1);
        self.day.set_items((1..=count as u32).collect());
        self.day.set_selected_index(keep);
        debug!(year, month, days = count, "day range updated");
    }

    // ── aggregate getters ───────────────────────────────────────

    pub fn year(&self) -> Option<i32> {
        self.year.selected_item().copied()
    }

    pub fn month(&self) -> Option<u32> {
        self.month.selected_item().copied()
    }

    pub fn day(&self) -> Option<u32> {
        self.day.selected_item().copied()
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour.selected_item()?.parse().ok()
    }

    pub fn minute(&self) -> Option<u32> {
        self.minute.selected_item()?.parse().ok()
    }

    /// Zero-padded hour, e.g. `"07"`.
    pub fn hour_text(&self) -> Option<String> {
        self.hour.selected_item().cloned()
    }

    /// Zero-padded minute, e.g. `"05"`.
    pub fn minute_text(&self) -> Option<String> {
        self.minute.selected_item().cloned()
    }

    /// `Y-M-D` without padding, e.g. `"2024-2-9"`.
    pub fn date_string(&self) -> Option<String> {
        Some(format!("{}-{}-{}", self.year()?, self.month()?, self.day()?))
    }

    /// `Y-M-D HH:MM`, e.g. `"2024-2-9 07:05"`.
    pub fn date_time_string(&self) -> Option<String> {
        Some(format!(
            "{} {}:{}",
            self.date_string()?,
            self.hour_text()?,
            self.minute_text()?
        ))
    }

    /// The value as shown to the user: date and time, or whichever half is
    /// visible.  `None` when nothing is visible or a wheel is empty.
    pub fn display_string(&self) -> Option<String> {
        match (self.show_date, self.show_time) {
            (true, true) => self.date_time_string(),
            (true, false) => self.date_string(),
            (false, true) => Some(format!("{}:{}", self.hour_text()?, self.minute_text()?)),
            (false, false) => None,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year()?, self.month()?, self.day()?)
    }

    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.date()?.and_hms_opt(self.hour()?, self.minute()?, 0)
    }

    pub fn year_wheel(&self) -> &PickerWheel<i32> {
        &self.year
    }

    pub fn day_wheel(&self) -> &PickerWheel<u32> {
        &self.day
    }
}

fn padded(range: std::ops::Range<u32>) -> Vec<String> {
    range.map(|n| format!("{n:02}")).collect()
}
