//! Layout helpers: split the terminal into picker columns and a status bar.

use ratatui::layout::{Constraint, Flex, Layout, Margin, Position, Rect};

use crate::core::date_picker::{DateTimePicker, PickerSlot};

/// One bordered wheel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerColumn {
    pub slot: PickerSlot,
    /// Including the border.
    pub area: Rect,
    /// Where the wheel itself paints.
    pub inner: Rect,
}

/// Primary screen layout: a centred band of picker columns and a bottom
/// status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub columns: Vec<PickerColumn>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Lay out `columns` (slot and inner width) with `gap` columns between
    /// them, each `rows` tall inside its border.
    pub fn new(area: Rect, columns: &[(PickerSlot, u16)], rows: u16, gap: u16) -> Self {
        let [body, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let [band] = Layout::vertical([Constraint::Length(rows.saturating_add(2))])
            .flex(Flex::Center)
            .areas(body);

        let widths = columns
            .iter()
            .map(|&(_, width)| Constraint::Length(width.saturating_add(2)));
        let rects = Layout::horizontal(widths)
            .flex(Flex::Center)
            .spacing(gap)
            .split(band);

        let columns = columns
            .iter()
            .zip(rects.iter())
            .map(|(&(slot, _), &area)| PickerColumn {
                slot,
                area,
                inner: area.inner(Margin::new(1, 1)),
            })
            .collect();

        Self {
            columns,
            status_area,
        }
    }

    /// Size every visible wheel of `picker` to its natural extent.  Vertical
    /// units are converted to rows with `cell_height`.
    pub fn for_picker(area: Rect, picker: &DateTimePicker, cell_height: f32) -> Self {
        let cell_height = cell_height.max(1.0);
        let mut rows = 0;
        let columns: Vec<(PickerSlot, u16)> = picker
            .visible_slots()
            .into_iter()
            .map(|slot| {
                let natural = picker.wheel(slot).natural_size();
                rows = rows.max((natural.height / cell_height).ceil() as u16);
                // Titles are drawn as " label ".
                let label = slot.label().len() as u16 + 2;
                (slot, (natural.width.ceil() as u16).max(label))
            })
            .collect();
        let gap = picker.margin_inner().max(0.0).round() as u16;
        Self::new(area, &columns, rows, gap)
    }

    pub fn column(&self, slot: PickerSlot) -> Option<&PickerColumn> {
        self.columns.iter().find(|c| c.slot == slot)
    }

    /// Column under a terminal cell, border included.
    pub fn slot_at(&self, col: u16, row: u16) -> Option<PickerSlot> {
        let pos = Position::new(col, row);
        self.columns
            .iter()
            .find(|c| c.area.contains(pos))
            .map(|c| c.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date_picker::DatePickerOptions;
    use crate::core::style::PickerStyle;
    use crate::ui::term_canvas::TermMeasure;

    #[test]
    fn columns_are_centred_with_gap() {
        let area = Rect::new(0, 0, 40, 12);
        let layout = AppLayout::new(
            area,
            &[(PickerSlot::Hour, 4), (PickerSlot::Minute, 4)],
            5,
            2,
        );

        assert_eq!(layout.status_area, Rect::new(0, 11, 40, 1));
        let [hour, minute] = [layout.columns[0], layout.columns[1]];
        assert_eq!(hour.area.width, 6);
        assert_eq!(hour.area.height, 7);
        assert_eq!(minute.area.x - hour.area.right(), 2);
        assert_eq!(hour.area.x - area.x, area.right() - minute.area.right());
        assert_eq!(hour.inner, Rect::new(hour.area.x + 1, hour.area.y + 1, 4, 5));
    }

    #[test]
    fn hit_testing_finds_column_under_cursor() {
        let layout = AppLayout::new(
            Rect::new(0, 0, 40, 12),
            &[(PickerSlot::Hour, 4), (PickerSlot::Minute, 4)],
            5,
            2,
        );
        let hour = layout.columns[0].area;
        let minute = layout.columns[1].area;
        assert_eq!(layout.slot_at(hour.x, hour.y), Some(PickerSlot::Hour));
        assert_eq!(layout.slot_at(minute.x + 3, minute.y + 3), Some(PickerSlot::Minute));
        assert_eq!(layout.slot_at(hour.right(), hour.y + 1), None);
        assert_eq!(layout.slot_at(0, 11), None);
    }

    #[test]
    fn picker_columns_fit_text_and_labels() {
        let mut picker = DateTimePicker::new(DatePickerOptions {
            margin_inner: 1.0,
            style: PickerStyle {
                selected_text_size: 16.0,
                unselected_text_size: 13.0,
                text_padding: 3.0,
                neighbor_count: 2,
                ..PickerStyle::default()
            },
            ..DatePickerOptions::default()
        });
        for slot in PickerSlot::ALL {
            picker.wheel_mut(slot).remeasure(&TermMeasure);
        }

        let layout = AppLayout::for_picker(Rect::new(0, 0, 80, 24), &picker, 16.0);
        let widths: Vec<u16> = layout.columns.iter().map(|c| c.inner.width).collect();
        // Every padded title (" Year ", " Minute ") is wider than its text.
        assert_eq!(widths, [6, 7, 5, 6, 8]);
        // 16 + (13 + 3) * 2 * 2 = 80 units = 5 rows.
        assert!(layout.columns.iter().all(|c| c.inner.height == 5));
        assert_eq!(layout.column(PickerSlot::Day).map(|c| c.slot), Some(PickerSlot::Day));
    }
}
