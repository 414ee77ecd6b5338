//! Input handling: maps key, mouse and rebound events to state mutations.
//!
//! Every handler returns `true` when the screen needs a redraw.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use tracing::debug;

use crate::config::Action;
use crate::core::date_picker::PickerSlot;
use crate::core::picker::TouchEvent;
use crate::core::scroll::Direction;

use super::state::AppState;

/// Process a key press.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return false;
    }

    let Some(action) = state.config.match_key(key) else {
        return false;
    };

    let focus = state.focus;
    match action {
        Action::FocusPrev => move_focus(state, -1),
        Action::FocusNext => move_focus(state, 1),
        // The mouse owns this column until it lets go.
        Action::StepUp | Action::StepDown if state.drag == Some(focus) => return false,
        Action::StepUp => step(state, focus, Direction::Down),
        Action::StepDown => step(state, focus, Direction::Up),
        Action::Confirm => {
            state.confirmed = state.picker.display_string().is_some();
            state.should_quit = true;
            return false;
        }
        Action::Quit => {
            state.should_quit = true;
            return false;
        }
    }
    true
}

/// Process a mouse event.  Left button presses, drags and releases become
/// touch samples on the column under the cursor; the scroll wheel steps it.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> bool {
    let y = mouse.row as f32 * state.cell_height;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let target = state.layout.slot_at(mouse.column, mouse.row);
            // A release outside the terminal never arrives; end that gesture
            // so its wheel can rebound.
            let mut redraw = false;
            if let Some(stale) = state.drag.take() {
                if Some(stale) != target {
                    redraw = state.picker.on_touch(stale, TouchEvent::up(y));
                }
            }
            let Some(slot) = target else {
                return redraw;
            };
            state.focus = slot;
            state.drag = Some(slot);
            state.status_message = None;
            state.picker.on_touch(slot, TouchEvent::down(y));
            true
        }
        MouseEventKind::Drag(MouseButton::Left) => match state.drag {
            Some(slot) => state.picker.on_touch(slot, TouchEvent::moved(y)),
            None => false,
        },
        MouseEventKind::Up(MouseButton::Left) => match state.drag.take() {
            Some(slot) => state.picker.on_touch(slot, TouchEvent::up(y)),
            None => false,
        },
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let Some(slot) = state.layout.slot_at(mouse.column, mouse.row) else {
                return false;
            };
            if state.drag == Some(slot) {
                return false;
            }
            state.focus = slot;
            let direction = if mouse.kind == MouseEventKind::ScrollUp {
                Direction::Down
            } else {
                Direction::Up
            };
            step(state, slot, direction);
            true
        }
        _ => false,
    }
}

/// Advance `slot`'s rebound by one tick.
pub fn handle_rebound(state: &mut AppState, slot: PickerSlot) -> bool {
    if let Some(position) = state.picker.on_rebound_tick(slot) {
        debug!(?slot, position, value = ?state.picker.display_string(), "selection settled");
    }
    state.picker.wheel_mut(slot).take_redraw()
}

fn move_focus(state: &mut AppState, delta: isize) {
    let slots = state.picker.visible_slots();
    if slots.is_empty() {
        return;
    }
    let current = slots.iter().position(|&s| s == state.focus).unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(slots.len() as isize) as usize;
    state.focus = slots[next];
}

fn step(state: &mut AppState, slot: PickerSlot, direction: Direction) {
    state.status_message = None;
    state.picker.nudge(slot, direction);
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::*;
    use crate::config::AppConfig;
    use crate::core::scroll::GesturePhase;

    fn state() -> AppState {
        let mut config = AppConfig::default();
        config.options.style.recycle = false;
        let mut state = AppState::new(config);
        state.relayout(Rect::new(0, 0, 80, 24));
        state
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(state: &mut AppState, kind: MouseEventKind, column: u16, row: u16) -> bool {
        handle_mouse(
            state,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        )
    }

    /// Deliver rebound ticks to `slot` until it comes to rest.
    fn settle(state: &mut AppState, slot: PickerSlot) {
        for _ in 0..100 {
            handle_rebound(state, slot);
            if state.picker.wheel(slot).phase() == GesturePhase::Idle {
                return;
            }
        }
        panic!("{slot:?} never settled");
    }

    fn centre(state: &AppState, slot: PickerSlot) -> (u16, u16) {
        let inner = state.layout.column(slot).map(|c| c.inner).unwrap_or_default();
        (inner.x + inner.width / 2, inner.y + inner.height / 2)
    }

    #[test]
    fn focus_moves_and_wraps() {
        let mut s = state();
        assert_eq!(s.focus, PickerSlot::Year);
        press(&mut s, KeyCode::Right);
        assert_eq!(s.focus, PickerSlot::Month);
        press(&mut s, KeyCode::Left);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.focus, PickerSlot::Minute);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.focus, PickerSlot::Year);
    }

    #[test]
    fn arrow_keys_step_the_focused_wheel() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        settle(&mut s, PickerSlot::Year);
        assert_eq!(s.picker.year(), Some(1971));

        press(&mut s, KeyCode::Up);
        press(&mut s, KeyCode::Up);
        settle(&mut s, PickerSlot::Year);
        assert_eq!(s.picker.year(), Some(1970), "first year does not wrap");
    }

    #[test]
    fn month_step_updates_day_range() {
        let mut s = state();
        press(&mut s, KeyCode::Right);
        press(&mut s, KeyCode::Char('j'));
        settle(&mut s, PickerSlot::Month);
        assert_eq!(s.picker.month(), Some(2));
        assert_eq!(s.picker.day_wheel().adapter().len(), 28);
    }

    #[test]
    fn confirm_and_quit() {
        let mut s = state();
        press(&mut s, KeyCode::Enter);
        assert!(s.should_quit && s.confirmed);

        let mut s = state();
        press(&mut s, KeyCode::Char('q'));
        assert!(s.should_quit && !s.confirmed);

        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit && !s.confirmed);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = state();
        let mut key = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(!handle_key(&mut s, key));
        assert_eq!(s.focus, PickerSlot::Year);
    }

    #[test]
    fn dragging_a_column_selects_the_next_item() {
        let mut s = state();
        let (col, row) = centre(&s, PickerSlot::Month);

        assert!(mouse(&mut s, MouseEventKind::Down(MouseButton::Left), col, row));
        assert_eq!(s.focus, PickerSlot::Month);
        // One row up is 16 units, past half of the 17.5 item distance.
        assert!(mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), col, row - 1));
        assert_eq!(s.picker.month(), Some(2));
        assert!(mouse(&mut s, MouseEventKind::Up(MouseButton::Left), col, row - 1));
        assert_eq!(s.drag, None);

        settle(&mut s, PickerSlot::Month);
        assert_eq!(s.picker.day_wheel().adapter().len(), 28);
    }

    #[test]
    fn drag_keeps_its_column_when_cursor_leaves() {
        let mut s = state();
        let (col, row) = centre(&s, PickerSlot::Hour);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), col, row);
        mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), 0, row - 1);
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), 0, row - 1);
        settle(&mut s, PickerSlot::Hour);
        assert_eq!(s.picker.hour(), Some(1));
    }

    #[test]
    fn scroll_wheel_steps_column_under_cursor() {
        let mut s = state();
        let (col, row) = centre(&s, PickerSlot::Day);
        assert!(mouse(&mut s, MouseEventKind::ScrollDown, col, row));
        assert_eq!(s.focus, PickerSlot::Day);
        settle(&mut s, PickerSlot::Day);
        assert_eq!(s.picker.day(), Some(2));

        assert!(mouse(&mut s, MouseEventKind::ScrollUp, col, row));
        settle(&mut s, PickerSlot::Day);
        assert_eq!(s.picker.day(), Some(1));

        assert!(!mouse(&mut s, MouseEventKind::ScrollDown, 0, 0));
    }

    #[test]
    fn press_elsewhere_releases_a_lost_drag() {
        let mut s = state();
        let (month_col, month_row) = centre(&s, PickerSlot::Month);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), month_col, month_row);
        mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), month_col, month_row - 1);

        // No Up for the month column: the button was released off-screen.
        let (hour_col, hour_row) = centre(&s, PickerSlot::Hour);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), hour_col, hour_row);
        assert_eq!(s.drag, Some(PickerSlot::Hour));
        assert_eq!(s.picker.wheel(PickerSlot::Month).phase(), GesturePhase::Rebounding);
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), hour_col, hour_row);

        settle(&mut s, PickerSlot::Month);
        assert_eq!(s.picker.month(), Some(2));
        assert_eq!(s.picker.day_wheel().adapter().len(), 28);
    }

    #[test]
    fn press_outside_columns_still_releases_a_lost_drag() {
        let mut s = state();
        let (col, row) = centre(&s, PickerSlot::Day);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), col, row);
        assert!(mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(s.drag, None);
        settle(&mut s, PickerSlot::Day);
    }

    #[test]
    fn step_keys_leave_an_active_drag_alone() {
        let mut s = state();
        let (col, row) = centre(&s, PickerSlot::Month);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), col, row);
        assert!(!press(&mut s, KeyCode::Down));
        assert_eq!(s.picker.wheel(PickerSlot::Month).phase(), GesturePhase::Dragging);

        assert!(mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), col, row - 1));
        assert_eq!(s.picker.month(), Some(2));
        assert_eq!(s.picker.wheel(PickerSlot::Month).phase(), GesturePhase::Dragging);

        // Focus moves still work mid-drag, and other columns step as usual.
        press(&mut s, KeyCode::Right);
        assert!(press(&mut s, KeyCode::Down));
        settle(&mut s, PickerSlot::Day);
        assert_eq!(s.picker.day(), Some(2));
    }

    #[test]
    fn click_outside_columns_is_ignored() {
        let mut s = state();
        assert!(!mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(s.drag, None);
        assert!(!mouse(&mut s, MouseEventKind::Drag(MouseButton::Left), 0, 1));
    }
}
