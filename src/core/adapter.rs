//! The data side of a wheel: backing items, current selection, and the
//! per-item text projection / selection callback.

use std::fmt::{self, Display};

/// Item-specific behaviour plugged into an [`Adapter`].
pub trait PickerDelegate<T> {
    /// Text shown for `item`, which lives at `position`.
    fn text(&self, item: &T, position: usize) -> String;

    /// Called once the wheel comes to rest on `item`.
    fn on_select(&mut self, _item: &T, _position: usize) {}
}

/// Delegate that renders items through [`Display`] and ignores selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDelegate;

impl<T: Display> PickerDelegate<T> for TextDelegate {
    fn text(&self, item: &T, _position: usize) -> String {
        item.to_string()
    }
}

/// Backing list plus selection.  The selection is `None` exactly when
/// the list is empty or nothing has been chosen; otherwise it is a valid
/// position.
pub struct Adapter<T> {
    items: Vec<T>,
    selected: Option<usize>,
    delegate: Box<dyn PickerDelegate<T>>,
}

impl<T> Adapter<T> {
    /// Adapter selecting the first item (or nothing if `items` is empty).
    pub fn new(items: Vec<T>, delegate: impl PickerDelegate<T> + 'static) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self {
            items,
            selected,
            delegate: Box::new(delegate),
        }
    }

    /// Adapter with an explicit initial selection.  An index past the end
    /// falls back to the first item.
    pub fn with_selection(
        items: Vec<T>,
        selected: usize,
        delegate: impl PickerDelegate<T> + 'static,
    ) -> Self {
        let mut adapter = Self::new(items, delegate);
        if selected < adapter.items.len() {
            adapter.selected = Some(selected);
        }
        adapter
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Display text for the item at `position`.
    pub fn text(&self, position: usize) -> Option<String> {
        let item = self.items.get(position)?;
        Some(self.delegate.text(item, position))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected?)
    }

    pub fn selected_text(&self) -> Option<String> {
        self.text(self.selected?)
    }

    /// Select `position`.  Returns `false` (and changes nothing) if it is
    /// out of range.
    pub fn set_selected_index(&mut self, position: usize) -> bool {
        if position >= self.items.len() {
            return false;
        }
        self.selected = Some(position);
        true
    }

    /// Replace the backing list; selection resets to the first item.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.selected = if items.is_empty() { None } else { Some(0) };
        self.items = items;
    }

    /// Fire the delegate's `on_select` for the current selection.
    pub fn notify_selected(&mut self) -> Option<usize> {
        let position = self.selected?;
        let item = self.items.get(position)?;
        self.delegate.on_select(item, position);
        Some(position)
    }

    /// Advance to the following item.  Wraps when `recycle` is set,
    /// otherwise stays on the last item.
    pub fn select_next(&mut self, recycle: bool) {
        let len = self.items.len();
        let Some(current) = self.selected else {
            return;
        };
        if current + 1 < len {
            self.selected = Some(current + 1);
        } else if recycle {
            self.selected = Some(0);
        }
    }

    /// Step back to the preceding item.  Wraps when `recycle` is set,
    /// otherwise stays on the first item.
    pub fn select_prev(&mut self, recycle: bool) {
        let len = self.items.len();
        let Some(current) = self.selected else {
            return;
        };
        if current > 0 {
            self.selected = Some(current - 1);
        } else if recycle {
            self.selected = Some(len - 1);
        }
    }

    /// Map a possibly out-of-range position (e.g. `selected ± k`) onto the
    /// list.  Wraps modulo the length when `recycle` is set, otherwise
    /// anything outside `0..len` is `None`.
    pub fn resolve_index(&self, position: i64, recycle: bool) -> Option<usize> {
        let len = self.items.len() as i64;
        if len == 0 {
            return None;
        }
        if recycle {
            Some(position.rem_euclid(len) as usize)
        } else if (0..len).contains(&position) {
            Some(position as usize)
        } else {
            None
        }
    }

    pub fn is_first(&self) -> bool {
        self.selected == Some(0)
    }

    pub fn is_last(&self) -> bool {
        matches!(self.selected, Some(i) if i + 1 == self.items.len())
    }
}

impl<T: fmt::Debug> fmt::Debug for Adapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl<T: Display + 'static> Default for Adapter<T> {
    fn default() -> Self {
        Self::new(Vec::new(), TextDelegate)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn numbers(n: u32) -> Adapter<u32> {
        Adapter::new((1..=n).collect(), TextDelegate)
    }

    #[test]
    fn empty_list_has_no_selection() {
        let adapter: Adapter<u32> = Adapter::default();
        assert_eq!(adapter.selected_index(), None);
        assert_eq!(adapter.selected_item(), None);
        assert_eq!(adapter.selected_text(), None);
    }

    #[test]
    fn set_items_resets_selection() {
        let mut adapter = numbers(5);
        adapter.set_selected_index(3);
        adapter.set_items(vec![7, 8]);
        assert_eq!(adapter.selected_index(), Some(0));
        adapter.set_items(Vec::new());
        assert_eq!(adapter.selected_index(), None);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut adapter = numbers(3);
        assert!(!adapter.set_selected_index(3));
        assert_eq!(adapter.selected_index(), Some(0));
        let adapter = Adapter::with_selection(vec![1, 2, 3], 9, TextDelegate);
        assert_eq!(adapter.selected_index(), Some(0));
    }

    #[test]
    fn next_wraps_only_when_recycling() {
        for count in 1..=6 {
            for k in 0..count {
                let mut adapter = numbers(count as u32);
                adapter.set_selected_index(k);
                adapter.select_next(true);
                assert_eq!(adapter.selected_index(), Some((k + 1) % count));
            }
            let mut adapter = numbers(count as u32);
            adapter.set_selected_index(count - 1);
            adapter.select_next(false);
            assert_eq!(adapter.selected_index(), Some(count - 1));
        }
    }

    #[test]
    fn prev_wraps_only_when_recycling() {
        let mut adapter = numbers(4);
        adapter.select_prev(false);
        assert_eq!(adapter.selected_index(), Some(0));
        adapter.select_prev(true);
        assert_eq!(adapter.selected_index(), Some(3));
    }

    #[test]
    fn resolve_index_wraps_both_directions() {
        let adapter = numbers(5);
        assert_eq!(adapter.resolve_index(-1, true), Some(4));
        assert_eq!(adapter.resolve_index(-6, true), Some(4));
        assert_eq!(adapter.resolve_index(7, true), Some(2));
        assert_eq!(adapter.resolve_index(-1, false), None);
        assert_eq!(adapter.resolve_index(5, false), None);
        assert_eq!(adapter.resolve_index(4, false), Some(4));
    }

    struct Recorder(Rc<RefCell<Vec<(u32, usize)>>>);

    impl PickerDelegate<u32> for Recorder {
        fn text(&self, item: &u32, _position: usize) -> String {
            format!("{item:02}")
        }

        fn on_select(&mut self, item: &u32, position: usize) {
            self.0.borrow_mut().push((*item, position));
        }
    }

    #[test]
    fn delegate_projects_text_and_receives_selection() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = Adapter::with_selection(vec![5, 6, 7], 1, Recorder(Rc::clone(&log)));
        assert_eq!(adapter.text(0).as_deref(), Some("05"));
        assert_eq!(adapter.selected_text().as_deref(), Some("06"));
        assert_eq!(adapter.notify_selected(), Some(1));
        assert_eq!(*log.borrow(), vec![(6, 1)]);
    }
}
