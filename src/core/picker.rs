//! A single scroll wheel: touch-driven offset, index snapping, and the
//! rebound back to rest.
//!
//! The wheel is host-agnostic.  The host feeds it [`TouchEvent`]s and rebound
//! ticks, asks it to [`measure`](PickerWheel::measure), and hands it a
//! [`Canvas`] to paint on whenever [`needs_redraw`](PickerWheel::needs_redraw)
//! is set.

use tracing::debug;

use super::adapter::Adapter;
use super::canvas::Canvas;
use super::geometry::{self, Size, SizeConstraint, TextMeasure};
use super::rebound::{rebound_step, ReboundHandle, ReboundStep, TickScheduler, TICK_INTERVAL};
use super::render::WheelScene;
use super::scroll::{Direction, GesturePhase, ScrollState};
use super::style::{PickerStyle, Rgb};

/// Phase of a pointer/touch sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

/// One pointer sample, `y` in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub y: f32,
}

impl TouchEvent {
    pub fn down(y: f32) -> Self {
        Self {
            phase: TouchPhase::Down,
            y,
        }
    }

    pub fn moved(y: f32) -> Self {
        Self {
            phase: TouchPhase::Move,
            y,
        }
    }

    pub fn up(y: f32) -> Self {
        Self {
            phase: TouchPhase::Up,
            y,
        }
    }
}

/// Type-erased view of a [`PickerWheel`], so wheels over different item
/// types can sit side by side in one container.
pub trait Wheel {
    fn on_touch(&mut self, event: TouchEvent) -> bool;
    fn on_rebound_tick(&mut self) -> Option<usize>;
    fn nudge(&mut self, direction: Direction);
    fn draw(&self, canvas: &mut dyn Canvas) -> Option<String>;
    fn remeasure(&mut self, measure: &dyn TextMeasure);
    fn metrics_stale(&self) -> bool;
    fn measure(&mut self, width: SizeConstraint, height: SizeConstraint) -> Size;
    fn size(&self) -> Size;
    fn natural_size(&self) -> Size;
    fn take_redraw(&mut self) -> bool;
    fn selected_index(&self) -> Option<usize>;
    fn selected_text(&self) -> Option<String>;
    fn phase(&self) -> GesturePhase;
    fn style(&self) -> &PickerStyle;
    fn set_style(&mut self, style: PickerStyle);
    fn set_scheduler(&mut self, scheduler: Box<dyn TickScheduler>);
}

pub struct PickerWheel<T> {
    adapter: Adapter<T>,
    style: PickerStyle,
    scroll: ScrollState,
    phase: GesturePhase,
    last_touch_y: f32,
    max_text_width: f32,
    metrics_stale: bool,
    size: Size,
    rebound: Option<ReboundHandle>,
    scheduler: Option<Box<dyn TickScheduler>>,
    needs_redraw: bool,
}

impl<T> PickerWheel<T> {
    pub fn new(adapter: Adapter<T>, style: PickerStyle) -> Self {
        Self {
            adapter,
            style,
            scroll: ScrollState::default(),
            phase: GesturePhase::Idle,
            last_touch_y: 0.0,
            max_text_width: 0.0,
            metrics_stale: true,
            size: Size::default(),
            rebound: None,
            scheduler: None,
            needs_redraw: true,
        }
    }

    /// Source of rebound ticks.  Without one the host must call
    /// [`on_rebound_tick`](Self::on_rebound_tick) itself.
    pub fn set_scheduler(&mut self, scheduler: impl TickScheduler + 'static) {
        self.scheduler = Some(Box::new(scheduler));
    }

    // ── data ────────────────────────────────────────────────────

    pub fn adapter(&self) -> &Adapter<T> {
        &self.adapter
    }

    /// Mutable access to the adapter.  Call [`remeasure`](Self::remeasure)
    /// afterwards if the texts changed.
    pub fn adapter_mut(&mut self) -> &mut Adapter<T> {
        self.metrics_stale = true;
        self.needs_redraw = true;
        &mut self.adapter
    }

    pub fn set_adapter(&mut self, adapter: Adapter<T>) {
        self.adapter = adapter;
        self.settle_in_place();
        self.metrics_stale = true;
    }

    /// Replace the backing list; the selection resets to the first item.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.adapter.set_items(items);
        self.settle_in_place();
        self.metrics_stale = true;
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.adapter.selected_item()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.adapter.selected_index()
    }

    pub fn selected_text(&self) -> Option<String> {
        self.adapter.selected_text()
    }

    /// Jump straight to `position` without animating or notifying.
    pub fn set_selected_index(&mut self, position: usize) -> bool {
        let changed = self.adapter.set_selected_index(position);
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    // ── style ───────────────────────────────────────────────────

    pub fn style(&self) -> &PickerStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: PickerStyle) {
        self.style = style;
        self.style_changed();
    }

    pub fn selected_text_size(&self) -> f32 {
        self.style.selected_text_size
    }

    pub fn set_selected_text_size(&mut self, size: f32) {
        self.style.selected_text_size = size;
        self.style_changed();
    }

    pub fn unselected_text_size(&self) -> f32 {
        self.style.unselected_text_size
    }

    pub fn set_unselected_text_size(&mut self, size: f32) {
        self.style.unselected_text_size = size;
        self.style_changed();
    }

    pub fn text_padding(&self) -> f32 {
        self.style.text_padding
    }

    pub fn set_text_padding(&mut self, padding: f32) {
        self.style.text_padding = padding;
        self.style_changed();
    }

    pub fn selected_text_color(&self) -> Rgb {
        self.style.selected_text_color
    }

    pub fn set_selected_text_color(&mut self, color: Rgb) {
        self.style.selected_text_color = color;
        self.needs_redraw = true;
    }

    pub fn unselected_text_color(&self) -> Rgb {
        self.style.unselected_text_color
    }

    pub fn set_unselected_text_color(&mut self, color: Rgb) {
        self.style.unselected_text_color = color;
        self.needs_redraw = true;
    }

    pub fn selected_text_alpha(&self) -> f32 {
        self.style.selected_text_alpha
    }

    pub fn set_selected_text_alpha(&mut self, alpha: f32) {
        self.style.selected_text_alpha = alpha;
        self.needs_redraw = true;
    }

    pub fn unselected_text_alpha(&self) -> f32 {
        self.style.unselected_text_alpha
    }

    pub fn set_unselected_text_alpha(&mut self, alpha: f32) {
        self.style.unselected_text_alpha = alpha;
        self.needs_redraw = true;
    }

    pub fn neighbor_count(&self) -> usize {
        self.style.neighbor_count
    }

    pub fn set_neighbor_count(&mut self, count: usize) {
        self.style.neighbor_count = count;
        self.style_changed();
    }

    pub fn is_recycled(&self) -> bool {
        self.style.recycle
    }

    pub fn set_recycled(&mut self, recycle: bool) {
        self.style.recycle = recycle;
        self.needs_redraw = true;
    }

    pub fn speed(&self) -> f32 {
        self.style.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.style.speed = speed;
    }

    fn style_changed(&mut self) {
        let offset = self.scroll.offset();
        self.scroll.set_offset(offset, self.style.item_distance());
        self.metrics_stale = true;
        self.needs_redraw = true;
    }

    // ── measurement ─────────────────────────────────────────────

    /// `true` after the data or text sizes changed and before the next
    /// [`remeasure`](Self::remeasure).
    pub fn metrics_stale(&self) -> bool {
        self.metrics_stale
    }

    /// Recompute the widest item text at the selected size.
    pub fn remeasure(&mut self, measure: &dyn TextMeasure) {
        let texts = (0..self.adapter.len()).filter_map(|i| self.adapter.text(i));
        self.max_text_width =
            geometry::max_text_width(measure, texts, self.style.selected_text_size);
        self.metrics_stale = false;
        self.needs_redraw = true;
        debug!(width = self.max_text_width, items = self.adapter.len(), "wheel remeasured");
    }

    pub fn max_text_width(&self) -> f32 {
        self.max_text_width
    }

    /// Resolve this wheel's size against the host's constraints.
    pub fn measure(&mut self, width: SizeConstraint, height: SizeConstraint) -> Size {
        let size = geometry::measure(&self.style, self.max_text_width, width, height);
        if size != self.size {
            self.needs_redraw = true;
        }
        self.size = size;
        size
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Size the wheel would take if the host imposed nothing.
    pub fn natural_size(&self) -> Size {
        geometry::measure(
            &self.style,
            self.max_text_width,
            SizeConstraint::Unspecified,
            SizeConstraint::Unspecified,
        )
    }

    // ── interaction ─────────────────────────────────────────────

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn direction(&self) -> Direction {
        self.scroll.direction
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Feed one touch sample.  Returns `true` when the wheel needs a redraw.
    pub fn on_touch(&mut self, event: TouchEvent) -> bool {
        match event.phase {
            TouchPhase::Down => {
                self.on_down(event.y);
                false
            }
            TouchPhase::Move => self.on_move(event.y),
            TouchPhase::Up => {
                self.on_up();
                true
            }
        }
    }

    fn on_down(&mut self, y: f32) {
        if let Some(rebound) = &self.rebound {
            rebound.pause();
        }
        self.last_touch_y = y;
        self.phase = GesturePhase::Dragging;
    }

    fn on_move(&mut self, y: f32) -> bool {
        if self.phase != GesturePhase::Dragging || self.adapter.is_empty() {
            return false;
        }
        let delta = y - self.last_touch_y;
        self.last_touch_y = y;
        if delta == 0.0 {
            return false;
        }

        let recycle = self.style.recycle;
        if delta > 0.0 {
            self.scroll.direction = Direction::Down;
            if !recycle && self.adapter.is_first() {
                return false;
            }
        } else {
            self.scroll.direction = Direction::Up;
            if !recycle && self.adapter.is_last() {
                return false;
            }
        }

        let distance = self.style.item_distance();
        let half = distance / 2.0;
        let before = self.adapter.selected_index();
        let mut offset = self.scroll.offset() + delta;

        while offset > half {
            if !recycle && self.adapter.is_first() {
                offset = half;
                break;
            }
            self.adapter.select_prev(recycle);
            offset -= distance;
        }
        while offset < -half {
            if !recycle && self.adapter.is_last() {
                offset = -half;
                break;
            }
            self.adapter.select_next(recycle);
            offset += distance;
        }

        self.scroll.set_offset(offset, distance);
        let after = self.adapter.selected_index();
        if after != before {
            debug!(?before, ?after, offset, "wheel index changed");
        }
        self.needs_redraw = true;
        true
    }

    fn on_up(&mut self) {
        self.phase = GesturePhase::Rebounding;
        self.needs_redraw = true;
        if let Some(rebound) = &self.rebound {
            rebound.resume();
            return;
        }
        let rebound = ReboundHandle::new();
        if let Some(scheduler) = &self.scheduler {
            scheduler.schedule(TICK_INTERVAL, rebound.downgrade());
        }
        self.rebound = Some(rebound);
    }

    /// Advance the rebound by one tick.  Returns the selected position when
    /// the wheel settled on this tick (the delegate has been notified).
    /// Ticks that arrive while no rebound is running are ignored.
    pub fn on_rebound_tick(&mut self) -> Option<usize> {
        if self.phase != GesturePhase::Rebounding {
            return None;
        }
        let rebound = self.rebound.as_ref()?;
        if rebound.is_stopped() {
            return None;
        }

        self.needs_redraw = true;
        match rebound_step(&mut self.scroll, self.style.speed, self.style.item_distance()) {
            ReboundStep::Moving => None,
            ReboundStep::Settled => {
                rebound.pause();
                self.phase = GesturePhase::Idle;
                let selected = self.adapter.notify_selected();
                debug!(?selected, "wheel settled");
                selected
            }
        }
    }

    /// Synthesise a complete drag of exactly one item in `direction`
    /// (`Up` = next item, `Down` = previous) and release it.
    pub fn nudge(&mut self, direction: Direction) {
        let travel = self.style.item_distance() * -direction.sign();
        let start = self.last_touch_y;
        self.on_touch(TouchEvent::down(start));
        self.on_touch(TouchEvent::moved(start + travel));
        self.on_touch(TouchEvent::up(start + travel));
    }

    fn settle_in_place(&mut self) {
        if let Some(rebound) = &self.rebound {
            rebound.pause();
        }
        self.phase = GesturePhase::Idle;
        self.scroll.reset(self.style.item_distance());
        self.needs_redraw = true;
    }

    // ── rendering ───────────────────────────────────────────────

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Read and clear the redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Paint the current frame.  Returns the centred text, if any.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> Option<String> {
        WheelScene {
            adapter: &self.adapter,
            style: &self.style,
            scroll: &self.scroll,
            size: self.size,
            max_text_width: self.max_text_width,
        }
        .draw(canvas)
    }
}

impl<T> Wheel for PickerWheel<T> {
    fn on_touch(&mut self, event: TouchEvent) -> bool {
        PickerWheel::on_touch(self, event)
    }

    fn on_rebound_tick(&mut self) -> Option<usize> {
        PickerWheel::on_rebound_tick(self)
    }

    fn nudge(&mut self, direction: Direction) {
        PickerWheel::nudge(self, direction)
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> Option<String> {
        PickerWheel::draw(self, canvas)
    }

    fn remeasure(&mut self, measure: &dyn TextMeasure) {
        PickerWheel::remeasure(self, measure)
    }

    fn metrics_stale(&self) -> bool {
        PickerWheel::metrics_stale(self)
    }

    fn measure(&mut self, width: SizeConstraint, height: SizeConstraint) -> Size {
        PickerWheel::measure(self, width, height)
    }

    fn size(&self) -> Size {
        PickerWheel::size(self)
    }

    fn natural_size(&self) -> Size {
        PickerWheel::natural_size(self)
    }

    fn take_redraw(&mut self) -> bool {
        PickerWheel::take_redraw(self)
    }

    fn selected_index(&self) -> Option<usize> {
        PickerWheel::selected_index(self)
    }

    fn selected_text(&self) -> Option<String> {
        PickerWheel::selected_text(self)
    }

    fn phase(&self) -> GesturePhase {
        PickerWheel::phase(self)
    }

    fn style(&self) -> &PickerStyle {
        PickerWheel::style(self)
    }

    fn set_style(&mut self, style: PickerStyle) {
        PickerWheel::set_style(self, style)
    }

    fn set_scheduler(&mut self, scheduler: Box<dyn TickScheduler>) {
        PickerWheel::set_scheduler(self, scheduler)
    }
}
