//! Rebound animation: after release the offset walks back to zero at a
//! fixed speed, one step per tick.
//!
//! The ticking itself is delegated to a [`TickScheduler`], which only ever
//! sees a [`Weak`] handle to the wheel's [`ReboundFlag`].  Once the wheel is
//! dropped the flag goes with it and the scheduler's task winds down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use super::scroll::{Direction, ScrollState};

/// Fixed interval between rebound ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of a single rebound tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReboundStep {
    /// Still travelling; a redraw is due.
    Moving,
    /// Snapped to rest this tick.
    Settled,
}

/// Move `scroll` one step of `speed` toward zero.  Snaps (and settles)
/// when the remaining offset is no longer than a step, so a release at
/// offset `d` settles on tick `ceil(|d| / speed)`.
pub fn rebound_step(scroll: &mut ScrollState, speed: f32, distance: f32) -> ReboundStep {
    let offset = scroll.offset();
    if offset.abs() <= speed || speed <= 0.0 {
        scroll.reset(distance);
        return ReboundStep::Settled;
    }
    if offset < 0.0 {
        scroll.direction = Direction::Down;
        scroll.set_offset(offset + speed, distance);
    } else {
        scroll.direction = Direction::Up;
        scroll.set_offset(offset - speed, distance);
    }
    ReboundStep::Moving
}

/// Stop flag shared between a wheel and its tick source.
#[derive(Debug, Default)]
pub struct ReboundFlag {
    stopped: AtomicBool,
}

impl ReboundFlag {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// The wheel's owning end of the rebound task.
#[derive(Debug)]
pub struct ReboundHandle {
    flag: Arc<ReboundFlag>,
}

impl ReboundHandle {
    /// A fresh, running handle.
    pub fn new() -> Self {
        Self {
            flag: Arc::new(ReboundFlag::default()),
        }
    }

    pub fn pause(&self) {
        self.flag.stopped.store(true, Ordering::Release);
    }

    pub fn resume(&self) {
        self.flag.stopped.store(false, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.is_stopped()
    }

    pub fn downgrade(&self) -> Weak<ReboundFlag> {
        Arc::downgrade(&self.flag)
    }
}

impl Default for ReboundHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of periodic rebound ticks.
///
/// `schedule` is called at most once per wheel.  The implementation should
/// deliver a tick to the wheel every `interval` while `flag` reports running,
/// skip ticks while it reports stopped, and finish once `flag` can no longer
/// be upgraded.
pub trait TickScheduler {
    fn schedule(&self, interval: Duration, flag: Weak<ReboundFlag>);
}

impl<S: TickScheduler + ?Sized> TickScheduler for Box<S> {
    fn schedule(&self, interval: Duration, flag: Weak<ReboundFlag>) {
        (**self).schedule(interval, flag);
    }
}

/// Scheduler that never ticks on its own; tests drive the wheel by hand.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct ManualScheduler {
    scheduled: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl ManualScheduler {
    /// How many rebound tasks have been requested.
    pub(crate) fn scheduled(&self) -> usize {
        self.scheduled.get()
    }
}

#[cfg(test)]
impl TickScheduler for ManualScheduler {
    fn schedule(&self, _interval: Duration, _flag: Weak<ReboundFlag>) {
        self.scheduled.set(self.scheduled.get() + 1);
    }
}
