//! Tokio-backed rebound ticks.
//!
//! Each wheel gets at most one task.  The task holds only a weak reference to
//! the wheel's stop flag and posts [`AppEvent::Rebound`] back to the main
//! loop, which owns the wheel and applies the step there.

use std::sync::Weak;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

use crate::core::date_picker::PickerSlot;
use crate::core::rebound::{ReboundFlag, TickScheduler};

use super::event::{AppEvent, EventSender};

pub struct TokioTickScheduler {
    tx: EventSender,
    slot: PickerSlot,
}

impl TokioTickScheduler {
    pub fn new(tx: EventSender, slot: PickerSlot) -> Self {
        Self { tx, slot }
    }
}

impl TickScheduler for TokioTickScheduler {
    fn schedule(&self, interval: Duration, flag: Weak<ReboundFlag>) {
        let tx = self.tx.clone();
        let slot = self.slot;
        debug!(?slot, ?interval, "starting rebound task");

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(flag) = flag.upgrade() else {
                    break;
                };
                if flag.is_stopped() {
                    continue;
                }
                if tx.send(AppEvent::Rebound(slot)).is_err() {
                    break;
                }
            }
            debug!(?slot, "rebound task finished");
        });
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::core::rebound::{ReboundHandle, TICK_INTERVAL};

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> usize {
        let mut n = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, AppEvent::Rebound(PickerSlot::Day)));
            n += 1;
        }
        n
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_follow_the_flag() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = TokioTickScheduler::new(tx, PickerSlot::Day);
        let handle = ReboundHandle::new();
        scheduler.schedule(TICK_INTERVAL, handle.downgrade());

        time::sleep(Duration::from_millis(35)).await;
        let running = drain(&mut rx);
        assert!((2..=4).contains(&running), "{running} ticks");

        handle.pause();
        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(drain(&mut rx), 0);

        handle.resume();
        time::sleep(Duration::from_millis(25)).await;
        assert!(drain(&mut rx) >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn task_ends_when_wheel_is_gone() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = TokioTickScheduler::new(tx, PickerSlot::Day);
        let handle = ReboundHandle::new();
        scheduler.schedule(TICK_INTERVAL, handle.downgrade());
        drop(scheduler);
        drop(handle);

        // Every sender is dropped once the task notices, closing the channel.
        let closed = time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok());
    }
}
