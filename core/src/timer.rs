use serde::{Deserialize, Serialize};

use crate::*;

/// Identifies one scheduled task, used for cancellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerTask {
    /// Flip a mismatched pair back face-down.
    MismatchReversal,
    /// One frame of the end-of-round animation, repeats until stopped.
    AnimationTick,
    /// Ends the end-of-round animation.
    AnimationStop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    handle: TaskHandle,
    task: TimerTask,
    due: Millis,
    period: Option<Millis>,
}

/// A task whose deadline was reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FiredTask {
    pub handle: TaskHandle,
    pub task: TimerTask,
    pub at: Millis,
}

/// Owns every delayed task of the engine on a logical clock.
///
/// There is at most one pending mismatch reversal and at most one running
/// animation (its interval plus the auto-stop timer). Cancelling a handle that
/// already fired or was never scheduled is a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerCoordinator {
    now: Millis,
    next_handle: u32,
    mismatch: Option<Pending>,
    animation_tick: Option<Pending>,
    animation_stop: Option<Pending>,
}

impl TimerCoordinator {
    pub fn new(now: Millis) -> Self {
        Self {
            now,
            next_handle: 0,
            mismatch: None,
            animation_tick: None,
            animation_stop: None,
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn is_mismatch_pending(&self) -> bool {
        self.mismatch.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animation_tick.is_some() || self.animation_stop.is_some()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.slots().any(|pending| pending.handle == handle)
    }

    pub fn schedule_mismatch_reversal(&mut self, delay: Millis) -> TaskHandle {
        if let Some(previous) = self.mismatch.take() {
            log::warn!(
                "replacing pending mismatch reversal {:?} due at {}",
                previous.handle,
                previous.due
            );
        }
        let pending = self.make_pending(TimerTask::MismatchReversal, delay, None);
        self.mismatch = Some(pending);
        pending.handle
    }

    /// Starts the animation interval and its auto-stop timer, replacing any
    /// animation already running.
    pub fn start_animation(
        &mut self,
        period: Millis,
        duration: Millis,
    ) -> (TaskHandle, TaskHandle) {
        self.cancel_animation();
        let tick = self.make_pending(TimerTask::AnimationTick, period, Some(period));
        let stop = self.make_pending(TimerTask::AnimationStop, duration, None);
        self.animation_tick = Some(tick);
        self.animation_stop = Some(stop);
        (tick.handle, stop.handle)
    }

    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        for slot in [
            &mut self.mismatch,
            &mut self.animation_tick,
            &mut self.animation_stop,
        ] {
            if slot.as_ref().is_some_and(|pending| pending.handle == handle) {
                *slot = None;
                return true;
            }
        }
        false
    }

    pub fn cancel_mismatch(&mut self) -> bool {
        self.mismatch.take().is_some()
    }

    /// Cancels both animation timers, returns whether any was running.
    pub fn cancel_animation(&mut self) -> bool {
        let tick = self.animation_tick.take().is_some();
        let stop = self.animation_stop.take().is_some();
        tick || stop
    }

    /// Earliest deadline among pending tasks.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.slots().map(|pending| pending.due).min()
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its
    /// deadline. Ties go to the task scheduled first. Interval tasks are
    /// rescheduled one period later under the same handle.
    pub fn pop_due(&mut self, until: Millis) -> Option<FiredTask> {
        let next = self
            .slots()
            .filter(|pending| pending.due <= until)
            .min_by_key(|pending| (pending.due, pending.handle))?;

        let slot = match next.task {
            TimerTask::MismatchReversal => &mut self.mismatch,
            TimerTask::AnimationTick => &mut self.animation_tick,
            TimerTask::AnimationStop => &mut self.animation_stop,
        };
        *slot = next.period.map(|period| Pending {
            due: next.due + period,
            ..next
        });

        self.now = self.now.max(next.due);
        Some(FiredTask {
            handle: next.handle,
            task: next.task,
            at: next.due,
        })
    }

    /// Moves the clock forward without firing anything. The clock never goes back.
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    fn make_pending(&mut self, task: TimerTask, delay: Millis, period: Option<Millis>) -> Pending {
        let handle = TaskHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        Pending {
            handle,
            task,
            due: self.now.saturating_add(delay),
            period,
        }
    }

    fn slots(&self) -> impl Iterator<Item = Pending> + use<> {
        [self.mismatch, self.animation_tick, self.animation_stop]
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn drain(timers: &mut TimerCoordinator, until: Millis) -> Vec<(TimerTask, Millis)> {
        let mut fired = Vec::new();
        while let Some(task) = timers.pop_due(until) {
            fired.push((task.task, task.at));
        }
        timers.set_now(until);
        fired
    }

    #[test]
    fn mismatch_fires_once_after_delay() {
        let mut timers = TimerCoordinator::new(100);
        timers.schedule_mismatch_reversal(WAITING_PERIOD);

        assert_eq!(timers.next_deadline(), Some(1100));
        assert!(drain(&mut timers, 1099).is_empty());
        assert_eq!(
            drain(&mut timers, 1100),
            [(TimerTask::MismatchReversal, 1100)]
        );
        assert!(!timers.is_mismatch_pending());
        assert_eq!(timers.next_deadline(), None);
    }

    #[test]
    fn animation_ticks_until_stop() {
        let mut timers = TimerCoordinator::new(0);
        timers.start_animation(ANIMATION_PERIOD, ANIMATION_DURATION);

        let fired = drain(&mut timers, 20_000);
        let ticks = fired
            .iter()
            .filter(|(task, _)| *task == TimerTask::AnimationTick)
            .count();

        // the stop timer does not cancel the interval by itself
        assert!(ticks > 16);
        assert!(fired.contains(&(TimerTask::AnimationStop, ANIMATION_DURATION)));
    }

    #[test]
    fn tick_scheduled_first_wins_ties() {
        let mut timers = TimerCoordinator::new(0);
        timers.start_animation(ANIMATION_PERIOD, ANIMATION_DURATION);

        let fired = drain(&mut timers, ANIMATION_DURATION);
        assert_eq!(fired.len(), 17);
        assert_eq!(fired[15], (TimerTask::AnimationTick, ANIMATION_DURATION));
        assert_eq!(fired[16], (TimerTask::AnimationStop, ANIMATION_DURATION));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = TimerCoordinator::new(0);
        let handle = timers.schedule_mismatch_reversal(WAITING_PERIOD);

        assert!(timers.is_pending(handle));
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(!timers.cancel_mismatch());
        assert!(!timers.cancel_animation());
        assert!(drain(&mut timers, 5000).is_empty());
    }

    #[test]
    fn restarting_animation_replaces_handles() {
        let mut timers = TimerCoordinator::new(0);
        let (tick, stop) = timers.start_animation(ANIMATION_PERIOD, ANIMATION_DURATION);
        let (new_tick, new_stop) = timers.start_animation(ANIMATION_PERIOD, ANIMATION_DURATION);

        assert!(!timers.is_pending(tick));
        assert!(!timers.is_pending(stop));
        assert!(timers.is_pending(new_tick));
        assert!(timers.is_pending(new_stop));
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut timers = TimerCoordinator::new(500);
        timers.set_now(200);
        assert_eq!(timers.now(), 500);
    }
}
