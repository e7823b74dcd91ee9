//! Fire-once alarms owned by the host environment.
//!
//! The session never sleeps; it registers an [`Alarm`] and the driver hands
//! fired alarms back through [`Scheduler::poll_fired`]. Cancelling a handle
//! removes the alarm outright, including one that already fired but has not
//! been polled yet, so a stale bite can never reach a later state.

use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alarm {
    Bite,
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub trait Scheduler {
    fn schedule_once(&mut self, delay: Duration, alarm: Alarm) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    /// Next fired alarm, oldest first.
    fn poll_fired(&mut self) -> Option<Alarm>;
}

#[derive(Clone, Copy, Debug)]
struct PendingAlarm {
    handle: TimerHandle,
    due: Duration,
    alarm: Alarm,
}

/// Fake clock for tests and the headless driver. Time only moves on
/// [`advance`](ManualScheduler::advance).
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: SmallVec<[PendingAlarm; 2]>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Number of alarms scheduled and not yet polled or cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn pending_of(&self, alarm: Alarm) -> usize {
        self.pending.iter().filter(|p| p.alarm == alarm).count()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Time left until `handle` fires, if it is still pending.
    pub fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.pending
            .iter()
            .find(|p| p.handle == handle)
            .map(|p| p.due.saturating_sub(self.now))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration, alarm: Alarm) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingAlarm {
            handle,
            due: self.now + delay,
            alarm,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }

    fn poll_fired(&mut self) -> Option<Alarm> {
        let now = self.now;
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.handle))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(idx).alarm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alarms_fire_only_after_their_delay() {
        let mut s = ManualScheduler::new();
        let h = s.schedule_once(Duration::from_millis(500), Alarm::Bite);
        assert!(s.is_pending(h));
        assert_eq!(s.poll_fired(), None);
        s.advance(Duration::from_millis(499));
        assert_eq!(s.poll_fired(), None);
        s.advance(Duration::from_millis(1));
        assert_eq!(s.poll_fired(), Some(Alarm::Bite));
        assert_eq!(s.poll_fired(), None);
        assert!(!s.is_pending(h));
    }

    #[test]
    fn clock_accumulates_advances() {
        let mut s = ManualScheduler::new();
        assert_eq!(s.now(), Duration::ZERO);
        s.advance(Duration::from_millis(250));
        s.advance(Duration::from_millis(750));
        assert_eq!(s.now(), Duration::from_secs(1));
        let h = s.schedule_once(Duration::from_secs(2), Alarm::Reset);
        assert_eq!(s.remaining(h), Some(Duration::from_secs(2)));
    }

    #[test]
    fn cancelled_alarm_never_fires() {
        let mut s = ManualScheduler::new();
        let h = s.schedule_once(Duration::from_secs(1), Alarm::Bite);
        s.advance(Duration::from_secs(2));
        // fired but not yet polled: cancelling still removes it
        s.cancel(h);
        assert_eq!(s.poll_fired(), None);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn earliest_due_alarm_polls_first() {
        let mut s = ManualScheduler::new();
        s.schedule_once(Duration::from_secs(3), Alarm::Reset);
        s.schedule_once(Duration::from_secs(1), Alarm::Bite);
        s.advance(Duration::from_secs(5));
        assert_eq!(s.poll_fired(), Some(Alarm::Bite));
        assert_eq!(s.poll_fired(), Some(Alarm::Reset));
    }

    #[test]
    fn handles_are_unique() {
        let mut s = ManualScheduler::new();
        let a = s.schedule_once(Duration::ZERO, Alarm::Bite);
        let b = s.schedule_once(Duration::ZERO, Alarm::Bite);
        assert_ne!(a, b);
        assert_eq!(s.remaining(a), Some(Duration::ZERO));
        assert_eq!(s.pending_of(Alarm::Bite), 2);
    }
}
