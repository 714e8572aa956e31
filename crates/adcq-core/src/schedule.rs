// crates/adcq-core/src/schedule.rs

use std::time::{Duration, Instant};

use log::debug;

use crate::config::defaults::DEBOUNCE_INTERVAL;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Pending { deadline: Instant },
}

/// Reported when a pending deadline expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    /// Change events folded into this recompute.
    pub coalesced: u32,
}

/// Cooperative debounce: a single pending-deadline slot.
///
/// Nothing here sleeps or spawns. The owner feeds `notify` on every config
/// change and calls `poll` from its event loop; each new event replaces the
/// previous deadline, so a burst collapses into one recompute after the last
/// event has been quiet for `interval`.
#[derive(Clone, Debug)]
pub struct UpdateScheduler {
    interval: Duration,
    state: SchedulerState,
    coalesced: u32,
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new(DEBOUNCE_INTERVAL)
    }
}

impl UpdateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: SchedulerState::Idle,
            coalesced: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SchedulerState::Pending { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Idle => None,
            SchedulerState::Pending { deadline } => Some(deadline),
        }
    }

    /// A config change arrived: (re)arm the deadline at `now + interval`.
    pub fn notify(&mut self, now: Instant) -> Instant {
        let deadline = now + self.interval;
        if let SchedulerState::Pending { deadline: old } = self.state {
            debug!(
                "debounce: replacing pending deadline ({:?} left)",
                old.saturating_duration_since(now)
            );
        }
        self.state = SchedulerState::Pending { deadline };
        self.coalesced = self.coalesced.saturating_add(1);
        deadline
    }

    /// Fire if the pending deadline has passed. Returns to `Idle` on fire.
    pub fn poll(&mut self, now: Instant) -> Option<Fired> {
        match self.state {
            SchedulerState::Pending { deadline } if now >= deadline => {
                let fired = Fired {
                    coalesced: self.coalesced,
                };
                self.state = SchedulerState::Idle;
                self.coalesced = 0;
                debug!("debounce: fired after {} event(s)", fired.coalesced);
                Some(fired)
            }
            _ => None,
        }
    }

    /// Drop any pending deadline without firing.
    pub fn cancel(&mut self) {
        if self.is_pending() {
            debug!("debounce: cancelled");
        }
        self.state = SchedulerState::Idle;
        self.coalesced = 0;
    }
}
