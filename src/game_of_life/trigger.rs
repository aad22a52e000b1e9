//! Periodic drivers for simulation ticks

use std::time::{Duration, Instant};

/// A recurring trigger owned by the presentation side.
///
/// `disarm` must take effect before it returns: once disarmed, no further
/// tick may be reported as due.
pub trait PeriodicTrigger {
    fn arm(&mut self, interval: Duration);
    fn disarm(&mut self);
    fn is_armed(&self) -> bool;
}

/// Wall-clock trigger polled from a single-threaded loop
#[derive(Debug, Default)]
pub struct IntervalTrigger {
    interval: Duration,
    next_fire: Option<Instant>,
}

impl IntervalTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instant at which the next tick is due, if armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_fire
    }

    /// Report whether a tick is due at `now`, scheduling the following one.
    ///
    /// Missed deadlines collapse into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(deadline) if now >= deadline => {
                let mut next = deadline + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_fire = Some(next);
                true
            }
            _ => false,
        }
    }

    fn arm_at(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_fire = Some(now + interval);
    }
}

impl PeriodicTrigger for IntervalTrigger {
    fn arm(&mut self, interval: Duration) {
        self.arm_at(interval, Instant::now());
    }

    fn disarm(&mut self) {
        self.next_fire = None;
    }

    fn is_armed(&self) -> bool {
        self.next_fire.is_some()
    }
}

/// Trigger that only records arm/disarm calls; ticks are driven by hand
#[derive(Debug, Default, Clone)]
pub struct ManualTrigger {
    pub interval: Option<Duration>,
    pub arm_count: usize,
    pub disarm_count: usize,
}

impl PeriodicTrigger for ManualTrigger {
    fn arm(&mut self, interval: Duration) {
        self.interval = Some(interval);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        self.interval = None;
        self.disarm_count += 1;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}
