//! Frame scheduler
//!
//! Bookkeeping for the single outstanding "next frame due" timer. The
//! host owns the real timer; this tracks whether one is pending and turns
//! arm/cancel decisions into directives, so a tick-driven "run now"
//! request reschedules the existing timer instead of creating a second
//! one.

use crate::state::events::{Directive, Directives};

/// Tracks the one allowed pending frame timer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameScheduler {
    pending: bool,
    interval_ms: u32,
}

impl FrameScheduler {
    /// Create with the fixed frame interval
    pub fn new(interval_ms: u32) -> Self {
        Self {
            pending: false,
            interval_ms,
        }
    }

    /// Whether a frame timer is currently outstanding
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The timer fired; clear the outstanding handle
    pub fn on_fired(&mut self) {
        self.pending = false;
    }

    /// Arm the timer for one interval, unless one is already pending
    pub fn arm(&mut self, out: &mut Directives) {
        if !self.pending {
            self.pending = true;
            let _ = out.push(Directive::ScheduleFrame {
                delay_ms: self.interval_ms,
            });
        }
    }

    /// Make the next frame run immediately
    ///
    /// Reschedules the pending timer if there is one, otherwise arms a
    /// zero-delay timer. Either way exactly one timer is pending after.
    pub fn arm_now(&mut self, out: &mut Directives) {
        if self.pending {
            let _ = out.push(Directive::RescheduleFrameNow);
        } else {
            self.pending = true;
            let _ = out.push(Directive::ScheduleFrame { delay_ms: 0 });
        }
    }

    /// Cancel the pending timer; a no-op when none is pending
    pub fn cancel(&mut self, out: &mut Directives) {
        if self.pending {
            self.pending = false;
            let _ = out.push(Directive::CancelFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_once() {
        let mut sched = FrameScheduler::new(40);
        let mut out = Directives::new();

        sched.arm(&mut out);
        assert_eq!(out.as_slice(), [Directive::ScheduleFrame { delay_ms: 40 }]);
        assert!(sched.is_pending());

        // Arming again while pending is a no-op.
        out.clear();
        sched.arm(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_arm_now_reschedules_pending() {
        let mut sched = FrameScheduler::new(40);
        let mut out = Directives::new();

        sched.arm(&mut out);
        out.clear();
        sched.arm_now(&mut out);
        assert_eq!(out.as_slice(), [Directive::RescheduleFrameNow]);
        assert!(sched.is_pending());
    }

    #[test]
    fn test_arm_now_without_pending_schedules_immediate() {
        let mut sched = FrameScheduler::new(40);
        let mut out = Directives::new();

        sched.arm_now(&mut out);
        assert_eq!(out.as_slice(), [Directive::ScheduleFrame { delay_ms: 0 }]);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut sched = FrameScheduler::new(40);
        let mut out = Directives::new();

        // Cancelling with nothing pending emits nothing.
        sched.cancel(&mut out);
        assert!(out.is_empty());

        sched.arm(&mut out);
        out.clear();
        sched.cancel(&mut out);
        assert_eq!(out.as_slice(), [Directive::CancelFrame]);
        assert!(!sched.is_pending());

        out.clear();
        sched.cancel(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_fire_then_rearm() {
        let mut sched = FrameScheduler::new(40);
        let mut out = Directives::new();

        sched.arm(&mut out);
        sched.on_fired();
        assert!(!sched.is_pending());

        out.clear();
        sched.arm(&mut out);
        assert_eq!(out.as_slice(), [Directive::ScheduleFrame { delay_ms: 40 }]);
    }
}
