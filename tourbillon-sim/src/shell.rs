//! Virtual shell: timers, ticks and sensors against a simulated clock
//!
//! Holds the host-side state the core directs: at most one frame timer
//! deadline, at most one tick subscription, and the motion sampling
//! switch. `run_for` advances virtual time delivering due events in
//! order, with ticks before frames when both land on the same instant.

use log::{debug, trace};

use tourbillon_core::clock::TimeOfDay;
use tourbillon_core::sampler::MotionReading;
use tourbillon_core::state::{Directive, Directives, Event, TapAxis, TickGranularity, World};

/// Simulated host environment for one [`World`]
#[derive(Debug, Default)]
pub struct VirtualShell {
    now_ms: u64,
    frame_deadline: Option<u64>,
    tick_granularity: Option<TickGranularity>,
    sampling: bool,
    motion: Option<MotionReading>,
    redraws: u64,
}

impl VirtualShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Redraws requested so far
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Whether a frame timer is armed
    pub fn frame_armed(&self) -> bool {
        self.frame_deadline.is_some()
    }

    /// Active tick subscription
    pub fn tick_granularity(&self) -> Option<TickGranularity> {
        self.tick_granularity
    }

    /// Whether motion sampling is powered up
    pub fn sampling(&self) -> bool {
        self.sampling
    }

    /// Set the reading the virtual sensor returns; `None` simulates an
    /// absent sensor
    pub fn set_motion(&mut self, motion: Option<MotionReading>) {
        self.motion = motion;
    }

    /// Start the world and apply its startup directives
    pub fn boot(&mut self, world: &mut World) {
        let out = world.start();
        self.apply(world, &out);
    }

    /// Deliver a tap gesture
    pub fn tap(&mut self, world: &mut World, axis: TapAxis) {
        debug!("tap on {axis:?} at t={}ms", self.now_ms);
        let out = world.dispatch(Event::Tap { axis });
        self.apply(world, &out);
    }

    /// Advance virtual time by `ms`, delivering every due tick and frame
    pub fn run_for(&mut self, world: &mut World, ms: u64) {
        let end = self.now_ms + ms;
        loop {
            let tick_at = self.next_tick_deadline();
            let next = match (tick_at, self.frame_deadline) {
                (Some(t), Some(f)) => t.min(f),
                (Some(t), None) => t,
                (None, Some(f)) => f,
                (None, None) => break,
            };
            if next > end {
                break;
            }
            self.now_ms = next;

            // Ticks run first; a tick may reschedule the frame timer to
            // fire on this same instant.
            if tick_at == Some(next) {
                let time = self.wall_time();
                trace!("tick {:02}:{:02}:{:02}", time.hour, time.minute, time.second);
                let out = world.dispatch(Event::Tick { time });
                self.apply(world, &out);
            }
            if self.frame_deadline == Some(self.now_ms) {
                self.frame_deadline = None;
                let motion = if self.sampling { self.motion } else { None };
                let out = world.dispatch(Event::Frame { motion });
                self.apply(world, &out);
            }
        }
        self.now_ms = end;
    }

    /// Execute a batch of directives against the virtual host state
    pub fn apply(&mut self, world: &mut World, directives: &Directives) {
        for directive in directives {
            trace!("directive {directive:?} at t={}ms", self.now_ms);
            match directive {
                Directive::ScheduleFrame { delay_ms } => {
                    self.frame_deadline = Some(self.now_ms + *delay_ms as u64);
                }
                Directive::RescheduleFrameNow => {
                    self.frame_deadline = Some(self.now_ms);
                }
                Directive::CancelFrame => {
                    self.frame_deadline = None;
                }
                Directive::SubscribeTicks(granularity) => {
                    self.tick_granularity = Some(*granularity);
                }
                Directive::UnsubscribeTicks => {
                    self.tick_granularity = None;
                }
                Directive::StartMotionSampling => {
                    self.sampling = true;
                }
                Directive::StopMotionSampling => {
                    self.sampling = false;
                }
                Directive::RequestRedraw => {
                    self.redraws += 1;
                }
                Directive::RefreshTime => {
                    let time = self.wall_time();
                    let out = world.dispatch(Event::Tick { time });
                    self.apply(world, &out);
                }
            }
        }
    }

    fn next_tick_deadline(&self) -> Option<u64> {
        let period = match self.tick_granularity? {
            TickGranularity::Second => 1_000,
            TickGranularity::Minute => 60_000,
        };
        Some((self.now_ms / period + 1) * period)
    }

    fn wall_time(&self) -> TimeOfDay {
        let secs = self.now_ms / 1_000;
        TimeOfDay {
            day: (1 + (secs / 86_400) % 31) as u8,
            hour: ((secs / 3_600) % 24) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
        }
    }
}
