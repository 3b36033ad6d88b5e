//! Events into the world and directives back out
//!
//! All host callbacks (frame timer, calendar ticks, tap gestures) are
//! delivered as [`Event`] values through `World::dispatch`, and every
//! request the core makes of the host (timers, subscriptions, redraws)
//! comes back as a batch of [`Directive`] values. This keeps the core
//! free of host callback plumbing and lets tests feed synthetic event
//! sequences and assert on the exact requests produced.

use heapless::Vec;

use crate::clock::TimeOfDay;
use crate::sampler::MotionReading;

/// Most directives a single dispatch can produce
pub const MAX_DIRECTIVES: usize = 8;

/// A batch of host requests from one dispatch
pub type Directives = Vec<Directive, MAX_DIRECTIVES>;

/// Logical tap axis, independent of display orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapAxis {
    /// Punch gesture axis
    X,
    /// Twist gesture axis
    Y,
    /// Unused axis
    Z,
}

/// Calendar tick rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickGranularity {
    Second,
    Minute,
}

/// Input into the world state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The frame timer fired; `motion` is the current sensor peek, `None`
    /// when the sensor is unavailable or sampling is off
    Frame { motion: Option<MotionReading> },
    /// A calendar tick at the subscribed granularity
    Tick { time: TimeOfDay },
    /// A tap gesture on a logical axis
    Tap { axis: TapAxis },
}

/// A request from the core to the host environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Directive {
    /// Arm the single frame timer to fire after `delay_ms`
    ScheduleFrame { delay_ms: u32 },
    /// Move the already-pending frame timer to fire immediately
    RescheduleFrameNow,
    /// Cancel the pending frame timer (safe when none is pending)
    CancelFrame,
    /// Start delivering `Event::Tick` at the given granularity
    SubscribeTicks(TickGranularity),
    /// Stop delivering ticks
    UnsubscribeTicks,
    /// Power up motion sampling so frame peeks return readings
    StartMotionSampling,
    /// Power down motion sampling
    StopMotionSampling,
    /// Ask the renderer to draw the current scene
    RequestRedraw,
    /// Read the wall clock now and deliver it as an immediate tick
    RefreshTime,
}
