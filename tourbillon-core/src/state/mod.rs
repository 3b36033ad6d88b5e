//! World mode state machine
//!
//! The presentation mode, its transition rules, and the single event
//! dispatch entry point driving the whole core.

pub mod events;
pub mod mode;
pub mod world;

pub use events::{Directive, Directives, Event, TapAxis, TickGranularity};
pub use mode::{Mode, ModeKind, SpinState};
pub use world::{DigitView, Scene, World};
