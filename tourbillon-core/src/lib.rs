//! Board-agnostic runtime core for the Tourbillon animated clock display
//!
//! This crate contains all logic that does not depend on a concrete host
//! platform:
//!
//! - Deterministic Q16.16 fixed-point math (including an exact square root)
//! - Motion-sample smoothing (per-axis moving averages)
//! - Precomputed easing tables for spin and flip animations
//! - The flip-clock entity (digits, styles, flip progress)
//! - Camera pose derivation from smoothed motion and spin rotation
//! - The world mode state machine and frame scheduler
//!
//! The host environment (window, timers, sensors, renderer) is driven
//! through [`state::Directive`] values returned from the single
//! [`state::World::dispatch`] entry point, so the whole core can be
//! exercised with synthetic event sequences.

#![no_std]
#![deny(unsafe_code)]

pub mod camera;
pub mod clock;
pub mod config;
pub mod easing;
pub mod math;
pub mod sampler;
pub mod scheduler;
pub mod state;
