//! Deterministic fixed-point math
//!
//! Everything here is exact integer arithmetic on the Q16.16
//! representation. No floating point is used anywhere in the core, so
//! results are bit-identical across hosts and FPU-less targets.

pub mod angle;
pub mod fixed;
pub mod r3;

pub use angle::{normalize_angle, DEG_045, DEG_090, HALF_PI, PI, TAU};
pub use fixed::Fixed32;
pub use r3::R3;
