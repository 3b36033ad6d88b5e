//! World configuration
//!
//! Tunables with the reference defaults, plus the spin constants shared
//! by the state machine and camera.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::{Fixed32, DEG_045, DEG_090};
use crate::state::mode::ModeKind;

/// Rotation advance per spin-speed unit per frame, ~0.0001 rad
pub const SPIN_ROTATION_QUANTA: Fixed32 = Fixed32::from_raw(7);

/// Canonical rotation of the steady display (-45 degrees, so that the
/// hour/minute/second faces are all visible)
pub const SPIN_ROTATION_STEADY: Fixed32 = Fixed32::from_raw(-DEG_045.0);

/// Rotation swept by the launch animation (90 degrees)
pub const LAUNCH_SPIN_RANGE: Fixed32 = DEG_090;

/// Mesh rendering mode handed through to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transparency {
    /// Opaque faces
    #[default]
    Solid,
    /// See-through faces
    Xray,
    /// Edges only
    Wireframe,
}

/// Tunable world parameters
///
/// `Default` matches the reference build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Mode entered when the world starts (mode is not persisted across
    /// launches)
    pub initial_mode: ModeKind,
    /// Delay between animation frames in milliseconds
    pub frame_interval_ms: u32,
    /// Steps in a digit flip animation
    pub flip_steps: u16,
    /// Steps in the launch/park spin animation
    pub spin_steps: u16,
    /// Seconds without interaction before Dynamic parks itself
    pub inactivity_max_s: u32,
    /// Spin speed set by a twist gesture
    pub spin_speed_after_twist: i32,
    /// Camera zoom factor
    pub zoom: Fixed32,
    /// Rendering mode passed through to the renderer
    pub transparency: Transparency,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            initial_mode: ModeKind::Steady,
            frame_interval_ms: 40,
            flip_steps: 50,
            spin_steps: 75,
            inactivity_max_s: 5,
            spin_speed_after_twist: 400,
            zoom: Fixed32::from_scaled_100(125),
            transparency: Transparency::Solid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.initial_mode, ModeKind::Steady);
        assert_eq!(cfg.frame_interval_ms, 40);
        assert_eq!(cfg.flip_steps, 50);
        assert_eq!(cfg.spin_steps, 75);
        assert_eq!(cfg.inactivity_max_s, 5);
        assert_eq!(cfg.spin_speed_after_twist, 400);
        assert_eq!(cfg.zoom.to_scaled_100(), 125);
    }

    #[test]
    fn test_spin_constants() {
        assert!(SPIN_ROTATION_STEADY.is_negative());
        assert_eq!(SPIN_ROTATION_STEADY, -DEG_045);
        assert_eq!(LAUNCH_SPIN_RANGE, DEG_090);
        assert!(SPIN_ROTATION_QUANTA.raw() > 0);
    }
}
