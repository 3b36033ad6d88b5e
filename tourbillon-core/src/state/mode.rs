//! Presentation modes and spin state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SPIN_ROTATION_STEADY;
use crate::math::Fixed32;

/// Presentation mode, carrying the animation data the mode owns
///
/// Exactly one mode is active at a time; it is mutated only by the world's
/// transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Pre-init sentinel, exited exactly once at startup
    Undefined,
    /// Animating the camera from steady out to the free-spinning view
    Launch {
        /// Spin-curve step counting down to the -1 done sentinel
        step: i16,
    },
    /// Free-spinning, driven by motion input and decaying spin speed
    Dynamic,
    /// Animating the camera back from free-spin to steady
    Park {
        /// Spin-curve step counting down to the -1 done sentinel
        step: i16,
        /// Rotation delta captured at park entry (current - steady)
        range: Fixed32,
    },
    /// Idle display with the canonical camera pose
    Steady,
}

impl Mode {
    /// The data-free discriminant of this mode
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Undefined => ModeKind::Undefined,
            Mode::Launch { .. } => ModeKind::Launch,
            Mode::Dynamic => ModeKind::Dynamic,
            Mode::Park { .. } => ModeKind::Park,
            Mode::Steady => ModeKind::Steady,
        }
    }

    /// Check for the steady mode
    pub fn is_steady(&self) -> bool {
        matches!(self, Mode::Steady)
    }
}

/// Mode discriminant, used for transition requests and comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ModeKind {
    Undefined,
    Launch,
    Dynamic,
    Park,
    Steady,
}

/// Z-axis spin of the viewpoint
///
/// Lives outside the mode because taps can change the speed from any
/// non-steady mode, and the rotation survives every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinState {
    /// Current rotation angle, normalized to the canonical range
    pub rotation: Fixed32,
    /// Angular quanta per frame; decays toward zero
    pub speed: i32,
}

impl SpinState {
    /// At rest at the steady rotation
    pub fn new() -> Self {
        Self {
            rotation: SPIN_ROTATION_STEADY,
            speed: 0,
        }
    }

    /// Decay the speed by one unit toward zero
    pub fn apply_friction(&mut self) {
        if self.speed > 0 {
            self.speed -= 1;
        }
        if self.speed < 0 {
            self.speed += 1;
        }
    }
}

impl Default for SpinState {
    fn default() -> Self {
        Self::new()
    }
}
