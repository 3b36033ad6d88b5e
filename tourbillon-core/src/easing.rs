//! Precomputed animation easing tables
//!
//! Interpolation fractions are computed once when the world is built and
//! read by step index afterwards. The tables are integer-exact: the
//! ease-in-out curve is the piecewise quadratic `2t^2` / `1 - 2(1-t)^2`,
//! which stays monotonically non-decreasing under truncating Q16.16
//! arithmetic, and the yo-yo is the parabola `4t(1-t)` rising from the
//! baseline and returning to it.

use heapless::Vec;

use crate::math::Fixed32;

/// Largest supported table length (`total_steps + 1` entries)
pub const MAX_CURVE_POINTS: usize = 128;

/// Shape of a precomputed curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveKind {
    /// Slow start, fast middle, slow end; 0.0 at step 0 up to 1.0 at the
    /// last step. Drives the launch/park spin and per-digit flip rotation.
    EaseInOut,
    /// Rise from the 0.0 baseline to 1.0 at the midpoint and back,
    /// symmetric about the middle. Drives flip translation offsets.
    YoYo,
}

/// Immutable table of interpolation fractions, indexed by animation step
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveTable {
    values: Vec<Fixed32, MAX_CURVE_POINTS>,
}

impl CurveTable {
    /// Compute a table of `total_steps + 1` fractions
    ///
    /// A step count beyond the table capacity saturates at
    /// `MAX_CURVE_POINTS - 1`.
    pub fn build(kind: CurveKind, total_steps: u16) -> Self {
        let total = (total_steps as usize).min(MAX_CURVE_POINTS - 1);
        let mut values = Vec::new();

        if total == 0 {
            let only = match kind {
                CurveKind::EaseInOut => Fixed32::ONE,
                CurveKind::YoYo => Fixed32::ZERO,
            };
            let _ = values.push(only);
            return Self { values };
        }

        for i in 0..=total {
            let t = Fixed32::from_raw(((i as i64) << Fixed32::FRAC_BITS) as i32 / total as i32);
            let v = match kind {
                CurveKind::EaseInOut => ease_in_out(t),
                CurveKind::YoYo => yo_yo(t),
            };
            let _ = values.push(v);
        }

        Self { values }
    }

    /// Number of animation steps the table covers
    pub fn total_steps(&self) -> u16 {
        (self.values.len() - 1) as u16
    }

    /// Fraction at a step, clamped to the table range
    pub fn value_at(&self, step: u16) -> Fixed32 {
        let last = self.values.len() - 1;
        self.values[(step as usize).min(last)]
    }
}

fn ease_in_out(t: Fixed32) -> Fixed32 {
    if t <= Fixed32::HALF {
        t.mul(t).mul_int(2)
    } else {
        let u = Fixed32::ONE - t;
        Fixed32::ONE - u.mul(u).mul_int(2)
    }
}

fn yo_yo(t: Fixed32) -> Fixed32 {
    t.mul(Fixed32::ONE - t).mul_int(4)
}
