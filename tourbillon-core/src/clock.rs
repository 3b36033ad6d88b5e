//! Flip-clock entity
//!
//! The displayed time is eight digit cells (day, hour, minute, second -
//! two cells each). A cell whose value changes starts a flip animation:
//! an integer step counting down from the configured flip total to the
//! `-1` "done" sentinel. The renderer reads per-cell progress fractions
//! (rotation through the ease-in-out table, translation through the
//! yo-yo table); the glyph geometry itself lives host-side.

use crate::easing::CurveTable;
use crate::math::Fixed32;

/// Number of digit cells (DD HH MM SS)
pub const DIGIT_COUNT: usize = 8;

/// Wall-clock fields as delivered by the host tick service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Digit rendering skin, cycled by the punch gesture in steady mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DigitStyle {
    /// Filled curvy outline
    #[default]
    CurvySkin,
    /// Skeleton segments only
    CurvyBone,
}

impl DigitStyle {
    /// The style the punch gesture advances to
    pub fn next(self) -> Self {
        match self {
            DigitStyle::CurvySkin => DigitStyle::CurvyBone,
            DigitStyle::CurvyBone => DigitStyle::CurvySkin,
        }
    }
}

/// Animation fractions for one digit cell mid-flip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlipProgress {
    /// Rotation fraction from the ease-in-out table
    pub rotation: Fixed32,
    /// Translation offset fraction from the yo-yo table
    pub translation: Fixed32,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct FlipDigit {
    value: u8,
    /// Countdown from the flip total; -1 means no flip in progress
    step: i16,
}

/// The clock face: digit values, flip bookkeeping and the active style
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFace {
    digits: [FlipDigit; DIGIT_COUNT],
    style: DigitStyle,
    time: TimeOfDay,
    flip_steps: u16,
}

impl ClockFace {
    /// Create a face with all cells at zero and no flips running
    ///
    /// Step counts beyond the i16 countdown range clamp rather than wrap
    /// into the done sentinel.
    pub fn new(flip_steps: u16) -> Self {
        Self {
            digits: [FlipDigit { value: 0, step: -1 }; DIGIT_COUNT],
            style: DigitStyle::default(),
            time: TimeOfDay::default(),
            flip_steps: flip_steps.min(i16::MAX as u16),
        }
    }

    /// Set the displayed time, starting a flip on every cell whose value
    /// changed
    pub fn set_time(&mut self, time: TimeOfDay) {
        let values = [
            time.day / 10,
            time.day % 10,
            time.hour / 10,
            time.hour % 10,
            time.minute / 10,
            time.minute % 10,
            time.second / 10,
            time.second % 10,
        ];

        for (digit, &value) in self.digits.iter_mut().zip(values.iter()) {
            if digit.value != value {
                digit.value = value;
                digit.step = self.flip_steps as i16;
            }
        }

        self.time = time;
    }

    /// Advance every running flip by one step
    pub fn update_animation(&mut self) {
        for digit in self.digits.iter_mut() {
            if digit.step >= 0 {
                digit.step -= 1;
            }
        }
    }

    /// Restart the flip animation on every cell
    pub fn animate_all(&mut self) {
        for digit in self.digits.iter_mut() {
            digit.step = self.flip_steps as i16;
        }
    }

    /// True while any cell still has a flip in progress
    pub fn is_animated(&self) -> bool {
        self.digits.iter().any(|d| d.step >= 0)
    }

    /// Advance to the next digit style
    pub fn cycle_style(&mut self) {
        self.style = self.style.next();
    }

    /// Active digit style
    pub fn style(&self) -> DigitStyle {
        self.style
    }

    /// Last time delivered through `set_time`
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Current value of a digit cell
    pub fn digit_value(&self, index: usize) -> u8 {
        self.digits[index].value
    }

    /// Flip fractions for a cell, or `None` when it is at rest
    ///
    /// The `-1` sentinel is checked here, before any table lookup.
    pub fn flip_progress(
        &self,
        index: usize,
        rotation_curve: &CurveTable,
        translation_curve: &CurveTable,
    ) -> Option<FlipProgress> {
        let step = self.digits[index].step;
        if step < 0 {
            return None;
        }

        Some(FlipProgress {
            rotation: rotation_curve.value_at(step as u16),
            translation: translation_curve.value_at(step as u16),
        })
    }
}
