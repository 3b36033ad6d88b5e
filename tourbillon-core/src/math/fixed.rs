//! Q16.16 fixed-point scalar
//!
//! Signed 32-bit value representing `raw / 65536`. Range is roughly
//! -32768.0 to +32767.99998 with a resolution of about 0.000015, which
//! covers every quantity the clock works with (angles in radians,
//! viewpoint coordinates in g, easing fractions, zoom factors).

use core::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Q16.16 fixed-point number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fixed32(pub i32);

impl Fixed32 {
    /// Zero value
    pub const ZERO: Self = Self(0);

    /// One (1.0)
    pub const ONE: Self = Self(1 << 16);

    /// One half (0.5)
    pub const HALF: Self = Self(1 << 15);

    /// Fractional bits (16)
    pub const FRAC_BITS: u32 = 16;

    /// Create from a whole integer
    #[inline]
    pub const fn from_int(n: i16) -> Self {
        Self((n as i32) << Self::FRAC_BITS)
    }

    /// Create from a scaled integer (value × 100)
    ///
    /// Useful for writing constants like 2.2 as `from_scaled_100(220)`.
    #[inline]
    pub const fn from_scaled_100(n: i32) -> Self {
        Self((n << Self::FRAC_BITS) / 100)
    }

    /// Create from a scaled integer (value × 1000)
    ///
    /// Also the milli-unit conversion: a motion reading in milli-g becomes
    /// a viewpoint coordinate in g through this constructor.
    #[inline]
    pub const fn from_scaled_1000(n: i32) -> Self {
        Self((n << Self::FRAC_BITS) / 1000)
    }

    /// Convert to whole integer (truncates fractional part)
    #[inline]
    pub const fn to_int(self) -> i16 {
        (self.0 >> Self::FRAC_BITS) as i16
    }

    /// Convert to scaled integer (value × 100), rounded to nearest
    ///
    /// Rounds half away from zero so constants that are not exactly
    /// representable (2.2 lives at raw 144179) still round-trip through
    /// `from_scaled_100`.
    #[inline]
    pub const fn to_scaled_100(self) -> i32 {
        let scaled = self.0 as i64 * 100;
        let half = 1i64 << (Self::FRAC_BITS - 1);
        let nudged = if scaled >= 0 {
            scaled + half
        } else {
            scaled - half
        };
        (nudged / (1i64 << Self::FRAC_BITS)) as i32
    }

    /// Multiply two fixed-point numbers
    ///
    /// Uses an i64 intermediate to avoid overflow.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn mul(self, other: Self) -> Self {
        let result = ((self.0 as i64) * (other.0 as i64)) >> Self::FRAC_BITS;
        Self(result as i32)
    }

    /// Divide by another fixed-point number
    ///
    /// Returns ZERO if the divisor is zero.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn div(self, other: Self) -> Self {
        if other.0 == 0 {
            return Self::ZERO;
        }
        let result = ((self.0 as i64) << Self::FRAC_BITS) / (other.0 as i64);
        Self(result as i32)
    }

    /// Divide by an integer
    ///
    /// Returns ZERO if the divisor is zero.
    #[inline]
    pub fn div_int(self, divisor: i32) -> Self {
        if divisor == 0 {
            return Self::ZERO;
        }
        Self(self.0 / divisor)
    }

    /// Multiply by an integer
    #[inline]
    pub fn mul_int(self, n: i32) -> Self {
        Self(self.0.saturating_mul(n))
    }

    /// Saturating addition (clamps on overflow)
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction (clamps on underflow)
    #[inline]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Clamp value to a range
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Check if value is negative
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Check if value is zero
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Get the raw i32 representation
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Create from raw i32 representation
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Fixed-point square root
    ///
    /// Digit-by-digit non-restoring binary square root on the unsigned
    /// magnitude, run in two passes over a 32-bit accumulator so no 64-bit
    /// intermediate is ever needed: the first pass extracts the integer
    /// result bits, then the remainder is rescaled by 2^16 and the second
    /// pass recovers the fractional bits. When the remainder after pass one
    /// exceeds 65535 it cannot be shifted left by 16, so the result is
    /// bumped by half a unit and the remainder adjusted to compensate
    /// (`num = a - (result + 0.5)^2 = num - result - 0.5`). A final check
    /// rounds the result up if the next bit would have been 1.
    ///
    /// Negative inputs mirror the sign onto the result:
    /// `(-x).sqrt() == -(x.sqrt())`. This is a defined convention, not a
    /// real negative-domain root; callers wanting NaN-like semantics must
    /// check the sign themselves. Total over the whole input range, exact
    /// and deterministic.
    pub fn sqrt(self) -> Self {
        let neg = self.0 < 0;
        let mut num: u32 = self.0.unsigned_abs();
        let mut result: u32 = 0;

        // Many inputs are small, so pick the starting bit from the top
        // nibble range instead of always scanning down from 1 << 30.
        let mut bit: u32 = if num & 0xFFF0_0000 != 0 {
            1 << 30
        } else {
            1 << 18
        };

        while bit > num {
            bit >>= 2;
        }

        for pass in 0..2 {
            while bit != 0 {
                if num >= result + bit {
                    num -= result + bit;
                    result = (result >> 1) + bit;
                } else {
                    result >>= 1;
                }
                bit >>= 2;
            }

            if pass == 0 {
                if num > 65535 {
                    // Remainder too large to shift left by 16; fold half a
                    // unit into the result and compensate the remainder.
                    num -= result;
                    num = (num << 16) - 0x8000;
                    result = (result << 16) + 0x8000;
                } else {
                    num <<= 16;
                    result <<= 16;
                }

                bit = 1 << 14;
            }
        }

        // Round up if the next bit would have been 1.
        if num > result {
            result += 1;
        }

        let root = result as i32;
        Self(if neg { -root } else { root })
    }
}

impl Add for Fixed32 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }
}

impl Sub for Fixed32 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self(self.0.wrapping_sub(other.0))
    }
}

impl Neg for Fixed32 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<i16> for Fixed32 {
    fn from(n: i16) -> Self {
        Self::from_int(n)
    }
}
