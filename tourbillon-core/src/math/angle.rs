//! Angles in Q16.16 radians
//!
//! Normalization keeps every rotation inside the canonical `[-PI, PI)`
//! range. Sine and cosine use the Bhaskara I rational approximation
//! evaluated in integer arithmetic (worst-case error under 0.2%), so the
//! camera math stays deterministic and float-free.

use super::fixed::Fixed32;

const PI_RAW: i32 = 205_887; // pi * 65536, rounded

/// Pi
pub const PI: Fixed32 = Fixed32::from_raw(PI_RAW);

/// Two pi, derived from `PI` so wrap arithmetic stays self-consistent
pub const TAU: Fixed32 = Fixed32::from_raw(PI_RAW * 2);

/// Pi / 2
pub const HALF_PI: Fixed32 = Fixed32::from_raw(PI_RAW / 2);

/// 45 degrees
pub const DEG_045: Fixed32 = Fixed32::from_raw(PI_RAW / 4);

/// 90 degrees
pub const DEG_090: Fixed32 = Fixed32::from_raw(PI_RAW / 2);

/// Wrap an angle into the canonical `[-PI, PI)` range
pub fn normalize_angle(angle: Fixed32) -> Fixed32 {
    let tau = TAU.raw();
    let mut r = angle.raw() % tau;
    if r >= PI_RAW {
        r -= tau;
    } else if r < -PI_RAW {
        r += tau;
    }
    Fixed32::from_raw(r)
}

/// Sine of an angle in radians
pub fn sin(angle: Fixed32) -> Fixed32 {
    let x = normalize_angle(angle);
    if x.is_negative() {
        -sin_half(-x)
    } else {
        sin_half(x)
    }
}

/// Cosine of an angle in radians
pub fn cos(angle: Fixed32) -> Fixed32 {
    sin(angle + HALF_PI)
}

/// Bhaskara I approximation for x in [0, PI]:
/// sin(x) ~= 16x(pi - x) / (5 pi^2 - 4x(pi - x))
fn sin_half(x: Fixed32) -> Fixed32 {
    // The rational form peaks at exactly one, but integer truncation of
    // the intermediate products loses the last few raw bits. Pin the
    // apex so sin(pi/2) is exactly one and rotation by zero is an
    // identity.
    if x.raw() == HALF_PI.raw() {
        return Fixed32::ONE;
    }

    let xr = x.raw() as i64;
    let pi = PI_RAW as i64;

    let prod = (xr * (pi - xr)) >> Fixed32::FRAC_BITS; // x(pi - x), <= (pi/2)^2
    let num = 16 * prod;
    let den = 5 * ((pi * pi) >> Fixed32::FRAC_BITS) - 4 * prod;

    Fixed32::from_raw(((num << Fixed32::FRAC_BITS) / den) as i32)
}
