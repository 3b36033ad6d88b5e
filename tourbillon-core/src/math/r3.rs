//! Fixed-point 3-vector
//!
//! Just enough vector algebra for camera placement: uniform scaling,
//! rotation about the vertical (Z) axis, and Euclidean length.

use super::angle;
use super::fixed::Fixed32;

/// A point or direction in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct R3 {
    pub x: Fixed32,
    pub y: Fixed32,
    pub z: Fixed32,
}

impl R3 {
    /// Origin
    pub const ZERO: Self = Self::new(Fixed32::ZERO, Fixed32::ZERO, Fixed32::ZERO);

    /// Create from components
    pub const fn new(x: Fixed32, y: Fixed32, z: Fixed32) -> Self {
        Self { x, y, z }
    }

    /// Uniform scale by a factor
    pub fn scale(self, k: Fixed32) -> Self {
        Self {
            x: self.x.mul(k),
            y: self.y.mul(k),
            z: self.z.mul(k),
        }
    }

    /// Rotate about the Z axis by an angle in radians
    pub fn rotate_z(self, theta: Fixed32) -> Self {
        let s = angle::sin(theta);
        let c = angle::cos(theta);
        Self {
            x: self.x.mul(c) - self.y.mul(s),
            y: self.x.mul(s) + self.y.mul(c),
            z: self.z,
        }
    }

    /// Euclidean length
    pub fn length(self) -> Fixed32 {
        self.x
            .mul(self.x)
            .saturating_add(self.y.mul(self.y))
            .saturating_add(self.z.mul(self.z))
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angle::{DEG_090, PI};

    fn assert_close(a: Fixed32, b: Fixed32) {
        assert!((a - b).abs().raw() <= 300, "{} !~ {}", a.raw(), b.raw());
    }

    #[test]
    fn test_scale() {
        let v = R3::new(Fixed32::ONE, Fixed32::from_int(2), -Fixed32::ONE);
        let scaled = v.scale(Fixed32::HALF);
        assert_eq!(scaled.x, Fixed32::HALF);
        assert_eq!(scaled.y, Fixed32::ONE);
        assert_eq!(scaled.z, -Fixed32::HALF);
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let v = R3::new(Fixed32::ONE, Fixed32::ZERO, Fixed32::from_int(3));
        let r = v.rotate_z(DEG_090);
        assert_close(r.x, Fixed32::ZERO);
        assert_close(r.y, Fixed32::ONE);
        // Z is untouched by a spin about Z.
        assert_eq!(r.z, Fixed32::from_int(3));
    }

    #[test]
    fn test_rotate_z_zero_is_identity() {
        // cos(0) is exactly one, so a zero rotation must not shrink the
        // vector by even a raw unit.
        let v = R3::new(
            Fixed32::from_scaled_100(220),
            -Fixed32::from_scaled_100(123),
            Fixed32::from_int(7),
        );
        assert_eq!(v.rotate_z(Fixed32::ZERO), v);
    }

    #[test]
    fn test_rotate_z_half_turn() {
        let v = R3::new(Fixed32::ONE, Fixed32::HALF, Fixed32::ZERO);
        let r = v.rotate_z(PI);
        assert_close(r.x, -Fixed32::ONE);
        assert_close(r.y, -Fixed32::HALF);
    }

    #[test]
    fn test_length() {
        // 3-4-12 box diagonal is exactly 13.
        let v = R3::new(
            Fixed32::from_int(3),
            Fixed32::from_int(4),
            Fixed32::from_int(12),
        );
        assert_eq!(v.length(), Fixed32::from_int(13));

        assert_eq!(R3::ZERO.length(), Fixed32::ZERO);
    }
}
