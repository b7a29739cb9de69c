//! Fixed-point helpers for the cel engine
//!
//! Two formats are in play:
//! - 16.16 for positions, vertical steps, rotation and stretch geometry
//! - 12.20 for the horizontal and cross steps of a cel
//!
//! Cel fields and points store the raw bits as `i32`; arithmetic goes
//! through `I16F16` and `I12F20` and converts back with `to_bits`.
//! Angles use 256 units per turn (64 = 90°).

use std::f64::consts::TAU;
use std::sync::OnceLock;

pub use ::fixed::types::{I12F20, I16F16};

/// 1.0 in 16.16
pub const ONE_F16: i32 = I16F16::ONE.to_bits();

/// 1.0 in 12.20
pub const ONE_F20: i32 = I12F20::ONE.to_bits();

/// Shift that lifts a 16.16 value into 12.20
pub const F16_TO_F20_SHIFT: u32 = I12F20::FRAC_NBITS - I16F16::FRAC_NBITS;

/// Angle units in a full turn
pub const ANGLE_UNITS: u32 = 256;

/// Integer to 16.16 bits. Wraps outside the 16-bit integer range.
#[inline]
pub fn to_f16(value: i32) -> i32 {
    I16F16::wrapping_from_num(value).to_bits()
}

/// 16.16 bits to integer (floors)
#[inline]
pub fn from_f16(value: i32) -> i32 {
    I16F16::from_bits(value).to_num()
}

/// Signed 16.16 multiply. The extra fraction bits are dropped, which
/// floors; overflow wraps.
#[inline]
pub fn mul_f16(a: I16F16, b: I16F16) -> I16F16 {
    a.wrapping_mul(b)
}

/// 12.20 bits as a float, for the preview renderer
#[inline]
pub fn f20_to_f32(value: i32) -> f32 {
    I12F20::from_bits(value).to_num()
}

/// 16.16 bits as a float, for the preview renderer
#[inline]
pub fn f16_to_f32(value: i32) -> f32 {
    I16F16::from_bits(value).to_num()
}

fn sine_table() -> &'static [I16F16; ANGLE_UNITS as usize] {
    static TABLE: OnceLock<[I16F16; ANGLE_UNITS as usize]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [I16F16::ZERO; ANGLE_UNITS as usize];
        for (i, entry) in table.iter_mut().enumerate() {
            let radians = i as f64 * TAU / ANGLE_UNITS as f64;
            *entry = I16F16::from_num(radians.sin());
        }
        table
    })
}

/// Sine of a 256-unit angle
pub fn sin_f16(angle: u32) -> I16F16 {
    sine_table()[(angle % ANGLE_UNITS) as usize]
}

/// Cosine of a 256-unit angle
pub fn cos_f16(angle: u32) -> I16F16 {
    sin_f16((angle % ANGLE_UNITS) + ANGLE_UNITS / 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(to_f16(3), 3 * 65536);
        assert_eq!(from_f16(to_f16(-7)), -7);
        // Half a pixel below zero floors to -1
        assert_eq!(from_f16(-ONE_F16 / 2), -1);
    }

    #[test]
    fn test_mul_f16() {
        let f = |n: i32| I16F16::from_num(n);
        assert_eq!(mul_f16(f(3), f(4)), f(12));
        assert_eq!(mul_f16(I16F16::from_num(0.5), f(5)), I16F16::from_num(2.5));
        assert_eq!(mul_f16(f(-2), I16F16::from_num(0.25)), I16F16::from_num(-0.5));
        // Smallest negative product floors instead of truncating to zero
        assert_eq!(mul_f16(I16F16::from_bits(-1), I16F16::from_bits(1)), I16F16::from_bits(-1));
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(ONE_F16, 1 << 16);
        assert_eq!(ONE_F20, 1 << 20);
        assert_eq!(ONE_F16 << F16_TO_F20_SHIFT, ONE_F20);
    }

    #[test]
    fn test_to_f16_wraps() {
        assert_eq!(to_f16(i16::MAX as i32 + 1), i32::MIN);
    }

    #[test]
    fn test_float_views() {
        assert_eq!(f20_to_f32(ONE_F20 / 2), 0.5);
        assert_eq!(f16_to_f32(to_f16(-3)), -3.0);
    }

    #[test]
    fn test_cardinal_angles_exact() {
        assert_eq!(sin_f16(0), I16F16::ZERO);
        assert_eq!(cos_f16(0), I16F16::ONE);
        assert_eq!(sin_f16(64), I16F16::ONE);
        assert_eq!(cos_f16(64), I16F16::ZERO);
        assert_eq!(sin_f16(128), I16F16::ZERO);
        assert_eq!(cos_f16(128), -I16F16::ONE);
        assert_eq!(sin_f16(192), -I16F16::ONE);
        assert_eq!(cos_f16(192), I16F16::ZERO);
    }

    #[test]
    fn test_angle_wraps() {
        assert_eq!(sin_f16(256 + 32), sin_f16(32));
        assert_eq!(cos_f16(255 + 1), cos_f16(0));
    }
}
