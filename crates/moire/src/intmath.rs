//! Integer maths replacing floating point at the pattern layer.
//!
//! Angles live in a 16-bit fixed-point domain: a full turn is `0x10000`, so
//! `0x4000` is 90°. Phase arithmetic is done with wrapping adds on [`Angle`],
//! which makes the periodic behavior exact: overflow *is* the modulo.

/// Angle in 16-bit turn fraction representation (`0x10000` = full turn).
///
/// Convert from degrees with `(d / 360.0 * 65536.0) as u16`.
pub type Angle = u16;

/// Sine/cosine amplitude: `int_sin`/`int_cos` return values in
/// `-TRIG_SCALE..=TRIG_SCALE`.
pub const TRIG_SCALE: i32 = 0x4000;

/// Multiply two 32-bit values and divide the 64-bit product by a third,
/// rounding to nearest.
///
/// The rounding bias is always `denominator / 2`, added before a truncating
/// division. For negative products this rounds *upward* (toward the next
/// higher value) instead of half-away-from-zero: `mul_div(-1, 1, 2) == 0`.
/// That matches the original unsigned-style rounding and is deliberate;
/// callers depend on it being reproduced exactly.
///
/// # Panics
///
/// Panics on a zero `denominator` (division by zero, a caller bug).
#[inline]
pub fn mul_div(number: i32, numerator: i32, denominator: i32) -> i32 {
    let product = i64::from(number) * i64::from(numerator);
    ((product + i64::from(denominator / 2)) / i64::from(denominator)) as i32
}

/// Sine of a 16-bit angle fraction, scaled so full amplitude is `±0x4000`.
///
/// The contract is the integer domain, not the internal method; this
/// evaluates in `f64` and rounds, which is exact at the cardinal angles.
#[inline]
pub fn int_sin(angle: Angle) -> i16 {
    let turns = f64::from(angle) / 65536.0;
    ((turns * std::f64::consts::TAU).sin() * f64::from(TRIG_SCALE)).round() as i16
}

/// Cosine of a 16-bit angle fraction: sine phase-shifted by a quarter turn.
#[inline]
pub fn int_cos(angle: Angle) -> i16 {
    int_sin(angle.wrapping_add(0x4000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_to_nearest() {
        assert_eq!(mul_div(6, 256, 192), 8);
        assert_eq!(mul_div(100, 1, 3), 33);
        assert_eq!(mul_div(200, 1, 3), 67); // 66.67 rounds up
        assert_eq!(mul_div(7, 1, 2), 4); // half rounds up
        assert_eq!(mul_div(0, 123, 7), 0);
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // 32-bit product would overflow; the 64-bit intermediate must not.
        assert_eq!(mul_div(1_500_000_000, 4, 3), 2_000_000_000);
        assert_eq!(mul_div(2_000_000_000, 3, 6), 1_000_000_000);
    }

    #[test]
    fn mul_div_unsigned_rounding_quirk() {
        // Negative results are biased upward by +den/2, not rounded
        // half-away-from-zero. This mirrors the source formula exactly.
        assert_eq!(mul_div(-1, 1, 2), 0, "-0.5 must round up to 0");
        assert_eq!(mul_div(-3, 1, 2), -1, "-1.5 must round up to -1");
        assert_eq!(mul_div(-100, 1, 3), -33);
        assert_eq!(mul_div(-200, 1, 3), -66, "-66.67 biased toward zero");
    }

    #[test]
    fn int_sin_cardinal_values() {
        assert_eq!(int_sin(0x0000), 0);
        assert_eq!(int_sin(0x4000), 0x4000);
        assert_eq!(int_sin(0x8000), 0);
        assert_eq!(int_sin(0xC000), -0x4000);
        assert_eq!(int_cos(0x0000), 0x4000);
        assert_eq!(int_cos(0x4000), 0);
        assert_eq!(int_cos(0x8000), -0x4000);
    }

    #[test]
    fn int_sin_cos_pythagorean() {
        for angle in (0..=0xFFFF).step_by(97) {
            let s = i32::from(int_sin(angle as Angle));
            let c = i32::from(int_cos(angle as Angle));
            let norm = s * s + c * c;
            let target = TRIG_SCALE * TRIG_SCALE;
            assert!(
                (norm - target).abs() < target / 100,
                "sin^2+cos^2 off at angle {:#06x}: {}",
                angle,
                norm
            );
        }
    }

    #[test]
    fn int_sin_periodicity_by_wraparound() {
        // u16 wraps at 0x10000, so adding a full turn comes back exactly.
        for angle in [0x0000_u16, 0x1234, 0x7FFF, 0xC000] {
            let full_turn = angle.wrapping_add(0xFFFF).wrapping_add(1);
            assert_eq!(int_sin(angle), int_sin(full_turn));
            let half_then_half = angle.wrapping_add(0x8000).wrapping_add(0x8000);
            assert_eq!(int_cos(angle), int_cos(half_then_half));
        }
    }

    #[test]
    fn int_sin_amplitude_bounded() {
        for angle in 0..=0xFFFF_u32 {
            let s = int_sin(angle as Angle);
            assert!((-0x4000..=0x4000).contains(&i32::from(s)));
        }
    }
}
