//! Lighting model: scalar intensity to opaque color.

use crate::color::Color;

/// Convert a gray value to a full opaque RGBA gray color.
///
/// `gray` is clamped to `0..=255` first; `inverted` takes the complement
/// after clamping, so `gray_to_rgba(g, true) == gray_to_rgba(255 - g, false)`
/// for in-range `g`.
pub fn gray_to_rgba(gray: i32, inverted: bool) -> Color {
    let mut ch = gray.clamp(0x00, 0xFF) as u8;
    if inverted {
        ch = 0xFF - ch;
    }
    Color::gray(ch)
}

/// Radial shading: the farther the point from the center of the screen,
/// the darker it is.
///
/// Each axis distance is normalized by the full width/height (so it spans
/// -0.5..0.5 over the valid domain `0 <= x <= width`, `0 <= y <= height`),
/// and the Euclidean norm is scaled by 300, giving shades 0..=212 at the
/// corners. Inputs outside the domain are not clamped here; they just
/// produce larger distances that `gray_to_rgba` clamps at the pack step.
pub fn center_lighting(x: i32, y: i32, width: i32, height: i32) -> Color {
    let x_dist = f64::from(x - width / 2) / f64::from(width);
    let y_dist = f64::from(y - height / 2) / f64::from(height);

    let shade = ((x_dist * x_dist + y_dist * y_dist).sqrt() * 300.0) as i32;
    gray_to_rgba(shade, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_clamps_low_and_high() {
        assert_eq!(gray_to_rgba(-10, false), gray_to_rgba(0, false));
        assert_eq!(gray_to_rgba(300, false), gray_to_rgba(255, false));
        assert_eq!(gray_to_rgba(-10, true), Color::gray(255));
        assert_eq!(gray_to_rgba(300, true), Color::gray(0));
    }

    #[test]
    fn inversion_is_exact_complement() {
        for g in 0..=255 {
            assert_eq!(
                gray_to_rgba(g, true),
                gray_to_rgba(255 - g, false),
                "complement mismatch at gray {}",
                g
            );
        }
    }

    #[test]
    fn center_is_brightest() {
        let center = center_lighting(128, 96, 256, 192);
        assert_eq!(center, Color::gray(255), "zero distance keeps full white");

        let corner = center_lighting(0, 0, 256, 192);
        // sqrt(0.5^2 + 0.5^2) * 300 = 212
        assert_eq!(corner, Color::gray(255 - 212));
    }

    #[test]
    fn shade_darkens_away_from_center() {
        let near = center_lighting(140, 96, 256, 192);
        let far = center_lighting(250, 96, 256, 192);
        assert!(near.r() > far.r(), "farther points must be darker");
    }

    #[test]
    fn out_of_domain_points_still_pack() {
        // No pre-clamp: a wildly out-of-range point just bottoms out black.
        assert_eq!(center_lighting(10_000, 10_000, 256, 192), Color::gray(0));
    }
}
