//! Packed 32-bit RGBA color.
//!
//! Layout matches the classic D3DCOLOR word: `0xAARRGGBB`. The pattern
//! generators only ever produce opaque colors, but the rasterizing side
//! needs to unpack channels, so accessors are provided.

/// An opaque-friendly packed RGBA color (`0xAARRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// Opaque black, the chart backdrop color.
    pub const BLACK: Color = Color(0xFF00_0000);

    /// Pack four channels.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Pack an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// Opaque gray with equal channels.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_layout_is_argb_word() {
        let c = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.0, 0x7812_3456);
    }

    #[test]
    fn channels_round_trip() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
    }

    #[test]
    fn gray_is_opaque_and_equal() {
        let c = Color::gray(0x9A);
        assert_eq!(c.a(), 0xFF);
        assert_eq!(c.r(), 0x9A);
        assert_eq!(c.g(), 0x9A);
        assert_eq!(c.b(), 0x9A);
        assert_eq!(Color::BLACK, Color::gray(0));
    }
}
