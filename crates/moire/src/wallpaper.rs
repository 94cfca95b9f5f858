//! Wallpaper orchestration: kind dispatch and the animation phase state.

use crate::intmath::Angle;
use crate::patterns::{draw_animated_pattern, draw_static_pattern};
use crate::render::{Device, RenderContext, Texture};

#[cfg(feature = "debug-patterns")]
use crate::patterns::{draw_wave_chart, draw_wave_sheet};

/// Rows of the static pattern grid.
pub const STATIC_ROW_COUNT: i32 = 6;
/// Half-row count of the animated pattern lattice.
pub const ANIMATED_HALF_ROW_COUNT: i32 = 3;
/// Deformation amplitude of the animated pattern, percent of tile size.
pub const ANIMATED_AMPLITUDE: u8 = 10;

/// Per-call phase step shared by the deform and short waves
/// (minus 3.92 degrees).
const SHORT_WAVE_STEP: i32 = -0x0267;
/// Per-call phase step of the long wave (minus 2.81 degrees).
const LONG_WAVE_STEP: i32 = -0x0200;

/// Wallpaper types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WallpaperKind {
    /// Bitmap image wallpaper. Drawn by the host, not by this engine; a
    /// no-op here.
    Image,
    /// Static lit pattern (PC-style inventory).
    Static,
    /// Animated deforming pattern (PlayStation-style inventory).
    Animated,
    /// Diagnostic: undeformed pure-red lighting sheet.
    #[cfg(feature = "debug-patterns")]
    WaveSheet,
    /// Diagnostic: wave interference chart.
    #[cfg(feature = "debug-patterns")]
    WaveChart,
}

impl WallpaperKind {
    /// All kinds available in this build.
    pub fn all() -> &'static [WallpaperKind] {
        #[cfg(feature = "debug-patterns")]
        {
            &[
                WallpaperKind::Image,
                WallpaperKind::Static,
                WallpaperKind::Animated,
                WallpaperKind::WaveSheet,
                WallpaperKind::WaveChart,
            ]
        }
        #[cfg(not(feature = "debug-patterns"))]
        {
            &[
                WallpaperKind::Image,
                WallpaperKind::Static,
                WallpaperKind::Animated,
            ]
        }
    }

    /// Kind name as string.
    pub fn name(&self) -> &'static str {
        match self {
            WallpaperKind::Image => "image",
            WallpaperKind::Static => "static",
            WallpaperKind::Animated => "animated",
            #[cfg(feature = "debug-patterns")]
            WallpaperKind::WaveSheet => "sheet",
            #[cfg(feature = "debug-patterns")]
            WallpaperKind::WaveChart => "chart",
        }
    }

    /// Parse a kind from its string name.
    pub fn from_name(name: &str) -> Option<WallpaperKind> {
        match name.to_lowercase().as_str() {
            "image" => Some(WallpaperKind::Image),
            "static" => Some(WallpaperKind::Static),
            "animated" => Some(WallpaperKind::Animated),
            #[cfg(feature = "debug-patterns")]
            "sheet" | "purered" => Some(WallpaperKind::WaveSheet),
            #[cfg(feature = "debug-patterns")]
            "chart" => Some(WallpaperKind::WaveChart),
            _ => None,
        }
    }
}

/// Animation phase state for one wallpaper instance.
///
/// The phases persist across frames for the lifetime of the animation; the
/// caller owns the value and passes it to each [`draw_wallpaper`] call.
/// Independent wallpapers simply hold separate instances. Phases wrap
/// through the 16-bit angle domain; there is no reset beyond constructing a
/// fresh value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WavePhases {
    /// Deformation wave phase (starts at 0 degrees).
    pub deform: Angle,
    /// Lighting short wave phase (starts at 90 degrees).
    pub short: Angle,
    /// Lighting long wave phase (starts at 225 degrees).
    pub long: Angle,
}

impl Default for WavePhases {
    fn default() -> Self {
        Self { deform: 0x0000, short: 0x4000, long: 0xA000 }
    }
}

impl WavePhases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance all phases by one frame.
    ///
    /// `frame_speed` scales the per-call steps down for high framerates
    /// (pass 1 at the base rate); `0` freezes the animation for this call.
    /// The deform wave shares the short wave's step constant.
    pub fn advance(&mut self, frame_speed: i32) {
        if frame_speed == 0 {
            return;
        }
        self.deform = self.deform.wrapping_add((SHORT_WAVE_STEP / frame_speed) as Angle);
        self.short = self.short.wrapping_add((SHORT_WAVE_STEP / frame_speed) as Angle);
        self.long = self.long.wrapping_add((LONG_WAVE_STEP / frame_speed) as Angle);
    }
}

/// Draw a wallpaper for one host frame.
///
/// Dispatches to the generator selected by `kind` and, for the animated
/// kinds, advances `phases` afterwards. `texture` is only read by the
/// textured kinds; `frame_speed` only matters for the animated kinds.
pub fn draw_wallpaper<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    texture: &Texture,
    kind: WallpaperKind,
    frame_speed: i32,
    phases: &mut WavePhases,
) {
    match kind {
        WallpaperKind::Image => {
            // Bitmap wallpaper stays with the host image path.
        }
        WallpaperKind::Static => {
            draw_static_pattern(ctx, device, texture, STATIC_ROW_COUNT);
        }
        WallpaperKind::Animated => {
            draw_animated_pattern(
                ctx,
                device,
                texture,
                ANIMATED_HALF_ROW_COUNT,
                ANIMATED_AMPLITUDE,
                phases.deform,
                phases.short,
                phases.long,
            );
            phases.advance(frame_speed);
        }
        #[cfg(feature = "debug-patterns")]
        WallpaperKind::WaveSheet => {
            draw_wave_sheet(ctx, device, ANIMATED_HALF_ROW_COUNT, phases.short, phases.long);
            phases.advance(frame_speed);
        }
        #[cfg(feature = "debug-patterns")]
        WallpaperKind::WaveChart => {
            draw_wave_chart(ctx, device, ANIMATED_HALF_ROW_COUNT, phases.short, phases.long);
            phases.advance(frame_speed);
        }
    }
}
