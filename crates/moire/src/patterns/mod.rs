//! Wallpaper pattern generators.
//!
//! Each generator builds a scratch vertex grid over the whole screen and
//! submits it as quads; no grid outlives a single draw call. The animated
//! generators share a pair of lighting waves, a "short" and a "long" wave
//! with incommensurate row/column steps so their interference never visibly
//! repeats, plus the deform wave that displaces vertices radially.

mod animated;
mod static_grid;

#[cfg(feature = "debug-patterns")]
mod chart;
#[cfg(feature = "debug-patterns")]
mod sheet;

pub use animated::draw_animated_pattern;
pub use static_grid::draw_static_pattern;

#[cfg(feature = "debug-patterns")]
pub use chart::draw_wave_chart;
#[cfg(feature = "debug-patterns")]
pub use sheet::draw_wave_sheet;

use crate::intmath::Angle;

/// Short wave horizontal pattern step.
pub(crate) const SHORT_WAVE_X_STEP: Angle = 0x3000;
/// Short wave vertical pattern step.
pub(crate) const SHORT_WAVE_Y_STEP: Angle = 0x33E7;
/// Short wave horizontal pattern offset.
pub(crate) const SHORT_WAVE_X_OFFSET: Angle = SHORT_WAVE_X_STEP * 2;
/// Short wave vertical pattern offset.
pub(crate) const SHORT_WAVE_Y_OFFSET: Angle = SHORT_WAVE_Y_STEP;
/// Long wave horizontal pattern step.
pub(crate) const LONG_WAVE_X_STEP: Angle = 0x1822;
/// Long wave vertical pattern step.
pub(crate) const LONG_WAVE_Y_STEP: Angle = 0x1422;
/// Long wave horizontal pattern offset.
pub(crate) const LONG_WAVE_X_OFFSET: Angle = LONG_WAVE_X_STEP * 2;
/// Long wave vertical pattern offset.
pub(crate) const LONG_WAVE_Y_OFFSET: Angle = LONG_WAVE_Y_STEP;

/// Working-precision scale for grid layout: positions are computed at 4x
/// and divided back out when writing vertex coordinates, keeping sub-pixel
/// precision in the fixed-point domain.
pub(crate) const PIXEL_ACCURACY: i32 = 4;
/// Animated pattern detail level (smoothness of the deformed lattice).
pub(crate) const PATTERN_DETAIL: i32 = 2;
/// Diagnostic detail level (smoothness of the sampled waveform).
#[cfg(feature = "debug-patterns")]
pub(crate) const CHART_DETAIL: i32 = 3;
