//! # moire
//!
//! Procedural wallpaper pattern engine for menu and inventory screens.
//!
//! The engine builds full-screen tessellated quad grids, statically lit or
//! continuously deforming under interfering sine waves, and submits them as
//! textured or colored triangle strips through a narrow [`Device`]
//! abstraction. All wave math runs in a 16-bit fixed-point angle domain where
//! a full turn is `0x10000`, so animation phases wrap exactly for free.
//!
//! The typical entry point is [`draw_wallpaper`], called once per host frame
//! with a caller-owned [`WavePhases`] value carrying the animation state.

pub mod color;
pub mod intmath;
pub mod lighting;
pub mod patterns;
pub mod render;
pub mod wallpaper;

// Re-export common types at crate root for convenience.
pub use color::Color;
pub use intmath::{Angle, int_cos, int_sin, mul_div};
pub use lighting::{center_lighting, gray_to_rgba};
pub use render::{
    Device, DeviceCall, PrimitiveTopology, RecordingDevice, RenderContext, RenderState, Texture,
    TlVertex, Vertex2d, fill_screen, render_colored_quad, render_textured_far_quad,
};
pub use wallpaper::{WallpaperKind, WavePhases, draw_wallpaper};
