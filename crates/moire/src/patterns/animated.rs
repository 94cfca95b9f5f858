//! Animated deforming grid pattern (the PlayStation-style inventory
//! backdrop).
//!
//! Every vertex of the lattice is displaced radially by the deform wave and
//! lit by the sum of the short and long waves, each contributing ±32 gray
//! levels around a 128 base. Per-vertex phases are the three base phases
//! plus fixed row/column steps, so the whole sheet ripples coherently.

use super::{
    LONG_WAVE_X_OFFSET, LONG_WAVE_X_STEP, LONG_WAVE_Y_OFFSET, LONG_WAVE_Y_STEP, PATTERN_DETAIL,
    PIXEL_ACCURACY, SHORT_WAVE_X_OFFSET, SHORT_WAVE_X_STEP, SHORT_WAVE_Y_OFFSET, SHORT_WAVE_Y_STEP,
};
use crate::intmath::{Angle, int_cos, int_sin, mul_div};
use crate::lighting::gray_to_rgba;
use crate::render::{Device, RenderContext, Texture, Vertex2d, render_textured_far_quad};

/// Draw the animated pattern for one frame.
///
/// `half_row_count` is half the number of vertical pattern rows before
/// detail refinement; the half-column count is derived from it through the
/// 3:4-corrected screen aspect. `amplitude` is the deformation radius as a
/// percent of tile size. The three phases are the caller's animation state
/// for this frame (see [`crate::WavePhases`]).
///
/// The texture tile is split into `PATTERN_DETAIL x PATTERN_DETAIL`
/// sub-tiles so the refined lattice repeats the full tile at the original
/// visual size.
pub fn draw_animated_pattern<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    texture: &Texture,
    half_row_count: i32,
    amplitude: u8,
    deform_phase: Angle,
    short_phase: Angle,
    long_phase: Angle,
) {
    let half_col_count =
        mul_div(half_row_count, ctx.screen_width * 3, ctx.screen_height * 4) + 1;

    let half_row_count = half_row_count * PATTERN_DETAIL;
    let half_col_count = half_col_count * PATTERN_DETAIL;

    let count_y = (half_row_count * 2 + 1) as usize;
    let count_x = (half_col_count * 2 + 1) as usize;
    let tile_size = mul_div(ctx.screen_height, 2 * PIXEL_ACCURACY, 3 * half_row_count);
    let tile_radius = mul_div(tile_size, i32::from(amplitude) * PATTERN_DETAIL, 100);
    let base_y = ctx.screen_height * PIXEL_ACCURACY / 2 - half_row_count * tile_size;
    let base_x = ctx.screen_width * PIXEL_ACCURACY / 2 - half_col_count * tile_size;
    let mut vertices = Vec::with_capacity(count_x * count_y);

    let mut deform_phase = deform_phase.wrapping_add(SHORT_WAVE_X_OFFSET);
    let mut short_phase = short_phase.wrapping_add(SHORT_WAVE_X_OFFSET);
    let mut long_phase = long_phase.wrapping_add(LONG_WAVE_X_OFFSET);

    for i in 0..count_x as i32 {
        let mut deform_row_phase = deform_phase.wrapping_add(SHORT_WAVE_Y_OFFSET);
        let mut short_row_phase = short_phase.wrapping_add(SHORT_WAVE_Y_OFFSET);
        let mut long_row_phase = long_phase.wrapping_add(LONG_WAVE_Y_OFFSET);

        for j in 0..count_y as i32 {
            let short_wave = i32::from(int_sin(short_row_phase)) * 32 / 0x4000;
            let long_wave = i32::from(int_sin(long_row_phase)) * 32 / 0x4000;

            let color = gray_to_rgba(128 + short_wave + long_wave, false);
            let y = (base_y + tile_size * j + i32::from(int_sin(deform_row_phase)) * tile_radius / 0x4000)
                as f32
                / PIXEL_ACCURACY as f32;
            let x = (base_x + tile_size * i + i32::from(int_cos(deform_row_phase)) * tile_radius / 0x4000)
                as f32
                / PIXEL_ACCURACY as f32;
            vertices.push(Vertex2d::new(x, y, color));

            deform_row_phase = deform_row_phase.wrapping_add(SHORT_WAVE_Y_STEP / PATTERN_DETAIL as Angle);
            short_row_phase = short_row_phase.wrapping_add(SHORT_WAVE_Y_STEP / PATTERN_DETAIL as Angle);
            long_row_phase = long_row_phase.wrapping_add(LONG_WAVE_Y_STEP / PATTERN_DETAIL as Angle);
        }
        deform_phase = deform_phase.wrapping_add(SHORT_WAVE_X_STEP / PATTERN_DETAIL as Angle);
        short_phase = short_phase.wrapping_add(SHORT_WAVE_X_STEP / PATTERN_DETAIL as Angle);
        long_phase = long_phase.wrapping_add(LONG_WAVE_X_STEP / PATTERN_DETAIL as Angle);
    }

    let sub_width = texture.width / PATTERN_DETAIL;
    let sub_height = texture.height / PATTERN_DETAIL;

    for i in 0..(half_col_count * 2) as usize {
        for j in 0..(half_row_count * 2) as usize {
            let v0 = vertices[i * count_y + j];
            let v1 = vertices[(i + 1) * count_y + j];
            let v2 = vertices[i * count_y + j + 1];
            let v3 = vertices[(i + 1) * count_y + j + 1];
            let sub = Texture {
                handle: texture.handle,
                x: texture.x + (i as i32 % PATTERN_DETAIL) * sub_width,
                y: texture.y + (j as i32 % PATTERN_DETAIL) * sub_height,
                width: sub_width,
                height: sub_height,
            };
            render_textured_far_quad(ctx, device, v0, v1, v2, v3, &sub);
        }
    }
}
