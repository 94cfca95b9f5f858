//! Pure-lighting diagnostic sheet: the animated lattice with no deformation
//! and the two-wave sum shown on the red channel only. Makes the lighting
//! waves inspectable without the texture or the deform wave on top.

use super::{
    CHART_DETAIL, LONG_WAVE_X_OFFSET, LONG_WAVE_X_STEP, LONG_WAVE_Y_OFFSET, LONG_WAVE_Y_STEP,
    PIXEL_ACCURACY, SHORT_WAVE_X_OFFSET, SHORT_WAVE_X_STEP, SHORT_WAVE_Y_OFFSET, SHORT_WAVE_Y_STEP,
};
use crate::color::Color;
use crate::intmath::{Angle, int_sin, mul_div};
use crate::render::{Device, RenderContext, Vertex2d, render_colored_quad};

/// Draw the undeformed pure-red lighting sheet for one frame.
///
/// Same lattice as the animated pattern but at `CHART_DETAIL` angular
/// resolution, submitted as colored quads at the far depth.
pub fn draw_wave_sheet<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    half_row_count: i32,
    short_phase: Angle,
    long_phase: Angle,
) {
    let half_col_count =
        mul_div(half_row_count, ctx.screen_width * 3, ctx.screen_height * 4) + 1;

    let half_row_count = half_row_count * CHART_DETAIL;
    let half_col_count = half_col_count * CHART_DETAIL;

    let count_y = (half_row_count * 2 + 1) as usize;
    let count_x = (half_col_count * 2 + 1) as usize;
    let tile_size = mul_div(ctx.screen_height, 2 * PIXEL_ACCURACY, 3 * half_row_count);
    let base_y = ctx.screen_height * PIXEL_ACCURACY / 2 - half_row_count * tile_size;
    let base_x = ctx.screen_width * PIXEL_ACCURACY / 2 - half_col_count * tile_size;
    let mut vertices = Vec::with_capacity(count_x * count_y);

    let mut short_phase = short_phase.wrapping_add(SHORT_WAVE_X_OFFSET);
    let mut long_phase = long_phase.wrapping_add(LONG_WAVE_X_OFFSET);

    for i in 0..count_x as i32 {
        let mut short_row_phase = short_phase.wrapping_add(SHORT_WAVE_Y_OFFSET);
        let mut long_row_phase = long_phase.wrapping_add(LONG_WAVE_Y_OFFSET);

        for j in 0..count_y as i32 {
            let mut light = 128;
            light += i32::from(int_sin(short_row_phase)) * 32 / 0x4000;
            light += i32::from(int_sin(long_row_phase)) * 32 / 0x4000;

            let color = Color::rgb(light.clamp(0, 255) as u8, 0, 0);
            let y = (base_y + tile_size * j) as f32 / PIXEL_ACCURACY as f32;
            let x = (base_x + tile_size * i) as f32 / PIXEL_ACCURACY as f32;
            vertices.push(Vertex2d::new(x, y, color));

            short_row_phase = short_row_phase.wrapping_add(SHORT_WAVE_Y_STEP / CHART_DETAIL as Angle);
            long_row_phase = long_row_phase.wrapping_add(LONG_WAVE_Y_STEP / CHART_DETAIL as Angle);
        }
        short_phase = short_phase.wrapping_add(SHORT_WAVE_X_STEP / CHART_DETAIL as Angle);
        long_phase = long_phase.wrapping_add(LONG_WAVE_X_STEP / CHART_DETAIL as Angle);
    }

    let far_z = ctx.far_z;
    for i in 0..(half_col_count * 2) as usize {
        for j in 0..(half_row_count * 2) as usize {
            let v0 = vertices[i * count_y + j];
            let v1 = vertices[(i + 1) * count_y + j];
            let v2 = vertices[i * count_y + j + 1];
            let v3 = vertices[(i + 1) * count_y + j + 1];
            render_colored_quad(ctx, device, v0, v1, v2, v3, far_z);
        }
    }
}
