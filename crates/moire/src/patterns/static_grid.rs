//! Static lit grid pattern (the PC-style inventory backdrop).

use crate::intmath::mul_div;
use crate::lighting::center_lighting;
use crate::render::{Device, RenderContext, Texture, Vertex2d, render_textured_far_quad};

/// Draw a static textured grid over the whole screen.
///
/// The column count is derived from `row_count` scaled by the screen aspect
/// ratio, so the tiles stay square-ish at any resolution. Vertex colors come
/// from [`center_lighting`], darkening toward the edges; the grid is
/// `(cols+1) x (rows+1)` vertices and emits `cols x rows` textured far
/// quads, columns outer, rows inner.
pub fn draw_static_pattern<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    texture: &Texture,
    row_count: i32,
) {
    let col_count = mul_div(row_count, ctx.screen_width, ctx.screen_height);
    let count_y = (row_count + 1) as usize;
    let count_x = (col_count + 1) as usize;
    let mut vertices = Vec::with_capacity(count_x * count_y);

    for i in 0..count_x as i32 {
        for j in 0..count_y as i32 {
            let x = mul_div(ctx.screen_width, i, col_count);
            let y = mul_div(ctx.screen_height, j, row_count);
            let color = center_lighting(x, y, ctx.screen_width, ctx.screen_height);
            vertices.push(Vertex2d::new(x as f32, y as f32, color));
        }
    }

    for i in 0..col_count as usize {
        for j in 0..row_count as usize {
            let v0 = vertices[i * count_y + j];
            let v1 = vertices[(i + 1) * count_y + j];
            let v2 = vertices[i * count_y + j + 1];
            let v3 = vertices[(i + 1) * count_y + j + 1];
            render_textured_far_quad(ctx, device, v0, v1, v2, v3, texture);
        }
    }
}
