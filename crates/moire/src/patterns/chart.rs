//! Wave interference chart: the lighting waveform as three stacked line
//! bands on a black backdrop.
//!
//! Each band samples the same two-wave sum but starts one lattice row
//! further into the pattern (the `Y_STEP * (half_row_count - 1)` stride), so
//! the beat between the short and long waves is visible across the bands.

use super::{
    CHART_DETAIL, LONG_WAVE_X_OFFSET, LONG_WAVE_X_STEP, LONG_WAVE_Y_OFFSET, LONG_WAVE_Y_STEP,
    PIXEL_ACCURACY, SHORT_WAVE_X_OFFSET, SHORT_WAVE_X_STEP, SHORT_WAVE_Y_OFFSET, SHORT_WAVE_Y_STEP,
};
use crate::color::Color;
use crate::intmath::{Angle, int_sin, mul_div};
use crate::render::{Device, RenderContext, Vertex2d, fill_screen, render_colored_quad};

/// Draw the interference chart for one frame.
///
/// Clears the screen to opaque black, then renders three horizontal bands of
/// waveform columns (top vertex at the waveform height, bottom at the band
/// baseline) as colored quads slightly nearer than the far plane so they sit
/// above the backdrop.
pub fn draw_wave_chart<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    half_row_count: i32,
    short_phase: Angle,
    long_phase: Angle,
) {
    let half_col_count =
        mul_div(half_row_count, ctx.screen_width * 3, ctx.screen_height * 4) + 1;
    let tile_size = mul_div(ctx.screen_height, 2 * PIXEL_ACCURACY, 3 * half_row_count);
    let base_x = ctx.screen_width * PIXEL_ACCURACY / 2 - half_col_count * tile_size;

    let half_col_count = half_col_count * CHART_DETAIL;

    let count_x = (half_col_count * 2 + 1) as usize;
    let mut vertices = vec![Vertex2d::new(0.0, 0.0, Color::BLACK); count_x * 6];

    fill_screen(ctx, device, Color::BLACK);

    let mut short_phase = short_phase
        .wrapping_add(SHORT_WAVE_Y_OFFSET)
        .wrapping_add(SHORT_WAVE_Y_STEP);
    let mut long_phase = long_phase
        .wrapping_add(LONG_WAVE_Y_OFFSET)
        .wrapping_add(LONG_WAVE_Y_STEP);

    for j in 0..3_usize {
        let mut short_row_phase = short_phase.wrapping_add(SHORT_WAVE_X_OFFSET);
        let mut long_row_phase = long_phase.wrapping_add(LONG_WAVE_X_OFFSET);

        for i in 0..count_x {
            let mut light = 128;
            light += i32::from(int_sin(short_row_phase)) * 32 / 0x4000;
            light += i32::from(int_sin(long_row_phase)) * 32 / 0x4000;

            let x = (base_x + tile_size * i as i32 / CHART_DETAIL) as f32 / PIXEL_ACCURACY as f32;
            let baseline = (ctx.screen_height * (j as i32 + 1)) as f32 / 3.0;
            let top = baseline - (ctx.screen_height * (light - 64) / 128) as f32 / 3.0;
            let color = Color::rgb(light.clamp(0, 255) as u8, 0, 0);

            vertices[j * count_x * 2 + i * 2] = Vertex2d::new(x, top, color);
            vertices[j * count_x * 2 + i * 2 + 1] = Vertex2d::new(x, baseline, color);

            short_row_phase = short_row_phase.wrapping_add(SHORT_WAVE_X_STEP / CHART_DETAIL as Angle);
            long_row_phase = long_row_phase.wrapping_add(LONG_WAVE_X_STEP / CHART_DETAIL as Angle);
        }
        // Next band starts one pattern row deeper into the lattice.
        short_phase =
            short_phase.wrapping_add(SHORT_WAVE_Y_STEP.wrapping_mul((half_row_count - 1) as Angle));
        long_phase =
            long_phase.wrapping_add(LONG_WAVE_Y_STEP.wrapping_mul((half_row_count - 1) as Angle));
    }

    // Above the backdrop, below everything else.
    let z = ctx.far_z - 32.0;
    for j in 0..3_usize {
        for i in 0..(half_col_count * 2) as usize {
            let v0 = vertices[j * count_x * 2 + i * 2];
            let v1 = vertices[j * count_x * 2 + (i + 1) * 2];
            let v2 = vertices[j * count_x * 2 + i * 2 + 1];
            let v3 = vertices[j * count_x * 2 + (i + 1) * 2 + 1];
            render_colored_quad(ctx, device, v0, v1, v2, v3, z);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingDevice;

    fn draw(phases: (Angle, Angle)) -> (RenderContext, RecordingDevice) {
        let mut ctx = RenderContext::new(256, 192);
        let mut dev = RecordingDevice::new();
        draw_wave_chart(&mut ctx, &mut dev, 3, phases.0, phases.1);
        (ctx, dev)
    }

    #[test]
    fn backdrop_then_three_bands() {
        let (_, dev) = draw((0x4000, 0xA000));

        // 1 fill + 3 bands of half_col_count(4) * CHART_DETAIL * 2 columns.
        assert_eq!(dev.draw_calls(), 1 + 3 * 24);

        let backdrop = dev.batches().next().unwrap();
        assert!(backdrop.iter().all(|v| v.color == Color::BLACK));
        assert_eq!((backdrop[3].sx, backdrop[3].sy), (256.0, 192.0));
    }

    #[test]
    fn bands_sit_nearer_than_the_backdrop() {
        let (ctx, dev) = draw((0x4000, 0xA000));

        let backdrop_rhw = ctx.rhw_factor / ctx.far_z;
        let band_rhw = ctx.rhw_factor / (ctx.far_z - 32.0);
        let mut batches = dev.batches();
        assert_eq!(batches.next().unwrap()[0].rhw, backdrop_rhw);
        for batch in batches {
            assert_eq!(batch[0].rhw, band_rhw);
        }
    }

    #[test]
    fn columns_hang_from_band_baselines() {
        let (_, dev) = draw((0x1234, 0x9876));

        for (k, batch) in dev.batches().skip(1).enumerate() {
            let band = k / 24;
            let baseline = (192 * (band as i32 + 1)) as f32 / 3.0;
            // v2/v3 are the baseline pair, v0/v1 the waveform pair.
            assert_eq!(batch[2].sy, baseline);
            assert_eq!(batch[3].sy, baseline);
            assert!(batch[0].sy <= baseline + 64.0 && batch[0].sy >= baseline - 192.0);
            // Waveform height encodes the same light as the column color.
            assert_eq!(batch[0].color, batch[2].color);
        }
    }

    #[test]
    fn bands_are_phase_shifted_copies() {
        let (_, dev) = draw((0x4000, 0xA000));

        let first_band: Vec<_> = dev.batches().skip(1).take(24).collect();
        let second_band: Vec<_> = dev.batches().skip(1 + 24).take(24).collect();
        assert_ne!(
            first_band[0][0].sy, second_band[0][0].sy - 64.0,
            "bands must not be identical modulo the baseline offset"
        );
    }
}
