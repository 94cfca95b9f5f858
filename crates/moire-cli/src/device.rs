//! Software rasterizer backend for previews and PNG export.
//!
//! Implements the engine's [`Device`] capability over an `image::RgbaImage`
//! frame: triangle strips are split into triangles and filled with
//! barycentric interpolation of the per-vertex Gouraud color and texture
//! coordinates. Textured pixels modulate the sampled texel with the vertex
//! color, matching the fixed-function pipeline the engine was written for.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use moire::{Device, PrimitiveTopology, RenderState, TlVertex};

/// Side length of the texture tile space the engine normalizes against.
pub const TILE_SIZE: u32 = 256;

/// A [`Device`] that rasterizes into an RGBA frame buffer.
pub struct SoftwareDevice {
    frame: RgbaImage,
    textures: HashMap<u32, RgbaImage>,
    texture_handle: u32,
    blend: bool,
    state_calls: usize,
    draw_calls: usize,
}

impl SoftwareDevice {
    /// Create a device with a black frame of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
            textures: HashMap::new(),
            texture_handle: 0,
            blend: false,
            state_calls: 0,
            draw_calls: 0,
        }
    }

    /// Register a texture tile under a handle. Tiles should be
    /// `TILE_SIZE x TILE_SIZE`; the engine addresses them in 256-px tile
    /// space.
    pub fn register_texture(&mut self, handle: u32, tile: RgbaImage) {
        self.textures.insert(handle, tile);
    }

    /// Reset the frame to black between frames. Bound states and call
    /// counters are left alone; the engine's context cache assumes device
    /// state persists.
    pub fn clear_frame(&mut self) {
        for px in self.frame.pixels_mut() {
            *px = Rgba([0, 0, 0, 255]);
        }
    }

    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }

    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    pub fn state_calls(&self) -> usize {
        self.state_calls
    }

    fn sample(&self, tu: f64, tv: f64) -> Option<Rgba<u8>> {
        let tile = self.textures.get(&self.texture_handle)?;
        let (tw, th) = tile.dimensions();
        let x = ((tu * f64::from(tw)) as i64).clamp(0, i64::from(tw) - 1) as u32;
        let y = ((tv * f64::from(th)) as i64).clamp(0, i64::from(th) - 1) as u32;
        Some(*tile.get_pixel(x, y))
    }

    fn rasterize_triangle(&mut self, v0: &TlVertex, v1: &TlVertex, v2: &TlVertex) {
        let (fw, fh) = self.frame.dimensions();

        // Signed doubled area; zero means a degenerate triangle.
        let edge = |ax: f64, ay: f64, bx: f64, by: f64, px: f64, py: f64| {
            (bx - ax) * (py - ay) - (by - ay) * (px - ax)
        };
        let (ax, ay) = (f64::from(v0.sx), f64::from(v0.sy));
        let (bx, by) = (f64::from(v1.sx), f64::from(v1.sy));
        let (cx, cy) = (f64::from(v2.sx), f64::from(v2.sy));
        let area = edge(ax, ay, bx, by, cx, cy);
        if area == 0.0 {
            return;
        }

        let min_x = ax.min(bx).min(cx).floor().max(0.0) as u32;
        let min_y = ay.min(by).min(cy).floor().max(0.0) as u32;
        let max_x = (ax.max(bx).max(cx).ceil() as i64).clamp(0, i64::from(fw) - 1) as u32;
        let max_y = (ay.max(by).max(cy).ceil() as i64).clamp(0, i64::from(fh) - 1) as u32;
        if min_x > max_x || min_y > max_y {
            return;
        }

        let textured = self.texture_handle != 0 && self.textures.contains_key(&self.texture_handle);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = f64::from(x) + 0.5;
                let py = f64::from(y) + 0.5;

                let e12 = edge(bx, by, cx, cy, px, py);
                let e20 = edge(cx, cy, ax, ay, px, py);
                let e01 = edge(ax, ay, bx, by, px, py);

                // Accept either winding; the engine submits strips without
                // caring about triangle orientation.
                let inside = (e12 >= 0.0 && e20 >= 0.0 && e01 >= 0.0)
                    || (e12 <= 0.0 && e20 <= 0.0 && e01 <= 0.0);
                if !inside {
                    continue;
                }

                let l0 = e12 / area;
                let l1 = e20 / area;
                let l2 = e01 / area;

                let lerp = |a: u8, b: u8, c: u8| {
                    (l0 * f64::from(a) + l1 * f64::from(b) + l2 * f64::from(c))
                        .clamp(0.0, 255.0) as u8
                };
                let mut r = lerp(v0.color.r(), v1.color.r(), v2.color.r());
                let mut g = lerp(v0.color.g(), v1.color.g(), v2.color.g());
                let mut b = lerp(v0.color.b(), v1.color.b(), v2.color.b());

                if textured {
                    let tu = l0 * f64::from(v0.tu) + l1 * f64::from(v1.tu) + l2 * f64::from(v2.tu);
                    let tv = l0 * f64::from(v0.tv) + l1 * f64::from(v1.tv) + l2 * f64::from(v2.tv);
                    if let Some(texel) = self.sample(tu, tv) {
                        r = (u16::from(r) * u16::from(texel[0]) / 255) as u8;
                        g = (u16::from(g) * u16::from(texel[1]) / 255) as u8;
                        b = (u16::from(b) * u16::from(texel[2]) / 255) as u8;
                    }
                }

                self.frame.put_pixel(x, y, Rgba([r, g, b, 255]));
            }
        }
    }
}

impl Device for SoftwareDevice {
    fn set_render_state(&mut self, state: RenderState, value: u32) {
        self.state_calls += 1;
        match state {
            RenderState::TextureHandle => self.texture_handle = value,
            RenderState::AlphaBlendEnable | RenderState::ColorKeyEnable => {
                self.blend = value != 0;
            }
        }
    }

    fn draw_primitive(&mut self, topology: PrimitiveTopology, vertices: &[TlVertex]) {
        self.draw_calls += 1;
        match topology {
            PrimitiveTopology::TriangleStrip => {
                for k in 2..vertices.len() {
                    self.rasterize_triangle(&vertices[k - 2], &vertices[k - 1], &vertices[k]);
                }
            }
        }
    }
}

/// Generate the default preview tile: a beveled slate block with a subtle
/// diagonal weave, one block per 64-px quadrant so the animated pattern's
/// sub-tiling stays visible.
pub fn slate_tile() -> RgbaImage {
    let mut tile = RgbaImage::new(TILE_SIZE, TILE_SIZE);
    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            let bx = (x % 64) as f64;
            let by = (y % 64) as f64;

            // Weave: two crossed low-amplitude waves.
            let weave = ((bx * 0.35).sin() * 9.0 + (by * 0.29).sin() * 9.0
                + ((bx + by) * 0.11).sin() * 6.0) as i32;

            // Bevel: brighten the top/left block edges, darken bottom/right.
            let edge = bx.min(by).min(63.0 - bx).min(63.0 - by);
            let bevel = if edge < 3.0 {
                if bx < 3.0 || by < 3.0 { 28 } else { -28 }
            } else {
                0
            };

            let v = (150 + weave + bevel).clamp(0, 255) as u8;
            let blue = v.saturating_add(14);
            tile.put_pixel(x, y, Rgba([v.saturating_sub(8), v, blue, 255]));
        }
    }
    tile
}

#[cfg(test)]
mod tests {
    use super::*;
    use moire::{Color, RenderContext, Texture, Vertex2d, render_colored_quad};

    #[test]
    fn colored_quad_paints_its_interior() {
        let mut ctx = RenderContext::new(64, 64);
        let mut dev = SoftwareDevice::new(64, 64);

        let c = Color::rgb(200, 10, 10);
        render_colored_quad(
            &mut ctx,
            &mut dev,
            Vertex2d::new(8.0, 8.0, c),
            Vertex2d::new(56.0, 8.0, c),
            Vertex2d::new(8.0, 56.0, c),
            Vertex2d::new(56.0, 56.0, c),
            500.0,
        );

        // Both strip triangles must land: the interior is filled corner to
        // corner, the outside border stays black.
        assert_eq!(dev.frame().get_pixel(32, 32), &Rgba([200, 10, 10, 255]));
        assert_eq!(dev.frame().get_pixel(10, 10), &Rgba([200, 10, 10, 255]));
        assert_eq!(dev.frame().get_pixel(54, 54), &Rgba([200, 10, 10, 255]));
        assert_eq!(dev.frame().get_pixel(2, 2), &Rgba([0, 0, 0, 255]));
        assert_eq!(dev.draw_calls(), 1);
    }

    #[test]
    fn gouraud_interpolates_between_corners() {
        let mut ctx = RenderContext::new(64, 64);
        let mut dev = SoftwareDevice::new(64, 64);

        render_colored_quad(
            &mut ctx,
            &mut dev,
            Vertex2d::new(0.0, 0.0, Color::gray(0)),
            Vertex2d::new(64.0, 0.0, Color::gray(255)),
            Vertex2d::new(0.0, 64.0, Color::gray(0)),
            Vertex2d::new(64.0, 64.0, Color::gray(255)),
            500.0,
        );

        let left = dev.frame().get_pixel(4, 32)[0];
        let mid = dev.frame().get_pixel(32, 32)[0];
        let right = dev.frame().get_pixel(60, 32)[0];
        assert!(left < mid && mid < right, "gradient must rise left to right");
    }

    #[test]
    fn texturing_modulates_vertex_color() {
        let mut ctx = RenderContext::new(64, 64);
        ctx.texture_margin = 0;
        let mut dev = SoftwareDevice::new(64, 64);
        dev.register_texture(1, RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, Rgba([255, 0, 255, 255])));

        let c = Color::gray(128);
        let txr = Texture { handle: 1, x: 0, y: 0, width: 256, height: 256 };
        moire::render_textured_far_quad(
            &mut ctx,
            &mut dev,
            Vertex2d::new(0.0, 0.0, c),
            Vertex2d::new(64.0, 0.0, c),
            Vertex2d::new(0.0, 64.0, c),
            Vertex2d::new(64.0, 64.0, c),
            &txr,
        );

        // Magenta texel x half-gray vertex: red/blue halve, green goes out.
        assert_eq!(dev.frame().get_pixel(32, 32), &Rgba([128, 0, 128, 255]));
    }

    #[test]
    fn render_state_updates_bound_texture() {
        let mut dev = SoftwareDevice::new(8, 8);
        dev.set_render_state(RenderState::TextureHandle, 5);
        assert_eq!(dev.texture_handle, 5);
        dev.set_render_state(RenderState::AlphaBlendEnable, 1);
        assert!(dev.blend);
        assert_eq!(dev.state_calls(), 2);
    }

    #[test]
    fn slate_tile_fills_the_tile_space() {
        let tile = slate_tile();
        assert_eq!(tile.dimensions(), (TILE_SIZE, TILE_SIZE));
        // Not a flat fill.
        let first = tile.get_pixel(0, 0);
        assert!(tile.pixels().any(|p| p != first));
    }
}
