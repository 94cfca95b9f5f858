//! Quad submission layer: transformed/lit vertices over an abstract device.
//!
//! The engine needs exactly two capabilities from a graphics backend, set a
//! named render state and draw a primitive batch, expressed here as the
//! [`Device`] trait. Everything else (screen dimensions, depth correction
//! factors, the redundant-state cache) lives in the caller-owned
//! [`RenderContext`].
//!
//! Every quad goes out as a four-vertex triangle strip in 0-1-2-3 order
//! (triangles 0-1-2 and 1-3-2), either flat colored at a caller depth or
//! texture mapped at a fixed far depth.

use crate::color::Color;

/// Render states the engine touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderState {
    /// Currently bound texture tile handle; 0 means untextured.
    TextureHandle,
    /// Alpha blending toggle (used when the backend supports it).
    AlphaBlendEnable,
    /// Color-key transparency toggle (fallback when alpha blend is not
    /// available).
    ColorKeyEnable,
}

/// Primitive batch topologies the engine submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveTopology {
    TriangleStrip,
}

/// The narrow capability the engine requires from a graphics backend.
pub trait Device {
    fn set_render_state(&mut self, state: RenderState, value: u32);
    fn draw_primitive(&mut self, topology: PrimitiveTopology, vertices: &[TlVertex]);
}

/// Screen-space vertex with packed color, the grid buffer element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex2d {
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

impl Vertex2d {
    #[inline]
    pub fn new(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// Transformed-and-lit vertex, the device wire format.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TlVertex {
    pub sx: f32,
    pub sy: f32,
    /// Normalized device-space depth.
    pub sz: f32,
    /// Reciprocal homogeneous w.
    pub rhw: f32,
    pub color: Color,
    pub specular: Color,
    pub tu: f32,
    pub tv: f32,
}

/// An opaque texture tile handle plus a pixel sub-rectangle within the
/// 256x256 tile space. Supplied by the caller, read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Texture {
    pub handle: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Last-bound device state, kept to elide redundant state-change calls.
///
/// This is an optimization side-channel, not semantic state: the host owns
/// it (inside [`RenderContext`]) and the submission functions overwrite it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCache {
    pub texture_handle: u32,
    pub alpha: bool,
}

/// Externally-owned rendering context: screen dimensions, depth correction
/// factors, and the two state cache cells the submission layer mutates.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Half-texel bleed correction, in 1/65536 of tile space per edge.
    pub texture_margin: i32,
    /// Numerator for reciprocal-homogeneous-w: `rhw = rhw_factor / z`.
    pub rhw_factor: f32,
    /// Far view-space Z, the depth used for far-plane quads.
    pub far_z: f32,
    /// Normalized far depth, the base of the sz computation.
    pub far_z_normal: f32,
    /// Normalized depth slope: `sz = far_z_normal - depth_z_normal * rhw`.
    pub depth_z_normal: f32,
    /// Whether the backend supports alpha blending; selects which render
    /// state carries the blend toggle.
    pub alpha_blend_available: bool,
    pub cache: StateCache,
}

impl RenderContext {
    /// Context with display-tuned defaults for the given screen size. Hosts
    /// with their own projection constants overwrite the public fields.
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            screen_width,
            screen_height,
            texture_margin: 16,
            rhw_factor: 1.0,
            far_z: 1000.0,
            far_z_normal: 0.999,
            depth_z_normal: 0.9,
            alpha_blend_available: true,
            cache: StateCache::default(),
        }
    }
}

fn set_texture_handle<D: Device>(ctx: &mut RenderContext, device: &mut D, handle: u32) {
    if handle != ctx.cache.texture_handle {
        ctx.cache.texture_handle = handle;
        device.set_render_state(RenderState::TextureHandle, handle);
    }
}

fn set_alpha_state<D: Device>(ctx: &mut RenderContext, device: &mut D, state: bool) {
    if state != ctx.cache.alpha {
        ctx.cache.alpha = state;
        let render_state = if ctx.alpha_blend_available {
            RenderState::AlphaBlendEnable
        } else {
            RenderState::ColorKeyEnable
        };
        device.set_render_state(render_state, u32::from(state));
    }
}

/// Draw a flat colored untextured quad (two triangles) at depth `z`.
///
/// Unbinds any texture and disables blending, skipping the device calls when
/// the cached state already matches.
///
/// # Panics
///
/// `z` must be non-zero; a zero depth makes the rhw computation divide by
/// zero (the caller-bug fault model, not a handled error).
pub fn render_colored_quad<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    v0: Vertex2d,
    v1: Vertex2d,
    v2: Vertex2d,
    v3: Vertex2d,
    z: f32,
) {
    let rhw = ctx.rhw_factor / z;
    let z_normal = ctx.far_z_normal - ctx.depth_z_normal * rhw;

    let vtx = [v0, v1, v2, v3].map(|v| TlVertex {
        sx: v.x,
        sy: v.y,
        sz: z_normal,
        rhw,
        color: v.color,
        specular: Color(0),
        tu: 0.0,
        tv: 0.0,
    });

    set_texture_handle(ctx, device, 0);
    set_alpha_state(ctx, device, false);
    device.draw_primitive(PrimitiveTopology::TriangleStrip, &vtx);
}

/// Draw a flat textured quad (two triangles) at the far plane.
///
/// Texture coordinates come from the tile's pixel rectangle normalized by
/// the 256-px tile space, inset by `texture_margin / 65536` on each edge to
/// keep bilinear filtering from bleeding adjacent tiles. The quad sits at a
/// fixed normalized depth of 0.995 with `rhw = rhw_factor / far_z`, and the
/// specular component is forced to zero.
pub fn render_textured_far_quad<D: Device>(
    ctx: &mut RenderContext,
    device: &mut D,
    v0: Vertex2d,
    v1: Vertex2d,
    v2: Vertex2d,
    v3: Vertex2d,
    texture: &Texture,
) {
    let margin = f64::from(ctx.texture_margin) / 65536.0;

    let tu_left = (f64::from(texture.x) / 256.0 + margin) as f32;
    let tu_right = (f64::from(texture.x + texture.width) / 256.0 - margin) as f32;
    let tv_top = (f64::from(texture.y) / 256.0 + margin) as f32;
    let tv_bottom = (f64::from(texture.y + texture.height) / 256.0 - margin) as f32;

    let rhw = ctx.rhw_factor / ctx.far_z;

    let corners = [
        (v0, tu_left, tv_top),
        (v1, tu_right, tv_top),
        (v2, tu_left, tv_bottom),
        (v3, tu_right, tv_bottom),
    ];
    let vtx = corners.map(|(v, tu, tv)| TlVertex {
        sx: v.x,
        sy: v.y,
        sz: 0.995,
        rhw,
        color: v.color,
        specular: Color(0),
        tu,
        tv,
    });

    set_texture_handle(ctx, device, texture.handle);
    set_alpha_state(ctx, device, false);
    device.draw_primitive(PrimitiveTopology::TriangleStrip, &vtx);
}

/// Fill the far plane of the view with a single color.
pub fn fill_screen<D: Device>(ctx: &mut RenderContext, device: &mut D, color: Color) {
    let w = ctx.screen_width as f32;
    let h = ctx.screen_height as f32;

    let v0 = Vertex2d::new(0.0, 0.0, color);
    let v1 = Vertex2d::new(w, 0.0, color);
    let v2 = Vertex2d::new(0.0, h, color);
    let v3 = Vertex2d::new(w, h, color);

    let far_z = ctx.far_z;
    render_colored_quad(ctx, device, v0, v1, v2, v3, far_z);
}

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceCall {
    SetRenderState { state: RenderState, value: u32 },
    DrawPrimitive {
        topology: PrimitiveTopology,
        vertices: Vec<TlVertex>,
    },
}

/// A [`Device`] that records every call instead of drawing.
///
/// Useful for tests (the state-elision behavior is observable through the
/// recorded stream) and for dumping frame traces.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<DeviceCall>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of recorded draw calls.
    pub fn draw_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::DrawPrimitive { .. }))
            .count()
    }

    /// Count of recorded state changes for one render state.
    pub fn state_changes(&self, target: RenderState) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DeviceCall::SetRenderState { state, .. } if *state == target))
            .count()
    }

    /// Vertex batches of recorded draw calls, in submission order.
    pub fn batches(&self) -> impl Iterator<Item = &[TlVertex]> {
        self.calls.iter().filter_map(|c| match c {
            DeviceCall::DrawPrimitive { vertices, .. } => Some(vertices.as_slice()),
            _ => None,
        })
    }
}

impl Device for RecordingDevice {
    fn set_render_state(&mut self, state: RenderState, value: u32) {
        self.calls.push(DeviceCall::SetRenderState { state, value });
    }

    fn draw_primitive(&mut self, topology: PrimitiveTopology, vertices: &[TlVertex]) {
        self.calls.push(DeviceCall::DrawPrimitive {
            topology,
            vertices: vertices.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> [Vertex2d; 4] {
        [
            Vertex2d::new(0.0, 0.0, Color::gray(10)),
            Vertex2d::new(10.0, 0.0, Color::gray(20)),
            Vertex2d::new(0.0, 10.0, Color::gray(30)),
            Vertex2d::new(10.0, 10.0, Color::gray(40)),
        ]
    }

    #[test]
    fn colored_quad_submits_strip_of_four() {
        let mut ctx = RenderContext::new(320, 240);
        let mut dev = RecordingDevice::new();
        let [v0, v1, v2, v3] = quad();

        render_colored_quad(&mut ctx, &mut dev, v0, v1, v2, v3, 500.0);

        assert_eq!(dev.draw_calls(), 1);
        let batch = dev.batches().next().unwrap();
        assert_eq!(batch.len(), 4);

        let rhw = ctx.rhw_factor / 500.0;
        let sz = ctx.far_z_normal - ctx.depth_z_normal * rhw;
        for (vtx, src) in batch.iter().zip(quad()) {
            assert_eq!(vtx.sx, src.x);
            assert_eq!(vtx.sy, src.y);
            assert_eq!(vtx.color, src.color);
            assert_eq!(vtx.rhw, rhw);
            assert_eq!(vtx.sz, sz);
        }
    }

    #[test]
    fn colored_quad_unbinds_texture_once() {
        let mut ctx = RenderContext::new(320, 240);
        ctx.cache.texture_handle = 7; // pretend a texture is bound
        let mut dev = RecordingDevice::new();
        let [v0, v1, v2, v3] = quad();

        render_colored_quad(&mut ctx, &mut dev, v0, v1, v2, v3, 500.0);
        render_colored_quad(&mut ctx, &mut dev, v0, v1, v2, v3, 500.0);

        // One unbind for the 7 -> 0 transition, nothing for the second call.
        assert_eq!(dev.state_changes(RenderState::TextureHandle), 1);
        assert_eq!(ctx.cache.texture_handle, 0);
    }

    #[test]
    fn textured_quad_uv_inset_by_margin() {
        let mut ctx = RenderContext::new(320, 240);
        ctx.texture_margin = 32;
        let mut dev = RecordingDevice::new();
        let txr = Texture { handle: 3, x: 64, y: 128, width: 64, height: 32 };
        let [v0, v1, v2, v3] = quad();

        render_textured_far_quad(&mut ctx, &mut dev, v0, v1, v2, v3, &txr);

        let batch = dev.batches().next().unwrap();
        let margin = 32.0 / 65536.0;
        let eps = 1e-6;
        assert!((batch[0].tu - (64.0 / 256.0 + margin)).abs() < eps);
        assert!((batch[1].tu - (128.0 / 256.0 - margin)).abs() < eps);
        assert!((batch[0].tv - (128.0 / 256.0 + margin)).abs() < eps);
        assert!((batch[2].tv - (160.0 / 256.0 - margin)).abs() < eps);
        // Top corners share tv, left corners share tu.
        assert_eq!(batch[0].tv, batch[1].tv);
        assert_eq!(batch[0].tu, batch[2].tu);
        for vtx in batch {
            assert_eq!(vtx.sz, 0.995);
            assert_eq!(vtx.specular, Color(0));
        }
    }

    #[test]
    fn repeated_texture_binds_are_elided() {
        let mut ctx = RenderContext::new(320, 240);
        let mut dev = RecordingDevice::new();
        let txr = Texture { handle: 5, x: 0, y: 0, width: 64, height: 64 };
        let other = Texture { handle: 9, ..txr };
        let [v0, v1, v2, v3] = quad();

        render_textured_far_quad(&mut ctx, &mut dev, v0, v1, v2, v3, &txr);
        render_textured_far_quad(&mut ctx, &mut dev, v0, v1, v2, v3, &txr);
        assert_eq!(
            dev.state_changes(RenderState::TextureHandle),
            1,
            "same handle twice must bind once"
        );

        render_textured_far_quad(&mut ctx, &mut dev, v0, v1, v2, v3, &other);
        assert_eq!(
            dev.state_changes(RenderState::TextureHandle),
            2,
            "switching handles issues exactly one more bind"
        );
    }

    #[test]
    fn alpha_state_uses_color_key_fallback() {
        let mut ctx = RenderContext::new(320, 240);
        ctx.alpha_blend_available = false;
        ctx.cache.alpha = true; // pretend blending is on
        let mut dev = RecordingDevice::new();
        let [v0, v1, v2, v3] = quad();

        render_colored_quad(&mut ctx, &mut dev, v0, v1, v2, v3, 500.0);

        assert_eq!(dev.state_changes(RenderState::ColorKeyEnable), 1);
        assert_eq!(dev.state_changes(RenderState::AlphaBlendEnable), 0);
    }

    #[test]
    fn fill_screen_covers_whole_screen() {
        let mut ctx = RenderContext::new(640, 480);
        let mut dev = RecordingDevice::new();

        fill_screen(&mut ctx, &mut dev, Color::BLACK);

        let batch = dev.batches().next().unwrap();
        assert_eq!((batch[0].sx, batch[0].sy), (0.0, 0.0));
        assert_eq!((batch[3].sx, batch[3].sy), (640.0, 480.0));
        assert!(batch.iter().all(|v| v.color == Color::BLACK));
    }
}
