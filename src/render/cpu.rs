use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8};
use crate::foundation::error::{SavannaError, SavannaResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::paint::{LineCap, Paint};
use crate::render::state::StateStack;
use crate::render::surface::Surface;
use crate::story::timetable::CANVAS;

/// Raster surface powered by `vello_cpu`.
///
/// Drawing happens in the logical canvas space; a base transform maps it to pixels at the
/// configured scale. Commands accumulate in the render context until [`CpuSurface::snapshot`].
pub struct CpuSurface {
    canvas: Canvas,
    pixels: Canvas,
    base: Affine,
    clear_rgba: Option<[u8; 4]>,
    state: StateStack,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    /// Create a surface for the scene canvas.
    ///
    /// Fails with a setup error when the scaled size is empty or exceeds the rasterizer limits.
    pub fn new(settings: &RenderSettings) -> SavannaResult<Self> {
        Self::with_canvas(CANVAS, settings)
    }

    pub fn with_canvas(canvas: Canvas, settings: &RenderSettings) -> SavannaResult<Self> {
        let pixels = canvas
            .scaled(settings.scale)
            .map_err(|e| SavannaError::setup(format!("surface unavailable: {e}")))?;
        if pixels.width == 0 || pixels.height == 0 {
            return Err(SavannaError::setup(format!(
                "surface unavailable: {}x{} pixels",
                pixels.width, pixels.height
            )));
        }
        let w: u16 = pixels.width.try_into().map_err(|_| {
            SavannaError::setup("surface unavailable: width exceeds rasterizer limit")
        })?;
        let h: u16 = pixels.height.try_into().map_err(|_| {
            SavannaError::setup("surface unavailable: height exceeds rasterizer limit")
        })?;

        Ok(Self {
            canvas,
            pixels,
            base: Affine::scale(settings.scale),
            clear_rgba: settings.clear_rgba,
            state: StateStack::new(),
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Output size in pixels.
    pub fn pixel_size(&self) -> Canvas {
        self.pixels
    }

    /// Rasterize everything drawn since the last `clear` and read the pixels back.
    pub fn snapshot(&mut self) -> SavannaResult<FrameRGBA> {
        self.ctx.flush();
        match self.clear_rgba {
            Some(rgba) => clear_pixmap(&mut self.pixmap, premul_rgba8(rgba)),
            None => self.pixmap.data_as_u8_slice_mut().fill(0),
        }
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let data = self.pixmap.data_as_u8_slice().to_vec();
        let expected = (self.pixels.width as usize) * (self.pixels.height as usize) * 4;
        if data.len() != expected {
            return Err(SavannaError::render(format!(
                "pixmap readback size mismatch: got {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(FrameRGBA {
            width: self.pixels.width,
            height: self.pixels.height,
            data,
            premultiplied: true,
        })
    }

    fn apply_transform(&mut self) {
        let tr = self.base * self.state.current().transform;
        self.ctx.set_transform(affine_to_cpu(tr));
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn state(&self) -> &StateStack {
        &self.state
    }

    fn state_mut(&mut self) -> &mut StateStack {
        &mut self.state
    }

    fn clear(&mut self) {
        self.state.reset();
        self.ctx.reset();
    }

    fn fill_path(&mut self, path: &BezPath) {
        let st = self.state.current();
        let paint = st.fill.with_global_alpha(st.global_alpha);
        self.apply_transform();
        match paint {
            Paint::Solid(c) => self.ctx.set_paint(color_to_cpu(c)),
            Paint::Linear(g) => {
                let stops: Vec<vello_cpu::peniko::ColorStop> = g
                    .stops
                    .iter()
                    .map(|s| vello_cpu::peniko::ColorStop {
                        offset: s.offset,
                        color: color_to_cpu(s.color).into(),
                    })
                    .collect();
                let grad = vello_cpu::peniko::Gradient::new_linear(
                    (g.start.x, g.start.y),
                    (g.end.x, g.end.y),
                )
                .with_stops(stops.as_slice());
                self.ctx.set_paint(grad);
            }
        }
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let st = self.state.current();
        let color = st.stroke.multiply_alpha(st.global_alpha);
        let cap = match st.stroke_style.cap {
            LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
            LineCap::Round => vello_cpu::kurbo::Cap::Round,
        };
        let stroke = vello_cpu::kurbo::Stroke::new(st.stroke_style.width).with_caps(cap);
        self.apply_transform();
        self.ctx.set_stroke(stroke);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn premul_rgba8(rgba: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = rgba;
    Rgba8::new(r, g, b, a).to_premul()
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
