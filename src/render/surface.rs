use kurbo::{Circle, Ellipse, RoundedRect, Shape};

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8, Vec2};
use crate::render::paint::{Paint, StrokeStyle};
use crate::render::state::StateStack;

/// Flattening tolerance (logical units) used when turning curved shapes into paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Immediate-mode 2D drawing context the scene renders against.
///
/// Implementors supply the state stack plus the three primitive operations (`clear`,
/// `fill_path`, `stroke_path`); everything else is derived. Fills and strokes use the current
/// transform, global alpha, and fill/stroke state.
pub trait Surface {
    /// Logical canvas size.
    fn canvas(&self) -> Canvas;

    fn state(&self) -> &StateStack;

    fn state_mut(&mut self) -> &mut StateStack;

    /// Start a fresh frame: discard everything drawn so far and reset the drawing state.
    fn clear(&mut self);

    fn fill_path(&mut self, path: &BezPath);

    fn stroke_path(&mut self, path: &BezPath);

    fn save(&mut self) {
        self.state_mut().save();
    }

    fn restore(&mut self) {
        self.state_mut().restore();
    }

    /// Post-multiply `affine` onto the current transform.
    fn transform(&mut self, affine: Affine) {
        let st = self.state_mut().current_mut();
        st.transform *= affine;
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform(Affine::translate(Vec2::new(x, y)));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform(Affine::scale_non_uniform(sx, sy));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state_mut().current_mut().global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state_mut().current_mut().fill = paint;
    }

    fn set_fill_color(&mut self, color: Rgba8) {
        self.set_fill(Paint::Solid(color));
    }

    fn set_stroke(&mut self, color: Rgba8, style: StrokeStyle) {
        let st = self.state_mut().current_mut();
        st.stroke = color;
        st.stroke_style = style;
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.fill_path(&rect.to_path(PATH_TOLERANCE));
    }

    fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, rotation: f64) {
        self.fill_path(&ellipse_path(center, rx, ry, rotation));
    }

    fn fill_circle(&mut self, center: Point, r: f64) {
        self.fill_path(&circle_path(center, r));
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let rr = RoundedRect::new(x, y, x + w, y + h, radius);
        self.fill_path(&rr.to_path(PATH_TOLERANCE));
    }

    /// Stroke a single quadratic Bezier segment.
    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point) {
        let mut p = BezPath::new();
        p.move_to(from);
        p.quad_to(ctrl, to);
        self.stroke_path(&p);
    }
}

pub fn ellipse_path(center: Point, rx: f64, ry: f64, rotation: f64) -> BezPath {
    Ellipse::new(center, Vec2::new(rx, ry), rotation).to_path(PATH_TOLERANCE)
}

pub fn circle_path(center: Point, r: f64) -> BezPath {
    Circle::new(center, r).to_path(PATH_TOLERANCE)
}

/// Open polyline through `points`; `close` joins the last point back to the first.
pub fn polyline_path(points: impl IntoIterator<Item = Point>, close: bool) -> BezPath {
    let mut p = BezPath::new();
    for (i, pt) in points.into_iter().enumerate() {
        if i == 0 {
            p.move_to(pt);
        } else {
            p.line_to(pt);
        }
    }
    if close && !p.elements().is_empty() {
        p.close_path();
    }
    p
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
