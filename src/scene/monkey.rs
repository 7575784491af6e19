use crate::animation::ease::ProgressWindow;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::math::{ease_in_out, lerp};
use crate::render::paint::StrokeStyle;
use crate::render::surface::{Surface, circle_path};
use crate::story::timetable::{HEIGHT, WIDTH};

const BODY: Rgba8 = Rgba8::opaque(0x8d, 0x5a, 0x2b);
const HEAD: Rgba8 = Rgba8::opaque(0x6f, 0x45, 0x20);
const FACE: Rgba8 = Rgba8::opaque(0xba, 0x86, 0x54);
const FEATURES: Rgba8 = Rgba8::opaque(0x3f, 0x27, 0x11);

/// Below this opacity the monkey would not change a single RGBA8 channel, so nothing is drawn.
pub const MIN_VISIBLE_OPACITY: f64 = 0.5 / 255.0;

/// Monkey pose parameters for one instant; a pure function of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonkeyPose {
    pub play: f64,
    pub warning: f64,
    pub pounce: f64,
    pub aftermath: f64,
    /// Chained stage position, before the bob is applied.
    pub position: Point,
    /// Vertical bob amplitude at this instant, damped by the pounce.
    pub bob: f64,
    /// Vertical scale factor.
    pub squash: f64,
    pub opacity: f64,
}

impl MonkeyPose {
    pub fn at(elapsed: f64) -> Self {
        let play = ProgressWindow::PLAY.progress(elapsed);
        let warning = ProgressWindow::WARNING.progress(elapsed);
        let pounce = ProgressWindow::POUNCE.progress(elapsed);
        let aftermath = ProgressWindow::AFTERMATH.progress(elapsed);

        // Each stage blends from wherever the previous stage currently is, so the tail-contact
        // jitter keeps offsetting the later stages.
        let contact = tail_contact(elapsed);
        let start = Point::new(WIDTH * 0.25, HEIGHT * 0.62);
        let eased = ease_in_out(play);
        let approach = Point::new(
            lerp(start.x, contact.x, eased),
            lerp(start.y, contact.y, eased),
        );
        let retreat = Point::new(
            lerp(approach.x, WIDTH * 0.42, warning * 0.6),
            lerp(approach.y, HEIGHT * 0.58, warning * 0.6),
        );
        let leap = Point::new(
            lerp(retreat.x, WIDTH * 0.54, pounce),
            lerp(retreat.y, HEIGHT * 0.56, pounce) - pounce * 20.0,
        );

        Self {
            play,
            warning,
            pounce,
            aftermath,
            position: leap,
            bob: (elapsed * 5.0).sin() * (1.0 - pounce) * 6.0,
            squash: 1.0 - pounce * 0.2,
            opacity: 1.0 - aftermath,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity >= MIN_VISIBLE_OPACITY
    }

    /// Where the body is drawn: the stage position lifted by the bob.
    pub fn origin(&self) -> Point {
        Point::new(self.position.x, self.position.y - self.bob)
    }
}

/// The point near the lion's tail the monkey tugs at, jittering over time.
pub fn tail_contact(elapsed: f64) -> Point {
    Point::new(
        WIDTH * 0.36 + (elapsed * 2.2).sin() * 10.0,
        HEIGHT * 0.38 + (elapsed * 2.4).cos() * 6.0,
    )
}

pub fn draw_monkey<S: Surface + ?Sized>(s: &mut S, elapsed: f64) {
    let pose = MonkeyPose::at(elapsed);
    if !pose.is_visible() {
        return;
    }

    let origin = pose.origin();
    s.save();
    s.set_global_alpha(pose.opacity as f32);
    s.translate(origin.x, origin.y);
    s.scale(1.0, pose.squash);

    s.set_fill_color(BODY);
    s.fill_ellipse(Point::ZERO, 40.0, 30.0, 0.0);

    s.set_fill_color(HEAD);
    s.fill_ellipse(Point::new(-10.0, -42.0), 22.0, 24.0, 0.0);

    s.set_fill_color(FACE);
    s.fill_ellipse(Point::new(-10.0, -48.0), 10.0, 12.0, 0.0);

    let mut eyes = circle_path(Point::new(-14.0, -52.0), 3.0);
    eyes.extend(
        circle_path(Point::new(-6.0, -52.0), 3.0)
            .elements()
            .iter()
            .copied(),
    );
    s.set_fill_color(FEATURES);
    s.fill_path(&eyes);

    // Brow arches up as the lion's warning lands.
    s.set_stroke(FEATURES, StrokeStyle::new(2.5));
    s.stroke_quad(
        Point::new(-18.0, -40.0),
        Point::new(-10.0, -34.0 - pose.warning * 8.0),
        Point::new(-2.0, -40.0),
    );

    s.set_stroke(FEATURES, StrokeStyle::new(6.0));
    s.stroke_quad(
        Point::new(20.0, -12.0),
        Point::new(60.0, 20.0),
        Point::new(40.0, 54.0),
    );
    s.stroke_quad(
        Point::new(-20.0, -12.0),
        Point::new(-60.0, 20.0),
        Point::new(-40.0, 62.0),
    );

    s.set_stroke(FEATURES, StrokeStyle::new(5.0));
    s.stroke_quad(
        Point::new(-18.0, 4.0),
        Point::new(-60.0, 40.0),
        Point::new(-40.0, 76.0),
    );
    s.stroke_quad(
        Point::new(22.0, 4.0),
        Point::new(64.0, 44.0),
        Point::new(52.0, 74.0),
    );

    s.set_stroke(HEAD, StrokeStyle::new(6.0));
    s.stroke_quad(
        Point::new(-34.0, -10.0),
        Point::new(-78.0, -40.0),
        Point::new(-64.0, -86.0),
    );

    s.restore();
}

#[cfg(test)]
#[path = "../../tests/unit/scene/monkey.rs"]
mod tests;
