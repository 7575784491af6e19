use std::f64::consts::{FRAC_PI_4, TAU};

use crate::animation::ease::ProgressWindow;
use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::render::paint::StrokeStyle;
use crate::render::surface::{Surface, circle_path, polyline_path};
use crate::story::timetable::{HEIGHT, WIDTH};

const BODY: Rgba8 = Rgba8::opaque(0xc6, 0x78, 0x28);
const HEAD: Rgba8 = Rgba8::opaque(0xd8, 0x87, 0x2f);
const MANE: Rgba8 = Rgba8::opaque(0x8c, 0x3f, 0x1a);
const FACE: Rgba8 = Rgba8::opaque(0xe3, 0xa6, 0x51);
const FEATURES: Rgba8 = Rgba8::opaque(0x3a, 0x1f, 0x06);
const MUZZLE: Rgba8 = Rgba8::opaque(0xf8, 0xd8, 0xa2);
const FANG: Rgba8 = Rgba8::opaque(0xff, 0xf7, 0xe1);
const TAIL: Rgba8 = Rgba8::opaque(0xd0, 0x89, 0x38);
const LEGS: Rgba8 = Rgba8::opaque(0xbf, 0x71, 0x27);

/// Head center relative to the body origin.
const FACE_CENTER: (f64, f64) = (120.0, -42.0);
const MANE_RUFFLES: usize = 12;
/// Mouth sag above which fangs show.
const FANG_THRESHOLD: f64 = 0.4;

/// Lion pose parameters for one instant; a pure function of elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LionPose {
    /// Builds from 0 at 6s to 1 at 14s.
    pub anger: f64,
    /// Lunge progress, 10s to 14s.
    pub pounce: f64,
    pub mouth_open: f64,
    /// Tail sway in `[-1, 1]`, damped to 0 as the pounce completes.
    pub tail_sway: f64,
    /// Body origin in canvas space.
    pub body: Point,
}

impl LionPose {
    pub fn at(elapsed: f64) -> Self {
        let anger = ProgressWindow::ANGER.progress(elapsed);
        let pounce = ProgressWindow::POUNCE.progress(elapsed);
        let mouth_open = if anger > 0.3 { anger } else { anger * 0.5 };
        Self {
            anger,
            pounce,
            mouth_open,
            tail_sway: (elapsed * 2.0).sin() * (1.0 - pounce),
            body: Point::new(WIDTH * 0.6 - pounce * 120.0, HEIGHT * 0.6 - pounce * 40.0),
        }
    }

    pub fn shows_fangs(&self) -> bool {
        self.mouth_open > FANG_THRESHOLD
    }

    /// Ruffle radius of the mane at `angle`, perturbed by anger.
    pub fn mane_radius(&self, angle: f64) -> f64 {
        80.0 + (angle * 3.0 + self.anger * 6.0).sin() * 6.0
    }
}

pub fn draw_lion<S: Surface + ?Sized>(s: &mut S, elapsed: f64) {
    let pose = LionPose::at(elapsed);

    s.save();
    s.translate(pose.body.x, pose.body.y);

    s.set_fill_color(BODY);
    s.fill_ellipse(Point::ZERO, 140.0, 100.0, 0.0);

    s.set_fill_color(HEAD);
    s.fill_ellipse(Point::new(120.0, -40.0), 68.0, 60.0, 0.0);

    draw_mane(s, &pose);
    draw_face(s, &pose);
    draw_tail(s, &pose);
    draw_legs(s, &pose);

    s.restore();
}

fn draw_mane<S: Surface + ?Sized>(s: &mut S, pose: &LionPose) {
    s.save();
    s.translate(FACE_CENTER.0, FACE_CENTER.1);
    s.set_fill_color(MANE);
    let ruffle = (0..=MANE_RUFFLES).map(|i| {
        let angle = (i as f64 / MANE_RUFFLES as f64) * TAU;
        let r = pose.mane_radius(angle);
        Point::new(angle.cos() * r, angle.sin() * r)
    });
    s.fill_path(&polyline_path(ruffle, true));
    s.restore();
}

fn draw_face<S: Surface + ?Sized>(s: &mut S, pose: &LionPose) {
    s.save();
    s.translate(FACE_CENTER.0, FACE_CENTER.1);

    s.set_fill_color(FACE);
    s.fill_ellipse(Point::ZERO, 40.0, 36.0, 0.0);

    // Pupils sit higher and widen as the lion glares.
    let eye_y = -5.0 - pose.anger * 4.0;
    let eye_r = 5.0 + pose.anger * 1.2;
    let mut eyes = circle_path(Point::new(-10.0, eye_y), eye_r);
    eyes.extend(
        circle_path(Point::new(10.0, eye_y), eye_r)
            .elements()
            .iter()
            .copied(),
    );
    s.set_fill_color(FEATURES);
    s.fill_path(&eyes);

    s.set_fill_color(MUZZLE);
    s.fill_ellipse(Point::new(0.0, 18.0), 22.0, 16.0, 0.0);

    s.set_stroke(FEATURES, StrokeStyle::new(4.0));
    s.stroke_quad(
        Point::new(-18.0, 12.0),
        Point::new(0.0, 32.0 + pose.mouth_open * 22.0),
        Point::new(18.0, 12.0),
    );

    if pose.shows_fangs() {
        let tip = 26.0 + pose.mouth_open * 14.0;
        s.set_fill_color(FANG);
        s.fill_path(&fang(-16.0, -8.0, -4.0, tip));
        s.fill_path(&fang(16.0, 8.0, 4.0, tip));
    }

    s.restore();
}

fn fang(outer_x: f64, tip_x: f64, inner_x: f64, tip_y: f64) -> BezPath {
    polyline_path(
        [
            Point::new(outer_x, 18.0),
            Point::new(tip_x, tip_y),
            Point::new(inner_x, 18.0),
        ],
        true,
    )
}

fn draw_tail<S: Surface + ?Sized>(s: &mut S, pose: &LionPose) {
    s.save();
    s.translate(-120.0, -30.0);

    let tip = Point::new(-200.0, -20.0 - pose.tail_sway * 18.0);
    s.set_stroke(TAIL, StrokeStyle::round(14.0));
    s.stroke_quad(
        Point::ZERO,
        Point::new(-120.0, -80.0 - pose.tail_sway * 30.0),
        tip,
    );

    s.set_fill_color(MANE);
    s.fill_ellipse(tip, 18.0, 24.0, FRAC_PI_4);
    s.restore();
}

fn draw_legs<S: Surface + ?Sized>(s: &mut S, pose: &LionPose) {
    let front = pose.pounce * 40.0;
    let back = pose.pounce * 20.0;

    s.set_fill_color(LEGS);
    s.fill_round_rect(-100.0 + back, 60.0 - back * 0.2, 40.0, 120.0, 18.0);
    s.fill_round_rect(-40.0 + back * 0.3, 72.0 - back * 0.5, 36.0, 118.0, 18.0);
    s.fill_round_rect(60.0 + front, 48.0 - front * 0.2, 40.0, 124.0, 18.0);
    s.fill_round_rect(110.0 + front * 1.2, 60.0 - front * 0.3, 38.0, 120.0, 18.0);
}

#[cfg(test)]
#[path = "../../tests/unit/scene/lion.rs"]
mod tests;
