use std::f64::consts::TAU;

use crate::animation::ease::ProgressWindow;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::render::paint::{ColorStop, LinearGradient, Paint, StrokeStyle};
use crate::render::surface::{Surface, polyline_path};
use crate::story::timetable::{HEIGHT, TOTAL_DURATION, WIDTH};

const SKY_STOPS: [(f32, Rgba8); 3] = [
    (0.0, Rgba8::opaque(0xf8, 0xe4, 0xb9)),
    (0.65, Rgba8::opaque(0xf7, 0xc4, 0x7a)),
    (1.0, Rgba8::opaque(0xf2, 0x9c, 0x54)),
];
const SUN: Rgba8 = Rgba8::opaque(0xff, 0xe7, 0xa9);
const GROUND: Rgba8 = Rgba8::opaque(0xe3, 0xb3, 0x5d);

const SUN_RADIUS: f64 = 55.0;
const HORIZON: f64 = HEIGHT * 0.65;
const WAVE_COUNT: usize = 6;
const WAVE_STEP: usize = 20;
const DUST_PARTICLES: usize = 14;

pub fn sky_paint() -> Paint {
    Paint::Linear(LinearGradient {
        start: Point::new(0.0, 0.0),
        end: Point::new(0.0, HEIGHT),
        stops: SKY_STOPS
            .iter()
            .map(|&(offset, color)| ColorStop { offset, color })
            .collect(),
    })
}

pub fn draw_sky<S: Surface + ?Sized>(s: &mut S, _elapsed: f64) {
    s.set_fill(sky_paint());
    s.fill_rect(Rect::new(0.0, 0.0, WIDTH, HEIGHT));
}

/// Sun center: fixed x, one full vertical oscillation per loop.
pub fn sun_center(elapsed: f64) -> Point {
    Point::new(
        WIDTH - 120.0,
        100.0 + ((elapsed / TOTAL_DURATION) * TAU).sin() * 20.0,
    )
}

pub fn draw_sun<S: Surface + ?Sized>(s: &mut S, elapsed: f64) {
    s.set_fill_color(SUN);
    s.fill_circle(sun_center(elapsed), SUN_RADIUS);
}

/// Height of wave `index` at horizontal position `x`.
pub fn wave_y(index: usize, x: f64, elapsed: f64) -> f64 {
    let i = index as f64;
    HORIZON + i * 18.0 + (x / 80.0 + elapsed + i).sin() * 4.0
}

pub fn draw_terrain<S: Surface + ?Sized>(s: &mut S, elapsed: f64) {
    s.set_fill_color(GROUND);
    s.fill_rect(Rect::new(0.0, HORIZON, WIDTH, HEIGHT));

    s.set_stroke(
        Rgba8::with_alpha_f32(205, 142, 54, 0.6),
        StrokeStyle::new(3.0),
    );
    for i in 0..WAVE_COUNT {
        let pts = (0..=WIDTH as usize)
            .step_by(WAVE_STEP)
            .map(|x| Point::new(x as f64, wave_y(i, x as f64, elapsed)));
        s.stroke_path(&polyline_path(pts, false));
    }
}

/// Population-level description of the dust ring kicked up by the pounce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DustCloud {
    pub progress: f64,
    /// Ring radius; the vertical axis is flattened to 40%.
    pub ring_radius: f64,
    pub particle_radius: f64,
    pub alpha: f64,
}

impl DustCloud {
    /// `None` before the pounce starts.
    pub fn at(elapsed: f64) -> Option<Self> {
        let window = ProgressWindow::DUST;
        if !window.has_started(elapsed) {
            return None;
        }
        let p = window.progress(elapsed);
        Some(Self {
            progress: p,
            ring_radius: 40.0 + p * 80.0,
            particle_radius: 10.0 - p * 6.0,
            alpha: 0.4 - p * 0.3,
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = Point> + '_ {
        (0..DUST_PARTICLES).map(move |i| {
            let angle = (i as f64 / DUST_PARTICLES as f64) * TAU;
            Point::new(
                WIDTH * 0.5 + angle.cos() * self.ring_radius,
                HEIGHT * 0.58 + angle.sin() * self.ring_radius * 0.4,
            )
        })
    }
}

pub fn draw_dust<S: Surface + ?Sized>(s: &mut S, elapsed: f64) {
    let Some(cloud) = DustCloud::at(elapsed) else {
        return;
    };
    s.set_fill_color(Rgba8::with_alpha_f32(219, 170, 92, cloud.alpha as f32));
    for center in cloud.particles() {
        s.fill_circle(center, cloud.particle_radius);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/environment.rs"]
mod tests;
