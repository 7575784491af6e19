use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::story::timetable::CANVAS;

fn record(f: fn(&mut RecordingSurface, f64), elapsed: f64) -> Vec<DrawCommand> {
    let mut s = RecordingSurface::new(CANVAS);
    f(&mut s, elapsed);
    s.take_commands()
}

#[test]
fn sky_is_static_three_stop_gradient() {
    let a = record(draw_sky, 0.0);
    let b = record(draw_sky, 13.0);
    assert_eq!(a, b);
    let DrawCommand::Fill {
        paint: Paint::Linear(g),
        ..
    } = &a[0]
    else {
        panic!("sky must be a gradient fill");
    };
    assert_eq!(g.stops.len(), 3);
    assert_eq!(g.stops[1].offset, 0.65);
    assert_eq!(g.end, Point::new(0.0, HEIGHT));
}

#[test]
fn sun_oscillates_once_per_loop() {
    assert_eq!(sun_center(0.0), Point::new(840.0, 100.0));
    assert!((sun_center(5.0).y - 120.0).abs() < 1e-9);
    assert!((sun_center(15.0).y - 80.0).abs() < 1e-9);
    assert!((sun_center(10.0).y - 100.0).abs() < 1e-9);
}

#[test]
fn terrain_has_ground_and_six_waves() {
    let cmds = record(draw_terrain, 2.0);
    assert_eq!(cmds.len(), 7);
    assert!(matches!(cmds[0], DrawCommand::Fill { .. }));
    for c in &cmds[1..] {
        let DrawCommand::Stroke { path, color, .. } = c else {
            panic!("waves are strokes");
        };
        assert_eq!(path.elements().len(), 49);
        assert_eq!(color.a, 153);
    }
}

#[test]
fn waves_are_phase_shifted_by_index() {
    let y0 = wave_y(0, 40.0, 1.0) - HORIZON;
    let y1 = wave_y(1, 40.0, 1.0) - HORIZON - 18.0;
    assert_ne!(y0, y1);
    assert!((y0 - (0.5_f64 + 1.0).sin() * 4.0).abs() < 1e-9);
}

#[test]
fn dust_waits_for_the_pounce() {
    assert!(DustCloud::at(9.999).is_none());
    assert!(record(draw_dust, 5.0).is_empty());
    assert_eq!(record(draw_dust, 10.0).len(), 14);
}

#[test]
fn dust_ring_expands_while_particles_shrink_and_fade() {
    let start = DustCloud::at(10.0).unwrap();
    let end = DustCloud::at(16.0).unwrap();
    assert_eq!(start.ring_radius, 40.0);
    assert_eq!(end.ring_radius, 120.0);
    assert!(end.particle_radius < start.particle_radius);
    assert!(end.alpha < start.alpha);
    assert_eq!(DustCloud::at(19.0).unwrap(), end);

    let pts: Vec<_> = end.particles().collect();
    assert_eq!(pts.len(), 14);
    assert!((pts[0].x - (WIDTH * 0.5 + 120.0)).abs() < 1e-9);
    let max_dy = pts
        .iter()
        .map(|p| (p.y - HEIGHT * 0.58).abs())
        .fold(0.0, f64::max);
    assert!(max_dy <= 120.0 * 0.4 + 1e-9);
}
