use super::*;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::story::timetable::CANVAS;

fn record_layer(layer: Layer, elapsed: f64) -> Vec<DrawCommand> {
    let mut s = RecordingSurface::new(CANVAS);
    layer.draw(&mut s, elapsed);
    s.take_commands()
}

#[test]
fn frame_starts_with_clear_then_layers_in_order() {
    let t = 12.5;
    let mut s = RecordingSurface::new(CANVAS);
    compose_frame(&mut s, t);

    let mut expected = vec![DrawCommand::Clear];
    for layer in DRAW_ORDER {
        expected.extend(record_layer(layer, t));
    }
    assert_eq!(s.commands(), expected.as_slice());
}

#[test]
fn composing_twice_is_identical() {
    for t in [0.0, 3.3, 8.0, 12.0, 17.25, 19.999] {
        let mut a = RecordingSurface::new(CANVAS);
        compose_frame(&mut a, t);
        let first = a.commands().to_vec();
        compose_frame(&mut a, t);
        assert_eq!(a.commands(), first.as_slice(), "t={t}");

        let mut b = RecordingSurface::new(CANVAS);
        compose_frame(&mut b, t);
        assert_eq!(b.commands(), first.as_slice(), "t={t}");
    }
}

#[test]
fn different_instants_differ() {
    let mut a = RecordingSurface::new(CANVAS);
    compose_frame(&mut a, 1.0);
    let mut b = RecordingSurface::new(CANVAS);
    compose_frame(&mut b, 11.0);
    assert_ne!(a.commands(), b.commands());
}

#[test]
fn works_through_a_trait_object() {
    let mut s = RecordingSurface::new(CANVAS);
    let dyn_surface: &mut dyn Surface = &mut s;
    compose_frame(dyn_surface, 4.0);
    assert_eq!(s.commands()[0], DrawCommand::Clear);
    assert_eq!(s.state().depth(), 0);
}

#[test]
fn monkey_layer_is_empty_at_end_of_loop() {
    assert!(record_layer(Layer::Monkey, 19.999).is_empty());
    assert!(record_layer(Layer::Dust, 9.0).is_empty());
    assert!(!record_layer(Layer::Monkey, 0.0).is_empty());
}
