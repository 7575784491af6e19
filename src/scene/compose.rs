use crate::render::surface::Surface;
use crate::scene::environment::{draw_dust, draw_sky, draw_sun, draw_terrain};
use crate::scene::lion::draw_lion;
use crate::scene::monkey::draw_monkey;

/// Scene layers, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Sky,
    Sun,
    Terrain,
    Lion,
    Monkey,
    Dust,
}

/// Painter's order: later layers cover earlier ones, no depth testing.
pub const DRAW_ORDER: [Layer; 6] = [
    Layer::Sky,
    Layer::Sun,
    Layer::Terrain,
    Layer::Lion,
    Layer::Monkey,
    Layer::Dust,
];

impl Layer {
    pub fn draw<S: Surface + ?Sized>(self, s: &mut S, elapsed: f64) {
        match self {
            Layer::Sky => draw_sky(s, elapsed),
            Layer::Sun => draw_sun(s, elapsed),
            Layer::Terrain => draw_terrain(s, elapsed),
            Layer::Lion => draw_lion(s, elapsed),
            Layer::Monkey => draw_monkey(s, elapsed),
            Layer::Dust => draw_dust(s, elapsed),
        }
    }
}

/// Clear `surface` and paint the whole frame for `elapsed` seconds into the loop.
///
/// Output depends on `elapsed` alone: composing the same instant twice issues the same commands.
#[tracing::instrument(level = "trace", skip(surface))]
pub fn compose_frame<S: Surface + ?Sized>(surface: &mut S, elapsed: f64) {
    surface.clear();
    for layer in DRAW_ORDER {
        layer.draw(surface, elapsed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
