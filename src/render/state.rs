use crate::foundation::core::{Affine, Rgba8};
use crate::render::paint::{Paint, StrokeStyle};

/// Canvas-style drawing state captured by `save` and reinstated by `restore`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub global_alpha: f32,
    pub fill: Paint,
    pub stroke: Rgba8,
    pub stroke_style: StrokeStyle,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            global_alpha: 1.0,
            fill: Paint::default(),
            stroke: Rgba8::opaque(0, 0, 0),
            stroke_style: StrokeStyle::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
