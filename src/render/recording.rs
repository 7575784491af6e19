use crate::foundation::core::{Affine, BezPath, Canvas, Rgba8};
use crate::render::paint::{Paint, StrokeStyle};
use crate::render::state::StateStack;
use crate::render::surface::Surface;

/// One surface operation with the drawing state it was issued under.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        path: BezPath,
        paint: Paint,
        transform: Affine,
        alpha: f32,
    },
    Stroke {
        path: BezPath,
        color: Rgba8,
        style: StrokeStyle,
        transform: Affine,
        alpha: f32,
    },
}

impl DrawCommand {
    pub fn alpha(&self) -> f32 {
        match self {
            DrawCommand::Clear => 1.0,
            DrawCommand::Fill { alpha, .. } | DrawCommand::Stroke { alpha, .. } => *alpha,
        }
    }
}

/// Surface that records commands instead of rasterizing them.
///
/// `clear` drops everything recorded so far, so after composing a frame the command list holds
/// exactly that frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    state: StateStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            state: StateStack::new(),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for RecordingSurface {
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
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_path(&mut self, path: &BezPath) {
        let st = self.state.current();
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            paint: st.fill.clone(),
            transform: st.transform,
            alpha: st.global_alpha,
        });
    }

    fn stroke_path(&mut self, path: &BezPath) {
        let st = self.state.current();
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            color: st.stroke,
            style: st.stroke_style,
            transform: st.transform,
            alpha: st.global_alpha,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
