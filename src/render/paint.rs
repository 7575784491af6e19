use crate::foundation::core::{Point, Rgba8};

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
}

impl StrokeStyle {
    pub const fn new(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Butt,
        }
    }

    pub const fn round(width: f64) -> Self {
        Self {
            width,
            cap: LineCap::Round,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba8,
}

/// Linear gradient in user space, from `start` to `end`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub stops: Vec<ColorStop>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum Paint {
    Solid(Rgba8),
    Linear(LinearGradient),
}

impl Paint {
    /// This paint with every color's alpha scaled by `alpha`.
    pub fn with_global_alpha(&self, alpha: f32) -> Paint {
        if alpha >= 1.0 {
            return self.clone();
        }
        match self {
            Paint::Solid(c) => Paint::Solid(c.multiply_alpha(alpha)),
            Paint::Linear(g) => Paint::Linear(LinearGradient {
                start: g.start,
                end: g.end,
                stops: g
                    .stops
                    .iter()
                    .map(|s| ColorStop {
                        offset: s.offset,
                        color: s.color.multiply_alpha(alpha),
                    })
                    .collect(),
            }),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Rgba8::opaque(0, 0, 0))
    }
}

impl From<Rgba8> for Paint {
    fn from(c: Rgba8) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::Linear(g)
    }
}
