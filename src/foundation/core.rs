use crate::foundation::error::{SavannaError, SavannaResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> SavannaResult<Self> {
        if den == 0 {
            return Err(SavannaError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(SavannaError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Timestamp of `frames` in milliseconds, the unit the frame scheduler reports.
    pub fn frames_to_millis(self, frames: u64) -> f64 {
        (frames as f64) * 1000.0 * f64::from(self.den) / f64::from(self.num)
    }
}

/// Logical drawing space. All scene geometry is expressed in these units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Pixel dimensions of this canvas rasterized at `scale`.
    pub fn scaled(self, scale: f64) -> SavannaResult<Canvas> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SavannaError::validation("canvas scale must be finite and > 0"));
        }
        let w = (self.width_f64() * scale).round();
        let h = (self.height_f64() * scale).round();
        Ok(Canvas {
            width: w as u32,
            height: h as u32,
        })
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Color with a fractional alpha in `[0, 1]`, as written in `rgba(r, g, b, a)` notation.
    pub fn with_alpha_f32(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::new(r, g, b, alpha_to_u8(alpha))
    }

    /// Scale alpha by `alpha` (global alpha in canvas terms).
    pub fn multiply_alpha(self, alpha: f32) -> Self {
        let a = f32::from(self.a) / 255.0 * alpha.clamp(0.0, 1.0);
        Self {
            a: alpha_to_u8(a),
            ..self
        }
    }

    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

fn alpha_to_u8(alpha: f32) -> u8 {
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
