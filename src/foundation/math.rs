use crate::animation::ease::Ease;

/// `min(max(v, lo), hi)`. Unlike `f64::clamp` this never panics on `lo > hi`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Linear interpolation. `t` outside `[0, 1]` extrapolates.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Cubic ease-in-out: `4t^3` below the midpoint, `1 - (-2t + 2)^3 / 2` above.
pub fn ease_in_out(t: f64) -> f64 {
    Ease::InOutCubic.apply(t)
}

/// How far `elapsed` has advanced through `[start, start + width]`, clamped to `[0, 1]`.
pub fn progress(elapsed: f64, start: f64, width: f64) -> f64 {
    clamp((elapsed - start) / width, 0.0, 1.0)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
