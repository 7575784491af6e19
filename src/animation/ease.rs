use crate::foundation::math::progress;

/// Easing curves applied to normalized stage progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    /// Cubic S-curve: slow start, fast middle, slow end.
    InOutCubic,
}

impl Ease {
    /// Apply this easing to `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// A time window `[start, start + width]` (seconds) over which a behavior advances from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressWindow {
    pub start: f64,
    pub width: f64,
}

impl ProgressWindow {
    /// Monkey approaching the lion's tail.
    pub const PLAY: Self = Self::new(0.0, 6.0);
    /// Monkey startled into retreat.
    pub const WARNING: Self = Self::new(6.0, 4.0);
    /// Lion anger build-up (mane, eyes, mouth).
    pub const ANGER: Self = Self::new(6.0, 8.0);
    /// The lunge, shared by both characters.
    pub const POUNCE: Self = Self::new(10.0, 4.0);
    /// Monkey fade-out.
    pub const AFTERMATH: Self = Self::new(14.0, 6.0);
    /// Dust cloud expansion.
    pub const DUST: Self = Self::new(10.0, 6.0);

    pub const fn new(start: f64, width: f64) -> Self {
        Self { start, width }
    }

    pub fn end(self) -> f64 {
        self.start + self.width
    }

    /// Clamped progress in `[0, 1]`; non-decreasing in `elapsed`.
    pub fn progress(self, elapsed: f64) -> f64 {
        progress(elapsed, self.start, self.width)
    }

    /// Whether the window has started.
    pub fn has_started(self, elapsed: f64) -> bool {
        elapsed >= self.start
    }

    pub fn is_active(self, elapsed: f64) -> bool {
        self.start <= elapsed && elapsed < self.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
