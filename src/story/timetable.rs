use crate::foundation::core::Canvas;
use crate::foundation::error::{SavannaError, SavannaResult};

/// Logical canvas every scene element is drawn in.
pub const CANVAS: Canvas = Canvas {
    width: 960,
    height: 540,
};
/// Logical canvas width.
pub const WIDTH: f64 = 960.0;
/// Logical canvas height.
pub const HEIGHT: f64 = 540.0;
/// Loop length in seconds; elapsed time always lies in `[0, TOTAL_DURATION)`.
pub const TOTAL_DURATION: f64 = 20.0;

/// Title of the vignette.
pub const TITLE: &str = "Savanna Tale";
/// One-line synopsis shown next to the title.
pub const SYNOPSIS: &str =
    "An animated micro-short that traces a playful encounter spiraling into a stark finale.";
/// Static accessibility label of the drawing surface.
pub const CANVAS_LABEL: &str = "Animated lion and monkey scene";

/// A named narrative beat occupying `[start, end)` seconds of the loop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneInterval {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub start: f64,
    pub end: f64, // exclusive
}

impl SceneInterval {
    pub fn contains(&self, elapsed: f64) -> bool {
        self.start <= elapsed && elapsed < self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The four beats, ordered by start, partitioning `[0, TOTAL_DURATION)`.
pub static SCENES: [SceneInterval; 4] = [
    SceneInterval {
        id: "playful",
        label: "Playful Curiosity",
        description: "A sprightly monkey tugs on the lion's tail, unaware of the danger brewing.",
        start: 0.0,
        end: 6.0,
    },
    SceneInterval {
        id: "warning",
        label: "Lion's Warning",
        description: "The lion bristles and turns, delivering a silent warning.",
        start: 6.0,
        end: 10.0,
    },
    SceneInterval {
        id: "pounce",
        label: "Sudden Pounce",
        description: "With explosive power the lion lunges, jaws closing around its tormentor.",
        start: 10.0,
        end: 14.0,
    },
    SceneInterval {
        id: "aftermath",
        label: "Savanna Silence",
        description: "The dust settles. Only the lion remains, paw resting where the monkey once stood.",
        start: 14.0,
        end: TOTAL_DURATION,
    },
];

/// Scene containing `elapsed`. Falls back to the first scene when nothing matches, which only
/// happens for inputs outside `[0, TOTAL_DURATION)`.
pub fn resolve_scene(elapsed: f64) -> &'static SceneInterval {
    SCENES
        .iter()
        .find(|s| s.contains(elapsed))
        .unwrap_or(&SCENES[0])
}

pub fn scene_by_id(id: &str) -> Option<&'static SceneInterval> {
    SCENES.iter().find(|s| s.id == id)
}

/// Check that `scenes` are ordered, contiguous and cover exactly `[0, total)`.
pub fn validate_partition(scenes: &[SceneInterval], total: f64) -> SavannaResult<()> {
    let first = scenes
        .first()
        .ok_or_else(|| SavannaError::validation("timetable must contain at least one scene"))?;
    if first.start != 0.0 {
        return Err(SavannaError::validation(format!(
            "scene '{}' must start at 0, starts at {}",
            first.id, first.start
        )));
    }

    let mut cursor = 0.0;
    for s in scenes {
        if s.start != cursor {
            return Err(SavannaError::validation(format!(
                "scene '{}' starts at {} but previous scene ends at {cursor}",
                s.id, s.start
            )));
        }
        if s.end <= s.start {
            return Err(SavannaError::validation(format!(
                "scene '{}' has empty or inverted interval [{}, {})",
                s.id, s.start, s.end
            )));
        }
        cursor = s.end;
    }

    if cursor != total {
        return Err(SavannaError::validation(format!(
            "timetable ends at {cursor}, expected {total}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/story/timetable.rs"]
mod tests;
