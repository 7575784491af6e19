use serde::Serialize;

use crate::foundation::error::SavannaResult;
use crate::story::timetable::SceneInterval;

/// Receives the active scene whenever it changes.
pub trait CaptionSink {
    fn scene_changed(&mut self, scene: &SceneInterval);
}

impl<T: CaptionSink + ?Sized> CaptionSink for &mut T {
    fn scene_changed(&mut self, scene: &SceneInterval) {
        (**self).scene_changed(scene)
    }
}

impl<T: CaptionSink + ?Sized> CaptionSink for Box<T> {
    fn scene_changed(&mut self, scene: &SceneInterval) {
        (**self).scene_changed(scene)
    }
}

/// Records every caption change in order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CaptionLog {
    changes: Vec<SceneInterval>,
}

impl CaptionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn changes(&self) -> &[SceneInterval] {
        &self.changes
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.changes.iter().map(|s| s.id).collect()
    }

    /// The caption currently on display.
    pub fn current(&self) -> Option<&SceneInterval> {
        self.changes.last()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn to_json(&self) -> SavannaResult<String> {
        Ok(serde_json::to_string_pretty(&self.changes)?)
    }
}

impl CaptionSink for CaptionLog {
    fn scene_changed(&mut self, scene: &SceneInterval) {
        self.changes.push(*scene);
    }
}

/// Emits caption changes as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingCaptions;

impl CaptionSink for TracingCaptions {
    fn scene_changed(&mut self, scene: &SceneInterval) {
        tracing::info!(scene = scene.id, label = scene.label, "{}", scene.description);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/captions.rs"]
mod tests;
