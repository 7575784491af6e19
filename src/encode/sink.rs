use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SavannaError, SavannaResult};
use crate::render::backend::FrameRGBA;

/// Stream parameters handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

impl SinkConfig {
    /// Bytes in one tightly packed RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    /// Check `frame` against the configured size.
    pub fn check_frame(&self, frame: &FrameRGBA) -> SavannaResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(SavannaError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != self.frame_len() {
            return Err(SavannaError::validation(
                "frame data length does not match width*height*4",
            ));
        }
        Ok(())
    }
}

/// Consumer of rendered frames.
///
/// `push_frame` is called with strictly increasing indices between one `begin` and one `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> SavannaResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SavannaResult<()>;
    fn end(&mut self) -> SavannaResult<()>;
}

impl<T: FrameSink + ?Sized> FrameSink for &mut T {
    fn begin(&mut self, cfg: SinkConfig) -> SavannaResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SavannaResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> SavannaResult<()> {
        (**self).end()
    }
}

/// Rejects indices that do not strictly increase.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct OrderGuard {
    last: Option<FrameIndex>,
}

impl OrderGuard {
    pub(crate) fn advance(&mut self, idx: FrameIndex) -> SavannaResult<()> {
        if let Some(last) = self.last
            && idx.0 <= last.0
        {
            return Err(SavannaError::encode(format!(
                "out-of-order frame index {} after {}",
                idx.0, last.0
            )));
        }
        self.last = Some(idx);
        Ok(())
    }
}

/// Keeps frames in memory; handy for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    order: OrderGuard,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<(FrameIndex, FrameRGBA)> {
        self.frames
    }

    /// True once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SavannaResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.order = OrderGuard::default();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SavannaResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| SavannaError::encode("in-memory sink not started"))?;
        cfg.check_frame(frame)?;
        self.order.advance(idx)?;
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SavannaResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
