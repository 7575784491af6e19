use crate::clock::captions::CaptionSink;
use crate::clock::scheduler::{FrameHandle, FrameScheduler};
use crate::clock::state::ClockState;
use crate::foundation::error::{SavannaError, SavannaResult};
use crate::render::surface::Surface;
use crate::scene::compose::compose_frame;
use crate::story::timetable::{SceneInterval, resolve_scene};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Running,
}

/// What a delivered frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Stopped, or no frame was armed.
    Idle,
    Rendered {
        elapsed: f64,
        scene: &'static SceneInterval,
    },
}

impl TickOutcome {
    pub fn elapsed(&self) -> Option<f64> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Rendered { elapsed, .. } => Some(*elapsed),
        }
    }

    pub fn scene(&self) -> Option<&'static SceneInterval> {
        match self {
            TickOutcome::Idle => None,
            TickOutcome::Rendered { scene, .. } => Some(*scene),
        }
    }
}

/// Assembles a [`ClockDriver`] from its three collaborators.
pub struct ClockDriverBuilder<S, F, C> {
    surface: Option<S>,
    scheduler: Option<F>,
    captions: Option<C>,
    autoplay: bool,
}

impl<S, F, C> Default for ClockDriverBuilder<S, F, C> {
    fn default() -> Self {
        Self {
            surface: None,
            scheduler: None,
            captions: None,
            autoplay: true,
        }
    }
}

impl<S, F, C> ClockDriverBuilder<S, F, C>
where
    S: Surface,
    F: FrameScheduler,
    C: CaptionSink,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn scheduler(mut self, scheduler: F) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn captions(mut self, captions: C) -> Self {
        self.captions = Some(captions);
        self
    }

    /// Start `Running` with the first frame armed. Defaults to true.
    pub fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    #[tracing::instrument(level = "debug", skip(self), fields(autoplay = self.autoplay))]
    pub fn build(self) -> SavannaResult<ClockDriver<S, F, C>> {
        let surface = self
            .surface
            .ok_or_else(|| SavannaError::setup("surface unavailable"))?;
        let scheduler = self
            .scheduler
            .ok_or_else(|| SavannaError::setup("frame scheduler unavailable"))?;
        let captions = self
            .captions
            .ok_or_else(|| SavannaError::setup("caption display unavailable"))?;

        let mut driver = ClockDriver {
            surface,
            scheduler,
            captions,
            clock: ClockState::fresh(),
            state: PlaybackState::Stopped,
            pending: None,
            active_scene: None,
        };
        if self.autoplay {
            driver.play();
        }
        Ok(driver)
    }
}

/// Playback controller: owns the clock, arms frames and paints the scene on each callback.
///
/// Single-threaded and callback-driven. At most one frame is armed at any time.
pub struct ClockDriver<S, F, C> {
    surface: S,
    scheduler: F,
    captions: C,
    clock: ClockState,
    state: PlaybackState,
    pending: Option<FrameHandle>,
    active_scene: Option<&'static str>,
}

impl<S, F, C> ClockDriver<S, F, C>
where
    S: Surface,
    F: FrameScheduler,
    C: CaptionSink,
{
    pub fn builder() -> ClockDriverBuilder<S, F, C> {
        ClockDriverBuilder::new()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Id of the scene whose caption is on display, once a frame has been rendered.
    pub fn active_scene(&self) -> Option<&'static str> {
        self.active_scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn captions(&self) -> &C {
        &self.captions
    }

    pub fn into_parts(self) -> (S, F, C) {
        (self.surface, self.scheduler, self.captions)
    }

    /// Flip between `Running` and `Stopped`.
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Running => self.pause(),
            PlaybackState::Stopped => self.play(),
        }
    }

    /// Resume from the paused position. No-op when already running.
    fn play(&mut self) {
        if self.state == PlaybackState::Running {
            return;
        }
        self.state = PlaybackState::Running;
        self.arm();
        tracing::debug!(resume_at = self.clock.last_elapsed(), "playback running");
    }

    /// Stop and disarm, keeping the elapsed position. No-op when already stopped.
    fn pause(&mut self) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        self.disarm();
        self.clock = self.clock.paused();
        self.state = PlaybackState::Stopped;
        tracing::debug!(paused_at = self.clock.last_elapsed(), "playback stopped");
    }

    /// Start the story over: the next rendered frame is at elapsed 0.
    pub fn restart(&mut self) {
        self.disarm();
        self.clock = ClockState::fresh();
        self.state = PlaybackState::Running;
        self.arm();
        tracing::debug!("playback restarted");
    }

    /// Handle a delivered frame callback at host time `timestamp_ms`.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> SavannaResult<TickOutcome> {
        if self.state == PlaybackState::Stopped || self.pending.is_none() {
            return Ok(TickOutcome::Idle);
        }
        if !timestamp_ms.is_finite() {
            return Err(SavannaError::validation(format!(
                "frame timestamp must be finite, got {timestamp_ms}"
            )));
        }
        self.pending = None;

        let elapsed = self.clock.elapsed_at(timestamp_ms);
        compose_frame(&mut self.surface, elapsed);

        let scene = resolve_scene(elapsed);
        if self.active_scene != Some(scene.id) {
            tracing::debug!(from = ?self.active_scene, to = scene.id, elapsed, "scene changed");
            self.active_scene = Some(scene.id);
            self.captions.scene_changed(scene);
        }

        self.arm();
        Ok(TickOutcome::Rendered { elapsed, scene })
    }

    fn arm(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/driver.rs"]
mod tests;
