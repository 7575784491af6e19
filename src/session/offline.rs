use rayon::prelude::*;
use serde::Serialize;

use crate::clock::captions::CaptionLog;
use crate::clock::driver::{ClockDriver, TickOutcome};
use crate::clock::scheduler::ManualScheduler;
use crate::clock::state::wrap_seconds;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SavannaError, SavannaResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::CpuSurface;
use crate::scene::compose::compose_frame;
use crate::story::timetable::{SceneInterval, TOTAL_DURATION, resolve_scene};

const MAX_CHUNK_BYTES: usize = 128 * 1024 * 1024;

/// Options for [`render_loop`].
#[derive(Clone, Debug)]
pub struct LoopRenderOpts {
    pub fps: Fps,
    /// Number of full story loops to render.
    pub loops: u32,
    pub settings: RenderSettings,
    /// Render frames on a rayon pool instead of through the playback driver.
    pub parallel: bool,
    /// Worker threads for parallel mode; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Frames rendered per parallel batch before they are handed to the sink.
    pub chunk_size: usize,
}

impl Default for LoopRenderOpts {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            loops: 1,
            settings: RenderSettings::default(),
            parallel: false,
            threads: None,
            chunk_size: 64,
        }
    }
}

impl LoopRenderOpts {
    /// Frames whose timestamp falls inside the rendered loops.
    pub fn frame_count(&self) -> u64 {
        let secs = (TOTAL_DURATION as u64) * u64::from(self.loops);
        let num = u64::from(self.fps.num);
        let den = u64::from(self.fps.den);
        (secs * num).div_ceil(den)
    }

    /// Host timestamp of frame `idx`, in milliseconds from the start of the render.
    pub fn timestamp_ms(&self, idx: u64) -> f64 {
        self.fps.frames_to_millis(idx)
    }

    fn validate(&self) -> SavannaResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.loops == 0 {
            return Err(SavannaError::validation("loops must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(SavannaError::validation("threads must be >= 1 when set"));
        }
        Ok(())
    }
}

/// One caption change in an offline render.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CaptionCue {
    pub frame: u64,
    /// Seconds from the start of the render.
    pub at_secs: f64,
    pub scene: SceneInterval,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    pub frames_total: u64,
    pub width: u32,
    pub height: u32,
}

/// Result of [`render_loop`].
#[derive(Clone, Debug, Default, Serialize)]
pub struct LoopRender {
    pub stats: RenderStats,
    pub captions: Vec<CaptionCue>,
}

impl LoopRender {
    pub fn captions_json(&self) -> SavannaResult<String> {
        Ok(serde_json::to_string_pretty(&self.captions)?)
    }
}

/// Render one frame at `elapsed` seconds; values outside the loop wrap.
#[tracing::instrument(level = "debug", skip(settings))]
pub fn render_still(elapsed: f64, settings: &RenderSettings) -> SavannaResult<FrameRGBA> {
    if !elapsed.is_finite() {
        return Err(SavannaError::validation(format!(
            "elapsed time must be finite, got {elapsed}"
        )));
    }
    let mut surface = CpuSurface::new(settings)?;
    compose_frame(&mut surface, wrap_seconds(elapsed));
    surface.snapshot()
}

/// Render `opts.loops` full loops into `sink`, frames in order.
///
/// Sequential mode replays the story through a [`ClockDriver`] fed synthetic timestamps, exactly
/// as a host would at a fixed frame rate. Parallel mode renders each frame independently on a
/// rayon pool and produces identical frames and captions.
///
/// A failure after `begin` still calls `end` on the sink before the error is returned.
#[tracing::instrument(level = "info", skip_all, fields(fps = ?opts.fps, loops = opts.loops))]
pub fn render_loop(opts: &LoopRenderOpts, sink: &mut dyn FrameSink) -> SavannaResult<LoopRender> {
    opts.validate()?;
    let probe = CpuSurface::new(&opts.settings)?;
    let size = probe.pixel_size();
    let cfg = SinkConfig {
        width: size.width,
        height: size.height,
        fps: opts.fps,
    };
    let stats = RenderStats {
        frames_total: opts.frame_count(),
        width: size.width,
        height: size.height,
    };

    sink.begin(cfg)?;
    let streamed = if opts.parallel {
        render_parallel(opts, cfg, sink)
    } else {
        render_sequential(opts, probe, sink)
    };
    let captions = match streamed {
        Ok(captions) => captions,
        Err(e) => {
            if let Err(end_err) = sink.end() {
                tracing::warn!(error = %end_err, "sink end failed after render error");
            }
            return Err(e);
        }
    };
    sink.end()?;

    tracing::info!(
        frames = stats.frames_total,
        captions = captions.len(),
        "loop render finished"
    );
    Ok(LoopRender { stats, captions })
}

fn render_sequential(
    opts: &LoopRenderOpts,
    surface: CpuSurface,
    sink: &mut dyn FrameSink,
) -> SavannaResult<Vec<CaptionCue>> {
    let mut driver = ClockDriver::builder()
        .surface(surface)
        .scheduler(ManualScheduler::new())
        .captions(CaptionLog::new())
        .build()?;

    let mut cues = Vec::new();
    for i in 0..opts.frame_count() {
        driver.scheduler_mut().fire();
        let seen = driver.captions().len();
        let outcome = driver.on_frame(opts.timestamp_ms(i))?;
        let TickOutcome::Rendered { .. } = outcome else {
            return Err(SavannaError::render(format!(
                "playback driver skipped frame {i}"
            )));
        };
        if driver.captions().len() > seen
            && let Some(scene) = driver.captions().current()
        {
            cues.push(CaptionCue {
                frame: i,
                at_secs: opts.fps.frames_to_secs(i),
                scene: *scene,
            });
        }
        let frame = driver.surface_mut().snapshot()?;
        sink.push_frame(FrameIndex(i), &frame)?;
    }
    Ok(cues)
}

fn render_parallel(
    opts: &LoopRenderOpts,
    cfg: SinkConfig,
    sink: &mut dyn FrameSink,
) -> SavannaResult<Vec<CaptionCue>> {
    let pool = build_thread_pool(opts.threads)?;
    let total = opts.frame_count();
    let max_by_mem = (MAX_CHUNK_BYTES / cfg.frame_len().max(1)).max(1);
    let chunk = opts.chunk_size.max(1).min(max_by_mem) as u64;
    let elapsed_of = |i: u64| wrap_seconds(opts.timestamp_ms(i) / 1000.0);

    let cues = caption_cues(opts, (0..total).map(elapsed_of));

    let mut start = 0;
    while start < total {
        let end = (start + chunk).min(total);
        let frames: Vec<SavannaResult<FrameRGBA>> = pool.install(|| {
            (start..end)
                .into_par_iter()
                .map_init(
                    || CpuSurface::new(&opts.settings),
                    |surface, i| {
                        let surface = surface
                            .as_mut()
                            .map_err(|e| SavannaError::setup(e.to_string()))?;
                        compose_frame(surface, elapsed_of(i));
                        surface.snapshot()
                    },
                )
                .collect()
        });
        for (i, frame) in (start..end).zip(frames) {
            sink.push_frame(FrameIndex(i), &frame?)?;
        }
        tracing::debug!(start, end, "chunk rendered");
        start = end;
    }
    Ok(cues)
}

fn caption_cues(opts: &LoopRenderOpts, elapsed: impl Iterator<Item = f64>) -> Vec<CaptionCue> {
    let mut cues: Vec<CaptionCue> = Vec::new();
    for (i, t) in elapsed.enumerate() {
        let scene = resolve_scene(t);
        if cues.last().map(|c| c.scene.id) != Some(scene.id) {
            cues.push(CaptionCue {
                frame: i as u64,
                at_secs: opts.fps.frames_to_secs(i as u64),
                scene: *scene,
            });
        }
    }
    cues
}

fn build_thread_pool(threads: Option<usize>) -> SavannaResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SavannaError::setup(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/session/offline.rs"]
mod tests;
