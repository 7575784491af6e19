//! Savanna Tale is a deterministic, time-driven 2D vignette: a curious monkey, an irritated lion
//! and a twenty-second loop that ends in silence.
//!
//! Every frame is a pure function of one scalar, the elapsed loop time in seconds:
//!
//! 1. **Pose**: `elapsed -> LionPose / MonkeyPose / DustCloud` via clamped progress windows
//! 2. **Compose**: paint sky, sun, terrain, lion, monkey and dust onto a [`Surface`] in a fixed
//!    back-to-front order ([`compose_frame`])
//! 3. **Drive**: a [`ClockDriver`] turns host frame callbacks into elapsed time, handles
//!    play/pause/restart and announces scene captions on change
//! 4. **Encode** (optional): stream frames to the system `ffmpeg` or a PNG sequence
//!
//! Surfaces are pluggable: [`RecordingSurface`] captures draw commands for inspection and
//! [`CpuSurface`] rasterizes with `vello_cpu` into premultiplied RGBA8.
#![forbid(unsafe_code)]

mod animation;
mod clock;
mod encode;
mod foundation;
mod render;
mod scene;
mod session;
mod story;

pub use animation::ease::{Ease, ProgressWindow};
pub use clock::captions::{CaptionLog, CaptionSink, TracingCaptions};
pub use clock::driver::{ClockDriver, ClockDriverBuilder, PlaybackState, TickOutcome};
pub use clock::scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use clock::state::{ClockState, wrap_seconds};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use encode::png::PngSequenceSink;
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{SavannaError, SavannaResult};
pub use foundation::math::{clamp, ease_in_out, lerp, progress};
pub use render::backend::{FrameRGBA, RenderSettings};
pub use render::cpu::CpuSurface;
pub use render::paint::{ColorStop, LineCap, LinearGradient, Paint, StrokeStyle};
pub use render::recording::{DrawCommand, RecordingSurface};
pub use render::state::{DrawState, StateStack};
pub use render::surface::{Surface, circle_path, ellipse_path, polyline_path};
pub use scene::compose::{DRAW_ORDER, Layer, compose_frame};
pub use scene::environment::{
    DustCloud, draw_dust, draw_sky, draw_sun, draw_terrain, sky_paint, sun_center, wave_y,
};
pub use scene::lion::{LionPose, draw_lion};
pub use scene::monkey::{MIN_VISIBLE_OPACITY, MonkeyPose, draw_monkey, tail_contact};
pub use session::offline::{
    CaptionCue, LoopRender, LoopRenderOpts, RenderStats, render_loop, render_still,
};
pub use story::timetable::{
    CANVAS, CANVAS_LABEL, HEIGHT, SCENES, SYNOPSIS, SceneInterval, TITLE, TOTAL_DURATION, WIDTH,
    resolve_scene, scene_by_id, validate_partition,
};
