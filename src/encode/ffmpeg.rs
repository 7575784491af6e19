use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, OrderGuard, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SavannaError, SavannaResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Straight RGBA8 color that translucent pixels are flattened onto.
    pub bg_rgba: [u8; 4],
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
        }
    }
}

/// Pipes raw frames into the system `ffmpeg` to produce an h264 MP4.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    order: OrderGuard,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            order: OrderGuard::default(),
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn command(&self, cfg: &SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
            "-r",
            &fps_arg(cfg.fps),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(level = "debug", skip(self), fields(out = %self.opts.out_path.display()))]
    fn begin(&mut self, cfg: SinkConfig) -> SavannaResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SavannaError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(SavannaError::validation("ffmpeg sink fps must be non-zero"));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(SavannaError::validation(format!(
                "ffmpeg sink needs even dimensions for yuv420p, got {}x{}",
                cfg.width, cfg.height
            )));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SavannaError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SavannaError::encode(
                "ffmpeg is required for MP4 output but was not found on PATH",
            ));
        }

        let mut child = self
            .command(&cfg)
            .spawn()
            .map_err(|e| SavannaError::encode(format!("failed to spawn ffmpeg: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SavannaError::encode("ffmpeg stdin was not captured"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SavannaError::encode("ffmpeg stderr was not captured"))?;
        // Drain stderr concurrently so a chatty encoder cannot block on a full pipe.
        let stderr_drain = std::thread::spawn(move || {
            let mut buf = Vec::new();
            stderr.read_to_end(&mut buf)?;
            Ok(buf)
        });

        self.scratch = vec![0u8; cfg.frame_len()];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.order = OrderGuard::default();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SavannaResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| SavannaError::encode("ffmpeg sink not started"))?;
        self.order.advance(idx)?;
        cfg.check_frame(frame)?;

        if frame.premultiplied {
            flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;
        } else {
            flatten_straight_over_bg(&mut self.scratch, &frame.data, self.opts.bg_rgba)?;
        }

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SavannaError::encode("ffmpeg sink already finished"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| SavannaError::encode(format!("failed to write frame to ffmpeg: {e}")))
    }

    fn end(&mut self) -> SavannaResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| SavannaError::encode("ffmpeg sink not started"))?;
        let status = child
            .wait()
            .map_err(|e| SavannaError::encode(format!("failed to wait for ffmpeg: {e}")))?;

        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| SavannaError::encode("ffmpeg stderr reader panicked"))?
                .map_err(|e| SavannaError::encode(format!("reading ffmpeg stderr failed: {e}")))?,
            None => Vec::new(),
        };
        self.cfg = None;

        if !status.success() {
            return Err(SavannaError::encode(format!(
                "ffmpeg exited with {status}: {}",
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg finished");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    /// A sink dropped without `end` kills its encoder instead of leaving it running.
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg killed on drop");
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}

fn fps_arg(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

/// Composite premultiplied RGBA8 over an opaque background.
pub(crate) fn flatten_premul_over_bg(
    dst: &mut [u8],
    src: &[u8],
    bg_rgba: [u8; 4],
) -> SavannaResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SavannaError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(bg_rgba[c]), inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn flatten_straight_over_bg(dst: &mut [u8], src: &[u8], bg_rgba: [u8; 4]) -> SavannaResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SavannaError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let v = mul_div255_u16(u16::from(s[c]), a) + mul_div255_u16(u16::from(bg_rgba[c]), inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> SavannaResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// True when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
