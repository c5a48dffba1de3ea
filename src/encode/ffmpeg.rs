use std::{
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    thread::JoinHandle,
};

use anyhow::Context as _;

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::error::{SlidecastError, SlidecastResult},
    render::frame::FrameRGBA,
};

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// File the encoder writes to.
    pub out_path: PathBuf,
    /// Replace `out_path` when it already exists.
    pub overwrite: bool,
    /// libx264 preset.
    pub preset: String,
    /// Encoder threads (`0` = ffmpeg default).
    pub threads: u32,
}

impl FfmpegSinkOpts {
    /// Overwriting `ultrafast` encode into `out_path` with ffmpeg's default threading.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            preset: "ultrafast".to_string(),
            threads: 0,
        }
    }
}

/// A running `ffmpeg` child fed through stdin, with stderr collected on a side thread.
struct EncoderProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl EncoderProcess {
    fn spawn(mut cmd: Command) -> SlidecastResult<Self> {
        let mut child = cmd
            .spawn()
            .map_err(|e| SlidecastError::encoding_from(e, "could not start ffmpeg"))?;
        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        if stdin.is_none() {
            let _ = child.kill();
            return Err(SlidecastError::encoding("ffmpeg stdin pipe is missing"));
        }
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> SlidecastResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SlidecastError::encoding("ffmpeg stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| SlidecastError::encoding_from(e, "ffmpeg stopped accepting frames"))
    }

    fn collect_stderr(&mut self) -> String {
        match self.stderr.take().map(JoinHandle::join) {
            Some(Ok(Ok(bytes))) => String::from_utf8_lossy(&bytes).trim().to_string(),
            _ => String::new(),
        }
    }

    /// Close stdin and wait for the muxer to finish.
    fn finish(mut self) -> SlidecastResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| SlidecastError::encoding_from(e, "waiting for ffmpeg failed"))?;
        let stderr = self.collect_stderr();
        if !status.success() {
            return Err(SlidecastError::encoding(format!(
                "ffmpeg failed ({status}): {stderr}"
            )));
        }
        Ok(())
    }

    fn kill(mut self) {
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.collect_stderr();
    }
}

/// Sink that encodes H.264/AAC MP4 by piping raw RGBA frames into the system `ffmpeg`.
///
/// The mixed narration/music track is read from the `f32le` file named in `SinkConfig.audio`.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    process: Option<EncoderProcess>,
    cfg: Option<SinkConfig>,
    next_idx: u64,
}

impl FfmpegSink {
    /// Sink writing to `opts.out_path`; nothing is spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            process: None,
            cfg: None,
            next_idx: 0,
        }
    }

    fn build_command(&self, cfg: &SinkConfig) -> SlidecastResult<Command> {
        cfg.validate()?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(["-loglevel", "error"]);

        // rawvideo input: size and rate must precede `-i`.
        let size = format!("{}x{}", cfg.width, cfg.height);
        let rate = format!("{}/{}", cfg.fps.num, cfg.fps.den);
        cmd.args(["-f", "rawvideo", "-pix_fmt", "rgba", "-s", &size, "-r", &rate])
            .args(["-i", "pipe:0"]);

        match &cfg.audio {
            Some(audio) => {
                let rate = audio.sample_rate.to_string();
                let channels = audio.channels.to_string();
                cmd.args(["-f", "f32le", "-ar", &rate, "-ac", &channels, "-i"])
                    .arg(&audio.path)
                    .args(["-c:a", "aac"]);
            }
            None => {
                cmd.arg("-an");
            }
        }

        cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-preset"])
            .arg(&self.opts.preset);
        if self.opts.threads > 0 {
            cmd.arg("-threads").arg(self.opts.threads.to_string());
        }
        // Output may be a temporary sibling name; pin the container.
        cmd.args(["-movflags", "+faststart", "-f", "mp4"])
            .arg(&self.opts.out_path);
        Ok(cmd)
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> SlidecastResult<()> {
        let cmd = self.build_command(&cfg)?;

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(SlidecastError::invalid_input(format!(
                "refusing to overwrite '{}'",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(SlidecastError::encoding("ffmpeg was not found on PATH"));
        }

        tracing::debug!(
            out = %self.opts.out_path.display(),
            frames = cfg.total_frames,
            audio = cfg.audio.is_some(),
            "starting ffmpeg encoder"
        );
        self.process = Some(EncoderProcess::spawn(cmd)?);
        self.cfg = Some(cfg);
        self.next_idx = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> SlidecastResult<()> {
        let (Some(cfg), Some(process)) = (self.cfg.as_ref(), self.process.as_mut()) else {
            return Err(SlidecastError::encoding("ffmpeg sink is not running"));
        };
        if idx < self.next_idx {
            return Err(SlidecastError::encoding(format!(
                "frame {idx} arrived after frame {}",
                self.next_idx - 1
            )));
        }
        cfg.check_frame(frame)?;
        process.write(&frame.data)?;
        self.next_idx = idx + 1;
        Ok(())
    }

    fn end(&mut self) -> SlidecastResult<()> {
        let process = self
            .process
            .take()
            .ok_or_else(|| SlidecastError::encoding("ffmpeg sink is not running"))?;
        self.cfg = None;
        process.finish()?;
        tracing::debug!(out = %self.opts.out_path.display(), "ffmpeg encoder finished");
        Ok(())
    }

    fn abort(&mut self) {
        tracing::debug!(out = %self.opts.out_path.display(), "aborting ffmpeg encoder");
        if let Some(process) = self.process.take() {
            process.kill();
        }
        self.cfg = None;
        let _ = std::fs::remove_file(&self.opts.out_path);
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(process) = self.process.take() {
            process.kill();
        }
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> SlidecastResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Return `true` when `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
