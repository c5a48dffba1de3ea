use std::path::{Path, PathBuf};

use crate::{
    assets::{
        decode::{SkippedImage, load_slides},
        media::{AudioDecoder, AudioPcm, MIX_CHANNELS, secs_to_frames},
    },
    audio::mix::{AudioMixSpec, mix_tracks, write_mix_to_f32le_file},
    config::{ContentCategory, RenderConfig},
    effects::background::BackgroundSpec,
    encode::{
        ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir},
        sink::{AudioInputConfig, FrameSink, SinkConfig},
    },
    foundation::{
        cancel::CancelToken,
        error::{SlidecastError, SlidecastResult},
    },
    motion::ken_burns::DirectionSource,
    render::{
        frame::{FrameCompositor, SlideLayer},
        plan::{SlidePlan, SlideSource, plan_slides},
    },
};

/// Lifecycle of one render job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    /// Job created, nothing done yet.
    Idle,
    /// Config, job shape and sources are being checked and decoded.
    Validating,
    /// Slide durations, placements, motion and fades are being planned.
    Allocating,
    /// Background and slide layers are being stacked.
    Compositing,
    /// Narration and music are being mixed.
    Mixing,
    /// Frames and audio are being written by the sink.
    Encoding,
    /// Finished successfully.
    Done,
    /// Finished with an error.
    Failed,
}

impl RenderStage {
    /// `true` for [`RenderStage::Done`] and [`RenderStage::Failed`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Inputs of one render.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderJob {
    /// Narration audio file; its length sets the video length.
    pub narration: PathBuf,
    /// Known narration length in seconds, used instead of the decoded length.
    pub narration_duration: Option<f64>,
    /// Slide images in display order.
    pub slides: Vec<PathBuf>,
    /// Optional music bed.
    pub music: Option<PathBuf>,
    /// Selects the background gradient.
    pub category: ContentCategory,
    /// Destination file.
    pub out_path: PathBuf,
}

impl RenderJob {
    /// Job with no music and the default category.
    pub fn new(
        narration: impl Into<PathBuf>,
        slides: Vec<PathBuf>,
        out_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            narration: narration.into(),
            narration_duration: None,
            slides,
            music: None,
            category: ContentCategory::Default,
            out_path: out_path.into(),
        }
    }

    /// Attach a music bed.
    pub fn with_music(mut self, music: impl Into<PathBuf>) -> Self {
        self.music = Some(music.into());
        self
    }

    /// Set the background category.
    pub fn with_category(mut self, category: ContentCategory) -> Self {
        self.category = category;
        self
    }

    /// Override the narration length.
    pub fn with_narration_duration(mut self, secs: f64) -> Self {
        self.narration_duration = Some(secs);
        self
    }

    fn validate(&self) -> SlidecastResult<()> {
        if self.slides.is_empty() {
            return Err(SlidecastError::invalid_input(
                "render job needs at least one slide image",
            ));
        }
        if let Some(d) = self.narration_duration
            && !(d.is_finite() && d > 0.0)
        {
            return Err(SlidecastError::invalid_input(format!(
                "narration duration must be finite and > 0 (got {d})"
            )));
        }
        if self.out_path.as_os_str().is_empty() {
            return Err(SlidecastError::invalid_input("output path is empty"));
        }
        Ok(())
    }
}

/// `<dir>/video_<id>_final.mp4`.
pub fn default_output_path(dir: &Path, video_id: &str) -> PathBuf {
    dir.join(format!("video_{video_id}_final.mp4"))
}

/// Collaborators injected into a render.
#[derive(Clone)]
pub struct RenderContext<'a> {
    /// Audio decoder for narration and music.
    pub decoder: &'a dyn AudioDecoder,
    /// Zoom direction per slide.
    pub directions: &'a dyn DirectionSource,
    /// Checked between stages and after every frame.
    pub cancel: CancelToken,
}

impl<'a> RenderContext<'a> {
    /// Context with a fresh, uncancelled token.
    pub fn new(decoder: &'a dyn AudioDecoder, directions: &'a dyn DirectionSource) -> Self {
        Self {
            decoder,
            directions,
            cancel: CancelToken::new(),
        }
    }

    /// Use `cancel` instead of the context's own token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Summary of a finished render.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RenderReport {
    /// Final file, when rendered through [`render_to_file`].
    pub out_path: Option<PathBuf>,
    /// Stages entered, in order, ending with [`RenderStage::Done`].
    pub stages: Vec<RenderStage>,
    /// Video length in seconds.
    pub duration_secs: f64,
    /// Per-slide plan of the surviving images.
    pub slides: Vec<SlidePlan>,
    /// Images dropped because they could not be decoded.
    pub skipped_images: Vec<SkippedImage>,
    /// Number of video frames written.
    pub frames: u64,
    /// Mixed audio length in sample frames (per channel).
    pub audio_samples: usize,
    /// Mixed audio length in seconds.
    pub audio_secs: f64,
    /// `true` when a music bed was mixed in.
    pub music_used: bool,
}

#[derive(Default)]
struct StageLog {
    stages: Vec<RenderStage>,
}

impl StageLog {
    fn enter(&mut self, stage: RenderStage) {
        tracing::info!(stage = ?stage, "render stage");
        self.stages.push(stage);
    }
}

/// Run one render against `sink`.
///
/// On failure or cancellation the sink is aborted if it was started, so no partial output is
/// kept. A job whose images all fail to decode is rejected before the sink is touched.
#[tracing::instrument(skip_all, fields(slides = job.slides.len(), out = %job.out_path.display()))]
pub fn render_with_sink(
    job: &RenderJob,
    cfg: &RenderConfig,
    ctx: &RenderContext<'_>,
    sink: &mut dyn FrameSink,
) -> SlidecastResult<RenderReport> {
    let mut log = StageLog::default();
    log.enter(RenderStage::Idle);
    let mut sink_started = false;
    match run_stages(job, cfg, ctx, sink, &mut log, &mut sink_started) {
        Ok(report) => Ok(report),
        Err(e) => {
            log.enter(RenderStage::Failed);
            if sink_started {
                sink.abort();
            }
            tracing::warn!(error = %e, "render failed");
            Err(e)
        }
    }
}

fn run_stages(
    job: &RenderJob,
    cfg: &RenderConfig,
    ctx: &RenderContext<'_>,
    sink: &mut dyn FrameSink,
    log: &mut StageLog,
    sink_started: &mut bool,
) -> SlidecastResult<RenderReport> {
    log.enter(RenderStage::Validating);
    cfg.validate()?;
    job.validate()?;
    let fps = cfg.frame_rate()?;
    ctx.cancel.check()?;

    let (narration, d) = decode_narration(job, cfg, ctx.decoder)?;
    ctx.cancel.check()?;

    let ((images, skipped_images), music) = rayon::join(
        || load_slides(&job.slides),
        || decode_music_bed(job, cfg, ctx.decoder),
    );
    if images.is_empty() {
        return Err(SlidecastError::no_valid_input(format!(
            "none of the {} slide images could be decoded",
            job.slides.len()
        )));
    }
    ctx.cancel.check()?;

    log.enter(RenderStage::Allocating);
    let sources: Vec<SlideSource> = images
        .iter()
        .map(|img| SlideSource {
            path: img.source.clone(),
            width: img.width,
            height: img.height,
        })
        .collect();
    let plans = plan_slides(d, &sources, cfg, ctx.directions)?;
    tracing::info!(total_secs = d, slides = plans.len(), "timeline allocated");
    for p in &plans {
        tracing::debug!(index = p.timing.index, start = p.timing.start, duration = p.timing.duration, "slide");
    }
    ctx.cancel.check()?;

    log.enter(RenderStage::Compositing);
    let last = plans.len() - 1;
    let layers = images
        .into_iter()
        .zip(plans.iter().cloned())
        .enumerate()
        .map(|(i, (image, plan))| SlideLayer {
            image,
            plan,
            is_last: i == last,
        })
        .collect();
    let compositor = FrameCompositor::new(
        cfg.canvas,
        &BackgroundSpec::for_category(job.category),
        layers,
    );
    ctx.cancel.check()?;

    log.enter(RenderStage::Mixing);
    let audio_frames = secs_to_frames(d, cfg.sample_rate);
    let mixed = mix_tracks(
        &narration,
        music.as_ref(),
        AudioMixSpec::with_music_gain(cfg.music_gain),
        audio_frames,
    )?;
    let mix_path = std::env::temp_dir().join(format!(
        "slidecast_audio_mix_{}_{}.f32le",
        std::process::id(),
        unix_nanos()
    ));
    let _mix_tmp = TempFileGuard(Some(mix_path.clone()));
    write_mix_to_f32le_file(&mixed.pcm.interleaved_f32, &mix_path)?;
    tracing::debug!(
        samples = audio_frames,
        music_loops = mixed.music_loops,
        "audio mixed"
    );
    ctx.cancel.check()?;

    log.enter(RenderStage::Encoding);
    let frames = fps.frames_for_secs(d);
    *sink_started = true;
    sink.begin(SinkConfig {
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps,
        total_frames: frames,
        audio: Some(AudioInputConfig {
            path: mix_path,
            sample_rate: mixed.pcm.sample_rate,
            channels: mixed.pcm.channels,
        }),
    })
    .map_err(as_encoding)?;
    for k in 0..frames {
        let t = fps.frame_time_secs(k).min(d);
        let frame = compositor.render_at(t);
        sink.push_frame(k, &frame).map_err(as_encoding)?;
        ctx.cancel.check()?;
    }
    sink.end().map_err(as_encoding)?;

    log.enter(RenderStage::Done);
    Ok(RenderReport {
        out_path: None,
        stages: std::mem::take(&mut log.stages),
        duration_secs: d,
        slides: plans,
        skipped_images,
        frames,
        audio_samples: mixed.pcm.frames(),
        audio_secs: mixed.pcm.duration_secs(),
        music_used: mixed.music_used,
    })
}

/// Decode the narration and resolve the target duration.
///
/// The narration drives the mix, so it must already be in the mix format.
fn decode_narration(
    job: &RenderJob,
    cfg: &RenderConfig,
    decoder: &dyn AudioDecoder,
) -> SlidecastResult<(AudioPcm, f64)> {
    let narration = decoder.decode(&job.narration, cfg.sample_rate).map_err(|e| {
        SlidecastError::missing_source(format!(
            "narration '{}': {e}",
            job.narration.display()
        ))
    })?;
    if narration.channels != MIX_CHANNELS || narration.sample_rate != cfg.sample_rate {
        return Err(SlidecastError::missing_source(format!(
            "narration '{}' decoded as {}ch@{}Hz, expected {}ch@{}Hz",
            job.narration.display(),
            narration.channels,
            narration.sample_rate,
            MIX_CHANNELS,
            cfg.sample_rate
        )));
    }
    let d = job
        .narration_duration
        .unwrap_or_else(|| narration.duration_secs());
    if !d.is_finite() || d <= 0.0 {
        return Err(SlidecastError::invalid_input(format!(
            "narration '{}' has no duration ({d}s)",
            job.narration.display()
        )));
    }
    Ok((narration, d))
}

fn decode_music_bed(
    job: &RenderJob,
    cfg: &RenderConfig,
    decoder: &dyn AudioDecoder,
) -> Option<AudioPcm> {
    match (&job.music, cfg.music_enabled) {
        (Some(path), true) => match decode_music(decoder, path, cfg.sample_rate) {
            Ok(pcm) => Some(pcm),
            Err(e) => {
                tracing::warn!(error = %e, "continuing without music");
                None
            }
        },
        (Some(_), false) => {
            tracing::debug!("music disabled by config");
            None
        }
        (None, _) => None,
    }
}

fn decode_music(
    decoder: &dyn AudioDecoder,
    path: &Path,
    sample_rate: u32,
) -> SlidecastResult<AudioPcm> {
    let pcm = decoder.decode(path, sample_rate).map_err(|e| {
        SlidecastError::missing_optional_source(format!("music '{}': {e}", path.display()))
    })?;
    if pcm.channels != MIX_CHANNELS || pcm.sample_rate != sample_rate || pcm.interleaved_f32.is_empty()
    {
        return Err(SlidecastError::missing_optional_source(format!(
            "music '{}' has no usable stereo samples",
            path.display()
        )));
    }
    Ok(pcm)
}

fn as_encoding(e: SlidecastError) -> SlidecastError {
    match e {
        SlidecastError::Encoding(_) | SlidecastError::Cancelled => e,
        other => SlidecastError::encoding_from(other, "frame sink failed"),
    }
}

/// Render `job` to `job.out_path` through the system `ffmpeg`.
///
/// The file is encoded next to the destination under a temporary name and renamed into place
/// only after the encoder finished; any failure or cancellation removes the temporary file.
pub fn render_to_file(
    job: &RenderJob,
    cfg: &RenderConfig,
    ctx: &RenderContext<'_>,
) -> SlidecastResult<RenderReport> {
    ensure_parent_dir(&job.out_path)?;
    let partial = partial_path(&job.out_path);
    let mut partial_tmp = TempFileGuard(Some(partial.clone()));

    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: partial.clone(),
        overwrite: true,
        preset: cfg.encoder_preset.clone(),
        threads: cfg.encoder_threads,
    });
    let mut report = render_with_sink(job, cfg, ctx, &mut sink)?;

    std::fs::rename(&partial, &job.out_path).map_err(|e| {
        SlidecastError::encoding_from(
            e,
            format!(
                "move '{}' to '{}'",
                partial.display(),
                job.out_path.display()
            ),
        )
    })?;
    partial_tmp.0 = None;
    tracing::info!(out = %job.out_path.display(), frames = report.frames, "render finished");

    report.out_path = Some(job.out_path.clone());
    Ok(report)
}

fn partial_path(out_path: &Path) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = out_path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());
    let name = format!(
        ".{stem}.partial-{}-{}.{ext}",
        std::process::id(),
        unix_nanos()
    );
    match out_path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

fn unix_nanos() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0)
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
