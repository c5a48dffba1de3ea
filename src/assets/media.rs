use std::path::Path;

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// Channel count of every decoded and mixed buffer.
pub const MIX_CHANNELS: u16 = 2;

/// Decoded interleaved PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Interleaved `f32` samples in `[-1, 1]`.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Silent buffer of `frames` sample frames.
    pub fn silence(sample_rate: u32, channels: u16, frames: usize) -> Self {
        Self {
            sample_rate,
            channels,
            interleaved_f32: vec![0.0; frames * usize::from(channels)],
        }
    }

    /// Number of sample frames (samples per channel).
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }
}

/// Number of sample frames covering `secs` at `sample_rate`, rounded to nearest.
pub fn secs_to_frames(secs: f64, sample_rate: u32) -> usize {
    (secs * f64::from(sample_rate)).round().max(0.0) as usize
}

/// Audio decoding seam. The pipeline only ever asks for stereo `f32` at the mix rate.
pub trait AudioDecoder: Sync {
    /// Decode `path` to interleaved stereo `f32` at `sample_rate`.
    fn decode(&self, path: &Path, sample_rate: u32) -> SlidecastResult<AudioPcm>;
}

/// Decoder backed by the system `ffmpeg` binary.
#[derive(Clone, Copy, Debug, Default)]
pub struct FfmpegAudioDecoder;

impl AudioDecoder for FfmpegAudioDecoder {
    fn decode(&self, path: &Path, sample_rate: u32) -> SlidecastResult<AudioPcm> {
        decode_audio_f32_stereo(path, sample_rate)
    }
}

/// Decode any ffmpeg-readable audio file to interleaved stereo `f32`.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> SlidecastResult<AudioPcm> {
    if !path.is_file() {
        return Err(SlidecastError::invalid_input(format!(
            "audio file '{}' does not exist",
            path.display()
        )));
    }

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            &MIX_CHANNELS.to_string(),
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| anyhow::anyhow!("failed to run ffmpeg for audio decode: {e}"))?;

    if !out.status.success() {
        return Err(anyhow::anyhow!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )
        .into());
    }

    let interleaved_f32 = f32le_bytes_to_samples(&out.stdout)?;
    tracing::debug!(
        path = %path.display(),
        samples = interleaved_f32.len(),
        "decoded audio"
    );
    Ok(AudioPcm {
        sample_rate,
        channels: MIX_CHANNELS,
        interleaved_f32,
    })
}

fn f32le_bytes_to_samples(bytes: &[u8]) -> SlidecastResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(anyhow::anyhow!("decoded audio byte length is not aligned to f32 samples").into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
