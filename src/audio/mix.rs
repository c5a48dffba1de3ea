use std::path::Path;

use crate::{
    assets::media::AudioPcm,
    foundation::error::{SlidecastError, SlidecastResult},
};

/// Gains applied when summing the two tracks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioMixSpec {
    /// Narration gain (always `1.0` in rendered jobs).
    pub narration_gain: f32,
    /// Music bed gain.
    pub music_gain: f32,
}

impl AudioMixSpec {
    /// Unity narration with the given music gain.
    pub fn with_music_gain(music_gain: f32) -> Self {
        Self {
            narration_gain: 1.0,
            music_gain,
        }
    }
}

/// Result of [`mix_tracks`].
#[derive(Clone, Debug)]
pub struct MixedAudio {
    /// Mixed PCM; exactly the requested number of frames.
    pub pcm: AudioPcm,
    /// `true` when a music bed contributed to the mix.
    pub music_used: bool,
    /// Number of music copies concatenated before trimming (`0` without music).
    pub music_loops: usize,
}

/// Loop `pcm` end to end until it covers `frames` sample frames, then trim to exactly `frames`.
///
/// Longer inputs are only trimmed. An empty input yields silence.
pub fn fit_to_length(pcm: &AudioPcm, frames: usize) -> (Vec<f32>, usize) {
    let channels = usize::from(pcm.channels.max(1));
    let want = frames * channels;
    let src = &pcm.interleaved_f32;
    if src.is_empty() {
        return (vec![0.0; want], 0);
    }

    let loops = want.div_ceil(src.len()).max(1);
    let mut out = Vec::with_capacity(loops * src.len());
    for _ in 0..loops {
        out.extend_from_slice(src);
    }
    out.truncate(want);
    (out, loops)
}

/// Mix narration with an optional music bed into exactly `frames` sample frames.
///
/// `sample = narration * narration_gain + music * music_gain`, clamped to `[-1, 1]`. Narration
/// is zero-padded or trimmed to `frames`; music is looped/trimmed by [`fit_to_length`]. Without
/// music the output is the narration alone.
pub fn mix_tracks(
    narration: &AudioPcm,
    music: Option<&AudioPcm>,
    spec: AudioMixSpec,
    frames: usize,
) -> SlidecastResult<MixedAudio> {
    if narration.channels == 0 || narration.sample_rate == 0 {
        return Err(SlidecastError::invalid_input(
            "narration must have non-zero channels and sample rate",
        ));
    }
    if let Some(m) = music
        && (m.channels != narration.channels || m.sample_rate != narration.sample_rate)
    {
        return Err(SlidecastError::invalid_input(format!(
            "music format {}ch@{}Hz does not match narration {}ch@{}Hz",
            m.channels, m.sample_rate, narration.channels, narration.sample_rate
        )));
    }

    let channels = usize::from(narration.channels);
    let want = frames * channels;
    let mut out = vec![0.0f32; want];
    let n = narration.interleaved_f32.len().min(want);
    for (dst, &src) in out[..n].iter_mut().zip(&narration.interleaved_f32[..n]) {
        *dst = src * spec.narration_gain;
    }

    let mut music_loops = 0;
    if let Some(m) = music {
        let (bed, loops) = fit_to_length(m, frames);
        music_loops = loops;
        for (dst, src) in out.iter_mut().zip(bed) {
            *dst += src * spec.music_gain;
        }
    }

    for s in &mut out {
        *s = s.clamp(-1.0, 1.0);
    }

    Ok(MixedAudio {
        pcm: AudioPcm {
            sample_rate: narration.sample_rate,
            channels: narration.channels,
            interleaved_f32: out,
        },
        music_used: music.is_some(),
        music_loops,
    })
}

/// Write interleaved `f32` PCM samples to raw little-endian `.f32le` file.
pub fn write_mix_to_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            SlidecastError::encoding(format!(
                "failed to create audio mix output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        SlidecastError::encoding_from(
            e,
            format!("failed to write mixed audio file '{}'", out_path.display()),
        )
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
