use std::path::Path;
use std::sync::Arc;

use crate::assets::media::{self, AudioPcm};
use crate::foundation::error::{MemeError, MemeResult};
use crate::foundation::math::secs_to_sample_frames;

/// Immutable decoded audio track.
///
/// Transformations return new clips; the decoded samples of the source are shared, never
/// modified.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    pcm: Arc<AudioPcm>,
}

impl AudioClip {
    /// Decode `path` to interleaved stereo PCM at the mix sample rate.
    #[tracing::instrument]
    pub fn load(path: &Path) -> MemeResult<Self> {
        let pcm = media::decode_audio_f32_stereo(path, media::MIX_SAMPLE_RATE)?;
        Self::from_pcm(pcm)
    }

    pub fn from_pcm(pcm: AudioPcm) -> MemeResult<Self> {
        if pcm.sample_rate == 0 {
            return Err(MemeError::validation("audio sample_rate must be non-zero"));
        }
        if pcm.channels == 0 {
            return Err(MemeError::validation("audio channels must be non-zero"));
        }
        if !pcm
            .interleaved_f32
            .len()
            .is_multiple_of(usize::from(pcm.channels))
        {
            return Err(MemeError::validation(
                "interleaved sample count must be a multiple of the channel count",
            ));
        }
        Ok(Self { pcm: Arc::new(pcm) })
    }

    pub fn sample_rate(&self) -> u32 {
        self.pcm.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.pcm.channels
    }

    pub fn frame_count(&self) -> usize {
        self.pcm.frame_count()
    }

    pub fn duration_sec(&self) -> f64 {
        self.pcm.duration_sec()
    }

    pub fn samples(&self) -> &[f32] {
        &self.pcm.interleaved_f32
    }

    /// Repeat the whole clip end to end until it covers `target_sec`, then cut it to exactly
    /// `target_sec` (rounded to the nearest sample frame).
    ///
    /// A clip that is already long enough is only trimmed.
    pub fn looped_to(&self, target_sec: f64) -> MemeResult<Self> {
        let target_frames = secs_to_sample_frames(target_sec, self.sample_rate());
        let have = self.frame_count();
        if have >= target_frames {
            return Ok(self.trimmed_to(target_sec));
        }
        if have == 0 {
            return Err(MemeError::validation(
                "cannot loop an empty audio clip to a non-zero duration",
            ));
        }

        let loops = target_frames / have + 1;
        let mut samples = self.pcm.interleaved_f32.repeat(loops);
        samples.truncate(target_frames * usize::from(self.channels()));
        tracing::trace!(loops, target_frames, "looped audio clip");

        Ok(Self {
            pcm: Arc::new(AudioPcm {
                sample_rate: self.sample_rate(),
                channels: self.channels(),
                interleaved_f32: samples,
            }),
        })
    }

    /// Cut the clip to at most `target_sec`.
    pub fn trimmed_to(&self, target_sec: f64) -> Self {
        let target_frames = secs_to_sample_frames(target_sec, self.sample_rate());
        if target_frames >= self.frame_count() {
            return self.clone();
        }
        let len = target_frames * usize::from(self.channels());
        Self {
            pcm: Arc::new(AudioPcm {
                sample_rate: self.sample_rate(),
                channels: self.channels(),
                interleaved_f32: self.pcm.interleaved_f32[..len].to_vec(),
            }),
        }
    }

    /// Write the samples as raw little-endian `f32` to `out_path`.
    pub fn write_f32le(&self, out_path: &Path) -> MemeResult<()> {
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MemeError::encode(format!(
                    "failed to create audio output directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let mut bytes = Vec::<u8>::with_capacity(self.samples().len() * 4);
        for &sample in self.samples() {
            bytes.extend_from_slice(&sample.clamp(-1.0, 1.0).to_le_bytes());
        }
        std::fs::write(out_path, bytes).map_err(|e| {
            MemeError::encode(format!(
                "failed to write audio file '{}': {e}",
                out_path.display()
            ))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/clip.rs"]
mod tests;
