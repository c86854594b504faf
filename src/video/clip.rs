use std::path::Path;
use std::sync::Arc;

use crate::assets::media::{self, RawVideoDecoder, VideoSourceInfo};
use crate::foundation::core::Fps;
use crate::foundation::error::{MemeError, MemeResult};
use crate::foundation::math::{loops_to_cover, scale_keep_aspect};

/// Immutable description of a video layer: which file, at what output size, for how long.
///
/// Frames are only decoded when [`VideoClip::frames`] is streamed. A duration longer than the
/// repeated unit means the unit plays end to end until the duration is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoClip {
    source: Arc<VideoSourceInfo>,
    width: u32,
    height: u32,
    /// Length of the unit that repeats, measured from the start of the source.
    segment_sec: f64,
    duration_sec: f64,
}

impl VideoClip {
    /// Probe `path` and wrap it at native size and duration.
    #[tracing::instrument]
    pub fn load(path: &Path) -> MemeResult<Self> {
        let info = media::probe_video(path)?;
        tracing::debug!(
            width = info.width,
            height = info.height,
            fps = %info.fps,
            duration_sec = info.duration_sec,
            "probed video"
        );
        Self::from_source(info)
    }

    pub fn from_source(info: VideoSourceInfo) -> MemeResult<Self> {
        if info.width == 0 || info.height == 0 {
            return Err(MemeError::media(format!(
                "video '{}' has zero width or height",
                info.source_path.display()
            )));
        }
        if !info.duration_sec.is_finite() || info.duration_sec <= 0.0 {
            return Err(MemeError::media(format!(
                "video '{}' has no positive duration",
                info.source_path.display()
            )));
        }
        Ok(Self {
            width: info.width,
            height: info.height,
            segment_sec: info.duration_sec,
            duration_sec: info.duration_sec,
            source: Arc::new(info),
        })
    }

    pub fn source(&self) -> &VideoSourceInfo {
        &self.source
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    /// Native frame rate of the source.
    pub fn fps(&self) -> Fps {
        self.source.fps
    }

    /// Repeat the clip end to end until it exceeds `target_sec`, then cut to exactly
    /// `target_sec`. Clips already at least that long are returned unchanged.
    ///
    /// Looping an already looped clip keeps repeating the original unit.
    pub fn looped_to(&self, target_sec: f64) -> Self {
        if target_sec.is_nan() || self.duration_sec >= target_sec {
            return self.clone();
        }
        let loops = loops_to_cover(self.duration_sec, target_sec);
        let mut out = self.clone();
        if self.duration_sec <= self.segment_sec {
            out.segment_sec = self.duration_sec;
        }
        out.duration_sec = self.duration_sec * f64::from(loops);
        out.trimmed_to(target_sec)
    }

    /// Cut the clip to at most `target_sec`.
    pub fn trimmed_to(&self, target_sec: f64) -> Self {
        let mut out = self.clone();
        if target_sec.is_finite() && target_sec >= 0.0 && target_sec < self.duration_sec {
            out.duration_sec = target_sec;
            out.segment_sec = out.segment_sec.min(target_sec);
        }
        out
    }

    /// Resize to `width`, keeping the aspect ratio.
    pub fn resized_to_width(&self, width: u32) -> Self {
        let width = width.max(1);
        Self {
            height: scale_keep_aspect(self.height, self.width, width),
            width,
            ..self.clone()
        }
    }

    /// Resize to `height`, keeping the aspect ratio.
    pub fn resized_to_height(&self, height: u32) -> Self {
        let height = height.max(1);
        Self {
            width: scale_keep_aspect(self.width, self.height, height),
            height,
            ..self.clone()
        }
    }

    /// Number of frames this clip contributes at `fps`.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.frames_for_secs(self.duration_sec)
    }

    /// Stream the clip's frames at `fps`, scaled to the clip size.
    pub fn frames(&self, fps: Fps) -> ClipFrames {
        ClipFrames {
            clip: self.clone(),
            fps,
            total_frames: self.frame_count(fps),
            segment_frames: fps.frames_for_secs(self.segment_sec).max(1),
            emitted: 0,
            emitted_in_pass: 0,
            decoder: None,
            buf: vec![0u8; (self.width as usize) * (self.height as usize) * 4],
        }
    }
}

/// Normalize two clips to the longer of their durations, looping the shorter one.
pub fn normalize_pair(a: &VideoClip, b: &VideoClip) -> (VideoClip, VideoClip, f64) {
    let target = a.duration_sec().max(b.duration_sec());
    (
        a.looped_to(target).trimmed_to(target),
        b.looped_to(target).trimmed_to(target),
        target,
    )
}

/// Pull-based frame stream over a [`VideoClip`].
///
/// Each pass over the repeated unit is a fresh ffmpeg decode. Exactly
/// `round(duration * fps)` frames are produced.
pub struct ClipFrames {
    clip: VideoClip,
    fps: Fps,
    total_frames: u64,
    segment_frames: u64,
    emitted: u64,
    emitted_in_pass: u64,
    decoder: Option<RawVideoDecoder>,
    buf: Vec<u8>,
}

impl ClipFrames {
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn width(&self) -> u32 {
        self.clip.width
    }

    pub fn height(&self) -> u32 {
        self.clip.height
    }

    /// Decode the next frame into the internal buffer.
    ///
    /// Returns `Ok(false)` once the clip's duration is exhausted.
    pub fn advance(&mut self) -> MemeResult<bool> {
        if self.emitted >= self.total_frames {
            // Kills ffmpeg if the clip was trimmed mid-pass.
            self.decoder = None;
            return Ok(false);
        }

        loop {
            if self.emitted_in_pass >= self.segment_frames {
                self.decoder = None;
            }

            if self.decoder.is_none() {
                self.emitted_in_pass = 0;
                self.decoder = Some(RawVideoDecoder::spawn(
                    &self.clip.source.source_path,
                    self.clip.width,
                    self.clip.height,
                    self.fps,
                )?);
            }

            let got = match self.decoder.as_mut() {
                Some(decoder) => decoder.read_frame(&mut self.buf)?,
                None => false,
            };
            if got {
                self.emitted += 1;
                self.emitted_in_pass += 1;
                return Ok(true);
            }

            if let Some(done) = self.decoder.take() {
                done.finish()?;
            }
            if self.emitted_in_pass == 0 {
                return Err(MemeError::media(format!(
                    "video '{}' produced no frames",
                    self.clip.source.source_path.display()
                )));
            }
            tracing::trace!(
                emitted = self.emitted,
                total = self.total_frames,
                "restarting video decode to loop"
            );
        }
    }

    /// Premultiplied RGBA8 of the frame produced by the last successful [`ClipFrames::advance`].
    pub fn frame(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/clip.rs"]
mod tests;
