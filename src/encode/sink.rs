use std::path::{Path, PathBuf};

use crate::audio::clip::AudioClip;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::frame::FrameRGBA;

/// What a meme encode looks like, announced to the sink before the first frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Background track staged as raw PCM, if the meme has one.
    pub audio: Option<AudioInputConfig>,
}

impl SinkConfig {
    pub fn new(canvas: Canvas, fps: Fps) -> Self {
        Self {
            canvas,
            fps,
            audio: None,
        }
    }

    pub fn with_audio(self, audio: Option<AudioInputConfig>) -> Self {
        Self { audio, ..self }
    }

    /// Byte length of one RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        self.canvas.byte_len()
    }
}

/// Background track staged on disk as interleaved `f32le` PCM.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInputConfig {
    pub path: PathBuf,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioInputConfig {
    /// Describe `clip` as written to `path` by [`AudioClip::write_f32le`].
    pub fn for_clip(path: &Path, clip: &AudioClip) -> Self {
        Self {
            path: path.to_path_buf(),
            sample_rate: clip.sample_rate(),
            channels: clip.channels(),
        }
    }
}

/// Consumer of rendered meme frames.
///
/// `begin` is called once, then `push_frame` for frames 0, 1, 2, ... in order, then `end`.
pub trait FrameSink: Send {
    fn begin(&mut self, cfg: SinkConfig) -> MemeResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MemeResult<()>;
    fn end(&mut self) -> MemeResult<()>;
}

/// Keeps every frame in memory. Used to inspect renders without ffmpeg.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// The frame pushed with index `idx`.
    pub fn frame(&self, idx: u64) -> Option<&FrameRGBA> {
        self.frames
            .iter()
            .find(|(i, _)| i.0 == idx)
            .map(|(_, f)| f)
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> MemeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> MemeResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| MemeError::encode("in-memory sink not started"))?;
        if frame.width != cfg.canvas.width || frame.height != cfg.canvas.height {
            return Err(MemeError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.canvas.width, cfg.canvas.height
            )));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> MemeResult<()> {
        self.ended = true;
        Ok(())
    }
}
