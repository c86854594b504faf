use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::JoinHandle;

use crate::foundation::core::Fps;
use crate::foundation::error::{MemeError, MemeResult};

/// Internal audio sample rate used across decode/loop/encode.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Channel count of decoded audio.
pub const MIX_CHANNELS: u16 = 2;

/// Basic metadata about a source video file.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSourceInfo {
    /// Path used for probing/decoding.
    pub source_path: PathBuf,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Native frame rate.
    pub fps: Fps,
    /// Container duration in seconds.
    pub duration_sec: f64,
    /// Whether ffprobe detected at least one audio stream.
    pub has_audio: bool,
}

/// Decoded interleaved floating-point PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Interleaved `f32` PCM samples.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.interleaved_f32.len() / usize::from(self.channels)
    }

    pub fn duration_sec(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }
}

/// Return `true` when both `ffmpeg` and `ffprobe` can be invoked from `PATH`.
pub fn ffmpeg_tools_available() -> bool {
    tool_on_path("ffmpeg") && tool_on_path("ffprobe")
}

fn tool_on_path(name: &str) -> bool {
    Command::new(name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Probe source video metadata through `ffprobe`.
pub fn probe_video(source_path: &Path) -> MemeResult<VideoSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        avg_frame_rate: Option<String>,
        r_frame_rate: Option<String>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    if !source_path.exists() {
        return Err(MemeError::not_found(source_path));
    }

    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| MemeError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(MemeError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| MemeError::media(format!("ffprobe json parse failed: {e}")))?;
    let video_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            MemeError::media(format!(
                "no video stream found in '{}'",
                source_path.display()
            ))
        })?;
    let width = video_stream
        .width
        .ok_or_else(|| MemeError::media("missing video width from ffprobe"))?;
    let height = video_stream
        .height
        .ok_or_else(|| MemeError::media("missing video height from ffprobe"))?;

    // avg_frame_rate is "0/0" for some containers; fall back to the stream's base rate.
    let fps = [
        video_stream.avg_frame_rate.as_deref(),
        video_stream.r_frame_rate.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_ff_ratio)
    .ok_or_else(|| {
        MemeError::media(format!(
            "invalid frame rate for '{}'",
            source_path.display()
        ))
    })?;

    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .or(video_stream.duration.as_deref())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| {
            MemeError::media(format!(
                "could not determine duration of '{}'",
                source_path.display()
            ))
        })?;
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoSourceInfo {
        source_path: source_path.to_path_buf(),
        width,
        height,
        fps,
        duration_sec,
        has_audio,
    })
}

/// Decode the first audio stream of `path` to interleaved stereo `f32` at `sample_rate`.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> MemeResult<AudioPcm> {
    if !path.exists() {
        return Err(MemeError::not_found(path));
    }

    let out = Command::new("ffmpeg")
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
        .map_err(|e| MemeError::media(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        return Err(MemeError::media(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    if !out.stdout.len().is_multiple_of(4) {
        return Err(MemeError::media(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    let mut pcm = Vec::<f32>::with_capacity(out.stdout.len() / 4);
    for chunk in out.stdout.chunks_exact(4) {
        pcm.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: MIX_CHANNELS,
        interleaved_f32: pcm,
    })
}

/// Streaming RGBA8 decoder for one pass over a video file.
///
/// ffmpeg resamples to `fps` and scales to `width x height`; frames are read one at a time from
/// its stdout so memory stays at one frame regardless of clip length.
pub struct RawVideoDecoder {
    source_path: PathBuf,
    child: Option<Child>,
    stdout: BufReader<ChildStdout>,
    stderr_drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
    frame_len: usize,
}

impl RawVideoDecoder {
    /// Spawn `ffmpeg` decoding `source_path` scaled to `width x height` at `fps`.
    pub fn spawn(source_path: &Path, width: u32, height: u32, fps: Fps) -> MemeResult<Self> {
        if width == 0 || height == 0 {
            return Err(MemeError::validation("decode width/height must be non-zero"));
        }

        let mut child = Command::new("ffmpeg")
            .args(["-v", "error", "-nostdin", "-i"])
            .arg(source_path)
            .args([
                "-an",
                "-sn",
                "-vf",
                &format!("fps={fps},scale={width}:{height}:flags=bicubic"),
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgba",
                "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                MemeError::media(format!(
                    "failed to spawn ffmpeg for video decode (is it installed and on PATH?): {e}"
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MemeError::media("failed to open ffmpeg stdout (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| MemeError::media("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut bytes = Vec::new();
            stderr.read_to_end(&mut bytes)?;
            Ok(bytes)
        });

        Ok(Self {
            source_path: source_path.to_path_buf(),
            child: Some(child),
            stdout: BufReader::new(stdout),
            stderr_drain: Some(stderr_drain),
            frame_len: (width as usize) * (height as usize) * 4,
        })
    }

    /// Byte length of one decoded frame.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Read the next frame into `buf`. Returns `Ok(false)` at end of stream.
    pub fn read_frame(&mut self, buf: &mut [u8]) -> MemeResult<bool> {
        if buf.len() != self.frame_len {
            return Err(MemeError::validation(format!(
                "decode buffer has {} bytes, expected {}",
                buf.len(),
                self.frame_len
            )));
        }
        match self.stdout.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(MemeError::media(format!(
                "failed to read decoded frame from '{}': {e}",
                self.source_path.display()
            ))),
        }
    }

    /// Wait for ffmpeg to exit and surface its error output on failure.
    pub fn finish(mut self) -> MemeResult<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        let status = child
            .wait()
            .map_err(|e| MemeError::media(format!("failed to wait for ffmpeg decode: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| MemeError::media("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| MemeError::media(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(MemeError::media(format!(
                "ffmpeg video decode failed for '{}' ({status}): {}",
                self.source_path.display(),
                String::from_utf8_lossy(&stderr_bytes).trim()
            )));
        }
        Ok(())
    }
}

impl Drop for RawVideoDecoder {
    fn drop(&mut self) {
        // Stopping early (trimmed clip) leaves ffmpeg blocked on a full pipe.
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

pub(crate) fn parse_ff_ratio(s: &str) -> Option<Fps> {
    let mut parts = s.split('/');
    let a = parts.next()?.trim().parse::<u32>().ok()?;
    let b = match parts.next() {
        Some(b) => b.trim().parse::<u32>().ok()?,
        None => 1,
    };
    Fps::new(a, b).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
