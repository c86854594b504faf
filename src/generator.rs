use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::select::attach_background_audio;
use crate::config::model::MemeConfig;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::AudioInputConfig;
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::composite::Composite;
use crate::render::renderer::Renderer;
use crate::templates::compose_meme;

/// Directory written to when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "generated_vid_memes";

const FILENAME_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FILENAME_LEN: usize = 10;

/// Ten random `[a-z0-9]` characters followed by `.mp4`.
pub fn random_filename<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name: String = (0..FILENAME_LEN)
        .map(|_| char::from(FILENAME_CHARS[rng.random_range(0..FILENAME_CHARS.len())]))
        .collect();
    name.push_str(".mp4");
    name
}

/// Batch driver: renders configuration records into MP4 files in one output directory.
///
/// The random source picks output names and background tracks.
pub struct MemeGenerator<R: Rng = StdRng> {
    output_dir: PathBuf,
    rng: R,
    renderer: Renderer,
}

impl MemeGenerator<StdRng> {
    /// Generator seeded from the operating system.
    pub fn new(output_dir: impl Into<PathBuf>) -> MemeResult<Self> {
        Self::with_rng(output_dir, StdRng::from_os_rng())
    }
}

impl<R: Rng> MemeGenerator<R> {
    /// Create the output directory (and parents) and use `rng` for every random choice.
    pub fn with_rng(output_dir: impl Into<PathBuf>, rng: R) -> MemeResult<Self> {
        use anyhow::Context as _;

        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!(
                "failed to create output directory '{}'",
                output_dir.display()
            )
        })?;
        Ok(Self {
            output_dir,
            rng,
            renderer: Renderer::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// A fresh output file name that does not exist yet in the output directory.
    pub fn random_filename(&mut self) -> String {
        loop {
            let name = random_filename(&mut self.rng);
            if !self.output_dir.join(&name).exists() {
                return name;
            }
        }
    }

    /// Render every record in order. The first failure aborts the batch.
    #[tracing::instrument(skip_all, fields(records = memes.len()))]
    pub fn process_batch(&mut self, memes: &[MemeConfig]) -> MemeResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (i, meme) in memes.iter().enumerate() {
            tracing::info!(
                record = i,
                template = meme.template_id(),
                outputs = meme.output_count(),
                "rendering record"
            );
            written.extend(self.render_meme(meme)?);
        }
        tracing::info!(files = written.len(), "batch complete");
        Ok(written)
    }

    /// Render one record into as many files as it has captions.
    pub fn render_meme(&mut self, meme: &MemeConfig) -> MemeResult<Vec<PathBuf>> {
        let composites = compose_meme(meme)?;
        let mut written = Vec::with_capacity(composites.len());
        for composite in composites {
            let composite = attach_background_audio(&composite, meme.audio_dir(), &mut self.rng)?;
            let name = self.random_filename();
            let out_path = self.output_dir.join(name);
            self.write_composite(&composite, &out_path)?;
            written.push(out_path);
        }
        Ok(written)
    }

    /// Encode `composite` to an MP4 at `out_path`.
    ///
    /// Audio is staged as raw PCM in a temporary file that lives until the encode finishes. A
    /// failed encode removes whatever part of `out_path` was already written.
    #[tracing::instrument(skip(self, composite), fields(out = %out_path.display()))]
    pub fn write_composite(&mut self, composite: &Composite, out_path: &Path) -> MemeResult<()> {
        let staged = match composite.audio() {
            Some(audio) => {
                let tmp = tempfile::Builder::new()
                    .prefix("vidmeme-")
                    .suffix(".f32le")
                    .tempfile()
                    .map_err(|e| MemeError::encode(format!("failed to stage audio: {e}")))?;
                audio.write_f32le(tmp.path())?;
                let cfg = AudioInputConfig::for_clip(tmp.path(), audio);
                Some((tmp, cfg))
            }
            None => None,
        };

        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
        let rendered = self.renderer.render(
            composite,
            &mut sink,
            staged.as_ref().map(|(_, cfg)| cfg.clone()),
        );
        // ffmpeg must be gone before its output can be removed.
        drop(sink);
        drop(staged);

        let frames = match rendered {
            Ok(frames) => frames,
            Err(e) => {
                remove_partial_output(out_path);
                return Err(e);
            }
        };

        tracing::info!(frames, "wrote meme");
        Ok(())
    }
}

fn remove_partial_output(out_path: &Path) {
    if !out_path.exists() {
        return;
    }
    match std::fs::remove_file(out_path) {
        Ok(()) => tracing::warn!(out = %out_path.display(), "removed partial output"),
        Err(e) => tracing::warn!(out = %out_path.display(), "failed to remove partial output: {e}"),
    }
}
