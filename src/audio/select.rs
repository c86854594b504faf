use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::audio::clip::AudioClip;
use crate::foundation::error::MemeResult;
use crate::render::composite::Composite;

/// File extensions (compared case-insensitively) accepted as background audio.
pub const AUDIO_EXTENSIONS: [&str; 2] = ["mp3", "wav"];

/// Audio files directly inside `dir`, sorted by path.
///
/// Subdirectories and files with other extensions are skipped.
pub fn list_audio_files(dir: &Path) -> MemeResult<Vec<PathBuf>> {
    use anyhow::Context as _;

    let mut out = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list audio directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_audio_extension(&path) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            AUDIO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Pick one audio file from `dir` uniformly at random.
///
/// `None` when no directory is configured, it is missing or not a directory, or it holds no
/// audio file.
pub fn select_audio_file<R: Rng + ?Sized>(
    dir: Option<&Path>,
    rng: &mut R,
) -> MemeResult<Option<PathBuf>> {
    let Some(dir) = dir else {
        return Ok(None);
    };
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "audio directory does not exist, rendering silent");
        return Ok(None);
    }
    let candidates = list_audio_files(dir)?;
    let picked = candidates.choose(rng).cloned();
    if picked.is_none() {
        tracing::warn!(dir = %dir.display(), "no mp3/wav files found, rendering silent");
    }
    Ok(picked)
}

/// Give `composite` a random background track from `dir`, looped and cut to its duration.
///
/// The composite is returned unchanged when nothing is selected.
#[tracing::instrument(skip(composite, rng))]
pub fn attach_background_audio<R: Rng + ?Sized>(
    composite: &Composite,
    dir: Option<&Path>,
    rng: &mut R,
) -> MemeResult<Composite> {
    let Some(path) = select_audio_file(dir, rng)? else {
        return Ok(composite.clone());
    };
    tracing::info!(audio = %path.display(), "selected background audio");
    let clip = AudioClip::load(&path)?.looped_to(composite.duration_sec())?;
    Ok(composite.with_audio(clip))
}

#[cfg(test)]
#[path = "../../tests/unit/audio/select.rs"]
mod tests;
