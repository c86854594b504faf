use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::color::ColorDef;
use crate::foundation::error::{MemeError, MemeResult};

/// Font and fill shared by every caption of one meme.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font_path: PathBuf,
    pub font_size: u32,
    pub color: ColorDef,
}

/// Drop shadow drawn beneath each caption line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Pixel offset `(dx, dy)` from the foreground text.
    pub offset: [f32; 2],
    pub color: ColorDef,
}

/// Template 0: one full-bleed video, one output per caption.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleVideoMeme {
    pub video_path: PathBuf,
    pub texts: Vec<String>,
    pub style: TextStyle,
    pub shadow: Shadow,
    pub audio_dir: Option<PathBuf>,
}

/// Captions shown above the top and bottom video of a stacked meme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionPair {
    pub top: String,
    pub bottom: String,
}

/// Template 1: two videos stacked with a caption band above each, one output per caption pair.
#[derive(Clone, Debug, PartialEq)]
pub struct StackedVideoMeme {
    pub top_video_path: PathBuf,
    pub bottom_video_path: PathBuf,
    pub captions: Vec<CaptionPair>,
    pub style: TextStyle,
    pub audio_dir: Option<PathBuf>,
}

/// One validated configuration record.
///
/// The template selector is resolved while parsing, so every value of this type names a
/// template that can be rendered.
#[derive(Clone, Debug, PartialEq)]
pub enum MemeConfig {
    /// `"template": 0`
    SingleVideo(SingleVideoMeme),
    /// `"template": 1`
    StackedVideo(StackedVideoMeme),
}

impl MemeConfig {
    /// The integer selector this record was parsed from.
    pub fn template_id(&self) -> i64 {
        match self {
            Self::SingleVideo(_) => 0,
            Self::StackedVideo(_) => 1,
        }
    }

    pub fn audio_dir(&self) -> Option<&Path> {
        match self {
            Self::SingleVideo(m) => m.audio_dir.as_deref(),
            Self::StackedVideo(m) => m.audio_dir.as_deref(),
        }
    }

    /// Number of files rendering this record writes.
    pub fn output_count(&self) -> usize {
        match self {
            Self::SingleVideo(m) => m.texts.len(),
            Self::StackedVideo(m) => m.captions.len(),
        }
    }
}

/// Wire form of a record, before template resolution.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMemeConfig {
    pub(crate) template: Option<i64>,
    pub(crate) video_path0: Option<PathBuf>,
    pub(crate) video_path1: Option<PathBuf>,
    pub(crate) texts: Option<Vec<String>>,
    pub(crate) texts0: Option<Vec<String>>,
    pub(crate) font_path: Option<PathBuf>,
    pub(crate) font_size: Option<u32>,
    pub(crate) text_color: Option<ColorDef>,
    pub(crate) shadow_offset: Option<[f32; 2]>,
    pub(crate) shadow_color: Option<ColorDef>,
    pub(crate) audio_path0: Option<PathBuf>,
}

fn required<T>(value: Option<T>, field: &str, template: i64) -> MemeResult<T> {
    value.ok_or_else(|| MemeError::config(format!("template {template} requires field '{field}'")))
}

impl RawMemeConfig {
    fn text_style(&mut self, template: i64) -> MemeResult<TextStyle> {
        let font_size = required(self.font_size, "font_size", template)?;
        if font_size == 0 {
            return Err(MemeError::validation("font_size must be > 0"));
        }
        Ok(TextStyle {
            font_path: required(self.font_path.take(), "font_path", template)?,
            font_size,
            color: required(self.text_color, "text_color", template)?,
        })
    }
}

impl TryFrom<RawMemeConfig> for MemeConfig {
    type Error = MemeError;

    fn try_from(mut raw: RawMemeConfig) -> MemeResult<Self> {
        let template = raw
            .template
            .ok_or_else(|| MemeError::config("record has no 'template' selector"))?;

        match template {
            0 => {
                let style = raw.text_style(template)?;
                let offset = required(raw.shadow_offset, "shadow_offset", template)?;
                if offset.iter().any(|v| !v.is_finite()) {
                    return Err(MemeError::validation("shadow_offset must be finite"));
                }
                Ok(Self::SingleVideo(SingleVideoMeme {
                    video_path: required(raw.video_path0, "video_path0", template)?,
                    texts: required(raw.texts, "texts", template)?,
                    style,
                    shadow: Shadow {
                        offset,
                        color: required(raw.shadow_color, "shadow_color", template)?,
                    },
                    audio_dir: raw.audio_path0,
                }))
            }
            1 => {
                let style = raw.text_style(template)?;
                let top = required(raw.texts, "texts", template)?;
                let bottom = required(raw.texts0, "texts0", template)?;
                if top.len() != bottom.len() {
                    return Err(MemeError::validation(format!(
                        "caption list length mismatch: 'texts' has {} entries, 'texts0' has {}",
                        top.len(),
                        bottom.len()
                    )));
                }
                Ok(Self::StackedVideo(StackedVideoMeme {
                    top_video_path: required(raw.video_path0, "video_path0", template)?,
                    bottom_video_path: required(raw.video_path1, "video_path1", template)?,
                    captions: top
                        .into_iter()
                        .zip(bottom)
                        .map(|(top, bottom)| CaptionPair { top, bottom })
                        .collect(),
                    style,
                    audio_dir: raw.audio_path0,
                }))
            }
            other => Err(MemeError::UnimplementedTemplate(other)),
        }
    }
}
