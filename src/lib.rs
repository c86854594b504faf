//! vidmeme batch-generates vertical (1080x1920) video memes from a JSON list of records.
//!
//! Each record picks a fixed template:
//!
//! - template 0: one full-width video with shadowed captions near the top
//! - template 1: two stacked videos, each below a caption band
//!
//! Background audio is picked at random from a directory and fitted to the video. Decoding and
//! encoding go through the system `ffmpeg`/`ffprobe`; text is shaped with Parley and rasterized
//! with `vello_cpu`.
#![forbid(unsafe_code)]

mod foundation;

pub mod assets;
pub mod audio;
pub mod config;
/// Frame sinks, including the `ffmpeg` MP4 encoder.
pub mod encode;
pub mod generator;
pub mod render;
pub mod templates;
pub mod text;
pub mod video;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rect, Rgba8Premul};
pub use crate::foundation::error::{MemeError, MemeResult};

pub use crate::assets::color::ColorDef;
pub use crate::assets::media::ffmpeg_tools_available;
pub use crate::audio::clip::AudioClip;
pub use crate::audio::select::{attach_background_audio, select_audio_file};
pub use crate::config::load::{DEFAULT_CONFIG_FILE, load_config, parse_config_str};
pub use crate::config::model::{
    CaptionPair, MemeConfig, Shadow, SingleVideoMeme, StackedVideoMeme, TextStyle,
};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{AudioInputConfig, FrameSink, InMemorySink, SinkConfig};
pub use crate::generator::{DEFAULT_OUTPUT_DIR, MemeGenerator, random_filename};
pub use crate::render::composite::{Anchor, Composite, Layer, Position};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::renderer::Renderer;
pub use crate::text::layers::{TextLayer, TextRole, build_band_layer, build_caption_layers};
pub use crate::video::clip::VideoClip;
