use crate::audio::clip::AudioClip;
use crate::foundation::core::{Canvas, Fps, Rect, Rgba8Premul};
use crate::foundation::error::{MemeError, MemeResult};
use crate::text::layers::TextLayer;
use crate::video::clip::VideoClip;

/// Placement of a layer along one axis, relative to its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Fixed offset from the container's start edge.
    Px(i32),
    /// Centered in the container, then shifted by the given offset.
    Center(i32),
}

impl Anchor {
    /// Start coordinate of a `size`-long layer in a container spanning `origin..origin+extent`.
    ///
    /// A centered layer larger than its container gets a start before `origin`.
    pub fn resolve(self, origin: i32, extent: u32, size: u32) -> i32 {
        match self {
            Self::Px(v) => origin.saturating_add(v),
            Self::Center(offset) => {
                let centered = (i64::from(extent) - i64::from(size)).div_euclid(2);
                let v = i64::from(origin) + centered + i64::from(offset);
                v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: Anchor,
    pub y: Anchor,
}

impl Position {
    pub fn new(x: Anchor, y: Anchor) -> Self {
        Self { x, y }
    }

    pub fn centered() -> Self {
        Self::new(Anchor::Center(0), Anchor::Center(0))
    }

    /// Top-left canvas pixel of a `size` layer placed inside `container`.
    pub fn resolve(self, container: Rect, size: (u32, u32)) -> (i32, i32) {
        let x0 = container.x0.round() as i32;
        let y0 = container.y0.round() as i32;
        let w = container.width().round().max(0.0) as u32;
        let h = container.height().round().max(0.0) as u32;
        (
            self.x.resolve(x0, w, size.0),
            self.y.resolve(y0, h, size.1),
        )
    }
}

/// One entry of a composite's z-ordered layer stack.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    Video { clip: VideoClip, position: Position },
    Text(TextLayer),
}

impl Layer {
    pub fn video(clip: VideoClip, position: Position) -> Self {
        Self::Video { clip, position }
    }

    pub fn duration_sec(&self) -> f64 {
        match self {
            Self::Video { clip, .. } => clip.duration_sec(),
            Self::Text(t) => t.duration_sec,
        }
    }
}

/// Layers rendered over a solid canvas for a fixed duration, with optional audio.
///
/// Layers are drawn in insertion order, so later layers cover earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    canvas: Canvas,
    fps: Fps,
    duration_sec: f64,
    background: Rgba8Premul,
    layers: Vec<Layer>,
    audio: Option<AudioClip>,
}

impl Composite {
    pub fn new(
        canvas: Canvas,
        fps: Fps,
        duration_sec: f64,
        background: Rgba8Premul,
    ) -> MemeResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(MemeError::validation("canvas width/height must be non-zero"));
        }
        if !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Err(MemeError::validation(format!(
                "composite duration must be finite and > 0, got {duration_sec}"
            )));
        }
        Ok(Self {
            canvas,
            fps,
            duration_sec,
            background,
            layers: Vec::new(),
            audio: None,
        })
    }

    pub fn with_layer(&self, layer: Layer) -> Self {
        let mut out = self.clone();
        out.layers.push(layer);
        out
    }

    pub fn with_layers(&self, layers: impl IntoIterator<Item = Layer>) -> Self {
        let mut out = self.clone();
        out.layers.extend(layers);
        out
    }

    /// Replace the audio track.
    pub fn with_audio(&self, audio: AudioClip) -> Self {
        Self {
            audio: Some(audio),
            ..self.clone()
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// The whole canvas as a rectangle.
    pub fn canvas_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        )
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    pub fn background(&self) -> Rgba8Premul {
        self.background
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn audio(&self) -> Option<&AudioClip> {
        self.audio.as_ref()
    }

    /// `round(duration * fps)`.
    pub fn frame_count(&self) -> u64 {
        self.fps.frames_for_secs(self.duration_sec)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
