use crate::config::model::StackedVideoMeme;
use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::MemeResult;
use crate::render::composite::{Anchor, Composite, Layer, Position};
use crate::text::layers::build_band_layer;
use crate::video::clip::{VideoClip, normalize_pair};

/// Vertical bands of the stacked template: caption, video, caption, video.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackedLayout {
    pub canvas: Canvas,
    /// Height of each caption band (10% of the canvas).
    pub text_band_h: u32,
    /// Height of each video band (40% of the canvas).
    pub video_band_h: u32,
}

impl StackedLayout {
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            text_band_h: canvas.height / 10,
            video_band_h: canvas.height * 2 / 5,
        }
    }

    fn band(&self, top: u32, height: u32) -> Rect {
        Rect::new(
            0.0,
            f64::from(top),
            f64::from(self.canvas.width),
            f64::from(top + height),
        )
    }

    pub fn top_text_band(&self) -> Rect {
        self.band(0, self.text_band_h)
    }

    pub fn top_video_y(&self) -> u32 {
        self.text_band_h
    }

    pub fn bottom_text_band(&self) -> Rect {
        self.band(self.text_band_h + self.video_band_h, self.text_band_h)
    }

    pub fn bottom_video_y(&self) -> u32 {
        2 * self.text_band_h + self.video_band_h
    }
}

fn video_at(clip: VideoClip, y: u32) -> Layer {
    Layer::video(clip, Position::new(Anchor::Center(0), Anchor::Px(y as i32)))
}

/// Template 1: two videos stacked, each below its own caption band.
///
/// Both videos are looped to the longer duration once; every caption pair reuses them. The
/// composite runs at the faster of the two frame rates.
pub fn compose(
    meme: &StackedVideoMeme,
    top: &VideoClip,
    bottom: &VideoClip,
) -> MemeResult<Vec<Composite>> {
    let layout = StackedLayout::for_canvas(Canvas::VERTICAL_HD);
    let (top, bottom, duration) = normalize_pair(top, bottom);
    let fps = top.fps().max(bottom.fps());
    tracing::debug!(duration, %fps, "normalized stacked videos");

    let top = top.resized_to_height(layout.video_band_h);
    let bottom = bottom.resized_to_height(layout.video_band_h);
    let base = Composite::new(layout.canvas, fps, duration, Rgba8Premul::opaque_black())?;

    Ok(meme
        .captions
        .iter()
        .map(|pair| {
            base.with_layers([
                Layer::Text(build_band_layer(
                    &pair.top,
                    duration,
                    &meme.style,
                    layout.top_text_band(),
                )),
                video_at(top.clone(), layout.top_video_y()),
                Layer::Text(build_band_layer(
                    &pair.bottom,
                    duration,
                    &meme.style,
                    layout.bottom_text_band(),
                )),
                video_at(bottom.clone(), layout.bottom_video_y()),
            ])
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/templates/stacked.rs"]
mod tests;
