use crate::config::model::SingleVideoMeme;
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::MemeResult;
use crate::render::composite::{Composite, Layer, Position};
use crate::text::layers::build_caption_layers;
use crate::video::clip::VideoClip;

/// Template 0: the video fills the canvas width and sits centered, shadowed captions on top.
///
/// One composite per caption, each lasting as long as the source video at its native fps.
pub fn compose(meme: &SingleVideoMeme, video: &VideoClip) -> MemeResult<Vec<Composite>> {
    let canvas = Canvas::VERTICAL_HD;
    let duration = video.duration_sec();
    let base = Composite::new(canvas, video.fps(), duration, Rgba8Premul::opaque_black())?
        .with_layer(Layer::video(
            video.resized_to_width(canvas.width),
            Position::centered(),
        ));

    Ok(meme
        .texts
        .iter()
        .map(|text| {
            base.with_layers(
                build_caption_layers(text, duration, &meme.style, &meme.shadow)
                    .into_iter()
                    .map(Layer::Text),
            )
        })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/templates/single.rs"]
mod tests;
