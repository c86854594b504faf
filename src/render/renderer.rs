use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rect};
use crate::foundation::error::MemeResult;
use crate::render::blend::{blit_over, blit_over_clipped};
use crate::render::composite::{Composite, Layer};
use crate::render::frame::{FrameRGBA, Raster};
use crate::text::raster::TextRasterizer;
use crate::video::clip::ClipFrames;

/// A layer made ready for per-frame blending.
enum PreparedLayer {
    Video {
        frames: ClipFrames,
        origin: (i32, i32),
        live: bool,
    },
    Still {
        raster: Raster,
        origin: (i32, i32),
        clip: Rect,
        last_frame: u64,
    },
}

/// CPU compositor: turns a [`Composite`] into a stream of frames pushed to a [`FrameSink`].
///
/// Text is rasterized once per composite; video layers are decoded frame by frame.
#[derive(Default)]
pub struct Renderer {
    text: TextRasterizer,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every frame of `composite` into `sink` and return the number of frames pushed.
    ///
    /// `audio` is forwarded to the sink as its PCM input.
    #[tracing::instrument(skip_all, fields(frames = composite.frame_count(), layers = composite.layers().len()))]
    pub fn render(
        &mut self,
        composite: &Composite,
        sink: &mut dyn FrameSink,
        audio: Option<AudioInputConfig>,
    ) -> MemeResult<u64> {
        let canvas = composite.canvas();
        let fps = composite.fps();
        let mut prepared = self.prepare(composite)?;

        sink.begin(SinkConfig::new(canvas, fps).with_audio(audio))?;

        let total = composite.frame_count();
        let mut frame = FrameRGBA::new(canvas);
        for idx in 0..total {
            frame.fill(composite.background());
            for layer in prepared.iter_mut() {
                match layer {
                    PreparedLayer::Video {
                        frames,
                        origin,
                        live,
                    } => {
                        if !*live {
                            continue;
                        }
                        if frames.advance()? {
                            let (w, h) = (frames.width(), frames.height());
                            blit_over(&mut frame, frames.frame(), w, h, origin.0, origin.1);
                        } else {
                            *live = false;
                        }
                    }
                    PreparedLayer::Still {
                        raster,
                        origin,
                        clip,
                        last_frame,
                    } => {
                        if idx < *last_frame {
                            blit_over_clipped(
                                &mut frame,
                                &raster.data,
                                raster.width,
                                raster.height,
                                origin.0,
                                origin.1,
                                *clip,
                            );
                        }
                    }
                }
            }
            sink.push_frame(FrameIndex(idx), &frame)?;
            if (idx + 1).is_multiple_of(250) {
                tracing::debug!(done = idx + 1, total, "rendered frames");
            }
        }

        sink.end()?;
        Ok(total)
    }

    fn prepare(&mut self, composite: &Composite) -> MemeResult<Vec<PreparedLayer>> {
        let canvas_rect = composite.canvas_rect();
        let fps = composite.fps();
        composite
            .layers()
            .iter()
            .map(|layer| -> MemeResult<PreparedLayer> {
                Ok(match layer {
                    Layer::Video { clip, position } => PreparedLayer::Video {
                        frames: clip.frames(fps),
                        origin: position.resolve(canvas_rect, (clip.width(), clip.height())),
                        live: true,
                    },
                    Layer::Text(text) => {
                        let raster = self.text.rasterize(text)?;
                        let container = text.region.unwrap_or(canvas_rect);
                        PreparedLayer::Still {
                            origin: text
                                .position
                                .resolve(container, (raster.width, raster.height)),
                            clip: container,
                            last_frame: fps.frames_for_secs(text.duration_sec),
                            raster,
                        }
                    }
                })
            })
            .collect()
    }
}
