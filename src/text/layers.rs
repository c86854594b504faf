use std::path::PathBuf;

use crate::assets::color::ColorDef;
use crate::config::model::{Shadow, TextStyle};
use crate::foundation::core::Rect;
use crate::render::composite::{Anchor, Position};

/// Top of the first caption line, in canvas pixels.
pub const CAPTION_TOP_MARGIN_PX: i32 = 100;

/// Extra spacing added to `font_size` between caption lines.
pub const LINE_PADDING_PX: i32 = 10;

/// Whether a layer is a drop shadow or the visible caption itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextRole {
    Shadow,
    Foreground,
}

/// One line (or one wrapped block) of caption text placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    pub text: String,
    pub font_path: PathBuf,
    pub font_size: u32,
    pub color: ColorDef,
    pub role: TextRole,
    pub duration_sec: f64,
    pub position: Position,
    /// Area the position is relative to, and the wrap width. `None` means the whole canvas
    /// without wrapping.
    pub region: Option<Rect>,
}

impl TextLayer {
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    /// Wrap width in pixels, if the layer wraps.
    pub fn max_width(&self) -> Option<f32> {
        self.region.map(|r| r.width() as f32)
    }
}

/// Turn a caption into shadow/foreground layer pairs, one pair per `'\n'`-separated line.
///
/// Lines are centered horizontally. The first line starts at [`CAPTION_TOP_MARGIN_PX`] and
/// each following line sits `font_size + LINE_PADDING_PX` lower. A shadow stays centered like
/// its foreground and only moves down by the vertical shadow offset; the horizontal offset is
/// ignored. An empty caption still yields one pair.
pub fn build_caption_layers(
    text: &str,
    duration_sec: f64,
    style: &TextStyle,
    shadow: &Shadow,
) -> Vec<TextLayer> {
    let step = i32::try_from(style.font_size)
        .unwrap_or(i32::MAX)
        .saturating_add(LINE_PADDING_PX);
    let dy = shadow.offset[1].round() as i32;

    let mut out = Vec::new();
    let mut y = CAPTION_TOP_MARGIN_PX;
    for line in text.split('\n') {
        let foreground = TextLayer {
            text: line.to_owned(),
            font_path: style.font_path.clone(),
            font_size: style.font_size,
            color: style.color,
            role: TextRole::Foreground,
            duration_sec,
            position: Position::new(Anchor::Center(0), Anchor::Px(y)),
            region: None,
        };
        let shadow_layer = TextLayer {
            color: shadow.color,
            role: TextRole::Shadow,
            position: Position::new(Anchor::Center(0), Anchor::Px(y.saturating_add(dy))),
            ..foreground.clone()
        };
        out.push(shadow_layer);
        out.push(foreground);
        y = y.saturating_add(step);
    }
    out
}

/// A caption block centered in `band` and wrapped to the band width. No shadow.
pub fn build_band_layer(text: &str, duration_sec: f64, style: &TextStyle, band: Rect) -> TextLayer {
    TextLayer {
        text: text.to_owned(),
        font_path: style.font_path.clone(),
        font_size: style.font_size,
        color: style.color,
        role: TextRole::Foreground,
        duration_sec,
        position: Position::centered(),
        region: Some(band),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layers.rs"]
mod tests;
