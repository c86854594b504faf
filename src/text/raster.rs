use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{MemeError, MemeResult};
use crate::render::frame::Raster;
use crate::text::layers::TextLayer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<[u8; 4]> for TextBrushRgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register font bytes and return the family name they provide.
    pub fn register_font(&mut self, font_bytes: &[u8]) -> MemeResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| MemeError::validation("no font families registered from font bytes"))?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::validation("registered font family has no name"))?
            .to_string())
    }

    /// Shape and lay out plain text in a registered family.
    pub(crate) fn layout_plain(
        &mut self,
        text: &str,
        family_name: &str,
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> MemeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MemeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Rasterizes [`TextLayer`]s into premultiplied RGBA8 bitmaps.
///
/// Fonts are read and registered once per path.
pub struct TextRasterizer {
    engine: TextLayoutEngine,
    fonts: HashMap<PathBuf, LoadedFont>,
}

impl Default for TextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRasterizer {
    pub fn new() -> Self {
        Self {
            engine: TextLayoutEngine::new(),
            fonts: HashMap::new(),
        }
    }

    fn font(&mut self, path: &Path) -> MemeResult<&LoadedFont> {
        if !self.fonts.contains_key(path) {
            if !path.exists() {
                return Err(MemeError::not_found(path));
            }
            use anyhow::Context as _;
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read font '{}'", path.display()))?;
            let family = self.engine.register_font(&bytes)?;
            tracing::debug!(path = %path.display(), %family, "registered font");
            let data =
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
            self.fonts
                .insert(path.to_path_buf(), LoadedFont { family, data });
        }
        self.fonts
            .get(path)
            .ok_or_else(|| MemeError::validation("font cache lookup failed"))
    }

    /// Shape `layer.text` and fill its glyphs into a bitmap sized to the laid out block.
    ///
    /// Each line is centered horizontally within the bitmap. Text without glyphs gives a
    /// transparent 1x1 bitmap.
    #[tracing::instrument(skip_all, fields(text = %layer.text))]
    pub fn rasterize(&mut self, layer: &TextLayer) -> MemeResult<Raster> {
        let (family, font) = {
            let f = self.font(&layer.font_path)?;
            (f.family.clone(), f.data.clone())
        };
        let layout = self.engine.layout_plain(
            &layer.text,
            &family,
            layer.font_size as f32,
            TextBrushRgba8::from(layer.color.to_rgba8_straight()),
            layer.max_width(),
        )?;

        let block_w = layout
            .lines()
            .map(|l| l.metrics().advance)
            .fold(layout.width(), f32::max);
        let width = to_raster_dim(block_w)?;
        let height = to_raster_dim(layout.height())?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        let mut drew_any = false;
        for line in layout.lines() {
            let dx = ((f32::from(width) - line.metrics().advance) / 2.0).max(0.0);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((f64::from(dx), 0.0)));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();
                drew_any |= !glyphs.is_empty();
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs.into_iter());
            }
        }

        if !drew_any {
            return Ok(Raster::transparent(u32::from(width), u32::from(height)));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Raster::new(
            u32::from(width),
            u32::from(height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn to_raster_dim(v: f32) -> MemeResult<u16> {
    let v = if v.is_finite() { v.ceil() } else { 0.0 };
    if v > f32::from(u16::MAX) {
        return Err(MemeError::validation(format!(
            "text block of {v} px exceeds the rasterizer limit"
        )));
    }
    Ok((v as u16).max(1))
}
