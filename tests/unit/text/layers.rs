use super::*;

fn style(font_size: u32) -> TextStyle {
    TextStyle {
        font_path: PathBuf::from("Impact.ttf"),
        font_size,
        color: ColorDef::white(),
    }
}

fn shadow(dx: f32, dy: f32) -> Shadow {
    Shadow {
        offset: [dx, dy],
        color: ColorDef::black(),
    }
}

#[test]
fn one_line_gives_shadow_then_foreground() {
    let layers = build_caption_layers("when the code compiles", 5.0, &style(70), &shadow(3.0, 3.0));
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].role, TextRole::Shadow);
    assert_eq!(layers[1].role, TextRole::Foreground);
    assert_eq!(layers[0].text, layers[1].text);
    assert_eq!(layers[1].position, Position::new(Anchor::Center(0), Anchor::Px(100)));
    assert_eq!(layers[0].position, Position::new(Anchor::Center(0), Anchor::Px(103)));
    assert_eq!(layers[0].color, ColorDef::black());
    assert_eq!(layers[1].color, ColorDef::white());
    assert!(layers.iter().all(|l| l.duration_sec == 5.0 && l.region.is_none()));
}

#[test]
fn lines_advance_by_font_size_plus_padding() {
    let layers = build_caption_layers("a\nb\nc", 1.0, &style(50), &shadow(2.0, -4.0));
    assert_eq!(layers.len(), 6);
    let fg_y: Vec<_> = layers
        .iter()
        .filter(|l| l.role == TextRole::Foreground)
        .map(|l| l.position.y)
        .collect();
    assert_eq!(fg_y, vec![Anchor::Px(100), Anchor::Px(160), Anchor::Px(220)]);
    assert_eq!(layers[4].text, "c");
    assert_eq!(layers[4].position.y, Anchor::Px(216));
}

#[test]
fn shadow_ignores_the_horizontal_offset() {
    let layers = build_caption_layers("HI", 1.0, &style(60), &shadow(25.0, 2.0));
    assert_eq!(layers[0].position.x, Anchor::Center(0));
    assert_eq!(layers[0].position.x, layers[1].position.x);
    assert_eq!(layers[0].position.y, Anchor::Px(102));
}

#[test]
fn empty_caption_still_yields_a_pair() {
    let layers = build_caption_layers("", 1.0, &style(40), &shadow(1.0, 1.0));
    assert_eq!(layers.len(), 2);
    assert!(layers.iter().all(|l| l.text.is_empty()));
}

#[test]
fn band_layer_is_centered_in_its_band() {
    let band = Rect::new(0.0, 960.0, 1080.0, 1152.0);
    let layer = build_band_layer("bottom text", 3.0, &style(60), band);
    assert_eq!(layer.role, TextRole::Foreground);
    assert_eq!(layer.position, Position::centered());
    assert_eq!(layer.region, Some(band));
    assert_eq!(layer.max_width(), Some(1080.0));
}
