use super::*;
use crate::assets::media::AudioPcm;

fn base(duration_sec: f64) -> Composite {
    Composite::new(
        Canvas::VERTICAL_HD,
        Fps::new(30, 1).unwrap(),
        duration_sec,
        Rgba8Premul::opaque_black(),
    )
    .unwrap()
}

#[test]
fn frame_count_rounds_duration_times_fps() {
    assert_eq!(base(10.0).frame_count(), 300);
    assert_eq!(base(2.51).frame_count(), 75);
    let ntsc = Composite::new(
        Canvas::VERTICAL_HD,
        Fps::new(30000, 1001).unwrap(),
        10.0,
        Rgba8Premul::opaque_black(),
    )
    .unwrap();
    assert_eq!(ntsc.frame_count(), 300);
}

#[test]
fn rejects_empty_duration() {
    let fps = Fps::new(30, 1).unwrap();
    let bg = Rgba8Premul::opaque_black();
    assert!(Composite::new(Canvas::VERTICAL_HD, fps, 0.0, bg).is_err());
    assert!(Composite::new(Canvas::VERTICAL_HD, fps, f64::INFINITY, bg).is_err());
}

#[test]
fn with_audio_leaves_the_original_untouched() {
    let c = base(1.0);
    let audio = AudioClip::from_pcm(AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.0; 96_000],
    })
    .unwrap();
    let with = c.with_audio(audio);
    assert!(c.audio().is_none());
    assert_eq!(with.audio().map(|a| a.frame_count()), Some(48_000));
}

#[test]
fn center_anchor_can_go_negative() {
    assert_eq!(Anchor::Center(0).resolve(0, 1080, 1000), 40);
    assert_eq!(Anchor::Center(0).resolve(0, 1080, 1365), -143);
    assert_eq!(Anchor::Center(3).resolve(0, 1080, 1000), 43);
    assert_eq!(Anchor::Px(100).resolve(960, 192, 50), 1060);
}

#[test]
fn position_resolves_inside_a_band() {
    let band = Rect::new(0.0, 960.0, 1080.0, 1152.0);
    let (x, y) = Position::centered().resolve(band, (500, 92));
    assert_eq!((x, y), (290, 1010));
}

#[test]
fn layers_keep_insertion_order() {
    use crate::config::model::TextStyle;
    use crate::text::layers::build_band_layer;

    let style = TextStyle {
        font_path: "font.ttf".into(),
        font_size: 40,
        color: crate::assets::color::ColorDef::white(),
    };
    let band = Rect::new(0.0, 0.0, 1080.0, 192.0);
    let c = base(1.0).with_layers([
        Layer::Text(build_band_layer("first", 1.0, &style, band)),
        Layer::Text(build_band_layer("second", 1.0, &style, band)),
    ]);
    let names: Vec<_> = c
        .layers()
        .iter()
        .map(|l| match l {
            Layer::Text(t) => t.text.as_str(),
            Layer::Video { .. } => "video",
        })
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}
