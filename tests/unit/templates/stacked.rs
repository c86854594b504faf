use super::*;
use crate::assets::color::ColorDef;
use crate::assets::media::VideoSourceInfo;
use crate::config::model::{CaptionPair, TextStyle};
use crate::foundation::core::Fps;

fn clip(name: &str, w: u32, h: u32, fps: Fps, duration_sec: f64) -> VideoClip {
    VideoClip::from_source(VideoSourceInfo {
        source_path: name.into(),
        width: w,
        height: h,
        fps,
        duration_sec,
        has_audio: false,
    })
    .unwrap()
}

fn meme(pairs: &[(&str, &str)]) -> StackedVideoMeme {
    StackedVideoMeme {
        top_video_path: "top.mp4".into(),
        bottom_video_path: "bottom.mp4".into(),
        captions: pairs
            .iter()
            .map(|(t, b)| CaptionPair {
                top: t.to_string(),
                bottom: b.to_string(),
            })
            .collect(),
        style: TextStyle {
            font_path: "font.ttf".into(),
            font_size: 48,
            color: ColorDef::white(),
        },
        audio_dir: None,
    }
}

#[test]
fn layout_bands_on_vertical_hd() {
    let l = StackedLayout::for_canvas(Canvas::VERTICAL_HD);
    assert_eq!((l.text_band_h, l.video_band_h), (192, 768));
    assert_eq!(l.top_text_band(), Rect::new(0.0, 0.0, 1080.0, 192.0));
    assert_eq!(l.top_video_y(), 192);
    assert_eq!(l.bottom_text_band(), Rect::new(0.0, 960.0, 1080.0, 1152.0));
    assert_eq!(l.bottom_video_y(), 1152);
}

#[test]
fn one_composite_per_caption_pair() {
    let top = clip("top.mp4", 1280, 720, Fps::new(30, 1).unwrap(), 3.0);
    let bottom = clip("bottom.mp4", 720, 1280, Fps::new(25, 1).unwrap(), 5.0);
    let out = compose(&meme(&[("a", "b"), ("c", "d")]), &top, &bottom).unwrap();
    assert_eq!(out.len(), 2);

    for c in &out {
        assert_eq!(c.duration_sec(), 5.0);
        assert_eq!(c.fps(), Fps::new(30, 1).unwrap());
        assert_eq!(c.frame_count(), 150);
        assert_eq!(c.layers().len(), 4);
    }
}

#[test]
fn videos_fill_their_bands_and_share_the_longer_duration() {
    let top = clip("top.mp4", 1280, 720, Fps::new(30, 1).unwrap(), 3.0);
    let bottom = clip("bottom.mp4", 720, 1280, Fps::new(25, 1).unwrap(), 5.0);
    let out = compose(&meme(&[("upper", "lower")]), &top, &bottom).unwrap();
    let layers = out[0].layers();

    let Layer::Text(upper) = &layers[0] else {
        panic!("expected top caption first");
    };
    assert_eq!(upper.text, "upper");
    assert_eq!(upper.region, Some(Rect::new(0.0, 0.0, 1080.0, 192.0)));

    let Layer::Video { clip, position } = &layers[1] else {
        panic!("expected top video second");
    };
    assert_eq!((clip.width(), clip.height()), (1365, 768));
    assert_eq!(clip.duration_sec(), 5.0);
    assert_eq!(*position, Position::new(Anchor::Center(0), Anchor::Px(192)));

    let Layer::Text(lower) = &layers[2] else {
        panic!("expected bottom caption third");
    };
    assert_eq!(lower.region, Some(Rect::new(0.0, 960.0, 1080.0, 1152.0)));

    let Layer::Video { clip, position } = &layers[3] else {
        panic!("expected bottom video last");
    };
    assert_eq!((clip.width(), clip.height()), (432, 768));
    assert_eq!(clip.duration_sec(), 5.0);
    assert_eq!(position.y, Anchor::Px(1152));
}

#[test]
fn no_pairs_no_composites() {
    let a = clip("a.mp4", 10, 10, Fps::new(30, 1).unwrap(), 1.0);
    assert!(compose(&meme(&[]), &a, &a).unwrap().is_empty());
}
