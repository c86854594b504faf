use super::*;
use std::path::PathBuf;

fn clip(duration_sec: f64, width: u32, height: u32) -> VideoClip {
    VideoClip::from_source(VideoSourceInfo {
        source_path: PathBuf::from("synthetic.mp4"),
        width,
        height,
        fps: Fps::new(30, 1).unwrap(),
        duration_sec,
        has_audio: false,
    })
    .unwrap()
}

#[test]
fn looping_a_short_clip_lands_exactly_on_the_target() {
    // 3 s source, 10 s target: 4 repetitions (12 s) trimmed to 10 s.
    let c = clip(3.0, 640, 360).looped_to(10.0);
    assert_eq!(c.duration_sec(), 10.0);
    assert_eq!(c.frame_count(Fps::new(30, 1).unwrap()), 300);
}

#[test]
fn looping_a_long_clip_is_a_no_op() {
    let c = clip(12.0, 640, 360);
    assert_eq!(c.looped_to(10.0), c);
    assert_eq!(c.looped_to(f64::NAN), c);
}

#[test]
fn normalize_pair_uses_the_longer_duration() {
    let a = clip(2.5, 640, 360);
    let b = clip(7.0, 1920, 1080);
    let (na, nb, target) = normalize_pair(&a, &b);
    assert_eq!(target, 7.0);
    assert_eq!(na.duration_sec(), 7.0);
    assert_eq!(nb.duration_sec(), 7.0);
    // Sizes are untouched by normalization.
    assert_eq!((na.width(), na.height()), (640, 360));

    let (nb2, na2, target2) = normalize_pair(&b, &a);
    assert_eq!(target2, 7.0);
    assert_eq!(nb2.duration_sec(), na2.duration_sec());
}

#[test]
fn trimming_never_extends() {
    let c = clip(4.0, 10, 10);
    assert_eq!(c.trimmed_to(2.0).duration_sec(), 2.0);
    assert_eq!(c.trimmed_to(9.0).duration_sec(), 4.0);
    assert_eq!(c.trimmed_to(-1.0).duration_sec(), 4.0);
}

#[test]
fn resizes_keep_aspect_ratio() {
    let c = clip(1.0, 1920, 1080);
    let w = c.resized_to_width(1080);
    assert_eq!((w.width(), w.height()), (1080, 608));
    let h = c.resized_to_height(768);
    assert_eq!((h.width(), h.height()), (1365, 768));
    // Resizing does not touch the source or the duration.
    assert_eq!(c.width(), 1920);
    assert_eq!(h.duration_sec(), 1.0);
}

#[test]
fn frame_stream_reports_exact_frame_total() {
    let c = clip(3.0, 64, 64).looped_to(10.0);
    let frames = c.frames(Fps::new(25, 1).unwrap());
    assert_eq!(frames.total_frames(), 250);
    assert_eq!((frames.width(), frames.height()), (64, 64));
    assert_eq!(frames.frame().len(), 64 * 64 * 4);
}

#[test]
fn zero_length_source_is_rejected() {
    let err = VideoClip::from_source(VideoSourceInfo {
        source_path: PathBuf::from("empty.mp4"),
        width: 10,
        height: 10,
        fps: Fps::new(30, 1).unwrap(),
        duration_sec: 0.0,
        has_audio: false,
    })
    .unwrap_err();
    assert!(matches!(err, MemeError::Media(_)));
}
