use super::*;
use crate::foundation::core::{Canvas, Rgba8Premul};

fn frame(w: u32, h: u32) -> FrameRGBA {
    let mut f = FrameRGBA::new(Canvas {
        width: w,
        height: h,
    });
    f.fill(Rgba8Premul::opaque_black());
    f
}

#[test]
fn over_transparent_src_keeps_dst() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
}

#[test]
fn over_opaque_src_replaces_dst() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn over_half_white_on_black_is_mid_gray() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn blit_clips_negative_and_overflowing_offsets() {
    let mut dst = frame(4, 4);
    let src = [255u8; 3 * 3 * 4];
    // Only the bottom-right 2x2 of the source lands inside.
    let written = blit_over(&mut dst, &src, 3, 3, -1, -1);
    assert_eq!(written, 4);
    assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(1, 1), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 255]));

    let written = blit_over(&mut dst, &src, 3, 3, 3, 3);
    assert_eq!(written, 1);
    assert_eq!(dst.pixel(3, 3), Some([255, 255, 255, 255]));
}

#[test]
fn blit_fully_outside_writes_nothing() {
    let mut dst = frame(4, 4);
    let before = dst.data.clone();
    let src = [255u8; 2 * 2 * 4];
    assert_eq!(blit_over(&mut dst, &src, 2, 2, 10, 0), 0);
    assert_eq!(blit_over(&mut dst, &src, 2, 2, -2, 0), 0);
    assert_eq!(dst.data, before);
}

#[test]
fn blit_rejects_mismatched_source_length() {
    let mut dst = frame(2, 2);
    assert_eq!(blit_over(&mut dst, &[0u8; 7], 2, 2, 0, 0), 0);
}

#[test]
fn clipped_blit_stays_inside_the_clip_rows() {
    let mut dst = frame(6, 8);
    let src = [255u8; 6 * 8 * 4];
    let written = blit_over_clipped(&mut dst, &src, 6, 8, 0, 0, Rect::new(0.0, 3.0, 6.0, 5.0));
    assert_eq!(written, 12);
    for y in 0..8 {
        let expected = if (3..5).contains(&y) {
            [255, 255, 255, 255]
        } else {
            [0, 0, 0, 255]
        };
        for x in 0..6 {
            assert_eq!(dst.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn clipped_blit_widens_fractional_edges() {
    let mut dst = frame(4, 4);
    let src = [255u8; 4 * 4 * 4];
    let written = blit_over_clipped(&mut dst, &src, 4, 4, 0, 0, Rect::new(1.5, 0.0, 2.5, 1.0));
    assert_eq!(written, 2);
    assert_eq!(dst.pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(3, 0), Some([0, 0, 0, 255]));
}

#[test]
fn clip_outside_the_frame_writes_nothing() {
    let mut dst = frame(4, 4);
    let before = dst.data.clone();
    let src = [255u8; 4 * 4 * 4];
    let clip = Rect::new(0.0, 10.0, 4.0, 20.0);
    assert_eq!(blit_over_clipped(&mut dst, &src, 4, 4, 0, 0, clip), 0);
    assert_eq!(dst.data, before);
}
