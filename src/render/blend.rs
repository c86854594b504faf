use crate::foundation::core::Rect;
use crate::foundation::math::mul_div255_u8;
use crate::render::frame::FrameRGBA;

pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Blend a `src_w`x`src_h` premultiplied bitmap over `dst` with its top-left at `(x, y)`.
///
/// Parts outside the frame are clipped. Returns the number of pixels written.
pub fn blit_over(dst: &mut FrameRGBA, src: &[u8], src_w: u32, src_h: u32, x: i32, y: i32) -> u64 {
    let frame = Rect::new(0.0, 0.0, f64::from(dst.width), f64::from(dst.height));
    blit_over_clipped(dst, src, src_w, src_h, x, y, frame)
}

/// Like [`blit_over`], but only pixels inside `clip` (and the frame) are touched.
///
/// Fractional clip edges are widened to whole pixels.
pub fn blit_over_clipped(
    dst: &mut FrameRGBA,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i32,
    y: i32,
    clip: Rect,
) -> u64 {
    if src.len() != (src_w as usize) * (src_h as usize) * 4 {
        return 0;
    }
    let clip = clip.abs();
    if !clip.is_finite() {
        return 0;
    }

    let x0 = i64::from(x).max(0).max(clip.x0.floor() as i64);
    let y0 = i64::from(y).max(0).max(clip.y0.floor() as i64);
    let x1 = (i64::from(x) + i64::from(src_w))
        .min(i64::from(dst.width))
        .min(clip.x1.ceil() as i64);
    let y1 = (i64::from(y) + i64::from(src_h))
        .min(i64::from(dst.height))
        .min(clip.y1.ceil() as i64);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let run = (x1 - x0) as usize;
    let sx = (x0 - i64::from(x)) as usize;
    let dst_stride = dst.width as usize * 4;
    let src_stride = src_w as usize * 4;

    for dy in y0..y1 {
        let sy = (dy - i64::from(y)) as usize;
        let d_start = dy as usize * dst_stride + x0 as usize * 4;
        let s_start = sy * src_stride + sx * 4;
        let d_row = &mut dst.data[d_start..d_start + run * 4];
        let s_row = &src[s_start..s_start + run * 4];

        if s_row.chunks_exact(4).all(|px| px[3] == 255) {
            d_row.copy_from_slice(s_row);
            continue;
        }
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }

    (run as u64) * ((y1 - y0) as u64)
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
