pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Whole-clip repetitions needed so that `count * clip_secs` strictly exceeds `target_secs`.
///
/// Returns 1 when the clip already covers the target.
pub(crate) fn loops_to_cover(clip_secs: f64, target_secs: f64) -> u32 {
    if !(clip_secs > 0.0) || !target_secs.is_finite() || clip_secs >= target_secs {
        return 1;
    }
    let n = (target_secs / clip_secs).floor() + 1.0;
    n.min(f64::from(u32::MAX)) as u32
}

/// Nearest sample-frame index for a duration at `sample_rate`.
pub(crate) fn secs_to_sample_frames(secs: f64, sample_rate: u32) -> usize {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * f64::from(sample_rate)).round() as usize
}

/// Scale `len` by `to / from`, rounded, never below 1.
pub(crate) fn scale_keep_aspect(len: u32, from: u32, to: u32) -> u32 {
    if from == 0 {
        return to.max(1);
    }
    let v = (f64::from(len) * f64::from(to) / f64::from(from)).round();
    (v as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
