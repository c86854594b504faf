use super::*;

fn ramp_clip(sample_rate: u32, frames: usize) -> AudioClip {
    let mut samples = Vec::with_capacity(frames * 2);
    for i in 0..frames {
        let v = i as f32 / frames as f32;
        samples.push(v);
        samples.push(-v);
    }
    AudioClip::from_pcm(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: samples,
    })
    .unwrap()
}

#[test]
fn looping_a_short_clip_lands_exactly_on_the_target() {
    // 3 s clip, 10 s target: 4 whole copies (12 s) cut back to 10 s, not 12 s.
    let clip = ramp_clip(100, 300);
    let looped = clip.looped_to(10.0).unwrap();
    assert_eq!(looped.frame_count(), 1000);
    assert!((looped.duration_sec() - 10.0).abs() < 1e-12);
    assert_eq!(looped.channels(), 2);
}

#[test]
fn looping_repeats_whole_clips_from_the_start() {
    let clip = ramp_clip(10, 4);
    let looped = clip.looped_to(1.0).unwrap();
    let src = clip.samples();
    let out = looped.samples();
    assert_eq!(out.len(), 20);
    for (i, chunk) in out.chunks_exact(src.len()).enumerate() {
        assert_eq!(chunk, src, "repetition {i} differs");
    }
    // Trailing partial copy starts from the first sample.
    assert_eq!(&out[16..20], &src[..4]);
}

#[test]
fn long_clip_is_only_trimmed() {
    let clip = ramp_clip(100, 500);
    let out = clip.looped_to(2.0).unwrap();
    assert_eq!(out.frame_count(), 200);
    assert_eq!(out.samples(), &clip.samples()[..400]);
}

#[test]
fn source_clip_is_not_modified() {
    let clip = ramp_clip(100, 50);
    let before = clip.clone();
    let _ = clip.looped_to(3.0).unwrap();
    let _ = clip.trimmed_to(0.1);
    assert_eq!(clip, before);
}

#[test]
fn empty_clip_cannot_be_looped_to_positive_duration() {
    let clip = AudioClip::from_pcm(AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: Vec::new(),
    })
    .unwrap();
    assert!(clip.looped_to(1.0).is_err());
    assert_eq!(clip.looped_to(0.0).unwrap().frame_count(), 0);
}

#[test]
fn from_pcm_rejects_ragged_interleaving() {
    let err = AudioClip::from_pcm(AudioPcm {
        sample_rate: 48_000,
        channels: 2,
        interleaved_f32: vec![0.0; 3],
    });
    assert!(err.is_err());
}

#[test]
fn write_f32le_emits_four_bytes_per_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("mix.f32le");
    let clip = ramp_clip(10, 5);
    clip.write_f32le(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), clip.samples().len() * 4);
    assert_eq!(
        f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        clip.samples()[2]
    );
}
