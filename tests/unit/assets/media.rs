use super::*;

#[test]
fn parse_ff_ratio_accepts_rationals_and_integers() {
    assert_eq!(parse_ff_ratio("30/1"), Some(Fps { num: 30, den: 1 }));
    assert_eq!(
        parse_ff_ratio("30000/1001"),
        Some(Fps {
            num: 30000,
            den: 1001
        })
    );
    assert_eq!(parse_ff_ratio("25"), Some(Fps { num: 25, den: 1 }));
    assert_eq!(parse_ff_ratio("0/0"), None);
    assert_eq!(parse_ff_ratio("abc"), None);
}

#[test]
fn audio_pcm_duration_counts_frames_not_samples() {
    let pcm = AudioPcm {
        sample_rate: 4,
        channels: 2,
        interleaved_f32: vec![0.0; 16],
    };
    assert_eq!(pcm.frame_count(), 8);
    assert!((pcm.duration_sec() - 2.0).abs() < 1e-12);
}

#[test]
fn probe_missing_file_is_not_found() {
    let err = probe_video(Path::new("definitely/not/here.mp4")).unwrap_err();
    assert!(matches!(err, MemeError::NotFound(_)));
}

#[test]
fn decode_audio_missing_file_is_not_found() {
    let err = decode_audio_f32_stereo(Path::new("definitely/not/here.wav"), MIX_SAMPLE_RATE)
        .unwrap_err();
    assert!(matches!(err, MemeError::NotFound(_)));
}
