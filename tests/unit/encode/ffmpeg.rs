use super::*;

#[test]
fn transparent_premul_pixel_becomes_background() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[0, 0, 0, 0], [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn opaque_premul_pixel_passes_through() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg(&mut dst, &[1, 2, 3, 255], [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn half_alpha_blends_both_ways() {
    let mut premul = vec![0u8; 4];
    flatten_premul_over_bg(&mut premul, &[100, 0, 0, 128], [0, 0, 200, 255]).unwrap();
    assert_eq!(premul[0], 100);
    assert_eq!(premul[2], 100);

    let mut straight = vec![0u8; 4];
    flatten_straight_over_bg(&mut straight, &[200, 0, 0, 128], [0, 0, 200, 255]).unwrap();
    assert_eq!(straight[0], 100);
    assert_eq!(straight[2], 100);
    assert_eq!(straight[3], 255);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg(&mut dst, &[0; 4], [0, 0, 0, 255]).is_err());
    let mut odd = vec![0u8; 3];
    assert!(flatten_straight_over_bg(&mut odd, &[0; 3], [0, 0, 0, 255]).is_err());
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let dir = std::env::temp_dir().join("savanna_ffmpeg_odd");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    let err = sink
        .begin(SinkConfig {
            width: 961,
            height: 540,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, SavannaError::Validation(_)));
}

#[test]
fn zero_fps_is_rejected_before_spawning() {
    let dir = std::env::temp_dir().join("savanna_ffmpeg_zero_fps");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    let err = sink
        .begin(SinkConfig {
            width: 96,
            height: 54,
            fps: Fps { num: 30, den: 0 },
        })
        .unwrap_err();
    assert!(matches!(err, SavannaError::Validation(_)));
    assert!(sink.child.is_none());
}

#[test]
fn dropping_a_started_sink_reaps_the_encoder() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = std::env::temp_dir().join("savanna_ffmpeg_drop");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(dir.join("out.mp4")));
    sink.begin(SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    let pid = sink.child.as_ref().map(Child::id);
    assert!(pid.is_some());
    drop(sink);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn fps_is_passed_as_a_rational() {
    assert_eq!(fps_arg(Fps::new(30000, 1001).unwrap()), "30000/1001");
}
