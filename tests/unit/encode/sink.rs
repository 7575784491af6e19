use super::*;

fn cfg() -> SinkConfig {
    SinkConfig {
        width: 2,
        height: 2,
        fps: Fps::new(30, 1).unwrap(),
    }
}

fn frame(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA {
        width: w,
        height: h,
        data: vec![7; (w * h * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn in_memory_sink_collects_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(0), &frame(2, 2)).unwrap();
    sink.push_frame(FrameIndex(3), &frame(2, 2)).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(cfg()));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 3]);
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(2), &frame(2, 2)).unwrap();
    let err = sink.push_frame(FrameIndex(2), &frame(2, 2)).unwrap_err();
    assert!(matches!(err, SavannaError::Encode(_)));
    assert!(sink.push_frame(FrameIndex(1), &frame(2, 2)).is_err());
}

#[test]
fn size_mismatch_is_a_validation_error() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    let err = sink.push_frame(FrameIndex(0), &frame(4, 2)).unwrap_err();
    assert!(matches!(err, SavannaError::Validation(_)));

    let mut short = frame(2, 2);
    short.data.pop();
    assert!(sink.push_frame(FrameIndex(0), &short).is_err());
}

#[test]
fn push_before_begin_fails() {
    let mut sink = InMemorySink::new();
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2)).is_err());
}

#[test]
fn begin_resets_previous_run() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg()).unwrap();
    sink.push_frame(FrameIndex(5), &frame(2, 2)).unwrap();
    sink.end().unwrap();

    sink.begin(cfg()).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_finished());
    sink.push_frame(FrameIndex(0), &frame(2, 2)).unwrap();
}

#[test]
fn frame_len_is_rgba8() {
    assert_eq!(cfg().frame_len(), 16);
}
