use super::*;
use crate::foundation::core::Fps;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("savanna_png_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn writes_numbered_pngs() {
    let dir = temp_dir("seq");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        width: 2,
        height: 1,
        fps: Fps::new(10, 1).unwrap(),
    })
    .unwrap();

    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    };
    sink.push_frame(FrameIndex(0), &frame).unwrap();
    sink.push_frame(FrameIndex(1), &frame).unwrap();
    sink.end().unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(sink.written()[1].ends_with("frame_00001.png"));

    let img = image::open(&sink.written()[0]).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 1));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 255, 255]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn prefix_is_configurable() {
    let sink = PngSequenceSink::new("out").with_prefix("savanna-");
    assert_eq!(
        sink.frame_path(FrameIndex(42)),
        PathBuf::from("out").join("savanna-00042.png")
    );
}

#[test]
fn rejects_frames_before_begin_and_out_of_order() {
    let dir = temp_dir("order");
    let mut sink = PngSequenceSink::new(&dir);
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![0, 0, 0, 255],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());

    sink.begin(SinkConfig {
        width: 1,
        height: 1,
        fps: Fps::new(1, 1).unwrap(),
    })
    .unwrap();
    sink.push_frame(FrameIndex(3), &frame).unwrap();
    assert!(sink.push_frame(FrameIndex(3), &frame).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}
