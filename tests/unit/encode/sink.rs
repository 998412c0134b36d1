use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![v, v, v, 255],
    }
}

#[test]
fn in_memory_sink_captures_config_and_frames() {
    let mut sink = InMemorySink::new();
    assert!(sink.config().is_none());

    let cfg = SinkConfig {
        width: 1,
        height: 1,
        delay_ms: 80,
        repeat: 0,
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &frame(1)).unwrap();
    sink.push_frame(FrameIndex(1), &frame(2)).unwrap();
    assert!(!sink.is_ended());
    sink.end().unwrap();

    assert_eq!(sink.config(), Some(cfg));
    assert!(sink.is_ended());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [0, 1]);
    assert_eq!(sink.frames()[1].1.data[0], 2);
}

#[test]
fn begin_resets_previous_capture() {
    let mut sink = InMemorySink::new();
    let cfg = SinkConfig {
        width: 1,
        height: 1,
        delay_ms: 100,
        repeat: 3,
    };
    sink.begin(cfg).unwrap();
    sink.push_frame(FrameIndex(0), &frame(9)).unwrap();
    sink.end().unwrap();

    sink.begin(cfg).unwrap();
    assert!(sink.frames().is_empty());
    assert!(!sink.is_ended());
}
