use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::color::Color;
use serde_json::{Value, json};

fn scene(v: Value) -> Scene {
    Scene::from_reader(v.to_string().as_bytes()).unwrap()
}

fn black_white(frames: u64) -> Value {
    json!({
        "name": "bw",
        "width": 64,
        "height": 64,
        "frames": frames,
        "delay": 40,
        "loop": 3,
        "background": {
            "sky": {
                "name": "bw",
                "height": 64,
                "speed": 1,
                "theme": ["#000000", "#ffffff"],
                "gradation": { "type": "field", "magnitude": 4, "numColors": 0 }
            }
        }
    })
}

fn session(v: Value) -> RenderSession {
    RenderSession::new(&scene(v), &ThemeRegistry::builtin(), RenderSessionOpts::default()).unwrap()
}

#[test]
fn first_frame_matches_reference() {
    let mut s = session(black_white(1));
    let buf = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!(buf.pixel(0, 0).unwrap(), Color::BLACK);
    assert_eq!(buf.pixel(3, 28).unwrap(), Color::WHITE);
    assert_eq!(buf.pixel(4, 28).unwrap(), Color::BLACK);
    assert_eq!(buf.pixel(0, 32).unwrap(), Color::BLACK);
    assert_eq!(buf.pixel(1, 32).unwrap(), Color::WHITE);
    assert_eq!(buf.pixel(0, 62).unwrap(), Color::WHITE);
    assert_eq!(buf.pixel(0, 63).unwrap(), Color::TRANSPARENT);
}

#[test]
fn frames_must_be_consecutive() {
    let mut s = session(black_white(3));
    assert!(matches!(
        s.render_frame(FrameIndex(1)),
        Err(PixelatorError::Validation(_))
    ));
    s.render_frame(FrameIndex(0)).unwrap();
    assert!(s.render_frame(FrameIndex(0)).is_err());
    assert_eq!(s.next_frame(), FrameIndex(1));
    s.render_frame(FrameIndex(1)).unwrap();
    s.render_frame(FrameIndex(2)).unwrap();
    assert!(s.render_frame(FrameIndex(3)).is_err());
}

#[test]
fn render_all_produces_every_frame() {
    let mut s = session(black_white(4));
    let frames = s.render_all().unwrap();
    assert_eq!(frames.len(), 4);
    assert_ne!(frames[0], frames[1]);
    assert!(s.render_all().unwrap().is_empty());
}

#[test]
fn render_into_streams_to_sink() {
    let mut s = session(black_white(3));
    let mut sink = InMemorySink::new();
    let stats = s.render_into(&mut sink).unwrap();

    assert_eq!(stats.frames_rendered, 3);
    assert_eq!(
        sink.config(),
        Some(SinkConfig {
            width: 64,
            height: 64,
            delay_ms: 40,
            repeat: 3,
        })
    );
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, [0, 1, 2]);
    assert_eq!(sink.frames()[0].1.data.len(), 64 * 64 * 4);
    assert!(sink.is_ended());
}

#[test]
fn render_into_refuses_a_started_session() {
    let mut s = session(black_white(3));
    s.render_frame(FrameIndex(0)).unwrap();
    let mut sink = InMemorySink::new();
    assert!(s.render_into(&mut sink).is_err());
    assert!(sink.config().is_none());
}

#[test]
fn unknown_theme_fails_construction() {
    let mut v = black_white(1);
    v["background"]["sky"]["theme"] = json!("does-not-exist");
    let err = RenderSession::new(
        &scene(v),
        &ThemeRegistry::builtin(),
        RenderSessionOpts::default(),
    )
    .err()
    .unwrap();
    assert!(matches!(err, PixelatorError::UnknownTheme(_)));
}

fn starry(seed: Option<u64>) -> Value {
    let mut stars = json!({ "frequency": 0.05, "color": "#ffffff" });
    if let Some(seed) = seed {
        stars["seed"] = json!(seed);
    }
    json!({
        "name": "night",
        "width": 32,
        "height": 32,
        "frames": 20,
        "background": {
            "sky": {
                "height": 16,
                "theme": ["#000000", "#000000"],
                "gradation": { "type": "line", "magnitude": 1 },
                "stars": stars
            }
        }
    })
}

fn lit_pixels(buf: &FrameBuffer) -> usize {
    buf.pixels()
        .iter()
        .filter(|c| **c != Color::BLACK && **c != Color::TRANSPARENT)
        .count()
}

#[test]
fn seeded_stars_are_deterministic() {
    let mut a = session(starry(Some(11)));
    let mut b = session(starry(Some(11)));
    let fa = a.render_all().unwrap();
    let fb = b.render_all().unwrap();
    assert_eq!(fa, fb);
    assert!(lit_pixels(&fa[0]) > 0);
    // Stars stay inside the sky.
    for y in 16..32 {
        for x in 0..32 {
            assert_eq!(fa[0].pixel(x, y).unwrap(), Color::TRANSPARENT);
        }
    }
}

#[test]
fn session_seed_overrides_scene_seed() {
    let themes = ThemeRegistry::builtin();
    let opts = RenderSessionOpts { seed: Some(99) };
    let mut a = RenderSession::new(&scene(starry(Some(1))), &themes, opts.clone()).unwrap();
    let mut b = RenderSession::new(&scene(starry(None)), &themes, opts).unwrap();
    assert_eq!(
        a.render_frame(FrameIndex(0)).unwrap(),
        b.render_frame(FrameIndex(0)).unwrap()
    );
}

#[test]
fn mountains_cover_the_sun() {
    let v = json!({
        "name": "dusk",
        "width": 16,
        "height": 16,
        "frames": 1,
        "background": {
            "sky": {
                "height": 16,
                "theme": ["#102040", "#402010"],
                "gradation": { "type": "line", "magnitude": 1 },
                "sun": { "center": { "x": 8.0, "y": 10.0 }, "radius": 3, "color": "#ffdd00" }
            }
        },
        "mountains": [
            { "points": [{ "x": 0.0, "y": 15.0 }, { "x": 8.0, "y": 4.0 }, { "x": 15.0, "y": 15.0 }],
              "color": "#204020" }
        ]
    });
    let mut s = session(v);
    let buf = s.render_frame(FrameIndex(0)).unwrap();
    assert_eq!(buf.pixel(8, 12).unwrap(), Color::rgb(0x20, 0x40, 0x20));
}

#[test]
fn reflection_mirrors_sky_below_horizon() {
    let v = json!({
        "name": "lake",
        "width": 16,
        "height": 24,
        "frames": 2,
        "background": {
            "sky": {
                "height": 12,
                "theme": ["#000000", "#ffffff"],
                "gradation": { "type": "field", "magnitude": 2 }
            }
        },
        "effects": { "reflection": { "top": 12, "rippleDepth": 2, "rippleMagnitude": 1 } }
    });
    let mut s = session(v);
    for t in 0..2 {
        let buf = s.render_frame(FrameIndex(t)).unwrap();
        for k in 0..11 {
            for x in 0..16 {
                assert_eq!(
                    buf.pixel(x, 13 + k).unwrap(),
                    buf.pixel(x, 11 - k).unwrap(),
                    "frame {t} row {}",
                    13 + k
                );
            }
        }
    }
}
