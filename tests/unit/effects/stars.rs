use super::*;
use crate::foundation::core::Canvas;

fn config(frequency: f64) -> StarsConfig {
    StarsConfig {
        frequency,
        color: Color::rgb(200, 200, 120),
        size: 1,
        twinkle: 40.0,
        seed: None,
    }
}

fn star(trigger: u32, duration: u32) -> Star {
    Star {
        x: 1,
        y: 1,
        size: 1,
        color: Color::rgb(100, 100, 100),
        twinkle: 3.0_f64.sqrt() * 20.0,
        trigger,
        duration,
        twinkling: false,
        counter: 0,
    }
}

#[test]
fn star_count_and_placement_follow_config() {
    let field = StarField::from_seed(&config(0.01), 100, 40, 7).unwrap();
    assert_eq!(field.len(), 40);
    for s in field.stars() {
        assert!((0..100).contains(&s.x));
        assert!((0..40).contains(&s.y));
        assert!(TRIGGER_FRAMES.contains(&s.trigger));
        assert!(TWINKLE_FRAMES.contains(&s.duration));
        assert!(s.counter() <= s.trigger);
        assert!(!s.is_twinkling());
    }
}

#[test]
fn same_seed_same_field() {
    let a = StarField::from_seed(&config(0.05), 64, 32, 42).unwrap();
    let b = StarField::from_seed(&config(0.05), 64, 32, 42).unwrap();
    let c = StarField::from_seed(&config(0.05), 64, 32, 43).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(StarField::from_seed(&config(1.5), 10, 10, 0).is_err());
    assert!(StarField::from_seed(&config(-0.1), 10, 10, 0).is_err());
    let mut cfg = config(0.1);
    cfg.size = 0;
    assert!(StarField::from_seed(&cfg, 10, 10, 0).is_err());
}

#[test]
fn empty_sky_has_no_stars() {
    assert!(StarField::from_seed(&config(1.0), 0, 10, 0).unwrap().is_empty());
    assert!(StarField::from_seed(&config(0.0), 10, 10, 0).unwrap().is_empty());
}

#[test]
fn twinkle_cycle_follows_trigger_and_duration() {
    let mut s = star(6, 3);
    let base = s.color;
    let lit = Color::rgb(120, 120, 120);

    // Counter 1..=6 stays plain; the 7th frame exceeds the trigger and flips.
    for _ in 0..7 {
        assert_eq!(s.advance(), base);
    }
    assert!(s.is_twinkling());
    assert_eq!(s.counter(), 0);

    for _ in 0..3 {
        assert_eq!(s.advance(), lit);
    }
    assert!(!s.is_twinkling());
    assert_eq!(s.counter(), 0);

    assert_eq!(s.advance(), base);
}

#[test]
fn tick_draws_every_star_once() {
    let cfg = StarsConfig {
        size: 2,
        ..config(0.02)
    };
    let mut field = StarField::from_seed(&cfg, 50, 20, 3).unwrap();
    let mut buf = FrameBuffer::new(Canvas::new(50, 30).unwrap());
    field.tick(&mut buf);
    for s in field.stars() {
        let px = buf.pixel(s.x, s.y).unwrap();
        assert_ne!(px, Color::TRANSPARENT);
    }
    // Nothing is drawn below the sky plus the star size.
    for y in 22..30 {
        for x in 0..50 {
            assert_eq!(buf.pixel(x, y).unwrap(), Color::TRANSPARENT);
        }
    }
}
